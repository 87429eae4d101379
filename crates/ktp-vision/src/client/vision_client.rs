use std::sync::Arc;

use reqwest::{Client as HttpClient, ClientBuilder, RequestBuilder, StatusCode};
use url::Url;

use super::{VisionConfig, VisionCredentials};
use crate::auth::TokenProvider;
use crate::models::{BatchAnnotateImagesRequest, BatchAnnotateImagesResponse, ErrorResponse};
use crate::{Error, Result, TRACING_TARGET_CLIENT};

/// Path of the batch annotate endpoint, relative to the base URL.
const ANNOTATE_PATH: &str = "v1/images:annotate";

/// Resolved request authentication.
#[derive(Debug)]
enum Auth {
    ServiceAccount(TokenProvider),
    ApiKey(String),
    None,
}

#[derive(Debug)]
struct VisionClientInner {
    http_client: HttpClient,
    annotate_url: Url,
    config: VisionConfig,
    auth: Auth,
}

/// Client for the Vision `images:annotate` endpoint.
///
/// Cheap to clone; clones share the HTTP connection pool and the cached
/// access token.
///
/// # Examples
///
/// ```rust,no_run
/// use ktp_vision::{VisionClient, VisionConfig, VisionCredentials};
///
/// # async fn example() -> ktp_vision::Result<()> {
/// let credentials = VisionCredentials::service_account_file("credentials.json")?;
/// let client = VisionClient::new(VisionConfig::default(), credentials)?;
///
/// let text = client.detect_text("gs://elvora/ktp_file/ktp.jpg").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VisionClient {
    inner: Arc<VisionClientInner>,
}

impl VisionClient {
    /// Create a new Vision client with the given configuration and credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, the service-account private
    /// key cannot be parsed, or the HTTP client cannot be built.
    pub fn new(config: VisionConfig, credentials: VisionCredentials) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            base_url = %config.base_url,
            credentials = credentials.kind(),
            "Creating Vision client"
        );

        let annotate_url = config.parsed_base_url()?.join(ANNOTATE_PATH)?;

        let mut builder = ClientBuilder::new().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let http_client = builder.build()?;

        let auth = match credentials {
            VisionCredentials::ServiceAccount(key) => Auth::ServiceAccount(TokenProvider::new(key)?),
            VisionCredentials::ApiKey(key) => Auth::ApiKey(key),
            VisionCredentials::None => Auth::None,
        };

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            annotate_url = %annotate_url,
            "Vision client created"
        );

        Ok(Self {
            inner: Arc::new(VisionClientInner {
                http_client,
                annotate_url,
                config,
                auth,
            }),
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &VisionConfig {
        &self.inner.config
    }

    /// Runs text detection on the image at `image_uri`.
    ///
    /// Returns the first text annotation's description, which is the full text
    /// of the image, or an empty string when no text was detected.
    pub async fn detect_text(&self, image_uri: &str) -> Result<String> {
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            image_uri = %image_uri,
            "Requesting text detection"
        );

        let body = BatchAnnotateImagesRequest::text_detection(image_uri);
        let request = self
            .inner
            .http_client
            .post(self.inner.annotate_url.clone())
            .json(&body);
        let request = self.authorize(request).await?;

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            let message = error_message(status, &body);

            tracing::error!(
                target: TRACING_TARGET_CLIENT,
                status = status.as_u16(),
                message = %message,
                "Text detection request failed"
            );

            return Err(Error::api_error(status.as_u16(), message));
        }

        let response: BatchAnnotateImagesResponse = response.json().await?;
        let Some(image) = response.responses.into_iter().next() else {
            return Ok(String::new());
        };

        if let Some(error) = image.error.filter(|e| !e.message.is_empty()) {
            tracing::error!(
                target: TRACING_TARGET_CLIENT,
                code = error.code,
                message = %error.message,
                "Text detection reported an image error"
            );

            return Err(Error::annotation(error.code, error.message));
        }

        let text = image
            .text_annotations
            .into_iter()
            .next()
            .map(|annotation| annotation.description)
            .unwrap_or_default();

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            text_len = text.len(),
            "Text detection complete"
        );

        Ok(text)
    }

    /// Add authentication to a request.
    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let request = match &self.inner.auth {
            Auth::ServiceAccount(provider) => {
                let token = provider.access_token(&self.inner.http_client).await?;
                request.bearer_auth(token)
            }
            Auth::ApiKey(key) => request.query(&[("key", key)]),
            Auth::None => request,
        };

        Ok(request)
    }
}

/// Picks the upstream error message, then the raw body, then the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(response) = serde_json::from_str::<ErrorResponse>(body)
        && !response.error.message.is_empty()
    {
        return response.error.message;
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_owned();
    }

    status
        .canonical_reason()
        .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_owned)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::fixtures::test_key;

    const IMAGE_URI: &str = "gs://elvora/ktp_file/ktp.jpg";

    fn client(server: &MockServer, credentials: VisionCredentials) -> VisionClient {
        let config = VisionConfig::builder()
            .with_base_url(server.uri())
            .build()
            .unwrap();
        VisionClient::new(config, credentials).unwrap()
    }

    #[tokio::test]
    async fn returns_first_annotation_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .and(body_json(json!({
                "requests": [{
                    "image": { "source": { "imageUri": IMAGE_URI } },
                    "features": [{ "type": "TEXT_DETECTION" }]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responses": [{
                    "textAnnotations": [
                        { "locale": "id", "description": "3201011234567890\nBUDI SANTOSO\n" },
                        { "description": "3201011234567890" }
                    ]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server, VisionCredentials::None)
            .detect_text(IMAGE_URI)
            .await
            .unwrap();
        assert_eq!(text, "3201011234567890\nBUDI SANTOSO\n");
    }

    #[tokio::test]
    async fn no_annotations_yields_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "responses": [{}] })))
            .mount(&server)
            .await;

        let text = client(&server, VisionCredentials::None)
            .detect_text(IMAGE_URI)
            .await
            .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn image_error_in_success_body_is_annotation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responses": [{
                    "error": { "code": 7, "message": "The caller does not have permission" }
                }]
            })))
            .mount(&server)
            .await;

        let err = client(&server, VisionCredentials::None)
            .detect_text(IMAGE_URI)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Annotation { code: 7, .. }));
        assert_eq!(err.to_string(), "The caller does not have permission");
    }

    #[tokio::test]
    async fn http_error_uses_api_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {
                    "code": 403,
                    "message": "Cloud Vision API has not been used in project 42",
                    "status": "PERMISSION_DENIED"
                }
            })))
            .mount(&server)
            .await;

        let err = client(&server, VisionCredentials::None)
            .detect_text(IMAGE_URI)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ApiError { status: 403, .. }));
        assert_eq!(
            err.to_string(),
            "Cloud Vision API has not been used in project 42"
        );
    }

    #[tokio::test]
    async fn http_error_without_json_uses_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream connect error"))
            .mount(&server)
            .await;

        let err = client(&server, VisionCredentials::None)
            .detect_text(IMAGE_URI)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "upstream connect error");
    }

    #[tokio::test]
    async fn http_error_without_body_uses_status_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client(&server, VisionCredentials::None)
            .detect_text(IMAGE_URI)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ApiError { status: 503, .. }));
        assert_eq!(err.to_string(), "Service Unavailable");
    }

    #[test]
    fn error_message_never_comes_back_empty() {
        let empty_api_message = r#"{"error":{"code":500,"message":""}}"#;
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, empty_api_message),
            empty_api_message
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "  \n"), "Bad Gateway");
        assert_eq!(
            error_message(StatusCode::from_u16(599).unwrap(), ""),
            "HTTP 599"
        );
    }

    #[tokio::test]
    async fn api_key_is_sent_as_query_parameter() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .and(query_param("key", "AIza-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "responses": [{}] })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server, VisionCredentials::api_key("AIza-test"))
            .detect_text(IMAGE_URI)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn service_account_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.vision",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .and(header("authorization", "Bearer ya29.vision"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responses": [{ "textAnnotations": [{ "description": "NIK" }] }]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let key = test_key(format!("{}/token", server.uri()));
        let client = client(&server, VisionCredentials::ServiceAccount(key));

        assert_eq!(client.detect_text(IMAGE_URI).await.unwrap(), "NIK");
        assert_eq!(client.detect_text(IMAGE_URI).await.unwrap(), "NIK");
    }
}
