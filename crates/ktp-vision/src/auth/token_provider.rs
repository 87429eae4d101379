use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::ServiceAccountKey;
use crate::{Error, Result, TRACING_TARGET_AUTH};

/// OAuth2 scope granting access to the Vision API.
const VISION_SCOPE: &str = "https://www.googleapis.com/auth/cloud-vision";

/// Grant type for exchanging a self-signed JWT for an access token.
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for the signed assertion (Google's maximum).
const ASSERTION_LIFETIME: SignedDuration = SignedDuration::from_secs(3600);

/// Tokens are refreshed this long before they expire.
const REFRESH_MARGIN: SignedDuration = SignedDuration::from_secs(60);

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME.as_secs()
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Timestamp,
}

impl AccessToken {
    fn is_fresh(&self, now: Timestamp) -> bool {
        now.checked_add(REFRESH_MARGIN)
            .is_ok_and(|deadline| deadline < self.expires_at)
    }
}

/// Exchanges service-account assertions for access tokens and caches them.
///
/// A single token is shared by all requests until it nears expiry.
pub(crate) struct TokenProvider {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    cached: RwLock<Option<AccessToken>>,
}

impl TokenProvider {
    /// Creates a provider, failing early when the private key is not valid PEM.
    pub fn new(key: ServiceAccountKey) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;

        Ok(Self {
            key,
            encoding_key,
            cached: RwLock::new(None),
        })
    }

    /// Returns a valid access token, fetching a new one if needed.
    pub async fn access_token(&self, http_client: &HttpClient) -> Result<String> {
        {
            let cached = self.cached.read().await;
            if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Timestamp::now())) {
                return Ok(token.value.clone());
            }
        }

        let mut cached = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Timestamp::now())) {
            return Ok(token.value.clone());
        }

        let token = self.fetch(http_client).await?;
        let value = token.value.clone();
        *cached = Some(token);

        Ok(value)
    }

    fn sign_assertion(&self, now: Timestamp) -> Result<String> {
        let iat = now.as_second();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: VISION_SCOPE,
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME.as_secs(),
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        Ok(jsonwebtoken::encode(&header, &claims, &self.encoding_key)?)
    }

    async fn fetch(&self, http_client: &HttpClient) -> Result<AccessToken> {
        let now = Timestamp::now();
        let assertion = self.sign_assertion(now)?;

        tracing::debug!(
            target: TRACING_TARGET_AUTH,
            client_email = %self.key.client_email,
            token_uri = %self.key.token_uri,
            "Requesting access token"
        );

        let response = http_client
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            let body = match body.trim() {
                "" => status.canonical_reason().unwrap_or("empty response").to_owned(),
                trimmed => trimmed.to_owned(),
            };
            let status = status.as_u16();

            tracing::error!(
                target: TRACING_TARGET_AUTH,
                status,
                body = %body,
                "Access token request rejected"
            );

            return Err(Error::auth_error(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        let expires_at = now
            .checked_add(SignedDuration::from_secs(token.expires_in))
            .map_err(|e| Error::auth_error(format!("invalid token lifetime: {e}")))?;

        tracing::debug!(
            target: TRACING_TARGET_AUTH,
            expires_in = token.expires_in,
            "Access token acquired"
        );

        Ok(AccessToken {
            value: token.access_token,
            expires_at,
        })
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("client_email", &self.key.client_email)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{DecodingKey, Validation};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::fixtures::test_key;

    const TEST_PUBLIC_KEY: &str = include_str!("../../tests/fixtures/test_key.pub.pem");

    #[derive(Debug, Deserialize)]
    struct DecodedClaims {
        iss: String,
        scope: String,
        aud: String,
        iat: i64,
        exp: i64,
    }

    #[test]
    fn assertion_is_signed_with_service_account_key() {
        let provider = TokenProvider::new(test_key("https://oauth2.example/token".into())).unwrap();
        let now = Timestamp::now();
        let assertion = provider.sign_assertion(now).unwrap();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&["https://oauth2.example/token"]);
        let decoding_key = DecodingKey::from_rsa_pem(TEST_PUBLIC_KEY.as_bytes()).unwrap();
        let decoded =
            jsonwebtoken::decode::<DecodedClaims>(&assertion, &decoding_key, &validation).unwrap();

        assert_eq!(decoded.header.kid.as_deref(), Some("test-key-id"));
        assert_eq!(decoded.claims.iss, "ocr@elvora-dev.iam.gserviceaccount.com");
        assert_eq!(decoded.claims.scope, VISION_SCOPE);
        assert_eq!(decoded.claims.aud, "https://oauth2.example/token");
        assert_eq!(decoded.claims.exp - decoded.claims.iat, 3600);
    }

    #[test]
    fn invalid_private_key_is_rejected() {
        let mut key = test_key("https://oauth2.example/token".into());
        key.private_key = "not a pem".to_owned();
        assert!(matches!(TokenProvider::new(key), Err(Error::Jwt(_))));
    }

    #[tokio::test]
    async fn token_is_fetched_once_and_cached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"))
            .and(body_string_contains("assertion="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.cached",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = TokenProvider::new(test_key(format!("{}/token", server.uri()))).unwrap();
        let http_client = HttpClient::new();

        let first = provider.access_token(&http_client).await.unwrap();
        let second = provider.access_token(&http_client).await.unwrap();
        assert_eq!(first, "ya29.cached");
        assert_eq!(second, "ya29.cached");
    }

    #[tokio::test]
    async fn expiring_token_is_refreshed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.short",
                "expires_in": 30
            })))
            .expect(2)
            .mount(&server)
            .await;

        let provider = TokenProvider::new(test_key(format!("{}/token", server.uri()))).unwrap();
        let http_client = HttpClient::new();

        provider.access_token(&http_client).await.unwrap();
        provider.access_token(&http_client).await.unwrap();
    }

    #[tokio::test]
    async fn rejected_grant_without_body_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let provider = TokenProvider::new(test_key(format!("{}/token", server.uri()))).unwrap();
        let err = provider
            .access_token(&HttpClient::new())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Authentication failed: token endpoint returned 401: Unauthorized"
        );
    }

    #[tokio::test]
    async fn rejected_grant_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid JWT Signature."
            })))
            .mount(&server)
            .await;

        let provider = TokenProvider::new(test_key(format!("{}/token", server.uri()))).unwrap();
        let err = provider
            .access_token(&HttpClient::new())
            .await
            .unwrap_err();

        match err {
            Error::AuthError { reason } => assert!(reason.contains("invalid_grant")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
