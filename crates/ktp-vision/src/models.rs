//! Wire types for the `images:annotate` REST endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /v1/images:annotate`.
#[derive(Debug, Serialize)]
pub(crate) struct BatchAnnotateImagesRequest {
    pub requests: Vec<AnnotateImageRequest>,
}

impl BatchAnnotateImagesRequest {
    /// Single text detection request for an image referenced by URI.
    pub fn text_detection(image_uri: &str) -> Self {
        Self {
            requests: vec![AnnotateImageRequest {
                image: Image {
                    source: ImageSource {
                        image_uri: image_uri.to_owned(),
                    },
                },
                features: vec![Feature {
                    kind: FeatureType::TextDetection,
                }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AnnotateImageRequest {
    pub image: Image,
    pub features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Image {
    pub source: ImageSource,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageSource {
    pub image_uri: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum FeatureType {
    TextDetection,
}

/// Successful response envelope.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct BatchAnnotateImagesResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnnotateImageResponse {
    #[serde(default)]
    pub text_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    pub error: Option<Status>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EntityAnnotation {
    #[serde(default)]
    pub description: String,
}

/// Google RPC status, used both per image and for request-level errors.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// Request-level error body, e.g. `{"error": {"code": 403, "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: Status,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_detection_request_shape() {
        let request = BatchAnnotateImagesRequest::text_detection("gs://elvora/ktp_file/a.jpg");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "requests": [{
                    "image": { "source": { "imageUri": "gs://elvora/ktp_file/a.jpg" } },
                    "features": [{ "type": "TEXT_DETECTION" }]
                }]
            })
        );
    }

    #[test]
    fn response_without_annotations_parses() {
        let response: BatchAnnotateImagesResponse =
            serde_json::from_value(json!({ "responses": [{}] })).unwrap();
        assert!(response.responses[0].text_annotations.is_empty());
        assert!(response.responses[0].error.is_none());
    }
}
