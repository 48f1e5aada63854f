use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Prefix that turns a raw base64 payload into a displayable PNG source.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Operating mode accepted by the NIM flux endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Base,
}

/// Compiled request body for the NIM image generation endpoint.
///
/// Every field except `prompt` is a constant of the system; see
/// [`crate::prompt::compile`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationPayload {
    pub prompt: String,
    pub mode: GenerationMode,
    pub cfg_scale: f32,
    pub width: u32,
    pub height: u32,
    pub seed: u32,
    pub steps: u32,
}

/// Successful generation: a self-contained data URL usable as an image source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedImage {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Single generated artifact as returned by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct Artifact {
    pub base64: Option<String>,
}

/// Success body shape of the provider. Anything else counts as "no image".
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactList {
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

/// Normalized outcome of one generation request, built at the provider
/// boundary. Exactly one variant; loosely-shaped provider data never leaves
/// the client.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    Image(GeneratedImage),
    Failure { message: String, status: u16 },
}

impl GenerationResult {
    pub fn is_image(&self) -> bool {
        matches!(self, GenerationResult::Image(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, GenerationResult::Failure { .. })
    }
}

impl From<Result<GeneratedImage>> for GenerationResult {
    fn from(result: Result<GeneratedImage>) -> Self {
        match result {
            Ok(image) => GenerationResult::Image(image),
            Err(e) => GenerationResult::Failure {
                message: e.response_message(),
                status: e.status_code(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SvgenError;

    #[test]
    fn payload_serializes_with_provider_field_names() {
        let payload = GenerationPayload {
            prompt: "test".to_string(),
            mode: GenerationMode::Base,
            cfg_scale: 3.5,
            width: 1024,
            height: 1024,
            seed: 0,
            steps: 50,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["mode"], "base");
        assert_eq!(json["cfg_scale"], 3.5);
        assert_eq!(json["width"], 1024);
        assert_eq!(json["seed"], 0);
        assert_eq!(json["steps"], 50);
    }

    #[test]
    fn artifact_list_tolerates_missing_field() {
        let body: ArtifactList = serde_json::from_str("{}").unwrap();
        assert!(body.artifacts.is_empty());

        let body: ArtifactList =
            serde_json::from_str(r#"{"artifacts": [{"base64": "QUJD", "seed": 7}]}"#).unwrap();
        assert_eq!(body.artifacts.len(), 1);
        assert_eq!(body.artifacts[0].base64.as_deref(), Some("QUJD"));
    }

    #[test]
    fn generated_image_serializes_as_image_url() {
        let image = GeneratedImage {
            image_url: format!("{}QUJD", PNG_DATA_URL_PREFIX),
        };
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["imageUrl"], "data:image/png;base64,QUJD");
    }

    #[test]
    fn result_keeps_exactly_one_variant() {
        let ok = GenerationResult::from(Ok(GeneratedImage {
            image_url: "data:image/png;base64,QUJD".to_string(),
        }));
        assert!(ok.is_image());
        assert!(!ok.is_failure());

        let err = GenerationResult::from(Err(SvgenError::ProviderError {
            status: 429,
            message: "rate limited".to_string(),
        }));
        match err {
            GenerationResult::Failure { message, status } => {
                assert_eq!(message, "rate limited");
                assert_eq!(status, 429);
            }
            GenerationResult::Image(_) => panic!("expected a failure"),
        }
    }
}
