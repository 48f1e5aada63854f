use crate::{
    config::NimConfig,
    error::{Result, SvgenError},
    logger,
    models::{ArtifactList, GeneratedImage, GenerationPayload, PNG_DATA_URL_PREFIX},
};
use reqwest::Client;

/// NIM text-to-image endpoint for the flux.1-dev model.
pub const DEFAULT_INVOKE_URL: &str =
    "https://ai.api.nvidia.com/v1/genai/black-forest-labs/flux.1-dev";

#[derive(Clone, Debug)]
pub struct ImageClient {
    client: Client,
    api_key: String,
    invoke_url: String,
}

impl ImageClient {
    /// A missing or blank API key is a configuration fault: construction
    /// fails here so no unauthenticated request is ever attempted.
    pub fn new(config: NimConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| SvgenError::ConfigError("NVIDIA API key is required".into()))?;

        Ok(Self {
            client: Client::new(),
            api_key,
            invoke_url: config
                .invoke_url
                .unwrap_or_else(|| DEFAULT_INVOKE_URL.to_string()),
        })
    }

    pub fn invoke_url(&self) -> &str {
        &self.invoke_url
    }

    fn build_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", self.api_key).parse().unwrap(),
        );
        headers.insert(reqwest::header::ACCEPT, "application/json".parse().unwrap());
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().unwrap(),
        );
        headers
    }

    /// Sends the compiled payload to the provider. Exactly one outbound
    /// call per invocation; a failed attempt is terminal for that request.
    pub async fn generate(&self, payload: &GenerationPayload) -> Result<GeneratedImage> {
        log::info!("Requesting silhouette generation from NIM");
        let _timer = logger::timer("nim image generation");

        let response = self
            .client
            .post(&self.invoke_url)
            .headers(self.build_headers())
            .json(payload)
            .send()
            .await
            .map_err(|e| SvgenError::TransportError(transport_message(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            log::warn!("NIM returned status {}: {}", status, message);
            return Err(SvgenError::ProviderError {
                status: status.as_u16(),
                message,
            });
        }

        // A success body that does not carry an artifact is a contract
        // violation, distinct from a provider-reported error.
        let body: ArtifactList = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("NIM success body was not parseable: {}", e);
                return Err(SvgenError::NoImage);
            }
        };

        match body.artifacts.into_iter().next().and_then(|a| a.base64) {
            Some(b64) if !b64.is_empty() => {
                log::info!("Received artifact ({} base64 characters)", b64.len());
                Ok(GeneratedImage {
                    image_url: format!("{}{}", PNG_DATA_URL_PREFIX, b64),
                })
            }
            _ => {
                log::warn!("NIM response carried no artifact");
                Err(SvgenError::NoImage)
            }
        }
    }
}

fn transport_message(e: &reqwest::Error) -> String {
    let message = e.to_string();
    if message.is_empty() {
        "Unknown error".to_string()
    } else {
        message
    }
}
