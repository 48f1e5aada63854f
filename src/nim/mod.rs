pub mod image_client;

use crate::{config::NimConfig, error::Result};

pub use image_client::{ImageClient, DEFAULT_INVOKE_URL};

/// Facade over the per-concern NIM clients. Validates configuration once,
/// at construction.
#[derive(Clone)]
pub struct NimClient {
    image_client: ImageClient,
}

impl NimClient {
    pub fn new(config: NimConfig) -> Result<Self> {
        Ok(Self {
            image_client: ImageClient::new(config)?,
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
