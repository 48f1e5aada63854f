use serde::{Deserialize, Serialize};

use crate::models::GenerationResult;

/// An attachment pending commitment into the transcript.
///
/// Identity is the `(name, size)` pair; a later file with the same pair is
/// treated as a duplicate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedImage {
    pub name: String,
    pub size: u64,
    #[serde(rename = "dataUrl")]
    pub data_url: String,
}

impl UploadedImage {
    pub fn matches(&self, name: &str, size: u64) -> bool {
        self.name == name && self.size == size
    }
}

/// One committed transcript entry. Text and images are frozen at commit
/// time; the generated result is attached at most once, later.
#[derive(Debug, Clone)]
pub struct ChatEntry {
    text: String,
    images: Vec<UploadedImage>,
    result: Option<GenerationResult>,
}

impl ChatEntry {
    /// Returns `None` when both the trimmed text and the images are empty;
    /// such an entry must never reach the transcript.
    pub(crate) fn new(text: String, images: Vec<UploadedImage>) -> Option<Self> {
        if text.trim().is_empty() && images.is_empty() {
            return None;
        }
        Some(Self {
            text,
            images,
            result: None,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn images(&self) -> &[UploadedImage] {
        &self.images
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    /// Set-once result slot; a second attachment is rejected so a stale
    /// outcome can never replace an earlier one.
    pub(crate) fn set_result(&mut self, result: GenerationResult) -> bool {
        if self.result.is_some() {
            return false;
        }
        self.result = Some(result);
        true
    }
}
