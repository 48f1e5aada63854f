//! Compiles a user-supplied subject into the fully specified generation
//! payload. The template wording and every non-prompt field are frozen:
//! changing any of them shifts the visual output distribution and must be
//! versioned as a product change.

use crate::models::{GenerationMode, GenerationPayload};

/// Substituted when the subject is empty after trimming.
pub const FALLBACK_SUBJECT: &str = "a tree";

pub const MODE: GenerationMode = GenerationMode::Base;
pub const CFG_SCALE: f32 = 3.5;
pub const IMAGE_SIZE: u32 = 1024;
pub const SEED: u32 = 0;
pub const STEPS: u32 = 50;

/// Builds the payload for any subject string. Total: never fails, never
/// performs I/O.
pub fn compile(subject: &str) -> GenerationPayload {
    let trimmed = subject.trim();
    let subject = if trimmed.is_empty() {
        FALLBACK_SUBJECT
    } else {
        trimmed
    };

    GenerationPayload {
        prompt: format!(
            "A high-contrast colored silhouette of a {}, with clean lines, no gradients, \
             no shading, and a white background. The subject should be easily recognizable \
             and composed of distinct, solid black shapes with no internal texture or detail. \
             The style should be minimalistic and suitable for vector tracing using Potrace.",
            subject
        ),
        mode: MODE,
        cfg_scale: CFG_SCALE,
        width: IMAGE_SIZE,
        height: IMAGE_SIZE,
        seed: SEED,
        steps: STEPS,
    }
}
