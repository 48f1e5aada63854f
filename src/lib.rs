//! SVGen core: prompt compilation, NIM generation client, proxy endpoint,
//! and the chat composer/transcript state behind the client UI.

pub mod chat;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod nim;
pub mod prompt;
#[cfg(feature = "server")]
pub mod server;

pub use chat::{Composer, Transcript};
pub use config::{Config, NimConfig};
pub use error::{Result, SvgenError};
pub use models::*;
pub use nim::{ImageClient, NimClient};
