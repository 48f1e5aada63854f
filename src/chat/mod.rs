pub mod composer;
pub mod transcript;

pub use composer::Composer;
pub use transcript::Transcript;
