//! Assistant features behind replaceable seams.
//!
//! The shipped implementations are deterministic placeholders; a model-backed
//! assistant or an OCR engine plugs in by implementing the same traits.

mod assistant;
mod recognizer;

pub use assistant::{HealthAssistant, PlaceholderAssistant, CHAT_GREETING};
#[cfg(any(test, feature = "test-utils"))]
pub use assistant::MockHealthAssistant;
pub use recognizer::{PlainTextRecognizer, TextRecognizer};
#[cfg(any(test, feature = "test-utils"))]
pub use recognizer::MockTextRecognizer;
