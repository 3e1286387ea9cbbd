//! Text recognition over uploaded document bytes.

use async_trait::async_trait;

use common::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Extract the text content of a document
    async fn recognize(&self, bytes: &[u8]) -> AppResult<String>;
}

/// Treats the document as text: lossy UTF-8 decoding, trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRecognizer;

#[async_trait]
impl TextRecognizer for PlainTextRecognizer {
    async fn recognize(&self, bytes: &[u8]) -> AppResult<String> {
        Ok(String::from_utf8_lossy(bytes).trim().to_string())
    }
}
