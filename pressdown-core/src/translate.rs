//! Body content translation seam.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Content translation failed: {0}")]
    Failed(String),
}

/// Turns a raw `content:encoded` body into the content written out
pub trait ContentTranslator {
    fn translate(&self, raw: &str) -> Result<String, TranslateError>;
}

/// Keeps the HTML body, normalizing line endings and outer whitespace
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPassthrough;

impl ContentTranslator for HtmlPassthrough {
    fn translate(&self, raw: &str) -> Result<String, TranslateError> {
        Ok(raw.replace("\r\n", "\n").trim().to_string())
    }
}
