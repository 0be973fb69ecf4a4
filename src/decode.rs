//! Rendering captured output.
//!
//! Output bytes can be used as-is, decoded to text, or deserialized into a
//! typed value through a [`Decoder`]. Decoder failures are passed through
//! unchanged inside [`ExecError::DecodeFailed`].

use crate::error::{ExecError, Result};
use serde::de::DeserializeOwned;

/// A structured decoder for command output.
pub trait Decoder {
    type Error: std::error::Error + Send + Sync + 'static;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> std::result::Result<T, Self::Error>;
}

/// Decodes JSON output with `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    type Error = serde_json::Error;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> std::result::Result<T, Self::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Decodes YAML output with `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDecoder;

impl Decoder for YamlDecoder {
    type Error = serde_yaml::Error;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> std::result::Result<T, Self::Error> {
        serde_yaml::from_slice(bytes)
    }
}

/// Decode output as UTF-8 text, trimming surrounding whitespace if asked.
///
/// # Errors
///
/// * `ExecError::NotUtf8` - the bytes are not valid UTF-8
pub fn to_text(bytes: Vec<u8>, auto_trim: bool) -> Result<String> {
    let text = String::from_utf8(bytes)?;
    if auto_trim {
        Ok(trimmed(text))
    } else {
        Ok(text)
    }
}

/// Deserialize output into `T` with the given decoder.
///
/// # Errors
///
/// * `ExecError::DecodeFailed` - the decoder rejected the bytes
pub fn to_value<T, D>(bytes: &[u8], decoder: &D) -> Result<T>
where
    T: DeserializeOwned,
    D: Decoder,
{
    decoder
        .decode(bytes)
        .map_err(|e| ExecError::DecodeFailed(Box::new(e)))
}

fn trimmed(text: String) -> String {
    let trimmed = text.trim();
    if trimmed.len() == text.len() {
        text
    } else {
        trimmed.to_string()
    }
}
