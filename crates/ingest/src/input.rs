use serde::{Deserialize, Serialize};
use thiserror::Error;

const UTF8_BOM: &str = "\u{feff}";

/// Rejections at the pipeline boundary. Text is never coerced.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("Unsupported encoding: input is not valid UTF-8 (first invalid byte at {valid_up_to})")]
    Encoding { valid_up_to: usize },

    #[error("Input contains NUL bytes; expected plain text")]
    Binary,

    #[error("Input too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub max_input_bytes: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Decode plain contract text produced by an upstream text source.
pub fn decode_input(bytes: &[u8], config: &InputConfig) -> Result<String, InputError> {
    if bytes.len() > config.max_input_bytes {
        return Err(InputError::TooLarge {
            size: bytes.len(),
            limit: config.max_input_bytes,
        });
    }

    let text = std::str::from_utf8(bytes).map_err(|e| InputError::Encoding {
        valid_up_to: e.valid_up_to(),
    })?;

    validate_text(text, config)?;

    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
}

/// Checks applied to text that is already a Rust string.
pub fn validate_text(text: &str, config: &InputConfig) -> Result<(), InputError> {
    if text.len() > config.max_input_bytes {
        return Err(InputError::TooLarge {
            size: text.len(),
            limit: config.max_input_bytes,
        });
    }
    if text.contains('\0') {
        return Err(InputError::Binary);
    }
    Ok(())
}
