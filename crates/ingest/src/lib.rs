pub mod clause;
pub mod input;
pub mod placeholders;
pub mod segmenter;

pub use clause::{ClauseBlock, ClauseType};
pub use input::{decode_input, validate_text, InputConfig, InputError};
pub use placeholders::{BlankFieldConfig, BlankFieldDetector};
pub use segmenter::{truncate_graphemes, ClassificationRule, ClauseSegmenter, SegmenterConfig};

use sha2::{Digest, Sha256};

/// Generate a stable fingerprint of the analyzed text
pub fn document_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..16])
}
