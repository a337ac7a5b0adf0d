use crate::utils::error::{PatchError, Result};
use std::path::Path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub had_bom: bool,
}

/// Decodes UTF-8, dropping one leading byte-order mark if present.
pub fn decode_utf8_sig(path: &Path, bytes: Vec<u8>) -> Result<DecodedText> {
    let had_bom = bytes.starts_with(UTF8_BOM);
    let body = if had_bom {
        bytes[UTF8_BOM.len()..].to_vec()
    } else {
        bytes
    };

    let text = String::from_utf8(body).map_err(|e| PatchError::EncodingError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    if had_bom {
        tracing::debug!("Stripped UTF-8 BOM from {}", path.display());
    }

    Ok(DecodedText { text, had_bom })
}

/// Output is always plain UTF-8; a U+FEFF that survived decoding is not re-emitted at the start.
pub fn encode_utf8(text: &str) -> &[u8] {
    text.strip_prefix('\u{FEFF}').unwrap_or(text).as_bytes()
}
