use crate::utils::error::{ChurnError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Recovers the CSV text from a request body, undoing the transport's base64 when flagged.
pub fn decode_payload(body: &str, is_base64_encoded: bool) -> Result<String> {
    if !is_base64_encoded {
        return Ok(body.to_string());
    }

    let bytes = BASE64
        .decode(body.trim())
        .map_err(|e| ChurnError::DecodeError {
            message: format!("invalid base64 body: {}", e),
        })?;

    String::from_utf8(bytes).map_err(|e| ChurnError::DecodeError {
        message: format!("decoded body is not UTF-8: {}", e),
    })
}
