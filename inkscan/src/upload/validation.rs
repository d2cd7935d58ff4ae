use crate::error::{InkscanError, Result};

/// Checks that an upload looks like an image before it is sent anywhere.
///
/// Rejects empty payloads, payloads larger than `max_size` bytes and
/// payloads whose magic bytes do not identify an image format. Returns the
/// sniffed MIME type on success.
pub fn validate_image(bytes: &[u8], max_size: usize) -> Result<&'static str> {
    if bytes.is_empty() {
        return Err(InkscanError::Validation("Image file is empty".to_string()));
    }

    if bytes.len() > max_size {
        return Err(InkscanError::Validation(format!(
            "File too large: {} bytes (max {} bytes)",
            bytes.len(),
            max_size
        )));
    }

    match infer::get(bytes) {
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => Ok(kind.mime_type()),
        Some(kind) => Err(InkscanError::Validation(format!(
            "Unsupported file type: {}",
            kind.mime_type()
        ))),
        None => Err(InkscanError::Validation(
            "Unsupported file type: not an image".to_string(),
        )),
    }
}
