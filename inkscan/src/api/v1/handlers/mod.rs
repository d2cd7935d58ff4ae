pub mod admin;
pub(crate) mod health;
pub mod scans;
pub mod stats;
pub mod uploads;

pub use health::health_check;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::error::{InkscanError, Result};
use crate::models::ImageFile;
use crate::upload::validate_image;

/// A body cut off by the request size limit surfaces here as a multipart
/// error with status 413.
fn is_length_limit(err: &MultipartError) -> bool {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return true;
    }
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if cause.to_string().contains("length limit exceeded") {
            return true;
        }
        source = cause.source();
    }
    false
}

fn multipart_error(err: MultipartError, max_file_size: usize, context: &str) -> InkscanError {
    if is_length_limit(&err) {
        InkscanError::Validation(format!(
            "File too large: request exceeds {max_file_size} bytes"
        ))
    } else {
        InkscanError::Validation(format!("{context}: {err}"))
    }
}

/// Pulls the image out of a multipart body (field `file` or `image`) and
/// checks it before anything is sent to a remote service.
pub(crate) async fn read_image_field(
    multipart: &mut Multipart,
    max_file_size: usize,
) -> Result<ImageFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_file_size, "Invalid multipart body"))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != "file" && name != "image" {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_file_size, "Failed to read file"))?;

        let sniffed = validate_image(&bytes, max_file_size)?;

        let mut image = ImageFile::new(bytes.to_vec()).with_content_type(
            content_type
                .filter(|ct| ct.starts_with("image/"))
                .unwrap_or_else(|| sniffed.to_string()),
        );
        if let Some(name) = file_name {
            image = image.with_name(name);
        }
        return Ok(image);
    }

    Err(InkscanError::Validation(
        "Missing required 'file' field".to_string(),
    ))
}
