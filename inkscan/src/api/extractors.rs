use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::InkscanError;

/// `axum::Json` whose rejections come back in the v1 error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(InkscanError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for InkscanError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> InkscanError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                InkscanError::Validation(format!("Missing required field: {field}"))
            } else {
                InkscanError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            InkscanError::Validation(format!("JSON syntax error: {err}"))
        }
        JsonRejection::MissingJsonContentType(_) => {
            InkscanError::Validation("Missing `Content-Type: application/json` header".to_string())
        }
        JsonRejection::BytesRejection(_) => {
            InkscanError::Internal("Failed to read request body".to_string())
        }
        _ => InkscanError::Validation(rejection.to_string()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}
