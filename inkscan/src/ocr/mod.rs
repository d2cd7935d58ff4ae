//! OCR (Optical Character Recognition) Module
//!
//! Client for the remote text-extraction service. Two submission modes are
//! supported:
//! - file mode: `POST <OCR_API_URL>` with multipart field `image`
//! - URL mode: `POST <OCR_API_URL>/url` with `{ "imageUrl": ... }`
//!
//! Both return `{ id?, text?, confidence? }`, normalized into [`OcrOutput`]:
//! a missing id becomes a random 9-character token, a missing confidence
//! becomes [`DEFAULT_CONFIDENCE`], missing text becomes an empty string.
//!
//! # Configuration
//!
//! `OCR_API_URL` selects the endpoint. When it is unset the provider is
//! constructed in an unavailable state and every call fails with
//! `InkscanError::Config` before touching the network.
//!
//! # Usage
//!
//! ```rust,ignore
//! let ocr = OcrProvider::new(&config.ocr)?;
//! let output = ocr.ocr_url("https://host/page.jpg").await?;
//! ```

mod api;
mod provider;

pub use api::{OcrApiClient, OcrResponse};
pub use provider::{generate_id, OcrOutput, OcrProvider, DEFAULT_CONFIDENCE};
