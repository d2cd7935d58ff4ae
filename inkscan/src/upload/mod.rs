//! Image hosting.
//!
//! Scanned images are stored on an external asset host (Cloudinary-style
//! unsigned uploads). The store keeps only the returned URL.

mod api;
mod validation;

pub use api::UploadClient;
pub use validation::validate_image;
