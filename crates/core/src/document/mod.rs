//! Cheque images and downloaded files.
//!
//! # Modules
//!
//! - `types` - Image records and uploads
//! - `naming` - Upload checks, download disposition and file names

pub mod naming;
pub mod types;

pub use naming::{
    DocumentError, Disposition, MAX_UPLOAD_BYTES, disposition, download_name, export_name,
    extension_for, validate_upload,
};
pub use types::{ChequeImage, ImageKind, ImageUpload};
