//! Upload checks and download naming.
//!
//! PDFs open inline. Images and other files are saved to disk under a name
//! whose extension matches the MIME type.

use chrono::NaiveDate;
use thiserror::Error;

use tesoreria_shared::AppError;

use super::types::ImageUpload;

/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// MIME types accepted for cheque images, with their canonical extension.
const KNOWN_TYPES: &[(&str, &str)] = &[
    ("application/pdf", "pdf"),
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("text/csv", "csv"),
];

/// Upload rejections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// File is empty.
    #[error("File is empty")]
    Empty,

    /// File is over the size limit.
    #[error("File size {size} exceeds maximum {max}")]
    TooLarge {
        /// Actual size.
        size: usize,
        /// Limit.
        max: usize,
    },

    /// MIME type not accepted.
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// How a downloaded document is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Open in a viewer.
    Inline,
    /// Save to disk under this name.
    SaveAs(String),
}

/// Canonical extension for a MIME type.
#[must_use]
pub fn extension_for(mime_type: &str) -> Option<&'static str> {
    let essence = essence(mime_type);
    if essence == "image/jpg" {
        return Some("jpg");
    }
    KNOWN_TYPES
        .iter()
        .find(|(mime, _)| *mime == essence)
        .map(|(_, ext)| *ext)
}

/// Checks an upload before it is sent.
///
/// # Errors
///
/// Returns an error if the file is empty, too large or of an unknown type.
pub fn validate_upload(upload: &ImageUpload) -> Result<(), DocumentError> {
    if upload.bytes.is_empty() {
        return Err(DocumentError::Empty);
    }
    if upload.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(DocumentError::TooLarge {
            size: upload.bytes.len(),
            max: MAX_UPLOAD_BYTES,
        });
    }
    match extension_for(&upload.mime_type) {
        Some("csv") | None => Err(DocumentError::UnsupportedType(upload.mime_type.clone())),
        Some(_) => Ok(()),
    }
}

/// Decides how to present a download.
///
/// `server_name` is the name the backend offered, if any; `fallback_stem`
/// is used when it is missing.
#[must_use]
pub fn disposition(mime_type: &str, server_name: Option<&str>, fallback_stem: &str) -> Disposition {
    if essence(mime_type) == "application/pdf" {
        return Disposition::Inline;
    }
    Disposition::SaveAs(download_name(mime_type, server_name, fallback_stem))
}

/// File name for a download, adding the MIME type's extension when absent.
#[must_use]
pub fn download_name(mime_type: &str, server_name: Option<&str>, fallback_stem: &str) -> String {
    let base = server_name
        .map(sanitize)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| sanitize(fallback_stem));
    let base = if base.is_empty() { "archivo".to_string() } else { base };

    let Some(ext) = extension_for(mime_type) else {
        return base;
    };
    let has_ext = base.rsplit_once('.').is_some_and(|(stem, e)| {
        !stem.is_empty()
            && (e.eq_ignore_ascii_case(ext) || (ext == "jpg" && e.eq_ignore_ascii_case("jpeg")))
    });
    if has_ext {
        base
    } else {
        format!("{base}.{ext}")
    }
}

/// File name for a dated CSV export, e.g. `movimientos-2026-10-17.csv`.
#[must_use]
pub fn export_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.csv", sanitize(prefix), date.format("%Y-%m-%d"))
}

fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

fn sanitize(name: &str) -> String {
    let last = name.rsplit(['/', '\\']).next().unwrap_or_default();
    last.trim()
        .chars()
        .map(|c| {
            if c.is_control() || matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|') {
                '_'
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::types::ImageKind;
    use rstest::rstest;

    #[rstest]
    #[case("image/png", Some("scan"), "scan.png")]
    #[case("image/png", Some("scan.PNG"), "scan.PNG")]
    #[case("image/jpeg", Some("frente.jpeg"), "frente.jpeg")]
    #[case("image/jpeg; charset=binary", None, "cheque-12.jpg")]
    #[case("image/webp", Some("../../etc/dorso"), "dorso.webp")]
    #[case("application/octet-stream", Some("raw.bin"), "raw.bin")]
    #[case("image/gif", Some("  "), "cheque-12.gif")]
    fn test_download_name(
        #[case] mime: &str,
        #[case] server: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(download_name(mime, server, "cheque-12"), expected);
    }

    #[test]
    fn test_pdf_opens_inline() {
        assert_eq!(disposition("application/pdf", Some("x"), "y"), Disposition::Inline);
        assert_eq!(
            disposition("image/png", None, "cheque-3"),
            Disposition::SaveAs("cheque-3.png".to_string())
        );
    }

    #[test]
    fn test_validate_upload() {
        let mut upload = ImageUpload {
            tipo: ImageKind::Frente,
            observaciones: None,
            file_name: "f.png".into(),
            mime_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        };
        assert!(validate_upload(&upload).is_ok());

        upload.mime_type = "text/html".into();
        assert_eq!(
            validate_upload(&upload),
            Err(DocumentError::UnsupportedType("text/html".into()))
        );

        upload.mime_type = "image/png".into();
        upload.bytes.clear();
        assert_eq!(validate_upload(&upload), Err(DocumentError::Empty));
    }

    #[test]
    fn test_export_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date");
        assert_eq!(export_name("movimientos", date), "movimientos-2026-10-17.csv");
    }
}
