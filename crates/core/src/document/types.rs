//! Cheque image and upload types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tesoreria_shared::types::ChequeId;

/// Which side or kind of scan an image is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    /// Front of the cheque.
    #[default]
    Frente,
    /// Back of the cheque, with endorsements.
    Dorso,
    /// Any other supporting scan.
    Otro,
}

impl ImageKind {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frente => "frente",
            Self::Dorso => "dorso",
            Self::Otro => "otro",
        }
    }

    /// Parses a wire name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "frente" | "front" => Some(Self::Frente),
            "dorso" | "back" => Some(Self::Dorso),
            "otro" | "other" => Some(Self::Otro),
            _ => None,
        }
    }
}

/// An image stored for a cheque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChequeImage {
    /// Backend id.
    pub id: i64,
    /// Owning cheque.
    pub cheque_id: ChequeId,
    /// Scan kind.
    #[serde(default)]
    pub tipo: ImageKind,
    /// Name the file was uploaded with.
    #[serde(default)]
    pub nombre_archivo: Option<String>,
    /// MIME type.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Download URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumb_url: Option<String>,
    /// Notes.
    #[serde(default)]
    pub observaciones: Option<String>,
    /// Upload time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A file ready to upload as a cheque image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Scan kind, sent as the `tipo` field.
    pub tipo: ImageKind,
    /// Notes, sent as `observaciones` when present.
    pub observaciones: Option<String>,
    /// File name, sent with the `file` part.
    pub file_name: String,
    /// MIME type of the `file` part.
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}
