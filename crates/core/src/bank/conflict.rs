//! Recovery from backend conflicts.
//!
//! Two conflicts have a guided retry: an overlapping checkbook range, which
//! the backend answers with a free range to use instead, and deleting a
//! record other records depend on, which can be retried as a deactivation.

use serde::Deserialize;

use tesoreria_shared::{AppError, ErrorBody};

use super::types::CheckbookInput;

/// Code returned when a checkbook range overlaps an existing one.
pub const CHECKBOOK_RANGE_OVERLAP: &str = "CHEQUERA_RANGO_SUPERPUESTO";

/// Free range suggested by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SuggestedRange {
    /// First number.
    #[serde(alias = "desde", alias = "sugerido_desde")]
    pub nro_desde: i64,
    /// Last number.
    #[serde(alias = "hasta", alias = "sugerido_hasta")]
    pub nro_hasta: i64,
}

impl SuggestedRange {
    /// Reads the suggestion from a conflict body.
    ///
    /// Accepts the range directly in `details` or nested under
    /// `sugerencia` / `sugerido`.
    #[must_use]
    pub fn from_body(body: &ErrorBody) -> Option<Self> {
        if !body.has_code(CHECKBOOK_RANGE_OVERLAP) {
            return None;
        }
        let details = body.details.as_ref()?;
        ["sugerencia", "sugerido"]
            .iter()
            .filter_map(|key| details.get(*key))
            .chain(std::iter::once(details))
            .find_map(|value| Self::deserialize(value).ok())
            .filter(|range| range.nro_desde > 0 && range.nro_hasta >= range.nro_desde)
    }

    /// Reads the suggestion from an application error.
    #[must_use]
    pub fn from_error(err: &AppError) -> Option<Self> {
        match err {
            AppError::Conflict(body) => Self::from_body(body),
            _ => None,
        }
    }

    /// Rewrites `input` to use this range; the next number restarts at its start.
    #[must_use]
    pub fn apply_to(&self, input: &CheckbookInput) -> CheckbookInput {
        CheckbookInput {
            nro_desde: self.nro_desde,
            nro_hasta: self.nro_hasta,
            proximo_nro: Some(self.nro_desde),
            ..input.clone()
        }
    }
}

/// What to do after a conflict, once the operator has answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictResolution {
    /// Retry the checkbook with the suggested range.
    RetryCheckbook(CheckbookInput),
    /// Retry the delete with `force=true`, which deactivates instead.
    ForceDelete,
    /// Surface the error.
    GiveUp,
}

/// Stateless service deciding conflict retries.
pub struct ConflictService;

impl ConflictService {
    /// Decides how to continue after a failed checkbook creation.
    #[must_use]
    pub fn after_checkbook_conflict(
        err: &AppError,
        input: &CheckbookInput,
        operator_accepts: bool,
    ) -> ConflictResolution {
        match SuggestedRange::from_error(err) {
            Some(range) if operator_accepts => ConflictResolution::RetryCheckbook(range.apply_to(input)),
            _ => ConflictResolution::GiveUp,
        }
    }

    /// Decides how to continue after a failed delete.
    #[must_use]
    pub fn after_delete_conflict(err: &AppError, operator_accepts: bool) -> ConflictResolution {
        if matches!(err, AppError::Conflict(_)) && operator_accepts {
            ConflictResolution::ForceDelete
        } else {
            ConflictResolution::GiveUp
        }
    }
}
