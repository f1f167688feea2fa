//! Stock movement validation errors.

use thiserror::Error;

use tesoreria_shared::AppError;

use super::types::StockMovementKind;

/// A single problem found in a stock movement draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockValidationError {
    /// Product missing or not positive.
    #[error("Product is required")]
    ProductRequired,

    /// Location missing or not positive.
    #[error("Location is required")]
    LocationRequired,

    /// Movement kind not recognized.
    #[error("Unknown movement type: {0}")]
    UnknownKind(String),

    /// Quantity delta is zero.
    #[error("Quantity change cannot be zero")]
    ZeroDelta,

    /// Kind requires stock to increase.
    #[error("{0} requires a positive quantity change")]
    DeltaMustBePositive(StockMovementKind),

    /// Kind requires stock to decrease.
    #[error("{0} requires a negative quantity change")]
    DeltaMustBeNegative(StockMovementKind),

    /// Kind requires a source document reference.
    #[error("{0} requires ref_tabla and ref_id")]
    ReferenceRequired(StockMovementKind),

    /// Unit cost below zero.
    #[error("Net unit cost cannot be negative")]
    NegativeCost,

    /// Currency code not recognized.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Quantity change has no opposite.
    #[error("Quantity change {0} cannot be reversed")]
    IrreversibleDelta(i64),
}

impl StockValidationError {
    /// Returns the error code for operator notifications.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ProductRequired => "PRODUCT_REQUIRED",
            Self::LocationRequired => "LOCATION_REQUIRED",
            Self::UnknownKind(_) => "UNKNOWN_KIND",
            Self::ZeroDelta => "ZERO_DELTA",
            Self::DeltaMustBePositive(_) => "DELTA_MUST_BE_POSITIVE",
            Self::DeltaMustBeNegative(_) => "DELTA_MUST_BE_NEGATIVE",
            Self::ReferenceRequired(_) => "REFERENCE_REQUIRED",
            Self::NegativeCost => "NEGATIVE_COST",
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            Self::IrreversibleDelta(_) => "IRREVERSIBLE_DELTA",
        }
    }

    /// Input field the error belongs to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::ProductRequired => "producto_id",
            Self::LocationRequired => "local_id",
            Self::UnknownKind(_) => "tipo",
            Self::ZeroDelta
            | Self::DeltaMustBePositive(_)
            | Self::DeltaMustBeNegative(_)
            | Self::IrreversibleDelta(_) => "delta",
            Self::ReferenceRequired(_) => "ref_tabla",
            Self::NegativeCost => "costo_unit_neto",
            Self::UnknownCurrency(_) => "moneda",
        }
    }
}

impl From<StockValidationError> for AppError {
    fn from(err: StockValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
