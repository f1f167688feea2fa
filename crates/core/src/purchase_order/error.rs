//! Purchase order error types.

use thiserror::Error;

use tesoreria_shared::AppError;

use super::types::PurchaseOrderStatus;

/// Errors that can occur while editing or advancing a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseOrderError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: PurchaseOrderStatus,
        /// The attempted target status.
        to: PurchaseOrderStatus,
    },

    /// CLOSED is only reachable through purchase generation.
    #[error("Orders are closed by generating a purchase")]
    CloseThroughPurchase,

    /// Lines can only change while drafting.
    #[error("Lines can only be edited in DRAFT, order is {0}")]
    LinesLocked(PurchaseOrderStatus),

    /// Purchase generation requires an approved order.
    #[error("A purchase can only be generated from an APPROVED order, order is {0}")]
    NotApproved(PurchaseOrderStatus),

    /// Vendor missing.
    #[error("Vendor is required")]
    VendorRequired,

    /// Order has no lines.
    #[error("Order must have at least one line")]
    NoLines,

    /// A line is invalid.
    #[error("Line {line}: {reason}")]
    InvalidLine {
        /// One-based line number.
        line: usize,
        /// What is wrong.
        reason: &'static str,
    },

    /// Totals do not fit in the amount range.
    #[error("Estimated total out of range")]
    Overflow,
}

impl PurchaseOrderError {
    /// Returns the error code for operator notifications.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::CloseThroughPurchase => "CLOSE_THROUGH_PURCHASE",
            Self::LinesLocked(_) => "LINES_LOCKED",
            Self::NotApproved(_) => "NOT_APPROVED",
            Self::VendorRequired => "VENDOR_REQUIRED",
            Self::NoLines => "NO_LINES",
            Self::InvalidLine { .. } => "INVALID_LINE",
            Self::Overflow => "OVERFLOW",
        }
    }
}

impl From<PurchaseOrderError> for AppError {
    fn from(err: PurchaseOrderError) -> Self {
        Self::Validation(err.to_string())
    }
}
