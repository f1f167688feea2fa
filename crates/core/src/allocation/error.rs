//! Allocation error types.

use thiserror::Error;

use tesoreria_shared::AppError;
use tesoreria_shared::types::{Cents, ChequeId, MoneyParseError};

/// Errors that can occur while building or confirming an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// Target total cannot be negative.
    #[error("Target total cannot be negative: {0}")]
    NegativeTarget(Cents),

    /// The same cheque was offered twice.
    #[error("Cheque {0} appears more than once")]
    DuplicateCheque(ChequeId),

    /// No row exists for the cheque.
    #[error("Cheque {0} is not part of this allocation")]
    UnknownCheque(ChequeId),

    /// Operator input is not an amount.
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] MoneyParseError),

    /// Allocations do not add up to the target.
    #[error("Allocated {allocated} does not match the target {target}")]
    NotBalanced {
        /// Sum of allocations.
        allocated: Cents,
        /// Target total.
        target: Cents,
    },
}

impl AllocationError {
    /// Returns the error code for operator notifications.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeTarget(_) => "NEGATIVE_TARGET",
            Self::DuplicateCheque(_) => "DUPLICATE_CHEQUE",
            Self::UnknownCheque(_) => "UNKNOWN_CHEQUE",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::NotBalanced { .. } => "NOT_BALANCED",
        }
    }
}

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        Self::Validation(err.to_string())
    }
}
