//! Bank, account and checkbook error types.

use thiserror::Error;

use tesoreria_shared::AppError;

/// Errors that can occur while validating bank records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    /// Bank name missing.
    #[error("Bank name is required")]
    BankNameRequired,

    /// Bank missing or not positive.
    #[error("Bank is required")]
    BankRequired,

    /// Account name missing.
    #[error("Account name is required")]
    AccountNameRequired,

    /// CBU is not 22 digits.
    #[error("CBU must have 22 digits")]
    InvalidCbu,

    /// Checkbook account missing.
    #[error("Bank account is required")]
    AccountRequired,

    /// Range start must be positive.
    #[error("Range start must be positive, got {0}")]
    InvalidRangeStart(i64),

    /// Range end below start.
    #[error("Range end {hasta} is below range start {desde}")]
    InvalidRange {
        /// Range start.
        desde: i64,
        /// Range end.
        hasta: i64,
    },

    /// Next number outside the range.
    #[error("Next number {proximo} is outside {desde}-{hasta}")]
    NextOutOfRange {
        /// Next number.
        proximo: i64,
        /// Range start.
        desde: i64,
        /// Range end.
        hasta: i64,
    },

    /// Movement amount must be positive.
    #[error("Movement amount must be positive")]
    InvalidAmount,
}

impl BankError {
    /// Returns the error code for operator notifications.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BankNameRequired => "BANK_NAME_REQUIRED",
            Self::BankRequired => "BANK_REQUIRED",
            Self::AccountNameRequired => "ACCOUNT_NAME_REQUIRED",
            Self::InvalidCbu => "INVALID_CBU",
            Self::AccountRequired => "ACCOUNT_REQUIRED",
            Self::InvalidRangeStart(_) => "INVALID_RANGE_START",
            Self::InvalidRange { .. } => "INVALID_RANGE",
            Self::NextOutOfRange { .. } => "NEXT_OUT_OF_RANGE",
            Self::InvalidAmount => "INVALID_AMOUNT",
        }
    }
}

impl From<BankError> for AppError {
    fn from(err: BankError) -> Self {
        Self::Validation(err.to_string())
    }
}
