//! Cheque error types for registration and lifecycle transitions.

use thiserror::Error;

use tesoreria_shared::AppError;

use super::types::{ChequeKind, ChequeStatus};
use super::ChequeAction;

/// Errors raised before any cheque request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChequeError {
    /// The action does not apply to this kind of cheque in its current status.
    #[error("Action {action} is not allowed for a {tipo} cheque in status {from}")]
    InvalidTransition {
        /// Requested action.
        action: ChequeAction,
        /// Cheque kind.
        tipo: ChequeKind,
        /// Current status.
        from: ChequeStatus,
    },

    /// A destination bank account must be selected.
    #[error("A destination bank account is required")]
    BankAccountRequired,

    /// A vendor must be selected.
    #[error("A vendor is required")]
    VendorRequired,

    /// Cheque number must be positive.
    #[error("Cheque number must be positive")]
    InvalidNumber,

    /// Cheque amount must be positive.
    #[error("Cheque amount must be positive")]
    InvalidAmount,

    /// Received cheques need the issuing bank.
    #[error("Received cheques require the issuing bank")]
    IssuingBankRequired,

    /// Issued cheques need a checkbook.
    #[error("Issued cheques require a checkbook")]
    CheckbookRequired,

    /// Due date precedes issue date.
    #[error("Due date cannot be earlier than the issue date")]
    DueBeforeIssue,
}

impl ChequeError {
    /// Returns the error code for operator notifications.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::BankAccountRequired => "BANK_ACCOUNT_REQUIRED",
            Self::VendorRequired => "VENDOR_REQUIRED",
            Self::InvalidNumber => "INVALID_NUMBER",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::IssuingBankRequired => "ISSUING_BANK_REQUIRED",
            Self::CheckbookRequired => "CHECKBOOK_REQUIRED",
            Self::DueBeforeIssue => "DUE_BEFORE_ISSUE",
        }
    }
}

impl From<ChequeError> for AppError {
    fn from(err: ChequeError) -> Self {
        Self::Validation(err.to_string())
    }
}
