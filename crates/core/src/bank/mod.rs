//! Banks, bank accounts, checkbooks and bank movements.
//!
//! # Modules
//!
//! - `types` - Records, request bodies and list filters
//! - `error` - Bank validation errors
//! - `service` - Input validation, including checkbook ranges
//! - `conflict` - Guided retries after backend conflicts

pub mod conflict;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use conflict::{CHECKBOOK_RANGE_OVERLAP, ConflictResolution, ConflictService, SuggestedRange};
pub use error::BankError;
pub use service::BankService;
pub use types::{
    AccountBalance, AccountSummary, Bank, BankAccount, BankAccountInput, BankInput, BankMovement,
    BankMovementInput, Checkbook, CheckbookInput, MovementFilter, MovementKind,
};
