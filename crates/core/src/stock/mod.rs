//! Stock movements.
//!
//! Validation of new movements, notes edits, and compensating reversals.
//!
//! # Modules
//!
//! - `types` - Movement kinds, sign rules, records and request bodies
//! - `error` - Per-field validation errors
//! - `validation` - Draft validation collecting every error
//! - `reversal` - Compensating ADJUSTMENT movements

pub mod error;
pub mod reversal;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::StockValidationError;
pub use reversal::StockReversalService;
pub use types::{
    MAX_NOTES_CHARS, NewStockMovement, NotesUpdate, STOCK_MOVEMENTS_TABLE, SignRule,
    StockMovement, StockMovementDraft, StockMovementKind, clamp_notes,
};
pub use validation::{StockMovementValidator, StockValidation, ValidationReport};
