//! Cheque lifecycle management.
//!
//! This module implements the cheque state machine, the transition guard
//! that assembles lifecycle requests, and registration checks.
//!
//! # Modules
//!
//! - `types` - Cheque domain types (ChequeKind, ChequeStatus, Cheque)
//! - `error` - Cheque-specific error types
//! - `lifecycle` - Transition table and operator actions
//! - `guard` - Contextual field requirements and payload assembly
//! - `registration` - New cheque validation

pub mod error;
pub mod guard;
pub mod lifecycle;
pub mod registration;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
mod guard_props;

pub use error::ChequeError;
pub use guard::{
    ChequeTransition, Delivery, FieldSpec, SubmitContext, TransitionBody, TransitionCheck,
    TransitionField, TransitionForm, TransitionGuard, TransitionPayload,
};
pub use lifecycle::{ChequeAction, ChequeLifecycle};
pub use registration::NewCheque;
pub use types::{Canal, Cheque, ChequeKind, ChequeStatus};
