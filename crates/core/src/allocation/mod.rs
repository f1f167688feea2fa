//! Payment allocation across cheques.
//!
//! # Modules
//!
//! - `types` - Candidate rows and sort policies
//! - `allocator` - Grid operations and the confirmation gate
//! - `batch` - Submission plans with deterministic idempotency keys
//! - `error` - Allocation error types

pub mod allocator;
pub mod batch;
pub mod error;
pub mod types;

#[cfg(test)]
mod allocator_props;

pub use allocator::PaymentAllocator;
pub use batch::{ApplicationBody, ApplicationPlan, BatchId, PaymentReference, PlannedApplication};
pub use error::AllocationError;
pub use types::{AllocationCandidate, AllocationRow, SortKey, SortPolicy};
