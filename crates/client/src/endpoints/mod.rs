//! Endpoint groups of the back-office API.
//!
//! Each module adds methods to [`ApiClient`](crate::ApiClient) for one
//! resource family. Mutations validate with the core rules first and
//! invalidate the lookup lists they touch.
//!
//! # Modules
//!
//! - `banks` - Banks and bank accounts
//! - `movements` - Bank movements and CSV export
//! - `checkbooks` - Checkbooks with guided range recovery
//! - `cheques` - Cheques, lifecycle transitions, images and events
//! - `applications` - Sequential payment application batches
//! - `purchase_orders` - Purchase orders, status and purchase generation
//! - `stock` - Stock movements, notes and reversals
//! - `lookups` - Read-only selector lists

pub mod applications;
pub mod banks;
pub mod checkbooks;
pub mod cheques;
pub mod lookups;
pub mod movements;
pub mod purchase_orders;
pub mod stock;

use tesoreria_core::bank::{ConflictResolution, ConflictService};
use tesoreria_shared::{AppError, AppResult};

use crate::http::ApiClient;

/// Outcome of a delete that may have fallen back to deactivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was removed.
    Deleted,
    /// Dependent records blocked removal; the record was deactivated.
    Deactivated,
}

impl ApiClient {
    /// Deletes `path`, offering deactivation when dependents block the delete.
    ///
    /// `confirm_force` sees the conflict and answers whether to retry with
    /// `force=true`. Cached lists of `resource` are dropped either way.
    pub async fn delete_or_deactivate<F>(
        &self,
        resource: &str,
        path: &str,
        confirm_force: F,
    ) -> AppResult<DeleteOutcome>
    where
        F: FnOnce(&AppError) -> bool,
    {
        let outcome = match self.delete(path, false).await {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(err) => {
                let accepts = matches!(err, AppError::Conflict(_)) && confirm_force(&err);
                match ConflictService::after_delete_conflict(&err, accepts) {
                    ConflictResolution::ForceDelete => {
                        tracing::info!(path, "delete blocked by dependents, deactivating");
                        self.delete(path, true)
                            .await
                            .map(|()| DeleteOutcome::Deactivated)
                    }
                    _ => Err(err),
                }
            }
        };
        self.cache().invalidate_resource(resource);
        outcome
    }
}
