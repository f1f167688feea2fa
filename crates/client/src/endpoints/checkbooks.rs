//! Checkbooks.
//!
//! Creating a checkbook whose range overlaps an existing one fails with
//! `CHEQUERA_RANGO_SUPERPUESTO` and a free range. The guided variant asks
//! the operator and retries once with that range.

use serde::Serialize;

use tesoreria_core::bank::{
    BankService, Checkbook, CheckbookInput, ConflictResolution, ConflictService, SuggestedRange,
};
use tesoreria_shared::types::{BancoCuentaId, ChequeraId};
use tesoreria_shared::{AppError, AppResult};

use super::DeleteOutcome;
use crate::http::ApiClient;

/// Lookup resource for checkbooks.
pub const CHECKBOOKS: &str = "chequeras";

#[derive(Serialize)]
struct CheckbookQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    banco_cuenta_id: Option<BancoCuentaId>,
}

impl ApiClient {
    /// Lists checkbooks, optionally for one account.
    pub async fn list_checkbooks(
        &self,
        banco_cuenta_id: Option<BancoCuentaId>,
    ) -> AppResult<Vec<Checkbook>> {
        self.get_cached(CHECKBOOKS, CHECKBOOKS, &CheckbookQuery { banco_cuenta_id })
            .await
    }

    /// Creates a checkbook.
    pub async fn create_checkbook(&self, input: &CheckbookInput) -> AppResult<Checkbook> {
        BankService::validate_checkbook(input)?;
        let checkbook = self.post(CHECKBOOKS, input).await?;
        self.cache().invalidate_resource(CHECKBOOKS);
        Ok(checkbook)
    }

    /// Creates a checkbook, retrying with the backend's free range when the
    /// requested one overlaps and `accept` agrees.
    pub async fn create_checkbook_guided<F>(
        &self,
        input: &CheckbookInput,
        accept: F,
    ) -> AppResult<Checkbook>
    where
        F: FnOnce(&SuggestedRange) -> bool,
    {
        let err = match self.create_checkbook(input).await {
            Ok(checkbook) => return Ok(checkbook),
            Err(err) => err,
        };
        let accepts = SuggestedRange::from_error(&err).is_some_and(|range| accept(&range));
        match ConflictService::after_checkbook_conflict(&err, input, accepts) {
            ConflictResolution::RetryCheckbook(retry) => {
                tracing::info!(
                    nro_desde = retry.nro_desde,
                    nro_hasta = retry.nro_hasta,
                    "retrying checkbook with suggested range"
                );
                self.create_checkbook(&retry).await
            }
            ConflictResolution::ForceDelete | ConflictResolution::GiveUp => Err(err),
        }
    }

    /// Deletes a checkbook, deactivating it when `confirm_force` accepts.
    pub async fn delete_checkbook<F>(
        &self,
        id: ChequeraId,
        confirm_force: F,
    ) -> AppResult<DeleteOutcome>
    where
        F: FnOnce(&AppError) -> bool,
    {
        self.delete_or_deactivate(CHECKBOOKS, &format!("{CHECKBOOKS}/{id}"), confirm_force)
            .await
    }
}
