//! Payment application batches.
//!
//! Calls go out strictly one after another. Each carries the plan's
//! idempotency key for its row, so resubmitting the same plan lets the
//! backend skip the rows it already applied. A failure stops the batch;
//! rows applied before it stay applied.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use thiserror::Error;

use tesoreria_core::allocation::{ApplicationPlan, BatchId, PlannedApplication};
use tesoreria_shared::types::{Cents, ChequeId, UsuarioId};
use tesoreria_shared::{AppError, AppResult};

use crate::http::ApiClient;

/// Header carrying the per-row idempotency key.
pub const IDEMPOTENCY_KEY: &str = "idempotency-key";
/// Header carrying the acting user.
pub const USER_ID_HEADER: &str = "x-user-id";

/// An application the backend accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedApplication {
    /// Row index in the allocation grid.
    pub row_index: usize,
    /// Cheque applied.
    pub cheque_id: ChequeId,
    /// Cheque number.
    pub numero: i64,
    /// Amount applied.
    pub monto: Cents,
    /// Backend response.
    pub response: Value,
}

/// Result of a completed batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// Batch that was submitted.
    pub batch_id: BatchId,
    /// Applications, in submission order.
    pub applied: Vec<AppliedApplication>,
}

impl BatchReport {
    /// Total applied.
    #[must_use]
    pub fn total(&self) -> Cents {
        self.applied.iter().map(|a| a.monto).sum()
    }
}

/// A batch that stopped at a failing cheque.
#[derive(Debug, Error)]
#[error("Payment on cheque #{numero} failed: {source}")]
pub struct BatchFailure {
    /// Batch that was submitted; resubmit it to continue.
    pub batch_id: BatchId,
    /// Failing cheque.
    pub cheque_id: ChequeId,
    /// Failing cheque number.
    pub numero: i64,
    /// Applications accepted before the failure. They are not rolled back.
    pub applied: Vec<AppliedApplication>,
    /// Why the call failed.
    #[source]
    pub source: AppError,
}

impl ApiClient {
    /// Submits every application of `plan` in order, stopping at the first failure.
    pub async fn apply_plan(&self, plan: &ApplicationPlan) -> Result<BatchReport, BatchFailure> {
        let usuario_id = self.usuario_id();
        let mut applied = Vec::with_capacity(plan.applications.len());

        for application in &plan.applications {
            match self.apply_one(plan, application, usuario_id).await {
                Ok(response) => {
                    tracing::info!(
                        batch_id = %plan.batch_id,
                        cheque_id = %application.cheque_id,
                        monto = %application.monto,
                        "cheque applied"
                    );
                    applied.push(AppliedApplication {
                        row_index: application.row_index,
                        cheque_id: application.cheque_id,
                        numero: application.numero,
                        monto: application.monto,
                        response,
                    });
                }
                Err(source) => {
                    tracing::warn!(
                        batch_id = %plan.batch_id,
                        cheque_id = %application.cheque_id,
                        applied = applied.len(),
                        error = %source,
                        "payment batch halted"
                    );
                    return Err(BatchFailure {
                        batch_id: plan.batch_id,
                        cheque_id: application.cheque_id,
                        numero: application.numero,
                        applied,
                        source,
                    });
                }
            }
        }

        Ok(BatchReport {
            batch_id: plan.batch_id,
            applied,
        })
    }

    async fn apply_one(
        &self,
        plan: &ApplicationPlan,
        application: &PlannedApplication,
        usuario_id: Option<UsuarioId>,
    ) -> AppResult<Value> {
        let headers = application_headers(&application.idempotency_key, usuario_id)?;
        let body = plan.body_for(application, usuario_id);
        self.send_json(
            Method::POST,
            &format!("cheques-usos/usar/{}", application.cheque_id),
            &body,
            headers,
        )
        .await
    }
}

fn application_headers(key: &str, usuario_id: Option<UsuarioId>) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(key)
        .map_err(|e| AppError::Internal(format!("invalid idempotency key: {e}")))?;
    headers.insert(HeaderName::from_static(IDEMPOTENCY_KEY), value);
    if let Some(id) = usuario_id {
        headers.insert(HeaderName::from_static(USER_ID_HEADER), HeaderValue::from(id.get()));
    }
    Ok(headers)
}
