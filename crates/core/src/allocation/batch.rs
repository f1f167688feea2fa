//! Batch submission plans.
//!
//! A plan is a pure function of the batch id and the allocation rows, so a
//! retried batch produces the same idempotency keys and the backend can
//! drop the applications it has already seen.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use tesoreria_shared::types::{Cents, ChequeId, UsuarioId};

use super::types::AllocationRow;

/// Identifier shared by every application of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(Uuid);

impl BatchId {
    /// Creates a new time-ordered batch id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wraps an existing id, for retries.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Idempotency key for the row at `row_index`.
    #[must_use]
    pub fn idempotency_key(&self, row_index: usize) -> String {
        format!("{}-{row_index}", self.0)
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BatchId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Document the payment settles, e.g. a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReference {
    /// Referenced table.
    pub tabla: String,
    /// Referenced record.
    pub id: i64,
}

/// One per-cheque application call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedApplication {
    /// Stable row index.
    pub row_index: usize,
    /// Cheque to apply.
    pub cheque_id: ChequeId,
    /// Cheque number, for error reports.
    pub numero: i64,
    /// Amount to consume.
    pub monto: Cents,
    /// Value of the `Idempotency-Key` header.
    pub idempotency_key: String,
}

/// Body of `POST /cheques-usos/usar/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationBody {
    /// Amount consumed from the cheque.
    pub monto_usado: Cents,
    /// Referenced table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referencia_tabla: Option<String>,
    /// Referenced record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referencia_id: Option<i64>,
    /// Acting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_log_id: Option<UsuarioId>,
}

/// Ordered list of application calls for a confirmed allocation.
///
/// A halted batch is resumed by re-sending its saved plan, never by
/// allocating again: balances have moved since the first run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPlan {
    /// Batch id shared by all keys.
    pub batch_id: BatchId,
    /// What the payment settles.
    pub referencia: Option<PaymentReference>,
    /// Calls, in display order.
    pub applications: Vec<PlannedApplication>,
}

impl ApplicationPlan {
    /// Builds a plan from rows, skipping rows with nothing allocated.
    #[must_use]
    pub fn from_rows(
        batch_id: BatchId,
        referencia: Option<PaymentReference>,
        rows: &[AllocationRow],
    ) -> Self {
        let applications = rows
            .iter()
            .filter(|row| row.asignado.is_positive())
            .map(|row| PlannedApplication {
                row_index: row.index,
                cheque_id: row.candidate.cheque_id,
                numero: row.candidate.numero,
                monto: row.asignado,
                idempotency_key: batch_id.idempotency_key(row.index),
            })
            .collect();
        Self {
            batch_id,
            referencia,
            applications,
        }
    }

    /// True when every key still derives from the batch id and row index.
    ///
    /// A saved plan that fails this check was edited and must not be sent.
    #[must_use]
    pub fn has_stable_keys(&self) -> bool {
        self.applications
            .iter()
            .all(|a| a.idempotency_key == self.batch_id.idempotency_key(a.row_index))
    }

    /// Total amount the plan applies.
    #[must_use]
    pub fn total(&self) -> Cents {
        self.applications.iter().map(|a| a.monto).sum()
    }

    /// Request body for one application.
    #[must_use]
    pub fn body_for(
        &self,
        application: &PlannedApplication,
        usuario_id: Option<UsuarioId>,
    ) -> ApplicationBody {
        ApplicationBody {
            monto_usado: application.monto,
            referencia_tabla: self.referencia.as_ref().map(|r| r.tabla.clone()),
            referencia_id: self.referencia.as_ref().map(|r| r.id),
            usuario_log_id: usuario_id,
        }
    }
}
