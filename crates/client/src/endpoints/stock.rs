//! Stock movements.
//!
//! Movements are append-only: notes are the only editable field, and a
//! reversal is a new compensating movement.

use serde::{Deserialize, Serialize};

use tesoreria_core::stock::{
    NotesUpdate, StockMovement, StockMovementDraft, StockMovementKind,
    StockMovementValidator, StockReversalService,
};
use tesoreria_shared::AppResult;
use tesoreria_shared::types::{LocalId, ProductoId, StockMovimientoId};

use crate::http::{ApiClient, NO_QUERY};

const MOVEMENTS: &str = "stock-movimientos";

/// Filters for `GET /stock-movimientos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockFilter {
    /// Product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producto_id: Option<ProductoId>,
    /// Location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_id: Option<LocalId>,
    /// Movement kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<StockMovementKind>,
}

impl ApiClient {
    /// Lists stock movements.
    pub async fn list_stock_movements(&self, filter: &StockFilter) -> AppResult<Vec<StockMovement>> {
        self.get(MOVEMENTS, filter).await
    }

    /// Fetches one movement.
    pub async fn get_stock_movement(&self, id: StockMovimientoId) -> AppResult<StockMovement> {
        self.get(&format!("{MOVEMENTS}/{id}"), NO_QUERY).await
    }

    /// Validates a draft and records it. Nothing is sent when validation fails.
    pub async fn create_stock_movement(&self, draft: &StockMovementDraft) -> AppResult<StockMovement> {
        let movement = StockMovementValidator::normalize(draft, self.usuario_id())?;
        let created: StockMovement = self.post(MOVEMENTS, &movement).await?;
        tracing::info!(
            id = %created.id,
            tipo = %created.tipo,
            delta = created.delta,
            "stock movement recorded"
        );
        Ok(created)
    }

    /// Replaces a movement's notes.
    pub async fn update_stock_notes(
        &self,
        id: StockMovimientoId,
        notas: Option<&str>,
    ) -> AppResult<StockMovement> {
        self.put(&format!("{MOVEMENTS}/{id}"), &NotesUpdate::new(notas))
            .await
    }

    /// Reverts a movement by recording its compensating adjustment.
    pub async fn revert_stock_movement(
        &self,
        original: &StockMovement,
        motivo: Option<&str>,
    ) -> AppResult<StockMovement> {
        let reversal = StockReversalService::compensating(original, motivo, self.usuario_id())?;
        self.post(&format!("{MOVEMENTS}/{}/revertir", original.id), &reversal)
            .await
    }
}
