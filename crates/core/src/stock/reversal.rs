//! Compensating movements.
//!
//! Movements are append-only. Reverting one creates an ADJUSTMENT with the
//! opposite delta that points back at the original.

use tesoreria_shared::types::UsuarioId;

use super::error::StockValidationError;
use super::types::{
    NewStockMovement, STOCK_MOVEMENTS_TABLE, StockMovement, StockMovementKind, clamp_notes,
};

/// Stateless service for building compensating movements.
pub struct StockReversalService;

impl StockReversalService {
    /// Builds the movement that cancels `original`.
    ///
    /// Product, location, place, condition, cost and currency are copied.
    ///
    /// # Errors
    ///
    /// Returns [`StockValidationError::IrreversibleDelta`] when the original
    /// delta has no representable opposite.
    pub fn compensating(
        original: &StockMovement,
        motivo: Option<&str>,
        usuario_id: Option<UsuarioId>,
    ) -> Result<NewStockMovement, StockValidationError> {
        let delta = original
            .delta
            .checked_neg()
            .ok_or(StockValidationError::IrreversibleDelta(original.delta))?;
        let notas = match clamp_notes(motivo) {
            Some(motivo) => format!("Reversión de movimiento #{}: {motivo}", original.id),
            None => format!("Reversión de movimiento #{}", original.id),
        };
        Ok(NewStockMovement {
            producto_id: original.producto_id,
            local_id: original.local_id,
            lugar_id: original.lugar_id,
            estado_id: original.estado_id,
            tipo: StockMovementKind::Adjustment,
            delta,
            costo_unit_neto: original.costo_unit_neto,
            moneda: original.moneda,
            ref_tabla: Some(STOCK_MOVEMENTS_TABLE.to_string()),
            ref_id: Some(original.id.get()),
            notas: clamp_notes(Some(&notas)),
            usuario_log_id: usuario_id,
        })
    }

    /// Whether `candidate` reverts `original`.
    #[must_use]
    pub fn is_reversal_of(candidate: &StockMovement, original: &StockMovement) -> bool {
        candidate.tipo == StockMovementKind::Adjustment
            && original.delta.checked_neg() == Some(candidate.delta)
            && candidate.ref_tabla.as_deref() == Some(STOCK_MOVEMENTS_TABLE)
            && candidate.ref_id == Some(original.id.get())
    }
}
