//! Estimated order totals, in integer cents.

use rust_decimal::Decimal;
use serde::Serialize;

use tesoreria_shared::types::Cents;

use super::error::PurchaseOrderError;
use super::types::PurchaseOrderLine;

/// Estimated amounts for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineTotals {
    /// Net of discount.
    pub neto: Cents,
    /// VAT on the net.
    pub iva: Cents,
    /// Net plus VAT.
    pub total: Cents,
}

/// Estimated amounts for an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    /// Sum of line nets.
    pub neto: Cents,
    /// Sum of line VAT.
    pub iva: Cents,
    /// Grand total.
    pub total: Cents,
}

/// Computes a line's net, VAT and total.
///
/// Net and VAT are each rounded half away from zero to cents.
///
/// # Errors
///
/// Returns [`PurchaseOrderError::Overflow`] if an amount does not fit.
pub fn line_totals(line: &PurchaseOrderLine) -> Result<LineTotals, PurchaseOrderError> {
    let hundred = Decimal::ONE_HUNDRED;
    let gross = line
        .costo_unit_estimado
        .to_decimal()
        .checked_mul(line.cantidad)
        .ok_or(PurchaseOrderError::Overflow)?;
    let neto = gross
        .checked_mul(hundred - line.descuento_pct)
        .and_then(|v| v.checked_div(hundred))
        .and_then(Cents::from_decimal)
        .ok_or(PurchaseOrderError::Overflow)?;
    let iva = neto
        .to_decimal()
        .checked_mul(line.alicuota_iva_pct)
        .and_then(|v| v.checked_div(hundred))
        .and_then(Cents::from_decimal)
        .ok_or(PurchaseOrderError::Overflow)?;
    let total = neto
        .get()
        .checked_add(iva.get())
        .map(Cents::new)
        .ok_or(PurchaseOrderError::Overflow)?;
    Ok(LineTotals { neto, iva, total })
}

/// Sums line totals for an order.
///
/// # Errors
///
/// Returns [`PurchaseOrderError::Overflow`] if an amount does not fit.
pub fn order_totals(lines: &[PurchaseOrderLine]) -> Result<OrderTotals, PurchaseOrderError> {
    lines.iter().try_fold(OrderTotals::default(), |acc, line| {
        let t = line_totals(line)?;
        let add = |a: Cents, b: Cents| {
            a.get()
                .checked_add(b.get())
                .map(Cents::new)
                .ok_or(PurchaseOrderError::Overflow)
        };
        Ok(OrderTotals {
            neto: add(acc.neto, t.neto)?,
            iva: add(acc.iva, t.iva)?,
            total: add(acc.total, t.total)?,
        })
    })
}
