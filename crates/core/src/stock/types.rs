//! Stock movement domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use tesoreria_shared::types::{
    Currency, EstadoStockId, LocalId, LugarId, ProductoId, StockMovimientoId, UsuarioId,
};

/// Longest note the backend stores.
pub const MAX_NOTES_CHARS: usize = 300;

/// Table name used when a movement references another movement.
pub const STOCK_MOVEMENTS_TABLE: &str = "stock_movimientos";

/// Kind of stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockMovementKind {
    /// Goods bought from a vendor.
    Purchase,
    /// Goods sold to a customer.
    Sale,
    /// Goods sent back to a vendor.
    VendorReturn,
    /// Goods returned by a customer.
    ClientReturn,
    /// Manual correction.
    Adjustment,
    /// Move between places.
    Transfer,
    /// Purchase-order receipt.
    OcReceipt,
}

/// Required sign of a movement's quantity delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignRule {
    /// Stock increases.
    Positive,
    /// Stock decreases.
    Negative,
    /// Either direction.
    Any,
}

impl SignRule {
    /// Whether `delta` satisfies the rule. Zero never does.
    #[must_use]
    pub const fn accepts(self, delta: i64) -> bool {
        match self {
            Self::Positive => delta > 0,
            Self::Negative => delta < 0,
            Self::Any => delta != 0,
        }
    }
}

impl StockMovementKind {
    /// Every kind.
    pub const ALL: [Self; 7] = [
        Self::Purchase,
        Self::Sale,
        Self::VendorReturn,
        Self::ClientReturn,
        Self::Adjustment,
        Self::Transfer,
        Self::OcReceipt,
    ];

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "PURCHASE",
            Self::Sale => "SALE",
            Self::VendorReturn => "VENDOR_RETURN",
            Self::ClientReturn => "CLIENT_RETURN",
            Self::Adjustment => "ADJUSTMENT",
            Self::Transfer => "TRANSFER",
            Self::OcReceipt => "OC_RECEIPT",
        }
    }

    /// Parses a wire name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        Self::ALL.into_iter().find(|k| k.as_str() == upper)
    }

    /// Sign the delta must have.
    #[must_use]
    pub const fn sign_rule(&self) -> SignRule {
        match self {
            Self::Purchase | Self::ClientReturn | Self::OcReceipt => SignRule::Positive,
            Self::Sale | Self::VendorReturn => SignRule::Negative,
            Self::Adjustment | Self::Transfer => SignRule::Any,
        }
    }

    /// Whether a source document reference is mandatory.
    #[must_use]
    pub const fn requires_reference(&self) -> bool {
        !matches!(self, Self::Adjustment)
    }
}

impl fmt::Display for StockMovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted stock movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    /// Backend-assigned id.
    pub id: StockMovimientoId,
    /// Product.
    pub producto_id: ProductoId,
    /// Store location.
    pub local_id: LocalId,
    /// Place inside the location.
    #[serde(default)]
    pub lugar_id: Option<LugarId>,
    /// Stock condition.
    #[serde(default)]
    pub estado_id: Option<EstadoStockId>,
    /// Movement kind.
    pub tipo: StockMovementKind,
    /// Quantity change.
    pub delta: i64,
    /// Net unit cost.
    #[serde(default)]
    pub costo_unit_neto: Option<Decimal>,
    /// Cost currency.
    #[serde(default)]
    pub moneda: Currency,
    /// Source table.
    #[serde(default)]
    pub ref_tabla: Option<String>,
    /// Source record.
    #[serde(default)]
    pub ref_id: Option<i64>,
    /// Operator notes.
    #[serde(default)]
    pub notas: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Raw operator input for a new movement, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StockMovementDraft {
    /// Product.
    pub producto_id: Option<i64>,
    /// Store location.
    pub local_id: Option<i64>,
    /// Place inside the location.
    pub lugar_id: Option<i64>,
    /// Stock condition.
    pub estado_id: Option<i64>,
    /// Movement kind as typed.
    pub tipo: String,
    /// Quantity change.
    pub delta: i64,
    /// Net unit cost.
    pub costo_unit_neto: Option<Decimal>,
    /// Currency code as typed.
    pub moneda: Option<String>,
    /// Source table.
    pub ref_tabla: Option<String>,
    /// Source record.
    pub ref_id: Option<i64>,
    /// Operator notes.
    pub notas: Option<String>,
}

/// Body of `POST /stock-movimientos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStockMovement {
    /// Product.
    pub producto_id: ProductoId,
    /// Store location.
    pub local_id: LocalId,
    /// Place inside the location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lugar_id: Option<LugarId>,
    /// Stock condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado_id: Option<EstadoStockId>,
    /// Movement kind.
    pub tipo: StockMovementKind,
    /// Quantity change.
    pub delta: i64,
    /// Net unit cost.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub costo_unit_neto: Option<Decimal>,
    /// Cost currency.
    pub moneda: Currency,
    /// Source table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_tabla: Option<String>,
    /// Source record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<i64>,
    /// Operator notes, at most [`MAX_NOTES_CHARS`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notas: Option<String>,
    /// Acting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_log_id: Option<UsuarioId>,
}

/// Body of `PUT /stock-movimientos/:id`. Notes are the only editable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotesUpdate {
    /// New notes, truncated to [`MAX_NOTES_CHARS`].
    pub notas: Option<String>,
}

impl NotesUpdate {
    /// Builds an update, truncating long notes and clearing blank ones.
    #[must_use]
    pub fn new(notas: Option<&str>) -> Self {
        Self {
            notas: clamp_notes(notas),
        }
    }
}

/// Trims notes, drops blank ones and truncates to [`MAX_NOTES_CHARS`] characters.
#[must_use]
pub fn clamp_notes(notas: Option<&str>) -> Option<String> {
    let text = notas?.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(MAX_NOTES_CHARS).collect())
}
