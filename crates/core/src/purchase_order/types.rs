//! Purchase order domain types.
//!
//! The valid status transitions are:
//! - DRAFT → PENDING_APPROVAL (submit)
//! - DRAFT → APPROVED (direct approval)
//! - PENDING_APPROVAL → APPROVED (approve)
//! - PENDING_APPROVAL → REJECTED (reject)
//! - PENDING_APPROVAL → DRAFT (return to draft)
//! - APPROVED → CLOSED (generate purchase only)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use tesoreria_shared::types::{
    Cents, CompraId, Currency, LocalId, OrdenCompraId, ProductoId, ProveedorId, UsuarioId,
};

/// Purchase order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseOrderStatus {
    /// Being drafted; lines editable.
    Draft,
    /// Waiting for approval.
    PendingApproval,
    /// Approved; a purchase can be generated.
    Approved,
    /// Rejected (terminal).
    Rejected,
    /// Purchase generated (terminal).
    Closed,
}

impl PurchaseOrderStatus {
    /// Every status.
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::PendingApproval,
        Self::Approved,
        Self::Rejected,
        Self::Closed,
    ];

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Closed => "CLOSED",
        }
    }

    /// Parses a wire name.
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        Self::ALL.into_iter().find(|st| st.as_str() == upper)
    }

    /// Returns true if no further transition exists.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Closed)
    }
}

impl fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchase order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    /// Product.
    pub producto_id: ProductoId,
    /// Free-text description.
    #[serde(default)]
    pub descripcion: Option<String>,
    /// Quantity ordered.
    pub cantidad: Decimal,
    /// Estimated unit cost.
    pub costo_unit_estimado: Cents,
    /// Estimated VAT rate, in percent.
    #[serde(default)]
    pub alicuota_iva_pct: Decimal,
    /// Estimated discount, in percent.
    #[serde(default)]
    pub descuento_pct: Decimal,
}

/// Purchase order header with lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Backend id.
    pub id: OrdenCompraId,
    /// Vendor.
    pub proveedor_id: ProveedorId,
    /// Receiving location.
    #[serde(default)]
    pub local_id: Option<LocalId>,
    /// Expected delivery.
    #[serde(default)]
    pub fecha_estimada_entrega: Option<NaiveDate>,
    /// Notes.
    #[serde(default)]
    pub observaciones: Option<String>,
    /// Currency of the estimates.
    #[serde(default)]
    pub moneda: Currency,
    /// Current status.
    pub estado: PurchaseOrderStatus,
    /// Lines.
    #[serde(default)]
    pub lineas: Vec<PurchaseOrderLine>,
    /// Purchase generated from this order, once closed.
    #[serde(default)]
    pub compra_id: Option<CompraId>,
}

/// Body of `POST /ordenes-compra` and `PUT /ordenes-compra/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseOrderInput {
    /// Vendor.
    pub proveedor_id: ProveedorId,
    /// Receiving location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_id: Option<LocalId>,
    /// Expected delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_estimada_entrega: Option<NaiveDate>,
    /// Notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    /// Currency of the estimates.
    pub moneda: Currency,
    /// Lines.
    pub lineas: Vec<PurchaseOrderLine>,
    /// Acting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_log_id: Option<UsuarioId>,
}

/// Body of `PUT /ordenes-compra/:id/estado`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    /// Target status.
    pub estado: PurchaseOrderStatus,
    /// Reason, for rejections and returns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
    /// Acting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_log_id: Option<UsuarioId>,
}

/// Body of `POST /ordenes-compra/:id/generar-compra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratePurchase {
    /// Purchase date.
    pub fecha: NaiveDate,
    /// Vendor invoice number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nro_comprobante: Option<String>,
    /// Acting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_log_id: Option<UsuarioId>,
}

/// Response of `POST /ordenes-compra/:id/generar-compra`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GeneratedPurchase {
    /// New purchase id.
    pub compra_id: CompraId,
}
