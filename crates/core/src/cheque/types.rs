//! Cheque domain types.
//!
//! Field names follow the back-office wire format so the same types travel
//! through the HTTP client unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use tesoreria_shared::types::{
    BancoId, Cents, ChequeId, ChequeraId, ClienteId, ProveedorId, VentaId,
};

/// Whether the cheque was received from a customer or issued by the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChequeKind {
    /// Third-party cheque received as payment.
    Recibido,
    /// Own cheque issued from a checkbook.
    Emitido,
}

impl ChequeKind {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recibido => "recibido",
            Self::Emitido => "emitido",
        }
    }

    /// Parses a wire value.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "recibido" | "received" => Some(Self::Recibido),
            "emitido" | "issued" => Some(Self::Emitido),
            _ => None,
        }
    }
}

impl fmt::Display for ChequeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bookkeeping channel of the cheque.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Canal {
    /// First channel.
    #[default]
    C1,
    /// Second channel.
    C2,
}

/// Lifecycle status of a cheque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChequeStatus {
    /// Registered, not yet classified.
    Registrado,
    /// Held in the portfolio.
    EnCartera,
    /// Fully consumed by purchase payments.
    AplicadoACompra,
    /// Endorsed to a vendor.
    Endosado,
    /// Deposited in a bank account.
    Depositado,
    /// Funds credited to a bank account.
    Acreditado,
    /// Rejected by the bank.
    Rechazado,
    /// Voided.
    Anulado,
    /// Handed over to a vendor or recipient.
    Entregado,
    /// Settled.
    Compensado,
}

impl ChequeStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 10] = [
        Self::Registrado,
        Self::EnCartera,
        Self::AplicadoACompra,
        Self::Endosado,
        Self::Depositado,
        Self::Acreditado,
        Self::Rechazado,
        Self::Anulado,
        Self::Entregado,
        Self::Compensado,
    ];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Registrado => "registrado",
            Self::EnCartera => "en_cartera",
            Self::AplicadoACompra => "aplicado_a_compra",
            Self::Endosado => "endosado",
            Self::Depositado => "depositado",
            Self::Acreditado => "acreditado",
            Self::Rechazado => "rechazado",
            Self::Anulado => "anulado",
            Self::Entregado => "entregado",
            Self::Compensado => "compensado",
        }
    }

    /// Parses a wire value.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|status| status.as_str() == wanted)
    }

    /// Returns true if no further action applies.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Anulado | Self::Compensado)
    }
}

impl fmt::Display for ChequeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cheque as returned by the back-office API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cheque {
    /// Identifier.
    pub id: ChequeId,
    /// Received or issued.
    pub tipo: ChequeKind,
    /// Bookkeeping channel.
    #[serde(default)]
    pub canal: Canal,
    /// Issuing bank (received cheques).
    #[serde(default)]
    pub banco_id: Option<BancoId>,
    /// Issuing bank display name, when the backend joins it.
    #[serde(default)]
    pub banco_nombre: Option<String>,
    /// Checkbook (issued cheques).
    #[serde(default)]
    pub chequera_id: Option<ChequeraId>,
    /// Cheque number.
    pub numero: i64,
    /// Face value.
    pub monto: Cents,
    /// Issue date.
    #[serde(default)]
    pub fecha_emision: Option<NaiveDate>,
    /// Due date.
    #[serde(default)]
    pub fecha_vencimiento: Option<NaiveDate>,
    /// Expected collection date.
    #[serde(default)]
    pub fecha_cobro_prevista: Option<NaiveDate>,
    /// Customer (received cheques).
    #[serde(default)]
    pub cliente_id: Option<ClienteId>,
    /// Vendor (issued or applied to vendor).
    #[serde(default)]
    pub proveedor_id: Option<ProveedorId>,
    /// Related sale.
    #[serde(default)]
    pub venta_id: Option<VentaId>,
    /// Beneficiary free text.
    #[serde(default)]
    pub beneficiario_nombre: Option<String>,
    /// Lifecycle status.
    pub estado: ChequeStatus,
    /// Reason recorded with the last transition.
    #[serde(default)]
    pub motivo_estado: Option<String>,
    /// Remaining applicable balance computed by the backend.
    #[serde(default)]
    pub saldo_disponible_virtual: Option<Cents>,
    /// Total already applied to payments.
    #[serde(default)]
    pub monto_aplicado_total: Option<Cents>,
}

impl Cheque {
    /// Remaining balance that can still be applied to payments.
    ///
    /// Prefers the backend-computed balance and never goes below zero or
    /// above the face value.
    #[must_use]
    pub fn available_balance(&self) -> Cents {
        let balance = self.saldo_disponible_virtual.unwrap_or_else(|| {
            self.monto
                .saturating_sub(self.monto_aplicado_total.unwrap_or(Cents::ZERO))
        });
        balance.non_negative().min(self.monto.non_negative())
    }

    /// Number shown to the operator, e.g. in batch failure messages.
    #[must_use]
    pub fn display_number(&self) -> String {
        format!("#{}", self.numero)
    }
}
