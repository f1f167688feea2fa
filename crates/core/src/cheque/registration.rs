//! Cheque registration input.

use chrono::NaiveDate;
use serde::Serialize;

use tesoreria_shared::types::{
    BancoId, Cents, ChequeraId, ClienteId, ProveedorId, UsuarioId, VentaId,
};

use super::error::ChequeError;
use super::types::{Canal, ChequeKind};

/// Body of `POST /cheques`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCheque {
    /// Received or issued.
    pub tipo: ChequeKind,
    /// Bookkeeping channel.
    pub canal: Canal,
    /// Issuing bank, required for received cheques.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banco_id: Option<BancoId>,
    /// Checkbook, required for issued cheques.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chequera_id: Option<ChequeraId>,
    /// Cheque number.
    pub numero: i64,
    /// Face value.
    pub monto: Cents,
    /// Issue date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_emision: Option<NaiveDate>,
    /// Due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_vencimiento: Option<NaiveDate>,
    /// Expected collection date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_cobro_prevista: Option<NaiveDate>,
    /// Customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<ClienteId>,
    /// Vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proveedor_id: Option<ProveedorId>,
    /// Related sale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venta_id: Option<VentaId>,
    /// Beneficiary free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiario_nombre: Option<String>,
    /// Acting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_log_id: Option<UsuarioId>,
}

impl NewCheque {
    /// Validates the registration before it is sent.
    pub fn validate(&self) -> Result<(), ChequeError> {
        if self.numero <= 0 {
            return Err(ChequeError::InvalidNumber);
        }
        if !self.monto.is_positive() {
            return Err(ChequeError::InvalidAmount);
        }
        match self.tipo {
            ChequeKind::Recibido if !self.banco_id.is_some_and(BancoId::is_valid) => {
                return Err(ChequeError::IssuingBankRequired);
            }
            ChequeKind::Emitido if !self.chequera_id.is_some_and(ChequeraId::is_valid) => {
                return Err(ChequeError::CheckbookRequired);
            }
            _ => {}
        }
        if let (Some(emision), Some(vencimiento)) = (self.fecha_emision, self.fecha_vencimiento) {
            if vencimiento < emision {
                return Err(ChequeError::DueBeforeIssue);
            }
        }
        Ok(())
    }
}
