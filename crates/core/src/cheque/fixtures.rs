//! Test builders shared by the cheque and allocation test suites.

use tesoreria_shared::types::{BancoId, Cents, ChequeId, ChequeraId};

use super::types::{Canal, Cheque, ChequeKind, ChequeStatus};

pub(crate) fn cheque(tipo: ChequeKind, estado: ChequeStatus) -> Cheque {
    let (banco_id, chequera_id) = match tipo {
        ChequeKind::Recibido => (Some(BancoId::new(3)), None),
        ChequeKind::Emitido => (None, Some(ChequeraId::new(4))),
    };
    Cheque {
        id: ChequeId::new(1),
        tipo,
        canal: Canal::C1,
        banco_id,
        banco_nombre: Some("Banco Nación".into()),
        chequera_id,
        numero: 1001,
        monto: Cents::new(100_000),
        fecha_emision: None,
        fecha_vencimiento: None,
        fecha_cobro_prevista: None,
        cliente_id: None,
        proveedor_id: None,
        venta_id: None,
        beneficiario_nombre: None,
        estado,
        motivo_estado: None,
        saldo_disponible_virtual: None,
        monto_aplicado_total: None,
    }
}
