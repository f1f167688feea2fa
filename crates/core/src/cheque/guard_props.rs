//! Property-based tests for the transition guard.

use chrono::NaiveDate;
use proptest::prelude::*;

use tesoreria_shared::types::{BancoCuentaId, ProveedorId, UsuarioId};

use super::error::ChequeError;
use super::fixtures::cheque;
use super::guard::{SubmitContext, TransitionForm, TransitionGuard};
use super::lifecycle::{ChequeAction, ChequeLifecycle};
use super::types::{ChequeKind, ChequeStatus};

fn arb_action() -> impl Strategy<Value = ChequeAction> {
    prop::sample::select(ChequeAction::ALL.to_vec())
}

fn arb_kind() -> impl Strategy<Value = ChequeKind> {
    prop_oneof![Just(ChequeKind::Recibido), Just(ChequeKind::Emitido)]
}

fn arb_status() -> impl Strategy<Value = ChequeStatus> {
    prop::sample::select(ChequeStatus::ALL.to_vec())
}

fn arb_form() -> impl Strategy<Value = TransitionForm> {
    (
        prop::option::of(1i64..1000),
        prop::option::of(1i64..1000),
        prop::option::of("[a-zA-Z ]{0,20}"),
        prop::option::of(0i64..400),
    )
        .prop_map(|(cuenta, proveedor, destinatario, offset)| {
            let mut form = TransitionForm::default();
            form.banco_cuenta_id = cuenta.map(BancoCuentaId::new);
            form.proveedor_id = proveedor.map(ProveedorId::new);
            form.fecha_operacion = offset.and_then(|days| {
                NaiveDate::from_ymd_opt(2026, 1, 1)
                    .and_then(|d| d.checked_add_days(chrono::Days::new(days.unsigned_abs())))
            });
            if let Some(text) = destinatario {
                form.set_destinatario(text);
            }
            form
        })
}

fn ctx(user: Option<i64>) -> SubmitContext {
    SubmitContext {
        today: NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date"),
        usuario_id: user.map(UsuarioId::new),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A prepared payload implies a legal transition and every required field present.
    #[test]
    fn prop_prepared_payload_has_required_fields(
        action in arb_action(),
        tipo in arb_kind(),
        estado in arb_status(),
        form in arb_form(),
        user in prop::option::of(1i64..50),
    ) {
        let c = cheque(tipo, estado);
        match TransitionGuard::prepare(action, &c, &form, &ctx(user)) {
            Ok(payload) => {
                prop_assert!(ChequeLifecycle::is_valid_transition(action, tipo, estado));
                prop_assert_eq!(payload.action(), action);
                let body = payload.body();
                if TransitionGuard::requires_destination_account(action, tipo) {
                    prop_assert!(body.banco_cuenta_id.is_some());
                }
                if TransitionGuard::requires_vendor(action, tipo) {
                    prop_assert!(body.proveedor_id.is_some());
                }
                prop_assert_eq!(body.usuario_log_id.map(UsuarioId::get), user);
                prop_assert_eq!(
                    payload.fecha_operacion,
                    form.fecha_operacion.unwrap_or(ctx(None).today)
                );
            }
            Err(ChequeError::InvalidTransition { .. }) => {
                prop_assert!(!ChequeLifecycle::is_valid_transition(action, tipo, estado));
            }
            Err(ChequeError::BankAccountRequired) => {
                prop_assert!(TransitionGuard::requires_destination_account(action, tipo));
                prop_assert!(form.banco_cuenta_id.is_none());
            }
            Err(ChequeError::VendorRequired) => {
                prop_assert!(TransitionGuard::requires_vendor(action, tipo));
                prop_assert!(form.proveedor_id.is_none());
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }

    /// Depositing always needs an account, whatever the cheque looks like.
    #[test]
    fn prop_deposit_always_requires_account(tipo in arb_kind()) {
        prop_assert!(TransitionGuard::requires_destination_account(ChequeAction::Depositar, tipo));
    }

    /// Delivery needs a vendor exactly for issued cheques.
    #[test]
    fn prop_delivery_vendor_rule(tipo in arb_kind()) {
        prop_assert_eq!(
            TransitionGuard::requires_vendor(ChequeAction::Entregar, tipo),
            tipo == ChequeKind::Emitido
        );
    }
}
