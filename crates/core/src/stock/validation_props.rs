//! Property-based tests for stock movement validation.

use proptest::prelude::*;

use super::error::StockValidationError;
use super::reversal::StockReversalService;
use super::types::{SignRule, StockMovement, StockMovementDraft, StockMovementKind};
use super::validation::StockMovementValidator;
use tesoreria_shared::types::{Currency, LocalId, ProductoId, StockMovimientoId};

fn arb_kind() -> impl Strategy<Value = StockMovementKind> {
    prop::sample::select(StockMovementKind::ALL.to_vec())
}

fn arb_reference() -> impl Strategy<Value = (Option<String>, Option<i64>)> {
    (
        prop::option::of("[a-z_]{1,12}"),
        prop::option::of(1i64..10_000),
    )
}

fn draft(kind: StockMovementKind, delta: i64, reference: (Option<String>, Option<i64>)) -> StockMovementDraft {
    StockMovementDraft {
        producto_id: Some(1),
        local_id: Some(1),
        tipo: kind.as_str().to_string(),
        delta,
        ref_tabla: reference.0,
        ref_id: reference.1,
        ..StockMovementDraft::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Validation accepts a delta exactly when its sign matches the kind.
    #[test]
    fn prop_sign_rule(kind in arb_kind(), delta in -1_000i64..1_000) {
        let input = draft(kind, delta, (Some("compras".to_string()), Some(1)));
        let v = StockMovementValidator::validate(&input);
        let expected = match kind.sign_rule() {
            SignRule::Positive => delta > 0,
            SignRule::Negative => delta < 0,
            SignRule::Any => delta != 0,
        };
        prop_assert_eq!(v.ok(), expected);
    }

    /// Non-adjustments need both reference fields; adjustments need neither.
    #[test]
    fn prop_reference_requirement(kind in arb_kind(), reference in arb_reference()) {
        let delta = match kind.sign_rule() {
            SignRule::Negative => -1,
            _ => 1,
        };
        let complete = reference.0.is_some() && reference.1.is_some();
        let v = StockMovementValidator::validate(&draft(kind, delta, reference));
        let missing_ref = v
            .errors
            .iter()
            .any(|e| matches!(e, StockValidationError::ReferenceRequired(_)));
        if kind == StockMovementKind::Adjustment {
            prop_assert!(v.ok());
        } else {
            prop_assert_eq!(missing_ref, !complete);
        }
    }

    /// A reversal cancels the original and is itself a valid adjustment.
    #[test]
    fn prop_reversal_cancels(kind in arb_kind(), magnitude in 1i64..10_000, id in 1i64..100_000) {
        let delta = match kind.sign_rule() {
            SignRule::Negative => -magnitude,
            _ => magnitude,
        };
        let original = StockMovement {
            id: StockMovimientoId::new(id),
            producto_id: ProductoId::new(3),
            local_id: LocalId::new(4),
            lugar_id: None,
            estado_id: None,
            tipo: kind,
            delta,
            costo_unit_neto: None,
            moneda: Currency::Ars,
            ref_tabla: None,
            ref_id: None,
            notas: None,
            created_at: None,
        };
        let body = StockReversalService::compensating(&original, None, None)
            .expect("non-extreme delta");
        prop_assert_eq!(body.delta + original.delta, 0);
        prop_assert_eq!(body.tipo, StockMovementKind::Adjustment);
        prop_assert_eq!(body.ref_id, Some(id));

        let as_draft = StockMovementDraft {
            producto_id: Some(body.producto_id.get()),
            local_id: Some(body.local_id.get()),
            tipo: body.tipo.as_str().to_string(),
            delta: body.delta,
            ref_tabla: body.ref_tabla.clone(),
            ref_id: body.ref_id,
            ..StockMovementDraft::default()
        };
        prop_assert!(StockMovementValidator::validate(&as_draft).ok());
    }
}
