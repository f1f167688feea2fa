//! Property-based tests for purchase order rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use tesoreria_shared::types::{Cents, ProductoId};

use super::error::PurchaseOrderError;
use super::service::PurchaseOrderService;
use super::totals::line_totals;
use super::types::{PurchaseOrderLine, PurchaseOrderStatus};

fn arb_status() -> impl Strategy<Value = PurchaseOrderStatus> {
    prop::sample::select(PurchaseOrderStatus::ALL.to_vec())
}

fn arb_line() -> impl Strategy<Value = PurchaseOrderLine> {
    (1i64..100_000, 0i64..10_000_000, 0i64..=100, 0i64..=100).prop_map(
        |(qty_milli, cost, iva, desc)| PurchaseOrderLine {
            producto_id: ProductoId::new(1),
            descripcion: None,
            cantidad: Decimal::new(qty_milli, 3),
            costo_unit_estimado: Cents::new(cost),
            alicuota_iva_pct: Decimal::from(iva),
            descuento_pct: Decimal::from(desc),
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// No status change request ever targets CLOSED; terminal statuses go nowhere.
    #[test]
    fn prop_closed_only_by_purchase(from in arb_status(), to in arb_status()) {
        let result = PurchaseOrderService::change_status(from, to, None, None);
        if to == PurchaseOrderStatus::Closed {
            prop_assert_eq!(result, Err(PurchaseOrderError::CloseThroughPurchase));
        } else if from.is_terminal() {
            prop_assert!(result.is_err());
        }
    }

    /// Lines are editable exactly in DRAFT; purchases are generated exactly from APPROVED.
    #[test]
    fn prop_status_gates(status in arb_status()) {
        prop_assert_eq!(
            PurchaseOrderService::ensure_lines_editable(status).is_ok(),
            status == PurchaseOrderStatus::Draft
        );
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).expect("valid date");
        prop_assert_eq!(
            PurchaseOrderService::generate_purchase(status, date, None, None).is_ok(),
            status == PurchaseOrderStatus::Approved
        );
    }

    /// Discounts never raise the net and totals add up.
    #[test]
    fn prop_line_totals_consistent(line in arb_line()) {
        let t = line_totals(&line).expect("fits");
        let undiscounted = line_totals(&PurchaseOrderLine {
            descuento_pct: Decimal::ZERO,
            ..line.clone()
        })
        .expect("fits");
        prop_assert!(t.neto <= undiscounted.neto);
        prop_assert!(!t.iva.is_negative());
        prop_assert_eq!(t.total, t.neto + t.iva);
    }
}
