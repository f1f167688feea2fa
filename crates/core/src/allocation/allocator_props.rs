//! Property-based tests for the payment allocator.
//!
//! Any sequence of grid operations keeps every row inside its balance and
//! the total inside the target; plans carry deterministic keys.

use chrono::NaiveDate;
use proptest::prelude::*;

use tesoreria_shared::types::{Cents, ChequeId};

use crate::allocation::{
    AllocationCandidate, BatchId, PaymentAllocator, SortKey, SortPolicy,
};
use crate::cheque::ChequeStatus;

#[derive(Debug, Clone)]
enum Op {
    Manual(usize, i64),
    Text(usize, String),
    Max(usize),
    Fill(usize),
    Auto,
    Clear,
    Resort(SortKey, bool),
}

fn arb_candidates() -> impl Strategy<Value = Vec<AllocationCandidate>> {
    prop::collection::vec(
        (
            0i64..500_000,
            prop::option::of(1u32..28),
            any::<bool>(),
            prop::option::of("[A-Za-z]{1,8}"),
        ),
        1..8,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .zip(1i64..)
            .map(|((saldo, due, credited, banco), id)| AllocationCandidate {
                cheque_id: ChequeId::new(id),
                numero: 1000 + id,
                banco_nombre: banco,
                fecha_vencimiento: due.and_then(|d| NaiveDate::from_ymd_opt(2026, 12, d)),
                estado: if credited {
                    ChequeStatus::Acreditado
                } else {
                    ChequeStatus::EnCartera
                },
                disponible: Cents::new(saldo),
            })
            .collect()
    })
}

fn arb_sort_key() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Vencimiento),
        Just(SortKey::Saldo),
        Just(SortKey::Banco)
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8, -100_000i64..700_000).prop_map(|(i, v)| Op::Manual(i, v)),
        (0usize..8, "[0-9]{1,6}([.,][0-9]{1,2})?").prop_map(|(i, s)| Op::Text(i, s)),
        (0usize..8).prop_map(Op::Max),
        (0usize..8).prop_map(Op::Fill),
        Just(Op::Auto),
        Just(Op::Clear),
        (arb_sort_key(), any::<bool>()).prop_map(|(k, c)| Op::Resort(k, c)),
    ]
}

fn apply(alloc: &mut PaymentAllocator, op: &Op) {
    let id_at = |alloc: &PaymentAllocator, i: usize| {
        let rows = alloc.rows();
        rows[i % rows.len()].candidate.cheque_id
    };
    match op {
        Op::Manual(i, v) => {
            let id = id_at(alloc, *i);
            alloc.set_amount(id, Cents::new(*v)).expect("known cheque");
        }
        Op::Text(i, s) => {
            let id = id_at(alloc, *i);
            alloc.set_manual(id, s).expect("numeric input");
        }
        Op::Max(i) => {
            let id = id_at(alloc, *i);
            alloc.max_row(id).expect("known cheque");
        }
        Op::Fill(i) => {
            let id = id_at(alloc, *i);
            alloc.fill_remainder(id).expect("known cheque");
        }
        Op::Auto => alloc.auto_distribute(),
        Op::Clear => alloc.clear(),
        Op::Resort(key, credited_first) => alloc.set_policy(SortPolicy {
            key: *key,
            credited_first: *credited_first,
        }),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Rows stay within their balance and the total never passes the target.
    #[test]
    fn prop_allocation_sum_invariant(
        target in 0i64..1_500_000,
        candidates in arb_candidates(),
        ops in prop::collection::vec(arb_op(), 0..20),
    ) {
        let mut alloc = PaymentAllocator::new(Cents::new(target), candidates, SortPolicy::default())
            .expect("valid allocator");
        for op in &ops {
            apply(&mut alloc, op);
            for row in alloc.rows() {
                prop_assert!(!row.asignado.is_negative());
                prop_assert!(row.asignado <= row.candidate.disponible);
            }
            prop_assert!(alloc.allocated() <= alloc.target());
        }
    }

    /// Auto-distribution reaches the target whenever the balances cover it.
    #[test]
    fn prop_auto_distribute_covers_target(
        target in 1i64..1_500_000,
        candidates in arb_candidates(),
    ) {
        let capacity: Cents = candidates.iter().map(|c| c.disponible).sum();
        let mut alloc = PaymentAllocator::new(Cents::new(target), candidates, SortPolicy::default())
            .expect("valid allocator");
        alloc.auto_distribute();
        prop_assert_eq!(alloc.allocated(), Cents::new(target).min(capacity));
        prop_assert_eq!(alloc.can_confirm(), capacity >= Cents::new(target));
    }

    /// The confirm gate opens exactly when the sum equals a positive target.
    #[test]
    fn prop_confirm_gate(
        target in 0i64..1_500_000,
        candidates in arb_candidates(),
        ops in prop::collection::vec(arb_op(), 0..10),
    ) {
        let mut alloc = PaymentAllocator::new(Cents::new(target), candidates, SortPolicy::default())
            .expect("valid allocator");
        for op in &ops {
            apply(&mut alloc, op);
        }
        let expected = target > 0 && alloc.allocated() == Cents::new(target);
        prop_assert_eq!(alloc.can_confirm(), expected);
        prop_assert_eq!(alloc.plan(BatchId::new(), None).is_ok(), expected);
    }

    /// Re-planning a batch yields the same keys, one per row with an amount.
    #[test]
    fn prop_retry_keys_are_deterministic(
        target in 1i64..1_500_000,
        candidates in arb_candidates(),
        key in arb_sort_key(),
    ) {
        let mut alloc = PaymentAllocator::new(Cents::new(target), candidates, SortPolicy::default())
            .expect("valid allocator");
        alloc.auto_distribute();
        prop_assume!(alloc.can_confirm());

        let batch = BatchId::new();
        let first = alloc.plan(batch, None).expect("balanced");
        alloc.set_policy(SortPolicy { key, credited_first: false });
        let retry = alloc.plan(batch, None).expect("balanced");

        let mut first_keys: Vec<_> = first.applications.iter().map(|a| a.idempotency_key.clone()).collect();
        let mut retry_keys: Vec<_> = retry.applications.iter().map(|a| a.idempotency_key.clone()).collect();
        first_keys.sort();
        retry_keys.sort();
        prop_assert_eq!(&first_keys, &retry_keys);

        for app in &first.applications {
            prop_assert!(app.monto.is_positive());
            prop_assert_eq!(&app.idempotency_key, &format!("{batch}-{}", app.row_index));
        }
        prop_assert_eq!(first.total(), Cents::new(target));
    }
}
