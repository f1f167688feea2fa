//! Property-based tests for checkbook ranges.

use proptest::prelude::*;

use tesoreria_shared::types::BancoCuentaId;

use super::conflict::SuggestedRange;
use super::service::BankService;
use super::types::CheckbookInput;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A checkbook validates exactly when `0 < desde <= hasta` and the next number is in range.
    #[test]
    fn prop_checkbook_range_invariant(
        desde in -10i64..1_000,
        hasta in -10i64..1_000,
        proximo in prop::option::of(-10i64..1_100),
    ) {
        let input = CheckbookInput {
            banco_cuenta_id: BancoCuentaId::new(1),
            nro_desde: desde,
            nro_hasta: hasta,
            proximo_nro: proximo,
            usuario_log_id: None,
        };
        let expected = desde > 0
            && hasta >= desde
            && proximo.is_none_or(|p| (desde..=hasta).contains(&p));
        prop_assert_eq!(BankService::validate_checkbook(&input).is_ok(), expected);
    }

    /// Applying a backend suggestion always yields a valid checkbook.
    #[test]
    fn prop_suggestion_yields_valid_checkbook(
        start in 1i64..100_000,
        len in 0i64..500,
        original_desde in -5i64..100,
    ) {
        let range = SuggestedRange { nro_desde: start, nro_hasta: start + len };
        let original = CheckbookInput {
            banco_cuenta_id: BancoCuentaId::new(9),
            nro_desde: original_desde,
            nro_hasta: original_desde,
            proximo_nro: None,
            usuario_log_id: None,
        };
        prop_assert!(BankService::validate_checkbook(&range.apply_to(&original)).is_ok());
    }
}
