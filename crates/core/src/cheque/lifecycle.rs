//! Cheque lifecycle state machine.
//!
//! The backend stays authoritative for every transition; this table lets the
//! client hide actions that cannot apply and reject impossible requests
//! before they are sent.
//!
//! | action              | received from                          | issued from | target     |
//! |---------------------|----------------------------------------|-------------|------------|
//! | depositar           | registrado, en_cartera                 | -           | depositado |
//! | acreditar           | depositado                             | -           | acreditado |
//! | rechazar            | depositado, acreditado                 | entregado   | rechazado  |
//! | aplicar-a-proveedor | registrado, en_cartera                 | -           | endosado   |
//! | entregar            | registrado, en_cartera                 | registrado  | entregado  |
//! | compensar           | endosado, entregado, aplicado_a_compra | entregado   | compensado |
//! | anular              | registrado, en_cartera                 | registrado  | anulado    |

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ChequeError;
use super::types::{ChequeKind, ChequeStatus};

/// Operator actions that move a cheque through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChequeAction {
    /// Deposit into a bank account.
    Depositar,
    /// Record the funds as credited.
    Acreditar,
    /// Record a bank rejection.
    Rechazar,
    /// Endorse to a vendor.
    AplicarAProveedor,
    /// Hand over to a vendor or recipient.
    Entregar,
    /// Settle.
    Compensar,
    /// Void.
    Anular,
}

impl ChequeAction {
    /// Every action, in the order the operator sees them.
    pub const ALL: [Self; 7] = [
        Self::Depositar,
        Self::Acreditar,
        Self::Rechazar,
        Self::AplicarAProveedor,
        Self::Entregar,
        Self::Compensar,
        Self::Anular,
    ];

    /// Endpoint segment and wire name of the action.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Depositar => "depositar",
            Self::Acreditar => "acreditar",
            Self::Rechazar => "rechazar",
            Self::AplicarAProveedor => "aplicar-a-proveedor",
            Self::Entregar => "entregar",
            Self::Compensar => "compensar",
            Self::Anular => "anular",
        }
    }

    /// Parses an action name.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|action| action.slug() == wanted)
    }
}

impl fmt::Display for ChequeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Stateless lookup over the cheque transition table.
pub struct ChequeLifecycle;

impl ChequeLifecycle {
    /// Statuses from which `action` is allowed for a cheque of kind `tipo`.
    #[must_use]
    pub fn allowed_from(action: ChequeAction, tipo: ChequeKind) -> &'static [ChequeStatus] {
        use ChequeAction as A;
        use ChequeKind as K;
        use ChequeStatus as S;

        match (action, tipo) {
            (A::Depositar | A::AplicarAProveedor, K::Recibido)
            | (A::Entregar | A::Anular, K::Recibido) => &[S::Registrado, S::EnCartera],
            (A::Acreditar, K::Recibido) => &[S::Depositado],
            (A::Rechazar, K::Recibido) => &[S::Depositado, S::Acreditado],
            (A::Rechazar | A::Compensar, K::Emitido) => &[S::Entregado],
            (A::Entregar | A::Anular, K::Emitido) => &[S::Registrado],
            (A::Compensar, K::Recibido) => &[S::Endosado, S::Entregado, S::AplicadoACompra],
            (A::Depositar | A::Acreditar | A::AplicarAProveedor, K::Emitido) => &[],
        }
    }

    /// Status the cheque reaches after `action`.
    #[must_use]
    pub const fn target(action: ChequeAction) -> ChequeStatus {
        match action {
            ChequeAction::Depositar => ChequeStatus::Depositado,
            ChequeAction::Acreditar => ChequeStatus::Acreditado,
            ChequeAction::Rechazar => ChequeStatus::Rechazado,
            ChequeAction::AplicarAProveedor => ChequeStatus::Endosado,
            ChequeAction::Entregar => ChequeStatus::Entregado,
            ChequeAction::Compensar => ChequeStatus::Compensado,
            ChequeAction::Anular => ChequeStatus::Anulado,
        }
    }

    /// Returns true if the table allows `action` from `from`.
    #[must_use]
    pub fn is_valid_transition(action: ChequeAction, tipo: ChequeKind, from: ChequeStatus) -> bool {
        Self::allowed_from(action, tipo).contains(&from)
    }

    /// Validates `action` against the table and returns the resulting status.
    pub fn transition(
        action: ChequeAction,
        tipo: ChequeKind,
        from: ChequeStatus,
    ) -> Result<ChequeStatus, ChequeError> {
        if Self::is_valid_transition(action, tipo, from) {
            Ok(Self::target(action))
        } else {
            Err(ChequeError::InvalidTransition { action, tipo, from })
        }
    }

    /// Actions offered to the operator for a cheque of kind `tipo` in `estado`.
    #[must_use]
    pub fn available_actions(tipo: ChequeKind, estado: ChequeStatus) -> Vec<ChequeAction> {
        ChequeAction::ALL
            .into_iter()
            .filter(|action| Self::is_valid_transition(*action, tipo, estado))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_action_slug_roundtrip() {
        for action in ChequeAction::ALL {
            assert_eq!(ChequeAction::parse(action.slug()), Some(action));
        }
        assert_eq!(
            ChequeAction::parse("aplicar_a_proveedor"),
            Some(ChequeAction::AplicarAProveedor)
        );
        assert_eq!(ChequeAction::parse("cobrar"), None);
        assert_eq!(
            serde_json::to_string(&ChequeAction::AplicarAProveedor).unwrap(),
            "\"aplicar-a-proveedor\""
        );
    }

    #[rstest]
    #[case(ChequeAction::Depositar, ChequeKind::Recibido, ChequeStatus::EnCartera, ChequeStatus::Depositado)]
    #[case(ChequeAction::Acreditar, ChequeKind::Recibido, ChequeStatus::Depositado, ChequeStatus::Acreditado)]
    #[case(ChequeAction::Rechazar, ChequeKind::Recibido, ChequeStatus::Acreditado, ChequeStatus::Rechazado)]
    #[case(ChequeAction::Rechazar, ChequeKind::Emitido, ChequeStatus::Entregado, ChequeStatus::Rechazado)]
    #[case(ChequeAction::AplicarAProveedor, ChequeKind::Recibido, ChequeStatus::Registrado, ChequeStatus::Endosado)]
    #[case(ChequeAction::Entregar, ChequeKind::Emitido, ChequeStatus::Registrado, ChequeStatus::Entregado)]
    #[case(ChequeAction::Compensar, ChequeKind::Emitido, ChequeStatus::Entregado, ChequeStatus::Compensado)]
    #[case(ChequeAction::Compensar, ChequeKind::Recibido, ChequeStatus::AplicadoACompra, ChequeStatus::Compensado)]
    #[case(ChequeAction::Anular, ChequeKind::Recibido, ChequeStatus::EnCartera, ChequeStatus::Anulado)]
    fn test_valid_transitions(
        #[case] action: ChequeAction,
        #[case] tipo: ChequeKind,
        #[case] from: ChequeStatus,
        #[case] expected: ChequeStatus,
    ) {
        assert_eq!(ChequeLifecycle::transition(action, tipo, from), Ok(expected));
    }

    #[rstest]
    #[case(ChequeAction::Depositar, ChequeKind::Emitido, ChequeStatus::Registrado)]
    #[case(ChequeAction::Acreditar, ChequeKind::Recibido, ChequeStatus::EnCartera)]
    #[case(ChequeAction::Anular, ChequeKind::Recibido, ChequeStatus::Depositado)]
    #[case(ChequeAction::Entregar, ChequeKind::Emitido, ChequeStatus::Entregado)]
    #[case(ChequeAction::Compensar, ChequeKind::Emitido, ChequeStatus::Registrado)]
    fn test_invalid_transitions(
        #[case] action: ChequeAction,
        #[case] tipo: ChequeKind,
        #[case] from: ChequeStatus,
    ) {
        assert_eq!(
            ChequeLifecycle::transition(action, tipo, from),
            Err(ChequeError::InvalidTransition { action, tipo, from })
        );
    }

    #[test]
    fn test_terminal_statuses_offer_no_actions() {
        for tipo in [ChequeKind::Recibido, ChequeKind::Emitido] {
            for status in ChequeStatus::ALL.into_iter().filter(ChequeStatus::is_terminal) {
                assert!(ChequeLifecycle::available_actions(tipo, status).is_empty());
            }
        }
    }

    #[test]
    fn test_available_actions_for_portfolio_cheque() {
        let actions =
            ChequeLifecycle::available_actions(ChequeKind::Recibido, ChequeStatus::EnCartera);
        assert_eq!(
            actions,
            vec![
                ChequeAction::Depositar,
                ChequeAction::AplicarAProveedor,
                ChequeAction::Entregar,
                ChequeAction::Anular,
            ]
        );
    }
}
