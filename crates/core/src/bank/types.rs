//! Bank, bank account, checkbook and bank movement types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tesoreria_shared::types::{
    BancoCuentaId, BancoId, BancoMovimientoId, Cents, ChequeraId, Currency, UsuarioId,
};

/// A bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    /// Backend id.
    pub id: BancoId,
    /// Display name.
    pub nombre: String,
    /// Whether the bank can be used.
    #[serde(default = "default_true")]
    pub activo: bool,
}

/// Body of `POST /bancos` and `PUT /bancos/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankInput {
    /// Display name.
    pub nombre: String,
    /// Whether the bank can be used.
    pub activo: bool,
    /// Acting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_log_id: Option<UsuarioId>,
}

/// A bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    /// Backend id.
    pub id: BancoCuentaId,
    /// Owning bank.
    pub banco_id: BancoId,
    /// Display name.
    pub nombre_cuenta: String,
    /// Account currency.
    #[serde(default)]
    pub moneda: Currency,
    /// Account number.
    #[serde(default)]
    pub numero_cuenta: Option<String>,
    /// CBU.
    #[serde(default)]
    pub cbu: Option<String>,
    /// Alias.
    #[serde(default)]
    pub alias: Option<String>,
    /// Whether the account can be used.
    #[serde(default = "default_true")]
    pub activa: bool,
}

/// Body of `POST /banco-cuentas` and `PUT /banco-cuentas/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccountInput {
    /// Owning bank.
    pub banco_id: BancoId,
    /// Display name.
    pub nombre_cuenta: String,
    /// Account currency.
    #[serde(default)]
    pub moneda: Currency,
    /// Account number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_cuenta: Option<String>,
    /// CBU.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cbu: Option<String>,
    /// Alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Acting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuario_log_id: Option<UsuarioId>,
}

impl BankAccountInput {
    /// New account input with the default currency.
    #[must_use]
    pub fn new(banco_id: BancoId, nombre_cuenta: impl Into<String>) -> Self {
        Self {
            banco_id,
            nombre_cuenta: nombre_cuenta.into(),
            moneda: Currency::default(),
            numero_cuenta: None,
            cbu: None,
            alias: None,
            usuario_log_id: None,
        }
    }
}

/// Response of `GET /banco-cuentas/:id/saldo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Account.
    pub banco_cuenta_id: BancoCuentaId,
    /// Balance.
    pub saldo: Cents,
    /// Balance date.
    #[serde(default)]
    pub fecha: Option<NaiveDate>,
}

/// Response of `GET /banco-cuentas/:id/resumen`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Account.
    pub banco_cuenta_id: BancoCuentaId,
    /// Balance at the start of the range.
    #[serde(default)]
    pub saldo_inicial: Cents,
    /// Credits in the range.
    #[serde(default)]
    pub creditos: Cents,
    /// Debits in the range.
    #[serde(default)]
    pub debitos: Cents,
    /// Balance at the end of the range.
    #[serde(default)]
    pub saldo_final: Cents,
}

impl AccountSummary {
    /// Whether opening balance plus credits minus debits gives the closing balance.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.saldo_inicial + self.creditos - self.debitos == self.saldo_final
    }
}

/// Direction of a bank movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Money in.
    Credito,
    /// Money out.
    Debito,
}

impl MovementKind {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Credito => "credito",
            Self::Debito => "debito",
        }
    }

    /// Parses a wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "credito" | "credit" => Some(Self::Credito),
            "debito" | "debit" => Some(Self::Debito),
            _ => None,
        }
    }
}

/// A bank movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankMovement {
    /// Backend id.
    pub id: BancoMovimientoId,
    /// Account.
    pub banco_cuenta_id: BancoCuentaId,
    /// Value date.
    pub fecha: NaiveDate,
    /// Direction.
    pub tipo: MovementKind,
    /// Amount.
    pub monto: Cents,
    /// Description.
    #[serde(default)]
    pub descripcion: Option<String>,
    /// Source table.
    #[serde(default)]
    pub ref_tabla: Option<String>,
    /// Source record.
    #[serde(default)]
    pub ref_id: Option<i64>,
}

/// Body of `POST /banco-movimientos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankMovementInput {
    /// Account.
    pub banco_cuenta_id: BancoCuentaId,
    /// Value date.
    pub fecha: NaiveDate,
    /// Direction.
    pub tipo: MovementKind,
    /// Amount.
    pub monto: Cents,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    /// Acting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_log_id: Option<UsuarioId>,
}

/// Query filters for `GET /banco-movimientos` and its CSV export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MovementFilter {
    /// Account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banco_cuenta_id: Option<BancoCuentaId>,
    /// From date, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desde: Option<NaiveDate>,
    /// To date, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hasta: Option<NaiveDate>,
    /// Direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<MovementKind>,
}

/// A checkbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkbook {
    /// Backend id.
    pub id: ChequeraId,
    /// Account the cheques draw on.
    pub banco_cuenta_id: BancoCuentaId,
    /// First number.
    pub nro_desde: i64,
    /// Last number.
    pub nro_hasta: i64,
    /// Next number to issue.
    #[serde(default)]
    pub proximo_nro: Option<i64>,
    /// Whether the checkbook can be used.
    #[serde(default = "default_true")]
    pub activa: bool,
}

/// Body of `POST /chequeras`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckbookInput {
    /// Account the cheques draw on.
    pub banco_cuenta_id: BancoCuentaId,
    /// First number.
    pub nro_desde: i64,
    /// Last number.
    pub nro_hasta: i64,
    /// Next number to issue; defaults to `nro_desde` on the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximo_nro: Option<i64>,
    /// Acting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_log_id: Option<UsuarioId>,
}

fn default_true() -> bool {
    true
}
