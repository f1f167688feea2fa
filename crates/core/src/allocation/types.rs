//! Allocation domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use tesoreria_shared::types::{Cents, ChequeId};

use crate::cheque::{Cheque, ChequeStatus};

/// A cheque offered as a payment source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationCandidate {
    /// Cheque identifier.
    pub cheque_id: ChequeId,
    /// Cheque number, shown to the operator.
    pub numero: i64,
    /// Issuing bank display name.
    pub banco_nombre: Option<String>,
    /// Due date.
    pub fecha_vencimiento: Option<NaiveDate>,
    /// Current status.
    pub estado: ChequeStatus,
    /// Balance still applicable.
    pub disponible: Cents,
}

impl From<&Cheque> for AllocationCandidate {
    fn from(cheque: &Cheque) -> Self {
        Self {
            cheque_id: cheque.id,
            numero: cheque.numero,
            banco_nombre: cheque.banco_nombre.clone(),
            fecha_vencimiento: cheque.fecha_vencimiento,
            estado: cheque.estado,
            disponible: cheque.available_balance(),
        }
    }
}

/// One row of the allocation grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRow {
    /// Position in the original candidate list; stable across re-sorts.
    pub index: usize,
    /// The offered cheque.
    pub candidate: AllocationCandidate,
    /// Amount allocated from this cheque.
    pub asignado: Cents,
}

impl AllocationRow {
    /// Balance left on the cheque after this row's allocation.
    #[must_use]
    pub fn unallocated_balance(&self) -> Cents {
        self.candidate
            .disponible
            .saturating_sub(self.asignado)
            .non_negative()
    }
}

/// Key rows are ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Soonest due first; rows without a due date last.
    #[default]
    Vencimiento,
    /// Largest available balance first.
    Saldo,
    /// Bank name, alphabetically.
    Banco,
}

impl SortKey {
    /// Parses a sort key name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "vencimiento" | "due" => Some(Self::Vencimiento),
            "saldo" | "balance" => Some(Self::Saldo),
            "banco" | "bank" => Some(Self::Banco),
            _ => None,
        }
    }
}

/// Ordering applied to the rows before greedy distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortPolicy {
    /// Chosen key.
    pub key: SortKey,
    /// Place credited cheques ahead of the rest.
    pub credited_first: bool,
}

impl Default for SortPolicy {
    fn default() -> Self {
        Self {
            key: SortKey::Vencimiento,
            credited_first: true,
        }
    }
}

impl SortPolicy {
    /// Compares two rows under this policy; ties fall back to the original order.
    #[must_use]
    pub fn compare(&self, a: &AllocationRow, b: &AllocationRow) -> Ordering {
        let bias = |row: &AllocationRow| {
            u8::from(!(self.credited_first && row.candidate.estado == ChequeStatus::Acreditado))
        };
        bias(a)
            .cmp(&bias(b))
            .then_with(|| self.compare_key(&a.candidate, &b.candidate))
            .then_with(|| a.index.cmp(&b.index))
    }

    fn compare_key(&self, a: &AllocationCandidate, b: &AllocationCandidate) -> Ordering {
        match self.key {
            SortKey::Vencimiento => none_last(a.fecha_vencimiento, b.fecha_vencimiento),
            SortKey::Saldo => b.disponible.cmp(&a.disponible),
            SortKey::Banco => none_last(
                a.banco_nombre.as_deref().map(str::to_lowercase),
                b.banco_nombre.as_deref().map(str::to_lowercase),
            ),
        }
    }
}

fn none_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
