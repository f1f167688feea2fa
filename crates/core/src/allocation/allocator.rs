//! Payment allocator.
//!
//! Splits a target total across candidate cheques. Every operation keeps
//! `0 <= asignado_i <= disponible_i` and `sum(asignado) <= target`.

use std::collections::HashSet;

use tesoreria_shared::types::{Cents, ChequeId};

use super::batch::{ApplicationPlan, BatchId, PaymentReference};
use super::error::AllocationError;
use super::types::{AllocationCandidate, AllocationRow, SortPolicy};

/// Allocation grid for one payment.
#[derive(Debug, Clone)]
pub struct PaymentAllocator {
    target: Cents,
    policy: SortPolicy,
    rows: Vec<AllocationRow>,
}

impl PaymentAllocator {
    /// Creates an allocator with every row at zero, sorted by `policy`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is negative or a cheque repeats.
    pub fn new(
        target: Cents,
        candidates: Vec<AllocationCandidate>,
        policy: SortPolicy,
    ) -> Result<Self, AllocationError> {
        if target.is_negative() {
            return Err(AllocationError::NegativeTarget(target));
        }
        let mut seen = HashSet::with_capacity(candidates.len());
        for candidate in &candidates {
            if !seen.insert(candidate.cheque_id) {
                return Err(AllocationError::DuplicateCheque(candidate.cheque_id));
            }
        }

        let rows = candidates
            .into_iter()
            .enumerate()
            .map(|(index, mut candidate)| {
                candidate.disponible = candidate.disponible.non_negative();
                AllocationRow {
                    index,
                    candidate,
                    asignado: Cents::ZERO,
                }
            })
            .collect();

        let mut allocator = Self {
            target,
            policy,
            rows,
        };
        allocator.sort();
        Ok(allocator)
    }

    /// Target total.
    #[must_use]
    pub fn target(&self) -> Cents {
        self.target
    }

    /// Active sort policy.
    #[must_use]
    pub fn policy(&self) -> SortPolicy {
        self.policy
    }

    /// Rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[AllocationRow] {
        &self.rows
    }

    /// Sum of all allocations.
    #[must_use]
    pub fn allocated(&self) -> Cents {
        self.rows.iter().map(|r| r.asignado).sum()
    }

    /// Amount of the target not yet allocated.
    #[must_use]
    pub fn remaining(&self) -> Cents {
        self.target.saturating_sub(self.allocated()).non_negative()
    }

    /// Allocation for a cheque, if it is part of the grid.
    #[must_use]
    pub fn allocation_for(&self, cheque_id: ChequeId) -> Option<Cents> {
        self.rows
            .iter()
            .find(|r| r.candidate.cheque_id == cheque_id)
            .map(|r| r.asignado)
    }

    /// Re-sorts the rows. Allocations are kept.
    pub fn set_policy(&mut self, policy: SortPolicy) {
        self.policy = policy;
        self.sort();
    }

    /// Highest amount the row may hold given every other row.
    ///
    /// # Errors
    ///
    /// Returns an error if the cheque is not in the grid.
    pub fn capacity(&self, cheque_id: ChequeId) -> Result<Cents, AllocationError> {
        let pos = self.position(cheque_id)?;
        Ok(self.capacity_at(pos))
    }

    /// Sets a row from operator text, clamping into range.
    ///
    /// Returns the amount actually stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not an amount or the cheque is unknown.
    pub fn set_manual(&mut self, cheque_id: ChequeId, input: &str) -> Result<Cents, AllocationError> {
        let amount = Cents::parse(input)?;
        self.set_amount(cheque_id, amount)
    }

    /// Sets a row to `amount`, clamped to `[0, capacity]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cheque is unknown.
    pub fn set_amount(&mut self, cheque_id: ChequeId, amount: Cents) -> Result<Cents, AllocationError> {
        let pos = self.position(cheque_id)?;
        let stored = amount.non_negative().min(self.capacity_at(pos));
        self.rows[pos].asignado = stored;
        Ok(stored)
    }

    /// Sets a row to its full capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if the cheque is unknown.
    pub fn max_row(&mut self, cheque_id: ChequeId) -> Result<Cents, AllocationError> {
        let pos = self.position(cheque_id)?;
        let stored = self.capacity_at(pos);
        self.rows[pos].asignado = stored;
        Ok(stored)
    }

    /// Tops one row up with whatever is still unallocated, bounded by its
    /// own unallocated balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the cheque is unknown.
    pub fn fill_remainder(&mut self, cheque_id: ChequeId) -> Result<Cents, AllocationError> {
        let pos = self.position(cheque_id)?;
        let extra = self.rows[pos]
            .unallocated_balance()
            .min(self.remaining())
            .non_negative();
        self.rows[pos].asignado += extra;
        Ok(self.rows[pos].asignado)
    }

    /// Clears the grid and distributes the target greedily in display order.
    pub fn auto_distribute(&mut self) {
        self.clear();
        let mut remaining = self.target.non_negative();
        for row in &mut self.rows {
            if !remaining.is_positive() {
                break;
            }
            let extra = row.unallocated_balance().min(remaining);
            row.asignado += extra;
            remaining -= extra;
        }
    }

    /// Sets every row to zero.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.asignado = Cents::ZERO;
        }
    }

    /// Whether the allocation may be confirmed.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        self.target.is_positive()
            && self.allocated() == self.target
            && self.rows.iter().all(|r| !r.asignado.is_negative())
    }

    /// Builds the submission plan for a confirmed allocation.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::NotBalanced`] if the gate is closed.
    pub fn plan(
        &self,
        batch_id: BatchId,
        referencia: Option<PaymentReference>,
    ) -> Result<ApplicationPlan, AllocationError> {
        if !self.can_confirm() {
            return Err(AllocationError::NotBalanced {
                allocated: self.allocated(),
                target: self.target,
            });
        }
        Ok(ApplicationPlan::from_rows(batch_id, referencia, &self.rows))
    }

    fn sort(&mut self) {
        let policy = self.policy;
        self.rows.sort_by(|a, b| policy.compare(a, b));
    }

    fn position(&self, cheque_id: ChequeId) -> Result<usize, AllocationError> {
        self.rows
            .iter()
            .position(|r| r.candidate.cheque_id == cheque_id)
            .ok_or(AllocationError::UnknownCheque(cheque_id))
    }

    fn capacity_at(&self, pos: usize) -> Cents {
        let others: Cents = self
            .rows
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != pos)
            .map(|(_, r)| r.asignado)
            .sum();
        let headroom = self.target.saturating_sub(others).non_negative();
        self.rows[pos].candidate.disponible.min(headroom)
    }
}
