//! Input validation for banks, accounts, checkbooks and movements.

use super::error::BankError;
use super::types::{BankAccountInput, BankInput, BankMovementInput, CheckbookInput};

/// Stateless validation service for bank records.
pub struct BankService;

impl BankService {
    /// Validates a bank.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank.
    pub fn validate_bank(input: &BankInput) -> Result<(), BankError> {
        if input.nombre.trim().is_empty() {
            return Err(BankError::BankNameRequired);
        }
        Ok(())
    }

    /// Validates a bank account.
    ///
    /// # Errors
    ///
    /// Returns an error if the bank or name is missing, or the CBU is malformed.
    pub fn validate_account(input: &BankAccountInput) -> Result<(), BankError> {
        if !input.banco_id.is_valid() {
            return Err(BankError::BankRequired);
        }
        if input.nombre_cuenta.trim().is_empty() {
            return Err(BankError::AccountNameRequired);
        }
        if let Some(cbu) = input.cbu.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            if cbu.len() != 22 || !cbu.bytes().all(|b| b.is_ascii_digit()) {
                return Err(BankError::InvalidCbu);
            }
        }
        Ok(())
    }

    /// Validates a checkbook range.
    ///
    /// `nro_hasta >= nro_desde > 0`, and `proximo_nro` within the range when given.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate_checkbook(input: &CheckbookInput) -> Result<(), BankError> {
        if !input.banco_cuenta_id.is_valid() {
            return Err(BankError::AccountRequired);
        }
        let (desde, hasta) = (input.nro_desde, input.nro_hasta);
        if desde <= 0 {
            return Err(BankError::InvalidRangeStart(desde));
        }
        if hasta < desde {
            return Err(BankError::InvalidRange { desde, hasta });
        }
        if let Some(proximo) = input.proximo_nro {
            if !(desde..=hasta).contains(&proximo) {
                return Err(BankError::NextOutOfRange {
                    proximo,
                    desde,
                    hasta,
                });
            }
        }
        Ok(())
    }

    /// Validates a manual bank movement.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing or the amount is not positive.
    pub fn validate_movement(input: &BankMovementInput) -> Result<(), BankError> {
        if !input.banco_cuenta_id.is_valid() {
            return Err(BankError::AccountRequired);
        }
        if !input.monto.is_positive() {
            return Err(BankError::InvalidAmount);
        }
        Ok(())
    }
}
