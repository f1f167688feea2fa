//! Banks and bank accounts.

use chrono::NaiveDate;
use serde::Serialize;

use tesoreria_core::bank::{
    AccountBalance, AccountSummary, Bank, BankAccount, BankAccountInput, BankInput, BankService,
};
use tesoreria_shared::{AppError, AppResult};
use tesoreria_shared::types::{BancoCuentaId, BancoId};

use super::DeleteOutcome;
use crate::http::{ApiClient, NO_QUERY};

/// Lookup resource for banks.
pub const BANKS: &str = "bancos";
/// Lookup resource for bank accounts.
pub const ACCOUNTS: &str = "banco-cuentas";

#[derive(Serialize)]
struct AccountQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    banco_id: Option<BancoId>,
}

#[derive(Serialize)]
struct PeriodQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    desde: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hasta: Option<NaiveDate>,
}

impl ApiClient {
    /// Lists banks.
    pub async fn list_banks(&self) -> AppResult<Vec<Bank>> {
        self.get_cached(BANKS, BANKS, NO_QUERY).await
    }

    /// Creates a bank.
    pub async fn create_bank(&self, input: &BankInput) -> AppResult<Bank> {
        BankService::validate_bank(input)?;
        let bank = self.post(BANKS, input).await?;
        self.cache().invalidate_resource(BANKS);
        Ok(bank)
    }

    /// Updates a bank.
    pub async fn update_bank(&self, id: BancoId, input: &BankInput) -> AppResult<Bank> {
        BankService::validate_bank(input)?;
        let bank = self.put(&format!("{BANKS}/{id}"), input).await?;
        self.cache().invalidate_resource(BANKS);
        Ok(bank)
    }

    /// Deletes a bank, deactivating it when `confirm_force` accepts.
    pub async fn delete_bank<F>(&self, id: BancoId, confirm_force: F) -> AppResult<DeleteOutcome>
    where
        F: FnOnce(&AppError) -> bool,
    {
        self.delete_or_deactivate(BANKS, &format!("{BANKS}/{id}"), confirm_force)
            .await
    }

    /// Lists bank accounts, optionally for one bank.
    pub async fn list_accounts(&self, banco_id: Option<BancoId>) -> AppResult<Vec<BankAccount>> {
        self.get_cached(ACCOUNTS, ACCOUNTS, &AccountQuery { banco_id })
            .await
    }

    /// Fetches one bank account.
    pub async fn get_account(&self, id: BancoCuentaId) -> AppResult<BankAccount> {
        self.get(&format!("{ACCOUNTS}/{id}"), NO_QUERY).await
    }

    /// Creates a bank account.
    pub async fn create_account(&self, input: &BankAccountInput) -> AppResult<BankAccount> {
        BankService::validate_account(input)?;
        let account = self.post(ACCOUNTS, input).await?;
        self.cache().invalidate_resource(ACCOUNTS);
        tracing::info!(banco_id = %input.banco_id, "bank account created");
        Ok(account)
    }

    /// Updates a bank account.
    pub async fn update_account(
        &self,
        id: BancoCuentaId,
        input: &BankAccountInput,
    ) -> AppResult<BankAccount> {
        BankService::validate_account(input)?;
        let account = self.put(&format!("{ACCOUNTS}/{id}"), input).await?;
        self.cache().invalidate_resource(ACCOUNTS);
        Ok(account)
    }

    /// Deletes a bank account, deactivating it when `confirm_force` accepts.
    pub async fn delete_account<F>(
        &self,
        id: BancoCuentaId,
        confirm_force: F,
    ) -> AppResult<DeleteOutcome>
    where
        F: FnOnce(&AppError) -> bool,
    {
        self.delete_or_deactivate(ACCOUNTS, &format!("{ACCOUNTS}/{id}"), confirm_force)
            .await
    }

    /// Current balance of an account.
    pub async fn account_balance(&self, id: BancoCuentaId) -> AppResult<AccountBalance> {
        self.get(&format!("{ACCOUNTS}/{id}/saldo"), NO_QUERY).await
    }

    /// Opening balance, credits, debits and closing balance for a period.
    pub async fn account_summary(
        &self,
        id: BancoCuentaId,
        desde: Option<NaiveDate>,
        hasta: Option<NaiveDate>,
    ) -> AppResult<AccountSummary> {
        let summary: AccountSummary = self
            .get(&format!("{ACCOUNTS}/{id}/resumen"), &PeriodQuery { desde, hasta })
            .await?;
        if !summary.is_consistent() {
            tracing::warn!(banco_cuenta_id = %id, "account summary does not add up");
        }
        Ok(summary)
    }
}
