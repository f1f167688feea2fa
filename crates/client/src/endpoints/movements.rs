//! Bank movements.

use tesoreria_core::bank::{BankMovement, BankMovementInput, BankService, MovementFilter};
use tesoreria_shared::AppResult;

use super::banks::ACCOUNTS;
use crate::http::{ApiClient, Download};

const MOVEMENTS: &str = "banco-movimientos";

impl ApiClient {
    /// Lists movements matching `filter`.
    pub async fn list_movements(&self, filter: &MovementFilter) -> AppResult<Vec<BankMovement>> {
        self.get(MOVEMENTS, filter).await
    }

    /// Records a movement. Account balances change, so account lists are dropped.
    pub async fn create_movement(&self, input: &BankMovementInput) -> AppResult<BankMovement> {
        BankService::validate_movement(input)?;
        let movement = self.post(MOVEMENTS, input).await?;
        self.cache().invalidate_resource(ACCOUNTS);
        Ok(movement)
    }

    /// Downloads the movements matching `filter` as CSV.
    pub async fn export_movements(&self, filter: &MovementFilter) -> AppResult<Download> {
        self.download(&format!("{MOVEMENTS}/export.csv"), filter)
            .await
    }
}
