//! Purchase orders.

use chrono::NaiveDate;
use serde::Serialize;

use tesoreria_core::purchase_order::{
    GeneratedPurchase, PurchaseOrder, PurchaseOrderInput, PurchaseOrderService,
    PurchaseOrderStatus,
};
use tesoreria_shared::AppResult;
use tesoreria_shared::types::{OrdenCompraId, ProveedorId};

use crate::http::{ApiClient, NO_QUERY};

const ORDERS: &str = "ordenes-compra";

/// Filters for `GET /ordenes-compra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurchaseOrderFilter {
    /// Vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proveedor_id: Option<ProveedorId>,
    /// Status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<PurchaseOrderStatus>,
}

impl ApiClient {
    /// Lists purchase orders.
    pub async fn list_purchase_orders(
        &self,
        filter: &PurchaseOrderFilter,
    ) -> AppResult<Vec<PurchaseOrder>> {
        self.get(ORDERS, filter).await
    }

    /// Fetches one order with its lines.
    pub async fn get_purchase_order(&self, id: OrdenCompraId) -> AppResult<PurchaseOrder> {
        self.get(&format!("{ORDERS}/{id}"), NO_QUERY).await
    }

    /// Creates an order in DRAFT.
    pub async fn create_purchase_order(&self, input: &PurchaseOrderInput) -> AppResult<PurchaseOrder> {
        PurchaseOrderService::validate(input)?;
        self.post(ORDERS, input).await
    }

    /// Replaces header and lines. Only DRAFT orders accept line changes.
    pub async fn update_purchase_order(
        &self,
        current: &PurchaseOrder,
        input: &PurchaseOrderInput,
    ) -> AppResult<PurchaseOrder> {
        PurchaseOrderService::ensure_lines_editable(current.estado)?;
        PurchaseOrderService::validate(input)?;
        self.put(&format!("{ORDERS}/{}", current.id), input).await
    }

    /// Deletes an order.
    pub async fn delete_purchase_order(&self, id: OrdenCompraId) -> AppResult<()> {
        self.delete(&format!("{ORDERS}/{id}"), false).await
    }

    /// Moves an order to `to`. CLOSED is only reached by generating a purchase.
    pub async fn change_purchase_order_status(
        &self,
        current: &PurchaseOrder,
        to: PurchaseOrderStatus,
        motivo: Option<String>,
    ) -> AppResult<PurchaseOrder> {
        let change =
            PurchaseOrderService::change_status(current.estado, to, motivo, self.usuario_id())?;
        tracing::info!(
            id = %current.id,
            from = %current.estado,
            to = %to,
            "purchase order status change"
        );
        self.put(&format!("{ORDERS}/{}/estado", current.id), &change)
            .await
    }

    /// Generates the purchase for an APPROVED order, closing it.
    pub async fn generate_purchase(
        &self,
        current: &PurchaseOrder,
        fecha: NaiveDate,
        nro_comprobante: Option<String>,
    ) -> AppResult<GeneratedPurchase> {
        let request = PurchaseOrderService::generate_purchase(
            current.estado,
            fecha,
            nro_comprobante,
            self.usuario_id(),
        )?;
        let generated: GeneratedPurchase = self
            .post(&format!("{ORDERS}/{}/generar-compra", current.id), &request)
            .await?;
        tracing::info!(id = %current.id, compra_id = %generated.compra_id, "purchase generated");
        Ok(generated)
    }
}
