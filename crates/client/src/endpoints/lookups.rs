//! Read-only lists that fill selectors.
//!
//! The backend owns these records; they are returned as they come, with
//! only the fields selectors need typed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tesoreria_shared::AppResult;
use tesoreria_shared::types::{ClienteId, LocalId, ProductoId, ProveedorId, VentaId};

use crate::http::{ApiClient, NO_QUERY};

/// Text search accepted by the lookup endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupQuery {
    /// Free-text search.
    #[serde(rename = "q", skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Maximum rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// A customer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Customer {
    /// Backend id.
    pub id: ClienteId,
    /// Display name.
    #[serde(alias = "razon_social")]
    pub nombre: String,
}

/// A vendor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Vendor {
    /// Backend id.
    pub id: ProveedorId,
    /// Display name, used to prefill cheque recipients.
    #[serde(alias = "razon_social")]
    pub nombre: String,
}

/// A sale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sale {
    /// Backend id.
    pub id: VentaId,
    /// Customer.
    #[serde(default)]
    pub cliente_id: Option<ClienteId>,
    /// Sale date.
    #[serde(default)]
    pub fecha: Option<chrono::NaiveDate>,
}

/// A product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    /// Backend id.
    pub id: ProductoId,
    /// Display name.
    pub nombre: String,
}

/// A store location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Location {
    /// Backend id.
    pub id: LocalId,
    /// Display name.
    pub nombre: String,
}

/// An audit log entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuditLog {
    /// Backend id.
    pub id: i64,
    /// Affected table.
    #[serde(default)]
    pub tabla: Option<String>,
    /// Action recorded.
    #[serde(default)]
    pub accion: Option<String>,
    /// Recorded payload.
    #[serde(default)]
    pub detalle: Option<Value>,
    /// When it happened.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ApiClient {
    /// Customers.
    pub async fn list_customers(&self, query: &LookupQuery) -> AppResult<Vec<Customer>> {
        self.get_cached("clientes", "clientes", query).await
    }

    /// Vendors.
    pub async fn list_vendors(&self, query: &LookupQuery) -> AppResult<Vec<Vendor>> {
        self.get_cached("proveedores", "proveedores", query).await
    }

    /// Vendor display name, for prefilling recipients.
    pub async fn vendor_name(&self, id: ProveedorId) -> AppResult<Option<String>> {
        let vendors = self.list_vendors(&LookupQuery::default()).await?;
        Ok(vendors.into_iter().find(|v| v.id == id).map(|v| v.nombre))
    }

    /// Sales.
    pub async fn list_sales(&self, query: &LookupQuery) -> AppResult<Vec<Sale>> {
        self.get("ventas", query).await
    }

    /// Products.
    pub async fn list_products(&self, query: &LookupQuery) -> AppResult<Vec<Product>> {
        self.get_cached("productos", "productos", query).await
    }

    /// Store locations.
    pub async fn list_locations(&self) -> AppResult<Vec<Location>> {
        self.get_cached("locales", "locales", NO_QUERY).await
    }

    /// Audit log, newest first.
    pub async fn list_logs(&self, query: &LookupQuery) -> AppResult<Vec<AuditLog>> {
        self.get("logs", query).await
    }
}
