//! Purchase orders.
//!
//! # Modules
//!
//! - `types` - Order, line and request types
//! - `error` - Purchase order error types
//! - `service` - Status transitions, line editing and purchase generation gates
//! - `totals` - Estimated totals in integer cents

pub mod error;
pub mod service;
pub mod totals;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::PurchaseOrderError;
pub use service::PurchaseOrderService;
pub use totals::{LineTotals, OrderTotals, line_totals, order_totals};
pub use types::{
    GeneratePurchase, GeneratedPurchase, PurchaseOrder, PurchaseOrderInput, PurchaseOrderLine,
    PurchaseOrderStatus, StatusChange,
};
