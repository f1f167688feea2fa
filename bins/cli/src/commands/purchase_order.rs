//! Purchase order commands.

use chrono::NaiveDate;
use clap::Subcommand;

use tesoreria_client::ApiClient;
use tesoreria_core::purchase_order::{PurchaseOrderStatus, order_totals};
use tesoreria_shared::types::OrdenCompraId;

use super::{non_blank, print_json};

#[derive(Debug, Subcommand)]
pub enum PurchaseOrderCommand {
    /// Shows an order with its estimated totals.
    Ver {
        /// Order id.
        id: i64,
    },
    /// Moves an order to another status.
    Estado {
        /// Order id.
        id: i64,
        /// Target status, e.g. PENDING_APPROVAL or APPROVED.
        #[arg(value_parser = parse_status)]
        estado: PurchaseOrderStatus,
        /// Reason for the change.
        #[arg(long)]
        motivo: Option<String>,
    },
    /// Generates the purchase of an approved order, closing it.
    GenerarCompra {
        /// Order id.
        id: i64,
        /// Purchase date; today when omitted.
        #[arg(long)]
        fecha: Option<NaiveDate>,
        /// Invoice number.
        #[arg(long)]
        comprobante: Option<String>,
    },
}

fn parse_status(s: &str) -> Result<PurchaseOrderStatus, String> {
    PurchaseOrderStatus::parse(s).ok_or_else(|| format!("unknown status: {s}"))
}

pub async fn run(client: &ApiClient, cmd: PurchaseOrderCommand) -> anyhow::Result<()> {
    match cmd {
        PurchaseOrderCommand::Ver { id } => {
            let order = client.get_purchase_order(OrdenCompraId::new(id)).await?;
            print_json(&order)?;
            let totals = order_totals(&order.lineas)?;
            println!(
                "neto {} iva {} total {} {}",
                totals.neto, totals.iva, totals.total, order.moneda
            );
            Ok(())
        }
        PurchaseOrderCommand::Estado { id, estado, motivo } => {
            let current = client.get_purchase_order(OrdenCompraId::new(id)).await?;
            let updated = client
                .change_purchase_order_status(&current, estado, non_blank(motivo))
                .await?;
            print_json(&updated)
        }
        PurchaseOrderCommand::GenerarCompra {
            id,
            fecha,
            comprobante,
        } => {
            let current = client.get_purchase_order(OrdenCompraId::new(id)).await?;
            let fecha = fecha.unwrap_or_else(|| chrono::Local::now().date_naive());
            let generated = client
                .generate_purchase(&current, fecha, non_blank(comprobante))
                .await?;
            println!("compra {}", generated.compra_id);
            Ok(())
        }
    }
}
