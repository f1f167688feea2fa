//! Stock movement commands.

use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use tesoreria_client::ApiClient;
use tesoreria_client::endpoints::stock::StockFilter;
use tesoreria_core::stock::{StockMovementDraft, StockMovementValidator, ValidationReport};
use tesoreria_shared::types::{ProductoId, StockMovimientoId};

use super::{non_blank, print_json};

#[derive(Debug, Subcommand)]
pub enum StockCommand {
    /// Lists movements of a product.
    Listar {
        /// Product id.
        #[arg(long)]
        producto: Option<i64>,
    },
    /// Records a movement.
    Crear(DraftArgs),
    /// Checks a movement without sending it.
    Validar(DraftArgs),
    /// Replaces a movement's notes; omit the text to clear them.
    Notas {
        /// Movement id.
        id: i64,
        /// New notes.
        texto: Option<String>,
    },
    /// Records the compensating adjustment of a movement.
    Revertir {
        /// Movement id.
        id: i64,
        /// Reason, stored as the reversal's notes.
        #[arg(long)]
        motivo: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct DraftArgs {
    /// Product id.
    #[arg(long)]
    producto: Option<i64>,
    /// Store location id.
    #[arg(long)]
    local: Option<i64>,
    /// Place inside the location.
    #[arg(long)]
    lugar: Option<i64>,
    /// Stock condition.
    #[arg(long)]
    estado: Option<i64>,
    /// Movement kind, e.g. PURCHASE or ADJUSTMENT.
    #[arg(long)]
    tipo: String,
    /// Quantity change; negative for outgoing goods.
    #[arg(long, allow_negative_numbers = true)]
    delta: i64,
    /// Net unit cost.
    #[arg(long)]
    costo: Option<Decimal>,
    /// Cost currency.
    #[arg(long)]
    moneda: Option<String>,
    /// Source table.
    #[arg(long)]
    ref_tabla: Option<String>,
    /// Source record.
    #[arg(long)]
    ref_id: Option<i64>,
    /// Notes.
    #[arg(long)]
    notas: Option<String>,
}

impl From<DraftArgs> for StockMovementDraft {
    fn from(args: DraftArgs) -> Self {
        Self {
            producto_id: args.producto,
            local_id: args.local,
            lugar_id: args.lugar,
            estado_id: args.estado,
            tipo: args.tipo,
            delta: args.delta,
            costo_unit_neto: args.costo,
            moneda: args.moneda,
            ref_tabla: non_blank(args.ref_tabla),
            ref_id: args.ref_id,
            notas: args.notas,
        }
    }
}

pub async fn run(client: &ApiClient, cmd: StockCommand) -> anyhow::Result<()> {
    match cmd {
        StockCommand::Listar { producto } => {
            let filter = StockFilter {
                producto_id: producto.map(ProductoId::new),
                ..StockFilter::default()
            };
            print_json(&client.list_stock_movements(&filter).await?)
        }
        StockCommand::Crear(args) => {
            let draft = StockMovementDraft::from(args);
            print_json(&client.create_stock_movement(&draft).await?)
        }
        StockCommand::Validar(args) => {
            let draft = StockMovementDraft::from(args);
            let report = ValidationReport::from(&StockMovementValidator::validate(&draft));
            print_json(&report)
        }
        StockCommand::Notas { id, texto } => {
            let updated = client
                .update_stock_notes(StockMovimientoId::new(id), texto.as_deref())
                .await?;
            print_json(&updated)
        }
        StockCommand::Revertir { id, motivo } => {
            let original = client.get_stock_movement(StockMovimientoId::new(id)).await?;
            let reversal = client
                .revert_stock_movement(&original, motivo.as_deref())
                .await?;
            print_json(&reversal)
        }
    }
}
