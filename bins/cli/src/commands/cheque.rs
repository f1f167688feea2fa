//! Cheque commands.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use tesoreria_client::ApiClient;
use tesoreria_core::allocation::{
    AllocationCandidate, ApplicationPlan, BatchId, PaymentAllocator, PaymentReference, SortKey,
    SortPolicy,
};
use tesoreria_core::cheque::{ChequeAction, ChequeLifecycle, TransitionForm, TransitionGuard};
use tesoreria_core::document::{Disposition, ImageKind, ImageUpload, download_name};
use tesoreria_shared::types::{BancoCuentaId, Cents, ChequeId, ProveedorId};

use super::{non_blank, pending, print_json};

#[derive(Debug, Subcommand)]
pub enum ChequeCommand {
    /// Shows a cheque and the actions available from its state.
    Ver {
        /// Cheque id.
        id: i64,
    },
    /// Runs a lifecycle action on a cheque.
    Accion(TransitionArgs),
    /// Distributes an amount across cheques and applies it.
    Aplicar(ApplyArgs),
    /// Uploads an image or document.
    Subir(UploadArgs),
    /// Downloads an image or document.
    Bajar {
        /// Cheque id.
        id: i64,
        /// Image id.
        imagen: i64,
        /// Target directory.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Lists the cheque's history.
    Eventos {
        /// Cheque id.
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct TransitionArgs {
    /// Cheque id.
    id: i64,
    /// Action, e.g. `depositar` or `aplicar-a-proveedor`.
    #[arg(value_parser = parse_action)]
    accion: ChequeAction,
    /// Operation date; today when omitted.
    #[arg(long)]
    fecha: Option<NaiveDate>,
    /// Reason recorded with the new state.
    #[arg(long)]
    motivo: Option<String>,
    /// Destination bank account.
    #[arg(long)]
    cuenta: Option<i64>,
    /// Vendor receiving the cheque.
    #[arg(long)]
    proveedor: Option<i64>,
    /// Free-text recipient.
    #[arg(long)]
    destinatario: Option<String>,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Amount to settle, e.g. `1.500,00`.
    #[arg(long, value_parser = parse_amount, required_unless_present = "lote")]
    monto: Option<Cents>,
    /// Candidate cheque ids.
    #[arg(long, value_delimiter = ',', required_unless_present = "lote")]
    cheques: Vec<i64>,
    /// Row ordering: vencimiento, saldo or banco.
    #[arg(long, default_value = "vencimiento", value_parser = parse_sort_key)]
    orden: SortKey,
    /// Do not place credited cheques first.
    #[arg(long)]
    sin_acreditados_primero: bool,
    /// Document table the payment settles.
    #[arg(long, requires = "ref_id")]
    ref_tabla: Option<String>,
    /// Document id the payment settles.
    #[arg(long, requires = "ref_tabla")]
    ref_id: Option<i64>,
    /// Batch id of a halted run; re-sends its saved plan as is.
    #[arg(long, conflicts_with_all = ["monto", "cheques", "ref_tabla", "ref_id"])]
    lote: Option<BatchId>,
    /// Where halted batches are saved.
    #[arg(long, default_value = ".")]
    lotes_dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Cheque id.
    id: i64,
    /// File to upload.
    archivo: PathBuf,
    /// Scan kind: frente, dorso or otro.
    #[arg(long, default_value = "frente", value_parser = parse_image_kind)]
    tipo: ImageKind,
    /// Notes.
    #[arg(long)]
    observaciones: Option<String>,
}

fn parse_action(s: &str) -> Result<ChequeAction, String> {
    ChequeAction::parse(s).ok_or_else(|| format!("unknown action: {s}"))
}

fn parse_amount(s: &str) -> Result<Cents, String> {
    Cents::parse(s).map_err(|e| e.to_string())
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    SortKey::parse(s).ok_or_else(|| format!("unknown ordering: {s}"))
}

fn parse_image_kind(s: &str) -> Result<ImageKind, String> {
    ImageKind::parse(s).ok_or_else(|| format!("unknown image kind: {s}"))
}

fn mime_for(path: &std::path::Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

pub async fn run(client: &ApiClient, cmd: ChequeCommand) -> anyhow::Result<()> {
    match cmd {
        ChequeCommand::Ver { id } => {
            let cheque = client.get_cheque(ChequeId::new(id)).await?;
            print_json(&cheque)?;
            for action in ChequeLifecycle::available_actions(cheque.tipo, cheque.estado) {
                let check = TransitionGuard::validate(action, &cheque);
                let fields: Vec<_> = check
                    .required_fields
                    .iter()
                    .filter(|f| f.required)
                    .map(|f| format!("{:?}", f.field))
                    .collect();
                println!("  {action}: requires [{}]", fields.join(", "));
            }
            Ok(())
        }
        ChequeCommand::Accion(args) => transition(client, args).await,
        ChequeCommand::Aplicar(args) => apply(client, args).await,
        ChequeCommand::Subir(args) => {
            let bytes = std::fs::read(&args.archivo)
                .with_context(|| format!("reading {}", args.archivo.display()))?;
            let file_name = args
                .archivo
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("archivo")
                .to_string();
            let upload = ImageUpload {
                tipo: args.tipo,
                observaciones: non_blank(args.observaciones),
                file_name,
                mime_type: mime_for(&args.archivo).to_string(),
                bytes,
            };
            let image = client.upload_image(ChequeId::new(args.id), upload).await?;
            print_json(&image)
        }
        ChequeCommand::Bajar { id, imagen, dir } => {
            let download = client.download_image(ChequeId::new(id), imagen).await?;
            let name = match download.disposition(&format!("cheque-{id}-{imagen}")) {
                Disposition::SaveAs(name) => name,
                Disposition::Inline => download_name(
                    &download.mime_type,
                    download.file_name.as_deref(),
                    &format!("cheque-{id}-{imagen}"),
                ),
            };
            let path = dir.join(name);
            std::fs::write(&path, &download.bytes)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("{}", path.display());
            Ok(())
        }
        ChequeCommand::Eventos { id } => {
            let events = client.list_events(ChequeId::new(id)).await?;
            print_json(&events)
        }
    }
}

async fn transition(client: &ApiClient, args: TransitionArgs) -> anyhow::Result<()> {
    let cheque = client.get_cheque(ChequeId::new(args.id)).await?;
    let vendor_name = match cheque.proveedor_id {
        Some(id) if TransitionGuard::requires_vendor(args.accion, cheque.tipo) => {
            client.vendor_name(id).await.unwrap_or_default()
        }
        _ => None,
    };

    let mut form = TransitionForm::open(args.accion, &cheque, vendor_name.as_deref());
    form.fecha_operacion = args.fecha;
    form.motivo_estado = args.motivo;
    form.banco_cuenta_id = args.cuenta.map(BancoCuentaId::new);
    if let Some(proveedor) = args.proveedor {
        let id = ProveedorId::new(proveedor);
        let name = client.vendor_name(id).await.unwrap_or_default();
        form.select_vendor(id, name.as_deref());
    }
    if let Some(destinatario) = args.destinatario {
        form.set_destinatario(destinatario);
    }

    let updated = client.transition_cheque(args.accion, &cheque, &form).await?;
    print_json(&updated)
}

async fn apply(client: &ApiClient, args: ApplyArgs) -> anyhow::Result<()> {
    let plan = match args.lote {
        Some(batch_id) => pending::load(&args.lotes_dir, batch_id)?,
        None => allocate(client, &args).await?,
    };

    match client.apply_plan(&plan).await {
        Ok(report) => {
            pending::discard(&args.lotes_dir, plan.batch_id);
            println!("lote {}: {} aplicado", report.batch_id, report.total());
            Ok(())
        }
        Err(failure) => {
            for applied in &failure.applied {
                println!("aplicado #{} {}", applied.numero, applied.monto);
            }
            let saved = pending::save(&args.lotes_dir, &plan)?;
            eprintln!(
                "batch saved to {}; retry with --lote {}",
                saved.display(),
                failure.batch_id
            );
            Err(failure.into())
        }
    }
}

async fn allocate(client: &ApiClient, args: &ApplyArgs) -> anyhow::Result<ApplicationPlan> {
    let monto = args.monto.context("--monto is required")?;
    let mut candidates = Vec::with_capacity(args.cheques.len());
    for id in &args.cheques {
        let cheque = client.get_cheque(ChequeId::new(*id)).await?;
        candidates.push(AllocationCandidate::from(&cheque));
    }
    let policy = SortPolicy {
        key: args.orden,
        credited_first: !args.sin_acreditados_primero,
    };

    let mut allocator = PaymentAllocator::new(monto, candidates, policy)?;
    allocator.auto_distribute();
    for row in allocator.rows() {
        println!(
            "#{:<10} disponible {:>14} asignado {:>14}",
            row.candidate.numero, row.candidate.disponible, row.asignado
        );
    }

    let referencia = args
        .ref_tabla
        .clone()
        .zip(args.ref_id)
        .map(|(tabla, id)| PaymentReference { tabla, id });
    Ok(allocator.plan(BatchId::new(), referencia)?)
}
