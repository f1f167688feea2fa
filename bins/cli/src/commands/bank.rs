//! Bank account and checkbook commands.

use chrono::NaiveDate;
use clap::Subcommand;

use tesoreria_client::{ApiClient, DeleteOutcome};
use tesoreria_core::bank::{BankAccountInput, CheckbookInput, MovementFilter};
use tesoreria_shared::AppError;
use tesoreria_shared::types::{BancoCuentaId, BancoId, ChequeraId, Currency};

use super::{non_blank, print_json};

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Lists accounts, optionally of one bank.
    Listar {
        /// Bank id.
        #[arg(long)]
        banco: Option<i64>,
    },
    /// Opens an account.
    Crear {
        /// Bank id.
        #[arg(long)]
        banco: i64,
        /// Display name.
        #[arg(long)]
        nombre: String,
        /// Currency.
        #[arg(long, default_value = "ARS")]
        moneda: Currency,
        /// Account number.
        #[arg(long)]
        numero: Option<String>,
        /// CBU.
        #[arg(long)]
        cbu: Option<String>,
        /// Alias.
        #[arg(long)]
        alias: Option<String>,
    },
    /// Shows an account with its balance and period summary.
    Ver {
        /// Account id.
        id: i64,
        /// Summary start.
        #[arg(long)]
        desde: Option<NaiveDate>,
        /// Summary end.
        #[arg(long)]
        hasta: Option<NaiveDate>,
    },
    /// Exports the account's movements as CSV.
    Exportar {
        /// Account id.
        id: i64,
    },
    /// Deletes an account; with `--forzar` a blocked delete deactivates it.
    Borrar {
        /// Account id.
        id: i64,
        /// Deactivate when the account has dependents.
        #[arg(long)]
        forzar: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum CheckbookCommand {
    /// Lists checkbooks of an account.
    Listar {
        /// Account id.
        #[arg(long)]
        cuenta: Option<i64>,
    },
    /// Registers a checkbook.
    Crear {
        /// Account id.
        #[arg(long)]
        cuenta: i64,
        /// First cheque number.
        #[arg(long)]
        desde: i64,
        /// Last cheque number.
        #[arg(long)]
        hasta: i64,
        /// Next number to issue; the first one when omitted.
        #[arg(long)]
        proximo: Option<i64>,
        /// Retry with the free range the backend suggests on overlap.
        #[arg(long)]
        aceptar_sugerencia: bool,
    },
    /// Deletes a checkbook; with `--forzar` a blocked delete deactivates it.
    Borrar {
        /// Checkbook id.
        id: i64,
        /// Deactivate when cheques were issued from it.
        #[arg(long)]
        forzar: bool,
    },
}

fn report_delete(outcome: DeleteOutcome) {
    match outcome {
        DeleteOutcome::Deleted => println!("deleted"),
        DeleteOutcome::Deactivated => println!("deactivated"),
    }
}

fn confirm_force(forzar: bool) -> impl FnOnce(&AppError) -> bool {
    move |err| {
        if !forzar {
            eprintln!("{err}; pass --forzar to deactivate instead");
        }
        forzar
    }
}

pub async fn run_account(client: &ApiClient, cmd: AccountCommand) -> anyhow::Result<()> {
    match cmd {
        AccountCommand::Listar { banco } => {
            print_json(&client.list_accounts(banco.map(BancoId::new)).await?)
        }
        AccountCommand::Crear {
            banco,
            nombre,
            moneda,
            numero,
            cbu,
            alias,
        } => {
            let mut input = BankAccountInput::new(BancoId::new(banco), nombre);
            input.moneda = moneda;
            input.numero_cuenta = non_blank(numero);
            input.cbu = non_blank(cbu);
            input.alias = non_blank(alias);
            print_json(&client.create_account(&input).await?)
        }
        AccountCommand::Ver { id, desde, hasta } => {
            let id = BancoCuentaId::new(id);
            print_json(&client.get_account(id).await?)?;
            print_json(&client.account_balance(id).await?)?;
            print_json(&client.account_summary(id, desde, hasta).await?)
        }
        AccountCommand::Exportar { id } => {
            let filter = MovementFilter {
                banco_cuenta_id: Some(BancoCuentaId::new(id)),
                ..MovementFilter::default()
            };
            let download = client.export_movements(&filter).await?;
            print!("{}", String::from_utf8_lossy(&download.bytes));
            Ok(())
        }
        AccountCommand::Borrar { id, forzar } => {
            let outcome = client
                .delete_account(BancoCuentaId::new(id), confirm_force(forzar))
                .await?;
            report_delete(outcome);
            Ok(())
        }
    }
}

pub async fn run_checkbook(client: &ApiClient, cmd: CheckbookCommand) -> anyhow::Result<()> {
    match cmd {
        CheckbookCommand::Listar { cuenta } => {
            print_json(&client.list_checkbooks(cuenta.map(BancoCuentaId::new)).await?)
        }
        CheckbookCommand::Crear {
            cuenta,
            desde,
            hasta,
            proximo,
            aceptar_sugerencia,
        } => {
            let input = CheckbookInput {
                banco_cuenta_id: BancoCuentaId::new(cuenta),
                nro_desde: desde,
                nro_hasta: hasta,
                proximo_nro: proximo,
                usuario_log_id: None,
            };
            let checkbook = client
                .create_checkbook_guided(&input, |range| {
                    eprintln!(
                        "range overlaps; free range is {}-{}",
                        range.nro_desde, range.nro_hasta
                    );
                    aceptar_sugerencia
                })
                .await?;
            print_json(&checkbook)
        }
        CheckbookCommand::Borrar { id, forzar } => {
            let outcome = client
                .delete_checkbook(ChequeraId::new(id), confirm_force(forzar))
                .await?;
            report_delete(outcome);
            Ok(())
        }
    }
}
