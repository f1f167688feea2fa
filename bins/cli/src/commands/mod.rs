//! Subcommand handlers.
//!
//! # Modules
//!
//! - `cheque` - Transitions, images and payment batches
//! - `stock` - Stock movement entry, notes and reversal
//! - `bank` - Bank accounts and checkbooks
//! - `purchase_order` - Purchase order status and purchase generation

pub mod bank;
pub mod cheque;
mod pending;
pub mod purchase_order;
pub mod stock;

use serde::Serialize;

/// Prints `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Blank text counts as absent.
pub(crate) fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
