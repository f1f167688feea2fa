//! Core business logic for Tesoreria.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `cheque` - Cheque lifecycle and the transition guard
//! - `allocation` - Payment allocation across cheques and batch plans
//! - `stock` - Stock movement validation and reversal
//! - `purchase_order` - Purchase order status rules and estimated totals
//! - `bank` - Bank accounts, checkbooks and conflict recovery
//! - `document` - Cheque images and download naming

pub mod allocation;
pub mod bank;
pub mod cheque;
pub mod document;
pub mod purchase_order;
pub mod stock;
