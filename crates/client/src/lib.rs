//! Typed REST client for the Tesoreria back-office API.
//!
//! Every mutating call runs the core validation first, so requests the
//! backend would reject for missing fields are never sent.
//!
//! # Modules
//!
//! - `http` - Base URL, timeouts, acting-user injection and error mapping
//! - `cache` - Read-through cache for lookup lists
//! - `endpoints` - Methods per resource family

pub mod cache;
pub mod endpoints;
pub mod http;

pub use cache::LookupCache;
pub use endpoints::DeleteOutcome;
pub use endpoints::applications::{AppliedApplication, BatchFailure, BatchReport};
pub use http::{ApiClient, Download};
