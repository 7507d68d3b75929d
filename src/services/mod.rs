//! Service layer containing side-effect helpers around the gallery client.
//!
//! ## Service map
//! - `config.rs`: settings from defaults, TOML file and environment.
//! - `batch.rs`: bounded worker pool for bulk lookups.
//! - `summary.rs`: append-only `summary.csv`.
//! - `observer.rs`: tracing and failure-log observers.
//! - `output.rs`: JSON/text output helpers.
//! - `server.rs`: axum router for `/` and `/fetch`.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod batch;
pub mod config;
pub mod observer;
pub mod output;
pub mod server;
pub mod summary;
