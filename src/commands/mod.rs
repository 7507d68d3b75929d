//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `info.rs`: single and bulk metadata lookups.
//! - `serve.rs`: the `/fetch` HTTP endpoint.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate lookups, persistence and formatting to `gallery` and `services/*`.
//! - Keep behavior and output schema stable.

pub mod info;
pub mod serve;

pub use info::handle_info_command;
pub use serve::handle_serve_command;
