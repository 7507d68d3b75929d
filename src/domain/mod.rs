//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep the extracted record and report structs in one place.
//! - Avoid cyclic imports between the gallery client, services and commands.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs`: `AppRecord`, batch/summary report structs, `JsonOut`.
//! - `constants.rs`: upstream endpoints, layout ids and the source tag.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Changes in these structs affect `--json` output and the `/fetch` endpoint.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
