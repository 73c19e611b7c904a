//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `admin.rs` — maintenance/bypass operator commands (no content loading).
//! - `runtime.rs` — route/list/validate against the loaded content store.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod admin;
pub mod runtime;

pub use admin::handle_gate_commands;
pub use runtime::handle_runtime_commands;
