//! # gather-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `EventStore` — find and mutate events and their registrations
//!   - `Notifier` — deliver single and bulk outbound messages
//! - Define **driving/inbound ports** as use-case structs:
//!   - `UpcomingEventSelector` — pick active events inside a time window
//!   - `RegistrationVerifier` — code verification state machine
//!   - `ReminderDispatcher` — per-event bulk sends with aggregation
//! - Provide the **reminder scheduler** (recurring tick, no IO of its own)
//! - Orchestrate domain objects without knowing *how* persistence or
//!   message delivery works
//!
//! ## Dependency rule
//! Depends on `gather-domain` only (plus `tokio::sync`/`tokio::time` for
//! the scheduler). Never imports adapter crates. Adapters depend on *this*
//! crate, not the reverse.

pub mod ports;
pub mod scheduler;
pub mod services;
