//! # gather-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the [`EventStore`](gather_app::ports::EventStore) port
//! - Manage the `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain aggregates and database rows
//!
//! ## Dependency rule
//! Depends on `gather-app` (for port traits) and `gather-domain` (for domain
//! types). The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod event_repo;
pub mod pool;
