//! # gather-domain
//!
//! Pure domain model for the gather event registration system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Events** (scheduled gatherings with a seat capacity and an
//!   embedded, ordered list of participants)
//! - Define **Registrations** (participants with a pending → active
//!   verification lifecycle and a time-limited verification code)
//! - Define **Dispatch reports** (transient per-run accounting of bulk
//!   reminder sends)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod registration;
pub mod report;
