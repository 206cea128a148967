//! Application services — one use-case struct per inbound port.

pub mod dispatcher;
pub mod selector;
pub mod verifier;
