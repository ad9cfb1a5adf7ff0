//! Vendor evaluation and ranking engine for procurement quotations.
//!
//! The `quote` module holds the core pipeline: route estimation with a
//! geometric fallback, a landed-cost model, and multi-criteria ranking.
//! `config`, `telemetry`, and `error` carry the service plumbing shared
//! with the HTTP layer.

pub mod config;
pub mod error;
pub mod quote;
pub mod telemetry;
