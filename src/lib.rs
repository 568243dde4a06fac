//! inplay-cashout: hold / cash-out decisions for live in-play lay positions
//!
//! This library provides:
//! - Snapshot parsing from raw text fields
//! - Momentum tracking over a bounded, exponentially weighted history
//! - Goal probability and expected value estimation
//! - An ordered override rule cascade producing the decision
//! - Per-position sessions with display rendering
//! - JSON-lines event sources for replay and live use
//! - Structured logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod decision;
pub mod momentum;
pub mod session;
pub mod snapshot;
pub mod source;
pub mod telemetry;
