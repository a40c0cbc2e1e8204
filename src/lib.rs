//! lerad - rule learning for anomaly detection over categorical records
//!
//! This library learns conjunctive `IF ... THEN attribute IN {values}` rules
//! from sampled pairs of normal training cases, prunes them by coverage and
//! against held-out validation cases, and scores new case sequences by the
//! rules they violate.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod learning;
pub mod model_store;
pub mod prediction;
pub mod report;
pub mod rule;

pub use error::{LeradError, Result};
