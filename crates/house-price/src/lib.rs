//! Residential price estimation: form normalization, model inference, and
//! human-readable pricing factors.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod valuation;
