//! Rank lookups and score-distribution analytics over a static CASN exam
//! result dataset.

pub mod analytics;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ranking;
pub mod telemetry;
