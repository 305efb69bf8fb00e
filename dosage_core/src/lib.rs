#![forbid(unsafe_code)]

//! Core domain model and calculation logic for the dosage calculator.
//!
//! This crate provides:
//! - Domain types (weight units, medication forms, frequencies, results)
//! - Dosage engine and safety threshold check
//! - Form state with Calculate/Reset semantics
//! - Result rendering, configuration, and logging setup

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod safety;
pub mod engine;
pub mod form;
pub mod report;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::{compute, compute_with_limit};
pub use form::DosageForm;
pub use safety::MAX_SAFE_DAILY_DOSE_MG;
