//! Patient id allocation.
//!
//! The treatment controller never invents identifiers; each admission arrives with an id that the
//! driver (CLI menu, REST handler) has already allocated. This crate provides that allocation.
//!
//! ## Id form
//! - Integers in `1000..=9999`, so every id prints as exactly four digits
//! - Unique per generator instance: an id handed out once is never handed out again
//!
//! ## Generators
//! - [`RandomIdGenerator`] draws uniformly from the range and retries on collision. Seed it with
//!   [`RandomIdGenerator::with_rng`] for reproducible runs.
//! - [`SequentialIdGenerator`] counts upward from the bottom of the range.
//!
//! Both stop with [`IdError::Exhausted`] once the range has been used up.

mod generator;

pub use generator::{PatientIdGenerator, RandomIdGenerator, SequentialIdGenerator};

/// Smallest id a generator will hand out.
pub const MIN_PATIENT_ID: u32 = 1000;

/// Largest id a generator will hand out.
pub const MAX_PATIENT_ID: u32 = 9999;

/// Error type for id allocation.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Every id in the range has already been issued by this generator
    #[error("patient id range exhausted after {issued} admissions")]
    Exhausted { issued: usize },
    /// Invalid input provided
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for id operations.
pub type IdResult<T> = Result<T, IdError>;
