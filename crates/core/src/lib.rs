//! # ER Core
//!
//! Core logic for a single-doctor emergency room where a new arrival can interrupt the patient
//! currently being treated.
//!
//! - [`HoldingStack`]: bounded last-in-first-out store of suspended patients
//! - [`TreatmentController`]: the active slot, admission and completion
//! - [`TreatmentService`]: a lock around one controller for multi-threaded drivers
//!
//! **No I/O**: prompting, rendering, id allocation and HTTP belong to the driver crates
//! (`er-cli`, `api-rest`). The core only moves [`Patient`] values between slots.

pub mod config;
pub mod constants;
pub mod error;
pub mod holding;
pub mod patient;
pub mod service;
pub mod treatment;

pub use config::{CoreConfig, OverflowPolicy};
pub use constants::{DEFAULT_HOLDING_CAPACITY, DEFAULT_REST_ADDR};
pub use error::{TreatmentError, TreatmentResult};
pub use holding::HoldingStack;
pub use patient::Patient;
pub use service::TreatmentService;
pub use treatment::{Admission, Discharge, Snapshot, TreatmentController, TreatmentState};

pub use er_types::{NonEmptyText, PatientId, TextError};
