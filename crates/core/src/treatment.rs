//! The single-doctor treatment controller.
//!
//! One patient is treated at a time. Admitting a new patient while someone is being treated
//! suspends the current patient onto the [`HoldingStack`]; completing a treatment discharges the
//! active patient and resumes whoever was suspended most recently.
//!
//! ## States
//! - `Idle`: no active patient. The holding area is always empty here, because a completion only
//!   leaves the doctor idle once nobody is waiting.
//! - `Treating`: one active patient, zero or more suspended.
//!
//! ## Full holding area
//! What happens when an interruption finds the holding area full is decided by the configured
//! [`OverflowPolicy`]. Under either policy no record disappears without being handed back to the
//! caller.

use crate::config::{CoreConfig, OverflowPolicy};
use crate::holding::HoldingStack;
use crate::{Patient, TreatmentError, TreatmentResult};
use er_types::PatientId;
use serde::Serialize;

/// Coarse controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TreatmentState {
    Idle,
    Treating,
}

impl TreatmentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreatmentState::Idle => "idle",
            TreatmentState::Treating => "treating",
        }
    }
}

/// Outcome of a successful admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The doctor was idle; treatment started straight away.
    Started,
    /// The previous active patient was suspended on top of the holding area.
    Interrupted { suspended: PatientId },
    /// The holding area was full, so its oldest record was evicted before the previous active
    /// patient was suspended.
    InterruptedWithEviction {
        suspended: PatientId,
        evicted: Patient,
    },
}

impl Admission {
    /// Id of the patient moved into the holding area, if any.
    pub fn suspended(&self) -> Option<PatientId> {
        match self {
            Admission::Started => None,
            Admission::Interrupted { suspended }
            | Admission::InterruptedWithEviction { suspended, .. } => Some(*suspended),
        }
    }

    /// Record pushed out of the holding area, if any.
    pub fn evicted(&self) -> Option<&Patient> {
        match self {
            Admission::InterruptedWithEviction { evicted, .. } => Some(evicted),
            _ => None,
        }
    }
}

/// Outcome of a completed treatment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discharge {
    /// The patient whose treatment just finished.
    pub discharged: Patient,
    /// The patient taken back off the holding area, if anyone was waiting.
    pub resumed: Option<PatientId>,
}

/// Point-in-time copy of the controller state, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub active: Option<Patient>,
    /// Suspended patients, top of the holding area first.
    pub suspended: Vec<Patient>,
    pub capacity: usize,
}

impl Snapshot {
    pub fn state(&self) -> TreatmentState {
        if self.active.is_some() {
            TreatmentState::Treating
        } else {
            TreatmentState::Idle
        }
    }
}

#[derive(Debug, Clone)]
pub struct TreatmentController {
    active: Option<Patient>,
    holding: HoldingStack,
    overflow_policy: OverflowPolicy,
}

impl TreatmentController {
    /// Creates an idle controller using the configured capacity and overflow policy.
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            active: None,
            holding: HoldingStack::with_capacity(cfg.holding_capacity()),
            overflow_policy: cfg.overflow_policy(),
        }
    }

    /// Creates an idle controller that rejects admissions when the holding area is full.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            active: None,
            holding: HoldingStack::with_capacity(capacity),
            overflow_policy: OverflowPolicy::Reject,
        }
    }

    pub fn capacity(&self) -> usize {
        self.holding.capacity()
    }

    pub fn state(&self) -> TreatmentState {
        if self.active.is_some() {
            TreatmentState::Treating
        } else {
            TreatmentState::Idle
        }
    }

    /// The patient currently being treated.
    pub fn active(&self) -> Option<&Patient> {
        self.active.as_ref()
    }

    /// Whether the active slot is occupied, together with its occupant.
    pub fn current_state(&self) -> (bool, Option<&Patient>) {
        (self.active.is_some(), self.active.as_ref())
    }

    /// Suspended patients from top to bottom.
    pub fn stack_view(&self) -> impl DoubleEndedIterator<Item = &Patient> + ExactSizeIterator + '_ {
        self.holding.peek_all()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            active: self.active.clone(),
            suspended: self.holding.peek_all().cloned().collect(),
            capacity: self.holding.capacity(),
        }
    }

    /// Whether an admission right now would be accepted.
    ///
    /// False only while treating under [`OverflowPolicy::Reject`] with a full holding area.
    /// Drivers check this before allocating an id for the incoming patient.
    pub fn can_admit(&self) -> bool {
        self.active.is_none()
            || !self.holding.is_full()
            || self.overflow_policy == OverflowPolicy::EvictOldest
    }

    /// Starts treating `patient`, suspending whoever is currently active.
    ///
    /// # Errors
    ///
    /// Under [`OverflowPolicy::Reject`], returns `TreatmentError::CapacityExceeded` when the
    /// active patient cannot be suspended because the holding area is full. The controller is
    /// left exactly as it was and the error carries `patient` back to the caller.
    pub fn admit(&mut self, patient: Patient) -> TreatmentResult<Admission> {
        if !self.can_admit() {
            tracing::warn!(
                patient_id = %patient.id(),
                active_id = ?self.active.as_ref().map(Patient::id),
                capacity = self.holding.capacity(),
                "admission rejected: holding area full"
            );
            return Err(TreatmentError::CapacityExceeded {
                capacity: self.holding.capacity(),
                patient: Box::new(patient),
            });
        }

        let Some(current) = self.active.take() else {
            tracing::info!(patient_id = %patient.id(), "treatment started");
            self.active = Some(patient);
            return Ok(Admission::Started);
        };

        // Under `Reject` the holding area has room here, so nothing is evicted.
        let suspended = current.id();
        let admission = match self.holding.push_evicting_oldest(current) {
            Some(evicted) => {
                tracing::warn!(
                    evicted_id = %evicted.id(),
                    capacity = self.holding.capacity(),
                    "holding area full: oldest suspended patient evicted"
                );
                Admission::InterruptedWithEviction { suspended, evicted }
            }
            None => Admission::Interrupted { suspended },
        };

        tracing::info!(
            patient_id = %patient.id(),
            suspended_id = %suspended,
            waiting = self.holding.len(),
            "treatment interrupted"
        );
        self.active = Some(patient);
        Ok(admission)
    }

    /// Discharges the active patient and resumes the most recently suspended one.
    ///
    /// # Errors
    ///
    /// Returns `TreatmentError::NoActivePatient` when the doctor is idle. Nothing changes.
    pub fn complete_treatment(&mut self) -> TreatmentResult<Discharge> {
        let discharged = self.active.take().ok_or(TreatmentError::NoActivePatient)?;
        tracing::info!(patient_id = %discharged.id(), "patient discharged");

        self.active = self.holding.pop();
        let resumed = self.active.as_ref().map(Patient::id);
        match resumed {
            Some(id) => {
                tracing::info!(patient_id = %id, waiting = self.holding.len(), "treatment resumed")
            }
            None => tracing::info!("no suspended patients; doctor idle"),
        }

        Ok(Discharge {
            discharged,
            resumed,
        })
    }
}
