//! Thread-safe handle to a single treatment controller.
//!
//! The controller itself is single-threaded. When several request handlers drive the same
//! emergency room, each operation takes the lock for its whole duration, so the suspend and
//! assign inside `admit` are never observed half-done.

use crate::{
    Admission, CoreConfig, Discharge, Patient, Snapshot, TreatmentController, TreatmentError,
    TreatmentResult,
};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Debug)]
pub struct TreatmentService {
    controller: Arc<Mutex<TreatmentController>>,
}

impl TreatmentService {
    pub fn new(cfg: &CoreConfig) -> Self {
        Self::from_controller(TreatmentController::new(cfg))
    }

    pub fn from_controller(controller: TreatmentController) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
        }
    }

    // Controller mutations never panic part-way, so a poisoned lock still guards a valid value.
    fn lock(&self) -> MutexGuard<'_, TreatmentController> {
        self.controller
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn admit(&self, patient: Patient) -> TreatmentResult<(Admission, Snapshot)> {
        let mut controller = self.lock();
        let admission = controller.admit(patient)?;
        Ok((admission, controller.snapshot()))
    }

    /// Admits the patient produced by `build`, calling it only once the admission is known to
    /// succeed.
    ///
    /// `build` runs under the lock, so nothing can fill the holding area between the check and
    /// the admission. Drivers allocate the patient id inside `build`; a refused admission then
    /// consumes no id.
    ///
    /// # Errors
    ///
    /// Returns `TreatmentError::HoldingAreaFull` (converted into `E`) without calling `build`
    /// when the admission would be refused, or whatever error `build` returns.
    pub fn admit_with<E, F>(&self, build: F) -> Result<(Patient, Admission, Snapshot), E>
    where
        E: From<TreatmentError>,
        F: FnOnce() -> Result<Patient, E>,
    {
        let mut controller = self.lock();
        if !controller.can_admit() {
            return Err(TreatmentError::HoldingAreaFull {
                capacity: controller.capacity(),
            }
            .into());
        }

        let patient = build()?;
        let admission = controller.admit(patient.clone())?;
        Ok((patient, admission, controller.snapshot()))
    }

    pub fn complete_treatment(&self) -> TreatmentResult<(Discharge, Snapshot)> {
        let mut controller = self.lock();
        let discharge = controller.complete_treatment()?;
        Ok((discharge, controller.snapshot()))
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }
}
