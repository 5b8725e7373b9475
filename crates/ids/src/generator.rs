//! Id generator implementations.

use crate::{IdError, IdResult, MAX_PATIENT_ID, MIN_PATIENT_ID};
use er_types::PatientId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const RANGE_LEN: usize = (MAX_PATIENT_ID - MIN_PATIENT_ID + 1) as usize;

/// Source of fresh patient ids.
pub trait PatientIdGenerator {
    /// Allocates the next id.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Exhausted`] when no unused id remains.
    fn next_id(&mut self) -> IdResult<PatientId>;
}

/// Draws ids uniformly at random from `MIN_PATIENT_ID..=MAX_PATIENT_ID`.
///
/// Every id issued is remembered so it is never repeated, even after the patient it was given to
/// has been discharged.
#[derive(Debug)]
pub struct RandomIdGenerator<R = StdRng> {
    rng: R,
    issued: HashSet<u32>,
}

impl RandomIdGenerator<StdRng> {
    /// Creates a generator seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for RandomIdGenerator<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> RandomIdGenerator<R> {
    /// Creates a generator drawing from the given random source.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            issued: HashSet::new(),
        }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}

impl<R: Rng> PatientIdGenerator for RandomIdGenerator<R> {
    fn next_id(&mut self) -> IdResult<PatientId> {
        if self.issued.len() >= RANGE_LEN {
            return Err(IdError::Exhausted {
                issued: self.issued.len(),
            });
        }

        loop {
            let candidate = self.rng.gen_range(MIN_PATIENT_ID..=MAX_PATIENT_ID);
            if self.issued.insert(candidate) {
                return Ok(PatientId::new(candidate));
            }
        }
    }
}

/// Hands out ids in increasing order.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    next: u32,
}

impl SequentialIdGenerator {
    /// Starts counting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if `start` lies outside the id range.
    pub fn starting_at(start: u32) -> IdResult<Self> {
        if !(MIN_PATIENT_ID..=MAX_PATIENT_ID).contains(&start) {
            return Err(IdError::InvalidInput(format!(
                "start must be within {}..={}, got {}",
                MIN_PATIENT_ID, MAX_PATIENT_ID, start
            )));
        }
        Ok(Self { next: start })
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self {
            next: MIN_PATIENT_ID,
        }
    }
}

impl PatientIdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> IdResult<PatientId> {
        if self.next > MAX_PATIENT_ID {
            return Err(IdError::Exhausted {
                issued: (self.next - MIN_PATIENT_ID) as usize,
            });
        }
        let id = PatientId::new(self.next);
        self.next += 1;
        Ok(id)
    }
}
