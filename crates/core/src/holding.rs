//! Bounded last-in-first-out holding area for suspended patients.
//!
//! The holding area has a fixed capacity chosen at construction and never grows. The most
//! recently suspended patient sits on top and is the first to be resumed.
//!
//! Storage is a `VecDeque` whose back is the top of the stack. A plain stack would only need the
//! back, but the front gives O(1) access to the oldest record, which the `evict-oldest` overflow
//! policy needs.

use crate::{Patient, TreatmentError, TreatmentResult};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct HoldingStack {
    slots: VecDeque<Patient>,
    capacity: usize,
}

impl HoldingStack {
    /// Creates an empty holding area that can hold `capacity` patients.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Puts `patient` on top.
    ///
    /// # Errors
    ///
    /// Returns `TreatmentError::CapacityExceeded` when the holding area is full. The stored
    /// sequence is left untouched and the patient is returned inside the error.
    pub fn push(&mut self, patient: Patient) -> TreatmentResult<()> {
        if self.is_full() {
            return Err(TreatmentError::CapacityExceeded {
                capacity: self.capacity,
                patient: Box::new(patient),
            });
        }
        self.slots.push_back(patient);
        Ok(())
    }

    /// Puts `patient` on top, evicting the bottom record first if the holding area is full.
    ///
    /// Returns the evicted record. With a capacity of zero nothing can be stored, so the incoming
    /// patient itself comes straight back.
    pub fn push_evicting_oldest(&mut self, patient: Patient) -> Option<Patient> {
        if self.capacity == 0 {
            return Some(patient);
        }
        let evicted = if self.is_full() {
            self.slots.pop_front()
        } else {
            None
        };
        self.slots.push_back(patient);
        evicted
    }

    /// Removes and returns the top record, or `None` when empty.
    pub fn pop(&mut self) -> Option<Patient> {
        self.slots.pop_back()
    }

    /// Returns the top record without removing it.
    pub fn peek(&self) -> Option<&Patient> {
        self.slots.back()
    }

    /// Iterates the stored records from top to bottom.
    ///
    /// The iterator borrows the stack, so it can be taken any number of times and never mutates.
    pub fn peek_all(&self) -> impl DoubleEndedIterator<Item = &Patient> + ExactSizeIterator + '_ {
        self.slots.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use er_types::PatientId;

    fn patient(id: u32, name: &str) -> Patient {
        Patient::from_intake(PatientId::new(id), name, "condition", "Severe").unwrap()
    }

    fn names(stack: &HoldingStack) -> Vec<&str> {
        stack.peek_all().map(Patient::name).collect()
    }

    #[test]
    fn new_stack_is_empty() {
        let mut stack = HoldingStack::with_capacity(3);
        assert!(stack.is_empty());
        assert!(!stack.is_full());
        assert_eq!(stack.len(), 0);
        assert_eq!(stack.capacity(), 3);
        assert!(stack.pop().is_none());
        assert!(stack.peek().is_none());
        assert_eq!(stack.peek_all().count(), 0);
    }

    #[test]
    fn pops_in_reverse_push_order() {
        let mut stack = HoldingStack::with_capacity(3);
        stack.push(patient(1, "A")).unwrap();
        stack.push(patient(2, "B")).unwrap();
        stack.push(patient(3, "C")).unwrap();

        assert_eq!(names(&stack), ["C", "B", "A"]);
        assert_eq!(stack.peek().map(Patient::name), Some("C"));

        let order: Vec<_> = std::iter::from_fn(|| stack.pop()).map(|p| p.id().get()).collect();
        assert_eq!(order, [3, 2, 1]);
        assert!(stack.is_empty());
    }

    #[test]
    fn push_at_capacity_succeeds_and_beyond_fails_without_mutation() {
        let mut stack = HoldingStack::with_capacity(2);
        stack.push(patient(1, "A")).unwrap();
        stack.push(patient(2, "B")).unwrap();
        assert!(stack.is_full());

        let err = stack.push(patient(3, "C")).unwrap_err();
        match err {
            TreatmentError::CapacityExceeded { capacity, patient } => {
                assert_eq!(capacity, 2);
                assert_eq!(patient.name(), "C");
            }
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }
        assert_eq!(stack.len(), 2);
        assert_eq!(names(&stack), ["B", "A"]);
    }

    #[test]
    fn evicting_push_drops_the_bottom_record() {
        let mut stack = HoldingStack::with_capacity(2);
        assert!(stack.push_evicting_oldest(patient(1, "A")).is_none());
        assert!(stack.push_evicting_oldest(patient(2, "B")).is_none());

        let evicted = stack.push_evicting_oldest(patient(3, "C")).unwrap();
        assert_eq!(evicted.name(), "A");
        assert_eq!(names(&stack), ["C", "B"]);
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut stack = HoldingStack::with_capacity(0);
        assert!(stack.is_full());
        assert!(stack.push(patient(1, "A")).is_err());

        let bounced = stack.push_evicting_oldest(patient(2, "B")).unwrap();
        assert_eq!(bounced.name(), "B");
        assert!(stack.is_empty());
    }

    #[test]
    fn peek_all_is_restartable() {
        let mut stack = HoldingStack::with_capacity(2);
        stack.push(patient(1, "A")).unwrap();
        stack.push(patient(2, "B")).unwrap();

        let first: Vec<_> = names(&stack);
        let second: Vec<_> = names(&stack);
        assert_eq!(first, second);
        assert_eq!(stack.peek_all().len(), 2);
    }
}
