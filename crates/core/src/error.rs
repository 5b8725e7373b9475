use crate::patient::Patient;
use er_types::TextError;

#[derive(Debug, thiserror::Error)]
pub enum TreatmentError {
    /// The holding area had no free slot. `patient` is the record that could not be placed,
    /// handed back so the caller decides what happens to it.
    #[error(
        "holding area is full (capacity {capacity}); patient {id} was not placed",
        id = patient.id()
    )]
    CapacityExceeded {
        capacity: usize,
        patient: Box<Patient>,
    },
    /// Raised before an incoming patient record exists, so there is nothing to hand back.
    #[error("holding area is full (capacity {capacity}); admission refused")]
    HoldingAreaFull { capacity: usize },
    #[error("no active patient")]
    NoActivePatient,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid text: {0}")]
    Text(#[from] TextError),
}

pub type TreatmentResult<T> = std::result::Result<T, TreatmentError>;
