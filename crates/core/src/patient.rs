//! Patient record.

use crate::TreatmentResult;
use er_types::{NonEmptyText, PatientId};
use serde::{Deserialize, Serialize};

/// An admitted patient.
///
/// Records are immutable once built. The controller moves them between the active slot and the
/// holding area as whole values and never edits a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    id: PatientId,
    name: NonEmptyText,
    condition: String,
    severity: String,
}

impl Patient {
    /// Creates a patient record.
    ///
    /// `condition` and `severity` are free text. Severity is a label such as "Critical" or
    /// "Severe" and is not checked against a fixed set.
    pub fn new(
        id: PatientId,
        name: NonEmptyText,
        condition: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name,
            condition: condition.into(),
            severity: severity.into(),
        }
    }

    /// Builds a patient from raw intake fields as typed by an operator.
    ///
    /// # Errors
    ///
    /// Returns `TreatmentError::Text` if `name` is blank.
    pub fn from_intake(
        id: PatientId,
        name: &str,
        condition: &str,
        severity: &str,
    ) -> TreatmentResult<Self> {
        let name = NonEmptyText::new(name)?;
        Ok(Self::new(id, name, condition.trim(), severity.trim()))
    }

    pub fn id(&self) -> PatientId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn severity(&self) -> &str {
        &self.severity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreatmentError;

    #[test]
    fn intake_trims_fields() {
        let p = Patient::from_intake(PatientId::new(1234), " Ada ", " chest pain ", "Critical ")
            .unwrap();
        assert_eq!(p.id().get(), 1234);
        assert_eq!(p.name(), "Ada");
        assert_eq!(p.condition(), "chest pain");
        assert_eq!(p.severity(), "Critical");
    }

    #[test]
    fn intake_rejects_blank_name() {
        let err = Patient::from_intake(PatientId::new(1), "   ", "fall", "Severe").unwrap_err();
        assert!(matches!(err, TreatmentError::Text(_)));
    }

    #[test]
    fn round_trips_through_json_and_rejects_blank_names() {
        let p = Patient::from_intake(PatientId::new(4821), "Ada", "chest pain", "Critical").unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"id\":4821"));
        assert_eq!(serde_json::from_str::<Patient>(&json).unwrap(), p);

        let blank = r#"{"id":1,"name":"  ","condition":"","severity":""}"#;
        assert!(serde_json::from_str::<Patient>(blank).is_err());
    }

    #[test]
    fn condition_and_severity_are_opaque() {
        let p = Patient::from_intake(PatientId::new(2), "Bo", "", "whatever label").unwrap();
        assert_eq!(p.condition(), "");
        assert_eq!(p.severity(), "whatever label");
    }
}
