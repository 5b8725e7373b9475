//! Wire types for the REST API.
//!
//! Core values are converted into these plain structs at the boundary so that the HTTP contract
//! does not move when the core types do.

use er_core::{Admission, Discharge, Patient, Snapshot};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub id: u32,
    pub name: String,
    pub condition: String,
    pub severity: String,
}

impl From<&Patient> for PatientRes {
    fn from(p: &Patient) -> Self {
        Self {
            id: p.id().get(),
            name: p.name().to_string(),
            condition: p.condition().to_string(),
            severity: p.severity().to_string(),
        }
    }
}

/// Current treatment state.
///
/// `state` is `"idle"` or `"treating"`. `suspended` lists the holding area top first, so its
/// first entry is the next patient to be resumed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SnapshotRes {
    pub state: String,
    pub active: Option<PatientRes>,
    pub suspended: Vec<PatientRes>,
    pub capacity: usize,
}

impl From<&Snapshot> for SnapshotRes {
    fn from(s: &Snapshot) -> Self {
        Self {
            state: s.state().as_str().to_string(),
            active: s.active.as_ref().map(PatientRes::from),
            suspended: s.suspended.iter().map(PatientRes::from).collect(),
            capacity: s.capacity,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdmitPatientReq {
    pub name: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub severity: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdmitPatientRes {
    pub patient: PatientRes,
    /// Id of the patient whose treatment was interrupted, if any.
    pub suspended_id: Option<u32>,
    /// Record pushed out of a full holding area under the `evict-oldest` policy.
    pub evicted: Option<PatientRes>,
    pub snapshot: SnapshotRes,
}

impl AdmitPatientRes {
    pub fn new(patient: &Patient, admission: &Admission, snapshot: &Snapshot) -> Self {
        Self {
            patient: patient.into(),
            suspended_id: admission.suspended().map(|id| id.get()),
            evicted: admission.evicted().map(PatientRes::from),
            snapshot: snapshot.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompleteTreatmentRes {
    pub discharged: PatientRes,
    /// Id of the patient taken back off the holding area, if any.
    pub resumed_id: Option<u32>,
    pub snapshot: SnapshotRes,
}

impl CompleteTreatmentRes {
    pub fn new(discharge: &Discharge, snapshot: &Snapshot) -> Self {
        Self {
            discharged: (&discharge.discharged).into(),
            resumed_id: discharge.resumed.map(|id| id.get()),
            snapshot: snapshot.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use er_core::TreatmentController;
    use er_types::PatientId;

    fn patient(id: u32, name: &str) -> Patient {
        Patient::from_intake(PatientId::new(id), name, "burns", "Severe").unwrap()
    }

    #[test]
    fn snapshot_serialises_with_lowercase_state() {
        let mut c = TreatmentController::with_capacity(2);
        c.admit(patient(1001, "A")).unwrap();
        c.admit(patient(1002, "B")).unwrap();

        let json = serde_json::to_value(SnapshotRes::from(&c.snapshot())).unwrap();
        assert_eq!(json["state"], "treating");
        assert_eq!(json["active"]["id"], 1002);
        assert_eq!(json["suspended"][0]["name"], "A");
        assert_eq!(json["capacity"], 2);
    }

    #[test]
    fn idle_snapshot_has_null_active() {
        let c = TreatmentController::with_capacity(1);
        let res = SnapshotRes::from(&c.snapshot());
        assert_eq!(res.state, "idle");
        assert!(res.active.is_none());
        assert!(res.suspended.is_empty());
    }

    #[test]
    fn admit_request_defaults_optional_fields() {
        let req: AdmitPatientReq = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(req.condition, "");
        assert_eq!(req.severity, "");
    }

    #[test]
    fn admit_response_reports_suspended_patient() {
        let mut c = TreatmentController::with_capacity(2);
        c.admit(patient(1001, "A")).unwrap();
        let incoming = patient(1002, "B");
        let admission = c.admit(incoming.clone()).unwrap();

        let res = AdmitPatientRes::new(&incoming, &admission, &c.snapshot());
        assert_eq!(res.patient.id, 1002);
        assert_eq!(res.suspended_id, Some(1001));
        assert!(res.evicted.is_none());
        assert_eq!(res.snapshot.suspended.len(), 1);
    }
}
