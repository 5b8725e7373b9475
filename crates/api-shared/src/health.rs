use crate::dto::HealthRes;

/// Health service shared by the REST binaries.
pub struct HealthService;

impl HealthService {
    /// Reports the service as alive.
    ///
    /// There is no backing store to check, so a process that can answer is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "ER is alive".into(),
        }
    }
}
