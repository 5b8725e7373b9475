//! # API REST
//!
//! REST API for the emergency room.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, status codes, CORS)
//! - Patient id allocation for admissions that arrive over HTTP
//!
//! One [`TreatmentService`] is shared by every handler, so all clients see the same doctor.

#![warn(rust_2018_idioms)]

use std::sync::{Arc, Mutex};

use api_shared::{
    AdmitPatientReq, AdmitPatientRes, CompleteTreatmentRes, ErrorRes, HealthRes, HealthService,
    PatientRes, SnapshotRes,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use er_core::{CoreConfig, NonEmptyText, Patient, TreatmentError, TreatmentService};
use er_ids::{IdError, PatientIdGenerator, RandomIdGenerator};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

type IdSource = Arc<Mutex<dyn PatientIdGenerator + Send>>;
type ApiError = (StatusCode, Json<ErrorRes>);

/// Application state for the REST API server
#[derive(Clone)]
pub struct AppState {
    service: TreatmentService,
    ids: IdSource,
}

impl AppState {
    /// State with a fresh controller and randomly drawn patient ids.
    pub fn new(cfg: &CoreConfig) -> Self {
        Self::with_ids(cfg, RandomIdGenerator::from_entropy())
    }

    pub fn with_ids(cfg: &CoreConfig, ids: impl PatientIdGenerator + Send + 'static) -> Self {
        let ids: IdSource = Arc::new(Mutex::new(ids));
        Self {
            service: TreatmentService::new(cfg),
            ids,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, snapshot, admit_patient, complete_treatment),
    components(schemas(
        HealthRes,
        ErrorRes,
        PatientRes,
        SnapshotRes,
        AdmitPatientReq,
        AdmitPatientRes,
        CompleteTreatmentRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/snapshot", get(snapshot))
        .route("/patients", post(admit_patient))
        .route("/treatment/complete", post(complete_treatment))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves the router until the server fails.
///
/// # Errors
/// Returns an error if the address cannot be bound or the HTTP server fails while running.
pub async fn serve(addr: &str, cfg: &CoreConfig) -> anyhow::Result<()> {
    tracing::info!(
        capacity = cfg.holding_capacity(),
        overflow_policy = %cfg.overflow_policy(),
        "-- Starting ER REST API on {}",
        addr
    );

    let app = router(AppState::new(cfg));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorRes {
            error: message.into(),
        }),
    )
}

fn treatment_error(err: TreatmentError) -> ApiError {
    let status = match &err {
        TreatmentError::CapacityExceeded { .. }
        | TreatmentError::HoldingAreaFull { .. }
        | TreatmentError::NoActivePatient => StatusCode::CONFLICT,
        TreatmentError::InvalidInput(_) | TreatmentError::Text(_) => StatusCode::BAD_REQUEST,
    };
    api_error(status, err.to_string())
}

fn id_error(err: IdError) -> ApiError {
    tracing::error!("Patient id allocation error: {:?}", err);
    match err {
        IdError::Exhausted { .. } => api_error(StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
        IdError::InvalidInput(_) => api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
    }
}

/// Ways an admission over HTTP can fail.
#[derive(Debug)]
enum AdmitFailure {
    Treatment(TreatmentError),
    Ids(IdError),
}

impl From<TreatmentError> for AdmitFailure {
    fn from(err: TreatmentError) -> Self {
        AdmitFailure::Treatment(err)
    }
}

impl From<IdError> for AdmitFailure {
    fn from(err: IdError) -> Self {
        AdmitFailure::Ids(err)
    }
}

impl From<AdmitFailure> for ApiError {
    fn from(failure: AdmitFailure) -> Self {
        match failure {
            AdmitFailure::Treatment(e) => {
                tracing::warn!("Admit patient error: {}", e);
                treatment_error(e)
            }
            AdmitFailure::Ids(e) => id_error(e),
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/snapshot",
    responses(
        (status = 200, description = "Active patient and holding area", body = SnapshotRes)
    )
)]
/// Current active patient and suspended patients, top of the holding area first.
async fn snapshot(State(state): State<AppState>) -> Json<SnapshotRes> {
    Json(SnapshotRes::from(&state.service.snapshot()))
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = AdmitPatientReq,
    responses(
        (status = 201, description = "Patient admitted and now being treated", body = AdmitPatientRes),
        (status = 400, description = "Blank patient name", body = ErrorRes),
        (status = 409, description = "Holding area full; admission rejected", body = ErrorRes),
        (status = 503, description = "No patient ids left", body = ErrorRes)
    )
)]
/// Admit a new patient
///
/// The new patient is treated immediately. If someone was already being treated, they are
/// suspended on top of the holding area.
async fn admit_patient(
    State(state): State<AppState>,
    Json(req): Json<AdmitPatientReq>,
) -> Result<(StatusCode, Json<AdmitPatientRes>), ApiError> {
    let name = NonEmptyText::new(&req.name)
        .map_err(|e| treatment_error(TreatmentError::from(e)))?;

    let condition = req.condition.trim();
    let severity = req.severity.trim();

    // The id is drawn only once the service has confirmed there is room, so refused
    // admissions leave the id range untouched.
    let (patient, admission, snapshot) = state
        .service
        .admit_with(|| -> Result<Patient, AdmitFailure> {
            let mut ids = state.ids.lock().unwrap_or_else(|p| p.into_inner());
            let id = ids.next_id()?;
            Ok(Patient::new(id, name, condition, severity))
        })
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(AdmitPatientRes::new(&patient, &admission, &snapshot)),
    ))
}

#[utoipa::path(
    post,
    path = "/treatment/complete",
    responses(
        (status = 200, description = "Active patient discharged", body = CompleteTreatmentRes),
        (status = 409, description = "No active patient", body = ErrorRes)
    )
)]
/// Complete the current treatment
///
/// Discharges the active patient and resumes the most recently suspended one, if any.
async fn complete_treatment(
    State(state): State<AppState>,
) -> Result<Json<CompleteTreatmentRes>, ApiError> {
    let (discharge, snapshot) = state.service.complete_treatment().map_err(treatment_error)?;
    Ok(Json(CompleteTreatmentRes::new(&discharge, &snapshot)))
}
