//! Endpoint handlers.
//!
//! Every handler follows the same steps: resolve the request id, validate
//! against the state's limits, build the grid, evaluate, record metrics.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{debug, warn};

use fermidirac_lib::{
    classify, curve, curve_to_csv, csv_filename, derivative_curve, fermi_temperature,
    multi_curve, physics_info, surface_on_axis, thermal_width, PhysicsInfo, Regime, Spacing,
    TemperatureCurve,
};
use fermidirac_service_shared::{
    from_lib_error, record_evaluation, record_evaluation_failed, record_grid_points, AppState,
    FermiDiracRequest, MultiTemperatureRequest, ProblemDetails, RegimeQuery, RequestId,
    ServiceResponse, SurfaceRequest, Validate, ZeroTemperatureQuery,
};

/// Description attached to zero-temperature responses.
pub const ZERO_TEMPERATURE_DESCRIPTION: &str =
    "Ideal Heaviside step function at T=0 (Pauli exclusion)";

/// Paths listed by the index endpoint.
pub const ENDPOINTS: [&str; 8] = [
    "/api/v1/fermi-dirac",
    "/api/v1/multi-temperature",
    "/api/v1/zero-temperature",
    "/api/v1/surface",
    "/api/v1/derivative",
    "/api/v1/regime",
    "/api/v1/physics-info",
    "/api/v1/export/csv",
];

/// Either a wrapped payload or an RFC 9457 problem.
#[derive(Debug)]
pub enum ApiResponse<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiResponse::Success(data) => data.into_response(),
            ApiResponse::Error(problem) => problem.into_response(),
        }
    }
}

/// Validate `request`, counting a failure for `kind` when it is rejected.
fn check<R: Validate>(
    request: &R,
    state: &AppState,
    kind: &'static str,
    request_id: &RequestId,
) -> Result<(), ProblemDetails> {
    request
        .validate(state.limits(), request_id.as_str())
        .map_err(|problem| {
            debug!(request_id = %request_id, kind, detail = ?problem.detail, "rejected request");
            record_evaluation_failed(kind, "validation_error", state.service());
            *problem
        })
}

fn lib_failure(
    error: &fermidirac_lib::Error,
    state: &AppState,
    kind: &'static str,
    request_id: &RequestId,
) -> ProblemDetails {
    let reason = if error.is_validation() {
        "validation_error"
    } else {
        "internal_error"
    };
    warn!(request_id = %request_id, kind, error = %error, "evaluation failed");
    record_evaluation_failed(kind, reason, state.service());
    from_lib_error(error, request_id.as_str())
}

fn success<T>(
    data: T,
    state: &AppState,
    kind: &'static str,
    values: usize,
    request_id: &RequestId,
) -> ApiResponse<T> {
    record_evaluation(kind, state.service());
    record_grid_points(values, kind);
    ApiResponse::Success(ServiceResponse::new(data).with_request_id(request_id.as_str()))
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [&'static str],
}

/// `GET /`
pub async fn index() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(IndexResponse {
            message: "Fermi-Dirac Distribution API",
            version: env!("CARGO_PKG_VERSION"),
            endpoints: &ENDPOINTS,
        }),
    )
}

#[derive(Debug, Serialize)]
pub struct CurveResponse {
    pub energy: Vec<f64>,
    pub occupation: Vec<f64>,
    pub temperature: f64,
    pub mu: f64,
    /// `4·k_B·T` in eV, rounded to six decimals.
    pub thermal_width: f64,
}

/// `POST /api/v1/fermi-dirac`
pub async fn fermi_dirac(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<FermiDiracRequest>,
) -> ApiResponse<CurveResponse> {
    const KIND: &str = "curve";
    if let Err(problem) = check(&request, &state, KIND, &request_id) {
        return ApiResponse::Error(problem);
    }
    let grid = match request.energy_grid() {
        Ok(grid) => grid,
        Err(e) => return ApiResponse::Error(lib_failure(&e, &state, KIND, &request_id)),
    };

    let result = curve(&grid, request.temperature, request.mu, false);
    let points = result.energies.len();
    let response = CurveResponse {
        energy: result.energies,
        occupation: result.curve.occupation,
        temperature: request.temperature,
        mu: request.mu,
        thermal_width: round6(thermal_width(request.temperature)),
    };
    success(response, &state, KIND, points, &request_id)
}

#[derive(Debug, Serialize)]
pub struct MultiTemperatureResponse {
    pub energy: Vec<f64>,
    pub curves: Vec<TemperatureCurve>,
    pub mu: f64,
}

/// `POST /api/v1/multi-temperature`
pub async fn multi_temperature(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<MultiTemperatureRequest>,
) -> ApiResponse<MultiTemperatureResponse> {
    const KIND: &str = "multi_temperature";
    if let Err(problem) = check(&request, &state, KIND, &request_id) {
        return ApiResponse::Error(problem);
    }
    let inputs = request
        .energy_grid()
        .and_then(|grid| request.temperature_set().map(|set| (grid, set)));
    let (grid, temperatures) = match inputs {
        Ok(inputs) => inputs,
        Err(e) => return ApiResponse::Error(lib_failure(&e, &state, KIND, &request_id)),
    };

    let result = multi_curve(
        &grid,
        &temperatures,
        request.mu,
        request.include_maxwell_boltzmann,
    );
    let values = result.energies.len() * result.curves.len();
    let response = MultiTemperatureResponse {
        energy: result.energies,
        curves: result.curves,
        mu: request.mu,
    };
    success(response, &state, KIND, values, &request_id)
}

#[derive(Debug, Serialize)]
pub struct ZeroTemperatureResponse {
    pub energy: Vec<f64>,
    pub occupation: Vec<f64>,
    pub mu: f64,
    pub description: &'static str,
}

/// `GET /api/v1/zero-temperature`
pub async fn zero_temperature(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<ZeroTemperatureQuery>,
) -> ApiResponse<ZeroTemperatureResponse> {
    const KIND: &str = "zero_temperature";
    if let Err(problem) = check(&query, &state, KIND, &request_id) {
        return ApiResponse::Error(problem);
    }
    let grid = match query.as_curve_request().energy_grid() {
        Ok(grid) => grid,
        Err(e) => return ApiResponse::Error(lib_failure(&e, &state, KIND, &request_id)),
    };

    let result = curve(&grid, 0.0, query.mu, false);
    let points = result.energies.len();
    let response = ZeroTemperatureResponse {
        energy: result.energies,
        occupation: result.curve.occupation,
        mu: query.mu,
        description: ZERO_TEMPERATURE_DESCRIPTION,
    };
    success(response, &state, KIND, points, &request_id)
}

#[derive(Debug, Serialize)]
pub struct SurfaceResponse {
    pub energy: Vec<f64>,
    pub temperatures: Vec<f64>,
    /// Indexed `[temperature][energy]`.
    pub occupation: Vec<Vec<f64>>,
    pub mu: f64,
    pub temp_scale: Spacing,
}

/// `POST /api/v1/surface`
pub async fn surface(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<SurfaceRequest>,
) -> ApiResponse<SurfaceResponse> {
    const KIND: &str = "surface";
    if let Err(problem) = check(&request, &state, KIND, &request_id) {
        return ApiResponse::Error(problem);
    }
    let inputs = request
        .energy_grid()
        .and_then(|grid| request.temperature_axis().map(|axis| (grid, axis)));
    let (grid, axis) = match inputs {
        Ok(inputs) => inputs,
        Err(e) => return ApiResponse::Error(lib_failure(&e, &state, KIND, &request_id)),
    };

    let result = surface_on_axis(&grid, axis, request.mu);
    let (rows, columns) = result.shape();
    let response = SurfaceResponse {
        energy: result.energies,
        temperatures: result.temperatures,
        occupation: result.occupation,
        mu: request.mu,
        temp_scale: request.temp_scale,
    };
    success(response, &state, KIND, rows * columns, &request_id)
}

#[derive(Debug, Serialize)]
pub struct DerivativeResponse {
    pub energy: Vec<f64>,
    /// `null` marks the undefined delta at E = μ for T = 0.
    pub derivative: Vec<Option<f64>>,
    pub temperature: f64,
    pub mu: f64,
    /// Human-readable peak width, e.g. `~0.1034 eV`.
    pub peak_width: String,
    pub peak_width_ev: f64,
}

/// `GET /api/v1/derivative`
pub async fn derivative(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<FermiDiracRequest>,
) -> ApiResponse<DerivativeResponse> {
    const KIND: &str = "derivative";
    if let Err(problem) = check(&query, &state, KIND, &request_id) {
        return ApiResponse::Error(problem);
    }
    let grid = match query.energy_grid() {
        Ok(grid) => grid,
        Err(e) => return ApiResponse::Error(lib_failure(&e, &state, KIND, &request_id)),
    };

    let result = derivative_curve(&grid, query.temperature, query.mu);
    let points = result.energies.len();
    let response = DerivativeResponse {
        energy: result.energies,
        derivative: result.derivative,
        temperature: query.temperature,
        mu: query.mu,
        peak_width: format!("~{:.4} eV", result.peak_width),
        peak_width_ev: result.peak_width,
    };
    success(response, &state, KIND, points, &request_id)
}

#[derive(Debug, Serialize)]
pub struct RegimeResponse {
    pub temperature: f64,
    pub fermi_energy: f64,
    pub fermi_temperature: f64,
    /// `T / T_F`.
    pub ratio: f64,
    pub regime: Regime,
    pub description: &'static str,
}

/// `GET /api/v1/regime`
pub async fn regime(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<RegimeQuery>,
) -> ApiResponse<RegimeResponse> {
    const KIND: &str = "regime";
    if let Err(problem) = check(&query, &state, KIND, &request_id) {
        return ApiResponse::Error(problem);
    }

    let t_f = fermi_temperature(query.fermi_energy);
    let regime = match classify(query.temperature, t_f) {
        Ok(regime) => regime,
        Err(e) => return ApiResponse::Error(lib_failure(&e, &state, KIND, &request_id)),
    };
    let response = RegimeResponse {
        temperature: query.temperature,
        fermi_energy: query.fermi_energy,
        fermi_temperature: t_f,
        ratio: query.temperature / t_f,
        regime,
        description: regime.description(),
    };
    success(response, &state, KIND, 1, &request_id)
}

/// `GET /api/v1/physics-info`
pub async fn physics(request_id: RequestId) -> ServiceResponse<PhysicsInfo> {
    ServiceResponse::new(physics_info()).with_request_id(request_id.as_str())
}

#[derive(Debug, Serialize)]
pub struct CsvExportResponse {
    pub csv: String,
    pub filename: String,
}

/// `GET /api/v1/export/csv`
pub async fn export_csv(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<FermiDiracRequest>,
) -> ApiResponse<CsvExportResponse> {
    const KIND: &str = "export_csv";
    if let Err(problem) = check(&query, &state, KIND, &request_id) {
        return ApiResponse::Error(problem);
    }
    let grid = match query.energy_grid() {
        Ok(grid) => grid,
        Err(e) => return ApiResponse::Error(lib_failure(&e, &state, KIND, &request_id)),
    };

    let result = curve(&grid, query.temperature, query.mu, false);
    let csv = match curve_to_csv(&result, query.mu) {
        Ok(csv) => csv,
        Err(e) => return ApiResponse::Error(lib_failure(&e, &state, KIND, &request_id)),
    };
    let response = CsvExportResponse {
        csv,
        filename: csv_filename(query.temperature),
    };
    success(response, &state, KIND, grid.len(), &request_id)
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
