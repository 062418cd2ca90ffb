use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use fermidirac_service::build_router;
use fermidirac_service_shared::test_utils::{test_state, test_state_with, tight_limits};
use fermidirac_service_shared::{AppState, MetricsConfig};

fn server_for(state: AppState) -> TestServer {
    TestServer::new(build_router(state, &MetricsConfig::default())).unwrap()
}

fn server() -> TestServer {
    server_for(test_state())
}

#[tokio::test]
async fn index_lists_endpoints() {
    let response = server().get("/").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["message"], "Fermi-Dirac Distribution API");
    let endpoints = body["endpoints"].as_array().unwrap();
    assert!(endpoints.iter().any(|e| e == "/api/v1/surface"));
}

#[tokio::test]
async fn fermi_dirac_uses_defaults() {
    let response = server().post("/api/v1/fermi-dirac").json(&json!({})).await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["energy"].as_array().unwrap().len(), 500);
    assert_eq!(body["occupation"].as_array().unwrap().len(), 500);
    assert_eq!(body["temperature"], 300.0);
    assert_eq!(body["mu"], 0.5);
    let width = body["thermal_width"].as_f64().unwrap();
    assert!((width - 0.103408).abs() < 1e-12, "thermal width {width}");
    assert_eq!(body["content_type"], "application/json");
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn fermi_dirac_zero_temperature_is_a_step() {
    let response = server()
        .post("/api/v1/fermi-dirac")
        .json(&json!({"temperature": 0, "energy_min": -1, "energy_max": 2, "points": 13}))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let occupation: Vec<f64> = serde_json::from_value(body["occupation"].clone()).unwrap();
    assert_eq!(occupation[..6], [1.0; 6]);
    assert_eq!(occupation[6], 0.5);
    assert_eq!(occupation[7..], [0.0; 6]);
    assert_eq!(body["thermal_width"], 0.0);
}

#[tokio::test]
async fn negative_temperature_is_a_problem() {
    let response = server()
        .post("/api/v1/fermi-dirac")
        .json(&json!({"temperature": -5}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.header("content-type"), "application/problem+json");

    let body = response.json::<Value>();
    assert_eq!(body["type"], "/problems/invalid-temperature");
    assert_eq!(body["status"], 400);
    assert!(body["detail"].as_str().unwrap().contains("temperature"));
    assert!(body.get("occupation").is_none());
}

#[tokio::test]
async fn inverted_energy_range_is_a_problem() {
    let response = server()
        .post("/api/v1/fermi-dirac")
        .json(&json!({"energy_min": 2, "energy_max": -1}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["type"], "/problems/invalid-range");
}

#[tokio::test]
async fn multi_temperature_sorts_and_attaches_classical_curves() {
    let response = server()
        .post("/api/v1/multi-temperature")
        .json(&json!({
            "temperatures": [300, 0, 300, 100],
            "points": 50,
            "include_maxwell_boltzmann": true
        }))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let curves = body["curves"].as_array().unwrap();
    let temperatures: Vec<f64> = curves
        .iter()
        .map(|c| c["temperature"].as_f64().unwrap())
        .collect();
    assert_eq!(temperatures, vec![0.0, 100.0, 300.0]);
    assert!(curves[0].get("maxwell_boltzmann").is_none());
    assert_eq!(curves[1]["maxwell_boltzmann"].as_array().unwrap().len(), 50);
    assert_eq!(body["energy"].as_array().unwrap().len(), 50);
}

#[tokio::test]
async fn multi_temperature_rejects_too_many_temperatures() {
    let temperatures: Vec<f64> = (0..21).map(|t| t as f64 * 10.0).collect();
    let response = server()
        .post("/api/v1/multi-temperature")
        .json(&json!({"temperatures": temperatures}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn zero_temperature_endpoint() {
    let response = server()
        .get("/api/v1/zero-temperature")
        .add_query_param("mu", 0.0)
        .add_query_param("energy_min", -1.0)
        .add_query_param("energy_max", 1.0)
        .add_query_param("points", 11)
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["occupation"][0], 1.0);
    assert_eq!(body["occupation"][5], 0.5);
    assert_eq!(body["occupation"][10], 0.0);
    assert!(body["description"].as_str().unwrap().contains("Heaviside"));
}

#[tokio::test]
async fn surface_defaults_to_log_axis() {
    let response = server().post("/api/v1/surface").json(&json!({})).await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let temperatures: Vec<f64> = serde_json::from_value(body["temperatures"].clone()).unwrap();
    let occupation: Vec<Vec<f64>> = serde_json::from_value(body["occupation"].clone()).unwrap();

    assert_eq!(temperatures.len(), 100);
    assert_eq!(temperatures[0], 1.0);
    assert_eq!(temperatures[99], 5000.0);
    assert!(temperatures.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(occupation.len(), 100);
    assert!(occupation.iter().all(|row| row.len() == 200));
    assert_eq!(body["temp_scale"], "log");
}

#[tokio::test]
async fn surface_linear_shape() {
    let response = server()
        .post("/api/v1/surface")
        .json(&json!({
            "energy_points": 50,
            "temp_points": 30,
            "temp_min": 10,
            "temp_max": 1000,
            "temp_scale": "linear"
        }))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["temperatures"].as_array().unwrap().len(), 30);
    assert_eq!(body["occupation"][29].as_array().unwrap().len(), 50);
}

#[tokio::test]
async fn surface_respects_cell_limit() {
    let response = server_for(test_state_with(tight_limits()))
        .post("/api/v1/surface")
        .json(&json!({"energy_points": 30, "temp_points": 20}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(
        response.json::<Value>()["detail"]
            .as_str()
            .unwrap()
            .contains("400 cells")
    );
}

#[tokio::test]
async fn tight_limits_cap_curve_points() {
    let response = server_for(test_state_with(tight_limits()))
        .post("/api/v1/fermi-dirac")
        .json(&json!({"points": 101}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn derivative_marks_zero_temperature_delta_as_null() {
    let response = server()
        .get("/api/v1/derivative")
        .add_query_param("temperature", 0.0)
        .add_query_param("points", 13)
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let derivative = body["derivative"].as_array().unwrap();
    assert!(derivative[6].is_null());
    assert_eq!(derivative[0], 0.0);
    assert_eq!(body["peak_width"], "~0.0000 eV");
}

#[tokio::test]
async fn derivative_marks_delta_on_default_grid() {
    let response = server()
        .get("/api/v1/derivative")
        .add_query_param("temperature", 0.0)
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let derivative = body["derivative"].as_array().unwrap();
    assert_eq!(derivative.len(), 500);
    assert_eq!(derivative.iter().filter(|d| d.is_null()).count(), 1);
    let index = derivative.iter().position(Value::is_null).unwrap();
    let energy = body["energy"][index].as_f64().unwrap();
    assert!((energy - 0.5).abs() < 0.0031, "delta at E = {energy}");
}

#[tokio::test]
async fn vanishing_temperature_gives_a_finite_step() {
    let response = server()
        .post("/api/v1/fermi-dirac")
        .json(&json!({"temperature": 1e-320, "points": 13}))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let occupation: Vec<f64> = serde_json::from_value(body["occupation"].clone()).unwrap();
    assert_eq!(occupation[..6], [1.0; 6]);
    assert_eq!(occupation[6], 0.5);
    assert_eq!(occupation[7..], [0.0; 6]);
}

#[tokio::test]
async fn derivative_is_negative_at_finite_temperature() {
    let response = server().get("/api/v1/derivative").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert!(body["derivative"]
        .as_array()
        .unwrap()
        .iter()
        .all(|d| d.as_f64().unwrap() <= 0.0));
    assert_eq!(body["peak_width"], "~0.1034 eV");
}

#[tokio::test]
async fn regime_for_copper_at_room_temperature() {
    let response = server()
        .get("/api/v1/regime")
        .add_query_param("temperature", 300.0)
        .add_query_param("fermi_energy", 7.0)
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["regime"], "degenerate");
    let t_f = body["fermi_temperature"].as_f64().unwrap();
    assert!((t_f - 81_231.0).abs() < 10.0, "T_F = {t_f}");
    assert!(body["ratio"].as_f64().unwrap() < 0.01);
}

#[tokio::test]
async fn regime_rejects_non_positive_fermi_energy() {
    let response = server()
        .get("/api/v1/regime")
        .add_query_param("fermi_energy", -1.0)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn physics_info_reports_constants() {
    let response = server().get("/api/v1/physics-info").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let k_b = body["k_B_eV"].as_f64().unwrap();
    assert!((k_b - 8.617333262e-5).abs() < 1e-15);
    let k_b_si = body["k_B_SI"].as_f64().unwrap();
    assert!((k_b_si / 1.380649e-23 - 1.0).abs() < 1e-12);
    assert_eq!(body["regimes"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn export_csv_renders_rows() {
    let response = server()
        .get("/api/v1/export/csv")
        .add_query_param("temperature", 300.0)
        .add_query_param("points", 10)
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let csv = body["csv"].as_str().unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], "Energy (eV),Occupation f(E),Temperature (K),Mu (eV)");
    assert!(lines[1].starts_with("-1.000000,1.000000,300,0.5"));
    assert_eq!(body["filename"], "fermi_dirac_T300K.csv");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let response = server()
        .get("/api/v1/physics-info")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("fd-trace-1"),
        )
        .await;
    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), "fd-trace-1");
    assert_eq!(response.json::<Value>()["request_id"], "fd-trace-1");
}

#[tokio::test]
async fn health_probes() {
    let server = server();

    let live = server.get("/health/live").await;
    live.assert_status_ok();
    assert_eq!(live.json::<Value>()["status"], "ok");

    let ready = server.get("/health/ready").await;
    ready.assert_status_ok();
    let body = ready.json::<Value>();
    assert_eq!(body["max_points"], 10_000);
    assert!(body["started_at"].is_string());
}

#[tokio::test]
async fn metrics_endpoint_is_mounted() {
    let response = server().get("/metrics").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn metrics_endpoint_can_be_disabled() {
    let config = MetricsConfig {
        enabled: false,
        ..MetricsConfig::default()
    };
    let server = TestServer::new(build_router(test_state(), &config)).unwrap();
    let response = server.get("/metrics").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
