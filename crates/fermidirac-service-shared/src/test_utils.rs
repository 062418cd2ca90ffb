//! Fixtures for handler tests.
//!
//! Enable the `test-utils` feature to use these from dependent crates.

use crate::state::{AppState, RequestLimits};

/// Service name used by test states.
pub const TEST_SERVICE: &str = "fermidirac-test";

/// State with the default public limits.
pub fn test_state() -> AppState {
    AppState::new(TEST_SERVICE, RequestLimits::default())
}

/// State with `limits` applied.
pub fn test_state_with(limits: RequestLimits) -> AppState {
    AppState::new(TEST_SERVICE, limits)
}

/// Limits small enough to hit every ceiling with cheap requests.
pub fn tight_limits() -> RequestLimits {
    RequestLimits {
        max_points: 100,
        max_multi_points: 100,
        max_temperatures: 3,
        max_surface_energy_points: 50,
        max_surface_temperature_points: 50,
        max_surface_cells: 400,
        ..RequestLimits::default()
    }
}

/// Unique request id for a test.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}
