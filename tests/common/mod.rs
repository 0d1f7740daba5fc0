//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use tnb_calc::calc::{CableSizingParameters, CircuitParameters, TransformerParameters};

/// The 400 V, 50 A, 16 mm² copper, 100 m reference circuit at unity power factor.
pub fn reference_circuit() -> CircuitParameters {
    CircuitParameters {
        voltage: Some(400.0),
        current: Some(50.0),
        cable_size: Some("16".into()),
        cable_type: Some("copper".to_string()),
        length: Some(100.0),
        power_factor: Some(1.0),
        phases: None,
    }
}

/// Cable sizing for the same 400 V / 50 A / 100 m run, all defaults.
pub fn reference_sizing() -> CableSizingParameters {
    CableSizingParameters {
        voltage: Some(400.0),
        current: Some(50.0),
        length: Some(100.0),
        voltage_drop_max: None,
        cable_type: None,
    }
}

/// 100 kW at 400 V with default power and diversity factors.
pub fn reference_transformer() -> TransformerParameters {
    TransformerParameters {
        total_load: Some(100.0),
        voltage: Some(400.0),
        power_factor: None,
        diversity_factor: None,
    }
}

/// Asserts `actual` is within `tol` of `expected`.
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}
