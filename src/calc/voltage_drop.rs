//! Voltage-drop check against TNB limits.
//!
//! Single-phase circuits use the simplified resistive drop. Three-phase
//! circuits add the cable reactance and use the line-to-line factor √3.

use serde::{Deserialize, Serialize};

use super::error::{CalcError, Required, Result, positive, power_factor};
use super::resolve_cable;
use crate::tables::{CableSizeInput, max_allowable_drop};

/// Advisory threshold (%) above which regular monitoring is suggested.
const MONITOR_THRESHOLD_PCT: f64 = 2.0;

const SINGLE_PHASE: u8 = 1;
const THREE_PHASE: u8 = 3;

/// Circuit under test.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitParameters {
    /// Nominal voltage (V).
    pub voltage: Option<f64>,
    /// Load current (A).
    pub current: Option<f64>,
    pub cable_size: Option<CableSizeInput>,
    /// `"copper"` or `"aluminum"`.
    pub cable_type: Option<String>,
    /// One-way circuit length (m).
    pub length: Option<f64>,
    /// Defaults to 1.0.
    pub power_factor: Option<f64>,
    /// 1 or 3; defaults to 1.
    pub phases: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoltageDropResult {
    pub phases: u8,
    /// Voltage drop (V).
    pub voltage_drop: f64,
    /// Voltage drop as a percentage of nominal voltage.
    pub voltage_drop_percent: f64,
    pub max_allowable_drop_percent: f64,
    pub compliant: bool,
    pub recommendations: Vec<String>,
}

/// Computes the drop and checks it against the voltage-dependent limit.
///
/// - single-phase: `2·I·R·L·pf / 1000`
/// - three-phase: `√3·I·(R·pf + X·sin φ)·L / 1000`, with `cos φ = pf`
///
/// # Errors
///
/// - [`CalcError::MissingParameters`](super::CalcError::MissingParameters)
///   listing every absent required field
/// - [`CalcError::UnknownCable`](super::CalcError::UnknownCable) when the
///   material/size pair is not catalogued
/// - [`CalcError::InvalidPhases`] for anything but 1 or 3 phases
pub fn calculate_voltage_drop(params: &CircuitParameters) -> Result<VoltageDropResult> {
    let mut req = Required::new();
    let voltage = req.number("voltage", params.voltage);
    let current = req.number("current", params.current);
    req.flag(
        "cableSize",
        params.cable_size.as_ref().is_some_and(CableSizeInput::is_present),
    );
    req.flag(
        "cableType",
        params.cable_type.as_deref().is_some_and(|t| !t.trim().is_empty()),
    );
    let length = req.number("length", params.length);
    req.finish()?;

    let voltage = positive("voltage", voltage)?;
    let current = positive("current", current)?;
    let length = positive("length", length)?;
    let pf = power_factor(params.power_factor.unwrap_or(1.0))?;
    let phases = params.phases.unwrap_or(SINGLE_PHASE);

    let (_, cable) = resolve_cable(params.cable_type.as_deref(), params.cable_size.as_ref())?;

    let voltage_drop = match phases {
        SINGLE_PHASE => 2.0 * current * cable.resistance_ohm_per_km * length * pf / 1000.0,
        THREE_PHASE => {
            let r = cable.resistance_ohm_per_km * length / 1000.0;
            let x = cable.reactance_ohm_per_km * length / 1000.0;
            let sin_phi = pf.acos().sin();
            3f64.sqrt() * current * (r * pf + x * sin_phi)
        }
        other => return Err(CalcError::InvalidPhases(other)),
    };
    let voltage_drop_percent = voltage_drop / voltage * 100.0;
    let max_allowable = max_allowable_drop(voltage);

    Ok(VoltageDropResult {
        phases,
        voltage_drop,
        voltage_drop_percent,
        max_allowable_drop_percent: max_allowable,
        compliant: voltage_drop_percent <= max_allowable,
        recommendations: recommendations(voltage_drop_percent, max_allowable),
    })
}

fn recommendations(drop_percent: f64, max_allowable: f64) -> Vec<String> {
    let mut out = Vec::new();
    if drop_percent > max_allowable {
        out.push("Increase cable size".to_string());
        out.push("Reduce circuit length".to_string());
        out.push("Consider voltage compensation equipment".to_string());
    }
    if drop_percent > MONITOR_THRESHOLD_PCT {
        out.push("Monitor voltage regularly".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_400v() -> CircuitParameters {
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

    #[test]
    fn reference_circuit_is_compliant_with_advisory() {
        let r = calculate_voltage_drop(&params_400v()).unwrap();
        assert!((r.voltage_drop - 11.5).abs() < 1e-9);
        assert!((r.voltage_drop_percent - 2.875).abs() < 1e-9);
        assert_eq!(r.max_allowable_drop_percent, 4.0);
        assert!(r.compliant);
        assert_eq!(r.recommendations, vec!["Monitor voltage regularly"]);
    }

    #[test]
    fn non_compliant_recommendations_in_fixed_order() {
        let mut p = params_400v();
        p.voltage = Some(230.0);
        let r = calculate_voltage_drop(&p).unwrap();
        assert!(!r.compliant);
        assert_eq!(
            r.recommendations,
            vec![
                "Increase cable size",
                "Reduce circuit length",
                "Consider voltage compensation equipment",
                "Monitor voltage regularly",
            ]
        );
    }

    #[test]
    fn short_circuit_has_no_recommendations() {
        let mut p = params_400v();
        p.length = Some(10.0);
        let r = calculate_voltage_drop(&p).unwrap();
        assert!(r.compliant);
        assert!(r.recommendations.is_empty());
    }

    #[test]
    fn power_factor_defaults_to_unity() {
        let mut p = params_400v();
        p.power_factor = None;
        let with_default = calculate_voltage_drop(&p).unwrap();
        assert_eq!(with_default, calculate_voltage_drop(&params_400v()).unwrap());
    }

    #[test]
    fn three_phase_at_unity_is_resistive_only() {
        let mut p = params_400v();
        p.phases = Some(3);
        let r = calculate_voltage_drop(&p).unwrap();
        assert_eq!(r.phases, 3);
        // √3 · 50 A · 1.15 Ω/km · 0.1 km
        assert!((r.voltage_drop - 3f64.sqrt() * 50.0 * 0.115).abs() < 1e-9);
        assert!(r.compliant);
    }

    #[test]
    fn three_phase_adds_reactive_component() {
        let mut p = params_400v();
        p.phases = Some(3);
        p.power_factor = Some(0.8);
        let r = calculate_voltage_drop(&p).unwrap();
        // R = 0.115 Ω, X = 0.010 Ω, sin φ = 0.6
        let expected = 3f64.sqrt() * 50.0 * (0.115 * 0.8 + 0.010 * 0.6);
        assert!((r.voltage_drop - expected).abs() < 1e-9);
        assert!((r.voltage_drop_percent - expected / 400.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn single_phase_is_the_default() {
        let mut p = params_400v();
        p.phases = Some(1);
        let explicit = calculate_voltage_drop(&p).unwrap();
        assert_eq!(explicit, calculate_voltage_drop(&params_400v()).unwrap());
        assert_eq!(explicit.phases, 1);
    }

    #[test]
    fn two_phases_are_rejected() {
        let mut p = params_400v();
        p.phases = Some(2);
        assert_eq!(calculate_voltage_drop(&p), Err(CalcError::InvalidPhases(2)));
    }

    #[test]
    fn numeric_cable_size_is_accepted() {
        let mut p = params_400v();
        p.cable_size = Some(16.0.into());
        assert!(calculate_voltage_drop(&p).is_ok());
    }

    #[test]
    fn missing_voltage_is_reported() {
        let mut p = params_400v();
        p.voltage = None;
        let err = calculate_voltage_drop(&p).unwrap_err();
        assert_eq!(err, CalcError::MissingParameters(vec!["voltage"]));
    }

    #[test]
    fn all_missing_fields_are_listed() {
        let err = calculate_voltage_drop(&CircuitParameters::default()).unwrap_err();
        assert_eq!(
            err,
            CalcError::MissingParameters(vec![
                "voltage",
                "current",
                "cableSize",
                "cableType",
                "length"
            ])
        );
    }

    #[test]
    fn unknown_cable_pair_is_rejected() {
        let mut p = params_400v();
        p.cable_type = Some("aluminum".to_string());
        p.cable_size = Some("1.5".into());
        let err = calculate_voltage_drop(&p).unwrap_err();
        assert!(matches!(err, CalcError::UnknownCable { .. }));
        assert!(err.to_string().contains("aluminum 1.5"));
    }

    #[test]
    fn negative_length_is_rejected() {
        let mut p = params_400v();
        p.length = Some(-5.0);
        assert!(matches!(
            calculate_voltage_drop(&p),
            Err(CalcError::NonPositive { field: "length", .. })
        ));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let p = params_400v();
        assert_eq!(
            calculate_voltage_drop(&p).unwrap(),
            calculate_voltage_drop(&p).unwrap()
        );
    }
}
