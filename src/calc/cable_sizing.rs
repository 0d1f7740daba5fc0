//! Smallest conductor that keeps the voltage drop within limit.

use serde::{Deserialize, Serialize};

use super::error::{CalcError, Required, Result, positive};
use super::parse_material;
use crate::tables::cable::{self, CableMaterial, CableSpec};
use crate::tables::max_allowable_drop;

/// Alternatives must lie within this many mm² of the chosen size.
const ALTERNATIVE_WINDOW_MM2: f64 = 25.0;
const MAX_ALTERNATIVES: usize = 3;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CableSizingParameters {
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    /// One-way circuit length (m).
    pub length: Option<f64>,
    /// Allowed drop (%). Defaults to the TNB limit for `voltage`.
    pub voltage_drop_max: Option<f64>,
    /// Defaults to copper.
    pub cable_type: Option<String>,
}

/// A neighbouring catalogue size offered for comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CableAlternative {
    pub size: &'static str,
    pub current: f64,
    pub resistance: f64,
}

impl From<&CableSpec> for CableAlternative {
    fn from(c: &CableSpec) -> Self {
        Self {
            size: c.size,
            current: c.ampacity_a,
            resistance: c.resistance_ohm_per_km,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CableSizingResult {
    pub recommended_size: &'static str,
    pub cable_type: CableMaterial,
    /// Highest conductor resistance (Ω/km) that meets the drop limit.
    pub max_resistance_per_km: f64,
    pub actual_resistance: f64,
    pub actual_current_capacity: f64,
    pub voltage_drop_percent: f64,
    /// `false` when the load current exceeds the chosen size's rating.
    pub ampacity_sufficient: bool,
    pub alternatives: Vec<CableAlternative>,
}

/// Picks the smallest catalogue size whose resistance satisfies the
/// allowed drop. When no size is good enough, the largest size is
/// returned rather than an error.
///
/// # Errors
///
/// Returns [`CalcError::MissingParameters`] when `voltage`, `current` or
/// `length` is absent, and [`CalcError::UnknownMaterial`] for an unknown
/// material name.
pub fn calculate_cable_sizing(params: &CableSizingParameters) -> Result<CableSizingResult> {
    let mut req = Required::new();
    let voltage = req.number("voltage", params.voltage);
    let current = req.number("current", params.current);
    let length = req.number("length", params.length);
    req.finish()?;

    let voltage = positive("voltage", voltage)?;
    let current = positive("current", current)?;
    let length = positive("length", length)?;
    let drop_max = match params.voltage_drop_max {
        Some(v) if v != 0.0 => positive("voltageDropMax", v)?,
        _ => max_allowable_drop(voltage),
    };
    let material = match params.cable_type.as_deref() {
        Some(name) if !name.trim().is_empty() => {
            parse_material(name).ok_or_else(|| CalcError::UnknownMaterial(name.to_string()))?
        }
        _ => CableMaterial::default(),
    };

    // Loop resistance over 2·L must not exceed the allowed drop at I.
    let max_resistance_per_km = (drop_max / 100.0 * voltage) / (2.0 * current * length / 1000.0);
    let chosen = optimal_size(max_resistance_per_km, material);

    Ok(CableSizingResult {
        recommended_size: chosen.size,
        cable_type: material,
        max_resistance_per_km,
        actual_resistance: chosen.resistance_ohm_per_km,
        actual_current_capacity: chosen.ampacity_a,
        voltage_drop_percent: 2.0 * current * chosen.resistance_ohm_per_km * length
            / (1000.0 * voltage)
            * 100.0,
        ampacity_sufficient: current <= chosen.ampacity_a,
        alternatives: alternatives(chosen, material),
    })
}

fn optimal_size(max_resistance_per_km: f64, material: CableMaterial) -> &'static CableSpec {
    material
        .catalogue()
        .iter()
        .find(|c| c.resistance_ohm_per_km <= max_resistance_per_km)
        .unwrap_or_else(|| cable::largest(material))
}

/// Neighbouring sizes, whole-number sections first and fractional ones
/// (1.5, 2.5) after, each group ascending.
fn alternatives(chosen: &CableSpec, material: CableMaterial) -> Vec<CableAlternative> {
    let catalogue = material.catalogue();
    let whole = catalogue.iter().filter(|c| c.size_mm2.fract() == 0.0);
    let fractional = catalogue.iter().filter(|c| c.size_mm2.fract() != 0.0);
    whole
        .chain(fractional)
        .filter(|c| c.size != chosen.size)
        .filter(|c| (c.size_mm2 - chosen.size_mm2).abs() <= ALTERNATIVE_WINDOW_MM2)
        .take(MAX_ALTERNATIVES)
        .map(CableAlternative::from)
        .collect()
}
