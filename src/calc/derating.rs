//! Cable selection by derated current-carrying capacity (MS IEC 60364-5-52).

use serde::{Deserialize, Serialize};

use super::error::{CalcError, Required, Result, positive};
use super::parse_material;
use crate::tables::cable::{self, CableMaterial};

const DEFAULT_AMBIENT_C: f64 = 30.0;

/// How the cable run is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallationMethod {
    FreeAir,
    #[default]
    Tray,
    Conduit,
    Buried,
}

impl InstallationMethod {
    pub fn factor(self) -> f64 {
        match self {
            Self::FreeAir => 1.0,
            Self::Tray => 0.95,
            Self::Conduit => 0.8,
            Self::Buried => 0.9,
        }
    }
}

/// Ambient temperature correction.
pub fn temperature_factor(ambient_c: f64) -> f64 {
    if ambient_c <= 30.0 {
        1.0
    } else if ambient_c <= 35.0 {
        0.94
    } else if ambient_c <= 40.0 {
        0.87
    } else if ambient_c <= 45.0 {
        0.79
    } else {
        0.71
    }
}

/// Correction for circuits grouped together.
pub fn grouping_factor(circuits: u32) -> f64 {
    match circuits {
        0..=1 => 1.0,
        2..=3 => 0.8,
        4..=6 => 0.7,
        _ => 0.6,
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeratingParameters {
    /// Design current (A).
    pub current: Option<f64>,
    /// °C, defaults to 30.
    pub ambient_temperature: Option<f64>,
    /// Defaults to 1.
    pub grouped_circuits: Option<u32>,
    pub installation_method: Option<InstallationMethod>,
    pub cable_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeratingFactors {
    pub temperature: f64,
    pub grouping: f64,
    pub installation: f64,
    pub overall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeratedCableResult {
    /// Tabulated current the cable must carry after correction (A).
    pub derated_current: f64,
    pub recommended_size: &'static str,
    pub cable_type: CableMaterial,
    pub current_carrying_capacity: f64,
    pub derating_factors: DeratingFactors,
    /// `false` when even the largest size falls short.
    pub adequate: bool,
}

/// Corrects the design current for installation conditions and picks the
/// smallest size whose tabulated rating covers it. Ratings come from the
/// same catalogue as cable sizing, so both calculators agree on a size's
/// capacity. Falls back to the largest size when none does.
///
/// # Errors
///
/// Returns [`CalcError::MissingParameters`] without a current and
/// [`CalcError::UnknownMaterial`] for an unknown material name.
pub fn select_derated_cable(params: &DeratingParameters) -> Result<DeratedCableResult> {
    let mut req = Required::new();
    let current = req.number("current", params.current);
    req.finish()?;
    let current = positive("current", current)?;

    let material = match params.cable_type.as_deref() {
        Some(name) if !name.trim().is_empty() => {
            parse_material(name).ok_or_else(|| CalcError::UnknownMaterial(name.to_string()))?
        }
        _ => CableMaterial::default(),
    };

    let temperature = temperature_factor(params.ambient_temperature.unwrap_or(DEFAULT_AMBIENT_C));
    let grouping = grouping_factor(params.grouped_circuits.unwrap_or(1));
    let installation = params.installation_method.unwrap_or_default().factor();
    let overall = temperature * grouping * installation;
    let derated_current = current / overall;

    let chosen = material
        .catalogue()
        .iter()
        .find(|c| c.ampacity_a >= derated_current)
        .unwrap_or_else(|| cable::largest(material));

    Ok(DeratedCableResult {
        derated_current,
        recommended_size: chosen.size,
        cable_type: material,
        current_carrying_capacity: chosen.ampacity_a,
        derating_factors: DeratingFactors {
            temperature,
            grouping,
            installation,
            overall,
        },
        adequate: chosen.ampacity_a >= derated_current,
    })
}
