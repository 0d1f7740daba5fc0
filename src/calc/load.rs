//! Building load from floor areas by use, with a demand factor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::{CalcError, Result, positive};

/// Floor-area use class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUse {
    Office,
    Retail,
    Residential,
    Industrial,
    Warehouse,
    Parking,
    #[serde(other)]
    Other,
}

impl AreaUse {
    /// Design load density (W/m²).
    pub fn unit_load_w_per_m2(self) -> f64 {
        match self {
            Self::Office => 20.0,
            Self::Retail => 25.0,
            Self::Residential => 15.0,
            Self::Industrial => 30.0,
            Self::Warehouse => 10.0,
            Self::Parking => 5.0,
            Self::Other => 20.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AreaInput {
    #[serde(rename = "type")]
    pub area_use: AreaUse,
    /// Floor area (m²).
    pub area: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoadParameters {
    #[serde(default)]
    pub areas: Vec<AreaInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadEstimate {
    /// kW.
    pub total_connected_load: f64,
    pub demand_factor: f64,
    /// kW, usable as `totalLoad` for transformer sizing.
    pub demand_load: f64,
    /// Connected kW per use class.
    pub breakdown: BTreeMap<AreaUse, f64>,
}

/// Demand factor for a connected load (kW).
pub fn demand_factor(connected_kw: f64) -> f64 {
    if connected_kw <= 100.0 {
        1.0
    } else if connected_kw <= 500.0 {
        0.9
    } else if connected_kw <= 1000.0 {
        0.8
    } else {
        0.75
    }
}

/// Sums connected load over all areas and applies the demand factor.
///
/// # Errors
///
/// Returns [`CalcError::EmptyAreas`] for an empty list and
/// [`CalcError::NonPositive`] for a non-positive area.
pub fn estimate_electrical_load(params: &LoadParameters) -> Result<LoadEstimate> {
    if params.areas.is_empty() {
        return Err(CalcError::EmptyAreas);
    }

    let mut breakdown: BTreeMap<AreaUse, f64> = BTreeMap::new();
    for a in &params.areas {
        let area = positive("area", a.area)?;
        let kw = a.area_use.unit_load_w_per_m2() * area / 1000.0;
        *breakdown.entry(a.area_use).or_default() += kw;
    }

    let total: f64 = breakdown.values().sum();
    let factor = demand_factor(total);

    Ok(LoadEstimate {
        total_connected_load: total,
        demand_factor: factor,
        demand_load: total * factor,
        breakdown,
    })
}
