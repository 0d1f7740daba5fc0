//! Distribution transformer sizing on the standard kVA ladder.
//!
//! The efficiency and loss figures are simplified placeholder formulas
//! kept for compatibility with existing clients. They are not a physical
//! transformer model.

use serde::{Deserialize, Serialize};

use super::error::{CalcError, Required, Result, positive, power_factor};
use crate::tables::TRANSFORMER_RATINGS_KVA;
use crate::tables::limits::next_standard_rating;

const DEFAULT_POWER_FACTOR: f64 = 0.9;
const DEFAULT_DIVERSITY_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformerParameters {
    /// Connected active load (kW).
    pub total_load: Option<f64>,
    /// Secondary voltage (V).
    pub voltage: Option<f64>,
    /// Defaults to 0.9.
    pub power_factor: Option<f64>,
    /// Defaults to 0.8.
    pub diversity_factor: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformerLosses {
    /// Load-dependent loss (W).
    pub copper: f64,
    /// No-load loss (W).
    pub iron: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformerSizingResult {
    /// kVA.
    pub apparent_power: f64,
    /// kVA after diversity.
    pub diversified_load: f64,
    /// kVA.
    pub recommended_rating: u32,
    pub loading_percent: f64,
    /// Percent.
    pub efficiency: f64,
    pub losses: TransformerLosses,
}

/// Sizes a transformer for `totalLoad` after power factor and diversity.
///
/// # Errors
///
/// - [`CalcError::MissingParameters`] when `totalLoad` or `voltage` is absent
/// - [`CalcError::InvalidPowerFactor`] for a power factor outside (0, 1]
/// - [`CalcError::ExceedsMaxRating`] when the diversified load is above
///   the largest standard rating
pub fn calculate_transformer_sizing(
    params: &TransformerParameters,
) -> Result<TransformerSizingResult> {
    let mut req = Required::new();
    let total_load = req.number("totalLoad", params.total_load);
    let voltage = req.number("voltage", params.voltage);
    req.finish()?;

    let total_load = positive("totalLoad", total_load)?;
    positive("voltage", voltage)?;
    let pf = power_factor(params.power_factor.unwrap_or(DEFAULT_POWER_FACTOR))?;
    let df = positive(
        "diversityFactor",
        params.diversity_factor.unwrap_or(DEFAULT_DIVERSITY_FACTOR),
    )?;

    let apparent_power = total_load / pf;
    let diversified_load = apparent_power * df;
    let rating = next_standard_rating(diversified_load).ok_or(CalcError::ExceedsMaxRating {
        load_kva: diversified_load,
        max_kva: TRANSFORMER_RATINGS_KVA[TRANSFORMER_RATINGS_KVA.len() - 1],
    })?;
    let rating_kva = f64::from(rating);
    let load_factor = diversified_load / rating_kva;

    let copper = 0.01 * diversified_load * diversified_load;
    let iron = 0.005 * rating_kva;

    Ok(TransformerSizingResult {
        apparent_power,
        diversified_load,
        recommended_rating: rating,
        loading_percent: load_factor * 100.0,
        efficiency: 95.0 - 5.0 * (1.0 - load_factor),
        losses: TransformerLosses {
            copper,
            iron,
            total: copper + iron,
        },
    })
}
