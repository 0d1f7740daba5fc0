//! Power triangle and a coarse power-quality grade.
//!
//! THD and flicker are placeholder estimates drawn from a seeded RNG, not
//! measurements or models. The seed makes them reproducible, so repeated
//! requests with the same input and seed return identical results.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::error::{Required, Result, positive, power_factor};

const DEFAULT_FREQUENCY_HZ: f64 = 50.0;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerQualityParameters {
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub power_factor: Option<f64>,
    /// Defaults to 50 Hz.
    pub frequency: Option<f64>,
    /// Overrides the service-wide placeholder seed.
    pub seed: Option<u64>,
}

/// Coarse quality grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QualityGrade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityGrade {
    /// Grades THD (%), flicker severity and power factor.
    pub fn assess(thd_percent: f64, flicker: f64, power_factor: f64) -> Self {
        let mut score = 100;
        if thd_percent > 5.0 {
            score -= 20;
        }
        if flicker > 0.4 {
            score -= 15;
        }
        if power_factor < 0.9 {
            score -= 10;
        }

        match score {
            90.. => Self::Excellent,
            80..=89 => Self::Good,
            70..=79 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerQualityResult {
    /// W.
    pub active_power: f64,
    /// var.
    pub reactive_power: f64,
    /// VA.
    pub apparent_power: f64,
    pub power_factor: f64,
    pub frequency: f64,
    /// Total harmonic distortion (%), placeholder.
    pub thd: f64,
    /// Flicker severity, placeholder.
    pub flicker: f64,
    pub quality: QualityGrade,
    /// Always `true`: `thd` and `flicker` are not measured values.
    pub placeholder_estimates: bool,
}

/// Computes active/reactive/apparent power and grades the supply.
///
/// `default_seed` is used when the request does not carry its own seed.
///
/// # Errors
///
/// Returns [`CalcError::MissingParameters`](super::CalcError::MissingParameters)
/// when `voltage`, `current` or `powerFactor` is absent.
pub fn calculate_power_quality(
    params: &PowerQualityParameters,
    default_seed: u64,
) -> Result<PowerQualityResult> {
    let mut req = Required::new();
    let voltage = req.number("voltage", params.voltage);
    let current = req.number("current", params.current);
    let pf = req.number("powerFactor", params.power_factor);
    req.finish()?;

    let voltage = positive("voltage", voltage)?;
    let current = positive("current", current)?;
    let pf = power_factor(pf)?;
    let frequency = positive("frequency", params.frequency.unwrap_or(DEFAULT_FREQUENCY_HZ))?;

    let apparent_power = voltage * current;
    let mut rng = StdRng::seed_from_u64(params.seed.unwrap_or(default_seed));
    let thd = rng.random::<f64>() * 5.0 + 2.0;
    let flicker = rng.random::<f64>() * 0.5 + 0.1;

    Ok(PowerQualityResult {
        active_power: apparent_power * pf,
        reactive_power: apparent_power * pf.acos().sin(),
        apparent_power,
        power_factor: pf,
        frequency,
        thd,
        flicker,
        quality: QualityGrade::assess(thd, flicker, pf),
        placeholder_estimates: true,
    })
}
