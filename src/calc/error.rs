//! Calculator failure conditions.

use thiserror::Error;

/// Reasons a calculation rejects its input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("missing required parameters: {}", .0.join(", "))]
    MissingParameters(Vec<&'static str>),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("power factor must be in (0, 1], got {0}")]
    InvalidPowerFactor(f64),

    #[error("phases must be 1 or 3, got {0}")]
    InvalidPhases(u8),

    #[error("unknown cable type: {0}")]
    UnknownMaterial(String),

    #[error("invalid cable type or size: {material} {size}mm²")]
    UnknownCable { material: String, size: String },

    #[error("diversified load {load_kva:.1} kVA exceeds the largest rating ({max_kva} kVA)")]
    ExceedsMaxRating { load_kva: f64, max_kva: u32 },

    #[error("at least one area is required")]
    EmptyAreas,
}

impl CalcError {
    pub fn unknown_cable(material: impl Into<String>, size: impl Into<String>) -> Self {
        Self::UnknownCable {
            material: material.into(),
            size: size.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

/// Collects the names of absent required parameters.
///
/// A value is absent when it is `None` or zero, matching how the browser
/// client leaves untouched numeric form fields.
#[derive(Debug, Default)]
pub(crate) struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records `name` as missing unless `value` is present and non-zero.
    /// Returns the value for later use (0.0 when missing).
    pub(crate) fn number(&mut self, name: &'static str, value: Option<f64>) -> f64 {
        match value {
            Some(v) if v != 0.0 && !v.is_nan() => v,
            _ => {
                self.missing.push(name);
                0.0
            }
        }
    }

    pub(crate) fn flag(&mut self, name: &'static str, present: bool) {
        if !present {
            self.missing.push(name);
        }
    }

    pub(crate) fn finish(self) -> Result<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(CalcError::MissingParameters(self.missing))
        }
    }
}

/// Rejects negative or infinite magnitudes.
pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonPositive { field, value })
    }
}

pub(crate) fn power_factor(value: f64) -> Result<f64> {
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(CalcError::InvalidPowerFactor(value))
    }
}
