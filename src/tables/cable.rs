//! Cable catalogue: continuous current rating, conductor resistance and
//! reactance per material and cross-section.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Conductor material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CableMaterial {
    #[default]
    Copper,
    Aluminum,
}

impl CableMaterial {
    /// Catalogue entries for this material, sorted by ascending cross-section.
    pub fn catalogue(self) -> &'static [CableSpec] {
        match self {
            Self::Copper => COPPER,
            Self::Aluminum => ALUMINUM,
        }
    }

    /// Lowercase name as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Copper => "copper",
            Self::Aluminum => "aluminum",
        }
    }
}

impl fmt::Display for CableMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CableMaterial {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "copper" | "cu" => Ok(Self::Copper),
            "aluminum" | "aluminium" | "al" => Ok(Self::Aluminum),
            other => Err(format!("unknown cable material \"{other}\"")),
        }
    }
}

/// One row of the cable catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CableSpec {
    /// Cross-section label as published (mm²).
    pub size: &'static str,
    /// Cross-section (mm²).
    pub size_mm2: f64,
    /// Continuous current rating (A).
    pub ampacity_a: f64,
    /// Conductor resistance (Ω/km).
    pub resistance_ohm_per_km: f64,
    /// Series reactance (Ω/km) of a multicore cable.
    pub reactance_ohm_per_km: f64,
}

const fn spec(
    size: &'static str,
    size_mm2: f64,
    ampacity_a: f64,
    resistance: f64,
    reactance: f64,
) -> CableSpec {
    CableSpec {
        size,
        size_mm2,
        ampacity_a,
        resistance_ohm_per_km: resistance,
        reactance_ohm_per_km: reactance,
    }
}

// Reactance depends on geometry, not conductor material; sizes above
// 70 mm² keep the 70 mm² figure.
const COPPER: &[CableSpec] = &[
    spec("1.5", 1.5, 20.0, 12.1, 0.15),
    spec("2.5", 2.5, 27.0, 7.41, 0.14),
    spec("4", 4.0, 37.0, 4.61, 0.13),
    spec("6", 6.0, 47.0, 3.08, 0.12),
    spec("10", 10.0, 65.0, 1.83, 0.11),
    spec("16", 16.0, 85.0, 1.15, 0.10),
    spec("25", 25.0, 115.0, 0.727, 0.09),
    spec("35", 35.0, 140.0, 0.524, 0.09),
    spec("50", 50.0, 170.0, 0.387, 0.08),
    spec("70", 70.0, 210.0, 0.268, 0.08),
    spec("95", 95.0, 255.0, 0.193, 0.08),
    spec("120", 120.0, 290.0, 0.153, 0.08),
];

const ALUMINUM: &[CableSpec] = &[
    spec("16", 16.0, 68.0, 1.91, 0.10),
    spec("25", 25.0, 92.0, 1.20, 0.09),
    spec("35", 35.0, 112.0, 0.868, 0.09),
    spec("50", 50.0, 136.0, 0.641, 0.08),
    spec("70", 70.0, 168.0, 0.443, 0.08),
    spec("95", 95.0, 204.0, 0.320, 0.08),
    spec("120", 120.0, 232.0, 0.253, 0.08),
];

/// Cable cross-section as supplied by a client: `"16"` or `16`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CableSizeInput {
    Number(f64),
    Text(String),
}

impl CableSizeInput {
    /// Numeric cross-section, `None` if the text is not a number.
    pub fn mm2(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().trim_end_matches("mm²").trim().parse().ok(),
        }
    }

    /// JavaScript-style truthiness: zero and the empty string count as absent.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0,
            Self::Text(s) => !s.trim().is_empty(),
        }
    }
}

impl fmt::Display for CableSizeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CableSizeInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for CableSizeInput {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Looks up a catalogue entry by material and cross-section (mm²).
pub fn lookup(material: CableMaterial, size_mm2: f64) -> Option<&'static CableSpec> {
    material
        .catalogue()
        .iter()
        .find(|c| (c.size_mm2 - size_mm2).abs() < 1e-9)
}

/// Conductor resistance (Ω/km) for a catalogue entry.
pub fn cable_resistance(material: CableMaterial, size_mm2: f64) -> Option<f64> {
    lookup(material, size_mm2).map(|c| c.resistance_ohm_per_km)
}

/// Series reactance (Ω/km) for a catalogue entry.
pub fn cable_reactance(material: CableMaterial, size_mm2: f64) -> Option<f64> {
    lookup(material, size_mm2).map(|c| c.reactance_ohm_per_km)
}

/// Continuous current rating (A) for a catalogue entry.
pub fn cable_current_capacity(material: CableMaterial, size_mm2: f64) -> Option<f64> {
    lookup(material, size_mm2).map(|c| c.ampacity_a)
}

/// Largest cross-section available for a material.
pub fn largest(material: CableMaterial) -> &'static CableSpec {
    let table = material.catalogue();
    &table[table.len() - 1]
}
