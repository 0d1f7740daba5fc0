//! Rule-based design checklist against Malaysian wiring standards.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::Result;
use super::resolve_cable;
use crate::tables::CableSizeInput;
use crate::tables::standards::{RequirementNode, standard_codes, standard_requirements};

/// Above this voltage (V) an installation is high-voltage work.
const HIGH_VOLTAGE_THRESHOLD_V: f64 = 1000.0;

/// A loosely typed design attribute, judged by truthiness.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DesignFlag {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Any object or array, e.g. `{"type": "TN-S"}`.
    Structured(IgnoredAny),
}

impl DesignFlag {
    /// `false`, `0` and the empty string mean "not specified". Objects and
    /// arrays always count as specified, even when empty.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.trim().is_empty(),
            Self::Structured(_) => true,
        }
    }
}

fn is_set(flag: Option<&DesignFlag>) -> bool {
    flag.is_some_and(DesignFlag::is_set)
}

/// Free-form electrical design submitted for review.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricalDesign {
    #[serde(default, deserialize_with = "loose_number")]
    pub voltage: Option<f64>,
    pub high_voltage_license: Option<DesignFlag>,
    pub earthing_system: Option<DesignFlag>,
    pub overcurrent_protection: Option<DesignFlag>,
    pub cable_size: Option<CableSizeInput>,
    pub cable_type: Option<String>,
    #[serde(default, deserialize_with = "loose_number")]
    pub current: Option<f64>,
}

/// Accepts `400` or `"400"`; text that is not a number reads as absent.
fn loose_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Number(n)) => Some(n),
        Some(Loose::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// One failed rule and how to remedy it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceIssue {
    pub issue: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    pub compliant: bool,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    /// Every standard code known to the service.
    pub standards: Vec<String>,
}

impl ComplianceReport {
    fn new() -> Self {
        Self {
            compliant: true,
            issues: Vec::new(),
            recommendations: Vec::new(),
            standards: standard_codes(),
        }
    }

    fn record(&mut self, finding: ComplianceIssue) {
        self.compliant = false;
        self.issues.push(finding.issue);
        self.recommendations.push(finding.recommendation);
    }
}

/// Earthing arrangements accepted by ST 1:2014.
fn accepted_earthing_systems() -> &'static str {
    standard_requirements("ST 1:2014")
        .and_then(|st| st.requirements.get(&["earthing", "systemType"]))
        .and_then(RequirementNode::text)
        .unwrap_or("TN-S or TN-C-S")
}

fn finding(issue: impl Into<String>, recommendation: impl Into<String>) -> ComplianceIssue {
    ComplianceIssue {
        issue: issue.into(),
        recommendation: recommendation.into(),
    }
}

/// Runs the checklist; every rule is independent and reported in order.
///
/// # Errors
///
/// Returns [`CalcError::UnknownCable`](super::CalcError::UnknownCable) when
/// the cable rule runs against a size missing from the catalogue.
pub fn check_electrical_compliance(design: &ElectricalDesign) -> Result<ComplianceReport> {
    let mut report = ComplianceReport::new();

    if design.voltage.unwrap_or(0.0) > HIGH_VOLTAGE_THRESHOLD_V
        && !is_set(design.high_voltage_license.as_ref())
    {
        report.record(finding(
            "High voltage installation requires appropriate license",
            "Obtain high voltage electrical contractor license",
        ));
    }

    if !is_set(design.earthing_system.as_ref()) {
        report.record(finding(
            "Earthing system not specified",
            format!("Implement {} earthing system", accepted_earthing_systems()),
        ));
    }

    if !is_set(design.overcurrent_protection.as_ref()) {
        report.record(finding(
            "Overcurrent protection not specified",
            "Install appropriate circuit breakers or fuses",
        ));
    }

    let size = design.cable_size.as_ref().filter(|s| s.is_present());
    let current = design.current.filter(|c| *c != 0.0);
    if let (Some(size), Some(current)) = (size, current) {
        let (_, cable) = resolve_cable(design.cable_type.as_deref(), Some(size))?;
        if current > cable.ampacity_a {
            report.record(finding(
                format!("Cable size {}mm² insufficient for {current}A load", cable.size),
                "Increase cable size or reduce load current",
            ));
        }
    }

    Ok(report)
}
