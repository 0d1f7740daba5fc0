//! Pure electrical calculators over the reference tables.
//!
//! Every function here is a single-shot transformation of its input: no
//! shared mutable state, no I/O, and identical input always yields
//! identical output.

pub mod cable_sizing;
pub mod compliance;
/// Ampacity derating for installation conditions.
pub mod derating;
pub mod error;
/// Connected and demand load estimation for buildings.
pub mod load;
pub mod power_quality;
pub mod transformer;
pub mod voltage_drop;

pub use cable_sizing::{CableSizingParameters, CableSizingResult, calculate_cable_sizing};
pub use compliance::{ComplianceReport, ElectricalDesign, check_electrical_compliance};
pub use derating::{DeratedCableResult, DeratingParameters, select_derated_cable};
pub use error::CalcError;
pub use load::{LoadEstimate, LoadParameters, estimate_electrical_load};
pub use power_quality::{PowerQualityParameters, PowerQualityResult, calculate_power_quality};
pub use transformer::{
    TransformerParameters, TransformerSizingResult, calculate_transformer_sizing,
};
pub use voltage_drop::{CircuitParameters, VoltageDropResult, calculate_voltage_drop};

use crate::tables::cable::{self, CableMaterial, CableSizeInput, CableSpec};

fn parse_material(name: &str) -> Option<CableMaterial> {
    name.parse().ok()
}

/// Resolves a client-supplied material/size pair to its catalogue row.
///
/// A missing material means copper. Any failure is reported as an
/// unknown pair so the message names exactly what the client sent.
fn resolve_cable(
    material: Option<&str>,
    size: Option<&CableSizeInput>,
) -> error::Result<(CableMaterial, &'static CableSpec)> {
    let material_name = material.unwrap_or(CableMaterial::default().as_str());
    let size_label = size.map(ToString::to_string).unwrap_or_default();
    let unknown = || CalcError::unknown_cable(material_name, size_label.clone());

    let material = parse_material(material_name).ok_or_else(unknown)?;
    let spec = size
        .and_then(CableSizeInput::mm2)
        .and_then(|mm2| cable::lookup(material, mm2))
        .ok_or_else(unknown)?;
    Ok((material, spec))
}
