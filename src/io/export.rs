//! CSV export of the cable catalogue and cable-sizing sweeps.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::calc::{CableSizingParameters, calculate_cable_sizing};
use crate::tables::CableMaterial;

const CATALOGUE_HEADER: &[&str] = &[
    "material",
    "size_mm2",
    "ampacity_a",
    "resistance_ohm_per_km",
    "reactance_ohm_per_km",
];

const SWEEP_HEADER: &[&str] = &[
    "voltage_v",
    "current_a",
    "length_m",
    "recommended_size_mm2",
    "voltage_drop_pct",
    "ampacity_sufficient",
];

/// Load currents (A) covered by the default sizing sweep.
pub const SWEEP_CURRENTS_A: &[f64] = &[10.0, 20.0, 32.0, 50.0, 63.0, 100.0, 160.0, 250.0];
/// Circuit lengths (m) covered by the default sizing sweep.
pub const SWEEP_LENGTHS_M: &[f64] = &[10.0, 25.0, 50.0, 100.0, 200.0];

/// Writes every catalogue row for both materials to `path`.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_cable_catalogue(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_cable_catalogue(io::BufWriter::new(file))
}

/// Writes the cable catalogue as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_cable_catalogue(writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(CATALOGUE_HEADER)?;

    for material in [CableMaterial::Copper, CableMaterial::Aluminum] {
        for c in material.catalogue() {
            wtr.write_record(&[
                material.as_str().to_string(),
                c.size.to_string(),
                format!("{}", c.ampacity_a),
                format!("{}", c.resistance_ohm_per_km),
                format!("{}", c.reactance_ohm_per_km),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Runs cable sizing over `currents × lengths` at `voltage` and writes one
/// row per combination to `path`.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails, or if a
/// sizing input is rejected.
pub fn export_sizing_sweep(
    path: &Path,
    voltage: f64,
    material: CableMaterial,
    currents: &[f64],
    lengths: &[f64],
) -> io::Result<()> {
    let file = File::create(path)?;
    write_sizing_sweep(io::BufWriter::new(file), voltage, material, currents, lengths)
}

/// Writes a cable-sizing sweep as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails or a sizing input is rejected.
pub fn write_sizing_sweep(
    writer: impl Write,
    voltage: f64,
    material: CableMaterial,
    currents: &[f64],
    lengths: &[f64],
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(SWEEP_HEADER)?;

    for &current in currents {
        for &length in lengths {
            let params = CableSizingParameters {
                voltage: Some(voltage),
                current: Some(current),
                length: Some(length),
                voltage_drop_max: None,
                cable_type: Some(material.as_str().to_string()),
            };
            let r = calculate_cable_sizing(&params)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            wtr.write_record(&[
                format!("{voltage}"),
                format!("{current}"),
                format!("{length}"),
                r.recommended_size.to_string(),
                format!("{:.3}", r.voltage_drop_percent),
                r.ampacity_sufficient.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_header_and_all_rows() {
        let mut buf = Vec::new();
        write_cable_catalogue(&mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "material,size_mm2,ampacity_a,resistance_ohm_per_km,reactance_ohm_per_km"
        );
        assert_eq!(lines.len(), 1 + 12 + 7);
        assert_eq!(lines[6], "copper,16,85,1.15,0.1");
        assert_eq!(lines[13], "aluminum,16,68,1.91,0.1");
    }

    #[test]
    fn sweep_has_one_row_per_combination() {
        let mut buf = Vec::new();
        write_sizing_sweep(&mut buf, 400.0, CableMaterial::Copper, &[50.0], &[10.0, 100.0])
            .unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("voltage_v,current_a"));
        assert_eq!(lines[2], "400,50,100,16,2.875,true");
    }

    #[test]
    fn sweep_rejects_bad_voltage() {
        let mut buf = Vec::new();
        let err = write_sizing_sweep(&mut buf, 0.0, CableMaterial::Copper, &[10.0], &[10.0])
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn export_is_deterministic() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        for buf in [&mut a, &mut b] {
            write_sizing_sweep(
                buf,
                230.0,
                CableMaterial::Aluminum,
                SWEEP_CURRENTS_A,
                SWEEP_LENGTHS_M,
            )
            .unwrap();
        }
        assert_eq!(a, b);
    }
}
