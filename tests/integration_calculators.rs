//! End-to-end checks of the calculators against the published reference cases.

mod common;

use common::{assert_close, reference_circuit, reference_sizing, reference_transformer};
use tnb_calc::calc::{
    CalcError, ElectricalDesign, LoadParameters, TransformerParameters,
    calculate_cable_sizing, calculate_transformer_sizing, calculate_voltage_drop,
    check_electrical_compliance, estimate_electrical_load,
};
use tnb_calc::tables::cable::{cable_current_capacity, cable_resistance};
use tnb_calc::tables::{CableMaterial, max_allowable_drop, standard_requirements};

#[test]
fn table_lookups_are_the_oracle() {
    for material in [CableMaterial::Copper, CableMaterial::Aluminum] {
        for row in material.catalogue() {
            assert_eq!(
                cable_resistance(material, row.size_mm2),
                Some(row.resistance_ohm_per_km)
            );
            assert_eq!(cable_current_capacity(material, row.size_mm2), Some(row.ampacity_a));
        }
    }
}

#[test]
fn reference_voltage_drop() {
    let r = calculate_voltage_drop(&reference_circuit()).unwrap();
    assert_close(r.voltage_drop, 11.5, 1e-9);
    assert_close(r.voltage_drop_percent, 2.875, 1e-9);
    assert!(r.compliant);
    assert_eq!(r.recommendations, vec!["Monitor voltage regularly"]);
}

#[test]
fn drop_limits_at_boundaries() {
    assert_eq!(max_allowable_drop(230.0), 3.0);
    assert_eq!(max_allowable_drop(400.0), 4.0);
    assert_eq!(max_allowable_drop(11_000.0), 5.0);
}

#[test]
fn reference_transformer_sizing() {
    let r = calculate_transformer_sizing(&reference_transformer()).unwrap();
    assert_close(r.apparent_power, 111.11, 0.005);
    assert_close(r.diversified_load, 88.89, 0.005);
    assert_eq!(r.recommended_rating, 100);
}

#[test]
fn calculators_are_idempotent() {
    let circuit = reference_circuit();
    assert_eq!(
        format!("{:?}", calculate_voltage_drop(&circuit)),
        format!("{:?}", calculate_voltage_drop(&circuit))
    );

    let sizing = reference_sizing();
    assert_eq!(
        calculate_cable_sizing(&sizing).unwrap(),
        calculate_cable_sizing(&sizing).unwrap()
    );

    let transformer = reference_transformer();
    assert_eq!(
        calculate_transformer_sizing(&transformer).unwrap(),
        calculate_transformer_sizing(&transformer).unwrap()
    );
}

#[test]
fn omitted_voltage_is_named() {
    let mut circuit = reference_circuit();
    circuit.voltage = None;
    let err = calculate_voltage_drop(&circuit).unwrap_err();
    assert_eq!(err, CalcError::MissingParameters(vec!["voltage"]));
    assert!(err.to_string().contains("voltage"));
}

#[test]
fn unknown_standard_is_not_found() {
    assert!(standard_requirements("XX 0000").is_none());
    assert!(standard_requirements("MS IEC 60364").is_some());
}

#[test]
fn tight_drop_limit_degrades_to_largest_size() {
    let mut sizing = reference_sizing();
    sizing.voltage_drop_max = Some(0.01);
    let r = calculate_cable_sizing(&sizing).unwrap();
    assert_eq!(r.recommended_size, "120");
}

#[test]
fn sized_cable_passes_its_own_voltage_drop_check() {
    let sizing = calculate_cable_sizing(&reference_sizing()).unwrap();
    let mut circuit = reference_circuit();
    circuit.cable_size = Some(sizing.recommended_size.into());
    let drop = calculate_voltage_drop(&circuit).unwrap();
    assert!(drop.compliant);
    assert_close(drop.voltage_drop_percent, sizing.voltage_drop_percent, 1e-9);
}

#[test]
fn load_estimate_feeds_transformer_sizing() {
    let load: LoadParameters = serde_json::from_str(
        r#"{"areas":[{"type":"office","area":8000},{"type":"parking","area":4000}]}"#,
    )
    .unwrap();
    let estimate = estimate_electrical_load(&load).unwrap();
    // 160 kW + 20 kW connected → 0.9 demand factor → 162 kW.
    assert_close(estimate.demand_load, 162.0, 1e-9);

    let r = calculate_transformer_sizing(&TransformerParameters {
        total_load: Some(estimate.demand_load),
        voltage: Some(400.0),
        ..TransformerParameters::default()
    })
    .unwrap();
    // 162 / 0.9 · 0.8 = 144 kVA → 160 kVA.
    assert_eq!(r.recommended_rating, 160);
}

#[test]
fn compliance_accepts_free_form_json() {
    let design: ElectricalDesign = serde_json::from_value(serde_json::json!({
        "voltage": 400,
        "earthingSystem": "TN-C-S",
        "overcurrentProtection": "MCB",
        "cableSize": 10,
        "current": 70,
    }))
    .unwrap();
    let report = check_electrical_compliance(&design).unwrap();
    assert!(!report.compliant);
    assert_eq!(report.issues, vec!["Cable size 10mm² insufficient for 70A load"]);
    assert_eq!(report.standards, vec!["MS IEC 60364", "ST 1:2014", "MS 1979:2015"]);
}
