//! TNB voltage-drop limits and the standard distribution transformer ladder.

/// Standard distribution transformer ratings (kVA), ascending.
pub const TRANSFORMER_RATINGS_KVA: &[u32] = &[
    25, 50, 100, 160, 250, 315, 500, 630, 800, 1000, 1250, 1600, 2000, 2500,
];

/// Maximum allowable voltage drop (%) for a nominal system voltage.
///
/// Step function: up to 230 V → 3 %, up to 400 V → 4 %, above → 5 %.
/// Both boundaries are inclusive.
pub fn max_allowable_drop(voltage: f64) -> f64 {
    if voltage <= 230.0 {
        3.0
    } else if voltage <= 400.0 {
        4.0
    } else {
        5.0
    }
}

/// First standard rating at or above `load_kva`, `None` past the top of the ladder.
pub fn next_standard_rating(load_kva: f64) -> Option<u32> {
    TRANSFORMER_RATINGS_KVA
        .iter()
        .copied()
        .find(|&r| f64::from(r) >= load_kva)
}
