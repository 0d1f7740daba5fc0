//! Immutable reference data shared by all calculators.

/// Cable ampacity, resistance and reactance catalogue.
pub mod cable;
pub mod limits;
/// Standards and their requirement trees.
pub mod standards;

pub use cable::{CableMaterial, CableSizeInput, CableSpec};
pub use limits::{TRANSFORMER_RATINGS_KVA, max_allowable_drop};
pub use standards::{StandardDefinition, StandardsCatalogue, standard_requirements, tnb_standards};
