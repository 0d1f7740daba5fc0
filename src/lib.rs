//! Electrical design calculators for Malaysian (TNB / MS IEC) installations.

#[cfg(feature = "api")]
pub mod api;
/// Voltage drop, cable, transformer, compliance and load calculators.
pub mod calc;
pub mod config;
pub mod io;
pub mod logging;
/// Reference tables: cables, limits, standards.
pub mod tables;
