//! Constants for Hygrotable Core
//!
//! Every numeric value the models and table builder depend on is named here,
//! with its unit and where it comes from. Nothing in this module is mutable.
//!
//! ## Organization
//!
//! - **Physics**: temperature reference points and the RC-oscillator model
//! - **Sensors**: the HS1101 capacitance fit and its temperature drift
//! - **Tables**: solver settings, default configuration and storage limits

/// Thermodynamic reference points and oscillator constants.
pub mod physics;

/// HS1101 manufacturer fit coefficients.
pub mod sensors;

/// Solver parameters, configuration defaults and storage widths.
pub mod tables;

pub use physics::{KELVIN_OFFSET, REFERENCE_TEMPERATURE_K, OSCILLATOR_DUTY_FACTOR};
pub use sensors::{HS1101_BASELINE_PF, HS1101_TEMP_COEFF_PF_PER_C};
pub use tables::{BISECTION_ITERATIONS, RH_BRACKET_LOW_PCT, RH_BRACKET_HIGH_PCT};
