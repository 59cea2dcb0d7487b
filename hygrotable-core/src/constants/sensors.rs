//! HS1101 Sensor Characteristics
//!
//! Capacitance model from the HS1101 datasheet:
//!
//! ```text
//! C(RH) = C_base(T) · (1.25e-7·RH³ − 1.36e-5·RH² + 2.19e-3·RH + 0.9)
//! C_base(T) = 180 pF + 0.04 pF/°C · T
//! ```
//!
//! The cubic has a strictly positive derivative for every RH, so it is
//! monotonic but has no convenient closed-form inverse.

/// Nominal sensor capacitance baseline (pF).
///
/// Source: HS1101 datasheet, typical capacitance at 55 % RH is 180 pF
pub const HS1101_BASELINE_PF: f64 = 180.0;

/// Baseline drift with ambient temperature (pF/°C).
///
/// Source: HS1101 datasheet temperature coefficient
pub const HS1101_TEMP_COEFF_PF_PER_C: f64 = 0.04;

/// Cubic coefficient of the normalized capacitance fit.
pub const HS1101_RH3: f64 = 1.25e-7;

/// Quadratic coefficient of the normalized capacitance fit.
pub const HS1101_RH2: f64 = -1.36e-5;

/// Linear coefficient of the normalized capacitance fit.
pub const HS1101_RH1: f64 = 2.19e-3;

/// Constant term of the normalized capacitance fit.
pub const HS1101_RH0: f64 = 0.9;

/// Physical relative humidity bounds used for the count-domain corners (%).
pub const RH_DRY_PCT: f64 = 0.0;

/// Saturated air (%).
pub const RH_SATURATED_PCT: f64 = 100.0;
