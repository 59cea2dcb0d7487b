//! HS1101 capacitance model
//!
//! The sensor's capacitance is a cubic in relative humidity scaled by a
//! baseline that drifts linearly with ambient temperature. Recovering RH from a
//! measured capacitance means solving that cubic, done here by bisection over a
//! bracket deliberately wider than 0..100 % so that readings slightly outside
//! the calibrated range still invert.

use crate::constants::sensors::*;
use crate::constants::tables::{RH_BRACKET_HIGH_PCT, RH_BRACKET_LOW_PCT};
use crate::errors::DomainError;
use crate::solver::bisect;

/// Sensor baseline capacitance at `temp` °C (pF)
pub fn capacitance_baseline_at_temperature(temp: f64) -> f64 {
    HS1101_BASELINE_PF + HS1101_TEMP_COEFF_PF_PER_C * temp
}

/// Sensor capacitance at `rh` % for a given baseline (pF)
pub fn capacitance_for_rh(rh: f64, baseline: f64) -> f64 {
    baseline * (((HS1101_RH3 * rh + HS1101_RH2) * rh + HS1101_RH1) * rh + HS1101_RH0)
}

/// Relative humidity that explains `cap` pF at `temp` °C (%)
///
/// The root is returned as found, without clamping to 0..100 %; callers decide
/// what an out-of-range humidity means for them.
///
/// # Errors
///
/// [`DomainError::NoSignChange`] when `cap` is outside what the fit can produce
/// anywhere in the bracket.
pub fn humidity_from_capacitance(cap: f64, temp: f64) -> Result<f64, DomainError> {
    let baseline = capacitance_baseline_at_temperature(temp);
    bisect(|rh| capacitance_for_rh(rh, baseline) - cap, RH_BRACKET_LOW_PCT, RH_BRACKET_HIGH_PCT)
}
