//! RC-oscillator model
//!
//! The HS1101 is the timing capacitor of an RC oscillator biased by
//! `oscillator_resistor`. The device counts cycles over a one-second window, so
//! a count is a frequency in Hz:
//!
//! ```text
//! f = 0.725 / (R_osc · (C_sensor + C_stray))
//! ```

use crate::config::SensorConfig;
use crate::constants::physics::{COUNT_WINDOW_S, OSCILLATOR_DUTY_FACTOR, PF_PER_F};
use crate::errors::DomainError;

use super::hs1101::{capacitance_baseline_at_temperature, capacitance_for_rh};

/// Sensor capacitance implied by an oscillator count, stray removed (pF)
///
/// # Errors
///
/// [`DomainError::NonPositiveCount`] unless `counts` is positive and finite.
pub fn capacitance_from_counts(config: &SensorConfig, counts: f64) -> Result<f64, DomainError> {
    if !(counts.is_finite() && counts > 0.0) {
        return Err(DomainError::NonPositiveCount { counts });
    }
    let frequency = counts / COUNT_WINDOW_S;
    let effective = OSCILLATOR_DUTY_FACTOR / (config.oscillator_resistor() * frequency);
    Ok(effective * PF_PER_F - config.stray_capacitance_pf())
}

/// Oscillator count produced by a sensor capacitance of `cap_pf` (counts)
///
/// Inverse of [`capacitance_from_counts`]; the configured stray capacitance
/// is added back before evaluating the oscillator.
///
/// # Errors
///
/// [`DomainError::NonPositiveCapacitance`] when sensor plus stray is not
/// positive.
pub fn counts_for_capacitance(config: &SensorConfig, cap_pf: f64) -> Result<f64, DomainError> {
    let total_pf = cap_pf + config.stray_capacitance_pf();
    if !(total_pf.is_finite() && total_pf > 0.0) {
        return Err(DomainError::NonPositiveCapacitance { capacitance_pf: total_pf });
    }
    let frequency = OSCILLATOR_DUTY_FACTOR / (config.oscillator_resistor() * total_pf / PF_PER_F);
    Ok(frequency * COUNT_WINDOW_S)
}

/// Oscillator count at `rh` % and `temp` °C (counts)
pub fn counts_for_rh_at_temperature(
    config: &SensorConfig,
    rh: f64,
    temp: f64,
) -> Result<f64, DomainError> {
    let cap = capacitance_for_rh(rh, capacitance_baseline_at_temperature(temp));
    counts_for_capacitance(config, cap)
}
