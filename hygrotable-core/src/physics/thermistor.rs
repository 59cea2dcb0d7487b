//! NTC thermistor and divider model
//!
//! ## Beta Law
//!
//! ```text
//! R(T) = R25 / exp(β · (1/T₁ − 1/T))      T in K, T₁ = 298.15 K
//! T(R) = T₁ / (1 − T₁ · ln(R25/R) / β)
//! ```
//!
//! The inverse is written with T₁ in the numerator so that R = R25 maps back to
//! exactly 25 °C.
//!
//! ## Divider
//!
//! With the thermistor on the high side the ADC sees
//! `Rsense / (Rsense + Rth)` of full scale; on the low side
//! `Rth / (Rsense + Rth)`. See [`DividerTopology`].

use crate::config::{DividerTopology, SensorConfig};
use crate::constants::physics::{KELVIN_OFFSET, REFERENCE_TEMPERATURE_K};
use crate::errors::DomainError;

/// Thermistor resistance at `t` °C (Ω)
///
/// Any finite temperature above absolute zero is accepted; staying inside the
/// thermistor's rated range is the caller's responsibility.
pub fn resistance_at_temperature(config: &SensorConfig, t: f64) -> f64 {
    let x = 1.0 / REFERENCE_TEMPERATURE_K - 1.0 / (t + KELVIN_OFFSET);
    config.thermistor_r25() / libm::exp(config.beta() * x)
}

/// Temperature for a thermistor resistance of `r` Ω (°C)
///
/// # Errors
///
/// - [`DomainError::NonPositiveResistance`] unless `r` is positive and finite
/// - [`DomainError::ResistanceOutOfRange`] when `r` is so small the Beta law
///   gives no positive absolute temperature
pub fn temperature_for_resistance(config: &SensorConfig, r: f64) -> Result<f64, DomainError> {
    if !(r.is_finite() && r > 0.0) {
        return Err(DomainError::NonPositiveResistance { resistance: r });
    }

    let ln_ratio = libm::log(config.thermistor_r25() / r);
    let denominator = 1.0 - REFERENCE_TEMPERATURE_K * ln_ratio / config.beta();
    if !(denominator > 0.0) {
        return Err(DomainError::ResistanceOutOfRange { resistance: r });
    }

    Ok(REFERENCE_TEMPERATURE_K / denominator - KELVIN_OFFSET)
}

/// Fraction of full scale seen by the ADC for a thermistor resistance
fn divider_fraction(config: &SensorConfig, r_th: f64) -> f64 {
    let r_sense = config.sense_resistor();
    match config.topology() {
        DividerTopology::ThermistorHigh => r_sense / (r_sense + r_th),
        DividerTopology::ThermistorLow => r_th / (r_sense + r_th),
    }
}

/// ADC count produced at `t` °C, rounded to the nearest code
pub fn adc_count_at_temperature(config: &SensorConfig, t: f64) -> u16 {
    let fraction = divider_fraction(config, resistance_at_temperature(config, t));
    libm::round(fraction * config.adc_max() as f64) as u16
}

/// Thermistor resistance that produces ADC `count` (Ω)
///
/// # Errors
///
/// [`DomainError::AdcCountOutOfRange`] at either rail, where the divider
/// implies a zero or infinite resistance.
pub fn resistance_for_adc_count(config: &SensorConfig, count: u32) -> Result<f64, DomainError> {
    let max = config.adc_max();
    if count == 0 || count >= max {
        return Err(DomainError::AdcCountOutOfRange { count, max });
    }

    let (count, max) = (count as f64, max as f64);
    let r_sense = config.sense_resistor();
    Ok(match config.topology() {
        DividerTopology::ThermistorHigh => r_sense * (max - count) / count,
        DividerTopology::ThermistorLow => r_sense * count / (max - count),
    })
}

/// Temperature for ADC `count` (°C)
pub fn temperature_for_adc_count(config: &SensorConfig, count: u32) -> Result<f64, DomainError> {
    let r = resistance_for_adc_count(config, count)?;
    temperature_for_resistance(config, r)
}

/// Voltage at the ADC input for `count` (V)
pub fn adc_voltage(config: &SensorConfig, count: u32) -> f64 {
    config.supply_voltage() * count as f64 / config.adc_max() as f64
}
