//! Physical Constants for the Sensor Models
//!
//! Reference points for the thermistor Beta law and the constants of the
//! RC oscillator that turns the HS1101 capacitance into a count.

// ===== TEMPERATURE REFERENCE =====

/// Offset between Celsius and Kelvin (K).
///
/// Source: SI definition of the Celsius scale
pub const KELVIN_OFFSET: f64 = 273.15;

/// Thermistor reference temperature in Celsius (°C).
///
/// Datasheet R25 values are quoted at this temperature.
pub const REFERENCE_TEMPERATURE_C: f64 = 25.0;

/// Thermistor reference temperature in Kelvin (K).
///
/// Computed as `KELVIN_OFFSET + 25.0` so that converting 25 °C to Kelvin
/// reproduces this constant bit for bit; R(25 °C) == R25 exactly.
pub const REFERENCE_TEMPERATURE_K: f64 = KELVIN_OFFSET + REFERENCE_TEMPERATURE_C;

// ===== RC OSCILLATOR =====

/// Empirical duty-cycle factor of the HS1101 RC oscillator.
///
/// f = 0.725 / (R·C). Measured on the reference circuit; do not change.
pub const OSCILLATOR_DUTY_FACTOR: f64 = 0.725;

/// Window over which oscillator cycles are counted (s).
///
/// Counts are therefore numerically equal to frequency in Hz.
pub const COUNT_WINDOW_S: f64 = 1.0;

/// Picofarads per farad.
pub const PF_PER_F: f64 = 1e12;
