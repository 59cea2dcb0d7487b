//! Table Generation Parameters
//!
//! Solver settings, the default [`SensorConfig`](crate::SensorConfig) values
//! and the limits of the device-side storage.

// ===== ROOT FINDING =====

/// Fixed bisection iteration count.
///
/// A bracket of width w resolves to w / 2^54, below f64 resolution for any
/// bracket the table builder uses.
pub const BISECTION_ITERATIONS: u32 = 54;

/// Lower end of the RH inversion bracket (%).
///
/// Wider than the physical range so noisy cells near 0 % still bracket a root.
pub const RH_BRACKET_LOW_PCT: f64 = -200.0;

/// Upper end of the RH inversion bracket (%).
pub const RH_BRACKET_HIGH_PCT: f64 = 200.0;

// ===== CONFIGURATION DEFAULTS =====

/// Fixed divider resistor (Ω).
pub const DEFAULT_SENSE_RESISTOR_OHM: f64 = 100_000.0;

/// Thermistor resistance at 25 °C (Ω).
pub const DEFAULT_THERMISTOR_R25_OHM: f64 = 100_000.0;

/// Thermistor Beta coefficient (K).
pub const DEFAULT_BETA_K: f64 = 3950.0;

/// ADC reference and divider supply (V).
pub const DEFAULT_SUPPLY_VOLTAGE_V: f64 = 3.3;

/// RC-oscillator bias resistor (Ω), about 10 kHz nominal.
pub const DEFAULT_OSCILLATOR_RESISTOR_OHM: f64 = 402_700.0;

/// Humidity table temperature axis (°C).
pub const DEFAULT_TMIN_C: i16 = -10;

/// Upper end of the temperature axis (°C).
pub const DEFAULT_TMAX_C: i16 = 110;

/// Row spacing of the humidity table (°C).
pub const DEFAULT_TSTEP_C: i16 = 10;

/// Fixed-point scale of thermistor table values.
pub const DEFAULT_TEMPERATURE_SCALE: u16 = 127;

/// Fixed-point scale of humidity table values.
pub const DEFAULT_HUMIDITY_SCALE: u16 = 256;

/// ADC resolution (bits).
pub const DEFAULT_ADC_BITS: u8 = 10;

/// Low ADC bits used as the interpolation residue.
pub const DEFAULT_RESIDUE_BITS: u8 = 5;

/// Column spacing of the humidity table (counts).
pub const DEFAULT_COUNT_STEP: u16 = 100;

// ===== STORAGE =====

/// Widest ADC the device tables address (counts are `u16`).
pub const MAX_ADC_BITS: u8 = 16;
