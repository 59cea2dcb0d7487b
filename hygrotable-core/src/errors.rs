//! Error Types for Calibration Table Generation
//!
//! ## Design Philosophy
//!
//! Table generation runs offline, but the error types follow the same rules as
//! the device-side code that consumes the tables:
//!
//! 1. **Copy Semantics**: every variant is plain data, so errors can be passed
//!    around and compared in tests without cloning.
//!
//! 2. **No Heap Allocation**: diagnostics are stored inline as numbers and
//!    `&'static str` labels.
//!
//! 3. **Actionable Information**: each variant carries the inputs that were
//!    being evaluated (temperature, count, bracket endpoints) so a failing
//!    configuration can be diagnosed without re-running with extra logging.
//!
//! ## Error Categories
//!
//! ### Configuration
//! - [`ConfigError`]: the [`SensorConfig`](crate::SensorConfig) itself is
//!   unusable. Detected before any table work starts.
//!
//! ### Model Domain
//! - [`DomainError`]: a physical model was evaluated outside the range where it
//!   is defined (log of a non-positive resistance, a bisection bracket with no
//!   sign change, a table that lost monotonicity).
//!
//! ### Storage
//! - [`QuantizationError`]: a value does not fit the fixed-width integer the
//!   device stores it in.
//!
//! A build either returns complete tables or one of these errors; no partial
//! table is ever exposed.
//!
//! ```rust
//! use hygrotable_core::{CalibrationError, ConfigError, SensorConfig};
//!
//! let err = SensorConfig::builder().tmin(50).tmax(20).build().unwrap_err();
//! assert!(matches!(err, ConfigError::EmptyTemperatureRange { tmin: 50, tmax: 20 }));
//!
//! let wrapped: CalibrationError = err.into();
//! assert!(matches!(wrapped, CalibrationError::Config(_)));
//! ```

use thiserror_no_std::Error;

/// Result type for calibration operations
pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Top-level error for a calibration run
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CalibrationError {
    /// The sensor configuration was rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A model was evaluated outside its valid domain
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// A value does not fit its fixed-width storage
    #[error("Quantization error: {0}")]
    Quantization(#[from] QuantizationError),
}

/// Invalid [`SensorConfig`](crate::SensorConfig) values
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A resistor, coefficient, voltage, scale or step must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A field was NaN or infinite
    #[error("{field} must be finite")]
    NotFinite {
        /// Name of the offending field
        field: &'static str,
    },

    /// Stray capacitance is subtracted from the measurement and cannot be negative
    #[error("stray capacitance must not be negative, got {value}pF")]
    NegativeStrayCapacitance {
        /// The rejected value in pF
        value: f64,
    },

    /// `tmax` must be strictly above `tmin`
    #[error("temperature range [{tmin}, {tmax}] is empty")]
    EmptyTemperatureRange {
        /// Lower bound in °C
        tmin: i16,
        /// Upper bound in °C
        tmax: i16,
    },

    /// `tmax - tmin` must be a whole number of steps
    #[error("temperature range [{tmin}, {tmax}] is not a multiple of step {step}")]
    MisalignedTemperatureStep {
        /// Lower bound in °C
        tmin: i16,
        /// Upper bound in °C
        tmax: i16,
        /// Row spacing in °C
        step: i16,
    },

    /// ADC width outside 1..=16 bits
    #[error("ADC width of {adc_bits} bits is not supported (1..=16)")]
    AdcBits {
        /// The rejected width
        adc_bits: u8,
    },

    /// Residue bits must be positive and narrower than the ADC
    #[error("residue width {residue_bits} must be in 1..{adc_bits}")]
    ResidueBits {
        /// The rejected residue width
        residue_bits: u8,
        /// The configured ADC width
        adc_bits: u8,
    },
}

/// A model evaluated outside the range where it is defined
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DomainError {
    /// Bisection bracket endpoints do not straddle a root
    #[error("no sign change over [{low}, {high}]: f(low)={f_low}, f(high)={f_high}")]
    NoSignChange {
        /// Lower bracket endpoint
        low: f64,
        /// Upper bracket endpoint
        high: f64,
        /// Function value at `low`
        f_low: f64,
        /// Function value at `high`
        f_high: f64,
    },

    /// The function being solved returned NaN or infinity
    #[error("function is not finite at x={x}")]
    NonFiniteEvaluation {
        /// Where the function was evaluated
        x: f64,
    },

    /// The Beta law needs a strictly positive, finite resistance
    #[error("resistance must be positive, got {resistance}Ω")]
    NonPositiveResistance {
        /// The rejected resistance in Ω
        resistance: f64,
    },

    /// The resistance maps to a temperature at or below absolute zero
    #[error("resistance {resistance}Ω is outside the thermistor model")]
    ResistanceOutOfRange {
        /// The rejected resistance in Ω
        resistance: f64,
    },

    /// The divider cannot be inverted at the rails
    #[error("ADC count {count} must be strictly between 0 and {max}")]
    AdcCountOutOfRange {
        /// The rejected count
        count: u32,
        /// Full-scale ADC count
        max: u32,
    },

    /// Oscillator counts must be strictly positive
    #[error("oscillator count must be positive, got {counts}")]
    NonPositiveCount {
        /// The rejected count
        counts: f64,
    },

    /// Total capacitance seen by the oscillator must be strictly positive
    #[error("capacitance must be positive, got {capacitance_pf}pF")]
    NonPositiveCapacitance {
        /// The rejected capacitance in pF, stray included
        capacitance_pf: f64,
    },

    /// Temperature bounds map to ADC counts that run against the divider topology
    #[error("ADC count trend does not match divider topology: {count_at_tmin} at tmin, {count_at_tmax} at tmax")]
    UnexpectedTrend {
        /// ADC count at the lowest temperature
        count_at_tmin: u16,
        /// ADC count at the highest temperature
        count_at_tmax: u16,
    },

    /// A generated table is not monotonic where it must be
    #[error("{table} table not monotonic at row {row}, index {index}: {previous} then {current}")]
    NonMonotonic {
        /// Which table failed
        table: &'static str,
        /// Row index (always 0 for the thermistor table)
        row: usize,
        /// Index of the offending entry within the row
        index: usize,
        /// Value at `index - 1`
        previous: f64,
        /// Value at `index`
        current: f64,
    },

    /// Humidity could not be recovered for a grid cell
    #[error("humidity inversion failed at {temperature}°C, {counts} counts ({capacitance_pf}pF)")]
    HumidityInversion {
        /// Row temperature in °C
        temperature: f64,
        /// Column count
        counts: u32,
        /// Measured capacitance in pF
        capacitance_pf: f64,
    },
}

/// A value does not fit the device's fixed-width storage
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum QuantizationError {
    /// Scaled value exceeds the signed 16-bit range
    #[error("{quantity} {value} scales to {scaled}, outside i16")]
    Overflow {
        /// Which quantity was being stored
        quantity: &'static str,
        /// Unscaled physical value
        value: f64,
        /// Value after scaling and rounding
        scaled: f64,
    },

    /// Humidity grid has more cells than a 16-bit index can address
    #[error("humidity grid of {rows}x{cols} cells exceeds 16-bit indexing")]
    GridTooLarge {
        /// Temperature rows
        rows: usize,
        /// Count columns
        cols: usize,
    },

    /// Humidity count axis exceeds the device's 16-bit counter
    #[error("oscillator count {count} does not fit a 16-bit counter")]
    CountAxisOverflow {
        /// The offending count bound
        count: f64,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for CalibrationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Config(e) => defmt::write!(fmt, "Config: {}", e),
            Self::Domain(e) => defmt::write!(fmt, "Domain: {}", e),
            Self::Quantization(e) => defmt::write!(fmt, "Quantization: {}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NonPositive { field, value } =>
                defmt::write!(fmt, "{} must be positive, got {}", field, value),
            Self::NotFinite { field } =>
                defmt::write!(fmt, "{} must be finite", field),
            Self::NegativeStrayCapacitance { value } =>
                defmt::write!(fmt, "negative stray {}pF", value),
            Self::EmptyTemperatureRange { tmin, tmax } =>
                defmt::write!(fmt, "empty range [{}, {}]", tmin, tmax),
            Self::MisalignedTemperatureStep { tmin, tmax, step } =>
                defmt::write!(fmt, "[{}, {}] not a multiple of {}", tmin, tmax, step),
            Self::AdcBits { adc_bits } =>
                defmt::write!(fmt, "bad ADC width {}", adc_bits),
            Self::ResidueBits { residue_bits, adc_bits } =>
                defmt::write!(fmt, "residue {} not in 1..{}", residue_bits, adc_bits),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DomainError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NoSignChange { low, high, f_low, f_high } =>
                defmt::write!(fmt, "no sign change [{}, {}] f={} {}", low, high, f_low, f_high),
            Self::NonFiniteEvaluation { x } =>
                defmt::write!(fmt, "not finite at {}", x),
            Self::NonPositiveResistance { resistance } =>
                defmt::write!(fmt, "resistance {}", resistance),
            Self::ResistanceOutOfRange { resistance } =>
                defmt::write!(fmt, "resistance {} out of model", resistance),
            Self::AdcCountOutOfRange { count, max } =>
                defmt::write!(fmt, "ADC count {} of {}", count, max),
            Self::NonPositiveCount { counts } =>
                defmt::write!(fmt, "count {}", counts),
            Self::NonPositiveCapacitance { capacitance_pf } =>
                defmt::write!(fmt, "capacitance {}pF", capacitance_pf),
            Self::UnexpectedTrend { count_at_tmin, count_at_tmax } =>
                defmt::write!(fmt, "trend {} -> {}", count_at_tmin, count_at_tmax),
            Self::NonMonotonic { table, row, index, .. } =>
                defmt::write!(fmt, "{} not monotonic at [{}, {}]", table, row, index),
            Self::HumidityInversion { temperature, counts, .. } =>
                defmt::write!(fmt, "RH inversion at {}C {}cts", temperature, counts),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for QuantizationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Overflow { quantity, scaled, .. } =>
                defmt::write!(fmt, "{} overflows i16 ({})", quantity, scaled),
            Self::GridTooLarge { rows, cols } =>
                defmt::write!(fmt, "grid {}x{} too large", rows, cols),
            Self::CountAxisOverflow { count } =>
                defmt::write!(fmt, "count {} overflows u16", count),
        }
    }
}
