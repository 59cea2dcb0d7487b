//! Fixed-Point Calibration Tables
//!
//! ## Motivation
//!
//! The target microcontroller has no FPU. Evaluating the Beta law needs a
//! logarithm, and recovering humidity needs a 54-step bisection of a cubic;
//! neither is affordable per reading. Instead both are evaluated here, offline
//! in 64-bit floats, and quantized into small `i16` tables the device indexes
//! with shifts, masks and one or two integer interpolations.
//!
//! ## Tables
//!
//! ### Thermistor
//!
//! One entry per ADC bucket (`count >> residue_bits`), covering the buckets
//! between the counts at `tmin` and `tmax` plus one bucket of margin at the
//! high-count end so the last bucket always has a right neighbour.
//!
//! ```text
//! value = round(temperature · temperature_scale)
//! ```
//!
//! ### Humidity
//!
//! A grid of rows (temperatures `tmin..=tmax` by `tstep`) × columns (oscillator
//! counts `fcmin..=fcmax` by `count_step`). The count axis is derived from the
//! four corners (0 %, 100 %) × (`tmin`, `tmax`) of the physical domain.
//!
//! ```text
//! value = round(rh · humidity_scale)
//! ```
//!
//! ## Integrity
//!
//! Every stored value is range-checked against `i16`, the thermistor table must
//! be strictly monotonic in the direction the divider topology implies, and
//! every humidity row must fall strictly as counts rise. A build that breaks any
//! of these fails as a whole.
//!
//! ```rust
//! use hygrotable_core::{SensorConfig, TableBuilder};
//!
//! let config = SensorConfig::stray_compensated();
//! let bundle = TableBuilder::new(&config).build()?;
//! assert_eq!(bundle.humidity.metadata().rows, 7);
//! # Ok::<(), hygrotable_core::CalibrationError>(())
//! ```

mod humidity;
mod thermistor;

pub use humidity::{build_humidity_table, count_domain, CountDomain, HumidityCell, HumidityMetadata, HumidityTable};
pub use thermistor::{build_thermistor_table, ThermistorEntry, ThermistorMetadata, ThermistorTable};

use alloc::string::String;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::config::SensorConfig;
use crate::emit::{table_name, Emitter};
use crate::errors::{CalibrationResult, DomainError, QuantizationError};

/// Scale, round and store `value` in 16 bits
///
/// `quantity` names what is being stored for the error report.
pub(crate) fn quantize(quantity: &'static str, value: f64, scale: f64) -> Result<i16, QuantizationError> {
    let scaled = libm::round(value * scale);
    if scaled.is_finite() && scaled >= i16::MIN as f64 && scaled <= i16::MAX as f64 {
        Ok(scaled as i16)
    } else {
        Err(QuantizationError::Overflow { quantity, value, scaled })
    }
}

/// Verify consecutive values move strictly in one direction
pub(crate) fn check_strictly_monotonic(
    table: &'static str,
    row: usize,
    values: impl IntoIterator<Item = f64>,
    increasing: bool,
) -> Result<(), DomainError> {
    let mut values = values.into_iter();
    let Some(mut previous) = values.next() else {
        return Ok(());
    };
    for (i, current) in values.enumerate() {
        let ordered = if increasing { current > previous } else { current < previous };
        if !ordered {
            return Err(DomainError::NonMonotonic { table, row, index: i + 1, previous, current });
        }
        previous = current;
    }
    Ok(())
}

/// Constants a table consumer needs alongside the raw values
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TableMetadata {
    /// Thermistor table addressing
    pub thermistor: ThermistorMetadata,
    /// Humidity table addressing
    pub humidity: HumidityMetadata,
}

impl TableMetadata {
    /// Convert a thermistor-table value to °C
    pub fn scale_temperature(&self, raw: i16) -> f64 {
        raw as f64 * self.temperature_scale_factor()
    }

    /// Convert a humidity-table value to RH %
    pub fn scale_humidity(&self, raw: i16) -> f64 {
        raw as f64 * self.humidity_scale_factor()
    }

    /// Reciprocal of the temperature scale
    pub fn temperature_scale_factor(&self) -> f64 {
        1.0 / self.thermistor.scale as f64
    }

    /// Reciprocal of the humidity scale
    pub fn humidity_scale_factor(&self) -> f64 {
        1.0 / self.humidity.scale as f64
    }
}

/// Everything one calibration run produces
///
/// This is the sole artifact handed to an [`Emitter`]; it is complete and
/// internally consistent or it does not exist.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TableBundle {
    /// Deterministic name, see [`table_name`]
    pub name: String,
    /// Configuration the tables were built from
    pub config: SensorConfig,
    /// ADC bucket → temperature
    pub thermistor: ThermistorTable,
    /// (temperature, counts) → relative humidity
    pub humidity: HumidityTable,
}

impl TableBundle {
    /// Combined addressing constants of both tables
    pub fn metadata(&self) -> TableMetadata {
        TableMetadata {
            thermistor: *self.thermistor.metadata(),
            humidity: *self.humidity.metadata(),
        }
    }

    /// Hand the bundle to an emitter
    pub fn emit<E: Emitter>(&self, emitter: &mut E) -> Result<(), E::Error> {
        emitter.emit(self)
    }
}

/// Builds both tables from one configuration
pub struct TableBuilder<'a> {
    config: &'a SensorConfig,
}

impl<'a> TableBuilder<'a> {
    /// Create a builder over a validated configuration
    pub fn new(config: &'a SensorConfig) -> Self {
        Self { config }
    }

    /// Thermistor table only
    pub fn build_thermistor(&self) -> CalibrationResult<ThermistorTable> {
        build_thermistor_table(self.config)
    }

    /// Humidity table only
    pub fn build_humidity(&self) -> CalibrationResult<HumidityTable> {
        build_humidity_table(self.config)
    }

    /// Both tables, their metadata and the table name
    pub fn build(&self) -> CalibrationResult<TableBundle> {
        let thermistor = self.build_thermistor()?;
        let humidity = self.build_humidity()?;
        let name = table_name(self.config);

        log_info!(
            "{}: {} thermistor entries, {}x{} humidity grid",
            name,
            thermistor.len(),
            humidity.metadata().rows,
            humidity.metadata().cols
        );

        Ok(TableBundle {
            name,
            config: self.config.clone(),
            thermistor,
            humidity,
        })
    }
}
