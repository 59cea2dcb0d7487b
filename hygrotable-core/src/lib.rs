//! Calibration table generator for HS1101 humidity sensors
//!
//! Derives the fixed-point lookup tables a small microcontroller needs to turn
//! raw readings into physical values without an FPU:
//!
//! - a 1-D thermistor table addressed by ADC-count bucket, giving temperature
//! - a 2-D humidity table addressed by (temperature row, oscillator-count column),
//!   giving relative humidity
//!
//! Data flows one way: [`SensorConfig`] → [`physics`] forward models →
//! [`solver`] inversions → quantized [`tables`] → an external [`Emitter`].
//!
//! ```
//! use hygrotable_core::{SensorConfig, TableBuilder};
//!
//! let config = SensorConfig::default();
//! let bundle = TableBuilder::new(&config).build()?;
//!
//! let meta = bundle.metadata();
//! assert_eq!(bundle.thermistor.len() as u16, meta.thermistor.high_bucket - meta.thermistor.low_bucket + 1);
//!
//! // Device-side lookup: ADC count to scaled temperature
//! let adc = hygrotable_core::physics::adc_count_at_temperature(&config, 25.0);
//! let raw = bundle.thermistor.lookup().raw(adc);
//! assert!((meta.scale_temperature(raw) - 25.0).abs() < 0.5);
//! # Ok::<(), hygrotable_core::CalibrationError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod config;
pub mod constants;
pub mod emit;
pub mod errors;
pub mod format;
pub mod lookup;
pub mod physics;
pub mod solver;
pub mod tables;

// Public API
pub use config::{DividerTopology, SensorConfig, SensorConfigBuilder};
pub use emit::{table_name, Emitter};
pub use errors::{
    CalibrationError, CalibrationResult, ConfigError, DomainError, QuantizationError,
};
pub use lookup::{HumidityLookup, LookupStatus, Reading, RhReading, ThermistorLookup};
pub use tables::{
    HumidityTable, TableBuilder, TableBundle, TableMetadata, ThermistorTable,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
