//! Physical Sensor Models
//!
//! ## Overview
//!
//! Pure functions that map the sensor's physical quantities to and from the raw
//! numbers a microcontroller sees:
//!
//! - [`thermistor`]: NTC resistance ↔ temperature (Beta law) and the voltage
//!   divider that turns resistance into an ADC count
//! - [`hs1101`]: relative humidity ↔ capacitance, with the sensor's
//!   temperature-dependent baseline
//! - [`oscillator`]: capacitance ↔ RC-oscillator cycle count
//!
//! ## Signal Chain
//!
//! ```text
//! temperature ──Beta──▶ R_th ──divider──▶ ADC count
//! (RH, temp)  ──fit───▶ C    ──RC osc───▶ cycle count
//! ```
//!
//! Forward directions are total over finite inputs. Inverse directions are
//! fallible and return [`DomainError`](crate::DomainError) when the input has no
//! physical preimage.

pub mod hs1101;
pub mod oscillator;
pub mod thermistor;

pub use hs1101::{capacitance_baseline_at_temperature, capacitance_for_rh, humidity_from_capacitance};
pub use oscillator::{capacitance_from_counts, counts_for_capacitance, counts_for_rh_at_temperature};
pub use thermistor::{
    adc_count_at_temperature, adc_voltage, resistance_at_temperature, resistance_for_adc_count,
    temperature_for_adc_count, temperature_for_resistance,
};
