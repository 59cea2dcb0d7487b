//! Sensor configuration for a calibration run
//!
//! A [`SensorConfig`] describes one board build: the thermistor and its divider,
//! the ADC, the HS1101 oscillator and the shape of the tables to generate. It is
//! validated once, when it is built, and cannot be changed afterwards.
//!
//! ```rust
//! use hygrotable_core::SensorConfig;
//!
//! let config = SensorConfig::builder()
//!     .sense_resistor(150_000.0)
//!     .tmax(50)
//!     .stray_capacitance_pf(7.2)
//!     .build()?;
//!
//! assert_eq!(config.tmax(), 50);
//! assert_eq!(config.adc_max(), 1023);
//! # Ok::<(), hygrotable_core::ConfigError>(())
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::tables::*;
use crate::errors::ConfigError;

/// Which side of the voltage divider the thermistor sits on
///
/// ```text
///   ThermistorHigh        ThermistorLow
///
///   Vdrive ─┬─            Vdrive ─┬─
///          Rth                   Rsense
///   Vadc ───┤             Vadc ───┤
///         Rsense                  Rth
///   0V ─────┴─            0V ─────┴─
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DividerTopology {
    /// Thermistor between supply and ADC input; count rises with temperature
    #[default]
    ThermistorHigh,
    /// Thermistor between ADC input and ground; count falls with temperature
    ThermistorLow,
}

impl DividerTopology {
    /// Whether the ADC count increases as temperature increases
    pub fn count_rises_with_temperature(self) -> bool {
        matches!(self, Self::ThermistorHigh)
    }
}

/// Validated, immutable sensor configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SensorConfigBuilder"))]
pub struct SensorConfig {
    sense_resistor: f64,
    thermistor_r25: f64,
    beta: f64,
    supply_voltage: f64,
    oscillator_resistor: f64,
    stray_capacitance_pf: f64,
    tmin: i16,
    tmax: i16,
    tstep: i16,
    temperature_scale: u16,
    humidity_scale: u16,
    adc_bits: u8,
    residue_bits: u8,
    count_step: u16,
    topology: DividerTopology,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sense_resistor: DEFAULT_SENSE_RESISTOR_OHM,
            thermistor_r25: DEFAULT_THERMISTOR_R25_OHM,
            beta: DEFAULT_BETA_K,
            supply_voltage: DEFAULT_SUPPLY_VOLTAGE_V,
            oscillator_resistor: DEFAULT_OSCILLATOR_RESISTOR_OHM,
            stray_capacitance_pf: 0.0,
            tmin: DEFAULT_TMIN_C,
            tmax: DEFAULT_TMAX_C,
            tstep: DEFAULT_TSTEP_C,
            temperature_scale: DEFAULT_TEMPERATURE_SCALE,
            humidity_scale: DEFAULT_HUMIDITY_SCALE,
            adc_bits: DEFAULT_ADC_BITS,
            residue_bits: DEFAULT_RESIDUE_BITS,
            count_step: DEFAULT_COUNT_STEP,
            topology: DividerTopology::ThermistorHigh,
        }
    }
}

impl SensorConfig {
    /// Start from the defaults and override selected fields
    pub fn builder() -> SensorConfigBuilder {
        SensorConfigBuilder::default()
    }

    /// Board variant with a 152.5 kΩ sense resistor, 7.2 pF of stray
    /// capacitance and a 50 °C upper bound
    pub fn stray_compensated() -> Self {
        Self {
            sense_resistor: 152_500.0,
            tmax: 50,
            stray_capacitance_pf: 7.2,
            ..Self::default()
        }
    }

    /// Fixed divider resistor (Ω)
    pub fn sense_resistor(&self) -> f64 {
        self.sense_resistor
    }

    /// Thermistor resistance at 25 °C (Ω)
    pub fn thermistor_r25(&self) -> f64 {
        self.thermistor_r25
    }

    /// Thermistor Beta coefficient (K)
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// ADC reference voltage (V)
    pub fn supply_voltage(&self) -> f64 {
        self.supply_voltage
    }

    /// RC-oscillator bias resistor (Ω)
    pub fn oscillator_resistor(&self) -> f64 {
        self.oscillator_resistor
    }

    /// Stray capacitance subtracted from measurements (pF)
    pub fn stray_capacitance_pf(&self) -> f64 {
        self.stray_capacitance_pf
    }

    /// First humidity-table row (°C)
    pub fn tmin(&self) -> i16 {
        self.tmin
    }

    /// Last humidity-table row (°C)
    pub fn tmax(&self) -> i16 {
        self.tmax
    }

    /// Humidity-table row spacing (°C)
    pub fn tstep(&self) -> i16 {
        self.tstep
    }

    /// Fixed-point scale of temperatures
    pub fn temperature_scale(&self) -> u16 {
        self.temperature_scale
    }

    /// Fixed-point scale of relative humidity
    pub fn humidity_scale(&self) -> u16 {
        self.humidity_scale
    }

    /// ADC resolution (bits)
    pub fn adc_bits(&self) -> u8 {
        self.adc_bits
    }

    /// Low ADC bits used as interpolation residue
    pub fn residue_bits(&self) -> u8 {
        self.residue_bits
    }

    /// Humidity-table column spacing (counts)
    pub fn count_step(&self) -> u16 {
        self.count_step
    }

    /// Thermistor placement in the divider
    pub fn topology(&self) -> DividerTopology {
        self.topology
    }

    /// Full-scale ADC count, `(1 << adc_bits) - 1`
    pub fn adc_max(&self) -> u32 {
        (1u32 << self.adc_bits) - 1
    }

    /// Temperatures of the humidity-table rows, `tmin..=tmax` by `tstep`
    pub fn row_temperatures(&self) -> impl Iterator<Item = i16> {
        let (tmin, tstep) = (self.tmin as i32, self.tstep as i32);
        // Every row lies in tmin..=tmax, so narrowing back to i16 is lossless
        (0..self.row_count()).map(move |i| (tmin + i as i32 * tstep) as i16)
    }

    /// Number of humidity-table rows
    pub fn row_count(&self) -> usize {
        ((self.tmax as i32 - self.tmin as i32) / self.tstep as i32) as usize + 1
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_positive("sense_resistor", self.sense_resistor)?;
        check_positive("thermistor_r25", self.thermistor_r25)?;
        check_positive("beta", self.beta)?;
        check_positive("supply_voltage", self.supply_voltage)?;
        check_positive("oscillator_resistor", self.oscillator_resistor)?;

        if !self.stray_capacitance_pf.is_finite() {
            return Err(ConfigError::NotFinite { field: "stray_capacitance_pf" });
        }
        if self.stray_capacitance_pf < 0.0 {
            return Err(ConfigError::NegativeStrayCapacitance { value: self.stray_capacitance_pf });
        }

        if self.tmax <= self.tmin {
            return Err(ConfigError::EmptyTemperatureRange { tmin: self.tmin, tmax: self.tmax });
        }
        check_positive("tstep", self.tstep as f64)?;
        // i32 so that extreme bounds cannot overflow the span
        let span = self.tmax as i32 - self.tmin as i32;
        if span % self.tstep as i32 != 0 {
            return Err(ConfigError::MisalignedTemperatureStep {
                tmin: self.tmin,
                tmax: self.tmax,
                step: self.tstep,
            });
        }

        check_positive("temperature_scale", self.temperature_scale as f64)?;
        check_positive("humidity_scale", self.humidity_scale as f64)?;
        check_positive("count_step", self.count_step as f64)?;

        if self.adc_bits == 0 || self.adc_bits > MAX_ADC_BITS {
            return Err(ConfigError::AdcBits { adc_bits: self.adc_bits });
        }
        if self.residue_bits == 0 || self.residue_bits >= self.adc_bits {
            return Err(ConfigError::ResidueBits {
                residue_bits: self.residue_bits,
                adc_bits: self.adc_bits,
            });
        }

        Ok(())
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

/// Builder for [`SensorConfig`]
///
/// Every field starts at its documented default. Deserializing a builder
/// rejects unknown keys, so a misspelled field is an error rather than a
/// silently ignored setting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SensorConfigBuilder {
    sense_resistor: f64,
    thermistor_r25: f64,
    beta: f64,
    supply_voltage: f64,
    oscillator_resistor: f64,
    stray_capacitance_pf: f64,
    tmin: i16,
    tmax: i16,
    tstep: i16,
    temperature_scale: u16,
    humidity_scale: u16,
    adc_bits: u8,
    residue_bits: u8,
    count_step: u16,
    topology: DividerTopology,
}

impl Default for SensorConfigBuilder {
    fn default() -> Self {
        SensorConfig::default().into()
    }
}

impl From<SensorConfig> for SensorConfigBuilder {
    fn from(c: SensorConfig) -> Self {
        Self {
            sense_resistor: c.sense_resistor,
            thermistor_r25: c.thermistor_r25,
            beta: c.beta,
            supply_voltage: c.supply_voltage,
            oscillator_resistor: c.oscillator_resistor,
            stray_capacitance_pf: c.stray_capacitance_pf,
            tmin: c.tmin,
            tmax: c.tmax,
            tstep: c.tstep,
            temperature_scale: c.temperature_scale,
            humidity_scale: c.humidity_scale,
            adc_bits: c.adc_bits,
            residue_bits: c.residue_bits,
            count_step: c.count_step,
            topology: c.topology,
        }
    }
}

impl TryFrom<SensorConfigBuilder> for SensorConfig {
    type Error = ConfigError;

    fn try_from(b: SensorConfigBuilder) -> Result<Self, Self::Error> {
        b.build()
    }
}

macro_rules! setter {
    ($(#[$doc:meta])* $name:ident: $ty:ty) => {
        $(#[$doc])*
        pub fn $name(mut self, value: $ty) -> Self {
            self.$name = value;
            self
        }
    };
}

impl SensorConfigBuilder {
    setter!(
        /// Fixed divider resistor (Ω)
        sense_resistor: f64
    );
    setter!(
        /// Thermistor resistance at 25 °C (Ω)
        thermistor_r25: f64
    );
    setter!(
        /// Thermistor Beta coefficient (K)
        beta: f64
    );
    setter!(
        /// ADC reference voltage (V)
        supply_voltage: f64
    );
    setter!(
        /// RC-oscillator bias resistor (Ω)
        oscillator_resistor: f64
    );
    setter!(
        /// Stray capacitance to subtract (pF)
        stray_capacitance_pf: f64
    );
    setter!(
        /// First humidity-table row (°C)
        tmin: i16
    );
    setter!(
        /// Last humidity-table row (°C)
        tmax: i16
    );
    setter!(
        /// Humidity-table row spacing (°C)
        tstep: i16
    );
    setter!(
        /// Fixed-point scale of temperatures
        temperature_scale: u16
    );
    setter!(
        /// Fixed-point scale of relative humidity
        humidity_scale: u16
    );
    setter!(
        /// ADC resolution (bits)
        adc_bits: u8
    );
    setter!(
        /// Low ADC bits used as interpolation residue
        residue_bits: u8
    );
    setter!(
        /// Humidity-table column spacing (counts)
        count_step: u16
    );
    setter!(
        /// Thermistor placement in the divider
        topology: DividerTopology
    );

    /// Validate and freeze the configuration
    pub fn build(self) -> Result<SensorConfig, ConfigError> {
        let config = SensorConfig {
            sense_resistor: self.sense_resistor,
            thermistor_r25: self.thermistor_r25,
            beta: self.beta,
            supply_voltage: self.supply_voltage,
            oscillator_resistor: self.oscillator_resistor,
            stray_capacitance_pf: self.stray_capacitance_pf,
            tmin: self.tmin,
            tmax: self.tmax,
            tstep: self.tstep,
            temperature_scale: self.temperature_scale,
            humidity_scale: self.humidity_scale,
            adc_bits: self.adc_bits,
            residue_bits: self.residue_bits,
            count_step: self.count_step,
            topology: self.topology,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SensorConfig::builder().build().unwrap();
        assert_eq!(config, SensorConfig::default());
        assert_eq!(config.sense_resistor(), 100_000.0);
        assert_eq!(config.oscillator_resistor(), 402_700.0);
        assert_eq!(config.temperature_scale(), 127);
        assert_eq!(config.humidity_scale(), 256);
        assert_eq!(config.count_step(), 100);
    }

    #[test]
    fn stray_preset_is_valid() {
        let preset = SensorConfig::stray_compensated();
        let rebuilt = SensorConfigBuilder::from(preset.clone()).build().unwrap();
        assert_eq!(preset, rebuilt);
    }

    #[test]
    fn rejects_empty_temperature_range() {
        let err = SensorConfig::builder().tmin(20).tmax(20).build().unwrap_err();
        assert_eq!(err, ConfigError::EmptyTemperatureRange { tmin: 20, tmax: 20 });
    }

    #[test]
    fn rejects_misaligned_step() {
        let err = SensorConfig::builder().tstep(7).build().unwrap_err();
        assert!(matches!(err, ConfigError::MisalignedTemperatureStep { step: 7, .. }));
    }

    #[test]
    fn rejects_non_positive_resistors() {
        let err = SensorConfig::builder().sense_resistor(0.0).build().unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "sense_resistor", .. }));

        let err = SensorConfig::builder().thermistor_r25(-1.0).build().unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "thermistor_r25", .. }));

        let err = SensorConfig::builder().oscillator_resistor(f64::NAN).build().unwrap_err();
        assert_eq!(err, ConfigError::NotFinite { field: "oscillator_resistor" });
    }

    #[test]
    fn rejects_zero_scales() {
        let err = SensorConfig::builder().temperature_scale(0).build().unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "temperature_scale", .. }));
        let err = SensorConfig::builder().humidity_scale(0).build().unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "humidity_scale", .. }));
    }

    #[test]
    fn rejects_bad_bit_widths() {
        let err = SensorConfig::builder().residue_bits(10).build().unwrap_err();
        assert_eq!(err, ConfigError::ResidueBits { residue_bits: 10, adc_bits: 10 });

        let err = SensorConfig::builder().residue_bits(0).build().unwrap_err();
        assert_eq!(err, ConfigError::ResidueBits { residue_bits: 0, adc_bits: 10 });

        let err = SensorConfig::builder().adc_bits(17).build().unwrap_err();
        assert_eq!(err, ConfigError::AdcBits { adc_bits: 17 });
    }

    #[test]
    fn rejects_negative_stray() {
        let err = SensorConfig::builder().stray_capacitance_pf(-0.5).build().unwrap_err();
        assert_eq!(err, ConfigError::NegativeStrayCapacitance { value: -0.5 });
    }

    #[test]
    fn row_temperatures_end_at_tmax() {
        let config = SensorConfig::default();
        let rows: Vec<i16> = config.row_temperatures().collect();
        assert_eq!(rows.len(), 13);
        assert_eq!(rows.first(), Some(&-10));
        assert_eq!(rows.last(), Some(&110));
    }

    #[test]
    fn row_temperatures_span_full_i16_range() {
        let config = SensorConfig::builder().tmin(-20_000).tmax(20_000).tstep(1_000).build().unwrap();
        let rows: Vec<i16> = config.row_temperatures().collect();
        assert_eq!(config.row_count(), 41);
        assert_eq!(rows.len(), 41);
        assert_eq!(rows.first(), Some(&-20_000));
        assert_eq!(rows.last(), Some(&20_000));

        let config = SensorConfig::builder().tmin(i16::MIN).tmax(i16::MAX).tstep(1).build().unwrap();
        assert_eq!(config.row_count(), 65_536);
        assert_eq!(config.row_temperatures().last(), Some(i16::MAX));
    }

    #[test]
    fn topology_trend() {
        assert!(DividerTopology::ThermistorHigh.count_rises_with_temperature());
        assert!(!DividerTopology::ThermistorLow.count_rises_with_temperature());
    }
}
