//! Thermistor table: ADC bucket → temperature

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::config::SensorConfig;
use crate::errors::{CalibrationResult, DomainError};
use crate::lookup::ThermistorLookup;
use crate::physics::thermistor::{
    adc_count_at_temperature, adc_voltage, resistance_for_adc_count, temperature_for_resistance,
};

use super::{check_strictly_monotonic, quantize};

/// One bucket of the thermistor table
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ThermistorEntry {
    /// Bucket index, `count >> residue_bits`
    pub bucket: u16,
    /// Representative count, `bucket << residue_bits`
    pub count: u16,
    /// ADC input voltage at `count` (V)
    pub voltage: f64,
    /// Thermistor resistance at `count` (Ω)
    pub resistance: f64,
    /// Temperature at `count` (°C)
    pub temperature: f64,
    /// Stored value, `round(temperature · temperature_scale)`
    pub raw: i16,
}

/// Addressing constants of the thermistor table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ThermistorMetadata {
    /// Number of entries, `high_bucket - low_bucket + 1`
    pub size: u16,
    /// Values are °C multiplied by this
    pub scale: u16,
    /// Bucket of the first entry
    pub low_bucket: u16,
    /// Bucket of the last entry
    pub high_bucket: u16,
    /// ADC count of the first entry
    pub low_count: u16,
    /// ADC count of the last entry
    pub high_count: u16,
    /// Bits of the count below the bucket index
    pub residue_bits: u8,
    /// `(1 << residue_bits) - 1`
    pub residue_mask: u16,
}

/// Quantized temperatures indexed by ADC bucket
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ThermistorTable {
    entries: Vec<ThermistorEntry>,
    metadata: ThermistorMetadata,
}

impl ThermistorTable {
    /// Entries in bucket order
    pub fn entries(&self) -> &[ThermistorEntry] {
        &self.entries
    }

    /// Stored values in bucket order
    pub fn raw_values(&self) -> Vec<i16> {
        self.entries.iter().map(|e| e.raw).collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a built table
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for an absolute bucket index, if covered
    pub fn get(&self, bucket: u16) -> Option<&ThermistorEntry> {
        let offset = bucket.checked_sub(self.metadata.low_bucket)?;
        self.entries.get(offset as usize)
    }

    /// Addressing constants
    pub fn metadata(&self) -> &ThermistorMetadata {
        &self.metadata
    }

    /// Integer lookup view, as the device would use the table
    pub fn lookup(&self) -> ThermistorLookup<'_> {
        ThermistorLookup::new(&self.entries, self.metadata)
    }
}

/// Generate the thermistor table for `config`
///
/// # Errors
///
/// - [`DomainError::UnexpectedTrend`] when the counts at `tmin`/`tmax` do not
///   move in the direction the divider topology implies
/// - [`DomainError::AdcCountOutOfRange`] when a bucket lands on an ADC rail
/// - [`QuantizationError`](crate::QuantizationError) when a temperature
///   overflows `i16` after scaling
/// - [`DomainError::NonMonotonic`] when quantization collapses neighbouring
///   buckets onto the same value
pub fn build_thermistor_table(config: &SensorConfig) -> CalibrationResult<ThermistorTable> {
    let residue_bits = config.residue_bits();
    let count_at_tmin = adc_count_at_temperature(config, config.tmin() as f64);
    let count_at_tmax = adc_count_at_temperature(config, config.tmax() as f64);

    let rising = config.topology().count_rises_with_temperature();
    let trend_matches = if rising {
        count_at_tmin < count_at_tmax
    } else {
        count_at_tmin > count_at_tmax
    };
    if !trend_matches {
        return Err(DomainError::UnexpectedTrend { count_at_tmin, count_at_tmax }.into());
    }

    let (low_count, high_count) = if rising {
        (count_at_tmin, count_at_tmax)
    } else {
        (count_at_tmax, count_at_tmin)
    };

    // One bucket of margin above the high count; that bucket must still be
    // addressable or the top of the range would read as the last entry
    let max_bucket = (config.adc_max() >> residue_bits) as u16;
    let low_bucket = low_count >> residue_bits;
    let high_bucket = (high_count >> residue_bits) + 1;
    if high_bucket > max_bucket {
        log_warn!(
            "thermistor margin bucket {} beyond full scale (count {})",
            high_bucket,
            high_count
        );
        return Err(DomainError::AdcCountOutOfRange {
            count: (high_bucket as u32) << residue_bits,
            max: config.adc_max(),
        }
        .into());
    }

    log_debug!(
        "thermistor counts {}@{}°C, {}@{}°C -> buckets {}..={}",
        count_at_tmin,
        config.tmin(),
        count_at_tmax,
        config.tmax(),
        low_bucket,
        high_bucket
    );

    let scale = config.temperature_scale() as f64;
    let mut entries = Vec::with_capacity((high_bucket - low_bucket + 1) as usize);
    for bucket in low_bucket..=high_bucket {
        let count = bucket << residue_bits;
        let resistance = resistance_for_adc_count(config, count as u32)?;
        let temperature = temperature_for_resistance(config, resistance)?;
        let raw = quantize("temperature", temperature, scale)?;
        entries.push(ThermistorEntry {
            bucket,
            count,
            voltage: adc_voltage(config, count as u32),
            resistance,
            temperature,
            raw,
        });
    }

    // Rising counts mean falling resistance, so temperature follows the count
    // trend of the topology
    check_strictly_monotonic("thermistor", 0, entries.iter().map(|e| e.raw as f64), rising)?;

    let metadata = ThermistorMetadata {
        size: entries.len() as u16,
        scale: config.temperature_scale(),
        low_bucket,
        high_bucket,
        low_count: low_bucket << residue_bits,
        high_count: high_bucket << residue_bits,
        residue_bits,
        residue_mask: (1u16 << residue_bits) - 1,
    };

    Ok(ThermistorTable { entries, metadata })
}
