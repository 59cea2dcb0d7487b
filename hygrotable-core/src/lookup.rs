//! Integer Lookups over Generated Tables
//!
//! ## Motivation
//!
//! The tables are consumed on a microcontroller with no FPU, using nothing but
//! shifts, masks, integer multiplies and divides. This module performs exactly
//! that arithmetic on the host so a generated table can be checked end to end
//! (counts in, scaled physical value out) before it is flashed.
//!
//! ## Thermistor: Bucket + Residue
//!
//! An ADC count is split into a bucket index and a residue:
//!
//! ```text
//! offset  = adc − low_count
//! index   = offset >> residue_bits
//! residue = offset & residue_mask
//! value   = T[index] + ((T[index+1] − T[index]) · residue >> residue_bits)
//! ```
//!
//! Counts at or below `low_count` read as the first entry, at or above
//! `high_count` as the last.
//!
//! ## Humidity: Bilinear on a Regular Grid
//!
//! ```text
//! row, t_res   = divmod(temp_raw − tmin_scaled, tstep_scaled)
//! col, c_res   = divmod(counts − count_min, count_step)
//! rh0          = H[row][col]   + c_res · (H[row][col+1]   − H[row][col])   / count_step
//! rh1          = H[row+1][col] + c_res · (H[row+1][col+1] − H[row+1][col]) / count_step
//! rh           = rh0 + t_res · (rh1 − rh0) / tstep_scaled      (only if t_res ≠ 0)
//! ```
//!
//! Low counts mean high capacitance, so counts at or below `count_min`
//! saturate at 100 % and counts at or above `count_max` read as 0 %.
//! Temperatures outside the rows are clamped to the nearest row. The result
//! is clamped to `0..=max_raw`.
//!
//! Divisions truncate toward zero, as C integer division does on the device.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::tables::{
    HumidityCell, HumidityMetadata, TableBundle, ThermistorEntry, ThermistorMetadata,
};

/// Outcome of a humidity conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LookupStatus {
    /// Both inputs inside the table
    Ok,
    /// Counts at or above the last column; reported as 0 %
    HumidityLow,
    /// Counts at or below the first column; reported as 100 %
    HumidityHigh,
    /// Temperature below the first row; clamped to it
    TempLow,
    /// Temperature above the last row; clamped to it
    TempHigh,
}

/// Scaled relative humidity with its conversion status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RhReading {
    /// How the value was obtained
    pub status: LookupStatus,
    /// RH % × humidity scale
    pub raw: i16,
}

impl RhReading {
    /// True when neither input had to be clamped
    pub fn is_ok(&self) -> bool {
        self.status == LookupStatus::Ok
    }
}

/// Thermistor table as seen by the device
#[derive(Debug, Clone, Copy)]
pub struct ThermistorLookup<'a> {
    entries: &'a [ThermistorEntry],
    meta: ThermistorMetadata,
}

impl<'a> ThermistorLookup<'a> {
    pub(crate) fn new(entries: &'a [ThermistorEntry], meta: ThermistorMetadata) -> Self {
        Self { entries, meta }
    }

    /// Scaled temperature for an ADC count
    pub fn raw(&self, adc: u16) -> i16 {
        let m = &self.meta;
        if adc <= m.low_count {
            if adc < m.low_count {
                log_warn!("Thermistor lookup: count {} below table ({})", adc, m.low_count);
            }
            return self.entries[0].raw;
        }
        if adc >= m.high_count {
            if adc > m.high_count {
                log_warn!("Thermistor lookup: count {} above table ({})", adc, m.high_count);
            }
            return self.entries[self.entries.len() - 1].raw;
        }

        let offset = adc - m.low_count;
        let index = (offset >> m.residue_bits) as usize;
        let residue = (offset & m.residue_mask) as i32;

        let lb = self.entries[index].raw as i32;
        let hb = self.entries[index + 1].raw as i32;
        let adj = ((hb - lb) * residue) >> m.residue_bits;

        (lb + adj) as i16
    }

    /// Temperature for an ADC count (°C)
    pub fn temperature(&self, adc: u16) -> f64 {
        self.raw(adc) as f64 / self.meta.scale as f64
    }
}

/// Humidity table as seen by the device
#[derive(Debug, Clone, Copy)]
pub struct HumidityLookup<'a> {
    cells: &'a [HumidityCell],
    meta: HumidityMetadata,
}

impl<'a> HumidityLookup<'a> {
    pub(crate) fn new(cells: &'a [HumidityCell], meta: HumidityMetadata) -> Self {
        Self { cells, meta }
    }

    fn value(&self, row: usize, col: usize) -> i64 {
        self.cells[row * self.meta.cols as usize + col].raw as i64
    }

    /// Linear interpolation along the count axis of one row
    fn interpolate_row(&self, row: usize, col: usize, residue: i64) -> i64 {
        let rh00 = self.value(row, col);
        let rh01 = self.value(row, col + 1);
        rh00 + residue * (rh01 - rh00) / self.meta.count_step as i64
    }

    /// Scaled RH for an oscillator count and a scaled temperature
    ///
    /// `temp_raw` is in thermistor-table units, as produced by
    /// [`ThermistorLookup::raw`].
    pub fn compute(&self, counts: u16, temp_raw: i16) -> RhReading {
        let m = &self.meta;

        if counts <= m.count_min {
            return RhReading { status: LookupStatus::HumidityHigh, raw: m.max_raw };
        }
        if counts >= m.count_max {
            return RhReading { status: LookupStatus::HumidityLow, raw: 0 };
        }

        let (temp, status) = if temp_raw < m.tmin_scaled {
            log_warn!("Humidity lookup: temperature {} clamped to {}", temp_raw, m.tmin_scaled);
            (m.tmin_scaled, LookupStatus::TempLow)
        } else if temp_raw > m.tmax_scaled {
            log_warn!("Humidity lookup: temperature {} clamped to {}", temp_raw, m.tmax_scaled);
            (m.tmax_scaled, LookupStatus::TempHigh)
        } else {
            (temp_raw, LookupStatus::Ok)
        };

        let tadj = temp as i64 - m.tmin_scaled as i64;
        let tstep = m.tstep_scaled as i64;
        let row = (tadj / tstep) as usize;
        let tres = tadj % tstep;

        let fadj = (counts - m.count_min) as i64;
        let fstep = m.count_step as i64;
        let col = (fadj / fstep) as usize;
        let fres = fadj % fstep;

        let mut rh = self.interpolate_row(row, col, fres);
        if tres != 0 {
            // Residue in temperature: blend with the next warmer row
            let rh1 = self.interpolate_row(row + 1, col, fres);
            rh += tres * (rh1 - rh) / tstep;
        }

        let raw = rh.clamp(0, m.max_raw as i64) as i16;
        RhReading { status, raw }
    }

    /// RH for an oscillator count and a scaled temperature (%)
    pub fn humidity(&self, counts: u16, temp_raw: i16) -> (LookupStatus, f64) {
        let reading = self.compute(counts, temp_raw);
        (reading.status, reading.raw as f64 / self.meta.scale as f64)
    }
}

/// One converted sensor sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Reading {
    /// Temperature in thermistor-table units
    pub temperature_raw: i16,
    /// Humidity, compensated with `temperature_raw`
    pub humidity: RhReading,
}

impl TableBundle {
    /// Convert a raw (ADC count, oscillator count) pair the way the device does
    pub fn convert(&self, adc: u16, counts: u16) -> Reading {
        let temperature_raw = self.thermistor.lookup().raw(adc);
        let humidity = self.humidity.lookup().compute(counts, temperature_raw);
        Reading { temperature_raw, humidity }
    }
}
