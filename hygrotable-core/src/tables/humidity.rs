//! Humidity table: (temperature row, oscillator-count column) → RH

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::config::SensorConfig;
use crate::constants::sensors::{RH_DRY_PCT, RH_SATURATED_PCT};
use crate::errors::{CalibrationResult, DomainError, QuantizationError};
use crate::lookup::HumidityLookup;
use crate::physics::hs1101::humidity_from_capacitance;
use crate::physics::oscillator::{capacitance_from_counts, counts_for_rh_at_temperature};

use super::{check_strictly_monotonic, quantize};

/// Column axis of the humidity table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CountDomain {
    /// First column (counts), a multiple of `step`
    pub min: u16,
    /// Last column (counts), a multiple of `step`
    pub max: u16,
    /// Column spacing (counts)
    pub step: u16,
}

impl CountDomain {
    /// Number of columns
    pub fn len(&self) -> usize {
        ((self.max - self.min) / self.step) as usize + 1
    }

    /// True when there are no columns
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column counts in order
    pub fn columns(&self) -> impl Iterator<Item = u16> {
        (self.min..=self.max).step_by(self.step as usize)
    }
}

/// Derive the count axis from the corners of the physical domain
///
/// Evaluates RH → capacitance → count at 0 % and 100 % for both `tmin` and
/// `tmax` and widens the enclosing range outwards to multiples of
/// `count_step`.
///
/// # Errors
///
/// [`QuantizationError::CountAxisOverflow`] when the axis does not fit the
/// device's 16-bit counter.
pub fn count_domain(config: &SensorConfig) -> CalibrationResult<CountDomain> {
    let (tmin, tmax) = (config.tmin() as f64, config.tmax() as f64);
    let corners = [
        (RH_DRY_PCT, tmin),
        (RH_DRY_PCT, tmax),
        (RH_SATURATED_PCT, tmin),
        (RH_SATURATED_PCT, tmax),
    ];

    let mut lowest = f64::INFINITY;
    let mut highest = f64::NEG_INFINITY;
    for (rh, temp) in corners {
        let counts = counts_for_rh_at_temperature(config, rh, temp)?;
        log_debug!("corner {}% @ {}°C -> {} counts", rh, temp, counts);
        lowest = lowest.min(counts);
        highest = highest.max(counts);
    }

    let step = config.count_step() as f64;
    let min = libm::floor(lowest / step) * step;
    let max = libm::ceil(highest / step) * step;
    if max > u16::MAX as f64 {
        return Err(QuantizationError::CountAxisOverflow { count: max }.into());
    }

    Ok(CountDomain {
        min: min as u16,
        max: max as u16,
        step: config.count_step(),
    })
}

/// One cell of the humidity grid
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct HumidityCell {
    /// Row temperature (°C)
    pub temperature: i16,
    /// Column count
    pub counts: u16,
    /// Sensor capacitance implied by `counts` (pF)
    pub capacitance: f64,
    /// Unclamped relative humidity (%)
    pub rh: f64,
    /// Stored value, `round(rh · humidity_scale)`
    pub raw: i16,
}

/// Addressing constants of the humidity table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct HumidityMetadata {
    /// Number of temperature rows
    pub rows: u16,
    /// Number of count columns
    pub cols: u16,
    /// Temperature of the first row (°C)
    pub tmin: i16,
    /// Temperature of the last row (°C)
    pub tmax: i16,
    /// Row spacing (°C)
    pub tstep: i16,
    /// `tmin` in thermistor-table units
    pub tmin_scaled: i16,
    /// `tmax` in thermistor-table units
    pub tmax_scaled: i16,
    /// `tstep` in thermistor-table units
    pub tstep_scaled: i16,
    /// Count of the first column
    pub count_min: u16,
    /// Count of the last column
    pub count_max: u16,
    /// Column spacing (counts)
    pub count_step: u16,
    /// Values are RH % multiplied by this
    pub scale: u16,
    /// 100 % RH in table units
    pub max_raw: i16,
}

/// Quantized relative humidity over temperature × counts
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct HumidityTable {
    /// Row-major cells
    cells: Vec<HumidityCell>,
    metadata: HumidityMetadata,
}

impl HumidityTable {
    /// All cells, row-major
    pub fn cells(&self) -> &[HumidityCell] {
        &self.cells
    }

    /// Cells of one temperature row
    pub fn row(&self, row: usize) -> Option<&[HumidityCell]> {
        let cols = self.metadata.cols as usize;
        let start = row.checked_mul(cols)?;
        self.cells.get(start..start + cols)
    }

    /// Rows in temperature order
    pub fn rows(&self) -> impl Iterator<Item = &[HumidityCell]> {
        self.cells.chunks(self.metadata.cols as usize)
    }

    /// Single cell
    pub fn cell(&self, row: usize, col: usize) -> Option<&HumidityCell> {
        if col >= self.metadata.cols as usize {
            return None;
        }
        self.row(row).map(|r| &r[col])
    }

    /// Stored values, row-major
    pub fn raw_values(&self) -> Vec<i16> {
        self.cells.iter().map(|c| c.raw).collect()
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a built table
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Addressing constants
    pub fn metadata(&self) -> &HumidityMetadata {
        &self.metadata
    }

    /// Integer lookup view, as the device would use the table
    pub fn lookup(&self) -> HumidityLookup<'_> {
        HumidityLookup::new(&self.cells, self.metadata)
    }
}

/// Generate the humidity table for `config`
///
/// # Errors
///
/// - [`DomainError::HumidityInversion`] when a cell has no RH root in the
///   solver bracket
/// - [`DomainError::NonPositiveCount`] when the derived axis starts at 0
/// - [`QuantizationError::GridTooLarge`] when `rows × cols` exceeds `u16`
/// - [`QuantizationError`] when a value or derived constant overflows `i16`
/// - [`DomainError::NonMonotonic`] when a row does not fall as counts rise
pub fn build_humidity_table(config: &SensorConfig) -> CalibrationResult<HumidityTable> {
    let domain = count_domain(config)?;
    let hscale = config.humidity_scale() as f64;
    let tscale = config.temperature_scale() as f64;

    let rows = config.row_count();
    let cols = domain.len();
    if rows.checked_mul(cols).map_or(true, |cells| cells > u16::MAX as usize) {
        return Err(QuantizationError::GridTooLarge { rows, cols }.into());
    }
    let mut cells = Vec::with_capacity(rows * cols);

    for (row, temperature) in config.row_temperatures().enumerate() {
        let start = cells.len();
        for counts in domain.columns() {
            let capacitance = capacitance_from_counts(config, counts as f64)?;
            let rh = humidity_from_capacitance(capacitance, temperature as f64).map_err(|e| {
                log_warn!("RH inversion failed at {}°C, {} counts: {}", temperature, counts, e);
                DomainError::HumidityInversion {
                    temperature: temperature as f64,
                    counts: counts as u32,
                    capacitance_pf: capacitance,
                }
            })?;
            let raw = quantize("humidity", rh, hscale)?;
            cells.push(HumidityCell { temperature, counts, capacitance, rh, raw });
        }
        // Higher counts mean less capacitance, so less humidity
        check_strictly_monotonic("humidity", row, cells[start..].iter().map(|c| c.rh), false)?;
    }

    let metadata = HumidityMetadata {
        rows: rows as u16,
        cols: cols as u16,
        tmin: config.tmin(),
        tmax: config.tmax(),
        tstep: config.tstep(),
        tmin_scaled: quantize("tmin_scaled", config.tmin() as f64, tscale)?,
        tmax_scaled: quantize("tmax_scaled", config.tmax() as f64, tscale)?,
        tstep_scaled: quantize("tstep_scaled", config.tstep() as f64, tscale)?,
        count_min: domain.min,
        count_max: domain.max,
        count_step: domain.step,
        scale: config.humidity_scale(),
        max_raw: quantize("max_raw", RH_SATURATED_PCT, hscale)?,
    };

    log_debug!(
        "humidity axis {}..={} step {} counts, {} rows",
        domain.min,
        domain.max,
        domain.step,
        rows
    );

    Ok(HumidityTable { cells, metadata })
}
