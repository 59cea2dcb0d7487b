//! Human-readable rendering of resistors and table entries
//!
//! Presentation only; nothing here feeds back into table values.

use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::tables::{HumidityCell, ThermistorEntry};

/// Resistor value in schematic notation
///
/// One decimal with the decimal point replaced by the unit letter: `M` above
/// 1 MΩ, `k` above 1 kΩ, `R` otherwise, two decimals at or below 1 Ω.
///
/// ```rust
/// use hygrotable_core::format::format_resistance;
///
/// assert_eq!(format_resistance(100_000.0), "100k0");
/// assert_eq!(format_resistance(402_700.0), "402k7");
/// assert_eq!(format_resistance(2_200_000.0), "2M2");
/// ```
pub fn format_resistance(r: f64) -> String {
    let (value, unit, precision) = if r > 1e6 {
        (r / 1e6, "M", 1)
    } else if r > 1e3 {
        (r / 1e3, "k", 1)
    } else if r > 1.0 {
        (r, "R", 1)
    } else {
        (r, "R", 2)
    };
    format!("{:.*}", precision, value).replace('.', unit)
}

impl fmt::Display for ThermistorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:2}] {:6.2}°C {:5}cts {:.3}V res={}",
            self.bucket,
            self.temperature,
            self.count,
            self.voltage,
            format_resistance(self.resistance)
        )
    }
}

impl fmt::Display for HumidityCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:4}°C {:5}cts {:7.2}pF {:6.2}%RH raw={}",
            self.temperature, self.counts, self.capacitance, self.rh, self.raw
        )
    }
}
