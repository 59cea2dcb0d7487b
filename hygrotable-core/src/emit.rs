//! Emitter Contract
//!
//! The core stops at a structured [`TableBundle`]. Turning that into a C header,
//! a JSON file or anything else is the job of an [`Emitter`] implemented
//! outside this crate. Several emitters can consume the same bundle.
//!
//! ## Design Philosophy
//!
//! - **Structured input only**: emitters never see the physics or the solver
//! - **Read-only**: a bundle is borrowed, never modified
//! - **Own error type**: I/O and formatting failures belong to the emitter
//!
//! ## Example Implementation
//!
//! ```rust
//! use hygrotable_core::{Emitter, SensorConfig, TableBuilder, TableBundle};
//!
//! struct CArray(String);
//!
//! impl Emitter for CArray {
//!     type Error = core::fmt::Error;
//!
//!     fn emit(&mut self, bundle: &TableBundle) -> Result<(), Self::Error> {
//!         use core::fmt::Write;
//!         write!(self.0, "const int16_t {}_thermistor[] = {{", bundle.name)?;
//!         for raw in bundle.thermistor.raw_values() {
//!             write!(self.0, "{},", raw)?;
//!         }
//!         self.0.push_str("};");
//!         Ok(())
//!     }
//! }
//!
//! let bundle = TableBuilder::new(&SensorConfig::default()).build()?;
//! let mut out = CArray(String::new());
//! bundle.emit(&mut out).unwrap();
//! assert!(out.0.starts_with("const int16_t HS1101Rs100k0Ro402k7Tl_10Th110_thermistor[]"));
//! # Ok::<(), hygrotable_core::CalibrationError>(())
//! ```

use alloc::format;
use alloc::string::String;

use crate::config::SensorConfig;
use crate::format::format_resistance;
use crate::tables::TableBundle;

/// Consumer of a finished table bundle
pub trait Emitter {
    /// Error produced while writing the bundle out
    type Error;

    /// Serialize `bundle` to the emitter's target
    fn emit(&mut self, bundle: &TableBundle) -> Result<(), Self::Error>;
}

impl<E: Emitter + ?Sized> Emitter for &mut E {
    type Error = E::Error;

    fn emit(&mut self, bundle: &TableBundle) -> Result<(), Self::Error> {
        (**self).emit(bundle)
    }
}

/// Deterministic identifier for the tables generated from `config`
///
/// Built from the sense resistor, oscillator resistor, temperature bounds and,
/// when non-zero, the stray capacitance. Characters that are not valid in a C
/// identifier are replaced with `_`.
pub fn table_name(config: &SensorConfig) -> String {
    let mut name = format!(
        "HS1101Rs{}Ro{}Tl{}Th{}",
        format_resistance(config.sense_resistor()),
        format_resistance(config.oscillator_resistor()),
        config.tmin(),
        config.tmax()
    )
    .replace('-', "_");

    if config.stray_capacitance_pf() != 0.0 {
        let stray = format!("{}", config.stray_capacitance_pf()).replace('.', "_");
        name.push_str("Cstray");
        name.push_str(&stray);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::TableBuilder;
    use alloc::vec::Vec;

    #[test]
    fn default_name() {
        assert_eq!(table_name(&SensorConfig::default()), "HS1101Rs100k0Ro402k7Tl_10Th110");
    }

    #[test]
    fn stray_capacitance_is_appended() {
        let name = table_name(&SensorConfig::stray_compensated());
        assert_eq!(name, "HS1101Rs152k5Ro402k7Tl_10Th50Cstray7_2");
    }

    #[test]
    fn negative_upper_bound() {
        let config = SensorConfig::builder().tmin(-40).tmax(-10).build().unwrap();
        assert_eq!(table_name(&config), "HS1101Rs100k0Ro402k7Tl_40Th_10");
    }

    struct Collect(Vec<String>);

    impl Emitter for Collect {
        type Error = ();

        fn emit(&mut self, bundle: &TableBundle) -> Result<(), ()> {
            self.0.push(bundle.name.clone());
            Ok(())
        }
    }

    #[test]
    fn emitter_receives_bundle_through_reference() {
        let bundle = TableBuilder::new(&SensorConfig::default()).build().unwrap();
        let mut sink = Collect(Vec::new());
        bundle.emit(&mut sink).unwrap();
        bundle.emit(&mut &mut sink).unwrap();
        assert_eq!(sink.0.len(), 2);
        assert_eq!(sink.0[0], bundle.name);
    }
}
