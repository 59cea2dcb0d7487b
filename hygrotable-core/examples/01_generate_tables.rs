//! Table Generation Example
//!
//! Builds the calibration tables for two board variants, prints the
//! per-entry diagnostics and renders the tables as C arrays through a
//! small [`Emitter`].
//!
//! ## What You'll Learn
//!
//! - Building a [`SensorConfig`] from defaults, a preset and JSON
//! - Reading bucket and grid metadata
//! - Writing an emitter for your own output format
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_generate_tables
//! ```

use core::fmt::Write;

use hygrotable_core::{CalibrationError, Emitter, SensorConfig, TableBuilder, TableBundle};

/// Renders a bundle as C array definitions
struct CArrayEmitter {
    out: String,
}

impl Emitter for CArrayEmitter {
    type Error = core::fmt::Error;

    fn emit(&mut self, bundle: &TableBundle) -> Result<(), Self::Error> {
        let meta = bundle.metadata();
        let name = &bundle.name;

        writeln!(self.out, "// {}", name)?;
        writeln!(self.out, "#define {}_T_LOW_COUNT {}", name, meta.thermistor.low_count)?;
        writeln!(self.out, "#define {}_T_HIGH_COUNT {}", name, meta.thermistor.high_count)?;
        writeln!(self.out, "#define {}_T_RESIDUE_BITS {}", name, meta.thermistor.residue_bits)?;
        writeln!(self.out, "#define {}_T_SCALE {}", name, meta.thermistor.scale)?;
        writeln!(self.out, "const int16_t {}_thermistor[{}] = {{", name, meta.thermistor.size)?;
        for entry in bundle.thermistor.entries() {
            writeln!(self.out, "    {:6}, // {}", entry.raw, entry)?;
        }
        writeln!(self.out, "}};")?;

        let h = meta.humidity;
        writeln!(self.out, "#define {}_RH_FCMIN {}", name, h.count_min)?;
        writeln!(self.out, "#define {}_RH_FCMAX {}", name, h.count_max)?;
        writeln!(self.out, "#define {}_RH_FSTEP {}", name, h.count_step)?;
        writeln!(self.out, "#define {}_RH_TMIN {}", name, h.tmin_scaled)?;
        writeln!(self.out, "#define {}_RH_TSTEP {}", name, h.tstep_scaled)?;
        writeln!(self.out, "const int16_t {}_humidity[{}][{}] = {{", name, h.rows, h.cols)?;
        for row in bundle.humidity.rows() {
            write!(self.out, "    {{ // {}°C\n       ", row[0].temperature)?;
            for cell in row {
                write!(self.out, " {},", cell.raw)?;
            }
            writeln!(self.out, "\n    }},")?;
        }
        writeln!(self.out, "}};")?;
        Ok(())
    }
}

fn main() -> Result<(), CalibrationError> {
    println!("HS1101 Calibration Tables");
    println!("=========================\n");

    let json = r#"{ "sense_resistor": 150000.0, "tmax": 50, "stray_capacitance_pf": 7.2 }"#;
    let from_json: SensorConfig = match serde_json::from_str(json) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("rejected board config: {}", e);
            return Ok(());
        }
    };

    for config in [SensorConfig::default(), SensorConfig::stray_compensated(), from_json] {
        let bundle = TableBuilder::new(&config).build()?;
        describe(&bundle);

        let mut emitter = CArrayEmitter { out: String::new() };
        if bundle.emit(&mut emitter).is_ok() {
            println!("\n{}", emitter.out);
        }
    }

    // A configuration that cannot be tabulated fails as a whole
    let config = SensorConfig::builder().humidity_scale(400).build()?;
    match TableBuilder::new(&config).build() {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("humidity_scale 400: {}", e),
    }

    Ok(())
}

fn describe(bundle: &TableBundle) {
    let meta = bundle.metadata();
    println!("{}", bundle.name);
    println!("{}", "-".repeat(bundle.name.len()));
    println!(
        "thermistor: buckets {}..={} ({} entries), counts {}..={}",
        meta.thermistor.low_bucket,
        meta.thermistor.high_bucket,
        meta.thermistor.size,
        meta.thermistor.low_count,
        meta.thermistor.high_count
    );
    println!(
        "humidity:   {} rows x {} cols, {}..={}°C, {}..={} counts",
        meta.humidity.rows,
        meta.humidity.cols,
        meta.humidity.tmin,
        meta.humidity.tmax,
        meta.humidity.count_min,
        meta.humidity.count_max
    );

    println!("\nthermistor entries:");
    for entry in bundle.thermistor.entries() {
        println!("  {}", entry);
    }

    println!("\nhumidity, first row:");
    if let Some(row) = bundle.humidity.row(0) {
        for cell in row {
            println!("  {}", cell);
        }
    }
}
