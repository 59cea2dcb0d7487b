//! Device Lookup Example
//!
//! Runs simulated raw readings through the generated tables with the same
//! integer arithmetic the firmware uses, and compares the result with the
//! conditions that produced the readings.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_device_lookup
//! ```

use hygrotable_core::physics::{adc_count_at_temperature, counts_for_rh_at_temperature};
use hygrotable_core::{CalibrationError, LookupStatus, SensorConfig, TableBuilder};

fn main() -> Result<(), CalibrationError> {
    println!("Device Lookup Emulation");
    println!("=======================\n");

    let config = SensorConfig::default();
    let bundle = TableBuilder::new(&config).build()?;
    let meta = bundle.metadata();

    println!("{:>8} {:>6} {:>6} {:>9} {:>8} {:>9} {:>8}  status", "T true", "RH", "adc", "counts", "T read", "RH read", "error");

    for t in [-10.0, 0.0, 15.0, 25.0, 40.0, 60.0, 85.0, 110.0] {
        for rh in [10.0, 50.0, 90.0] {
            let adc = adc_count_at_temperature(&config, t);
            let counts = libm::round(counts_for_rh_at_temperature(&config, rh, t)?) as u16;

            let reading = bundle.convert(adc, counts);
            let t_read = meta.scale_temperature(reading.temperature_raw);
            let rh_read = meta.scale_humidity(reading.humidity.raw);

            println!(
                "{:8.1} {:6.1} {:6} {:9} {:8.2} {:9.2} {:8.2}  {:?}",
                t,
                rh,
                adc,
                counts,
                t_read,
                rh_read,
                rh_read - rh,
                reading.humidity.status
            );
        }
    }

    println!("\nSaturation and clamping:");
    let lookup = bundle.humidity.lookup();
    let h = meta.humidity;
    for (label, counts, temp_raw) in [
        ("wet (below fcmin)", h.count_min - 50, 3175),
        ("dry (above fcmax)", h.count_max + 50, 3175),
        ("cold (below tmin)", 10_000, h.tmin_scaled - 254),
        ("hot (above tmax)", 10_000, h.tmax_scaled + 254),
    ] {
        let reading = lookup.compute(counts, temp_raw);
        let note = if reading.status == LookupStatus::Ok { "" } else { "  <- clamped" };
        println!(
            "  {:<18} {:?} {:.2}%{}",
            label,
            reading.status,
            meta.scale_humidity(reading.raw),
            note
        );
    }

    Ok(())
}
