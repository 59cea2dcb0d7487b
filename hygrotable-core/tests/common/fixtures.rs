//! Sensor configurations shared by the integration tests

use hygrotable_core::{DividerTopology, SensorConfig};

/// A configuration together with a label for failure messages
#[derive(Debug, Clone)]
pub struct Fixture {
    pub name: &'static str,
    pub config: SensorConfig,
}

/// Reference board: 100 kΩ divider, 10-bit ADC, -10..110 °C
pub fn default_board() -> Fixture {
    Fixture { name: "default", config: SensorConfig::default() }
}

/// Board that used to hit a bisection failure at a grid corner
pub fn regression_board() -> Fixture {
    let config = SensorConfig::builder()
        .sense_resistor(150_000.0)
        .tmax(50)
        .stray_capacitance_pf(7.2)
        .build()
        .expect("regression config is valid");
    Fixture { name: "regression", config }
}

pub fn stray_compensated_board() -> Fixture {
    Fixture { name: "stray_compensated", config: SensorConfig::stray_compensated() }
}

/// Thermistor on the ground side of the divider
pub fn low_side_board() -> Fixture {
    let config = SensorConfig::builder()
        .topology(DividerTopology::ThermistorLow)
        .build()
        .expect("low-side config is valid");
    Fixture { name: "low_side", config }
}

/// 12-bit ADC with wider buckets
pub fn wide_adc_board() -> Fixture {
    let config = SensorConfig::builder()
        .adc_bits(12)
        .residue_bits(7)
        .build()
        .expect("12-bit config is valid");
    Fixture { name: "wide_adc", config }
}

/// Indoor range with a denser humidity grid
pub fn fine_grid_board() -> Fixture {
    let config = SensorConfig::builder()
        .tmin(0)
        .tmax(60)
        .tstep(5)
        .count_step(50)
        .build()
        .expect("fine grid config is valid");
    Fixture { name: "fine_grid", config }
}

/// Every fixture that must build successfully
pub fn all_boards() -> Vec<Fixture> {
    vec![
        default_board(),
        regression_board(),
        stray_compensated_board(),
        low_side_board(),
        wide_adc_board(),
        fine_grid_board(),
    ]
}
