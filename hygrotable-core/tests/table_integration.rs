//! Integration tests for table generation
//!
//! Builds complete bundles for every supported board variant and checks the
//! structural properties the device relies on: bucket bounds, monotonicity,
//! grid shape and metadata consistency.

mod common;

use hygrotable_core::{
    physics::{
        adc_count_at_temperature, counts_for_rh_at_temperature, humidity_from_capacitance,
        capacitance_for_rh, capacitance_baseline_at_temperature, resistance_at_temperature,
        temperature_for_resistance,
    },
    tables::{build_humidity_table, build_thermistor_table, count_domain},
    CalibrationError, DomainError, QuantizationError, SensorConfig, TableBuilder,
};

use common::{
    fixtures::{all_boards, default_board, regression_board},
    harness::TestHarness,
};

#[test]
fn test_every_board_builds() {
    let mut harness = TestHarness::new();

    harness.run_for_fixtures("build", &all_boards(), |fixture| {
        let bundle = TableBuilder::new(&fixture.config)
            .build()
            .map_err(|e| format!("build failed: {}", e))?;

        if bundle.thermistor.is_empty() || bundle.humidity.is_empty() {
            return Err("empty table".into());
        }
        if bundle.config != fixture.config {
            return Err("bundle does not carry its configuration".into());
        }
        Ok(())
    });

    harness.assert_all_passed();
}

#[test]
fn test_bucket_bounds_match_adc_counts() {
    let mut harness = TestHarness::new();

    harness.run_for_fixtures("bucket_bounds", &all_boards(), |fixture| {
        let config = &fixture.config;
        let table = build_thermistor_table(config).map_err(|e| e.to_string())?;
        let meta = table.metadata();

        let a = adc_count_at_temperature(config, config.tmin() as f64);
        let b = adc_count_at_temperature(config, config.tmax() as f64);
        let (low, high) = (a.min(b), a.max(b));
        let rb = config.residue_bits();

        if meta.low_bucket != low >> rb {
            return Err(format!("low bucket {} != {}", meta.low_bucket, low >> rb));
        }
        if meta.high_bucket != (high >> rb) + 1 {
            return Err(format!("high bucket {} != {}", meta.high_bucket, (high >> rb) + 1));
        }
        if meta.high_bucket < meta.low_bucket {
            return Err("inverted bucket range".into());
        }
        if table.len() != (meta.high_bucket - meta.low_bucket + 1) as usize {
            return Err(format!("size {} for buckets {}..={}", table.len(), meta.low_bucket, meta.high_bucket));
        }
        if meta.size as usize != table.len() {
            return Err("metadata size disagrees with entries".into());
        }
        Ok(())
    });

    harness.assert_all_passed();
}

#[test]
fn test_thermistor_values_strictly_monotonic() {
    let mut harness = TestHarness::new();

    harness.run_for_fixtures("thermistor_monotonic", &all_boards(), |fixture| {
        let table = build_thermistor_table(&fixture.config).map_err(|e| e.to_string())?;
        let values = table.raw_values();
        let rising = fixture.config.topology().count_rises_with_temperature();

        for (i, pair) in values.windows(2).enumerate() {
            let ok = if rising { pair[0] < pair[1] } else { pair[0] > pair[1] };
            if !ok {
                return Err(format!("entries {} and {}: {} then {}", i, i + 1, pair[0], pair[1]));
            }
        }
        Ok(())
    });

    harness.assert_all_passed();
}

#[test]
fn test_humidity_rows_fall_with_counts() {
    let mut harness = TestHarness::new();

    harness.run_for_fixtures("humidity_rows", &all_boards(), |fixture| {
        let table = build_humidity_table(&fixture.config).map_err(|e| e.to_string())?;
        let meta = table.metadata();

        if table.rows().count() != meta.rows as usize {
            return Err("row count mismatch".into());
        }
        for (r, row) in table.rows().enumerate() {
            if row.len() != meta.cols as usize {
                return Err(format!("row {} has {} cells", r, row.len()));
            }
            for pair in row.windows(2) {
                if pair[0].raw <= pair[1].raw {
                    return Err(format!("row {} rises at {} counts", r, pair[1].counts));
                }
            }
        }
        Ok(())
    });

    harness.assert_all_passed();
}

#[test]
fn test_count_domain_covers_physical_corners() {
    let mut harness = TestHarness::new();

    harness.run_for_fixtures("count_domain", &all_boards(), |fixture| {
        let config = &fixture.config;
        let domain = count_domain(config).map_err(|e| e.to_string())?;

        if domain.min % domain.step != 0 || domain.max % domain.step != 0 {
            return Err(format!("bounds {}..{} not aligned to {}", domain.min, domain.max, domain.step));
        }
        for rh in [0.0, 100.0] {
            for t in [config.tmin(), config.tmax()] {
                let counts = counts_for_rh_at_temperature(config, rh, t as f64)
                    .map_err(|e| e.to_string())?;
                if counts < domain.min as f64 || counts > domain.max as f64 {
                    return Err(format!("{}% at {}°C = {} counts outside domain", rh, t, counts));
                }
            }
        }
        Ok(())
    });

    harness.assert_all_passed();
}

#[test]
fn test_default_board_shape() {
    let bundle = TableBuilder::new(&default_board().config).build().unwrap();
    let meta = bundle.metadata();

    assert_eq!(meta.thermistor.low_bucket, 4);
    assert_eq!(meta.thermistor.high_bucket, 31);
    assert_eq!(bundle.thermistor.len(), 28);

    assert_eq!(meta.humidity.count_min, 8_800);
    assert_eq!(meta.humidity.count_max, 11_200);
    assert_eq!(meta.humidity.rows, 13);
    assert_eq!(meta.humidity.cols, 25);
    assert_eq!(bundle.humidity.len(), 13 * 25);
}

#[test]
fn test_regression_board_grid_completes() {
    let config = regression_board().config;
    let table = build_humidity_table(&config).expect("no bisection failure on this board");

    let meta = table.metadata();
    assert_eq!(meta.rows, 7);
    assert_eq!(meta.count_min, 8_600);
    assert_eq!(meta.count_max, 10_700);
    assert_eq!(meta.cols, 22);
}

#[test]
fn test_reference_point_is_exact() {
    let config = SensorConfig::default();
    assert_eq!(resistance_at_temperature(&config, 25.0), 100_000.0);
    assert_eq!(temperature_for_resistance(&config, 100_000.0).unwrap(), 25.0);
}

#[test]
fn test_resistance_round_trip_across_decades() {
    let config = SensorConfig::default();
    for r in [1_000.0, 4_700.0, 22_000.0, 100_000.0, 470_000.0, 1_000_000.0] {
        let t = temperature_for_resistance(&config, r).unwrap();
        let back = resistance_at_temperature(&config, t);
        assert_within_tolerance!(back / r, 1.0, 1e-6);
    }
}

#[test]
fn test_humidity_round_trip_on_grid() {
    for temp in (-10..=100).step_by(10) {
        let baseline = capacitance_baseline_at_temperature(temp as f64);
        for rh in (0..=100).step_by(10) {
            let cap = capacitance_for_rh(rh as f64, baseline);
            let back = humidity_from_capacitance(cap, temp as f64).unwrap();
            assert_within_tolerance!(back, rh as f64, 0.01);
        }
    }
}

#[test]
fn test_build_is_deterministic() {
    let config = SensorConfig::stray_compensated();
    let a = TableBuilder::new(&config).build().unwrap();
    let b = TableBuilder::new(&config).build().unwrap();

    assert_eq!(a.name, b.name);
    assert_eq!(a.thermistor.raw_values(), b.thermistor.raw_values());
    assert_eq!(a.humidity.raw_values(), b.humidity.raw_values());
}

#[test]
fn test_failed_build_reports_cause() {
    // 500 kΩ pushes the 110 °C count into the last bucket, leaving no margin
    let config = SensorConfig::builder().sense_resistor(500_000.0).build().unwrap();
    let err = TableBuilder::new(&config).build().unwrap_err();
    assert!(matches!(
        err,
        CalibrationError::Domain(DomainError::AdcCountOutOfRange { count: 1024, max: 1023 })
    ));

    let config = SensorConfig::builder().humidity_scale(400).build().unwrap();
    let err = TableBuilder::new(&config).build().unwrap_err();
    assert!(matches!(
        err,
        CalibrationError::Quantization(QuantizationError::Overflow { quantity: "humidity", .. })
    ));
}

#[test]
fn test_tables_build_in_parallel() {
    let handles: Vec<_> = all_boards()
        .into_iter()
        .map(|fixture| {
            std::thread::spawn(move || {
                let bundle = TableBuilder::new(&fixture.config).build().unwrap();
                (fixture, bundle)
            })
        })
        .collect();

    for handle in handles {
        let (fixture, parallel) = handle.join().unwrap();
        let serial = TableBuilder::new(&fixture.config).build().unwrap();
        assert_eq!(parallel.thermistor.raw_values(), serial.thermistor.raw_values());
        assert_eq!(parallel.humidity.raw_values(), serial.humidity.raw_values());
    }
}
