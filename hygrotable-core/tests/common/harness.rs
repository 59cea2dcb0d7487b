//! Parameterized test runner and assertion helpers
//!
//! Runs one check against several fixtures, collects every failure instead of
//! stopping at the first, and reports them together.

use super::fixtures::Fixture;

/// Outcome of one check against one fixture
#[derive(Debug, Clone)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub error_message: Option<String>,
}

/// Collects results across fixtures
#[derive(Default)]
pub struct TestHarness {
    results: Vec<TestResult>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a single check
    pub fn run_test<F>(&mut self, name: &str, test_fn: F)
    where
        F: FnOnce() -> Result<(), String>,
    {
        let result = test_fn();
        self.results.push(TestResult {
            name: name.to_string(),
            passed: result.is_ok(),
            error_message: result.err(),
        });
    }

    /// Run the same check once per fixture
    pub fn run_for_fixtures<F>(&mut self, name: &str, fixtures: &[Fixture], test_fn: F)
    where
        F: Fn(&Fixture) -> Result<(), String>,
    {
        for fixture in fixtures {
            let test_name = format!("{}[{}]", name, fixture.name);
            self.run_test(&test_name, || test_fn(fixture));
        }
    }

    /// Panic with every failure message if anything failed
    pub fn assert_all_passed(&self) {
        let failures: Vec<String> = self
            .results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| format!("  ✗ {}: {}", r.name, r.error_message.as_deref().unwrap_or("")))
            .collect();

        if !failures.is_empty() {
            panic!(
                "{} of {} checks failed:\n{}",
                failures.len(),
                self.results.len(),
                failures.join("\n")
            );
        }
    }
}

#[macro_export]
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let diff = ($actual - $expected).abs();
        if diff > $tolerance {
            panic!(
                "Value {} not within tolerance {} of expected {} (diff: {})",
                $actual, $tolerance, $expected, diff
            );
        }
    };
}

/// Same as [`assert_within_tolerance!`] but returns an error for the harness
#[macro_export]
macro_rules! check_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr, $($context:tt)+) => {
        let diff = ($actual - $expected).abs();
        if diff > $tolerance {
            return Err(format!(
                "{}: {} not within {} of {} (diff: {})",
                format!($($context)+), $actual, $tolerance, $expected, diff
            ));
        }
    };
}
