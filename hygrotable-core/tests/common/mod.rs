//! Common test utilities for integration tests
//!
//! This module provides:
//! - Named sensor configurations covering the supported board variants
//! - A small harness for running one check over several configurations
//! - Tolerance assertions for physical values

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
