//! Unit tests for kindpush CLI
//!
//! These tests use recording fakes of the ports and run fast without
//! touching a container engine.

mod helpers;
mod property_tests;
