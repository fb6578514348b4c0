//! Test-only process setup.

pub mod logging;
