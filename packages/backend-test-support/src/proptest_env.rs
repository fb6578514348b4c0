//! Environment knobs for property tests.

pub const CASES_VAR: &str = "PROPTEST_CASES";
pub const DEFAULT_CASES: u32 = 32;

/// Cases per property: `PROPTEST_CASES`, default 32, never below 1.
pub fn cases() -> u32 {
    std::env::var(CASES_VAR)
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(DEFAULT_CASES)
        .max(1)
}
