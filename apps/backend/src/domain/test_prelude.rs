// Proptest configuration for in-crate property tests.
//
// Env knobs:
// - PROPTEST_CASES: number of cases per property (default 32).

pub fn proptest_config() -> proptest::prelude::ProptestConfig {
    let cases: u32 = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(32)
        .max(1);

    proptest::prelude::ProptestConfig {
        cases,
        ..proptest::prelude::ProptestConfig::default()
    }
}
