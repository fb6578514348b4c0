// Proptest prelude: shared configuration for integration tests.
//
// Env knobs:
// - PROPTEST_CASES: number of cases per property (default 32).
//
// Generate valid inputs by construction; no prop_assume!.

pub fn proptest_prelude_config() -> proptest::prelude::ProptestConfig {
    proptest::prelude::ProptestConfig {
        // Regression files are not kept for integration tests
        failure_persistence: None,
        cases: liap_test_support::proptest_env::cases(),
        ..proptest::prelude::ProptestConfig::default()
    }
}
