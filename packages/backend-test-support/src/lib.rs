//! Shared helpers for liap-backend integration tests.
//!
//! Kept free of any dependency on the backend itself so every test binary
//! can pull it in.

pub mod logging;
pub mod proptest_env;
