//! Internal test modules - whitebox tests with crate access
//!
//! Tests here drive the engine through [`crate::test_harness`] and compare it
//! against brute-force computations over the cached snapshot.
