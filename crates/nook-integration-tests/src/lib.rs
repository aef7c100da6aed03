//! Integration test crate for the notes storage engine.
//!
//! This crate has no library code. It only contains end-to-end tests that
//! drive the service through its client and check the storage underneath.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p nook-integration-tests
//! ```
