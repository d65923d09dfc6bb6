//! Property-based tests for search stepping.
//!
//! Run with: `cargo test --test property`

mod stepping;
