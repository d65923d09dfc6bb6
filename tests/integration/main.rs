//! Integration tests for the collsearch public API and command line.
//!
//! Run with: `cargo test --test integration`

mod boundaries;
mod cli;
mod collators;
mod scenarios;
