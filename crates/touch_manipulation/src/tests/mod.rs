//! Crate-level scenario tests
