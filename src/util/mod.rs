//! Shared utilities: test scaffolding.

pub mod testing;
