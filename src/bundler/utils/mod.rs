//! File system helpers.

pub mod fs;
