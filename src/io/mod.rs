//! Output of derived data to files and writers.

pub mod export;
