//! Charging vs refueling cost comparison for dual-fuel vehicles.

pub mod calc;
pub mod cli;
pub mod config;
pub mod input;
/// CSV and JSON export.
pub mod io;
pub mod session;
