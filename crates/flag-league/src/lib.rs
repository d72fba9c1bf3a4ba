pub mod config;
pub mod error;
pub mod league;
pub mod telemetry;
