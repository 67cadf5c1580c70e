//! Crop growth, yield and sustainability simulation.
//!
//! [`run_simulation`] takes a [`SimulationRequest`] and steps the crop day by
//! day, returning the daily series plus a summary with yield, scores, planting
//! risk and recommendations. The engine is pure: it never reads global state
//! and never prints.

pub mod config;
pub mod datasources;
pub mod error;
pub mod logic;
pub mod models;
pub mod report;

pub use error::{CropSimError, Result};
pub use logic::{evaluate_single_point, run_simulation, Simulator};
pub use models::{
    DailyResult, EnvironmentReading, ManagementSettings, SimulationRequest, SimulationResult,
    SimulationSummary,
};
