pub mod fallback;
pub mod fixed;

pub use fallback::FallbackWeatherProvider;
pub use fixed::StaticWeatherProvider;

use crate::error::{CropSimError, Result};
use crate::models::EnvironmentReading;

/// Source of current conditions for a field location.
pub trait WeatherProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Canonical reading for the given coordinates
    fn reading(&self, latitude: f64, longitude: f64) -> Result<EnvironmentReading>;
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(CropSimError::InvalidInput(format!(
            "coordinates out of range: {}, {}",
            latitude, longitude
        )));
    }
    Ok(())
}
