use super::{validate_coordinates, WeatherProvider};
use crate::error::Result;
use crate::models::EnvironmentReading;

/// Returns the same reading for every location. Used for manual input and
/// for configured weather blocks.
#[derive(Debug, Clone)]
pub struct StaticWeatherProvider {
    reading: EnvironmentReading,
}

impl StaticWeatherProvider {
    pub fn new(reading: EnvironmentReading) -> Self {
        Self { reading }
    }
}

impl WeatherProvider for StaticWeatherProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    fn reading(&self, latitude: f64, longitude: f64) -> Result<EnvironmentReading> {
        validate_coordinates(latitude, longitude)?;
        self.reading.validate()?;
        Ok(self.reading)
    }
}
