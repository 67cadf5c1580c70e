use super::WeatherProvider;
use crate::error::Result;
use crate::models::EnvironmentReading;

/// Wraps another provider and substitutes [`EnvironmentReading::fallback`]
/// when it fails, so a weather outage never blocks a simulation.
pub struct FallbackWeatherProvider<P> {
    inner: P,
}

impl<P: WeatherProvider> FallbackWeatherProvider<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: WeatherProvider> WeatherProvider for FallbackWeatherProvider<P> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn reading(&self, latitude: f64, longitude: f64) -> Result<EnvironmentReading> {
        match self.inner.reading(latitude, longitude) {
            Ok(reading) => Ok(reading),
            Err(e) => {
                tracing::warn!(
                    "Weather provider '{}' failed, using fallback conditions: {}",
                    self.inner.name(),
                    e
                );
                Ok(EnvironmentReading::fallback())
            }
        }
    }
}
