use crate::error::{CropSimError, Result};
use serde::{Deserialize, Serialize};

/// Humidity assumed when a reading does not carry one.
pub const DEFAULT_HUMIDITY_PERCENT: f64 = 60.0;

/// W/m² (daily mean) per MJ/m²/day.
pub const WATTS_PER_MJ_DAY: f64 = 11.574;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingSource {
    Provider,
    Manual,
    Fallback,
}

impl ReadingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingSource::Provider => "Weather Provider",
            ReadingSource::Manual => "Manual",
            ReadingSource::Fallback => "Fallback",
        }
    }
}

impl std::fmt::Display for ReadingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RainfallUnit {
    #[default]
    MmPerDay,
    MmPerMonth,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarUnit {
    #[default]
    WattsPerSquareMeter,
    KwhPerSquareMeterDay,
    MjPerSquareMeterDay,
}

/// Canonical weather input: °C, mm/day, W/m².
///
/// Build one directly when the units are already canonical, or go through
/// [`RawEnvironment::normalize`] at the ingestion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentReading {
    pub temperature_c: f64,
    pub rainfall_mm_day: f64,
    pub solar_radiation_w_m2: f64,
    pub humidity_percent: Option<f64>,
    #[serde(default = "default_source")]
    pub source: ReadingSource,
}

fn default_source() -> ReadingSource {
    ReadingSource::Manual
}

impl EnvironmentReading {
    pub fn new(temperature_c: f64, rainfall_mm_day: f64, solar_radiation_w_m2: f64) -> Self {
        Self {
            temperature_c,
            rainfall_mm_day,
            solar_radiation_w_m2,
            humidity_percent: None,
            source: ReadingSource::Manual,
        }
    }

    pub fn with_humidity(mut self, humidity_percent: f64) -> Self {
        self.humidity_percent = Some(humidity_percent);
        self
    }

    pub fn with_source(mut self, source: ReadingSource) -> Self {
        self.source = source;
        self
    }

    /// Moderate temperate conditions used when no reading could be obtained.
    pub fn fallback() -> Self {
        Self {
            temperature_c: 20.0,
            rainfall_mm_day: 2.5,
            solar_radiation_w_m2: 200.0,
            humidity_percent: Some(DEFAULT_HUMIDITY_PERCENT),
            source: ReadingSource::Fallback,
        }
    }

    pub fn humidity_or_default(&self) -> f64 {
        self.humidity_percent.unwrap_or(DEFAULT_HUMIDITY_PERCENT)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.temperature_c.is_finite() {
            return Err(CropSimError::InvalidInput(format!(
                "temperature must be a finite number, got {}",
                self.temperature_c
            )));
        }
        require_non_negative("rainfall", self.rainfall_mm_day)?;
        require_non_negative("solar radiation", self.solar_radiation_w_m2)?;
        if let Some(h) = self.humidity_percent {
            require_percentage("humidity", h)?;
        }
        Ok(())
    }
}

impl Default for EnvironmentReading {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Weather values as reported by a provider, in whatever units it uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawEnvironment {
    pub temperature: f64,
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
    pub rainfall: f64,
    #[serde(default)]
    pub rainfall_unit: RainfallUnit,
    pub solar_radiation: f64,
    #[serde(default)]
    pub solar_unit: SolarUnit,
    #[serde(default)]
    pub humidity_percent: Option<f64>,
}

impl RawEnvironment {
    pub fn normalize(&self, source: ReadingSource) -> Result<EnvironmentReading> {
        let reading = EnvironmentReading {
            temperature_c: match self.temperature_unit {
                TemperatureUnit::Celsius => self.temperature,
                TemperatureUnit::Fahrenheit => fahrenheit_to_celsius(self.temperature),
            },
            rainfall_mm_day: match self.rainfall_unit {
                RainfallUnit::MmPerDay => self.rainfall,
                RainfallUnit::MmPerMonth => self.rainfall / 30.0,
            },
            solar_radiation_w_m2: match self.solar_unit {
                SolarUnit::WattsPerSquareMeter => self.solar_radiation,
                SolarUnit::KwhPerSquareMeterDay => self.solar_radiation * 1000.0 / 24.0,
                SolarUnit::MjPerSquareMeterDay => self.solar_radiation * WATTS_PER_MJ_DAY,
            },
            humidity_percent: self.humidity_percent,
            source,
        };
        reading.validate()?;
        Ok(reading)
    }
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

pub(crate) fn require_non_negative(label: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CropSimError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            label, value
        )));
    }
    Ok(())
}

pub(crate) fn require_percentage(label: &str, value: f64) -> Result<()> {
    require_non_negative(label, value)?;
    if value > 100.0 {
        return Err(CropSimError::InvalidInput(format!(
            "{} must be within 0-100, got {}",
            label, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fahrenheit_to_celsius_known_values() {
        assert!((fahrenheit_to_celsius(32.0) - 0.0).abs() < 0.001);
        assert!((fahrenheit_to_celsius(212.0) - 100.0).abs() < 0.001);
        assert!((fahrenheit_to_celsius(-40.0) - (-40.0)).abs() < 0.001);
    }

    #[test]
    fn normalize_monthly_rainfall() {
        let raw = RawEnvironment {
            temperature: 20.0,
            temperature_unit: TemperatureUnit::Celsius,
            rainfall: 90.0,
            rainfall_unit: RainfallUnit::MmPerMonth,
            solar_radiation: 200.0,
            solar_unit: SolarUnit::WattsPerSquareMeter,
            humidity_percent: None,
        };
        let reading = raw.normalize(ReadingSource::Provider).unwrap();
        assert!((reading.rainfall_mm_day - 3.0).abs() < 1e-9);
        assert_eq!(reading.source, ReadingSource::Provider);
    }

    #[test]
    fn normalize_solar_units() {
        let mut raw = RawEnvironment {
            temperature: 68.0,
            temperature_unit: TemperatureUnit::Fahrenheit,
            rainfall: 2.0,
            rainfall_unit: RainfallUnit::MmPerDay,
            solar_radiation: 4.8,
            solar_unit: SolarUnit::KwhPerSquareMeterDay,
            humidity_percent: Some(70.0),
        };
        let reading = raw.normalize(ReadingSource::Provider).unwrap();
        assert!((reading.temperature_c - 20.0).abs() < 1e-9);
        assert!((reading.solar_radiation_w_m2 - 200.0).abs() < 1e-9);

        raw.solar_radiation = 20.0;
        raw.solar_unit = SolarUnit::MjPerSquareMeterDay;
        let reading = raw.normalize(ReadingSource::Provider).unwrap();
        assert!((reading.solar_radiation_w_m2 - 231.48).abs() < 1e-6);
    }

    #[test]
    fn humidity_defaults_to_sixty() {
        let reading = EnvironmentReading::new(20.0, 5.0, 200.0);
        assert_eq!(reading.humidity_or_default(), 60.0);
        assert_eq!(reading.with_humidity(85.0).humidity_or_default(), 85.0);
    }

    #[test]
    fn validate_rejects_nan_and_negative() {
        assert!(EnvironmentReading::new(f64::NAN, 1.0, 1.0)
            .validate()
            .unwrap_err()
            .is_invalid_input());
        assert!(EnvironmentReading::new(20.0, -1.0, 1.0)
            .validate()
            .unwrap_err()
            .is_invalid_input());
        assert!(EnvironmentReading::new(20.0, 1.0, f64::NAN)
            .validate()
            .is_err());
        assert!(EnvironmentReading::new(20.0, 1.0, 1.0)
            .with_humidity(120.0)
            .validate()
            .is_err());
        // Sub-zero temperatures are legitimate.
        assert!(EnvironmentReading::new(-5.0, 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn fallback_is_valid() {
        let fallback = EnvironmentReading::fallback();
        assert!(fallback.validate().is_ok());
        assert_eq!(fallback.source, ReadingSource::Fallback);
        assert_eq!(fallback.source.as_str(), "Fallback");
    }
}
