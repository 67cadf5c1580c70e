use crate::datasources::{StaticWeatherProvider, WeatherProvider};
use crate::error::{CropSimError, Result};
use crate::logic::Simulator;
use crate::models::{
    CropType, ManagementSettings, RawEnvironment, ReadingSource, RainfallUnit, SimulationRequest,
    SoilType, SolarUnit, TemperatureUnit,
};
use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub field: FieldConfig,
    /// Manually entered conditions. Omit to run against fallback conditions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<RawEnvironment>,
    #[serde(default)]
    pub management: ManagementSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    pub crop: String,
    pub soil: String,
    pub days: u32,
    /// Defaults to today when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FieldConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    /// Overrides `management.farm_size_hectares` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_size_acres: Option<f64>,
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(CropSimError::Configuration(format!(
                "Config file not found at {:?}. Run `cropsim init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| CropSimError::Configuration(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    /// Parses YAML after substituting `${VAR}` references from the environment.
    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;
        serde_yaml::from_str(&content)
            .map_err(|e| CropSimError::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Search for cropsim.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/cropsim.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        if default_path.exists() {
            tracing::debug!("using config at {}", default_path.display());
        }
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/cropsim/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CropSimError::Configuration("Cannot determine config directory".into()))?
            .join("cropsim");
        Ok(config_dir.join("config.yaml"))
    }

    /// Builds the engine request, normalizing configured weather into
    /// canonical units. `today` is used when no start date is configured.
    pub fn to_request(&self, today: NaiveDate) -> Result<SimulationRequest> {
        let mut management = self.management.clone();
        if let Some(acres) = self.field.farm_size_acres {
            management = management.with_farm_size_acres(acres);
        }

        let environment = match self.weather {
            Some(raw) => {
                let reading = raw.normalize(ReadingSource::Manual)?;
                // Manual readings are never replaced; bad coordinates stop the run.
                let provider = StaticWeatherProvider::new(reading);
                let reading = provider.reading(self.field.latitude, self.field.longitude)?;
                tracing::debug!(provider = provider.name(), source = %reading.source, "weather resolved");
                Some(reading)
            }
            None => None,
        };

        let request = SimulationRequest {
            crop: self.simulation.crop.clone(),
            soil: self.simulation.soil.clone(),
            days: self.simulation.days,
            start_date: self.simulation.start_date.unwrap_or(today),
            environment,
            management,
        };
        Ok(request)
    }

    /// Full validation without running: identifiers, ranges and units.
    pub fn validate(&self, today: NaiveDate) -> Result<SimulationRequest> {
        let request = self.to_request(today)?;
        Simulator::new(&request)?;
        Ok(request)
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up a CropSim run!");
        println!();

        // --- Crop & soil ---
        println!("Field");
        let crop_names: Vec<&str> = CropType::ALL.iter().map(|c| c.as_str()).collect();
        let crop_index = Select::new()
            .with_prompt("  Crop")
            .items(&crop_names)
            .default(0)
            .interact()
            .map_err(|e| CropSimError::Configuration(format!("Input error: {}", e)))?;

        let soil_names: Vec<&str> = SoilType::ALL.iter().map(|s| s.as_str()).collect();
        let soil_index = Select::new()
            .with_prompt("  Soil")
            .items(&soil_names)
            .default(1)
            .interact()
            .map_err(|e| CropSimError::Configuration(format!("Input error: {}", e)))?;

        let crop = CropType::ALL[crop_index];
        let days: u32 = Input::new()
            .with_prompt("  Days to simulate")
            .default(crop.profile().total_growth_days)
            .interact_text()
            .map_err(|e| CropSimError::Configuration(format!("Input error: {}", e)))?;

        let farm_size_acres: f64 = Input::new()
            .with_prompt("  Farm size (acres)")
            .default(10.0)
            .interact_text()
            .map_err(|e| CropSimError::Configuration(format!("Input error: {}", e)))?;

        println!();

        // --- Management ---
        println!("Management");
        let irrigation_level: f64 = Input::new()
            .with_prompt("  Irrigation level (0-100)")
            .default(50.0)
            .interact_text()
            .map_err(|e| CropSimError::Configuration(format!("Input error: {}", e)))?;

        let fertilizer_level: f64 = Input::new()
            .with_prompt("  Fertilizer level (0-100)")
            .default(50.0)
            .interact_text()
            .map_err(|e| CropSimError::Configuration(format!("Input error: {}", e)))?;

        let organic_practices = Confirm::new()
            .with_prompt("  Organic practices?")
            .default(false)
            .interact()
            .map_err(|e| CropSimError::Configuration(format!("Input error: {}", e)))?;

        println!();

        // --- Weather (optional) ---
        let enter_weather = Confirm::new()
            .with_prompt("Enter current weather manually? (otherwise fallback conditions are used)")
            .default(true)
            .interact()
            .map_err(|e| CropSimError::Configuration(format!("Input error: {}", e)))?;

        let weather = if enter_weather {
            let temperature: f64 = Input::new()
                .with_prompt("  Temperature (°C)")
                .default(20.0)
                .interact_text()
                .map_err(|e| CropSimError::Configuration(format!("Input error: {}", e)))?;

            let rainfall: f64 = Input::new()
                .with_prompt("  Rainfall (mm/day)")
                .default(2.5)
                .interact_text()
                .map_err(|e| CropSimError::Configuration(format!("Input error: {}", e)))?;

            let solar_radiation: f64 = Input::new()
                .with_prompt("  Solar radiation (W/m²)")
                .default(200.0)
                .interact_text()
                .map_err(|e| CropSimError::Configuration(format!("Input error: {}", e)))?;

            let humidity: f64 = Input::new()
                .with_prompt("  Humidity (%)")
                .default(60.0)
                .interact_text()
                .map_err(|e| CropSimError::Configuration(format!("Input error: {}", e)))?;

            Some(RawEnvironment {
                temperature,
                temperature_unit: TemperatureUnit::Celsius,
                rainfall,
                rainfall_unit: RainfallUnit::MmPerDay,
                solar_radiation,
                solar_unit: SolarUnit::WattsPerSquareMeter,
                humidity_percent: Some(humidity),
            })
        } else {
            None
        };

        println!();

        let config = Config {
            simulation: SimulationConfig {
                crop: crop.as_str().to_lowercase(),
                soil: soil_names[soil_index].to_lowercase(),
                days,
                start_date: None,
            },
            field: FieldConfig {
                name: None,
                latitude: 0.0,
                longitude: 0.0,
                farm_size_acres: Some(farm_size_acres),
            },
            weather,
            management: ManagementSettings::new(irrigation_level, fertilizer_level)
                .with_organic_practices(organic_practices),
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config).map_err(|e| {
            CropSimError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        // Write with a header comment
        let content = format!(
            "# CropSim Configuration\n# Generated by `cropsim init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| CropSimError::Configuration(format!("Invalid pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            match std::env::var(var_name) {
                Ok(value) => result = result.replace(placeholder, &value),
                Err(_) => tracing::warn!("Environment variable {} is not set", var_name),
            }
        }

        Ok(result)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                crop: "wheat".into(),
                soil: "loam".into(),
                days: CropType::Wheat.profile().total_growth_days,
                start_date: None,
            },
            field: FieldConfig::default(),
            weather: None,
            management: ManagementSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    const SAMPLE: &str = r#"
simulation:
  crop: corn
  soil: sandy
  days: 90
  start_date: 2024-05-01
field:
  name: North Field
  latitude: 39.83
  longitude: -75.87
  farm_size_acres: 10
weather:
  temperature: 77
  temperature_unit: fahrenheit
  rainfall: 90
  rainfall_unit: mm_per_month
  solar_radiation: 20
  solar_unit: mj_per_square_meter_day
  humidity_percent: 65
management:
  irrigation_level: 60
  fertilizer_level: 70
  organic_practices: true
"#;

    #[test]
    fn parses_full_config() {
        let config = Config::parse(SAMPLE).unwrap();
        assert_eq!(config.simulation.crop, "corn");
        assert_eq!(config.field.name.as_deref(), Some("North Field"));
        assert!(config.management.organic_practices);
        assert_eq!(config.management.soil_health, 80.0);
    }

    #[test]
    fn request_normalizes_units() {
        let request = Config::parse(SAMPLE).unwrap().to_request(today()).unwrap();
        let env = request.environment.unwrap();
        assert!((env.temperature_c - 25.0).abs() < 1e-9);
        assert!((env.rainfall_mm_day - 3.0).abs() < 1e-9);
        assert!((env.solar_radiation_w_m2 - 231.48).abs() < 1e-6);
        assert_eq!(env.source, ReadingSource::Manual);
        assert!((request.management.farm_size_hectares - 4.04686).abs() < 1e-4);
        assert_eq!(
            request.start_date,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config =
            Config::parse("simulation:\n  crop: rice\n  soil: clay\n  days: 30\n").unwrap();
        let request = config.validate(today()).unwrap();
        assert!(request.environment.is_none());
        assert_eq!(request.start_date, today());
        assert_eq!(request.management, ManagementSettings::default());
    }

    #[test]
    fn validate_catches_unknown_crop() {
        let config =
            Config::parse("simulation:\n  crop: barley\n  soil: clay\n  days: 30\n").unwrap();
        assert!(config.validate(today()).unwrap_err().is_configuration());
    }

    #[test]
    fn malformed_yaml_is_a_configuration_error() {
        assert!(Config::parse("simulation: [").unwrap_err().is_configuration());
    }

    #[test]
    fn substitutes_environment_variables() {
        std::env::set_var("CROPSIM_TEST_CROP", "soybeans");
        let config =
            Config::parse("simulation:\n  crop: ${CROPSIM_TEST_CROP}\n  soil: loam\n  days: 60\n")
                .unwrap();
        assert_eq!(config.simulation.crop, "soybeans");
    }

    #[test]
    fn example_config_is_valid() {
        let config = Config::parse(include_str!("../config/cropsim.yaml.example")).unwrap();
        let request = config.validate(today()).unwrap();
        let env = request.environment.unwrap();
        assert!((env.temperature_c - 20.0).abs() < 1e-9);
        assert!((env.rainfall_mm_day - 2.5).abs() < 1e-9);
        assert!((env.solar_radiation_w_m2 - 200.0).abs() < 1e-9);
    }

    #[test]
    fn bad_coordinates_reject_manual_weather() {
        let yaml = "simulation:\n  crop: wheat\n  soil: loam\n  days: 30\n\
                    field:\n  latitude: 95\n\
                    weather:\n  temperature: 40\n  rainfall: 25\n  solar_radiation: 250\n";
        let config = Config::parse(yaml).unwrap();
        let err = config.to_request(today()).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(config.validate(today()).unwrap_err().is_invalid_input());
    }

    #[test]
    fn manual_weather_is_kept_as_entered() {
        let yaml = "simulation:\n  crop: wheat\n  soil: loam\n  days: 30\n\
                    weather:\n  temperature: 40\n  rainfall: 25\n  solar_radiation: 250\n";
        let env = Config::parse(yaml)
            .unwrap()
            .to_request(today())
            .unwrap()
            .environment
            .unwrap();
        assert_eq!(env.temperature_c, 40.0);
        assert_eq!(env.rainfall_mm_day, 25.0);
        assert_eq!(env.source, ReadingSource::Manual);
    }

    #[test]
    fn default_config_round_trips_through_yaml() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        let config = Config::parse(&yaml).unwrap();
        assert_eq!(config.simulation.days, 120);
        assert!(config.weather.is_none());
    }
}
