use super::environment::{require_non_negative, require_percentage};
use crate::error::{CropSimError, Result};
use serde::{Deserialize, Serialize};

pub const HECTARES_PER_ACRE: f64 = 0.404686;

pub fn acres_to_hectares(acres: f64) -> f64 {
    acres * HECTARES_PER_ACRE
}

/// Farmer-controlled inputs. Levels are percentages (0-100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagementSettings {
    /// Percentage of the crop's daily water need supplied by irrigation.
    pub irrigation_level: f64,
    pub fertilizer_level: f64,
    #[serde(default = "default_soil_health")]
    pub soil_health: f64,
    #[serde(default = "default_pest_risk")]
    pub pest_risk: f64,
    #[serde(default)]
    pub organic_practices: bool,
    #[serde(default)]
    pub soil_ph: Option<f64>,
    #[serde(default = "default_farm_size")]
    pub farm_size_hectares: f64,
}

fn default_soil_health() -> f64 {
    80.0
}

fn default_pest_risk() -> f64 {
    20.0
}

fn default_farm_size() -> f64 {
    1.0
}

impl ManagementSettings {
    pub fn new(irrigation_level: f64, fertilizer_level: f64) -> Self {
        Self {
            irrigation_level,
            fertilizer_level,
            ..Self::default()
        }
    }

    pub fn with_soil_health(mut self, soil_health: f64) -> Self {
        self.soil_health = soil_health;
        self
    }

    pub fn with_pest_risk(mut self, pest_risk: f64) -> Self {
        self.pest_risk = pest_risk;
        self
    }

    pub fn with_organic_practices(mut self, organic: bool) -> Self {
        self.organic_practices = organic;
        self
    }

    pub fn with_soil_ph(mut self, ph: f64) -> Self {
        self.soil_ph = Some(ph);
        self
    }

    pub fn with_farm_size_acres(mut self, acres: f64) -> Self {
        self.farm_size_hectares = acres_to_hectares(acres);
        self
    }

    pub fn with_farm_size_hectares(mut self, hectares: f64) -> Self {
        self.farm_size_hectares = hectares;
        self
    }

    /// Neutral pH is assumed when no soil test is available.
    pub fn soil_ph_or_default(&self) -> f64 {
        self.soil_ph.unwrap_or(7.0)
    }

    pub fn validate(&self) -> Result<()> {
        require_percentage("irrigation level", self.irrigation_level)?;
        require_percentage("fertilizer level", self.fertilizer_level)?;
        require_percentage("soil health", self.soil_health)?;
        require_percentage("pest risk", self.pest_risk)?;
        require_non_negative("farm size", self.farm_size_hectares)?;
        if let Some(ph) = self.soil_ph {
            if !ph.is_finite() || !(0.0..=14.0).contains(&ph) {
                return Err(CropSimError::InvalidInput(format!(
                    "soil pH must be within 0-14, got {}",
                    ph
                )));
            }
        }
        Ok(())
    }
}

impl Default for ManagementSettings {
    fn default() -> Self {
        Self {
            irrigation_level: 50.0,
            fertilizer_level: 50.0,
            soil_health: default_soil_health(),
            pest_risk: default_pest_risk(),
            organic_practices: false,
            soil_ph: None,
            farm_size_hectares: default_farm_size(),
        }
    }
}
