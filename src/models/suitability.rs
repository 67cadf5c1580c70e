use super::crop::CropType;
use serde::Serialize;

/// How well one crop fits the current conditions and soil.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropSuitability {
    pub crop: CropType,
    /// Weighted 0-100: temperature 40%, water 30%, soil 30%.
    pub score: u8,
    pub temperature_score: f64,
    pub water_score: f64,
    pub soil_score: f64,
    pub reasons: Vec<String>,
    pub water: WaterRequirement,
}

/// Monthly water balance for the field, in liters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterRequirement {
    pub total_needed_liters: f64,
    pub from_rainfall_liters: f64,
    pub additional_needed_liters: f64,
    pub irrigation_schedule: &'static str,
    pub recommendation: String,
}
