use super::crop::{CropType, StageName};
use super::environment::{EnvironmentReading, ReadingSource};
use super::management::ManagementSettings;
use super::recommendation::Recommendation;
use super::soil::SoilType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-factor growth effects, each 0-100 where 100 is optimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectBreakdown {
    pub temperature: f64,
    pub water: f64,
    pub fertilizer: f64,
    pub solar: f64,
}

impl EffectBreakdown {
    /// Builds a breakdown from 0-1 evaluator outputs.
    pub fn from_fractions(temperature: f64, water: f64, fertilizer: f64, solar: f64) -> Self {
        Self {
            temperature: temperature * 100.0,
            water: water * 100.0,
            fertilizer: fertilizer * 100.0,
            solar: solar * 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyResult {
    pub day: u32,
    pub stage: StageName,
    pub stage_progress: f64,
    /// Accumulated growth over the run horizon, 0-100.
    pub growth_percentage: f64,
    pub growth_factor: f64,
    pub yield_percentage: f64,
    pub health_score: f64,
    pub ndvi: f64,
    pub effects: EffectBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AchievementTier {
    Novice,
    Developing,
    Skilled,
    Expert,
    Master,
}

impl AchievementTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => AchievementTier::Master,
            80..=89 => AchievementTier::Expert,
            70..=79 => AchievementTier::Skilled,
            60..=69 => AchievementTier::Developing,
            _ => AchievementTier::Novice,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementTier::Master => "Master Farmer",
            AchievementTier::Expert => "Expert Farmer",
            AchievementTier::Skilled => "Skilled Farmer",
            AchievementTier::Developing => "Developing Farmer",
            AchievementTier::Novice => "Novice Farmer",
        }
    }
}

impl std::fmt::Display for AchievementTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerScore {
    pub score: u8,
    pub tier: AchievementTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthStatus {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            HealthStatus::Excellent
        } else if score >= 60.0 {
            HealthStatus::Good
        } else if score >= 40.0 {
            HealthStatus::Fair
        } else {
            HealthStatus::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Good => "Good",
            HealthStatus::Fair => "Fair",
            HealthStatus::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Favorable,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score > 60.0 {
            RiskLevel::High
        } else if score > 30.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Favorable
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskLevel::High => {
                "High risk conditions. Consider delaying planting or implementing protective measures."
            }
            RiskLevel::Moderate => {
                "Moderate risk. Monitor conditions and prepare mitigation strategies."
            }
            RiskLevel::Favorable => "Favorable conditions for planting.",
        }
    }
}

/// Planting risks, each 0-100 where higher is worse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub frost: f64,
    pub drought: f64,
    pub disease: f64,
    pub pest: f64,
    pub soil: f64,
    pub overall: f64,
    pub level: RiskLevel,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityBreakdown {
    pub carbon_footprint: f64,
    pub biodiversity: f64,
    pub soil_impact: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub crop: CropType,
    pub soil: SoilType,
    pub days: u32,
    pub final_stage: StageName,
    pub final_stage_progress: f64,
    /// Progress through the crop's full growth cycle, 0-100.
    pub season_progress: f64,
    pub yield_percentage: f64,
    pub yield_tons_per_hectare: f64,
    pub total_production_tons: f64,
    pub final_ndvi: f64,
    pub health_score: f64,
    pub health_status: HealthStatus,
    pub growth_status: String,
    pub water_efficiency: f64,
    pub fertilizer_efficiency: f64,
    pub sustainability: SustainabilityBreakdown,
    pub farmer_score: FarmerScore,
    pub start_date: NaiveDate,
    pub harvest_date: NaiveDate,
    pub weather_source: ReadingSource,
    pub risks: RiskAssessment,
    pub recommendations: Vec<Recommendation>,
}

/// Everything needed for one simulation run. Crop and soil are identifiers
/// resolved against the reference tables when the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub crop: String,
    pub soil: String,
    pub days: u32,
    pub start_date: NaiveDate,
    /// `None` runs against [`EnvironmentReading::fallback`].
    #[serde(default)]
    pub environment: Option<EnvironmentReading>,
    pub management: ManagementSettings,
}

impl SimulationRequest {
    pub fn new(
        crop: impl Into<String>,
        soil: impl Into<String>,
        days: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            crop: crop.into(),
            soil: soil.into(),
            days,
            start_date,
            environment: None,
            management: ManagementSettings::default(),
        }
    }

    pub fn with_environment(mut self, environment: EnvironmentReading) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_management(mut self, management: ManagementSettings) -> Self {
        self.management = management;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub daily_series: Vec<DailyResult>,
    pub summary: SimulationSummary,
}
