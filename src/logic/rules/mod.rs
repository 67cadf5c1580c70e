pub mod drainage;
pub mod engine;
pub mod fertilizer;
pub mod growth_stage;
pub mod risk;
pub mod solar;
pub mod sustainability;
pub mod temperature;
pub mod water;

pub use engine::{generate_recommendations, RulesEngine};

use super::risk::{assess_planting_risk, crop_pest_pressure};
use super::scoring::sustainability;
use super::stage::StageInfo;
use super::stress::{available_water, effective_fertilizer, evaluate_effects, water_target};
use crate::models::{
    CropProfile, EffectBreakdown, EnvironmentReading, ManagementSettings, Recommendation,
    RiskAssessment, SoilProfile, SustainabilityBreakdown,
};

/// Everything a rule may look at, computed once per evaluation.
#[derive(Debug, Clone)]
pub struct RuleContext<'a> {
    pub crop: &'a CropProfile,
    pub soil: &'a SoilProfile,
    pub env: &'a EnvironmentReading,
    pub management: &'a ManagementSettings,
    pub stage: &'a StageInfo,
    pub effects: EffectBreakdown,
    /// mm/day reaching the root zone.
    pub available_water: f64,
    /// mm/day demanded in the current stage.
    pub water_target: f64,
    pub effective_fertilizer: f64,
    pub sustainability: SustainabilityBreakdown,
    pub risks: RiskAssessment,
    pub pest_pressure: f64,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        crop: &'a CropProfile,
        soil: &'a SoilProfile,
        env: &'a EnvironmentReading,
        management: &'a ManagementSettings,
        stage: &'a StageInfo,
    ) -> Self {
        Self {
            crop,
            soil,
            env,
            management,
            stage,
            effects: evaluate_effects(env, management, crop, soil, stage),
            available_water: available_water(
                env.rainfall_mm_day,
                management.irrigation_level,
                crop,
                soil,
            ),
            water_target: water_target(crop, stage),
            effective_fertilizer: effective_fertilizer(management.fertilizer_level, soil),
            sustainability: sustainability(crop, soil, management),
            risks: assess_planting_risk(env, management),
            pest_pressure: crop_pest_pressure(env, management, crop),
        }
    }
}

/// Trait for advisory rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a recommendation if conditions are met
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation>;
}
