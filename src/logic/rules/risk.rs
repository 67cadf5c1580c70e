//! Rules driven by the planting risk assessment.

use super::{Rule, RuleContext};
use crate::models::{Recommendation, RecommendationCategory, Severity};

const RISK_THRESHOLD: f64 = 60.0;
const SOIL_PH_THRESHOLD: f64 = 40.0;

/// Uses the crop-specific pest pressure, which accounts for the crop's
/// own pest sensitivity.
pub struct PestRiskRule;

impl Rule for PestRiskRule {
    fn id(&self) -> &'static str {
        "pest_risk"
    }

    fn name(&self) -> &'static str {
        "Pest Pressure"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        if ctx.pest_pressure <= RISK_THRESHOLD {
            return None;
        }

        Some(
            Recommendation::new(
                "pest_risk",
                RecommendationCategory::PestRisk,
                Severity::High,
                "High Pest Risk",
                "High pest risk detected. Consider integrated pest management strategies.",
            )
            .with_data_point("Pest Pressure", format!("{:.0}", ctx.pest_pressure))
            .with_data_point("Pest Sensitivity", format!("{:.1}", ctx.crop.pest_sensitivity)),
        )
    }
}

pub struct DiseaseRiskRule;

impl Rule for DiseaseRiskRule {
    fn id(&self) -> &'static str {
        "disease_risk"
    }

    fn name(&self) -> &'static str {
        "Disease Pressure"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        if ctx.risks.disease <= RISK_THRESHOLD {
            return None;
        }

        Some(
            Recommendation::new(
                "disease_risk",
                RecommendationCategory::DiseaseRisk,
                Severity::Medium,
                "Disease Risk",
                "Humid conditions favor fungal disease. Scout regularly and improve air \
                 circulation between rows.",
            )
            .with_data_point("Disease Risk", format!("{:.0}", ctx.risks.disease))
            .with_data_point("Humidity", format!("{:.0}%", ctx.env.humidity_or_default())),
        )
    }
}

pub struct FrostRiskRule;

impl Rule for FrostRiskRule {
    fn id(&self) -> &'static str {
        "frost_risk"
    }

    fn name(&self) -> &'static str {
        "Frost Risk"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        if ctx.risks.frost <= RISK_THRESHOLD {
            return None;
        }

        Some(
            Recommendation::new(
                "frost_risk",
                RecommendationCategory::FrostRisk,
                Severity::High,
                "Frost Risk",
                "Frost damage is likely. Delay planting or use row covers until temperatures rise.",
            )
            .with_data_point("Frost Risk", format!("{:.0}", ctx.risks.frost))
            .with_data_point("Temperature", format!("{:.1}°C", ctx.env.temperature_c)),
        )
    }
}

/// Fires on strongly acidic or alkaline soil, or at low severity when a
/// measured pH sits outside the crop's preferred range.
pub struct SoilPhRule;

impl Rule for SoilPhRule {
    fn id(&self) -> &'static str {
        "soil_ph"
    }

    fn name(&self) -> &'static str {
        "Soil pH"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let ph = ctx.management.soil_ph_or_default();
        let range = ctx.crop.optimal_ph;

        let severity = if ctx.risks.soil > SOIL_PH_THRESHOLD {
            Severity::Medium
        } else if ctx.management.soil_ph.is_some() && !range.contains(ph) {
            Severity::Low
        } else {
            return None;
        };

        let amendment = if ph < range.min {
            "Apply agricultural lime to raise soil pH."
        } else {
            "Apply elemental sulfur or acidifying amendments to lower soil pH."
        };

        Some(
            Recommendation::new(
                "soil_ph",
                RecommendationCategory::SoilPh,
                severity,
                "Adjust Soil pH",
                format!(
                    "Soil pH {:.1} is outside the {:.1}-{:.1} range preferred by {}. {}",
                    ph, range.min, range.max, ctx.crop.name, amendment
                ),
            )
            .with_data_point("Soil pH", format!("{:.1}", ph))
            .with_data_point("Soil Risk", format!("{:.0}", ctx.risks.soil)),
        )
    }
}
