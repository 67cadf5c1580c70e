use super::{Rule, RuleContext};
use crate::logic::stress::watts_to_mj_per_day;
use crate::models::{Recommendation, RecommendationCategory, Severity};

pub struct SolarRadiationRule;

impl Rule for SolarRadiationRule {
    fn id(&self) -> &'static str {
        "solar"
    }

    fn name(&self) -> &'static str {
        "Solar Radiation Advisory"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        if ctx.effects.solar >= 25.0 {
            return None;
        }

        Some(
            Recommendation::new(
                "solar_radiation",
                RecommendationCategory::Solar,
                Severity::Medium,
                "Low Solar Radiation",
                "Consider adjusting planting dates to match peak solar radiation periods.",
            )
            .with_data_point(
                "Solar Radiation",
                format!(
                    "{:.0} W/m² ({:.1} MJ/m²/day)",
                    ctx.env.solar_radiation_w_m2,
                    watts_to_mj_per_day(ctx.env.solar_radiation_w_m2)
                ),
            )
            .with_data_point("Solar Effect", format!("{:.0}%", ctx.effects.solar)),
        )
    }
}
