use super::{Rule, RuleContext};
use crate::models::{Recommendation, RecommendationCategory, Severity};

/// Waterlogging risk from water supply beyond the stage need, scaled by
/// how freely the soil drains.
pub struct DrainageRule;

impl DrainageRule {
    pub fn drainage_risk(ctx: &RuleContext<'_>) -> f64 {
        if ctx.water_target <= 0.0 {
            return 0.0;
        }
        ((ctx.available_water / ctx.water_target - 1.0) * ctx.soil.drainage_rate * 100.0).max(0.0)
    }
}

impl Rule for DrainageRule {
    fn id(&self) -> &'static str {
        "drainage"
    }

    fn name(&self) -> &'static str {
        "Drainage Risk"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let risk = Self::drainage_risk(ctx);
        if risk <= 30.0 {
            return None;
        }

        let (severity, action) = if risk > 50.0 {
            (Severity::High, "installing drainage systems")
        } else {
            (Severity::Medium, "reducing irrigation")
        };

        Some(
            Recommendation::new(
                "drainage_risk",
                RecommendationCategory::Drainage,
                severity,
                "Waterlogging Risk",
                format!(
                    "{} Consider {} to prevent waterlogging.",
                    ctx.soil.description, action
                ),
            )
            .with_data_point("Drainage Risk", format!("{:.0}", risk))
            .with_data_point("Soil", ctx.soil.soil),
        )
    }
}
