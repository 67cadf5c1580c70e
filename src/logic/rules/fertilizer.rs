use super::{Rule, RuleContext};
use crate::models::{Recommendation, RecommendationCategory, Severity};

/// Fertilizer adjustment rule
///
/// Compares the fertilizer the soil actually retains against the crop's
/// need. Fires above a 10% relative deviation, high severity above 20%.
pub struct FertilizerRule;

const ADVISORY_DEVIATION: f64 = 0.10;
const CRITICAL_DEVIATION: f64 = 0.20;

impl Rule for FertilizerRule {
    fn id(&self) -> &'static str {
        "fertilizer"
    }

    fn name(&self) -> &'static str {
        "Fertilizer Adjustment"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let need = ctx.crop.fertilizer_need;
        if need <= 0.0 {
            return None;
        }

        let effective = ctx.effective_fertilizer;
        let difference = need - effective;
        let deviation = difference.abs() / need;
        if deviation <= ADVISORY_DEVIATION {
            return None;
        }

        let severity = if deviation > CRITICAL_DEVIATION {
            Severity::High
        } else {
            Severity::Medium
        };

        let retention = ctx.soil.fertilizer_retention;
        // Level change needed so that retained fertilizer meets the need.
        let level_change = if retention > 0.0 {
            difference / retention
        } else {
            difference
        };

        let rec = if difference > 0.0 {
            Recommendation::new(
                "fertilizer_increase",
                RecommendationCategory::Fertilizer,
                severity,
                "Increase Fertilizer",
                format!(
                    "Increase the fertilizer level by about {:.0} points. \
                     Split into 2-3 applications.",
                    level_change
                ),
            )
        } else {
            Recommendation::new(
                "fertilizer_decrease",
                RecommendationCategory::Fertilizer,
                severity,
                "Reduce Fertilizer",
                format!(
                    "Reduce the fertilizer level by about {:.0} points to prevent nutrient runoff.",
                    -level_change
                ),
            )
        };

        Some(
            rec.with_data_point("Fertilizer Level", format!("{:.0}", ctx.management.fertilizer_level))
                .with_data_point("Retained", format!("{:.1}", effective))
                .with_data_point("Crop Need", format!("{:.0}", need))
                .with_data_point("Deviation", format!("{:.0}%", deviation * 100.0)),
        )
    }
}
