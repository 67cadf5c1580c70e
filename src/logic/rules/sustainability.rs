use super::{Rule, RuleContext};
use crate::models::{Recommendation, RecommendationCategory, Severity};

pub struct CarbonFootprintRule;

impl Rule for CarbonFootprintRule {
    fn id(&self) -> &'static str {
        "carbon_footprint"
    }

    fn name(&self) -> &'static str {
        "Carbon Footprint"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let carbon = ctx.sustainability.carbon_footprint;
        if carbon <= 70.0 {
            return None;
        }

        Some(
            Recommendation::new(
                "carbon_footprint",
                RecommendationCategory::Sustainability,
                Severity::Medium,
                "High Carbon Footprint",
                "Consider reducing chemical inputs and implementing more sustainable practices.",
            )
            .with_data_point("Carbon Footprint", format!("{:.0}", carbon)),
        )
    }
}

pub struct BiodiversityRule;

impl Rule for BiodiversityRule {
    fn id(&self) -> &'static str {
        "biodiversity"
    }

    fn name(&self) -> &'static str {
        "Biodiversity"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let biodiversity = ctx.sustainability.biodiversity;
        if biodiversity >= 50.0 {
            return None;
        }

        let mut rec = Recommendation::new(
            "biodiversity",
            RecommendationCategory::Sustainability,
            Severity::Low,
            "Improve Biodiversity",
            "Implement crop rotation and increase organic matter to improve biodiversity.",
        )
        .with_data_point("Biodiversity", format!("{:.0}", biodiversity));

        if !ctx.management.organic_practices {
            rec = rec.with_data_point("Organic Practices", "no");
        }

        Some(rec)
    }
}
