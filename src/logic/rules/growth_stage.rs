use super::{Rule, RuleContext};
use crate::models::{Recommendation, RecommendationCategory, Severity, StageName};

/// Growth-stage advisory
///
/// Each stage has one condition it is most vulnerable to:
/// - germination: cold soil
/// - vegetative: rainfall below the crop's band
/// - flowering: heat
/// - maturity: rainfall above the band, which spoils the harvest (medium)
pub struct StageAdvisoryRule;

impl Rule for StageAdvisoryRule {
    fn id(&self) -> &'static str {
        "growth_stage"
    }

    fn name(&self) -> &'static str {
        "Growth Stage Advisory"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let temperature = ctx.env.temperature_c;
        let rainfall = ctx.env.rainfall_mm_day;
        let range = ctx.crop.optimal_temp_c;
        let band = ctx.crop.daily_rainfall_band();

        let (kind, severity, title, message) = match ctx.stage.stage {
            StageName::Germination if temperature < range.min => (
                "germination_cold",
                Severity::Low,
                "Protect Germinating Seed",
                "Consider using mulch to maintain soil temperature.",
            ),
            StageName::Vegetative if rainfall < band.min => (
                "vegetative_dry",
                Severity::Low,
                "Keep Soil Moisture Steady",
                "Critical growth phase - maintain consistent soil moisture.",
            ),
            StageName::Flowering if temperature > range.max => (
                "flowering_heat",
                Severity::Low,
                "Shield Flowers From Heat",
                "Protect flowers from heat stress with adequate irrigation.",
            ),
            StageName::Maturity if rainfall > band.max => (
                "harvest_moisture",
                Severity::Medium,
                "Wet Harvest Conditions",
                "High moisture may affect harvest quality. Plan harvest timing carefully.",
            ),
            _ => return None,
        };

        Some(
            Recommendation::new(
                kind,
                RecommendationCategory::GrowthStage,
                severity,
                title,
                message,
            )
            .with_data_point("Stage", ctx.stage.stage)
            .with_data_point("Temperature", format!("{:.1}°C", temperature))
            .with_data_point(
                "Rainfall",
                format!(
                    "{:.1} mm/day (band {:.1}-{:.1})",
                    rainfall, band.min, band.max
                ),
            ),
        )
    }
}
