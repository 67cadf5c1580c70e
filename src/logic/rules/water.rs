use super::{Rule, RuleContext};
use crate::models::{Recommendation, RecommendationCategory, Severity};

const EFFECT_THRESHOLD: f64 = 70.0;

/// Irrigation adjustment rule
///
/// Only fires when the water effect is below 70%, and only when the
/// irrigation setting points the same way as the rainfall:
/// - heavy irrigation (>70%) on top of above-optimal rain: reduce
/// - light irrigation (<30%) with below-optimal rain: increase, high
///   severity when the deficit exceeds 30% of the stage's water need
pub struct WaterRule;

impl Rule for WaterRule {
    fn id(&self) -> &'static str {
        "water"
    }

    fn name(&self) -> &'static str {
        "Irrigation Adjustment"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        if ctx.effects.water >= EFFECT_THRESHOLD {
            return None;
        }

        let irrigation = ctx.management.irrigation_level;
        let rainfall = ctx.env.rainfall_mm_day;
        let optimal = ctx.crop.optimal_rainfall_mm;

        let rec = if irrigation > 70.0 && rainfall > optimal {
            let excess = ctx.available_water - ctx.water_target;
            Recommendation::new(
                "reduce_irrigation",
                RecommendationCategory::Water,
                Severity::Medium,
                "Reduce Irrigation",
                format!(
                    "Rainfall ({:.1} mm/day) already exceeds the {:.0} mm/day optimum for {}. \
                     Reduce irrigation by about {:.0} mm/day and check field drainage to prevent root rot.",
                    rainfall,
                    optimal,
                    ctx.crop.name,
                    excess.max(0.0)
                ),
            )
        } else if irrigation < 30.0 && rainfall < optimal {
            let deficit = (ctx.water_target - ctx.available_water).max(0.0);
            let severity = if deficit > ctx.water_target * 0.3 {
                Severity::High
            } else {
                Severity::Medium
            };
            let message = if severity == Severity::High {
                format!(
                    "Critical: Increase irrigation by {:.0} mm/day. Install drip irrigation for better efficiency.",
                    deficit
                )
            } else {
                format!(
                    "Advisory: Increase irrigation by {:.0} mm/day. Apply mulch to reduce evaporation.",
                    deficit
                )
            };
            Recommendation::new(
                "increase_irrigation",
                RecommendationCategory::Water,
                severity,
                "Increase Irrigation",
                message,
            )
        } else {
            return None;
        };

        Some(
            rec.with_data_point("Water Effect", format!("{:.0}%", ctx.effects.water))
                .with_data_point("Irrigation", format!("{:.0}%", irrigation))
                .with_data_point("Rainfall", format!("{:.1} mm/day", rainfall))
                .with_data_point(
                    "Available / Target",
                    format!("{:.1} / {:.1} mm/day", ctx.available_water, ctx.water_target),
                ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::testing::Fixture;
    use crate::models::{EnvironmentReading, ManagementSettings};

    #[test]
    fn wet_and_overirrigated_suggests_reduction() {
        // 60 * 0.7 + 40.5 * 0.6 = 66.3 mm against 45
        let fixture = Fixture::wheat_on_loam(
            EnvironmentReading::new(20.0, 60.0, 250.0),
            ManagementSettings::new(90.0, 50.0),
        );
        let rec = WaterRule.evaluate(&fixture.context()).unwrap();
        assert_eq!(rec.kind, "reduce_irrigation");
        assert_eq!(rec.severity, Severity::Medium);
    }

    #[test]
    fn dry_and_underirrigated_suggests_increase() {
        let fixture = Fixture::wheat_on_loam(
            EnvironmentReading::new(20.0, 2.0, 250.0),
            ManagementSettings::new(10.0, 50.0),
        );
        let rec = WaterRule.evaluate(&fixture.context()).unwrap();
        assert_eq!(rec.kind, "increase_irrigation");
        assert_eq!(rec.severity, Severity::High);
    }

    #[test]
    fn no_advice_when_water_effect_is_good() {
        // 25 * 0.7 + 45 * 0.6 = 44.5 mm against 45
        let fixture = Fixture::wheat_on_loam(
            EnvironmentReading::new(20.0, 25.0, 250.0),
            ManagementSettings::new(100.0, 50.0),
        );
        assert!(WaterRule.evaluate(&fixture.context()).is_none());
    }

    #[test]
    fn mixed_signals_stay_silent() {
        // poor water effect, but irrigation is mid-range
        let fixture = Fixture::wheat_on_loam(
            EnvironmentReading::new(20.0, 2.0, 250.0),
            ManagementSettings::new(50.0, 50.0),
        );
        assert!(fixture.context().effects.water < EFFECT_THRESHOLD);
        assert!(WaterRule.evaluate(&fixture.context()).is_none());
    }
}
