use super::{Rule, RuleContext};
use crate::models::{Recommendation, RecommendationCategory, Severity};

/// Temperature advisory rule
///
/// Fires when the temperature effect drops below 70%. Severity is high
/// once the reading is more than 5°C outside the crop's optimal range.
pub struct TemperatureRule;

const EFFECT_THRESHOLD: f64 = 70.0;
const CRITICAL_DEVIATION_C: f64 = 5.0;

impl Rule for TemperatureRule {
    fn id(&self) -> &'static str {
        "temperature"
    }

    fn name(&self) -> &'static str {
        "Temperature Advisory"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        if ctx.effects.temperature >= EFFECT_THRESHOLD {
            return None;
        }

        let temperature = ctx.env.temperature_c;
        let range = ctx.crop.optimal_temp_c;
        let deviation = range.distance(temperature);
        if deviation <= 0.0 {
            return None;
        }

        let critical = deviation > CRITICAL_DEVIATION_C;
        let severity = if critical {
            Severity::High
        } else {
            Severity::Medium
        };

        let rec = if temperature < range.min {
            let message = if critical {
                format!(
                    "Critical: Protect crops from cold damage. Consider frost protection methods \
                     and plant when temperature is above {:.0}°C.",
                    range.min
                )
            } else {
                "Advisory: Monitor night temperatures. Consider using mulch to retain soil heat."
                    .to_string()
            };
            Recommendation::new(
                "temperature_low",
                RecommendationCategory::Temperature,
                severity,
                "Cold Stress",
                message,
            )
        } else {
            let message = if critical {
                "Critical: Use shade structures or cooling systems. Schedule irrigation for early \
                 morning and consider heat-tolerant varieties."
            } else {
                "Advisory: Increase irrigation frequency but reduce volume per session. \
                 Apply mulch to keep soil cool."
            };
            Recommendation::new(
                "temperature_high",
                RecommendationCategory::Temperature,
                severity,
                "Heat Stress",
                message,
            )
        };

        Some(
            rec.with_data_point("Temperature", format!("{:.1}°C", temperature))
                .with_data_point(
                    "Optimal Range",
                    format!("{:.0}-{:.0}°C", range.min, range.max),
                )
                .with_data_point("Deviation", format!("{:.1}°C", deviation)),
        )
    }
}
