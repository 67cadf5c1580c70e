use super::{
    drainage::DrainageRule,
    fertilizer::FertilizerRule,
    growth_stage::StageAdvisoryRule,
    risk::{DiseaseRiskRule, FrostRiskRule, PestRiskRule, SoilPhRule},
    solar::SolarRadiationRule,
    sustainability::{BiodiversityRule, CarbonFootprintRule},
    temperature::TemperatureRule,
    water::WaterRule,
    Rule, RuleContext,
};
use crate::models::Recommendation;

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(WaterRule),
            Box::new(TemperatureRule),
            Box::new(FertilizerRule),
            Box::new(DrainageRule),
            Box::new(SolarRadiationRule),
            Box::new(CarbonFootprintRule),
            Box::new(BiodiversityRule),
            Box::new(PestRiskRule),
            Box::new(DiseaseRiskRule),
            Box::new(FrostRiskRule),
            Box::new(SoilPhRule),
            Box::new(StageAdvisoryRule),
        ];

        Self { rules }
    }

    /// Runs every rule, most severe first. Rules of equal severity keep
    /// their registration order.
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(ctx))
            .collect();
        recommendations.sort_by(|a, b| b.severity.cmp(&a.severity));
        recommendations
    }

    pub fn evaluate_rule(&self, rule_id: &str, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .and_then(|rule| rule.evaluate(ctx))
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper over the default rule set.
pub fn generate_recommendations(ctx: &RuleContext<'_>) -> Vec<Recommendation> {
    RulesEngine::new().evaluate(ctx)
}
