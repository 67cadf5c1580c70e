use crate::models::{
    AchievementTier, CropProfile, EffectBreakdown, FarmerScore, ManagementSettings, SoilProfile,
    SustainabilityBreakdown,
};

/// Yield as a percentage of the crop's expected yield.
///
/// Temperature and water weigh 25% each, soil health and fertilizer 20% each,
/// pest pressure 10%. Stage sensitivity scales the total.
pub fn compute_yield(
    effects: &EffectBreakdown,
    soil_health: f64,
    pest_risk: f64,
    sensitivity: f64,
) -> f64 {
    let base = effects.temperature * 0.25
        + effects.water * 0.25
        + soil_health * 0.2
        + effects.fertilizer * 0.2
        + (100.0 - pest_risk) * 0.1;
    (base * sensitivity).clamp(0.0, 100.0)
}

pub fn yield_tons_per_hectare(yield_percentage: f64, crop: &CropProfile) -> f64 {
    yield_percentage / 100.0 * crop.expected_yield_t_ha
}

pub fn carbon_footprint(crop: &CropProfile, management: &ManagementSettings) -> f64 {
    let fertilizer = management.fertilizer_level / 100.0 * 0.3;
    let irrigation = management.irrigation_level / 100.0 * 0.2;
    ((crop.base_carbon_footprint + fertilizer + irrigation) * 100.0).clamp(0.0, 100.0)
}

pub fn biodiversity_score(management: &ManagementSettings) -> f64 {
    let organic = if management.organic_practices { 1.2 } else { 1.0 };
    let chemical_free = (100.0 - management.fertilizer_level) / 100.0;
    (organic * management.soil_health / 100.0 * chemical_free * 100.0)
        .round()
        .clamp(0.0, 100.0)
}

/// Penalizes irrigation beyond what the soil drains and fertilizer beyond what it holds.
pub fn soil_impact_score(management: &ManagementSettings, soil: &SoilProfile) -> f64 {
    let overwatering = (management.irrigation_level / 100.0 - soil.drainage_rate).max(0.0);
    let overfertilizing =
        (management.fertilizer_level / 100.0 - soil.fertilizer_retention).max(0.0);
    (100.0 - (overwatering + overfertilizing) * 50.0).clamp(0.0, 100.0)
}

pub fn sustainability(
    crop: &CropProfile,
    soil: &SoilProfile,
    management: &ManagementSettings,
) -> SustainabilityBreakdown {
    let carbon_footprint = carbon_footprint(crop, management);
    let biodiversity = biodiversity_score(management);
    let soil_impact = soil_impact_score(management, soil);
    let score = (biodiversity * 0.3 + (100.0 - carbon_footprint) * 0.3 + soil_impact * 0.4).round();

    SustainabilityBreakdown {
        carbon_footprint,
        biodiversity,
        soil_impact,
        score,
    }
}

pub fn compute_farmer_score(
    yield_percentage: f64,
    water_efficiency: f64,
    fertilizer_efficiency: f64,
    sustainability_score: f64,
) -> FarmerScore {
    let resource_efficiency = (water_efficiency + fertilizer_efficiency) / 2.0;
    let raw = yield_percentage * 0.25 + sustainability_score * 0.25 + resource_efficiency * 0.5;
    let score = raw.round().clamp(0.0, 100.0) as u8;

    FarmerScore {
        score,
        tier: AchievementTier::from_score(score),
    }
}

pub fn health_score(yield_percentage: f64, soil_health: f64) -> f64 {
    ((yield_percentage + soil_health * 0.8) / 2.0).min(100.0)
}

pub fn growth_status(yield_percentage: f64) -> &'static str {
    if yield_percentage >= 80.0 {
        "Excellent growth conditions. Crop is thriving."
    } else if yield_percentage >= 60.0 {
        "Good growth conditions. Minor improvements possible."
    } else if yield_percentage >= 40.0 {
        "Fair growth conditions. Consider adjusting management practices."
    } else {
        "Poor growth conditions. Immediate attention required."
    }
}
