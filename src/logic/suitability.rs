//! Ranks every supported crop against the current conditions and soil.

use super::stress::temperature_effect;
use crate::error::{CropSimError, Result};
use crate::models::{
    CropProfile, CropSuitability, CropType, EnvironmentReading, SoilType, WaterRequirement,
};

/// One millimetre of water over one hectare.
const LITERS_PER_MM_HECTARE: f64 = 10_000.0;
const DAYS_PER_MONTH: f64 = 30.0;

const EXCELLENT: f64 = 85.0;
const GOOD: f64 = 70.0;

pub fn temperature_match(temperature_c: f64, crop: &CropProfile) -> f64 {
    temperature_effect(temperature_c, crop) * 100.0
}

/// 100 for the crop's best soil, 80 for another listed soil, 50 otherwise.
pub fn soil_match(crop: &CropProfile, soil: SoilType) -> f64 {
    match crop.preferred_soils.iter().position(|s| *s == soil) {
        Some(0) => 100.0,
        Some(_) => 80.0,
        None => 50.0,
    }
}

/// Scores monthly rainfall against the crop's band and works out how much
/// irrigation the field needs on top of it.
pub fn water_requirement(
    rainfall_mm_day: f64,
    crop: &CropProfile,
    area_hectares: f64,
) -> (f64, WaterRequirement) {
    let band = crop.rainfall_mm_month;
    let monthly = rainfall_mm_day * DAYS_PER_MONTH;

    let score = if monthly < band.min {
        (100.0 - (band.min - monthly) / band.min * 100.0).max(0.0)
    } else if monthly > band.max {
        (100.0 - (monthly - band.max) / band.max * 100.0).max(0.0)
    } else {
        100.0
    };

    let liters = |mm: f64| mm * LITERS_PER_MM_HECTARE * area_hectares;
    let from_rainfall = liters(monthly);
    let additional = (liters(band.min) - from_rainfall).max(0.0);

    let recommendation = if additional > 0.0 {
        format!(
            "Need {:.0} liters through irrigation. {}.",
            additional, crop.irrigation_schedule
        )
    } else {
        "Sufficient rainfall. Monitor soil moisture.".to_string()
    };

    let requirement = WaterRequirement {
        total_needed_liters: liters((band.min + band.max) / 2.0),
        from_rainfall_liters: from_rainfall,
        additional_needed_liters: additional,
        irrigation_schedule: crop.irrigation_schedule,
        recommendation,
    };
    (score, requirement)
}

fn assess(
    crop: &CropProfile,
    env: &EnvironmentReading,
    soil: SoilType,
    area_hectares: f64,
) -> CropSuitability {
    let temperature = env.temperature_c;
    let rainfall = env.rainfall_mm_day;
    let temperature_score = temperature_match(temperature, crop);
    let (water_score, water) = water_requirement(rainfall, crop, area_hectares);
    let soil_score = soil_match(crop, soil);

    let score = (temperature_score * 0.4 + water_score * 0.3 + soil_score * 0.3)
        .round()
        .clamp(0.0, 100.0) as u8;

    let range = crop.optimal_temp_c;
    let band = crop.daily_rainfall_band();
    let name = crop.name.to_lowercase();

    let mut reasons = Vec::with_capacity(3);
    reasons.push(if temperature_score > EXCELLENT {
        format!("Excellent temperature match ({:.1}°C is ideal for {})", temperature, name)
    } else if temperature_score > GOOD {
        format!("Good temperature match ({:.1}°C is suitable for {})", temperature, name)
    } else {
        format!(
            "Temperature is less optimal ({:.1}°C, preferred: {:.0}-{:.0}°C)",
            temperature, range.min, range.max
        )
    });
    reasons.push(if water_score > EXCELLENT {
        format!(
            "Excellent water availability (rainfall: {:.1} mm/day, matches crop needs)",
            rainfall
        )
    } else if water_score > GOOD {
        format!("Adequate water availability (rainfall: {:.1} mm/day)", rainfall)
    } else {
        format!(
            "Water may be insufficient (rainfall: {:.1} mm/day, needs: {:.1}-{:.1} mm/day)",
            rainfall, band.min, band.max
        )
    });
    reasons.push(if soil_score > EXCELLENT {
        format!("Soil type ({}) is excellent for {}", soil, name)
    } else if soil_score > GOOD {
        format!("Soil type ({}) is suitable for {}", soil, name)
    } else {
        format!("Soil type ({}) is less optimal for {}", soil, name)
    });

    CropSuitability {
        crop: crop.crop,
        score,
        temperature_score,
        water_score,
        soil_score,
        reasons,
        water,
    }
}

/// Every crop scored against `env` on `soil`, best first. Crops with equal
/// scores keep their table order.
pub fn rank_crops(
    env: &EnvironmentReading,
    soil: SoilType,
    area_hectares: f64,
) -> Result<Vec<CropSuitability>> {
    env.validate()?;
    if !area_hectares.is_finite() || area_hectares < 0.0 {
        return Err(CropSimError::InvalidInput(format!(
            "farm size must be a non-negative number, got {}",
            area_hectares
        )));
    }

    let mut ranking: Vec<CropSuitability> = CropType::ALL
        .iter()
        .map(|crop| assess(crop.profile(), env, soil, area_hectares))
        .collect();
    ranking.sort_by(|a, b| b.score.cmp(&a.score));

    if let Some(best) = ranking.first() {
        tracing::debug!(soil = %soil, best = %best.crop, score = best.score, "ranked crops");
    }

    Ok(ranking)
}
