//! Stress evaluators. Each returns a 0-1 "goodness" score where 1 is optimal.
//!
//! Inputs are expected in canonical units (°C, mm/day, W/m²); conversion
//! happens when the reading is ingested, never here.

use super::stage::StageInfo;
use crate::models::{
    CropProfile, EffectBreakdown, EnvironmentReading, ManagementSettings, SoilProfile,
    WATTS_PER_MJ_DAY,
};

/// Degrees outside the optimal range at which the temperature effect reaches zero.
const TEMPERATURE_TOLERANCE_C: f64 = 10.0;

/// Solar band (MJ/m²/day) mapped linearly onto 0-1.
const SOLAR_MIN_MJ: f64 = 8.0;
const SOLAR_MAX_MJ: f64 = 30.0;

/// Linear normalization of `value` into 0-1 over `[min, max]`.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return if value >= max { 1.0 } else { 0.0 };
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

pub fn temperature_effect(temperature_c: f64, crop: &CropProfile) -> f64 {
    let distance = crop.optimal_temp_c.distance(temperature_c);
    1.0 - (distance / TEMPERATURE_TOLERANCE_C).min(1.0)
}

/// Converts the 0-100 irrigation level into mm/day against the crop's base need.
pub fn irrigation_mm(irrigation_level: f64, crop: &CropProfile) -> f64 {
    irrigation_level / 100.0 * crop.water_need_mm
}

/// Water reaching the root zone after soil retention and drainage, mm/day.
pub fn available_water(
    rainfall_mm_day: f64,
    irrigation_level: f64,
    crop: &CropProfile,
    soil: &SoilProfile,
) -> f64 {
    rainfall_mm_day * soil.water_retention + irrigation_mm(irrigation_level, crop) * soil.drainage_rate
}

/// Water demanded by the crop in its current stage, mm/day.
pub fn water_target(crop: &CropProfile, stage: &StageInfo) -> f64 {
    crop.water_need_mm * stage.water_need_multiplier
}

pub fn water_effect(
    rainfall_mm_day: f64,
    irrigation_level: f64,
    crop: &CropProfile,
    soil: &SoilProfile,
    stage: &StageInfo,
) -> f64 {
    let target = water_target(crop, stage);
    if target <= 0.0 {
        return 1.0;
    }
    let total = available_water(rainfall_mm_day, irrigation_level, crop, soil);
    (1.0 - (total - target).abs() / target).max(0.0)
}

pub fn effective_fertilizer(fertilizer_level: f64, soil: &SoilProfile) -> f64 {
    fertilizer_level * soil.fertilizer_retention
}

pub fn fertilizer_effect(fertilizer_level: f64, crop: &CropProfile, soil: &SoilProfile) -> f64 {
    let need = crop.fertilizer_need;
    if need <= 0.0 {
        return 1.0;
    }
    let effective = effective_fertilizer(fertilizer_level, soil);
    (1.0 - (effective - need).abs() / need).max(0.0)
}

pub fn watts_to_mj_per_day(solar_w_m2: f64) -> f64 {
    solar_w_m2 / WATTS_PER_MJ_DAY
}

pub fn solar_effect(solar_w_m2: f64) -> f64 {
    normalize(watts_to_mj_per_day(solar_w_m2), SOLAR_MIN_MJ, SOLAR_MAX_MJ)
}

/// All four effects for one day, reported as percentages.
pub fn evaluate_effects(
    env: &EnvironmentReading,
    management: &ManagementSettings,
    crop: &CropProfile,
    soil: &SoilProfile,
    stage: &StageInfo,
) -> EffectBreakdown {
    EffectBreakdown::from_fractions(
        temperature_effect(env.temperature_c, crop),
        water_effect(
            env.rainfall_mm_day,
            management.irrigation_level,
            crop,
            soil,
            stage,
        ),
        fertilizer_effect(management.fertilizer_level, crop, soil),
        solar_effect(env.solar_radiation_w_m2),
    )
}

/// Daily growth factor driving NDVI and accumulated growth.
///
/// Climate (temperature 40%, water 30%, solar 30%) scaled by stage sensitivity,
/// then by the mean of the management levels.
pub fn growth_factor(
    effects: &EffectBreakdown,
    stage: &StageInfo,
    management: &ManagementSettings,
) -> f64 {
    let climate = (effects.temperature * 0.4 + effects.water * 0.3 + effects.solar * 0.3) / 100.0;
    let managed = (management.irrigation_level
        + management.fertilizer_level
        + management.soil_health)
        / 300.0;
    climate * stage.sensitivity * managed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::stage::resolve_stage;
    use crate::models::{CropType, SoilType};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn temperature_inside_range_is_optimal() {
        let wheat = CropType::Wheat.profile();
        assert_eq!(temperature_effect(20.0, wheat), 1.0);
        assert_eq!(temperature_effect(15.0, wheat), 1.0);
        assert_eq!(temperature_effect(25.0, wheat), 1.0);
    }

    #[test]
    fn temperature_degrades_linearly_outside_range() {
        let wheat = CropType::Wheat.profile();
        assert!(approx(temperature_effect(28.0, wheat), 0.7));
        assert!(approx(temperature_effect(10.0, wheat), 0.5));
        assert_eq!(temperature_effect(35.0, wheat), 0.0);
        assert_eq!(temperature_effect(40.0, wheat), 0.0);
        assert_eq!(temperature_effect(-20.0, wheat), 0.0);
    }

    #[test]
    fn water_effect_for_wheat_on_loam() {
        let wheat = CropType::Wheat.profile();
        let loam = SoilType::Loam.profile();
        let stage = resolve_stage(wheat, 30);

        // 25 * 0.7 + 22.5 * 0.6 = 31 mm against a 45 mm target
        assert!(approx(available_water(25.0, 50.0, wheat, loam), 31.0));
        assert!(approx(
            water_effect(25.0, 50.0, wheat, loam, &stage),
            1.0 - 14.0 / 45.0
        ));
    }

    #[test]
    fn water_effect_floors_at_zero() {
        let wheat = CropType::Wheat.profile();
        let clay = SoilType::Clay.profile();
        let stage = resolve_stage(wheat, 100);
        assert_eq!(water_effect(500.0, 100.0, wheat, clay, &stage), 0.0);
    }

    #[test]
    fn fertilizer_effect_uses_soil_retention() {
        let wheat = CropType::Wheat.profile();
        let loam = SoilType::Loam.profile();
        // 50 * 0.7 = 35 against a need of 50
        assert!(approx(fertilizer_effect(50.0, wheat, loam), 0.7));
        assert_eq!(fertilizer_effect(0.0, wheat, loam), 0.0);
        assert!(fertilizer_effect(100.0, wheat, loam) < 1.0);
    }

    #[test]
    fn solar_effect_normalizes_band() {
        assert_eq!(solar_effect(0.0), 0.0);
        assert!(approx(solar_effect(8.0 * WATTS_PER_MJ_DAY), 0.0));
        assert!(approx(solar_effect(19.0 * WATTS_PER_MJ_DAY), 0.5));
        assert!(approx(solar_effect(30.0 * WATTS_PER_MJ_DAY), 1.0));
        assert_eq!(solar_effect(1000.0), 1.0);
    }

    #[test]
    fn normalize_handles_degenerate_band() {
        assert_eq!(normalize(5.0, 10.0, 10.0), 0.0);
        assert_eq!(normalize(15.0, 10.0, 10.0), 1.0);
    }

    #[test]
    fn growth_factor_scales_with_management() {
        let wheat = CropType::Wheat.profile();
        let stage = resolve_stage(wheat, 30);
        let effects = EffectBreakdown::from_fractions(1.0, 1.0, 1.0, 1.0);

        let full = ManagementSettings::new(100.0, 100.0).with_soil_health(100.0);
        assert!(approx(growth_factor(&effects, &stage, &full), 1.0));

        let none = ManagementSettings::new(0.0, 0.0).with_soil_health(0.0);
        assert_eq!(growth_factor(&effects, &stage, &none), 0.0);
    }

    #[test]
    fn evaluators_are_idempotent() {
        let corn = CropType::Corn.profile();
        let sandy = SoilType::Sandy.profile();
        let stage = resolve_stage(corn, 50);
        let env = EnvironmentReading::new(27.0, 12.0, 240.0);
        let mgmt = ManagementSettings::new(65.0, 40.0);
        assert_eq!(
            evaluate_effects(&env, &mgmt, corn, sandy, &stage),
            evaluate_effects(&env, &mgmt, corn, sandy, &stage)
        );
    }
}
