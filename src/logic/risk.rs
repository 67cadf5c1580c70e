//! Planting risk evaluators. Scores run 0-100 where higher is worse.

use super::stress::{irrigation_mm, temperature_effect};
use crate::models::{
    CropProfile, EnvironmentReading, ManagementSettings, RiskAssessment, RiskLevel,
};
use xxhash_rust::xxh32::xxh32;

const DISEASE_SEED: u32 = 0x6469_7365;
const PEST_SEED: u32 = 0x7065_7374;

/// Upper bound (exclusive) of the variability added to disease and pest risk.
const JITTER_SPAN: f64 = 20.0;

/// Stable pseudo-random offset in `[0, JITTER_SPAN)` derived from the inputs.
///
/// The same inputs and seed always give the same offset.
pub fn jitter(inputs: &[f64], seed: u32) -> f64 {
    let mut bytes = Vec::with_capacity(inputs.len() * 8);
    for &value in inputs {
        // -0.0 and 0.0 are the same reading
        let value = if value == 0.0 { 0.0 } else { value };
        bytes.extend_from_slice(&value.to_bits().to_le_bytes());
    }
    let hash = xxh32(&bytes, seed);
    (hash % 20_000) as f64 / 20_000.0 * JITTER_SPAN
}

pub fn frost_risk(temperature_c: f64) -> f64 {
    (100.0 - temperature_c * 5.0).clamp(0.0, 100.0)
}

pub fn drought_risk(rainfall_mm_day: f64) -> f64 {
    (100.0 - rainfall_mm_day / 2.0).clamp(0.0, 100.0)
}

pub fn disease_risk(env: &EnvironmentReading) -> f64 {
    let humidity = env.humidity_or_default();
    let base = if humidity > 80.0 {
        70.0
    } else if humidity > 60.0 {
        40.0
    } else {
        20.0
    };
    (base + jitter(&[humidity, env.temperature_c], DISEASE_SEED)).min(100.0)
}

pub fn pest_risk(env: &EnvironmentReading) -> f64 {
    let temperature = env.temperature_c;
    let base = if temperature > 25.0 {
        60.0
    } else if temperature > 20.0 {
        40.0
    } else {
        20.0
    };
    (base + jitter(&[temperature, env.humidity_or_default()], PEST_SEED)).min(100.0)
}

pub fn soil_risk(soil_ph: f64) -> f64 {
    ((soil_ph - 7.0).abs() * 20.0).clamp(0.0, 100.0)
}

/// Crop-specific pest pressure from heat stress, excess moisture and the
/// crop's inherent pest sensitivity.
pub fn crop_pest_pressure(
    env: &EnvironmentReading,
    management: &ManagementSettings,
    crop: &CropProfile,
) -> f64 {
    let heat_stress = 1.0 - temperature_effect(env.temperature_c, crop);
    let moisture = if crop.water_need_mm > 0.0 {
        (env.rainfall_mm_day + irrigation_mm(management.irrigation_level, crop))
            / crop.water_need_mm
    } else {
        0.0
    };
    let excess = if moisture > 1.2 {
        (moisture - 1.0) * 0.4
    } else {
        0.0
    };
    ((heat_stress * 0.3 + excess + crop.pest_sensitivity * 0.3) * 100.0)
        .round()
        .clamp(0.0, 100.0)
}

pub fn assess_planting_risk(
    env: &EnvironmentReading,
    management: &ManagementSettings,
) -> RiskAssessment {
    let frost = frost_risk(env.temperature_c);
    let drought = drought_risk(env.rainfall_mm_day);
    let disease = disease_risk(env);
    let pest = pest_risk(env);
    let soil = soil_risk(management.soil_ph_or_default());

    let overall = ((frost + drought + disease + pest + soil) / 5.0).round();
    let level = RiskLevel::from_score(overall);

    tracing::debug!(frost, drought, disease, pest, soil, overall, "assessed planting risk");

    RiskAssessment {
        frost,
        drought,
        disease,
        pest,
        soil,
        overall,
        level,
        recommendation: level.recommendation().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CropType;

    #[test]
    fn frost_and_drought_are_clamped() {
        assert_eq!(frost_risk(-10.0), 100.0);
        assert_eq!(frost_risk(10.0), 50.0);
        assert_eq!(frost_risk(30.0), 0.0);
        assert_eq!(drought_risk(0.0), 100.0);
        assert_eq!(drought_risk(50.0), 75.0);
        assert_eq!(drought_risk(400.0), 0.0);
    }

    #[test]
    fn soil_risk_grows_with_ph_distance() {
        assert_eq!(soil_risk(7.0), 0.0);
        assert!((soil_risk(5.5) - 30.0).abs() < 1e-9);
        assert_eq!(soil_risk(1.0), 100.0);
    }

    #[test]
    fn jitter_is_deterministic_and_bounded() {
        let a = jitter(&[72.5, 18.0], DISEASE_SEED);
        let b = jitter(&[72.5, 18.0], DISEASE_SEED);
        assert_eq!(a, b);
        for t in -20..50 {
            let j = jitter(&[t as f64, 60.0], PEST_SEED);
            assert!((0.0..JITTER_SPAN).contains(&j));
        }
    }

    #[test]
    fn signed_zero_temperature_gives_same_risk() {
        let positive = EnvironmentReading::new(0.0, 5.0, 200.0);
        let negative = EnvironmentReading::new(-0.0, 5.0, 200.0);
        assert_eq!(pest_risk(&positive), pest_risk(&negative));
        assert_eq!(disease_risk(&positive), disease_risk(&negative));
    }

    #[test]
    fn jitter_differs_between_seeds() {
        let inputs = [22.0, 55.0];
        assert_ne!(jitter(&inputs, DISEASE_SEED), jitter(&inputs, PEST_SEED));
    }

    #[test]
    fn disease_risk_bands_follow_humidity() {
        let dry = EnvironmentReading::new(20.0, 5.0, 200.0).with_humidity(40.0);
        let humid = EnvironmentReading::new(20.0, 5.0, 200.0).with_humidity(90.0);
        let dry_risk = disease_risk(&dry);
        let humid_risk = disease_risk(&humid);
        assert!((20.0..40.0).contains(&dry_risk));
        assert!((70.0..90.0).contains(&humid_risk));
    }

    #[test]
    fn pest_risk_bands_follow_temperature() {
        let hot = EnvironmentReading::new(30.0, 5.0, 200.0);
        let risk = pest_risk(&hot);
        assert!((60.0..80.0).contains(&risk));
        assert_eq!(risk, pest_risk(&hot));
    }

    #[test]
    fn assessment_overall_is_rounded_mean() {
        let env = EnvironmentReading::fallback();
        let mgmt = ManagementSettings::default().with_soil_ph(6.5);
        let risk = assess_planting_risk(&env, &mgmt);
        let mean = (risk.frost + risk.drought + risk.disease + risk.pest + risk.soil) / 5.0;
        assert_eq!(risk.overall, mean.round());
        assert_eq!(risk.level, RiskLevel::from_score(risk.overall));
        assert_eq!(risk, assess_planting_risk(&env, &mgmt));
    }

    #[test]
    fn crop_pest_pressure_rises_with_heat_and_water() {
        let wheat = CropType::Wheat.profile();
        let mild = EnvironmentReading::new(20.0, 10.0, 200.0);
        let mgmt = ManagementSettings::new(20.0, 50.0);
        // only the inherent sensitivity contributes: 0.7 * 0.3
        assert_eq!(crop_pest_pressure(&mild, &mgmt, wheat), 21.0);

        let hot_wet = EnvironmentReading::new(40.0, 80.0, 200.0);
        let wet_mgmt = ManagementSettings::new(100.0, 50.0);
        assert!(crop_pest_pressure(&hot_wet, &wet_mgmt, wheat) > 60.0);
        assert!(crop_pest_pressure(&hot_wet, &wet_mgmt, wheat) <= 100.0);
    }
}
