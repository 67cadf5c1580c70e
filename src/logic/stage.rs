use crate::models::{CropProfile, StageName};
use serde::Serialize;

/// Where a crop stands within its current growth stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageInfo {
    pub stage: StageName,
    /// Linear progress through the stage, 0-100.
    pub progress: f64,
    pub days_in_stage: u32,
    pub total_days_in_stage: u32,
    pub days_until_next_stage: u32,
    pub sensitivity: f64,
    pub water_need_multiplier: f64,
    pub description: &'static str,
    pub health_indicators: &'static [&'static str],
}

/// Resolve the growth stage containing `days_elapsed`.
///
/// Days beyond the last stage saturate at the final stage with 100% progress,
/// so stage order never regresses as days increase.
pub fn resolve_stage(crop: &CropProfile, days_elapsed: u32) -> StageInfo {
    if let Some(stage) = crop.stages.iter().find(|s| s.contains(days_elapsed)) {
        let total = stage.length_days();
        let days_in_stage = days_elapsed - stage.start_day;
        let progress = if total == 0 {
            100.0
        } else {
            (days_in_stage as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
        };

        return StageInfo {
            stage: stage.name,
            progress,
            days_in_stage,
            total_days_in_stage: total,
            days_until_next_stage: stage.end_day - days_elapsed,
            sensitivity: stage.sensitivity,
            water_need_multiplier: stage.water_need_multiplier,
            description: stage.description,
            health_indicators: stage.health_indicators,
        };
    }

    let last = crop.final_stage();
    tracing::trace!(
        crop = crop.name,
        days_elapsed,
        "past final stage, holding at {}",
        last.name
    );
    StageInfo {
        stage: last.name,
        progress: 100.0,
        days_in_stage: last.length_days(),
        total_days_in_stage: last.length_days(),
        days_until_next_stage: 0,
        sensitivity: last.sensitivity,
        water_need_multiplier: last.water_need_multiplier,
        description: last.description,
        health_indicators: last.health_indicators,
    }
}

/// Overall progress through the crop's full growth cycle, 0-100.
pub fn season_progress(crop: &CropProfile, days_elapsed: u32) -> f64 {
    if crop.total_growth_days == 0 {
        return 100.0;
    }
    (days_elapsed as f64 / crop.total_growth_days as f64 * 100.0).min(100.0)
}
