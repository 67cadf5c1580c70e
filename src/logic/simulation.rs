use super::rules::{RuleContext, RulesEngine};
use super::scoring::{
    compute_farmer_score, compute_yield, growth_status, health_score, sustainability,
    yield_tons_per_hectare,
};
use super::stage::{resolve_stage, season_progress};
use super::stress::{evaluate_effects, growth_factor};
use crate::error::{CropSimError, Result};
use crate::models::{
    lookup_crop, lookup_soil, CropProfile, DailyResult, EnvironmentReading, HealthStatus,
    ManagementSettings, SimulationRequest, SimulationResult, SimulationSummary, SoilProfile,
};
use chrono::{Days, NaiveDate};
use std::sync::atomic::{AtomicBool, Ordering};

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 365;

const INITIAL_NDVI: f64 = 0.3;
const MIN_NDVI: f64 = 0.2;
const MAX_NDVI: f64 = 0.9;
const NDVI_RESPONSE: f64 = 0.02;

/// Mutable state for one run. Never shared between runs.
#[derive(Debug, Clone)]
pub struct SimulationState {
    day: u32,
    ndvi: f64,
    cumulative_growth: f64,
    series: Vec<DailyResult>,
}

impl SimulationState {
    fn new(days: u32) -> Self {
        Self {
            day: 0,
            ndvi: INITIAL_NDVI,
            cumulative_growth: 0.0,
            series: Vec::with_capacity(days as usize),
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn ndvi(&self) -> f64 {
        self.ndvi
    }

    pub fn series(&self) -> &[DailyResult] {
        &self.series
    }
}

/// Resolved crop, soil, conditions and horizon. Knows nothing about
/// calendar dates, so single-point evaluation can use it directly.
#[derive(Debug, Clone)]
struct Season {
    crop: &'static CropProfile,
    soil: &'static SoilProfile,
    environment: EnvironmentReading,
    management: ManagementSettings,
    days: u32,
}

impl Season {
    fn resolve(
        crop: &str,
        soil: &str,
        environment: EnvironmentReading,
        management: ManagementSettings,
        days: u32,
    ) -> Result<Self> {
        let crop = lookup_crop(crop)?;
        let soil = lookup_soil(soil)?;
        validate_days(days)?;
        environment.validate()?;
        management.validate()?;

        Ok(Self {
            crop,
            soil,
            environment,
            management,
            days,
        })
    }

    fn simulate<F>(&self, mut progress: F, cancel: Option<&AtomicBool>) -> Result<SimulationState>
    where
        F: FnMut(&DailyResult),
    {
        tracing::debug!(
            crop = self.crop.name,
            soil = %self.soil.soil,
            days = self.days,
            "starting simulation"
        );

        let mut state = SimulationState::new(self.days);
        for day in 1..=self.days {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                tracing::debug!(completed_days = state.day, "simulation cancelled");
                return Err(CropSimError::Cancelled {
                    completed_days: state.day,
                });
            }

            let result = self.step(&mut state, day);
            progress(&result);
            state.series.push(result);
        }

        Ok(state)
    }

    fn step(&self, state: &mut SimulationState, day: u32) -> DailyResult {
        let stage = resolve_stage(self.crop, day);
        let effects = evaluate_effects(
            &self.environment,
            &self.management,
            self.crop,
            self.soil,
            &stage,
        );
        let factor = growth_factor(&effects, &stage, &self.management);

        state.day = day;
        state.ndvi = (state.ndvi + (factor - 0.5) * NDVI_RESPONSE).clamp(MIN_NDVI, MAX_NDVI);
        state.cumulative_growth += factor;

        let growth_percentage = (state.cumulative_growth / self.days as f64 * 100.0).min(100.0);
        let yield_percentage = compute_yield(
            &effects,
            self.management.soil_health,
            self.management.pest_risk,
            stage.sensitivity,
        );

        tracing::trace!(
            day,
            stage = %stage.stage,
            growth_factor = factor,
            ndvi = state.ndvi,
            yield_percentage,
            "simulated day"
        );

        DailyResult {
            day,
            stage: stage.stage,
            stage_progress: stage.progress,
            growth_percentage,
            growth_factor: factor,
            yield_percentage,
            health_score: health_score(yield_percentage, self.management.soil_health),
            ndvi: state.ndvi,
            effects,
        }
    }

    /// Snapshot before any growth: day zero, initial NDVI, no accumulated growth.
    fn initial_snapshot(&self) -> DailyResult {
        let stage = resolve_stage(self.crop, 0);
        let effects = evaluate_effects(
            &self.environment,
            &self.management,
            self.crop,
            self.soil,
            &stage,
        );
        let yield_percentage = compute_yield(
            &effects,
            self.management.soil_health,
            self.management.pest_risk,
            stage.sensitivity,
        );

        DailyResult {
            day: 0,
            stage: stage.stage,
            stage_progress: stage.progress,
            growth_percentage: 0.0,
            growth_factor: growth_factor(&effects, &stage, &self.management),
            yield_percentage,
            health_score: health_score(yield_percentage, self.management.soil_health),
            ndvi: INITIAL_NDVI,
            effects,
        }
    }
}

fn harvest_date(start_date: NaiveDate, days: u32) -> Result<NaiveDate> {
    start_date
        .checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| {
            CropSimError::Configuration(format!(
                "Harvest date out of range for start date {}",
                start_date
            ))
        })
}

/// A validated simulation, ready to run.
#[derive(Debug, Clone)]
pub struct Simulator {
    season: Season,
    start_date: NaiveDate,
    harvest_date: NaiveDate,
}

impl Simulator {
    /// Resolves and validates the request. Nothing is simulated if this fails.
    pub fn new(request: &SimulationRequest) -> Result<Self> {
        let environment = match request.environment {
            Some(reading) => reading,
            None => {
                tracing::debug!("no weather reading supplied, using fallback conditions");
                EnvironmentReading::fallback()
            }
        };

        let season = Season::resolve(
            &request.crop,
            &request.soil,
            environment,
            request.management.clone(),
            request.days,
        )?;

        Ok(Self {
            start_date: request.start_date,
            harvest_date: harvest_date(request.start_date, request.days)?,
            season,
        })
    }

    pub fn crop(&self) -> &'static CropProfile {
        self.season.crop
    }

    pub fn soil(&self) -> &'static SoilProfile {
        self.season.soil
    }

    pub fn days(&self) -> u32 {
        self.season.days
    }

    pub fn run(&self) -> Result<SimulationResult> {
        self.run_with_progress(|_| {})
    }

    /// Runs the full horizon, calling `progress` after each simulated day.
    pub fn run_with_progress<F>(&self, progress: F) -> Result<SimulationResult>
    where
        F: FnMut(&DailyResult),
    {
        let state = self.season.simulate(progress, None)?;
        self.finish(state)
    }

    /// Like [`run_with_progress`](Self::run_with_progress), but checks
    /// `cancel` before each day and stops with [`CropSimError::Cancelled`]
    /// once it is set.
    pub fn run_until<F>(&self, progress: F, cancel: &AtomicBool) -> Result<SimulationResult>
    where
        F: FnMut(&DailyResult),
    {
        let state = self.season.simulate(progress, Some(cancel))?;
        self.finish(state)
    }

    fn finish(&self, state: SimulationState) -> Result<SimulationResult> {
        let season = &self.season;
        let last = state.series.last().ok_or_else(|| {
            CropSimError::InvalidInput("simulation produced no days".to_string())
        })?;

        let final_stage = resolve_stage(season.crop, season.days);
        let ctx = RuleContext::new(
            season.crop,
            season.soil,
            &season.environment,
            &season.management,
            &final_stage,
        );

        let yield_percentage = last.yield_percentage;
        let yield_t_ha = yield_tons_per_hectare(yield_percentage, season.crop);
        let water_efficiency = last.effects.water;
        let fertilizer_efficiency = last.effects.fertilizer;
        let sustainability = sustainability(season.crop, season.soil, &season.management);
        let farmer_score = compute_farmer_score(
            yield_percentage,
            water_efficiency,
            fertilizer_efficiency,
            sustainability.score,
        );
        let recommendations = RulesEngine::new().evaluate(&ctx);

        let summary = SimulationSummary {
            crop: season.crop.crop,
            soil: season.soil.soil,
            days: season.days,
            final_stage: final_stage.stage,
            final_stage_progress: final_stage.progress,
            season_progress: season_progress(season.crop, season.days),
            yield_percentage,
            yield_tons_per_hectare: yield_t_ha,
            total_production_tons: yield_t_ha * season.management.farm_size_hectares,
            final_ndvi: last.ndvi,
            health_score: last.health_score,
            health_status: HealthStatus::from_score(last.health_score),
            growth_status: growth_status(yield_percentage).to_string(),
            water_efficiency,
            fertilizer_efficiency,
            sustainability,
            farmer_score,
            start_date: self.start_date,
            harvest_date: self.harvest_date,
            weather_source: season.environment.source,
            risks: ctx.risks.clone(),
            recommendations,
        };

        tracing::debug!(
            crop = season.crop.name,
            yield_percentage,
            farmer_score = summary.farmer_score.score,
            recommendations = summary.recommendations.len(),
            "simulation complete"
        );

        Ok(SimulationResult {
            daily_series: state.series,
            summary,
        })
    }
}

fn validate_days(days: u32) -> Result<()> {
    if !(MIN_DAYS..=MAX_DAYS).contains(&days) {
        return Err(CropSimError::Configuration(format!(
            "Simulation length must be between {} and {} days, got {}",
            MIN_DAYS, MAX_DAYS, days
        )));
    }
    Ok(())
}

pub fn run_simulation(request: &SimulationRequest) -> Result<SimulationResult> {
    Simulator::new(request)?.run()
}

/// Single snapshot after `days_elapsed` days, identical to the last day of a
/// full run over the same horizon. Day zero gives the pre-growth snapshot.
pub fn evaluate_single_point(
    crop: &str,
    soil: &str,
    environment: &EnvironmentReading,
    management: &ManagementSettings,
    days_elapsed: u32,
) -> Result<DailyResult> {
    let season = Season::resolve(
        crop,
        soil,
        *environment,
        management.clone(),
        days_elapsed.max(MIN_DAYS),
    )?;

    if days_elapsed == 0 {
        return Ok(season.initial_snapshot());
    }

    let mut state = season.simulate(|_| {}, None)?;
    state.series.pop().ok_or_else(|| {
        CropSimError::InvalidInput("simulation produced no days".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReadingSource, Severity, StageName};
    use std::sync::atomic::AtomicBool;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn scenario_a() -> SimulationRequest {
        SimulationRequest::new("wheat", "loam", 30, start())
            .with_environment(EnvironmentReading::new(20.0, 25.0, 250.0))
            .with_management(ManagementSettings::new(50.0, 50.0))
    }

    #[test]
    fn optimal_temperature_run() {
        let result = run_simulation(&scenario_a()).unwrap();
        assert_eq!(result.daily_series.len(), 30);

        let last = result.daily_series.last().unwrap();
        assert_eq!(last.day, 30);
        assert_eq!(last.stage, StageName::Vegetative);
        assert_eq!(last.effects.temperature, 100.0);
        assert!(result.summary.yield_percentage > 0.0);
        assert!(result.summary.yield_percentage <= 100.0);
        assert_eq!(result.summary.final_stage, StageName::Vegetative);
    }

    #[test]
    fn full_season_reaches_maturity_and_harvest() {
        let request = SimulationRequest::new("Wheat", "LOAM", 120, start())
            .with_environment(EnvironmentReading::new(20.0, 25.0, 250.0));
        let result = run_simulation(&request).unwrap();
        let summary = &result.summary;

        assert_eq!(summary.final_stage, StageName::Maturity);
        assert_eq!(summary.final_stage_progress, 100.0);
        assert_eq!(summary.season_progress, 100.0);
        assert_eq!(
            summary.harvest_date,
            NaiveDate::from_ymd_opt(2024, 6, 29).unwrap()
        );
    }

    #[test]
    fn extreme_heat_yields_high_temperature_advice() {
        let request = SimulationRequest::new("wheat", "loam", 30, start())
            .with_environment(EnvironmentReading::new(40.0, 25.0, 250.0));
        let result = run_simulation(&request).unwrap();

        assert!(result.daily_series.iter().all(|d| d.effects.temperature == 0.0));
        let rec = result
            .summary
            .recommendations
            .iter()
            .find(|r| r.kind == "temperature_high")
            .unwrap();
        assert_eq!(rec.severity, Severity::High);
    }

    #[test]
    fn unknown_crop_fails_before_simulating() {
        let request = SimulationRequest::new("barley", "loam", 30, start());
        let err = run_simulation(&request).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("barley"));

        let request = SimulationRequest::new("wheat", "peat", 30, start());
        assert!(run_simulation(&request).unwrap_err().is_configuration());
    }

    #[test]
    fn days_must_be_in_range() {
        for days in [0, 366] {
            let request = SimulationRequest::new("corn", "clay", days, start());
            assert!(run_simulation(&request).unwrap_err().is_configuration());
        }
        let request = SimulationRequest::new("corn", "clay", 365, start());
        assert_eq!(run_simulation(&request).unwrap().daily_series.len(), 365);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let request = scenario_a().with_environment(EnvironmentReading::new(f64::NAN, 5.0, 200.0));
        assert!(run_simulation(&request).unwrap_err().is_invalid_input());

        let request = scenario_a().with_management(ManagementSettings::new(150.0, 50.0));
        assert!(run_simulation(&request).unwrap_err().is_invalid_input());
    }

    #[test]
    fn missing_weather_uses_fallback() {
        let request = SimulationRequest::new("rice", "clay", 10, start());
        let result = run_simulation(&request).unwrap();
        assert_eq!(result.summary.weather_source, ReadingSource::Fallback);
    }

    #[test]
    fn runs_are_deterministic() {
        let request = scenario_a().with_environment(
            EnvironmentReading::new(27.0, 8.0, 180.0).with_humidity(85.0),
        );
        assert_eq!(run_simulation(&request).unwrap(), run_simulation(&request).unwrap());
    }

    #[test]
    fn single_point_matches_last_day() {
        let env = EnvironmentReading::new(22.0, 12.0, 220.0);
        let mgmt = ManagementSettings::new(60.0, 70.0);
        for days in [1, 17, 45, 90] {
            let request = SimulationRequest::new("corn", "sandy", days, start())
                .with_environment(env)
                .with_management(mgmt.clone());
            let run = run_simulation(&request).unwrap();
            let point = evaluate_single_point("corn", "sandy", &env, &mgmt, days).unwrap();
            assert_eq!(run.daily_series.last(), Some(&point));
        }
    }

    #[test]
    fn single_point_day_zero_is_pre_growth() {
        let env = EnvironmentReading::fallback();
        let mgmt = ManagementSettings::default();
        let point = evaluate_single_point("soybeans", "loam", &env, &mgmt, 0).unwrap();
        assert_eq!(point.day, 0);
        assert_eq!(point.stage, StageName::Germination);
        assert_eq!(point.growth_percentage, 0.0);
        assert_eq!(point.ndvi, INITIAL_NDVI);

        assert!(evaluate_single_point("soybeans", "loam", &env, &mgmt, 400)
            .unwrap_err()
            .is_configuration());
    }

    #[test]
    fn single_point_does_not_depend_on_calendar() {
        let env = EnvironmentReading::new(24.0, 6.0, 250.0);
        let mgmt = ManagementSettings::new(55.0, 60.0);

        // A full run this late in the calendar cannot place its harvest date.
        let request = SimulationRequest::new("wheat", "loam", 30, NaiveDate::MAX)
            .with_environment(env)
            .with_management(mgmt.clone());
        assert!(Simulator::new(&request).unwrap_err().is_configuration());

        let point = evaluate_single_point("wheat", "loam", &env, &mgmt, 30).unwrap();
        let early = SimulationRequest::new("wheat", "loam", 30, start())
            .with_environment(env)
            .with_management(mgmt);
        assert_eq!(run_simulation(&early).unwrap().daily_series.last(), Some(&point));
    }

    #[test]
    fn progress_called_once_per_day() {
        let simulator = Simulator::new(&scenario_a()).unwrap();
        let mut seen = Vec::new();
        let result = simulator.run_with_progress(|d| seen.push(d.day)).unwrap();
        assert_eq!(seen, (1..=30).collect::<Vec<_>>());
        assert_eq!(result.daily_series.len(), 30);
    }

    #[test]
    fn cancellation_stops_the_run() {
        let simulator = Simulator::new(&scenario_a()).unwrap();
        let cancel = AtomicBool::new(false);
        let err = simulator
            .run_until(
                |d| {
                    if d.day == 5 {
                        cancel.store(true, Ordering::Relaxed);
                    }
                },
                &cancel,
            )
            .unwrap_err();
        assert!(matches!(err, CropSimError::Cancelled { completed_days: 5 }));

        let untouched = AtomicBool::new(false);
        assert!(simulator.run_until(|_| {}, &untouched).is_ok());
    }

    #[test]
    fn ndvi_and_growth_stay_bounded() {
        let request = SimulationRequest::new("corn", "loam", 365, start())
            .with_environment(EnvironmentReading::new(25.0, 20.0, 300.0))
            .with_management(ManagementSettings::new(100.0, 100.0).with_soil_health(100.0));
        let result = run_simulation(&request).unwrap();
        let mut last_growth = 0.0;
        for day in &result.daily_series {
            assert!((MIN_NDVI..=MAX_NDVI).contains(&day.ndvi));
            assert!(day.growth_percentage >= last_growth);
            assert!(day.growth_percentage <= 100.0);
            last_growth = day.growth_percentage;
        }
    }

    #[test]
    fn farm_size_scales_production() {
        let request = scenario_a().with_management(
            ManagementSettings::new(50.0, 50.0).with_farm_size_acres(10.0),
        );
        let summary = run_simulation(&request).unwrap().summary;
        let expected = summary.yield_tons_per_hectare * 4.04686;
        assert!((summary.total_production_tons - expected).abs() < 1e-3);
    }
}
