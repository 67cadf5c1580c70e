pub mod risk;
pub mod rules;
pub mod scoring;
pub mod simulation;
pub mod stage;
pub mod stress;
pub mod suitability;

pub use rules::{generate_recommendations, Rule, RuleContext, RulesEngine};
pub use simulation::{evaluate_single_point, run_simulation, SimulationState, Simulator};
pub use stage::{resolve_stage, StageInfo};
pub use suitability::rank_crops;
