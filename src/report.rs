use crate::models::{CropSuitability, SimulationResult, SimulationSummary};
use std::fmt::Write;

/// Plain-text rendering of a finished run for terminal output.
pub fn render_text(result: &SimulationResult) -> String {
    let s = &result.summary;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{} on {} soil, {} days ({} to {})",
        s.crop, s.soil, s.days, s.start_date, s.harvest_date
    );
    let _ = writeln!(out, "Weather: {}", s.weather_source);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Stage:          {} ({:.0}% through stage, {:.0}% of season)",
        s.final_stage, s.final_stage_progress, s.season_progress
    );
    let _ = writeln!(
        out,
        "Yield:          {:.1}% ({:.2} t/ha, {:.2} t total)",
        s.yield_percentage, s.yield_tons_per_hectare, s.total_production_tons
    );
    let _ = writeln!(
        out,
        "Health:         {:.0} ({}), NDVI {:.2}",
        s.health_score, s.health_status, s.final_ndvi
    );
    let _ = writeln!(out, "Status:         {}", s.growth_status);
    let _ = writeln!(
        out,
        "Efficiency:     water {:.0}%, fertilizer {:.0}%",
        s.water_efficiency, s.fertilizer_efficiency
    );
    let _ = writeln!(
        out,
        "Sustainability: {:.0} (carbon {:.0}, biodiversity {:.0}, soil {:.0})",
        s.sustainability.score,
        s.sustainability.carbon_footprint,
        s.sustainability.biodiversity,
        s.sustainability.soil_impact
    );
    let _ = writeln!(
        out,
        "Farmer score:   {} ({})",
        s.farmer_score.score, s.farmer_score.tier
    );
    let _ = writeln!(out);
    render_risks(&mut out, s);
    let _ = writeln!(out);
    render_recommendations(&mut out, s);

    out
}

fn render_risks(out: &mut String, s: &SimulationSummary) {
    let r = &s.risks;
    let _ = writeln!(
        out,
        "Planting risk:  {:.0} (frost {:.0}, drought {:.0}, disease {:.0}, pest {:.0}, soil {:.0})",
        r.overall, r.frost, r.drought, r.disease, r.pest, r.soil
    );
    let _ = writeln!(out, "                {}", r.recommendation);
}

fn render_recommendations(out: &mut String, s: &SimulationSummary) {
    if s.recommendations.is_empty() {
        let _ = writeln!(out, "All factors within tolerance. No recommendations.");
        return;
    }

    let _ = writeln!(out, "Recommendations ({}):", s.recommendations.len());
    for rec in &s.recommendations {
        let _ = writeln!(
            out,
            "  {} [{}] {}: {}",
            rec.severity.symbol(),
            rec.category,
            rec.title,
            rec.message
        );
        for dp in &rec.data_points {
            let _ = writeln!(out, "      {}: {}", dp.label, dp.value);
        }
    }
}

/// Ranked crop list, best first.
pub fn render_suitability(ranking: &[CropSuitability]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Crop suitability:");
    for (rank, entry) in ranking.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {:<9} {:>3}  (temperature {:.0}, water {:.0}, soil {:.0})",
            rank + 1,
            entry.crop.as_str(),
            entry.score,
            entry.temperature_score,
            entry.water_score,
            entry.soil_score
        );
        for reason in &entry.reasons {
            let _ = writeln!(out, "       - {}", reason);
        }
        let _ = writeln!(out, "       Water: {}", entry.water.recommendation);
    }
    out
}
