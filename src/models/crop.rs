use super::soil::SoilType;
use crate::error::{CropSimError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Wheat,
    Rice,
    Corn,
    Soybeans,
}

impl CropType {
    pub const ALL: [CropType; 4] = [
        CropType::Wheat,
        CropType::Rice,
        CropType::Corn,
        CropType::Soybeans,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Wheat => "Wheat",
            CropType::Rice => "Rice",
            CropType::Corn => "Corn",
            CropType::Soybeans => "Soybeans",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wheat" => Some(CropType::Wheat),
            "rice" => Some(CropType::Rice),
            "corn" | "maize" => Some(CropType::Corn),
            "soybeans" | "soybean" | "soy" => Some(CropType::Soybeans),
            _ => None,
        }
    }

    pub fn profile(&self) -> &'static CropProfile {
        match self {
            CropType::Wheat => &WHEAT,
            CropType::Rice => &RICE,
            CropType::Corn => &CORN,
            CropType::Soybeans => &SOYBEANS,
        }
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageName {
    Germination,
    Vegetative,
    Flowering,
    Maturity,
}

impl StageName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::Germination => "germination",
            StageName::Vegetative => "vegetative",
            StageName::Flowering => "flowering",
            StageName::Maturity => "maturity",
        }
    }

    /// Position in the crop life cycle, germination first.
    pub fn index(&self) -> usize {
        match self {
            StageName::Germination => 0,
            StageName::Vegetative => 1,
            StageName::Flowering => 2,
            StageName::Maturity => 3,
        }
    }
}

impl std::fmt::Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One growth stage, expressed as an inclusive absolute day range.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GrowthStage {
    pub name: StageName,
    pub start_day: u32,
    pub end_day: u32,
    /// Amplifies (>1) or dampens (<1) the impact of stress on yield.
    pub sensitivity: f64,
    /// Water need relative to the crop's base daily need.
    pub water_need_multiplier: f64,
    pub description: &'static str,
    pub health_indicators: &'static [&'static str],
}

impl GrowthStage {
    pub fn contains(&self, day: u32) -> bool {
        (self.start_day..=self.end_day).contains(&day)
    }

    pub fn length_days(&self) -> u32 {
        self.end_day.saturating_sub(self.start_day)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct OptimalRange {
    pub min: f64,
    pub max: f64,
}

impl OptimalRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Distance to the nearest bound, zero inside the range.
    pub fn distance(&self, value: f64) -> f64 {
        if value < self.min {
            self.min - value
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CropProfile {
    pub crop: CropType,
    pub name: &'static str,
    pub optimal_temp_c: OptimalRange,
    /// Daily water need in mm/day.
    pub water_need_mm: f64,
    /// Target effective fertilizer level (same 0-100 scale as the management input).
    pub fertilizer_need: f64,
    pub optimal_rainfall_mm: f64,
    /// Expected yield at 100% conditions, tons/hectare.
    pub expected_yield_t_ha: f64,
    pub optimal_ph: OptimalRange,
    pub pest_sensitivity: f64,
    pub base_carbon_footprint: f64,
    pub total_growth_days: u32,
    pub stages: &'static [GrowthStage],
    /// Monthly rainfall band the crop thrives in, mm/month.
    pub rainfall_mm_month: OptimalRange,
    pub irrigation_schedule: &'static str,
    /// Best soil first.
    pub preferred_soils: &'static [SoilType],
}

impl CropProfile {
    /// Rainfall band in mm/day, for comparison against a daily reading.
    pub fn daily_rainfall_band(&self) -> OptimalRange {
        OptimalRange {
            min: self.rainfall_mm_month.min / 30.0,
            max: self.rainfall_mm_month.max / 30.0,
        }
    }

    pub fn final_stage(&self) -> &GrowthStage {
        // Every table below has four stages.
        &self.stages[self.stages.len() - 1]
    }
}

pub fn lookup_crop(id: &str) -> Result<&'static CropProfile> {
    CropType::from_str(id)
        .map(|c| c.profile())
        .ok_or_else(|| CropSimError::Configuration(format!("Unknown crop type '{}'", id)))
}

const GERMINATION_INDICATORS: &[&str] = &["Uniform emergence", "Strong seedling vigor"];
const VEGETATIVE_INDICATORS: &[&str] = &["Dark green leaves", "Multiple tillers", "Strong stem"];
const FLOWERING_INDICATORS: &[&str] = &[
    "Full head emergence",
    "Proper pollination",
    "Good kernel development",
];
const MATURITY_INDICATORS: &[&str] = &["Golden color", "Dry kernels", "Ready for harvest"];

const fn stage(
    name: StageName,
    start_day: u32,
    end_day: u32,
    sensitivity: f64,
    water_need_multiplier: f64,
    description: &'static str,
    health_indicators: &'static [&'static str],
) -> GrowthStage {
    GrowthStage {
        name,
        start_day,
        end_day,
        sensitivity,
        water_need_multiplier,
        description,
        health_indicators,
    }
}

static WHEAT_STAGES: [GrowthStage; 4] = [
    stage(
        StageName::Germination,
        0,
        15,
        1.2,
        1.2,
        "Seeds absorbing water and beginning to sprout",
        GERMINATION_INDICATORS,
    ),
    stage(
        StageName::Vegetative,
        16,
        45,
        1.0,
        1.0,
        "Leaf and stem development, tillering phase",
        VEGETATIVE_INDICATORS,
    ),
    stage(
        StageName::Flowering,
        46,
        90,
        1.5,
        1.3,
        "Head emergence and grain filling",
        FLOWERING_INDICATORS,
    ),
    stage(
        StageName::Maturity,
        91,
        120,
        0.8,
        0.7,
        "Grain hardening and drying",
        MATURITY_INDICATORS,
    ),
];

static RICE_STAGES: [GrowthStage; 4] = [
    stage(
        StageName::Germination,
        0,
        20,
        1.2,
        1.4,
        "Seed soaking, radicle and coleoptile emergence",
        GERMINATION_INDICATORS,
    ),
    stage(
        StageName::Vegetative,
        21,
        55,
        1.1,
        1.2,
        "Tillering and leaf development under flooded conditions",
        VEGETATIVE_INDICATORS,
    ),
    stage(
        StageName::Flowering,
        56,
        95,
        1.4,
        1.3,
        "Panicle initiation, heading and anthesis",
        FLOWERING_INDICATORS,
    ),
    stage(
        StageName::Maturity,
        96,
        120,
        0.8,
        0.9,
        "Grain filling and ripening",
        MATURITY_INDICATORS,
    ),
];

static CORN_STAGES: [GrowthStage; 4] = [
    stage(
        StageName::Germination,
        0,
        10,
        1.3,
        1.1,
        "Emergence and seedling establishment",
        GERMINATION_INDICATORS,
    ),
    stage(
        StageName::Vegetative,
        11,
        40,
        1.1,
        1.0,
        "Rapid leaf collar development up to tasseling",
        &["Dark green leaves", "Thick stalk", "Even canopy"],
    ),
    stage(
        StageName::Flowering,
        41,
        85,
        1.6,
        1.4,
        "Tasseling, silking and kernel set",
        &["Full silk emergence", "Good pollen shed", "Kernel set to the tip"],
    ),
    stage(
        StageName::Maturity,
        86,
        120,
        0.7,
        0.8,
        "Dent stage through black layer",
        &["Husks drying", "Black layer formed", "Ready for harvest"],
    ),
];

static SOYBEAN_STAGES: [GrowthStage; 4] = [
    stage(
        StageName::Germination,
        0,
        5,
        1.0,
        1.1,
        "Cotyledons emerging from the soil",
        GERMINATION_INDICATORS,
    ),
    stage(
        StageName::Vegetative,
        6,
        40,
        1.1,
        1.0,
        "Trifoliate development and nodulation",
        &["Healthy trifoliates", "Active nodules", "Branching"],
    ),
    stage(
        StageName::Flowering,
        41,
        65,
        1.4,
        1.3,
        "Flowering, pod set and seed fill",
        &["Abundant flowers", "Pods forming", "Seeds filling"],
    ),
    stage(
        StageName::Maturity,
        66,
        80,
        0.9,
        0.8,
        "Leaf drop and pod drying",
        &["Yellowing leaves", "Brown pods", "Ready for harvest"],
    ),
];

static WHEAT: CropProfile = CropProfile {
    crop: CropType::Wheat,
    name: "Wheat",
    optimal_temp_c: OptimalRange {
        min: 15.0,
        max: 25.0,
    },
    water_need_mm: 45.0,
    fertilizer_need: 50.0,
    optimal_rainfall_mm: 25.0,
    expected_yield_t_ha: 4.5,
    optimal_ph: OptimalRange { min: 6.0, max: 7.0 },
    pest_sensitivity: 0.7,
    base_carbon_footprint: 0.6,
    total_growth_days: 120,
    stages: &WHEAT_STAGES,
    rainfall_mm_month: OptimalRange {
        min: 50.0,
        max: 100.0,
    },
    irrigation_schedule: "Every 7-10 days",
    preferred_soils: &[SoilType::Loam, SoilType::Clay, SoilType::Sandy],
};

static RICE: CropProfile = CropProfile {
    crop: CropType::Rice,
    name: "Rice",
    optimal_temp_c: OptimalRange {
        min: 20.0,
        max: 30.0,
    },
    water_need_mm: 60.0,
    fertilizer_need: 55.0,
    optimal_rainfall_mm: 35.0,
    expected_yield_t_ha: 5.0,
    optimal_ph: OptimalRange { min: 5.5, max: 6.5 },
    pest_sensitivity: 0.8,
    base_carbon_footprint: 0.8,
    total_growth_days: 120,
    stages: &RICE_STAGES,
    rainfall_mm_month: OptimalRange {
        min: 150.0,
        max: 300.0,
    },
    irrigation_schedule: "Continuous flooding",
    preferred_soils: &[SoilType::Clay],
};

static CORN: CropProfile = CropProfile {
    crop: CropType::Corn,
    name: "Corn",
    optimal_temp_c: OptimalRange {
        min: 18.0,
        max: 32.0,
    },
    water_need_mm: 50.0,
    fertilizer_need: 60.0,
    optimal_rainfall_mm: 30.0,
    expected_yield_t_ha: 6.0,
    optimal_ph: OptimalRange { min: 5.8, max: 7.0 },
    pest_sensitivity: 0.6,
    base_carbon_footprint: 0.7,
    total_growth_days: 120,
    stages: &CORN_STAGES,
    rainfall_mm_month: OptimalRange {
        min: 75.0,
        max: 150.0,
    },
    irrigation_schedule: "Every 5-7 days",
    preferred_soils: &[SoilType::Loam, SoilType::Sandy],
};

static SOYBEANS: CropProfile = CropProfile {
    crop: CropType::Soybeans,
    name: "Soybeans",
    optimal_temp_c: OptimalRange {
        min: 20.0,
        max: 30.0,
    },
    water_need_mm: 40.0,
    fertilizer_need: 40.0,
    optimal_rainfall_mm: 20.0,
    expected_yield_t_ha: 3.0,
    optimal_ph: OptimalRange { min: 6.0, max: 6.8 },
    pest_sensitivity: 0.5,
    base_carbon_footprint: 0.4,
    total_growth_days: 80,
    stages: &SOYBEAN_STAGES,
    rainfall_mm_month: OptimalRange {
        min: 70.0,
        max: 130.0,
    },
    irrigation_schedule: "Every 7-10 days",
    preferred_soils: &[SoilType::Loam, SoilType::Clay],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_type_from_str_valid() {
        assert_eq!(CropType::from_str("wheat"), Some(CropType::Wheat));
        assert_eq!(CropType::from_str("WHEAT"), Some(CropType::Wheat));
        assert_eq!(CropType::from_str("Rice"), Some(CropType::Rice));
        assert_eq!(CropType::from_str("maize"), Some(CropType::Corn));
        assert_eq!(CropType::from_str(" soybean "), Some(CropType::Soybeans));
    }

    #[test]
    fn crop_type_from_str_invalid() {
        assert_eq!(CropType::from_str("unobtainium"), None);
        assert_eq!(CropType::from_str(""), None);
    }

    #[test]
    fn lookup_unknown_crop_is_configuration_error() {
        let err = lookup_crop("unobtainium").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("unobtainium"));
    }

    #[test]
    fn stage_tables_are_contiguous_and_ordered() {
        for crop in CropType::ALL {
            let profile = crop.profile();
            assert_eq!(profile.stages.len(), 4, "{} stage count", crop);
            assert_eq!(profile.stages[0].start_day, 0);
            for pair in profile.stages.windows(2) {
                assert_eq!(pair[0].end_day + 1, pair[1].start_day, "{} gap", crop);
                assert!(pair[0].name.index() < pair[1].name.index());
            }
            assert_eq!(profile.final_stage().end_day, profile.total_growth_days);
            assert_eq!(profile.final_stage().name, StageName::Maturity);
        }
    }

    #[test]
    fn wheat_reference_values() {
        let wheat = lookup_crop("wheat").unwrap();
        assert_eq!(wheat.optimal_temp_c.min, 15.0);
        assert_eq!(wheat.optimal_temp_c.max, 25.0);
        assert_eq!(wheat.water_need_mm, 45.0);
        assert_eq!(wheat.expected_yield_t_ha, 4.5);
        assert_eq!(wheat.stages[1].start_day, 16);
        assert_eq!(wheat.stages[1].end_day, 45);
    }

    #[test]
    fn temp_range_distance() {
        let range = OptimalRange {
            min: 15.0,
            max: 25.0,
        };
        assert_eq!(range.distance(20.0), 0.0);
        assert_eq!(range.distance(10.0), 5.0);
        assert_eq!(range.distance(40.0), 15.0);
        assert!(range.contains(15.0));
        assert!(range.contains(25.0));
        assert!(!range.contains(25.1));
    }
}
