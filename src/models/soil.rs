use crate::error::{CropSimError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Clay,
    Loam,
    Sandy,
}

impl SoilType {
    pub const ALL: [SoilType; 3] = [SoilType::Clay, SoilType::Loam, SoilType::Sandy];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Clay => "Clay",
            SoilType::Loam => "Loam",
            SoilType::Sandy => "Sandy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "clay" => Some(SoilType::Clay),
            "loam" => Some(SoilType::Loam),
            "sandy" | "sand" => Some(SoilType::Sandy),
            _ => None,
        }
    }

    pub fn profile(&self) -> &'static SoilProfile {
        match self {
            SoilType::Clay => &CLAY,
            SoilType::Loam => &LOAM,
            SoilType::Sandy => &SANDY,
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Physical soil coefficients, all in 0-1.
#[derive(Debug, Clone, Serialize)]
pub struct SoilProfile {
    pub soil: SoilType,
    pub water_retention: f64,
    pub drainage_rate: f64,
    pub fertilizer_retention: f64,
    pub description: &'static str,
}

pub fn lookup_soil(id: &str) -> Result<&'static SoilProfile> {
    SoilType::from_str(id)
        .map(|s| s.profile())
        .ok_or_else(|| CropSimError::Configuration(format!("Unknown soil type '{}'", id)))
}

static CLAY: SoilProfile = SoilProfile {
    soil: SoilType::Clay,
    water_retention: 0.9,
    drainage_rate: 0.3,
    fertilizer_retention: 0.8,
    description: "Clay soils retain water and nutrients well but have poor drainage.",
};

static LOAM: SoilProfile = SoilProfile {
    soil: SoilType::Loam,
    water_retention: 0.7,
    drainage_rate: 0.6,
    fertilizer_retention: 0.7,
    description: "Loam soils offer balanced water retention and drainage.",
};

static SANDY: SoilProfile = SoilProfile {
    soil: SoilType::Sandy,
    water_retention: 0.3,
    drainage_rate: 0.9,
    fertilizer_retention: 0.4,
    description: "Sandy soils drain quickly and need more frequent irrigation.",
};
