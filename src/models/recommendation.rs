use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationCategory {
    Water,
    Temperature,
    Fertilizer,
    Drainage,
    Solar,
    Sustainability,
    PestRisk,
    DiseaseRisk,
    FrostRisk,
    SoilPh,
    GrowthStage,
}

impl RecommendationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationCategory::Water => "Water",
            RecommendationCategory::Temperature => "Temperature",
            RecommendationCategory::Fertilizer => "Fertilizer",
            RecommendationCategory::Drainage => "Drainage",
            RecommendationCategory::Solar => "Solar Radiation",
            RecommendationCategory::Sustainability => "Sustainability",
            RecommendationCategory::PestRisk => "Pest Risk",
            RecommendationCategory::DiseaseRisk => "Disease Risk",
            RecommendationCategory::FrostRisk => "Frost Risk",
            RecommendationCategory::SoilPh => "Soil pH",
            RecommendationCategory::GrowthStage => "Growth Stage",
        }
    }
}

impl std::fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Low => "→",
            Severity::Medium => "⚠",
            Severity::High => "!",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: String,
}

impl DataPoint {
    pub fn new(label: &str, value: impl std::fmt::Display) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Machine-readable advisory kind, e.g. `temperature_high`.
    #[serde(rename = "type")]
    pub kind: String,
    pub category: RecommendationCategory,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_points: Vec<DataPoint>,
}

impl Recommendation {
    pub fn new(
        kind: impl Into<String>,
        category: RecommendationCategory,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            category,
            severity,
            title: title.into(),
            message: message.into(),
            data_points: Vec::new(),
        }
    }

    pub fn with_data_point(mut self, label: &str, value: impl std::fmt::Display) -> Self {
        self.data_points.push(DataPoint::new(label, value));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_low_to_high() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn serializes_kind_as_type() {
        let rec = Recommendation::new(
            "reduce_irrigation",
            RecommendationCategory::Water,
            Severity::Medium,
            "Reduce Irrigation",
            "Rainfall already covers most of the crop's needs",
        )
        .with_data_point("Irrigation", "80%");

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "reduce_irrigation");
        assert_eq!(json["severity"], "medium");
        assert_eq!(json["data_points"][0]["label"], "Irrigation");
    }

    #[test]
    fn empty_data_points_are_omitted() {
        let rec = Recommendation::new(
            "biodiversity",
            RecommendationCategory::Sustainability,
            Severity::Low,
            "Improve Biodiversity",
            "Rotate crops",
        );
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json.get("data_points").is_none());
    }
}
