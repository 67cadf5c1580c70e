use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropSimError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Simulation cancelled after {completed_days} day(s)")]
    Cancelled { completed_days: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CropSimError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, CropSimError::Configuration(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CropSimError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, CropSimError>;
