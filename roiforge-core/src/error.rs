use crate::validation::ValidationIssue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoiError {
    #[error("{} invalid parameter(s): {}", .0.len(), summarize_issues(.0))]
    InvalidParameters(Vec<ValidationIssue>),

    #[error("Projection input is missing the {0} parameters")]
    MissingParameters(&'static str),

    #[error("Scenario '{0}' not found")]
    ScenarioNotFound(String),

    #[error("Storage error for key '{key}': {reason}")]
    Storage { key: String, reason: String },

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("An error occurred during logging: {0}")]
    LoggingError(#[from] anyhow::Error),
}

fn summarize_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
