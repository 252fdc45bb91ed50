use crate::{
    automated::AutomatedSystemParameters,
    current::CurrentSystemParameters,
    general::GeneralParameters,
    system::{Industry, SystemType},
};
use serde::{Deserialize, Serialize};

/// A parameter bundle as stored on disk. Groups left out are filled from the
/// presets of `industry` / `system_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterFile {
    pub schema_version: String,
    #[serde(default)]
    pub industry: Industry,
    #[serde(default)]
    pub system_type: SystemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentSystemParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automated: Option<AutomatedSystemParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general: Option<GeneralParameters>,
}
