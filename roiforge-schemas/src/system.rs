use serde::{Deserialize, Serialize};
use std::fmt;

/// Target industry, used to pick the default parameter bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Generic,
    #[default]
    PulpAndPaper,
}

/// Kind of line the automated system would replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemType {
    #[default]
    Manual,
    SemiAutomated,
    LegacyAutomated,
}

impl SystemType {
    pub const ALL: [SystemType; 3] = [
        SystemType::Manual,
        SystemType::SemiAutomated,
        SystemType::LegacyAutomated,
    ];
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Industry::Generic => write!(f, "generic"),
            Industry::PulpAndPaper => write!(f, "pulp and paper"),
        }
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemType::Manual => write!(f, "manual"),
            SystemType::SemiAutomated => write!(f, "semi-automated"),
            SystemType::LegacyAutomated => write!(f, "legacy automated"),
        }
    }
}
