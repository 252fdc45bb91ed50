use crate::{
    automated::AutomatedSystemParameters, current::CurrentSystemParameters,
    general::GeneralParameters, results::ResultsSummary,
    system::{Industry, SystemType},
};
use serde::{Deserialize, Serialize};

pub type ScenarioId = String;

/// A named snapshot of a parameter set and its headline results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
    /// Preset selections the groups were derived from. Older records
    /// without them read as the defaults.
    #[serde(default)]
    pub industry: Industry,
    #[serde(default)]
    pub system_type: SystemType,
    pub current: CurrentSystemParameters,
    pub automated: AutomatedSystemParameters,
    pub general: GeneralParameters,
    pub summary: ScenarioSummary,
}

/// The part of `ResultsSummary` worth keeping alongside a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSummary {
    pub initial_investment: f64,
    pub roi_pct: f64,
    pub payback_years: f64,
    pub payback_reached: bool,
    pub npv: f64,
    pub irr_pct: Option<f64>,
    pub average_annual_saving: f64,
    pub co2_tonnes_saved: f64,
}

impl From<&ResultsSummary> for ScenarioSummary {
    fn from(summary: &ResultsSummary) -> Self {
        Self {
            initial_investment: summary.initial_investment,
            roi_pct: summary.roi_pct,
            payback_years: summary.payback.years,
            payback_reached: summary.payback.reached,
            npv: summary.npv,
            irr_pct: summary.irr.rate_pct(),
            average_annual_saving: summary.average_annual_saving,
            co2_tonnes_saved: summary.co2_tonnes_saved,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub first: f64,
    pub second: f64,
    /// `first - second`.
    pub difference: f64,
}

impl MetricDelta {
    pub fn new(first: f64, second: f64) -> Self {
        Self {
            first,
            second,
            difference: first - second,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub first_id: ScenarioId,
    pub second_id: ScenarioId,
    pub roi_pct: MetricDelta,
    pub payback_years: MetricDelta,
    pub initial_investment: MetricDelta,
    pub npv: MetricDelta,
}
