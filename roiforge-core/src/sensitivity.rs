//! One-parameter sweeps: scale a single input and rerun the full projection.

use crate::parameters::ParameterSet;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Percent changes applied to the base value when none are given.
pub const DEFAULT_VARIATIONS: [f64; 9] = [-50.0, -30.0, -20.0, -10.0, 0.0, 10.0, 20.0, 30.0, 50.0];

/// Automated-system inputs that can be swept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityParameter {
    SystemCost,
    InstallationCost,
    EngineeringCost,
    TrainingCost,
    MaintenanceCost,
    EnergyCost,
    HeadcountReplaced,
    ProductionIncrease,
    LaborCost,
    Capacity,
}

impl SensitivityParameter {
    pub const ALL: [SensitivityParameter; 10] = [
        SensitivityParameter::SystemCost,
        SensitivityParameter::InstallationCost,
        SensitivityParameter::EngineeringCost,
        SensitivityParameter::TrainingCost,
        SensitivityParameter::MaintenanceCost,
        SensitivityParameter::EnergyCost,
        SensitivityParameter::HeadcountReplaced,
        SensitivityParameter::ProductionIncrease,
        SensitivityParameter::LaborCost,
        SensitivityParameter::Capacity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SensitivityParameter::SystemCost => "system_cost",
            SensitivityParameter::InstallationCost => "installation_cost",
            SensitivityParameter::EngineeringCost => "engineering_cost",
            SensitivityParameter::TrainingCost => "training_cost",
            SensitivityParameter::MaintenanceCost => "maintenance_cost",
            SensitivityParameter::EnergyCost => "energy_cost",
            SensitivityParameter::HeadcountReplaced => "headcount_replaced",
            SensitivityParameter::ProductionIncrease => "production_increase",
            SensitivityParameter::LaborCost => "labor_cost",
            SensitivityParameter::Capacity => "capacity",
        }
    }

    pub fn value(&self, set: &ParameterSet) -> f64 {
        let automated = &set.automated;
        match self {
            SensitivityParameter::SystemCost => automated.system_cost,
            SensitivityParameter::InstallationCost => automated.installation_cost,
            SensitivityParameter::EngineeringCost => automated.engineering_cost,
            SensitivityParameter::TrainingCost => automated.training_cost,
            SensitivityParameter::MaintenanceCost => automated.maintenance_cost,
            SensitivityParameter::EnergyCost => automated.energy_cost,
            SensitivityParameter::HeadcountReplaced => automated.headcount_replaced,
            SensitivityParameter::ProductionIncrease => automated.production_increase_pct,
            SensitivityParameter::LaborCost => automated.labor_cost,
            SensitivityParameter::Capacity => automated.capacity,
        }
    }

    fn apply(&self, set: &mut ParameterSet, value: f64) {
        let automated = &mut set.automated;
        match self {
            SensitivityParameter::SystemCost => automated.system_cost = value,
            SensitivityParameter::InstallationCost => automated.installation_cost = value,
            SensitivityParameter::EngineeringCost => automated.engineering_cost = value,
            SensitivityParameter::TrainingCost => automated.training_cost = value,
            SensitivityParameter::MaintenanceCost => automated.maintenance_cost = value,
            SensitivityParameter::EnergyCost => automated.energy_cost = value,
            SensitivityParameter::HeadcountReplaced => automated.headcount_replaced = value,
            SensitivityParameter::ProductionIncrease => automated.production_increase_pct = value,
            SensitivityParameter::LaborCost => automated.labor_cost = value,
            SensitivityParameter::Capacity => set.set_automated_capacity(value),
        }
    }
}

impl fmt::Display for SensitivityParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SensitivityParameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|parameter| parameter.name() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|p| p.name()).collect();
                format!("unknown parameter '{s}', expected one of: {}", known.join(", "))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub variation_pct: f64,
    pub value: f64,
    pub roi_pct: f64,
    pub npv: f64,
    pub payback_years: f64,
    pub payback_reached: bool,
}

/// Reruns the projection once per variation with `parameter` scaled by
/// `1 + variation / 100`. The input set is left untouched.
pub fn sensitivity(
    set: &ParameterSet,
    parameter: SensitivityParameter,
    variations: &[f64],
) -> Vec<SensitivityPoint> {
    let base = parameter.value(set);
    tracing::debug!(
        target: "roi.sensitivity",
        parameter = parameter.name(),
        base,
        points = variations.len(),
        "Running sensitivity sweep"
    );

    variations
        .iter()
        .map(|&variation_pct| {
            let value = base * (1.0 + variation_pct / 100.0);
            let mut varied = set.clone();
            parameter.apply(&mut varied, value);
            let summary = varied.project().summary;
            SensitivityPoint {
                variation_pct,
                value,
                roi_pct: summary.roi_pct,
                npv: summary.npv,
                payback_years: summary.payback.years,
                payback_reached: summary.payback.reached,
            }
        })
        .collect()
}
