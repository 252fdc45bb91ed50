use serde::{Deserialize, Serialize};

/// The proposed automated system.
///
/// Percentages are expressed on a 0..=100 scale. Recurring costs are annual
/// amounts in year-one money; the engine inflates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomatedSystemParameters {
    pub system_cost: f64,
    pub installation_cost: f64,
    pub engineering_cost: f64,
    pub training_cost: f64,
    #[serde(default)]
    pub subsidies: f64,

    /// Years, also the length of the projection.
    pub useful_life: u32,
    pub depreciation_rate_pct: f64,

    pub headcount_replaced: f64,
    /// Fully loaded annual cost per employee.
    pub labor_cost: f64,

    pub reject_rate_pct: f64,
    pub waste_reduction_pct: f64,
    pub waste_cost: f64,
    pub energy_reduction_pct: f64,
    pub energy_cost_per_tonne: f64,
    pub water_reduction_pct: f64,
    pub water_cost_per_tonne: f64,
    pub production_increase_pct: f64,
    pub quality_improvement_pct: f64,
    pub accident_reduction_pct: f64,
    #[serde(default)]
    pub downtime_reduction_pct: f64,
    pub co2_reduction_pct: f64,

    pub maintenance_cost: f64,
    pub energy_cost: f64,
    #[serde(default)]
    pub continuing_training_cost: f64,
    #[serde(default)]
    pub software_update_cost: f64,
    #[serde(default)]
    pub consumables_cost: f64,

    /// Units per hour.
    pub capacity: f64,
    /// Seconds per unit.
    pub cycle_time: f64,
}

impl AutomatedSystemParameters {
    /// Capital outlay net of subsidies.
    pub fn initial_investment(&self) -> f64 {
        self.system_cost + self.installation_cost + self.engineering_cost + self.training_cost
            - self.subsidies
    }

    /// Recurring costs outside maintenance and energy, before inflation.
    pub fn hidden_costs(&self) -> f64 {
        self.continuing_training_cost + self.software_update_cost + self.consumables_cost
    }
}
