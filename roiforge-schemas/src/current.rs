use serde::{Deserialize, Serialize};

/// The production line as it runs today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentSystemParameters {
    /// Units per hour.
    pub capacity: f64,
    /// Seconds per unit, kept equal to `3600 / capacity`.
    pub cycle_time: f64,
    /// Full-time equivalents.
    pub headcount: f64,
    #[serde(default)]
    pub system_cost: f64,
    pub maintenance_cost: f64,
    pub energy_cost: f64,
    pub reject_rate_pct: f64,
    pub production_loss_pct: f64,
    /// Accidents per year.
    pub accident_frequency: f64,
    pub cost_per_accident: f64,
    /// Hours of downtime per accident.
    pub downtime_per_accident: f64,
    #[serde(default)]
    pub unplanned_downtime_hours_per_month: f64,
}
