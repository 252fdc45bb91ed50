use serde::{Deserialize, Serialize};

/// Assumptions shared by both systems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralParameters {
    /// Gross margin per unit (or tonne) of output.
    pub margin_per_unit: f64,
    pub inflation_rate_pct: f64,
    pub discount_rate_pct: f64,
    /// Annual production, in tonnes or units.
    pub annual_volume: f64,
    pub hours_per_day: f64,
    pub days_per_year: f64,
}

impl GeneralParameters {
    pub fn annual_operating_hours(&self) -> f64 {
        self.hours_per_day * self.days_per_year
    }
}
