use serde::{Deserialize, Serialize};

/// One simulated year of the projection. Entries are produced in year order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyCashFlowEntry {
    pub year: u32,
    pub inflation_factor: f64,

    pub labor_saving: f64,
    pub waste_saving: f64,
    pub reject_saving: f64,
    pub maintenance_saving: f64,
    pub energy_saving: f64,
    pub process_energy_saving: f64,
    pub water_saving: f64,
    pub production_benefit: f64,
    pub quality_benefit: f64,
    pub safety_saving: f64,
    pub accident_downtime_saving: f64,
    pub unplanned_downtime_saving: f64,

    pub automated_maintenance_cost: f64,
    pub automated_energy_cost: f64,
    pub hidden_costs: f64,
    pub depreciation_benefit: f64,

    pub annual_cash_flow: f64,
    pub discounted_cash_flow: f64,
    pub cumulative_cash_flow: f64,
    pub cumulative_discounted_cash_flow: f64,
    pub co2_tonnes_saved: f64,
}

impl YearlyCashFlowEntry {
    /// Every saving and benefit term of the year, before costs.
    pub fn gross_savings(&self) -> f64 {
        self.labor_saving
            + self.waste_saving
            + self.reject_saving
            + self.maintenance_saving
            + self.energy_saving
            + self.process_energy_saving
            + self.water_saving
            + self.production_benefit
            + self.quality_benefit
            + self.safety_saving
            + self.accident_downtime_saving
            + self.unplanned_downtime_saving
    }

    /// Recurring operating costs of the automated system for the year.
    pub fn operating_costs(&self) -> f64 {
        self.automated_maintenance_cost + self.automated_energy_cost + self.hidden_costs
    }
}

/// When the cumulative cash flow catches up with the investment.
///
/// `years` equals the useful life when `reached` is false; that value is a
/// sentinel, not a payback time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaybackPeriod {
    pub years: f64,
    pub reached: bool,
}

/// Outcome of the integer IRR scan over 1..=100 %.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IrrEstimate {
    /// Last scanned rate (percent) before NPV turned non-positive.
    Bounded { rate_pct: f64 },
    /// NPV stayed positive for every scanned rate.
    AboveScanRange,
}

impl IrrEstimate {
    pub fn rate_pct(&self) -> Option<f64> {
        match self {
            IrrEstimate::Bounded { rate_pct } => Some(*rate_pct),
            IrrEstimate::AboveScanRange => None,
        }
    }

    /// The number older displays showed: 0 when the scan did not bound the rate.
    pub fn legacy_value(&self) -> f64 {
        self.rate_pct().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalMetrics {
    pub annual_operating_hours: f64,
    pub current_cycle_time: f64,
    pub automated_cycle_time: f64,
    pub productivity_gain_pct: f64,
    pub current_annual_production: f64,
    pub automated_annual_production: f64,
    pub current_cost_per_unit: f64,
    pub automated_cost_per_unit: f64,
    pub saving_per_unit: f64,
    /// Investment plus discounted operating costs over the useful life.
    pub total_cost_of_ownership: f64,
}

/// Relative improvements of the automated system over the current one, in %.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyGains {
    pub capacity_pct: f64,
    pub cycle_time_pct: f64,
    pub labor_pct: f64,
    pub reject_rate_pct: f64,
    pub accidents_pct: f64,
    pub maintenance_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsSummary {
    pub initial_investment: f64,
    pub total_cash_flow: f64,
    /// Capped at 1000 %.
    pub roi_pct: f64,
    pub discounted_roi_pct: f64,
    pub payback: PaybackPeriod,
    pub discounted_payback: PaybackPeriod,
    pub npv: f64,
    pub irr: IrrEstimate,
    pub profitability_index: f64,
    pub average_annual_saving: f64,
    pub co2_tonnes_saved: f64,
    pub production_delta: f64,
    pub labor_saving: f64,
    pub safety_saving: f64,
    pub quality_saving: f64,
    pub downtime_saving: f64,
    pub operational: OperationalMetrics,
    pub efficiency: EfficiencyGains,
}

/// Full engine output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub cash_flow: Vec<YearlyCashFlowEntry>,
    pub summary: ResultsSummary,
}
