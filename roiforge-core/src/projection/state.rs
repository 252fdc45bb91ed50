use roiforge_schemas::results::YearlyCashFlowEntry;

/// Year-independent terms, worked out once before the yearly loop.
///
/// Every monetary value here is in year-one money; the engine multiplies it
/// by the inflation factor of the year being projected.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineTerms {
    pub initial_investment: f64,
    pub annual_operating_hours: f64,
    pub hourly_production_value: f64,
    pub labor_saving: f64,
    pub waste_saving: f64,
    pub reject_saving: f64,
    pub process_energy_saving: f64,
    pub water_saving: f64,
    pub production_benefit: f64,
    pub quality_benefit: f64,
    pub safety_saving: f64,
    pub accident_downtime_saving: f64,
    pub unplanned_downtime_saving: f64,
    pub remaining_staff_cost: f64,
    pub depreciation_benefit: f64,
    /// Physical quantity, never inflated nor discounted.
    pub co2_tonnes_per_year: f64,
}

/// Running totals of a projection in progress.
#[derive(Debug, Clone, Default)]
pub struct ProjectionState {
    pub year: u32,
    pub cumulative_cash_flow: f64,
    pub cumulative_discounted_cash_flow: f64,
    pub npv: f64,
    pub co2_tonnes_saved: f64,
    pub discounted_operating_costs: f64,
    pub entries: Vec<YearlyCashFlowEntry>,
}

impl ProjectionState {
    pub fn new(initial_investment: f64, useful_life: u32) -> Self {
        Self {
            npv: -initial_investment,
            entries: Vec::with_capacity(useful_life as usize),
            ..Self::default()
        }
    }

    pub fn annual_cash_flows(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.annual_cash_flow).collect()
    }

    pub fn discounted_cash_flows(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.discounted_cash_flow).collect()
    }
}
