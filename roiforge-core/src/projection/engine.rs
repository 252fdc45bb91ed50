use super::state::{BaselineTerms, ProjectionState};
use crate::{
    analysis::{self, QUALITY_MARGIN_SHARE},
    cycle,
    error::RoiError,
    logger::CashFlowLogger,
};
use roiforge_schemas::{
    automated::AutomatedSystemParameters,
    current::CurrentSystemParameters,
    general::GeneralParameters,
    results::{EfficiencyGains, OperationalMetrics, Projection, ResultsSummary, YearlyCashFlowEntry},
};

/// Year-by-year discounted cash-flow simulation of an automation project.
///
/// The engine owns a copy of its inputs and has no other state than the
/// running totals of the projection, so two engines built from the same
/// parameters produce identical output.
pub struct ProjectionEngine {
    pub(super) current: CurrentSystemParameters,
    pub(super) automated: AutomatedSystemParameters,
    pub(super) general: GeneralParameters,
    pub(super) baseline: BaselineTerms,
    pub(super) state: ProjectionState,
    pub(super) logger: Option<CashFlowLogger>,
}

/// Runs a full projection over `automated.useful_life` years.
pub fn compute_projection(
    current: &CurrentSystemParameters,
    automated: &AutomatedSystemParameters,
    general: &GeneralParameters,
) -> Projection {
    let mut engine = ProjectionEngine::new(current.clone(), automated.clone(), general.clone());
    while engine.advance().is_some() {}
    engine.summarize()
}

impl ProjectionEngine {
    pub fn new(
        current: CurrentSystemParameters,
        automated: AutomatedSystemParameters,
        general: GeneralParameters,
    ) -> Self {
        let baseline = baseline_terms(&current, &automated, &general);
        let state = ProjectionState::new(baseline.initial_investment, automated.useful_life);
        Self {
            current,
            automated,
            general,
            baseline,
            state,
            logger: None,
        }
    }

    /// Projects every remaining year, streaming rows to the cash-flow log if
    /// one is configured, and returns the finished projection.
    pub fn run(&mut self) -> Result<Projection, RoiError> {
        tracing::info!(
            target: "roi.projection",
            investment = self.baseline.initial_investment,
            useful_life = self.automated.useful_life,
            "Starting projection"
        );
        while self.tick()? {}
        let projection = self.summarize();
        tracing::info!(
            target: "roi.projection",
            roi = projection.summary.roi_pct,
            npv = projection.summary.npv,
            payback = projection.summary.payback.years,
            "Projection complete"
        );
        Ok(projection)
    }

    /// Projects one year. Returns `false` once the useful life is exhausted.
    pub fn tick(&mut self) -> Result<bool, RoiError> {
        if self.advance().is_none() {
            return Ok(false);
        }
        if let Some(entry) = self.state.entries.last() {
            tracing::debug!(
                target: "roi.projection",
                year = entry.year,
                cash_flow = entry.annual_cash_flow,
                cumulative = entry.cumulative_cash_flow,
                "Year projected"
            );
            if let Some(logger) = &mut self.logger {
                logger.log_entry(entry)?;
            }
        }
        Ok(true)
    }

    /// Pure step: computes the next year and records it in the state.
    pub fn advance(&mut self) -> Option<&YearlyCashFlowEntry> {
        if self.state.year >= self.automated.useful_life {
            return None;
        }
        let year = self.state.year + 1;
        let entry = self.project_year(year);

        self.state.year = year;
        self.state.npv += entry.discounted_cash_flow;
        self.state.cumulative_cash_flow = entry.cumulative_cash_flow;
        self.state.cumulative_discounted_cash_flow = entry.cumulative_discounted_cash_flow;
        self.state.co2_tonnes_saved += entry.co2_tonnes_saved;
        self.state.discounted_operating_costs += analysis::discount(
            entry.operating_costs() + self.baseline.remaining_staff_cost * entry.inflation_factor,
            self.general.discount_rate_pct,
            year,
        );
        self.state.entries.push(entry);
        self.state.entries.last()
    }

    pub fn state(&self) -> &ProjectionState {
        &self.state
    }

    fn project_year(&self, year: u32) -> YearlyCashFlowEntry {
        let b = &self.baseline;
        let f = analysis::inflation_factor(self.general.inflation_rate_pct, year);

        let automated_maintenance_cost = self.automated.maintenance_cost * f;
        let automated_energy_cost = self.automated.energy_cost * f;
        let hidden_costs = self.automated.hidden_costs() * f;

        let labor_saving = b.labor_saving * f;
        let waste_saving = b.waste_saving * f;
        let reject_saving = b.reject_saving * f;
        let maintenance_saving = self.current.maintenance_cost * f - automated_maintenance_cost;
        let energy_saving = self.current.energy_cost * f - automated_energy_cost;
        let process_energy_saving = b.process_energy_saving * f;
        let water_saving = b.water_saving * f;
        let production_benefit = b.production_benefit * f;
        let quality_benefit = b.quality_benefit * f;
        let safety_saving = b.safety_saving * f;
        let accident_downtime_saving = b.accident_downtime_saving * f;
        let unplanned_downtime_saving = b.unplanned_downtime_saving * f;

        let annual_cash_flow = labor_saving
            + waste_saving
            + reject_saving
            + maintenance_saving
            + energy_saving
            + process_energy_saving
            + water_saving
            + production_benefit
            + quality_benefit
            + safety_saving
            + accident_downtime_saving
            + unplanned_downtime_saving
            - automated_maintenance_cost
            - automated_energy_cost
            - hidden_costs
            + b.depreciation_benefit;

        let discounted_cash_flow =
            analysis::discount(annual_cash_flow, self.general.discount_rate_pct, year);

        YearlyCashFlowEntry {
            year,
            inflation_factor: f,
            labor_saving,
            waste_saving,
            reject_saving,
            maintenance_saving,
            energy_saving,
            process_energy_saving,
            water_saving,
            production_benefit,
            quality_benefit,
            safety_saving,
            accident_downtime_saving,
            unplanned_downtime_saving,
            automated_maintenance_cost,
            automated_energy_cost,
            hidden_costs,
            depreciation_benefit: b.depreciation_benefit,
            annual_cash_flow,
            discounted_cash_flow,
            cumulative_cash_flow: self.state.cumulative_cash_flow + annual_cash_flow,
            cumulative_discounted_cash_flow: self.state.cumulative_discounted_cash_flow
                + discounted_cash_flow,
            co2_tonnes_saved: b.co2_tonnes_per_year,
        }
    }

    /// Aggregates the years projected so far into a results bundle.
    pub fn summarize(&self) -> Projection {
        let b = &self.baseline;
        let investment = b.initial_investment;
        let useful_life = self.automated.useful_life;
        let flows = self.state.annual_cash_flows();
        let discounted = self.state.discounted_cash_flows();

        let total_cash_flow: f64 = flows.iter().sum();
        let quality_saving = self
            .state
            .entries
            .last()
            .map_or(0.0, |e| e.quality_benefit);

        let summary = ResultsSummary {
            initial_investment: investment,
            total_cash_flow,
            roi_pct: analysis::capped_roi(total_cash_flow, investment),
            discounted_roi_pct: self.state.cumulative_discounted_cash_flow / investment * 100.0,
            payback: analysis::payback_period(investment, &flows, useful_life),
            discounted_payback: analysis::payback_period(investment, &discounted, useful_life),
            npv: self.state.npv,
            irr: analysis::irr_scan(investment, &flows),
            profitability_index: self.state.npv / investment,
            average_annual_saving: total_cash_flow / useful_life as f64,
            co2_tonnes_saved: self.state.co2_tonnes_saved,
            production_delta: self.automated_annual_production() - self.current_annual_production(),
            labor_saving: b.labor_saving,
            safety_saving: b.safety_saving,
            quality_saving,
            downtime_saving: b.accident_downtime_saving,
            operational: self.operational_metrics(),
            efficiency: self.efficiency_gains(),
        };

        Projection {
            cash_flow: self.state.entries.clone(),
            summary,
        }
    }

    fn current_annual_production(&self) -> f64 {
        self.current.capacity
            * self.baseline.annual_operating_hours
            * (1.0 - self.current.production_loss_pct / 100.0)
    }

    fn automated_annual_production(&self) -> f64 {
        self.automated.capacity * self.baseline.annual_operating_hours
    }

    fn operational_metrics(&self) -> OperationalMetrics {
        let current = &self.current;
        let automated = &self.automated;
        let current_production = self.current_annual_production();
        let automated_production = self.automated_annual_production();

        let current_operating_cost = current.maintenance_cost
            + current.energy_cost
            + current.headcount * automated.labor_cost
            + current.accident_frequency * current.cost_per_accident;
        let automated_operating_cost = automated.maintenance_cost
            + automated.energy_cost
            + self.baseline.remaining_staff_cost
            + current.accident_frequency
                * current.cost_per_accident
                * (1.0 - automated.accident_reduction_pct / 100.0);

        let current_cost_per_unit = current_operating_cost / current_production;
        let automated_cost_per_unit = automated_operating_cost / automated_production;

        OperationalMetrics {
            annual_operating_hours: self.baseline.annual_operating_hours,
            current_cycle_time: cycle::capacity_to_cycle_time(current.capacity),
            automated_cycle_time: cycle::capacity_to_cycle_time(automated.capacity),
            productivity_gain_pct: analysis::relative_change_pct(current.capacity, automated.capacity),
            current_annual_production: current_production,
            automated_annual_production: automated_production,
            current_cost_per_unit,
            automated_cost_per_unit,
            saving_per_unit: current_cost_per_unit - automated_cost_per_unit,
            total_cost_of_ownership: self.baseline.initial_investment
                + self.state.discounted_operating_costs,
        }
    }

    fn efficiency_gains(&self) -> EfficiencyGains {
        let current = &self.current;
        let automated = &self.automated;
        EfficiencyGains {
            capacity_pct: analysis::relative_change_pct(current.capacity, automated.capacity),
            cycle_time_pct: -analysis::relative_change_pct(current.cycle_time, automated.cycle_time),
            labor_pct: automated.headcount_replaced / current.headcount * 100.0,
            reject_rate_pct: -analysis::relative_change_pct(
                current.reject_rate_pct,
                automated.reject_rate_pct,
            ),
            accidents_pct: automated.accident_reduction_pct,
            maintenance_pct: -analysis::relative_change_pct(
                current.maintenance_cost,
                automated.maintenance_cost,
            ),
        }
    }
}

fn baseline_terms(
    current: &CurrentSystemParameters,
    automated: &AutomatedSystemParameters,
    general: &GeneralParameters,
) -> BaselineTerms {
    let volume = general.annual_volume;
    let margin = general.margin_per_unit;
    let annual_operating_hours = general.annual_operating_hours();
    let hourly_production_value = volume * margin / annual_operating_hours;
    let initial_investment = automated.initial_investment();

    BaselineTerms {
        initial_investment,
        annual_operating_hours,
        hourly_production_value,
        labor_saving: automated.headcount_replaced * automated.labor_cost,
        waste_saving: volume * automated.waste_reduction_pct / 100.0 * automated.waste_cost,
        reject_saving: volume * (current.reject_rate_pct - automated.reject_rate_pct) / 100.0
            * automated.waste_cost,
        process_energy_saving: volume * automated.energy_reduction_pct / 100.0
            * automated.energy_cost_per_tonne,
        water_saving: volume * automated.water_reduction_pct / 100.0 * automated.water_cost_per_tonne,
        production_benefit: volume * automated.production_increase_pct / 100.0 * margin,
        quality_benefit: volume * automated.quality_improvement_pct / 100.0
            * (margin * QUALITY_MARGIN_SHARE),
        safety_saving: current.accident_frequency * current.cost_per_accident
            * automated.accident_reduction_pct
            / 100.0,
        accident_downtime_saving: current.accident_frequency
            * current.downtime_per_accident
            * hourly_production_value
            * automated.accident_reduction_pct
            / 100.0,
        unplanned_downtime_saving: current.unplanned_downtime_hours_per_month
            * 12.0
            * hourly_production_value
            * automated.downtime_reduction_pct
            / 100.0,
        remaining_staff_cost: (current.headcount - automated.headcount_replaced)
            * automated.labor_cost,
        depreciation_benefit: initial_investment / automated.useful_life as f64
            * (automated.depreciation_rate_pct / 100.0),
        co2_tonnes_per_year: volume * automated.co2_reduction_pct / 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use roiforge_schemas::system::{Industry, SystemType};

    fn pulp_inputs() -> (CurrentSystemParameters, AutomatedSystemParameters, GeneralParameters) {
        let set = presets::parameter_set(Industry::PulpAndPaper, SystemType::Manual);
        (set.current, set.automated, set.general)
    }

    #[test]
    fn year_one_is_not_inflated() {
        let (current, automated, general) = pulp_inputs();
        let projection = compute_projection(&current, &automated, &general);
        let first = &projection.cash_flow[0];
        assert_eq!(first.inflation_factor, 1.0);
        assert_eq!(first.labor_saving, automated.headcount_replaced * automated.labor_cost);
        assert_eq!(first.automated_maintenance_cost, automated.maintenance_cost);
    }

    #[test]
    fn annual_cash_flow_is_savings_minus_costs_plus_depreciation() {
        let (current, automated, general) = pulp_inputs();
        let projection = compute_projection(&current, &automated, &general);
        for entry in &projection.cash_flow {
            let expected =
                entry.gross_savings() - entry.operating_costs() + entry.depreciation_benefit;
            assert!(
                (entry.annual_cash_flow - expected).abs() < 1e-6,
                "year {}: {} vs {}",
                entry.year,
                entry.annual_cash_flow,
                expected
            );
        }
    }

    #[test]
    fn cumulative_columns_are_running_sums() {
        let (current, automated, general) = pulp_inputs();
        let projection = compute_projection(&current, &automated, &general);
        let mut nominal = 0.0;
        let mut discounted = 0.0;
        for entry in &projection.cash_flow {
            nominal += entry.annual_cash_flow;
            discounted += entry.discounted_cash_flow;
            assert!((entry.cumulative_cash_flow - nominal).abs() < 1e-6);
            assert!((entry.cumulative_discounted_cash_flow - discounted).abs() < 1e-6);
        }
        let npv = discounted - projection.summary.initial_investment;
        assert!((projection.summary.npv - npv).abs() < 1e-6);
    }

    #[test]
    fn engine_can_be_stepped_one_year_at_a_time() {
        let (current, automated, general) = pulp_inputs();
        let mut engine = ProjectionEngine::new(current.clone(), automated.clone(), general.clone());
        assert_eq!(engine.advance().map(|e| e.year), Some(1));
        assert_eq!(engine.state().year, 1);
        while engine.advance().is_some() {}
        assert!(engine.advance().is_none());
        assert_eq!(
            engine.summarize(),
            compute_projection(&current, &automated, &general)
        );
    }

    #[test]
    fn unplanned_downtime_only_counts_when_configured() {
        let (mut current, mut automated, general) = pulp_inputs();
        let base = compute_projection(&current, &automated, &general);
        assert!(base.cash_flow.iter().all(|e| e.unplanned_downtime_saving == 0.0));

        current.unplanned_downtime_hours_per_month = 10.0;
        automated.downtime_reduction_pct = 50.0;
        let with_downtime = compute_projection(&current, &automated, &general);
        let hourly = general.annual_volume * general.margin_per_unit / general.annual_operating_hours();
        let expected = 10.0 * 12.0 * hourly * 0.5;
        assert!((with_downtime.cash_flow[0].unplanned_downtime_saving - expected).abs() < 1e-6);
        assert!(with_downtime.summary.total_cash_flow > base.summary.total_cash_flow);
    }

    #[test]
    fn hidden_costs_reduce_cash_flow() {
        let (current, mut automated, general) = pulp_inputs();
        let base = compute_projection(&current, &automated, &general);
        automated.continuing_training_cost = 8000.0;
        automated.software_update_cost = 2000.0;
        let with_costs = compute_projection(&current, &automated, &general);
        let delta = base.cash_flow[0].annual_cash_flow - with_costs.cash_flow[0].annual_cash_flow;
        assert!((delta - 10_000.0).abs() < 1e-6);
        assert_eq!(with_costs.cash_flow[0].hidden_costs, 10_000.0);
    }
}
