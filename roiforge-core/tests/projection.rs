use roiforge_core::{
    analysis::ROI_CEILING_PCT,
    compute_projection,
    cycle::{capacity_to_cycle_time, cycle_time_to_capacity},
    presets, ParameterSet,
};
use roiforge_schemas::{
    automated::AutomatedSystemParameters,
    current::CurrentSystemParameters,
    general::GeneralParameters,
    results::IrrEstimate,
    system::{Industry, SystemType},
};

fn literal_current() -> CurrentSystemParameters {
    CurrentSystemParameters {
        capacity: 45.0,
        cycle_time: 80.0,
        headcount: 2.5,
        system_cost: 0.0,
        maintenance_cost: 18_000.0,
        energy_cost: 9_500.0,
        reject_rate_pct: 8.0,
        production_loss_pct: 12.0,
        accident_frequency: 5.2,
        cost_per_accident: 12_500.0,
        downtime_per_accident: 24.0,
        unplanned_downtime_hours_per_month: 0.0,
    }
}

fn literal_automated() -> AutomatedSystemParameters {
    AutomatedSystemParameters {
        system_cost: 380_000.0,
        installation_cost: 45_000.0,
        engineering_cost: 25_000.0,
        training_cost: 15_000.0,
        subsidies: 40_000.0,
        useful_life: 15,
        depreciation_rate_pct: 15.0,
        headcount_replaced: 2.0,
        labor_cost: 55_000.0,
        reject_rate_pct: 3.5,
        waste_reduction_pct: 14.0,
        waste_cost: 230.0,
        energy_reduction_pct: 12.0,
        energy_cost_per_tonne: 40.0,
        water_reduction_pct: 8.0,
        water_cost_per_tonne: 4.5,
        production_increase_pct: 10.0,
        quality_improvement_pct: 5.0,
        accident_reduction_pct: 85.0,
        downtime_reduction_pct: 0.0,
        co2_reduction_pct: 7.0,
        maintenance_cost: 12_000.0,
        energy_cost: 6_500.0,
        continuing_training_cost: 0.0,
        software_update_cost: 0.0,
        consumables_cost: 0.0,
        capacity: 120.0,
        cycle_time: 30.0,
    }
}

fn literal_general() -> GeneralParameters {
    GeneralParameters {
        margin_per_unit: 110.0,
        inflation_rate_pct: 2.0,
        discount_rate_pct: 5.0,
        annual_volume: 20_000.0,
        hours_per_day: 16.0,
        days_per_year: 300.0,
    }
}

#[test]
fn literal_pulp_and_paper_scenario() {
    let projection = compute_projection(&literal_current(), &literal_automated(), &literal_general());

    assert_eq!(projection.summary.initial_investment, 425_000.0);
    assert_eq!(projection.cash_flow.len(), 15);
    assert_eq!(projection.cash_flow[0].inflation_factor, 1.0);
    assert_eq!(projection.cash_flow[0].year, 1);
    assert_eq!(projection.cash_flow[14].year, 15);
    assert!(projection.summary.payback.reached);
    assert!(projection.summary.npv > 0.0);

    let first = &projection.cash_flow[0];
    assert!((first.annual_cash_flow - 1_404_820.0).abs() < 1e-6, "{}", first.annual_cash_flow);
    assert!((first.quality_benefit - 22_000.0).abs() < 1e-6);
    assert!((first.safety_saving - 55_250.0).abs() < 1e-6);
    assert!((first.accident_downtime_saving - 48_620.0).abs() < 1e-6);
    assert!((first.reject_saving - 207_000.0).abs() < 1e-6);
    assert!((first.depreciation_benefit - 4_250.0).abs() < 1e-6);
}

#[test]
fn increasing_subsidies_never_lowers_roi() {
    let current = literal_current();
    let general = literal_general();
    let mut previous: Option<(f64, f64)> = None;

    for subsidies in [0.0, 200_000.0, 400_000.0, 800_000.0, 1_600_000.0] {
        let mut automated = literal_automated();
        automated.system_cost = 5_000_000.0;
        automated.subsidies = subsidies;
        let summary = compute_projection(&current, &automated, &general).summary;
        if let Some((investment, roi)) = previous {
            assert!(summary.initial_investment < investment);
            assert!(summary.roi_pct >= roi, "subsidies {subsidies}: {} < {roi}", summary.roi_pct);
        }
        assert!(summary.roi_pct < ROI_CEILING_PCT);
        previous = Some((summary.initial_investment, summary.roi_pct));
    }
}

#[test]
fn identical_inputs_give_identical_output() {
    let set = presets::parameter_set(Industry::PulpAndPaper, SystemType::SemiAutomated);
    let first = set.project();
    let second = set.project();
    assert_eq!(first, second);
    for (a, b) in first.cash_flow.iter().zip(&second.cash_flow) {
        assert_eq!(a.annual_cash_flow.to_bits(), b.annual_cash_flow.to_bits());
    }
}

#[test]
fn roi_is_capped_at_one_thousand_percent() {
    let mut automated = literal_automated();
    automated.system_cost = 1_000.0;
    automated.installation_cost = 0.0;
    automated.engineering_cost = 0.0;
    automated.training_cost = 0.0;
    automated.subsidies = 0.0;

    let summary = compute_projection(&literal_current(), &automated, &literal_general()).summary;
    assert_eq!(summary.roi_pct, ROI_CEILING_PCT);
    assert_eq!(summary.irr, IrrEstimate::AboveScanRange);
}

#[test]
fn unrecovered_investment_reports_useful_life() {
    let mut automated = literal_automated();
    automated.system_cost = 50_000_000.0;

    let summary = compute_projection(&literal_current(), &automated, &literal_general()).summary;
    assert!(!summary.payback.reached);
    assert_eq!(summary.payback.years, automated.useful_life as f64);
    assert!(!summary.discounted_payback.reached);
}

#[test]
fn co2_accumulates_without_inflation() {
    let automated = literal_automated();
    let general = literal_general();
    let summary = compute_projection(&literal_current(), &automated, &general).summary;

    let expected = automated.useful_life as f64 * general.annual_volume * automated.co2_reduction_pct / 100.0;
    assert!((summary.co2_tonnes_saved - expected).abs() < 1e-9);
}

#[test]
fn converter_round_trips() {
    for value in [0.5, 1.0, 30.0, 45.0, 80.0, 120.0, 3600.0] {
        assert!((capacity_to_cycle_time(cycle_time_to_capacity(value)) - value).abs() < 1e-9);
        assert!((cycle_time_to_capacity(capacity_to_cycle_time(value)) - value).abs() < 1e-9);
    }
    assert_eq!(cycle_time_to_capacity(0.0), f64::INFINITY);
    assert_eq!(capacity_to_cycle_time(0.0), f64::INFINITY);
    assert_eq!(cycle_time_to_capacity(-60.0), -60.0);
}

#[test]
fn every_preset_projects_over_its_useful_life() {
    for industry in [Industry::Generic, Industry::PulpAndPaper] {
        for system_type in SystemType::ALL {
            let set: ParameterSet = presets::parameter_set(industry, system_type);
            let projection = set.project();
            assert_eq!(projection.cash_flow.len(), set.automated.useful_life as usize);
            assert!(projection.summary.initial_investment > 0.0);
        }
    }
}
