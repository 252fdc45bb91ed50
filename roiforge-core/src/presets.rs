//! Default parameter bundles per industry and current system type.
//!
//! Cycle times are always derived from capacity so every preset satisfies
//! `cycle_time == 3600 / capacity`.

use crate::{cycle, parameters::ParameterSet};
use roiforge_schemas::{
    automated::AutomatedSystemParameters,
    current::CurrentSystemParameters,
    general::GeneralParameters,
    system::{Industry, SystemType},
};

struct CurrentPreset {
    capacity: f64,
    headcount: f64,
    system_cost: f64,
    maintenance_cost: f64,
    energy_cost: f64,
    reject_rate_pct: f64,
    production_loss_pct: f64,
    accident_frequency: f64,
    cost_per_accident: f64,
    downtime_per_accident: f64,
}

impl CurrentPreset {
    fn into_parameters(self) -> CurrentSystemParameters {
        CurrentSystemParameters {
            capacity: self.capacity,
            cycle_time: cycle::capacity_to_cycle_time(self.capacity),
            headcount: self.headcount,
            system_cost: self.system_cost,
            maintenance_cost: self.maintenance_cost,
            energy_cost: self.energy_cost,
            reject_rate_pct: self.reject_rate_pct,
            production_loss_pct: self.production_loss_pct,
            accident_frequency: self.accident_frequency,
            cost_per_accident: self.cost_per_accident,
            downtime_per_accident: self.downtime_per_accident,
            unplanned_downtime_hours_per_month: 0.0,
        }
    }
}

/// Baseline line parameters for `system_type` in `industry`.
pub fn current_system(industry: Industry, system_type: SystemType) -> CurrentSystemParameters {
    let preset = match (industry, system_type) {
        (Industry::PulpAndPaper, SystemType::Manual) => CurrentPreset {
            capacity: 45.0,
            headcount: 2.5,
            system_cost: 15_000.0,
            maintenance_cost: 6_000.0,
            energy_cost: 4_000.0,
            reject_rate_pct: 8.0,
            production_loss_pct: 12.0,
            accident_frequency: 5.2,
            cost_per_accident: 12_500.0,
            downtime_per_accident: 24.0,
        },
        (Industry::PulpAndPaper, SystemType::SemiAutomated) => CurrentPreset {
            capacity: 80.0,
            headcount: 1.5,
            system_cost: 120_000.0,
            maintenance_cost: 18_000.0,
            energy_cost: 8_000.0,
            reject_rate_pct: 5.5,
            production_loss_pct: 8.0,
            accident_frequency: 3.8,
            cost_per_accident: 12_500.0,
            downtime_per_accident: 24.0,
        },
        (Industry::PulpAndPaper, SystemType::LegacyAutomated) => CurrentPreset {
            capacity: 100.0,
            headcount: 1.0,
            system_cost: 250_000.0,
            maintenance_cost: 25_000.0,
            energy_cost: 10_000.0,
            reject_rate_pct: 4.2,
            production_loss_pct: 5.0,
            accident_frequency: 1.5,
            cost_per_accident: 12_500.0,
            downtime_per_accident: 16.0,
        },
        (Industry::Generic, SystemType::Manual) => CurrentPreset {
            capacity: 35.0,
            headcount: 2.0,
            system_cost: 0.0,
            maintenance_cost: 6_000.0,
            energy_cost: 4_000.0,
            reject_rate_pct: 8.0,
            production_loss_pct: 12.0,
            accident_frequency: 4.5,
            cost_per_accident: 10_000.0,
            downtime_per_accident: 24.0,
        },
        (Industry::Generic, SystemType::SemiAutomated) => CurrentPreset {
            capacity: 60.0,
            headcount: 1.5,
            system_cost: 0.0,
            maintenance_cost: 12_000.0,
            energy_cost: 6_000.0,
            reject_rate_pct: 5.5,
            production_loss_pct: 8.0,
            accident_frequency: 3.2,
            cost_per_accident: 10_000.0,
            downtime_per_accident: 24.0,
        },
        (Industry::Generic, SystemType::LegacyAutomated) => CurrentPreset {
            capacity: 70.0,
            headcount: 1.0,
            system_cost: 0.0,
            maintenance_cost: 20_000.0,
            energy_cost: 8_000.0,
            reject_rate_pct: 4.5,
            production_loss_pct: 6.0,
            accident_frequency: 2.0,
            cost_per_accident: 10_000.0,
            downtime_per_accident: 24.0,
        },
    };
    preset.into_parameters()
}

/// Default proposal for `industry`.
pub fn automated_system(industry: Industry) -> AutomatedSystemParameters {
    match industry {
        Industry::PulpAndPaper => AutomatedSystemParameters {
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
            continuing_training_cost: 8_000.0,
            software_update_cost: 0.0,
            consumables_cost: 0.0,
            capacity: 120.0,
            cycle_time: cycle::capacity_to_cycle_time(120.0),
        },
        // Generic lines have no per-tonne energy or water pricing.
        Industry::Generic => AutomatedSystemParameters {
            system_cost: 150_000.0,
            installation_cost: 25_000.0,
            engineering_cost: 20_000.0,
            training_cost: 10_000.0,
            subsidies: 0.0,
            useful_life: 10,
            depreciation_rate_pct: 20.0,
            headcount_replaced: 1.5,
            labor_cost: 45_000.0,
            reject_rate_pct: 3.0,
            waste_reduction_pct: 60.0,
            waste_cost: 200.0,
            energy_reduction_pct: 25.0,
            energy_cost_per_tonne: 0.0,
            water_reduction_pct: 0.0,
            water_cost_per_tonne: 0.0,
            production_increase_pct: 15.0,
            quality_improvement_pct: 0.0,
            accident_reduction_pct: 80.0,
            downtime_reduction_pct: 70.0,
            co2_reduction_pct: 0.0,
            maintenance_cost: 5_000.0,
            energy_cost: 3_000.0,
            continuing_training_cost: 5_000.0,
            software_update_cost: 8_000.0,
            consumables_cost: 0.0,
            capacity: 85.0,
            cycle_time: cycle::capacity_to_cycle_time(85.0),
        },
    }
}

pub fn general(industry: Industry) -> GeneralParameters {
    match industry {
        Industry::PulpAndPaper => GeneralParameters {
            margin_per_unit: 110.0,
            inflation_rate_pct: 2.0,
            discount_rate_pct: 5.0,
            annual_volume: 20_000.0,
            hours_per_day: 16.0,
            days_per_year: 300.0,
        },
        Industry::Generic => GeneralParameters {
            margin_per_unit: 0.2,
            inflation_rate_pct: 2.0,
            discount_rate_pct: 5.0,
            annual_volume: 100_000.0,
            hours_per_day: 16.0,
            days_per_year: 250.0,
        },
    }
}

/// Full bundle for `industry` and `system_type`. The replaced headcount is
/// clamped to the headcount of the selected current line.
pub fn parameter_set(industry: Industry, system_type: SystemType) -> ParameterSet {
    let current = current_system(industry, system_type);
    let mut automated = automated_system(industry);
    automated.headcount_replaced = automated.headcount_replaced.min(current.headcount);
    ParameterSet {
        industry,
        system_type,
        current,
        automated,
        general: general(industry),
    }
}
