//! Input checks applied where parameters enter the system (CLI, files,
//! scenario import). The engine itself accepts whatever it is given.

use crate::{cycle, parameters::ParameterSet, RoiError};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Relative slack allowed between a stored cycle time and `3600 / capacity`.
const CYCLE_TIME_TOLERANCE: f64 = 1e-6;

#[derive(Default)]
struct Checker {
    issues: Vec<ValidationIssue>,
}

impl Checker {
    fn push(&mut self, field: &'static str, message: String) {
        self.issues.push(ValidationIssue { field, message });
    }

    fn percentage(&mut self, field: &'static str, value: f64) {
        if !(0.0..=100.0).contains(&value) {
            self.push(field, format!("must be between 0 and 100, got {value}"));
        }
    }

    fn non_negative(&mut self, field: &'static str, value: f64) {
        if value < 0.0 || value.is_nan() {
            self.push(field, format!("must not be negative, got {value}"));
        }
    }

    fn positive(&mut self, field: &'static str, value: f64) {
        if value <= 0.0 || value.is_nan() {
            self.push(field, format!("must be greater than zero, got {value}"));
        }
    }

    /// Only meaningful once both values passed `positive`.
    fn cycle_time_matches(&mut self, field: &'static str, capacity: f64, cycle_time: f64) {
        if !(capacity > 0.0 && cycle_time > 0.0) {
            return;
        }
        let expected = cycle::capacity_to_cycle_time(capacity);
        if ((cycle_time - expected) / expected).abs() > CYCLE_TIME_TOLERANCE {
            self.push(
                field,
                format!("must equal 3600 / capacity ({expected}), got {cycle_time}"),
            );
        }
    }
}

pub fn validate(set: &ParameterSet) -> Vec<ValidationIssue> {
    let mut check = Checker::default();
    let current = &set.current;
    let automated = &set.automated;
    let general = &set.general;

    check.positive("current.capacity", current.capacity);
    check.positive("current.cycle_time", current.cycle_time);
    check.cycle_time_matches("current.cycle_time", current.capacity, current.cycle_time);
    check.positive("current.headcount", current.headcount);
    for (field, value) in [
        ("current.system_cost", current.system_cost),
        ("current.maintenance_cost", current.maintenance_cost),
        ("current.energy_cost", current.energy_cost),
        ("current.accident_frequency", current.accident_frequency),
        ("current.cost_per_accident", current.cost_per_accident),
        ("current.downtime_per_accident", current.downtime_per_accident),
        (
            "current.unplanned_downtime_hours_per_month",
            current.unplanned_downtime_hours_per_month,
        ),
    ] {
        check.non_negative(field, value);
    }
    check.percentage("current.reject_rate_pct", current.reject_rate_pct);
    check.percentage("current.production_loss_pct", current.production_loss_pct);

    check.positive("automated.capacity", automated.capacity);
    check.positive("automated.cycle_time", automated.cycle_time);
    check.cycle_time_matches("automated.cycle_time", automated.capacity, automated.cycle_time);
    if automated.useful_life == 0 {
        check.push("automated.useful_life", "must be at least one year".to_string());
    }
    for (field, value) in [
        ("automated.system_cost", automated.system_cost),
        ("automated.installation_cost", automated.installation_cost),
        ("automated.engineering_cost", automated.engineering_cost),
        ("automated.training_cost", automated.training_cost),
        ("automated.subsidies", automated.subsidies),
        ("automated.headcount_replaced", automated.headcount_replaced),
        ("automated.labor_cost", automated.labor_cost),
        ("automated.waste_cost", automated.waste_cost),
        ("automated.energy_cost_per_tonne", automated.energy_cost_per_tonne),
        ("automated.water_cost_per_tonne", automated.water_cost_per_tonne),
        ("automated.maintenance_cost", automated.maintenance_cost),
        ("automated.energy_cost", automated.energy_cost),
        ("automated.continuing_training_cost", automated.continuing_training_cost),
        ("automated.software_update_cost", automated.software_update_cost),
        ("automated.consumables_cost", automated.consumables_cost),
    ] {
        check.non_negative(field, value);
    }
    for (field, value) in [
        ("automated.depreciation_rate_pct", automated.depreciation_rate_pct),
        ("automated.reject_rate_pct", automated.reject_rate_pct),
        ("automated.waste_reduction_pct", automated.waste_reduction_pct),
        ("automated.energy_reduction_pct", automated.energy_reduction_pct),
        ("automated.water_reduction_pct", automated.water_reduction_pct),
        ("automated.production_increase_pct", automated.production_increase_pct),
        ("automated.quality_improvement_pct", automated.quality_improvement_pct),
        ("automated.accident_reduction_pct", automated.accident_reduction_pct),
        ("automated.downtime_reduction_pct", automated.downtime_reduction_pct),
        ("automated.co2_reduction_pct", automated.co2_reduction_pct),
    ] {
        check.percentage(field, value);
    }
    if automated.headcount_replaced > current.headcount {
        check.push(
            "automated.headcount_replaced",
            format!(
                "cannot exceed the current headcount ({} > {})",
                automated.headcount_replaced, current.headcount
            ),
        );
    }

    check.non_negative("general.margin_per_unit", general.margin_per_unit);
    check.non_negative("general.annual_volume", general.annual_volume);
    check.non_negative("general.inflation_rate_pct", general.inflation_rate_pct);
    check.non_negative("general.discount_rate_pct", general.discount_rate_pct);
    check.positive("general.hours_per_day", general.hours_per_day);
    check.positive("general.days_per_year", general.days_per_year);

    check.issues
}

pub fn ensure_valid(set: &ParameterSet) -> Result<(), RoiError> {
    let issues = validate(set);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(RoiError::InvalidParameters(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use roiforge_schemas::system::{Industry, SystemType};

    #[test]
    fn presets_are_valid() {
        for industry in [Industry::Generic, Industry::PulpAndPaper] {
            for system_type in SystemType::ALL {
                let set = presets::parameter_set(industry, system_type);
                assert!(validate(&set).is_empty(), "{industry} / {system_type:?}");
            }
        }
    }

    #[test]
    fn out_of_range_values_are_reported_per_field() {
        let mut set = ParameterSet::default();
        set.automated.waste_reduction_pct = 120.0;
        set.automated.maintenance_cost = -1.0;
        set.general.days_per_year = 0.0;

        let fields: Vec<_> = validate(&set).into_iter().map(|issue| issue.field).collect();
        assert_eq!(
            fields,
            vec![
                "automated.maintenance_cost",
                "automated.waste_reduction_pct",
                "general.days_per_year",
            ]
        );
    }

    #[test]
    fn replaced_headcount_is_bounded_by_current_headcount() {
        let mut set = ParameterSet::default();
        set.current.headcount = 1.0;
        set.automated.headcount_replaced = 2.0;

        let err = ensure_valid(&set).unwrap_err();
        match err {
            RoiError::InvalidParameters(issues) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].field, "automated.headcount_replaced");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cycle_time_must_follow_capacity() {
        let mut set = ParameterSet::default();
        set.current.capacity = 45.0;
        set.current.cycle_time = 10.0;
        set.automated.cycle_time = set.automated.cycle_time * 2.0;

        let fields: Vec<_> = validate(&set).into_iter().map(|issue| issue.field).collect();
        assert_eq!(fields, vec!["current.cycle_time", "automated.cycle_time"]);

        set.set_current_capacity(45.0);
        set.set_automated_capacity(set.automated.capacity);
        assert!(validate(&set).is_empty());
    }

    #[test]
    fn cycle_time_from_a_yaml_file_is_checked() {
        let mut file = ParameterSet::default().to_file();
        if let Some(current) = file.current.as_mut() {
            current.capacity = 45.0;
            current.cycle_time = 10.0;
        }
        let yaml = serde_yaml::to_string(&file).unwrap();
        let set = ParameterSet::from_file(serde_yaml::from_str(&yaml).unwrap());
        assert!(matches!(ensure_valid(&set), Err(RoiError::InvalidParameters(_))));
    }

    #[test]
    fn zero_useful_life_is_rejected() {
        let mut set = ParameterSet::default();
        set.automated.useful_life = 0;
        assert!(ensure_valid(&set).is_err());
    }
}
