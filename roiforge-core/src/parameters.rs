use crate::{cycle, presets, projection::compute_projection, RoiError};
use roiforge_schemas::{
    automated::AutomatedSystemParameters,
    current::CurrentSystemParameters,
    file_formats::ParameterFile,
    general::GeneralParameters,
    results::Projection,
    system::{Industry, SystemType},
};
use std::{fs, path::Path};

pub const PARAMETER_SCHEMA_VERSION: &str = "1.0";

/// The three parameter groups plus the selections they were derived from.
///
/// Edits go through the setters so that capacity and cycle time stay in
/// step; the engine is only run when `project` is called.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    pub industry: Industry,
    pub system_type: SystemType,
    pub current: CurrentSystemParameters,
    pub automated: AutomatedSystemParameters,
    pub general: GeneralParameters,
}

impl Default for ParameterSet {
    fn default() -> Self {
        presets::parameter_set(Industry::default(), SystemType::default())
    }
}

impl ParameterSet {
    /// Replaces the whole current-system group with the preset for
    /// `system_type`, clamping the replaced headcount to the new line.
    pub fn select_system_type(&mut self, system_type: SystemType) {
        self.system_type = system_type;
        self.current = presets::current_system(self.industry, system_type);
        self.automated.headcount_replaced =
            self.automated.headcount_replaced.min(self.current.headcount);
    }

    pub fn set_current_capacity(&mut self, capacity: f64) {
        self.current.capacity = capacity;
        self.current.cycle_time = cycle::capacity_to_cycle_time(capacity);
    }

    pub fn set_current_cycle_time(&mut self, cycle_time: f64) {
        self.current.cycle_time = cycle_time;
        self.current.capacity = cycle::cycle_time_to_capacity(cycle_time);
    }

    pub fn set_automated_capacity(&mut self, capacity: f64) {
        self.automated.capacity = capacity;
        self.automated.cycle_time = cycle::capacity_to_cycle_time(capacity);
    }

    pub fn set_automated_cycle_time(&mut self, cycle_time: f64) {
        self.automated.cycle_time = cycle_time;
        self.automated.capacity = cycle::cycle_time_to_capacity(cycle_time);
    }

    pub fn project(&self) -> Projection {
        compute_projection(&self.current, &self.automated, &self.general)
    }

    /// Builds a set from a file, filling absent groups from the presets.
    pub fn from_file(file: ParameterFile) -> Self {
        let defaults = presets::parameter_set(file.industry, file.system_type);
        Self {
            industry: file.industry,
            system_type: file.system_type,
            current: file.current.unwrap_or(defaults.current),
            automated: file.automated.unwrap_or(defaults.automated),
            general: file.general.unwrap_or(defaults.general),
        }
    }

    pub fn to_file(&self) -> ParameterFile {
        ParameterFile {
            schema_version: PARAMETER_SCHEMA_VERSION.to_string(),
            industry: self.industry,
            system_type: self.system_type,
            current: Some(self.current.clone()),
            automated: Some(self.automated.clone()),
            general: Some(self.general.clone()),
        }
    }

    /// Loads a YAML parameter file.
    pub fn load_yaml<P: AsRef<Path>>(path: P) -> Result<Self, RoiError> {
        let path_str = path.as_ref().display().to_string();
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| RoiError::FileIO(path_str.clone(), e))?;
        let file: ParameterFile =
            serde_yaml::from_str(&content).map_err(|e| RoiError::YamlParsing(path_str, e))?;
        Ok(Self::from_file(file))
    }

    pub fn to_yaml(&self) -> Result<String, RoiError> {
        serde_yaml::to_string(&self.to_file())
            .map_err(|e| RoiError::YamlParsing("<parameter set>".to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_edits_update_cycle_time() {
        let mut set = ParameterSet::default();
        set.set_current_capacity(80.0);
        assert_eq!(set.current.cycle_time, 45.0);
        set.set_current_cycle_time(36.0);
        assert_eq!(set.current.capacity, 100.0);

        set.set_automated_cycle_time(30.0);
        assert_eq!(set.automated.capacity, 120.0);
        set.set_automated_capacity(60.0);
        assert_eq!(set.automated.cycle_time, 60.0);
    }

    #[test]
    fn zero_cycle_time_gives_infinite_capacity() {
        let mut set = ParameterSet::default();
        set.set_current_cycle_time(0.0);
        assert_eq!(set.current.capacity, f64::INFINITY);
    }

    #[test]
    fn selecting_a_system_type_replaces_the_current_group() {
        let mut set = ParameterSet::default();
        set.current.maintenance_cost = 1.0;
        set.select_system_type(SystemType::SemiAutomated);
        assert_eq!(
            set.current,
            presets::current_system(set.industry, SystemType::SemiAutomated)
        );
        assert_eq!(set.system_type, SystemType::SemiAutomated);
        assert_eq!(set.automated.headcount_replaced, 1.5);
    }

    #[test]
    fn missing_groups_come_from_presets() {
        let yaml = r#"
schema_version: "1.0"
industry: generic
system_type: legacy_automated
general:
  margin_per_unit: 2.0
  inflation_rate_pct: 0.0
  discount_rate_pct: 8.0
  annual_volume: 5000.0
  hours_per_day: 8.0
  days_per_year: 220.0
"#;
        let file: ParameterFile = serde_yaml::from_str(yaml).expect("valid yaml");
        let set = ParameterSet::from_file(file);
        assert_eq!(set.general.margin_per_unit, 2.0);
        let defaults = presets::parameter_set(Industry::Generic, SystemType::LegacyAutomated);
        assert_eq!(set.current, defaults.current);
        assert_eq!(set.automated, defaults.automated);
    }

    #[test]
    fn yaml_round_trip_keeps_every_group() {
        let set = presets::parameter_set(Industry::PulpAndPaper, SystemType::SemiAutomated);
        let yaml = set.to_yaml().expect("serializable");
        let file: ParameterFile = serde_yaml::from_str(&yaml).expect("parsable");
        assert_eq!(ParameterSet::from_file(file), set);
    }
}
