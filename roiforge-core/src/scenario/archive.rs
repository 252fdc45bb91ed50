use super::store::KeyValueStore;
use crate::{parameters::ParameterSet, RoiError};
use chrono::{SecondsFormat, Utc};
use roiforge_schemas::{
    results::ResultsSummary,
    scenario::{MetricDelta, Scenario, ScenarioComparison, ScenarioId, ScenarioSummary},
};

/// Store key holding the whole scenario list.
pub const SCENARIOS_KEY: &str = "roiforge.scenarios";

const COPY_SUFFIX: &str = " (copy)";

/// Scenario list kept under a single key of a `KeyValueStore`.
///
/// Every mutation reads the list, changes it and writes it back whole.
/// `list` treats unreadable or corrupt lists as empty. Mutations only
/// tolerate the corrupt case and refuse to overwrite a list they could not
/// read.
pub struct ScenarioArchive<S: KeyValueStore> {
    store: S,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn next_id(existing: &[Scenario]) -> ScenarioId {
    let mut candidate = Utc::now().timestamp_millis();
    while existing.iter().any(|s| s.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

impl<S: KeyValueStore> ScenarioArchive<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self) -> Vec<Scenario> {
        let raw = match self.store.get(SCENARIOS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(target: "roi.scenarios", error = %e, "Scenario store unreadable, using an empty list");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(scenarios) => scenarios,
            Err(e) => {
                tracing::warn!(target: "roi.scenarios", error = %e, "Scenario list is corrupt, using an empty list");
                Vec::new()
            }
        }
    }

    fn list_for_update(&self) -> Result<Vec<Scenario>, RoiError> {
        let Some(raw) = self.store.get(SCENARIOS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(scenarios) => Ok(scenarios),
            Err(e) => {
                tracing::warn!(target: "roi.scenarios", error = %e, "Scenario list is corrupt, replacing it");
                Ok(Vec::new())
            }
        }
    }

    fn write(&mut self, scenarios: &[Scenario]) -> Result<(), RoiError> {
        let json = serde_json::to_string(scenarios)?;
        self.store.set(SCENARIOS_KEY, &json)
    }

    /// Appends a snapshot and returns its id.
    pub fn save(
        &mut self,
        name: &str,
        set: &ParameterSet,
        summary: &ResultsSummary,
    ) -> Result<ScenarioId, RoiError> {
        let mut scenarios = self.list_for_update()?;
        let id = next_id(&scenarios);
        let now = timestamp();
        scenarios.push(Scenario {
            id: id.clone(),
            name: name.to_string(),
            created_at: now.clone(),
            modified_at: Some(now),
            industry: set.industry,
            system_type: set.system_type,
            current: set.current.clone(),
            automated: set.automated.clone(),
            general: set.general.clone(),
            summary: ScenarioSummary::from(summary),
        });
        self.write(&scenarios)?;
        tracing::info!(target: "roi.scenarios", id = %id, name, "Saved scenario");
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Option<Scenario> {
        self.list().into_iter().find(|s| s.id == id)
    }

    /// The parameter groups of a stored scenario, ready to be projected again.
    pub fn load(&self, id: &str) -> Result<ParameterSet, RoiError> {
        let scenario = self
            .get(id)
            .ok_or_else(|| RoiError::ScenarioNotFound(id.to_string()))?;
        Ok(ParameterSet {
            industry: scenario.industry,
            system_type: scenario.system_type,
            current: scenario.current,
            automated: scenario.automated,
            general: scenario.general,
        })
    }

    pub fn delete(&mut self, id: &str) -> Result<(), RoiError> {
        let mut scenarios = self.list_for_update()?;
        let before = scenarios.len();
        scenarios.retain(|s| s.id != id);
        if scenarios.len() == before {
            return Err(RoiError::ScenarioNotFound(id.to_string()));
        }
        self.write(&scenarios)?;
        tracing::info!(target: "roi.scenarios", id, "Deleted scenario");
        Ok(())
    }

    /// Replaces the parameters and summary of `id`, keeping its name unless
    /// a new one is given.
    pub fn update(
        &mut self,
        id: &str,
        set: &ParameterSet,
        summary: &ResultsSummary,
        name: Option<&str>,
    ) -> Result<(), RoiError> {
        self.modify(id, |scenario| {
            if let Some(name) = name {
                scenario.name = name.to_string();
            }
            scenario.industry = set.industry;
            scenario.system_type = set.system_type;
            scenario.current = set.current.clone();
            scenario.automated = set.automated.clone();
            scenario.general = set.general.clone();
            scenario.summary = ScenarioSummary::from(summary);
        })
    }

    pub fn rename(&mut self, id: &str, name: &str) -> Result<(), RoiError> {
        self.modify(id, |scenario| scenario.name = name.to_string())
    }

    fn modify(&mut self, id: &str, change: impl FnOnce(&mut Scenario)) -> Result<(), RoiError> {
        let mut scenarios = self.list_for_update()?;
        let scenario = scenarios
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| RoiError::ScenarioNotFound(id.to_string()))?;
        change(scenario);
        scenario.modified_at = Some(timestamp());
        self.write(&scenarios)
    }

    /// Copies `id` under a new id with " (copy)" appended to its name.
    pub fn duplicate(&mut self, id: &str) -> Result<ScenarioId, RoiError> {
        let mut scenarios = self.list_for_update()?;
        let original = scenarios
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| RoiError::ScenarioNotFound(id.to_string()))?;
        let new_id = next_id(&scenarios);
        let now = timestamp();
        scenarios.push(Scenario {
            id: new_id.clone(),
            name: format!("{}{COPY_SUFFIX}", original.name),
            created_at: now.clone(),
            modified_at: Some(now),
            ..original
        });
        self.write(&scenarios)?;
        Ok(new_id)
    }

    /// Differences are `first - second`.
    pub fn compare(&self, first: &str, second: &str) -> Result<ScenarioComparison, RoiError> {
        let a = self
            .get(first)
            .ok_or_else(|| RoiError::ScenarioNotFound(first.to_string()))?;
        let b = self
            .get(second)
            .ok_or_else(|| RoiError::ScenarioNotFound(second.to_string()))?;
        Ok(ScenarioComparison {
            first_id: a.id.clone(),
            second_id: b.id.clone(),
            roi_pct: MetricDelta::new(a.summary.roi_pct, b.summary.roi_pct),
            payback_years: MetricDelta::new(a.summary.payback_years, b.summary.payback_years),
            initial_investment: MetricDelta::new(
                a.automated.initial_investment(),
                b.automated.initial_investment(),
            ),
            npv: MetricDelta::new(a.summary.npv, b.summary.npv),
        })
    }

    pub fn export_json(&self) -> Result<String, RoiError> {
        Ok(serde_json::to_string_pretty(&self.list())?)
    }

    /// Appends the scenarios of a JSON array. Imported ids that collide with
    /// stored ones are reassigned. Returns how many scenarios were added.
    pub fn import_json(&mut self, json: &str) -> Result<usize, RoiError> {
        let imported: Vec<Scenario> = serde_json::from_str(json)?;
        let count = imported.len();
        let mut scenarios = self.list_for_update()?;
        for mut scenario in imported {
            if scenarios.iter().any(|s| s.id == scenario.id) {
                scenario.id = next_id(&scenarios);
            }
            scenarios.push(scenario);
        }
        self.write(&scenarios)?;
        tracing::info!(target: "roi.scenarios", count, "Imported scenarios");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{presets, scenario::store::MemoryStore};
    use roiforge_schemas::system::{Industry, SystemType};

    fn archive_with(names: &[&str]) -> (ScenarioArchive<MemoryStore>, Vec<ScenarioId>) {
        let mut archive = ScenarioArchive::new(MemoryStore::new());
        let set = ParameterSet::default();
        let summary = set.project().summary;
        let ids = names
            .iter()
            .map(|name| {
                archive.save(name, &set, &summary).unwrap()
            })
            .collect();
        (archive, ids)
    }

    #[test]
    fn ids_are_unique_even_within_the_same_millisecond() {
        let (archive, ids) = archive_with(&["a", "b", "c"]);
        assert_eq!(archive.list().len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);
    }

    #[test]
    fn corrupt_list_reads_as_empty() {
        let mut store = MemoryStore::new();
        store.set(SCENARIOS_KEY, "{not json").unwrap();
        let archive = ScenarioArchive::new(store);
        assert!(archive.list().is_empty());
    }

    #[test]
    fn missing_ids_are_reported() {
        let (mut archive, _) = archive_with(&["a"]);
        assert!(matches!(archive.load("nope"), Err(RoiError::ScenarioNotFound(_))));
        assert!(matches!(archive.delete("nope"), Err(RoiError::ScenarioNotFound(_))));
        assert!(matches!(archive.compare("nope", "nope"), Err(RoiError::ScenarioNotFound(_))));
    }

    #[test]
    fn duplicate_appends_copy_suffix() {
        let (mut archive, ids) = archive_with(&["Base"]);
        let copy = archive.duplicate(&ids[0]).unwrap();
        let scenario = archive.get(&copy).unwrap();
        assert_eq!(scenario.name, "Base (copy)");
        assert_eq!(scenario.summary, archive.get(&ids[0]).unwrap().summary);
    }

    #[test]
    fn rename_touches_modified_at_only() {
        let (mut archive, ids) = archive_with(&["Base"]);
        let before = archive.get(&ids[0]).unwrap();
        archive.rename(&ids[0], "Renamed").unwrap();
        let after = archive.get(&ids[0]).unwrap();
        assert_eq!(after.name, "Renamed");
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.current, before.current);
    }

    #[test]
    fn import_rejects_non_arrays_and_reassigns_colliding_ids() {
        let (mut archive, _) = archive_with(&["a"]);
        assert!(archive.import_json("{\"id\": \"1\"}").is_err());

        let exported = archive.export_json().unwrap();
        assert_eq!(archive.import_json(&exported).unwrap(), 1);
        let scenarios = archive.list();
        assert_eq!(scenarios.len(), 2);
        assert_ne!(scenarios[0].id, scenarios[1].id);
    }

    #[test]
    fn compare_reports_first_minus_second() {
        let mut archive = ScenarioArchive::new(MemoryStore::new());
        let cheap = ParameterSet::default();
        let mut dear = ParameterSet::default();
        dear.automated.system_cost += 100_000.0;
        let a = archive
            .save("cheap", &cheap, &cheap.project().summary)
            .unwrap();
        let b = archive
            .save("dear", &dear, &dear.project().summary)
            .unwrap();

        let comparison = archive.compare(&a, &b).unwrap();
        assert_eq!(comparison.initial_investment.difference, -100_000.0);
        assert!(comparison.npv.difference > 0.0);
    }

    #[test]
    fn update_replaces_parameters_and_keeps_creation_time() {
        let (mut archive, ids) = archive_with(&["Base"]);
        let before = archive.get(&ids[0]).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));

        let mut set = presets::parameter_set(Industry::Generic, SystemType::SemiAutomated);
        set.automated.subsidies += 10_000.0;
        let summary = set.project().summary;
        archive.update(&ids[0], &set, &summary, Some("Generic semi")).unwrap();

        let after = archive.get(&ids[0]).unwrap();
        assert_eq!(after.name, "Generic semi");
        assert_eq!(after.created_at, before.created_at);
        assert_ne!(after.modified_at, before.modified_at);
        assert_eq!(after.automated, set.automated);
        assert_eq!(after.summary, ScenarioSummary::from(&summary));
        assert_eq!(archive.load(&ids[0]).unwrap(), set);

        archive.update(&ids[0], &set, &summary, None).unwrap();
        assert_eq!(archive.get(&ids[0]).unwrap().name, "Generic semi");
        assert!(matches!(
            archive.update("nope", &set, &summary, None),
            Err(RoiError::ScenarioNotFound(_))
        ));
    }

    #[test]
    fn load_restores_the_preset_selections() {
        let mut archive = ScenarioArchive::new(MemoryStore::new());
        let set = presets::parameter_set(Industry::Generic, SystemType::LegacyAutomated);
        let id = archive.save("Generic", &set, &set.project().summary).unwrap();

        let loaded = archive.load(&id).unwrap();
        assert_eq!(loaded.industry, Industry::Generic);
        assert_eq!(loaded.system_type, SystemType::LegacyAutomated);
        assert_eq!(loaded, set);
    }

    struct UnreadableStore {
        writes: usize,
    }

    impl KeyValueStore for UnreadableStore {
        fn get(&self, key: &str) -> Result<Option<String>, RoiError> {
            Err(RoiError::Storage {
                key: key.to_string(),
                reason: "device not ready".to_string(),
            })
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), RoiError> {
            self.writes += 1;
            Ok(())
        }

        fn remove(&mut self, _key: &str) -> Result<(), RoiError> {
            Ok(())
        }
    }

    #[test]
    fn failed_reads_block_writes() {
        let mut archive = ScenarioArchive::new(UnreadableStore { writes: 0 });
        let set = ParameterSet::default();
        let summary = set.project().summary;

        assert!(archive.list().is_empty());
        assert!(matches!(
            archive.save("Base", &set, &summary),
            Err(RoiError::Storage { .. })
        ));
        assert!(archive.import_json("[]").is_err());
        assert!(archive.duplicate("1").is_err());
        assert!(archive.delete("1").is_err());
        assert_eq!(archive.store().writes, 0);
    }

    #[test]
    fn save_replaces_a_corrupt_list() {
        let mut store = MemoryStore::new();
        store.set(SCENARIOS_KEY, "{not json").unwrap();
        let mut archive = ScenarioArchive::new(store);
        let set = ParameterSet::default();
        archive.save("Base", &set, &set.project().summary).unwrap();
        assert_eq!(archive.list().len(), 1);
    }
}
