use anyhow::{Context, Result};
use roiforge_core::{
    presets,
    scenario::{FileStore, ScenarioArchive},
    ParameterSet,
};
use roiforge_schemas::system::{Industry, SystemType};
use std::path::Path;

/// Resolves the parameter set for a run.
///
/// With a file, its `industry` / `system_type` decide which presets fill the
/// groups it leaves out and the CLI selections are ignored. Without one, the
/// presets for the CLI selections are used as they are.
pub fn load_parameter_set(
    path: Option<&Path>,
    industry: Industry,
    system_type: SystemType,
) -> Result<ParameterSet> {
    match path {
        Some(path) => {
            println!("Loading parameters from '{}'...", path.display());
            ParameterSet::load_yaml(path)
                .with_context(|| format!("Failed to load parameter file {:?}", path))
        }
        None => {
            println!("Using {} presets for a {} line.", industry, system_type);
            Ok(presets::parameter_set(industry, system_type))
        }
    }
}

pub fn open_archive(dir: &Path) -> ScenarioArchive<FileStore> {
    tracing::debug!(target: "roi.scenarios", store = %dir.display(), "Opening scenario archive");
    ScenarioArchive::new(FileStore::new(dir))
}
