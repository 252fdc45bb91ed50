use super::engine::ProjectionEngine;
use crate::{error::RoiError, logger::CashFlowLogger, parameters::ParameterSet};
use roiforge_schemas::{
    automated::AutomatedSystemParameters, current::CurrentSystemParameters,
    general::GeneralParameters,
};

/// A fluent builder for constructing a `ProjectionEngine`.
///
/// Use it when the projection should also stream its yearly rows to a CSV
/// file; `compute_projection` covers the plain case.
#[derive(Default)]
pub struct ProjectionBuilder {
    current: Option<CurrentSystemParameters>,
    automated: Option<AutomatedSystemParameters>,
    general: Option<GeneralParameters>,
    log_path: Option<String>,
}

impl ProjectionBuilder {
    /// Creates a new, empty `ProjectionBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parameters of the line being replaced.
    pub fn with_current(mut self, current: CurrentSystemParameters) -> Self {
        self.current = Some(current);
        self
    }

    /// Sets the parameters of the proposed automated system.
    pub fn with_automated(mut self, automated: AutomatedSystemParameters) -> Self {
        self.automated = Some(automated);
        self
    }

    /// Sets the shared financial and operating assumptions.
    pub fn with_general(mut self, general: GeneralParameters) -> Self {
        self.general = Some(general);
        self
    }

    /// Sets all three parameter groups from a `ParameterSet`.
    pub fn with_parameter_set(self, set: &ParameterSet) -> Self {
        self.with_current(set.current.clone())
            .with_automated(set.automated.clone())
            .with_general(set.general.clone())
    }

    /// Configures the engine to write one CSV row per projected year.
    pub fn with_cash_flow_logging_to_file(mut self, path: &str) -> Self {
        self.log_path = Some(path.to_string());
        self
    }

    /// Consumes the builder and returns a ready-to-run `ProjectionEngine`.
    ///
    /// # Errors
    ///
    /// Returns a `RoiError` if a parameter group is missing or the log file
    /// cannot be created.
    pub fn build(self) -> Result<ProjectionEngine, RoiError> {
        let current = self.current.ok_or(RoiError::MissingParameters("current system"))?;
        let automated = self
            .automated
            .ok_or(RoiError::MissingParameters("automated system"))?;
        let general = self.general.ok_or(RoiError::MissingParameters("general"))?;

        let logger = match self.log_path {
            Some(path) => Some(
                CashFlowLogger::new(&path).map_err(|e| RoiError::FileIO(path.clone(), e))?,
            ),
            None => None,
        };

        let mut engine = ProjectionEngine::new(current, automated, general);
        engine.logger = logger;
        Ok(engine)
    }
}
