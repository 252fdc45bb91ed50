//! Financial projection engine for industrial automation projects.
//!
//! `compute_projection` turns the current-system, automated-system and
//! general parameter groups into a yearly cash-flow table and a results
//! summary (ROI, NPV, IRR scan, payback, CO2 and operational metrics).

pub mod analysis;
pub mod cycle;
pub mod error;
pub mod logger;
pub mod parameters;
pub mod presets;
pub mod projection;
pub mod scenario;
pub mod sensitivity;
pub mod validation;

pub use error::RoiError;
pub use parameters::ParameterSet;
pub use projection::compute_projection;
