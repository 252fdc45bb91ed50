use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use roiforge_core::sensitivity::{SensitivityParameter, DEFAULT_VARIATIONS};
use roiforge_schemas::system::{Industry, SystemType};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod plotting;
mod report;
mod workflow;

#[derive(Parser, Debug)]
#[command(name = "roiforge")]
#[command(version)]
#[command(about = "ROI, NPV and payback projections for industrial automation projects")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log engine progress at info level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the scenario archive
    #[arg(long, global = true, default_value = "./data/scenarios")]
    store: PathBuf,
}

/// Where the parameter set comes from: a YAML file, or the presets.
#[derive(clap::Args, Debug)]
struct InputArgs {
    /// YAML parameter file; missing groups are filled from the presets
    #[arg(short, long)]
    params: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "pulp-and-paper")]
    industry: IndustryArg,

    #[arg(long, value_enum, default_value = "manual")]
    system_type: SystemTypeArg,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a projection and write the CSV, charts and report
    Project {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, default_value = "./data/runs")]
        output: PathBuf,
    },
    /// Print the default parameter file for an industry and system type
    Preset {
        #[arg(long, value_enum, default_value = "pulp-and-paper")]
        industry: IndustryArg,

        #[arg(long, value_enum, default_value = "manual")]
        system_type: SystemTypeArg,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Check a parameter file without running the projection
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Sweep one automated-system parameter and report ROI, NPV and payback
    Sensitivity {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long)]
        parameter: SensitivityParameter,

        /// Percent changes, comma separated
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        variations: Vec<f64>,
    },
    /// Manage saved scenarios
    Scenario {
        #[command(subcommand)]
        action: ScenarioCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ScenarioCommand {
    List,
    /// Project a parameter set and store it under a name
    Save {
        name: String,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print a stored scenario as a parameter file
    Load {
        id: String,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    Delete {
        id: String,
    },
    Duplicate {
        id: String,
    },
    Compare {
        first: String,
        second: String,
    },
    Export {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    Import {
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IndustryArg {
    Generic,
    PulpAndPaper,
}

impl From<IndustryArg> for Industry {
    fn from(arg: IndustryArg) -> Self {
        match arg {
            IndustryArg::Generic => Industry::Generic,
            IndustryArg::PulpAndPaper => Industry::PulpAndPaper,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SystemTypeArg {
    Manual,
    SemiAutomated,
    LegacyAutomated,
}

impl From<SystemTypeArg> for SystemType {
    fn from(arg: SystemTypeArg) -> Self {
        match arg {
            SystemTypeArg::Manual => SystemType::Manual,
            SystemTypeArg::SemiAutomated => SystemType::SemiAutomated,
            SystemTypeArg::LegacyAutomated => SystemType::LegacyAutomated,
        }
    }
}

impl InputArgs {
    fn load(&self) -> Result<roiforge_core::ParameterSet> {
        config::load_parameter_set(
            self.params.as_deref(),
            self.industry.into(),
            self.system_type.into(),
        )
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Project { input, output } => {
            println!("--- ROI Projection ---");
            let set = input.load()?;
            let run_dir = workflow::run_projection(&set, &output)?;
            println!("\nProjection complete. Results are in '{}'", run_dir.display());
        }
        Command::Preset {
            industry,
            system_type,
            out,
        } => {
            let set = roiforge_core::presets::parameter_set(industry.into(), system_type.into());
            workflow::write_parameter_file(&set, out.as_deref())?;
        }
        Command::Validate { input } => {
            let set = input.load()?;
            workflow::run_validation(&set)?;
        }
        Command::Sensitivity {
            input,
            parameter,
            variations,
        } => {
            let set = input.load()?;
            let variations = if variations.is_empty() {
                DEFAULT_VARIATIONS.to_vec()
            } else {
                variations
            };
            workflow::run_sensitivity(&set, parameter, &variations)?;
        }
        Command::Scenario { action } => {
            let mut archive = config::open_archive(&cli.store);
            match action {
                ScenarioCommand::List => workflow::list_scenarios(&archive),
                ScenarioCommand::Save { name, input } => {
                    let set = input.load()?;
                    workflow::save_scenario(&mut archive, &name, &set)?;
                }
                ScenarioCommand::Load { id, out } => {
                    let set = archive.load(&id)?;
                    workflow::write_parameter_file(&set, out.as_deref())?;
                }
                ScenarioCommand::Delete { id } => {
                    archive.delete(&id)?;
                    println!("Deleted scenario {id}");
                }
                ScenarioCommand::Duplicate { id } => {
                    let copy = archive.duplicate(&id)?;
                    println!("Duplicated scenario {id} as {copy}");
                }
                ScenarioCommand::Compare { first, second } => {
                    workflow::compare_scenarios(&archive, &first, &second)?;
                }
                ScenarioCommand::Export { out } => {
                    let json = archive.export_json()?;
                    workflow::write_output(&json, out.as_deref())?;
                }
                ScenarioCommand::Import { file } => {
                    let count = workflow::import_scenarios(&mut archive, &file)?;
                    println!("Imported {count} scenario(s)");
                }
            }
        }
    }

    Ok(())
}
