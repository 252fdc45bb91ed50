use crate::{plotting, report};
use anyhow::{Context, Result};
use roiforge_core::{
    analysis::Verdict,
    logger::read_cash_flow_log,
    projection::builder::ProjectionBuilder,
    scenario::{KeyValueStore, ScenarioArchive},
    sensitivity::{self, SensitivityParameter},
    validation, ParameterSet,
};
use roiforge_schemas::results::{IrrEstimate, Projection};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Validates, projects and reports one parameter set into a fresh run directory.
pub fn run_projection(set: &ParameterSet, output_root: &Path) -> Result<PathBuf> {
    validation::ensure_valid(set).context("Parameters rejected")?;

    let run_dir = output_root.join(format!("roi_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S")));
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", run_dir))?;

    // Keep the exact inputs next to the results.
    fs::write(run_dir.join("parameters.yaml"), set.to_yaml()?)?;

    println!("\n--- [Workflow] Projecting Cash Flows ---");
    let log_path = run_dir.join("cash_flow.csv");
    let log_path_str = log_path.to_string_lossy().to_string();
    let mut engine = ProjectionBuilder::new()
        .with_parameter_set(set)
        .with_cash_flow_logging_to_file(&log_path_str)
        .build()?;
    let projection = engine.run()?;

    println!("\n--- [Workflow] Rendering Charts ---");
    let entries = read_cash_flow_log(&log_path_str)?;
    plotting::generate_all_plots(&run_dir, &entries, projection.summary.initial_investment)?;

    println!("\n--- [Workflow] Writing Report ---");
    let markdown = report::render_report(set, &projection, chrono::Utc::now());
    fs::write(run_dir.join("report.md"), markdown)?;
    fs::write(
        run_dir.join("summary.json"),
        serde_json::to_string_pretty(&projection.summary)?,
    )?;

    print_summary_report(&projection);
    Ok(run_dir)
}

pub fn run_validation(set: &ParameterSet) -> Result<()> {
    let issues = validation::validate(set);
    if issues.is_empty() {
        println!("Parameters are valid.");
        return Ok(());
    }
    println!("Found {} invalid parameter(s):", issues.len());
    for issue in &issues {
        println!("  - {}", issue);
    }
    anyhow::bail!("validation failed")
}

pub fn run_sensitivity(
    set: &ParameterSet,
    parameter: SensitivityParameter,
    variations: &[f64],
) -> Result<()> {
    validation::ensure_valid(set).context("Parameters rejected")?;
    let points = sensitivity::sensitivity(set, parameter, variations);

    println!("\n--- [Sensitivity] {} ---", parameter);
    println!(
        "{:>10} | {:>14} | {:>10} | {:>16} | {:>10}",
        "Change", "Value", "ROI", "NPV", "Payback"
    );
    for point in points {
        let payback = if point.payback_reached {
            format!("{:.2} y", point.payback_years)
        } else {
            "not reached".to_string()
        };
        println!(
            "{:>9.0}% | {:>14.2} | {:>9.1}% | {:>16.2} | {:>10}",
            point.variation_pct, point.value, point.roi_pct, point.npv, payback
        );
    }
    Ok(())
}

/// Writes YAML for `set` to `out`, or prints it.
pub fn write_parameter_file(set: &ParameterSet, out: Option<&Path>) -> Result<()> {
    write_output(&set.to_yaml()?, out)
}

pub fn write_output(content: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
            println!("Wrote '{}'", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

pub fn list_scenarios<S: KeyValueStore>(archive: &ScenarioArchive<S>) {
    let scenarios = archive.list();
    if scenarios.is_empty() {
        println!("No saved scenarios.");
        return;
    }
    println!(
        "{:<15} | {:<30} | {:>8} | {:>10} | {:<24}",
        "Id", "Name", "ROI", "Payback", "Created"
    );
    for s in scenarios {
        println!(
            "{:<15} | {:<30} | {:>7.1}% | {:>8.2} y | {:<24}",
            s.id, s.name, s.summary.roi_pct, s.summary.payback_years, s.created_at
        );
    }
}

pub fn save_scenario<S: KeyValueStore>(
    archive: &mut ScenarioArchive<S>,
    name: &str,
    set: &ParameterSet,
) -> Result<()> {
    validation::ensure_valid(set).context("Parameters rejected")?;
    let projection = set.project();
    let id = archive.save(name, set, &projection.summary)?;
    println!("Saved scenario '{}' as {}", name, id);
    Ok(())
}

pub fn compare_scenarios<S: KeyValueStore>(
    archive: &ScenarioArchive<S>,
    first: &str,
    second: &str,
) -> Result<()> {
    let comparison = archive.compare(first, second)?;
    println!("\n--- [Comparison] {} vs {} ---", comparison.first_id, comparison.second_id);
    for (label, delta) in [
        ("ROI (%)", comparison.roi_pct),
        ("Payback (years)", comparison.payback_years),
        ("Investment", comparison.initial_investment),
        ("NPV", comparison.npv),
    ] {
        println!(
            "  - {:<16} {:>14.2} | {:>14.2} | difference {:>+14.2}",
            label, delta.first, delta.second, delta.difference
        );
    }
    Ok(())
}

pub fn import_scenarios<S: KeyValueStore>(
    archive: &mut ScenarioArchive<S>,
    file: &Path,
) -> Result<usize> {
    let json = fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;
    let count = archive
        .import_json(&json)
        .with_context(|| format!("{:?} is not a scenario list", file))?;
    Ok(count)
}

fn print_summary_report(projection: &Projection) {
    let s = &projection.summary;
    let verdict = Verdict::assess(s.roi_pct, &s.payback);

    println!("\n\n--- [Final Summary Report] ---");
    println!("========================================");
    println!("Investment:");
    println!("  - Initial Investment:       ${:.2}", s.initial_investment);
    println!("  - Total Cash Flow:          ${:.2}", s.total_cash_flow);
    println!("  - Average Annual Saving:    ${:.2}", s.average_annual_saving);

    println!("\nProfitability:");
    println!("  - ROI:                      {:.1} %", s.roi_pct);
    println!("  - Discounted ROI:           {:.1} %", s.discounted_roi_pct);
    println!("  - NPV:                      ${:.2}", s.npv);
    match s.irr {
        IrrEstimate::Bounded { rate_pct } => {
            println!("  - IRR:                      {:.0} %", rate_pct)
        }
        IrrEstimate::AboveScanRange => println!("  - IRR:                      > 100 %"),
    }
    println!("  - Profitability Index:      {:.2}", s.profitability_index);
    if s.payback.reached {
        println!("  - Payback:                  {:.2} years", s.payback.years);
    } else {
        println!(
            "  - Payback:                  not reached within {:.0} years",
            s.payback.years
        );
    }

    println!("\nOperations:");
    println!("  - Production Delta:         {:.0} units/year", s.production_delta);
    println!("  - Cost per Unit:            ${:.2} -> ${:.2}", s.operational.current_cost_per_unit, s.operational.automated_cost_per_unit);
    println!("  - CO2 Avoided:              {:.1} t", s.co2_tonnes_saved);
    println!("----------------------------------------");
    println!("Verdict: {}", verdict);
    println!("========================================");
}
