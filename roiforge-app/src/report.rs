//! Markdown report for a projection run.

use chrono::{DateTime, Utc};
use roiforge_core::{analysis::Verdict, ParameterSet};
use roiforge_schemas::results::{IrrEstimate, PaybackPeriod, Projection};
use std::fmt::Write;

const PAGE_BREAK: &str = "\n<div style=\"page-break-after: always;\"></div>\n\n";

fn payback_text(payback: &PaybackPeriod) -> String {
    if payback.reached {
        format!("{:.2} years", payback.years)
    } else {
        format!("not recovered within {:.0} years", payback.years)
    }
}

fn irr_text(irr: &IrrEstimate) -> String {
    match irr {
        IrrEstimate::Bounded { rate_pct } => format!("{:.0} %", rate_pct),
        IrrEstimate::AboveScanRange => "above 100 %".to_string(),
    }
}

fn row(out: &mut String, label: &str, value: String) {
    let _ = writeln!(out, "| {} | {} |", label, value);
}

pub fn render_report(set: &ParameterSet, projection: &Projection, generated_at: DateTime<Utc>) -> String {
    let s = &projection.summary;
    let mut out = String::new();

    let _ = writeln!(out, "# Automation ROI Report\n");
    let _ = writeln!(
        out,
        "Industry: {} | Current line: {} | Generated: {}\n",
        set.industry,
        set.system_type,
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    out.push_str("## Key Indicators\n\n| Indicator | Value |\n|---|---|\n");
    row(&mut out, "Initial investment", format!("${:.2}", s.initial_investment));
    row(&mut out, "Total cash flow", format!("${:.2}", s.total_cash_flow));
    row(&mut out, "ROI", format!("{:.1} %", s.roi_pct));
    row(&mut out, "Discounted ROI", format!("{:.1} %", s.discounted_roi_pct));
    row(&mut out, "Payback", payback_text(&s.payback));
    row(&mut out, "Discounted payback", payback_text(&s.discounted_payback));
    row(&mut out, "NPV", format!("${:.2}", s.npv));
    row(&mut out, "IRR", irr_text(&s.irr));
    row(&mut out, "Profitability index", format!("{:.2}", s.profitability_index));
    row(&mut out, "Average annual saving", format!("${:.2}", s.average_annual_saving));
    row(&mut out, "CO2 avoided", format!("{:.1} t", s.co2_tonnes_saved));
    row(&mut out, "Production delta", format!("{:.0} units/year", s.production_delta));
    row(
        &mut out,
        "Total cost of ownership",
        format!("${:.2}", s.operational.total_cost_of_ownership),
    );
    out.push_str(PAGE_BREAK);

    let current = &set.current;
    out.push_str("## Current System\n\n| Parameter | Value |\n|---|---|\n");
    row(&mut out, "Capacity", format!("{:.1} units/h ({:.1} s/unit)", current.capacity, current.cycle_time));
    row(&mut out, "Headcount", format!("{:.1}", current.headcount));
    row(&mut out, "Maintenance", format!("${:.2}/year", current.maintenance_cost));
    row(&mut out, "Energy", format!("${:.2}/year", current.energy_cost));
    row(&mut out, "Reject rate", format!("{:.1} %", current.reject_rate_pct));
    row(&mut out, "Production loss", format!("{:.1} %", current.production_loss_pct));
    row(
        &mut out,
        "Accidents",
        format!(
            "{:.1}/year at ${:.2}, {:.0} h downtime each",
            current.accident_frequency, current.cost_per_accident, current.downtime_per_accident
        ),
    );

    let automated = &set.automated;
    out.push_str("\n## Automated System\n\n| Parameter | Value |\n|---|---|\n");
    row(&mut out, "System cost", format!("${:.2}", automated.system_cost));
    row(
        &mut out,
        "Installation / engineering / training",
        format!(
            "${:.2} / ${:.2} / ${:.2}",
            automated.installation_cost, automated.engineering_cost, automated.training_cost
        ),
    );
    row(&mut out, "Subsidies", format!("${:.2}", automated.subsidies));
    row(&mut out, "Useful life", format!("{} years", automated.useful_life));
    row(&mut out, "Capacity", format!("{:.1} units/h ({:.1} s/unit)", automated.capacity, automated.cycle_time));
    row(
        &mut out,
        "Headcount replaced",
        format!("{:.1} at ${:.2}/year", automated.headcount_replaced, automated.labor_cost),
    );
    row(&mut out, "Maintenance", format!("${:.2}/year", automated.maintenance_cost));
    row(&mut out, "Energy", format!("${:.2}/year", automated.energy_cost));
    row(&mut out, "Other recurring costs", format!("${:.2}/year", automated.hidden_costs()));

    let general = &set.general;
    out.push_str("\n## General Assumptions\n\n| Parameter | Value |\n|---|---|\n");
    row(&mut out, "Margin", format!("${:.2}/unit", general.margin_per_unit));
    row(&mut out, "Annual volume", format!("{:.0}", general.annual_volume));
    row(&mut out, "Inflation", format!("{:.1} %", general.inflation_rate_pct));
    row(&mut out, "Discount rate", format!("{:.1} %", general.discount_rate_pct));
    row(
        &mut out,
        "Operating time",
        format!("{:.0} h/day, {:.0} days/year", general.hours_per_day, general.days_per_year),
    );
    out.push_str(PAGE_BREAK);

    out.push_str("## Cash Flow\n\n![Cash flow](cash_flow.png)\n\n");
    out.push_str("| Year | Gross savings | Operating costs | Cash flow | Discounted | Cumulative |\n");
    out.push_str("|---:|---:|---:|---:|---:|---:|\n");
    for entry in &projection.cash_flow {
        let _ = writeln!(
            out,
            "| {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |",
            entry.year,
            entry.gross_savings(),
            entry.operating_costs(),
            entry.annual_cash_flow,
            entry.discounted_cash_flow,
            entry.cumulative_cash_flow
        );
    }
    out.push_str("\n![Year-one savings](savings_breakdown.png)\n");
    out.push_str(PAGE_BREAK);

    let verdict = Verdict::assess(s.roi_pct, &s.payback);
    let _ = writeln!(out, "## Conclusion\n\nVerdict: **{}**\n\n{}", verdict, verdict.conclusion());

    out
}
