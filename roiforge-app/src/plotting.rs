//! Charts for a projection run, drawn from the cash-flow log.

use anyhow::Result;
use plotters::prelude::*;
use roiforge_schemas::results::YearlyCashFlowEntry;
use std::path::Path;

/// Renders `cash_flow.png` and `savings_breakdown.png` into `output_dir`.
pub fn generate_all_plots(
    output_dir: &Path,
    entries: &[YearlyCashFlowEntry],
    initial_investment: f64,
) -> Result<()> {
    if entries.is_empty() {
        tracing::warn!(target: "roi.report", "No cash-flow rows to plot");
        return Ok(());
    }

    plot_cash_flow(output_dir, entries, initial_investment)?;
    plot_savings_breakdown(output_dir, &entries[0])?;

    println!("[Plotting] Charts have been saved to '{}'.", output_dir.display());
    Ok(())
}

/// Annual cash flow as bars, cumulative cash flow as a line, and the
/// investment as a dashed threshold: payback is where the line crosses it.
fn plot_cash_flow(
    output_dir: &Path,
    entries: &[YearlyCashFlowEntry],
    initial_investment: f64,
) -> Result<()> {
    let path = output_dir.join("cash_flow.png");
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let years = entries.len() as f64;
    let y_max = entries
        .iter()
        .map(|e| e.cumulative_cash_flow.max(e.annual_cash_flow))
        .fold(initial_investment, f64::max);
    let y_min = entries
        .iter()
        .map(|e| e.cumulative_cash_flow.min(e.annual_cash_flow))
        .fold(0.0, f64::min);

    let mut chart = ChartBuilder::on(&root)
        .caption("Cash Flow Over the Useful Life", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(0.5f64..years + 0.5, y_min * 1.1..y_max * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Amount ($)")
        .x_labels(entries.len())
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}k", y / 1000.0))
        .draw()?;

    let bar_color = BLUE.mix(0.6);
    chart
        .draw_series(entries.iter().map(|e| {
            let x = e.year as f64;
            Rectangle::new([(x - 0.35, 0.0), (x + 0.35, e.annual_cash_flow)], bar_color.filled())
        }))?
        .label("Annual cash flow")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], bar_color.filled()));

    chart
        .draw_series(LineSeries::new(
            entries.iter().map(|e| (e.year as f64, e.cumulative_cash_flow)),
            RED.stroke_width(3),
        ))?
        .label("Cumulative cash flow")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.filled()));

    chart
        .draw_series(DashedLineSeries::new(
            vec![(0.5, initial_investment), (years + 0.5, initial_investment)],
            5,
            5,
            (&BLACK).into(),
        ))?
        .label("Initial investment")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Year-one savings by source.
fn plot_savings_breakdown(output_dir: &Path, first_year: &YearlyCashFlowEntry) -> Result<()> {
    let path = output_dir.join("savings_breakdown.png");
    let root = BitMapBackend::new(&path, (1280, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let terms = [
        ("Labor", first_year.labor_saving),
        ("Waste", first_year.waste_saving),
        ("Rejects", first_year.reject_saving),
        ("Maint.", first_year.maintenance_saving),
        ("Energy", first_year.energy_saving),
        ("Process energy", first_year.process_energy_saving),
        ("Water", first_year.water_saving),
        ("Production", first_year.production_benefit),
        ("Quality", first_year.quality_benefit),
        ("Safety", first_year.safety_saving),
        ("Accident downtime", first_year.accident_downtime_saving),
        ("Unplanned downtime", first_year.unplanned_downtime_saving),
    ];
    let y_max = terms.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let y_min = terms.iter().map(|(_, v)| *v).fold(0.0, f64::min);

    let mut chart = ChartBuilder::on(&root)
        .caption("Year-One Savings by Source", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(
            (0usize..terms.len()).into_segmented(),
            y_min * 1.1..y_max * 1.1 + 1.0,
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Amount ($)")
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => terms.get(*i).map_or(String::new(), |(n, _)| n.to_string()),
            _ => String::new(),
        })
        .y_label_formatter(&|y| format!("{:.0}k", y / 1000.0))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(GREEN.mix(0.7).filled())
            .margin(10)
            .data(terms.iter().enumerate().map(|(i, (_, v))| (i, *v))),
    )?;

    root.present()?;
    Ok(())
}
