mod data;
mod state;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use state::DashboardState;

/// Filtered counts, distributions, and a paged listing over an
/// electric-vehicle population export.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the dataset (.csv or .json)
    path: PathBuf,

    /// Only include vehicles of this model year
    #[arg(long)]
    year: Option<u16>,

    /// Only include vehicles of this make (case-sensitive)
    #[arg(long)]
    make: Option<String>,

    /// Page of the record table to print (1-based, clamped into range)
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page
    #[arg(long, default_value_t = state::DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Emit the whole report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut dash = DashboardState::default();
    dash.page_size = cli.page_size.max(1);

    let store = data::loader::load_file(&cli.path)
        .with_context(|| format!("loading {}", cli.path.display()))?;
    dash.set_store(store);

    dash.set_year(cli.year);
    dash.set_make(cli.make);
    dash.set_page(cli.page);

    if cli.json {
        print_json(&dash)?;
    } else {
        print_report(&dash);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Report rendering (stand-in for the presentation layer)
// ---------------------------------------------------------------------------

fn print_report(dash: &DashboardState) {
    let summary = dash.summary();
    println!("Vehicles: {}", summary.total_count);
    println!("Distinct makes: {}", summary.distinct_make_count);
    if summary.average_range.is_nan() {
        println!("Average electric range: n/a");
    } else {
        println!("Average electric range: {:.1} mi", summary.average_range);
    }

    println!();
    println!("By vehicle type:");
    for (vehicle_type, count) in dash.type_distribution() {
        println!("  {vehicle_type}: {count}");
    }

    println!();
    println!("Top makes:");
    for (make, count) in dash.top_makes() {
        println!("  {make}: {count}");
    }

    println!();
    println!("Average range by model year:");
    for (year, avg) in dash.range_by_year() {
        println!("  {year}: {avg:.1} mi");
    }

    println!();
    let page = dash.current_page();
    if page.total_count == 0 {
        println!("No matching vehicles.");
        return;
    }
    println!(
        "Vehicles {}-{} of {} (page {} of {}):",
        page.start_index,
        page.end_index,
        page.total_count,
        page.page_number,
        dash.page_count()
    );
    for rec in &page.items {
        let year = rec
            .model_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "----".to_string());
        println!(
            "  {year} {} {} ({}, {} County)",
            rec.make, rec.model, rec.city, rec.county
        );
    }
}

fn print_json(dash: &DashboardState) -> Result<()> {
    // NaN averages serialize as JSON null, which consumers treat as
    // "no data".
    let report = serde_json::json!({
        "summary": dash.summary(),
        "by_vehicle_type": dash.type_distribution(),
        "top_makes": dash.top_makes(),
        "range_by_year": dash.range_by_year(),
        "page": dash.current_page(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
