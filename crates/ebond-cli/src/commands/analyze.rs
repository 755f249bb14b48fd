//! Analyze command - statistics and time series for a record table.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use console::{Term, style};
use serde::Serialize;
use tracing::debug;

use ebond_core::analytics::{
    entity_series, entity_totals, monthly_totals, summarize, yearly_totals, EntityTotal,
    MonthTotal, SeriesPoint, YearTotal,
};
use ebond_core::{EntityFilter, Summary, Table, TableCache, Variant};

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Table written by `ebond convert`
    #[arg(required = true)]
    input: PathBuf,

    /// Entity names to trace over time (comma separated for purchasers,
    /// pipe separated for encashers)
    #[arg(short, long)]
    entities: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Show at most this many rows of per-entity totals (0 = all)
    #[arg(long, default_value = "0")]
    limit: usize,

    /// After the report, read entity filters from stdin, one per line, and
    /// print each one's history until a blank line
    #[arg(short, long)]
    interactive: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text tables
    Text,
    /// JSON output
    Json,
}

/// Everything the analyze command reports.
#[derive(Serialize)]
struct Analysis {
    variant: Variant,
    summary: Summary,
    yearly: Vec<YearTotal>,
    monthly: Vec<MonthTotal>,
    entities: Vec<EntityTotal>,
    selected: Vec<String>,
    series: Vec<SeriesPoint>,
}

/// Answer to one interactive query.
#[derive(Serialize)]
struct Query {
    selected: Vec<String>,
    series: Vec<SeriesPoint>,
}

pub fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::config::load_config(config_path)?;

    let mut cache = TableCache::new();
    let table = cache
        .get(&args.input)
        .with_context(|| format!("Failed to load table {}", args.input.display()))?;

    let filter_text = args
        .entities
        .as_deref()
        .unwrap_or_else(|| config.analytics.filter_for(table.variant));
    let filter = EntityFilter::for_variant(filter_text, table.variant);

    let analysis = analyze(&table, &filter)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Text => print_text(&analysis, args.limit),
    }

    if args.interactive {
        query_loop(&mut cache, &args.input, args.format)?;
    }

    Ok(())
}

/// Answer entity history queries against the cached table.
///
/// The file is parsed again only if it changes between queries.
fn query_loop(cache: &mut TableCache, path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let term = Term::stderr();
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        if term.is_term() {
            term.write_str(&format!("{} ", style("names>").cyan()))?;
        }
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }

        let table = cache
            .get(path)
            .with_context(|| format!("Failed to load table {}", path.display()))?;
        let filter = EntityFilter::for_variant(&line, table.variant);
        let query = Query {
            selected: filter.names().map(str::to_string).collect(),
            series: entity_series(table.records(), &filter),
        };

        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&query)?),
            OutputFormat::Text => print_series(&query.selected, &query.series),
        }
    }

    debug!(loads = cache.loads(), "Query loop finished");
    Ok(())
}

fn analyze(table: &Table, filter: &EntityFilter) -> anyhow::Result<Analysis> {
    let summary = summarize(table.records()).context("Failed to compute statistics")?;

    Ok(Analysis {
        variant: table.variant,
        summary,
        yearly: yearly_totals(table.records()),
        monthly: monthly_totals(table.records()),
        entities: entity_totals(table.records()),
        selected: filter.names().map(str::to_string).collect(),
        series: entity_series(table.records(), filter),
    })
}

fn heading(text: &str) {
    println!();
    println!("{}", style(text).bold().underlined());
}

fn print_text(analysis: &Analysis, limit: usize) {
    let s = &analysis.summary;
    let noun = match analysis.variant {
        Variant::Purchaser => "Purchasers",
        Variant::Encasher => "Encashers",
    };

    heading(&format!("{} Details Analysis", noun.trim_end_matches('s')));
    println!("Records:                     {}", s.records);
    println!("Number of Unique {noun}:  {}", s.unique_entities);
    println!("Sum of Denomination:         ₹ {}", s.total);
    println!("Mean Denomination:           ₹ {}", s.mean);
    println!("Median Denomination:         ₹ {}", s.median);
    println!("1st Quartile of Denomination: ₹ {}", s.q1);
    println!("3rd Quartile of Denomination: ₹ {}", s.q3);
    println!("Interquartile Range:         ₹ {}", s.iqr);

    heading("Quantiles (nearest rank)");
    for q in &s.quantiles {
        println!("  {:>4.2}  {:>12}", q.fraction, q.denomination);
    }

    heading("Sum of Denomination by Year");
    for y in &analysis.yearly {
        println!("  {}  {:>14}", y.year, y.total);
    }

    heading("Sum of Denomination by Month-Year");
    for m in &analysis.monthly {
        println!("  {}  {:>14}", m.label, m.total);
    }

    heading("Sum of Denomination by Name, with Dates (latest first)");
    let shown = if limit == 0 { analysis.entities.len() } else { limit };
    for e in analysis.entities.iter().take(shown) {
        println!("  {}  {:>14}  [{}]", e.entity, e.total, e.formatted_dates().join(", "));
    }
    if shown < analysis.entities.len() {
        println!(
            "  {}",
            style(format!("... {} more", analysis.entities.len() - shown)).dim()
        );
    }

    if !analysis.selected.is_empty() {
        print_series(&analysis.selected, &analysis.series);
    }
}

fn print_series(selected: &[String], series: &[SeriesPoint]) {
    heading("History of Selected Names");
    println!("  {}", selected.join(" | "));
    if series.is_empty() {
        println!("  {}", style("no matching records").yellow());
    }
    for p in series {
        println!("  {}  {}  {:>14}", p.label, p.entity, p.total);
    }
}
