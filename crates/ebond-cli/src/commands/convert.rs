//! Convert command - extract records from a disclosure document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use ebond_core::models::config::{EbondConfig, NameCleanup};
use ebond_core::{ExtractionReport, PageSource, PdfExtractor, RecordExtractor, TableWriter, TextDump, Variant};

use super::VariantArg;

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input document (PDF, or text with form-feed page breaks)
    #[arg(required = true)]
    input: PathBuf,

    /// Which disclosure the document is
    #[arg(short = 't', long, value_enum)]
    variant: VariantArg,

    /// Output CSV file (default from config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum pages to read (overrides config)
    #[arg(long)]
    max_pages: Option<usize>,

    /// Remove only the first occurrence of the matched date and amount
    /// when deriving names
    #[arg(long)]
    first_occurrence: bool,
}

pub fn run(args: ConvertArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::config::load_config(config_path)?;
    let variant = Variant::from(args.variant);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Converting {} ({})", args.input.display(), variant);

    let pages = read_pages(&args, &config)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let mut extraction = config.extraction.clone();
    if args.first_occurrence {
        extraction.name_cleanup = NameCleanup::FirstOccurrence;
    }
    let extractor = RecordExtractor::from_config(&extraction);

    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} pages")?
            .progress_chars("##-"),
    );

    let mut report = ExtractionReport::default();
    for (i, page) in pages.iter().enumerate() {
        extractor.extract_page(i + 1, page, &mut report);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.file_for(variant).clone());

    let rows = TableWriter::new(variant)
        .write_path(&report.records, &output)
        .with_context(|| format!("Failed to write table {}", output.display()))?;

    print_report(&report);
    println!(
        "{} Wrote {} {} records to {}",
        style("✓").green(),
        rows,
        variant,
        output.display()
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_pages(args: &ConvertArgs, config: &EbondConfig) -> anyhow::Result<Vec<String>> {
    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let data = fs::read(&args.input)?;
    let max_pages = args.max_pages.unwrap_or(config.pdf.max_pages);

    let pages = match extension.as_str() {
        "pdf" => {
            let mut extractor = PdfExtractor::new()
                .with_empty_password(config.pdf.try_empty_password)
                .with_max_pages(max_pages);
            extractor.load(&data)?;
            debug!("PDF has {} pages", extractor.page_count());
            extractor.pages()?
        }
        "txt" | "text" => {
            let mut dump = TextDump::new().with_max_pages(max_pages);
            dump.load(&data)?;
            dump.pages()?
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    Ok(pages)
}

fn print_report(report: &ExtractionReport) {
    println!(
        "{} Scanned {} pages, {} without dates, {} segments dropped",
        style("ℹ").blue(),
        report.pages,
        report.empty_pages.len(),
        report.dropped_segments
    );

    if report.mismatches.is_empty() {
        return;
    }

    println!(
        "{}",
        style(format!(
            "{} pages with date/denomination count mismatches:",
            report.mismatches.len()
        ))
        .yellow()
    );
    for mismatch in &report.mismatches {
        println!(
            "  - page {}: {} dates, {} denominations",
            mismatch.page, mismatch.dates, mismatch.denominations
        );
    }
}
