//! Extract command - run the pipeline on one local file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use inparse_core::{
    process_document, Document, DocumentTextSource, ExtractedInvoice, InvoiceParser,
};

use super::{load_config, resolve_model_dir};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF, JPEG, or PNG)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// List the fields that could not be extracted
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON object with the four fields
    Json,
    /// CSV with a header row
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let document = Document::from_path(&args.input)?;
    info!("Processing file: {}", args.input.display());

    if document.media_type.is_image() {
        let model_dir = resolve_model_dir(&config, args.model_dir.clone());
        let missing: Vec<&str> = config
            .models
            .files()
            .into_iter()
            .filter(|file| !model_dir.join(file).exists())
            .collect();

        if !missing.is_empty() {
            anyhow::bail!(
                "OCR models not found at {} (missing {}).\n\n\
                 Run 'inparse models download' to download them.",
                model_dir.display(),
                missing.join(", ")
            );
        }
        config.models.model_dir = model_dir;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(if document.media_type.is_image() {
        "Running OCR..."
    } else {
        "Reading PDF text..."
    });
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let source = DocumentTextSource::from_config(&config);
    let result = process_document(&source, &InvoiceParser::new(), &document);
    pb.finish_and_clear();
    let result = result?;

    let output = format_invoice(&result.invoice, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_warnings {
        for warning in &result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_invoice(invoice: &ExtractedInvoice, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(invoice)?),
        OutputFormat::Csv => format_csv(invoice),
        OutputFormat::Text => Ok(format_text(invoice)),
    }
}

fn format_csv(invoice: &ExtractedInvoice) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["invoice_number", "date", "vendor", "total"])?;
    wtr.write_record([
        invoice.invoice_number.as_deref().unwrap_or_default(),
        invoice.date.as_deref().unwrap_or_default(),
        invoice.vendor.as_deref().unwrap_or_default(),
        invoice.total.as_deref().unwrap_or_default(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(invoice: &ExtractedInvoice) -> String {
    let mut output = String::new();

    for (label, value) in [
        ("Vendor", &invoice.vendor),
        ("Invoice", &invoice.invoice_number),
        ("Date", &invoice.date),
        ("Total", &invoice.total),
    ] {
        output.push_str(&format!("{:<8} {}\n", format!("{}:", label), value.as_deref().unwrap_or("-")));
    }

    output
}
