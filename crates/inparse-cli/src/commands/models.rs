//! Models command - download and manage OCR models.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use futures_util::StreamExt;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use inparse_core::models::config::ModelConfig;

use super::{load_config, resolve_model_dir};

/// Arguments for the models command.
#[derive(Args)]
pub struct ModelsArgs {
    /// Model directory (default: configured directory, else the user data directory)
    #[arg(short, long, global = true)]
    model_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: ModelsCommand,
}

#[derive(Subcommand)]
enum ModelsCommand {
    /// Download the detection, recognition, and dictionary files
    Download(DownloadArgs),

    /// Check which model files are present
    Status,

    /// Remove downloaded models
    Clean,
}

#[derive(Args)]
struct DownloadArgs {
    /// Force re-download even if files exist
    #[arg(long)]
    force: bool,

    /// Base URL to download from (overrides models.source_url)
    #[arg(long)]
    source_url: Option<String>,
}

pub async fn run(args: ModelsArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let model_dir = resolve_model_dir(&config, args.model_dir);

    match args.command {
        ModelsCommand::Download(download_args) => {
            download_models(&config.models, &model_dir, download_args).await
        }
        ModelsCommand::Status => check_status(&config.models, &model_dir).map(|_| ()),
        ModelsCommand::Clean => clean_models(&config.models, &model_dir),
    }
}

fn model_url(base: &str, file: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), file)
}

async fn download_models(
    models: &ModelConfig,
    output_dir: &Path,
    args: DownloadArgs,
) -> anyhow::Result<()> {
    fs::create_dir_all(output_dir)?;
    let base = args.source_url.as_deref().unwrap_or(&models.source_url);

    println!(
        "{} Downloading models to {}",
        style("ℹ").blue(),
        output_dir.display()
    );
    println!();

    let client = reqwest::Client::builder()
        .user_agent(concat!("inparse-cli/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(300))
        .build()?;

    let multi_progress = MultiProgress::new();
    let style_template = ProgressStyle::default_bar()
        .template("  {spinner:.green} {msg:<30} [{bar:25.cyan/blue}] {bytes}/{total_bytes}")?
        .progress_chars("=>-");

    let mut success_count = 0;
    let mut skip_count = 0;
    let mut error_count = 0;

    for file in models.files() {
        let path = output_dir.join(file);

        if !args.force && is_present(&path) {
            println!("  {} {} (already exists)", style("✓").green(), file);
            skip_count += 1;
            continue;
        }

        let pb = multi_progress.add(ProgressBar::new(0));
        pb.set_style(style_template.clone());
        pb.set_message(file.to_string());

        match download_file(&client, &model_url(base, file), &path, &pb).await {
            Ok(()) => {
                pb.finish_with_message(format!("{} {}", style("✓").green(), file));
                success_count += 1;
            }
            Err(e) => {
                pb.finish_with_message(format!("{} {} - {}", style("✗").red(), file, e));
                error_count += 1;
            }
        }
    }

    println!();

    if error_count == 0 {
        println!("{} Models ready", style("✓").green().bold());
        if skip_count > 0 {
            println!(
                "   {} downloaded, {} already present",
                success_count, skip_count
            );
        }
    } else {
        println!(
            "{} Download completed with errors",
            style("⚠").yellow().bold()
        );
        println!(
            "   {} downloaded, {} skipped, {} failed",
            success_count, skip_count, error_count
        );
        println!();
        println!("Retry with: inparse models download --force");
    }

    println!();
    check_status(models, output_dir)?;

    if error_count > 0 {
        anyhow::bail!("{} model file(s) failed to download", error_count);
    }

    Ok(())
}

async fn download_file(
    client: &reqwest::Client,
    url: &str,
    path: &Path,
    pb: &ProgressBar,
) -> anyhow::Result<()> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP {}", response.status());
    }

    if let Some(content_length) = response.content_length() {
        pb.set_length(content_length);
    }

    // Write beside the target and rename, so a broken download never looks complete
    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;

    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }

    file.flush()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

fn is_present(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file() && m.len() > 0).unwrap_or(false)
}

/// Print one line per model file. Returns whether all are present.
fn check_status(models: &ModelConfig, model_dir: &Path) -> anyhow::Result<bool> {
    println!("{}", style("Model Status").bold());
    println!("Directory: {}", model_dir.display());
    println!();

    let mut all_present = true;
    let mut total_size: u64 = 0;

    for file in models.files() {
        let path = model_dir.join(file);
        let (status, size_str) = if is_present(&path) {
            let size = fs::metadata(&path)?.len();
            total_size += size;
            (style("✓").green(), format_size(size))
        } else {
            all_present = false;
            (style("✗").red(), "missing".to_string())
        };

        println!("    {} {:<25} {:>10}", status, file, size_str);
    }

    println!();
    if all_present {
        println!(
            "    {} Ready ({} total)",
            style("✓").green(),
            format_size(total_size)
        );
    } else {
        println!(
            "    {} Run 'inparse models download' to download",
            style("⚠").yellow()
        );
    }

    Ok(all_present)
}

fn clean_models(models: &ModelConfig, model_dir: &Path) -> anyhow::Result<()> {
    if !model_dir.exists() {
        println!("{} No model files to remove.", style("ℹ").blue());
        return Ok(());
    }

    let mut total_removed = 0;
    let mut total_freed: u64 = 0;

    for file in models.files() {
        let path = model_dir.join(file);
        if path.exists() {
            let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            fs::remove_file(&path)?;
            total_removed += 1;
            total_freed += size;
            println!("  {} Removed {}", style("✓").green(), file);
        }
    }

    // Leftovers from interrupted downloads
    if let Ok(entries) = fs::read_dir(model_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map(|e| e == "tmp").unwrap_or(false) {
                let _ = fs::remove_file(&path);
            }
        }
    }

    if total_removed > 0 {
        println!();
        println!(
            "{} Removed {} files, freed {}",
            style("✓").green(),
            total_removed,
            format_size(total_freed)
        );
    } else {
        println!("{} No model files to remove.", style("ℹ").blue());
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1_000_000_000 {
        format!("{:.1}GB", bytes as f64 / 1_000_000_000.0)
    } else if bytes >= 1_000_000 {
        format!("{:.1}MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1}KB", bytes as f64 / 1_000.0)
    } else {
        format!("{}B", bytes)
    }
}
