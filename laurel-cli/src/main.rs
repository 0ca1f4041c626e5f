//! Laurel CLI
//!
//! Reads a CSV of recipients and writes one PNG certificate per row.
//!
//! Usage:
//!   laurel [CSV]                      Generate into ./certificates
//!   laurel data.csv -o out/           Choose the output directory
//!   laurel data.csv -t frame.png      Use a static background
//!   laurel data.csv -c laurel.toml    Load settings from a file

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use laurel_batch::{BatchDriver, BatchError, Config, RecipientTable, STANDARD_COLUMNS};
use laurel_common::warning::clear_warnings;
use laurel_paint::FontWeight;
use laurel_render::FontBook;
use owo_colors::OwoColorize;

/// Settings file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "laurel.toml";

/// Laurel: batch certificate generator
#[derive(Parser, Debug)]
#[command(name = "laurel")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Generate certificates for sample_data.csv into ./certificates
    laurel

    # Custom input and output directory
    laurel students.csv -o graduates/

    # Use a static background image (PNG, JPEG, SVG, ...)
    laurel students.csv -t background.png

    # Larger canvas and a specific font
    laurel students.csv --width 2100 --height 1500 --font ~/fonts/Lora.ttf
"#)]
struct Cli {
    /// CSV file with a header row; `name` is required
    #[arg(value_name = "CSV", default_value = "sample_data.csv")]
    input: PathBuf,

    /// Directory to write certificates to (created if absent)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Static background image used instead of the generated template
    #[arg(short, long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// TOML settings file (default: ./laurel.toml if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Width of the generated template in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Height of the generated template in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,

    /// Font file to try first for regular text (repeatable)
    #[arg(long, value_name = "FILE")]
    font: Vec<PathBuf>,

    /// Font file to try first for bold text (repeatable)
    #[arg(long, value_name = "FILE")]
    bold_font: Vec<PathBuf>,

    /// Only print the summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    let config = resolve_config(&cli)?;

    println!("{}", "🎓 Laurel certificate generator".bold());
    println!("   Input:  {}", cli.input.display());
    println!("   Output: {}", config.output_dir.display());

    let table = match RecipientTable::from_path(&cli.input) {
        Ok(table) => table,
        Err(BatchError::InputNotFound(path)) => {
            report_missing_input(&path);
            std::process::exit(1);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load '{}'", cli.input.display()));
        }
    };
    println!("   Records: {}", table.len());
    println!();

    let fonts = FontBook::load(&config.fonts);
    let driver = BatchDriver::new(config, &fonts).context("Failed to prepare the batch")?;

    let quiet = cli.quiet;
    let summary = driver
        .run(&table, |generated| {
            if !quiet {
                let file = generated
                    .path
                    .file_name()
                    .map_or_else(|| generated.path.display().to_string(), |name| {
                        name.to_string_lossy().into_owned()
                    });
                println!("{} Generated: {file}", "✓".green());
            }
        })
        .context("Batch stopped")?;

    println!();
    println!(
        "{} Generated {} certificate(s) in {}",
        "✓".green().bold(),
        summary.count(),
        summary.output_dir.display()
    );
    Ok(())
}

/// Load the settings file (if any) and apply command-line overrides.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            Config::from_file(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("Failed to load config '{DEFAULT_CONFIG_FILE}'"))?
        }
        None => Config::default(),
    };

    if let Some(output) = &cli.output {
        config.output_dir.clone_from(output);
    }
    if let Some(template) = &cli.template {
        config.template = Some(template.clone());
    }
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }
    // Reverse so the first flag ends up first in line.
    for path in cli.font.iter().rev() {
        config.fonts.prefer(FontWeight::Regular, path.clone());
    }
    for path in cli.bold_font.iter().rev() {
        config.fonts.prefer(FontWeight::Bold, path.clone());
    }

    Ok(config)
}

fn report_missing_input(path: &Path) {
    eprintln!(
        "{} CSV file '{}' not found",
        "✗ Error:".red().bold(),
        path.display()
    );
    eprintln!(
        "  Expected a header row with the columns {} ({} required); \
         any other column is printed as a custom field.",
        STANDARD_COLUMNS.join(", "),
        "name".bold()
    );
}
