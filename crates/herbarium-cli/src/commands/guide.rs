//! Guide command - parse a USDA plant guide into structured sections.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use indicatif::ProgressBar;
use tracing::info;

use herbarium_core::extract::PlantExtractor;
use herbarium_core::models::config::HerbariumConfig;
use herbarium_core::pdf::parse_guide;

use super::extract::read_pdf_text;

/// Arguments for the guide command.
#[derive(Args)]
pub struct GuideArgs {
    /// Input plant guide (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also run attribute extraction over the guide sections
    #[arg(long)]
    fields: bool,
}

pub async fn run(args: GuideArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = if let Some(path) = config_path {
        HerbariumConfig::from_file(Path::new(path))?
    } else {
        HerbariumConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "pdf" => read_pdf_text(&args.input, &config, &ProgressBar::hidden())?,
        _ => fs::read_to_string(&args.input)?,
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text could be read from {}", args.input.display());
    }

    info!("Parsing guide sections from {} characters", text.len());
    let profile = parse_guide(&text);

    let output = if args.fields {
        let extractor = PlantExtractor::new()
            .with_validation(config.extraction.validate)
            .with_min_confidence(config.extraction.min_field_confidence);
        let record = extractor.extract_from_guide(&profile);
        serde_json::to_string_pretty(&serde_json::json!({
            "guide": profile,
            "fields": record,
        }))?
    } else {
        serde_json::to_string_pretty(&profile)?
    };

    if let Some(output_path) = &args.output {
        match (&profile.common_name, &profile.scientific_name) {
            (Some(common), Some(scientific)) => {
                println!("{} {} ({})", style("ℹ").blue(), common, scientific);
            }
            (Some(name), None) | (None, Some(name)) => {
                println!("{} {}", style("ℹ").blue(), name);
            }
            (None, None) => {}
        }
        fs::write(output_path, &output)?;
        println!(
            "{} Guide profile written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
