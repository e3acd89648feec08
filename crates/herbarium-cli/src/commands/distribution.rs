//! Distribution command - convert USDA distribution CSV exports to FIPS JSON.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use herbarium_core::distribution::convert_distribution_csv;

/// Arguments for the distribution command.
#[derive(Args)]
pub struct DistributionArgs {
    /// Input distribution CSV export
    #[arg(required = true)]
    input: PathBuf,

    /// Output JSON file (default: input path with .json extension)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: DistributionArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Converting distribution data from {}", args.input.display());

    let raw = fs::read_to_string(&args.input)?;
    let data = convert_distribution_csv(&raw)?;

    let output_path = args
        .output
        .unwrap_or_else(|| args.input.with_extension("json"));

    fs::write(&output_path, serde_json::to_string_pretty(&data)?)?;

    println!(
        "{} {} states, {} counties written to {}",
        style("✓").green(),
        data.states_fips.len(),
        data.fips_codes.len(),
        output_path.display()
    );

    Ok(())
}
