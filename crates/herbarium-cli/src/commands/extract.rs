//! Extract command - pull plant attributes from a single file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use herbarium_core::extract::PlantExtractor;
use herbarium_core::html::html_to_text;
use herbarium_core::models::config::HerbariumConfig;
use herbarium_core::models::{DimensionRange, PlantRecord};
use herbarium_core::pdf::{PdfExtractor, PdfProcessor, PdfType};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF, HTML, or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Source URL recorded in the output metadata
    #[arg(long)]
    source_url: Option<String>,

    /// Skip validation warnings
    #[arg(long)]
    no_validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
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

    info!("Extracting from file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Reading input...");
    pb.set_position(10);

    let text = match extension.as_str() {
        "pdf" => read_pdf_text(&args.input, &config, &pb)?,
        "html" | "htm" => html_to_text(&fs::read_to_string(&args.input)?),
        _ => fs::read_to_string(&args.input)?,
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text could be read from {}", args.input.display());
    }

    pb.set_message("Extracting plant attributes...");
    pb.set_position(60);

    let mut extractor = PlantExtractor::new()
        .with_validation(config.extraction.validate && !args.no_validate)
        .with_min_confidence(config.extraction.min_field_confidence);
    if let Some(url) = &args.source_url {
        extractor = extractor.with_source_url(url.clone());
    }

    let record = extractor.extract(&text);

    pb.set_position(100);
    pb.finish_with_message("Done");

    let output = format_record(&record, args.format)?;

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

    if record.fields.is_empty() {
        eprintln!(
            "{} No plant attributes were recognized in the input",
            style("ℹ").blue()
        );
    }

    if !record.metadata.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &record.metadata.warnings {
            eprintln!("  - {}", warning);
        }
    }

    debug!("Total extraction time: {:?}", start.elapsed());

    Ok(())
}

/// Read text from a PDF, honoring the configured page limit.
pub(crate) fn read_pdf_text(
    path: &Path,
    config: &HerbariumConfig,
    pb: &ProgressBar,
) -> anyhow::Result<String> {
    pb.set_message("Loading PDF...");
    let data = fs::read(path)?;
    let mut extractor = PdfExtractor::new().with_min_text_length(config.pdf.min_text_length);
    extractor.load(&data)?;

    let page_count = extractor.page_count() as usize;
    debug!("PDF has {} pages", page_count);

    pb.set_message("Analyzing PDF...");
    pb.set_position(30);

    match extractor.analyze() {
        PdfType::Text => {}
        PdfType::Scanned => anyhow::bail!(
            "{} has no usable text layer (scanned document)",
            path.display()
        ),
        PdfType::Empty => anyhow::bail!("{} appears to be empty", path.display()),
    }

    pb.set_message("Extracting text...");
    pb.set_position(40);

    if config.pdf.max_pages > 0 && page_count > config.pdf.max_pages {
        warn!(
            "PDF has {} pages, truncating to the first {}",
            page_count, config.pdf.max_pages
        );
        let mut parts = Vec::with_capacity(config.pdf.max_pages);
        for page in 1..=config.pdf.max_pages {
            parts.push(extractor.extract_page_text(page as u32)?);
        }
        Ok(parts.join("\n"))
    } else {
        Ok(extractor.extract_text()?)
    }
}

pub(crate) fn format_record(record: &PlantRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &PlantRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "common_name",
        "scientific_name",
        "height_min_in",
        "height_max_in",
        "spread_min_in",
        "spread_max_in",
        "bloom_color",
        "bloom_time",
        "duration",
        "hardiness_zones",
        "usa_states",
        "canadian_provinces",
        "fields_extracted",
        "data_quality",
    ])?;

    let fields = &record.fields;
    wtr.write_record([
        fields.common_name.clone().unwrap_or_default(),
        fields.scientific_name.clone().unwrap_or_default(),
        fields
            .height
            .as_ref()
            .map(|r| r.min.to_string())
            .unwrap_or_default(),
        fields
            .height
            .as_ref()
            .map(|r| r.max.to_string())
            .unwrap_or_default(),
        fields
            .spread
            .as_ref()
            .map(|r| r.min.to_string())
            .unwrap_or_default(),
        fields
            .spread
            .as_ref()
            .map(|r| r.max.to_string())
            .unwrap_or_default(),
        fields.bloom_color.as_deref().unwrap_or_default().join("; "),
        fields.bloom_time.as_deref().unwrap_or_default().join("; "),
        fields
            .duration
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default(),
        fields
            .hardiness_zones
            .as_deref()
            .unwrap_or_default()
            .join("; "),
        fields.usa_states.as_deref().unwrap_or_default().join("; "),
        fields
            .canadian_provinces
            .as_deref()
            .unwrap_or_default()
            .join("; "),
        record.metadata.fields_extracted.to_string(),
        record.metadata.data_quality.to_string(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &PlantRecord) -> String {
    let fields = &record.fields;
    let mut output = String::new();

    match (&fields.common_name, &fields.scientific_name) {
        (Some(common), Some(scientific)) => {
            output.push_str(&format!("Plant: {} ({})\n", common, scientific));
        }
        (Some(common), None) => output.push_str(&format!("Plant: {}\n", common)),
        (None, Some(scientific)) => output.push_str(&format!("Plant: {}\n", scientific)),
        (None, None) => output.push_str("Plant: (unnamed)\n"),
    }
    output.push('\n');

    if let Some(height) = &fields.height {
        output.push_str(&format!("Height: {}\n", format_range(height)));
    }
    if let Some(spread) = &fields.spread {
        output.push_str(&format!("Spread: {}\n", format_range(spread)));
    }
    if let Some(duration) = &fields.duration {
        output.push_str(&format!("Duration: {}\n", duration));
    }
    if let Some(colors) = &fields.bloom_color {
        output.push_str(&format!("Bloom color: {}\n", colors.join(", ")));
    }
    if let Some(months) = &fields.bloom_time {
        output.push_str(&format!("Bloom time: {}\n", months.join(", ")));
    }
    if let Some(seasons) = &fields.bloom_period {
        output.push_str(&format!("Bloom period: {}\n", seasons.join(", ")));
    }
    if let Some(light) = &fields.light {
        let mut kinds = Vec::new();
        if light.full_sun {
            kinds.push("full sun");
        }
        if light.partial_sun {
            kinds.push("partial sun");
        }
        if light.partial_shade {
            kinds.push("partial shade");
        }
        if light.full_shade {
            kinds.push("full shade");
        }
        output.push_str(&format!("Light: {}\n", kinds.join(", ")));
    }
    if let Some(moisture) = &fields.moisture {
        let mut kinds = Vec::new();
        if moisture.dry {
            kinds.push("dry");
        }
        if moisture.medium {
            kinds.push("medium");
        }
        if moisture.moist {
            kinds.push("moist");
        }
        if moisture.wet {
            kinds.push("wet");
        }
        if moisture.drought_tolerant {
            kinds.push("drought tolerant");
        }
        output.push_str(&format!("Moisture: {}\n", kinds.join(", ")));
    }
    if let Some(soil) = &fields.soil {
        let types: Vec<String> = soil.types.iter().map(|t| t.to_string()).collect();
        output.push_str(&format!("Soil: {}\n", types.join(", ")));
    }
    if let Some(zones) = &fields.hardiness_zones {
        output.push_str(&format!("Hardiness zones: {}\n", zones.join(", ")));
    }
    if let Some(states) = &fields.usa_states {
        output.push_str(&format!("US states: {}\n", states.join(", ")));
    }
    if let Some(provinces) = &fields.canadian_provinces {
        output.push_str(&format!(
            "Canadian provinces: {}\n",
            provinces.join(", ")
        ));
    }
    if let Some(ecology) = &fields.ecology {
        if !ecology.pollinators.is_empty() {
            output.push_str(&format!("Attracts: {}\n", ecology.pollinators.join(", ")));
        }
        if !ecology.host_plant_for.is_empty() {
            output.push_str(&format!(
                "Host plant for: {}\n",
                ecology.host_plant_for.join(", ")
            ));
        }
    }

    output.push_str(&format!(
        "\n{} fields extracted, {} quality\n",
        record.metadata.fields_extracted, record.metadata.data_quality
    ));

    output
}

fn format_range(range: &DimensionRange) -> String {
    if range.min == range.max {
        format!("{} in.", range.min)
    } else {
        format!("{}-{} in.", range.min, range.max)
    }
}
