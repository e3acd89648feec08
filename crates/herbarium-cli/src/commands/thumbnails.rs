//! Thumbnails command - maintain thumbnail URLs and images for plant records.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use serde_json::Value;
use tracing::{debug, warn};

use herbarium_core::media::{derive_thumbnail_url, make_thumbnail, optimize_image, ThumbnailOptions};
use herbarium_core::models::config::HerbariumConfig;

/// Arguments for the thumbnails command.
#[derive(Args)]
pub struct ThumbnailsArgs {
    /// Directory of plant record JSON files
    #[arg(required = true)]
    plants_dir: PathBuf,

    /// Directory of downloaded plant images; when given, a record's
    /// thumbnailUrl is only written once the thumbnail file exists
    #[arg(short, long)]
    images_dir: Option<PathBuf>,

    /// Generate missing thumbnail images
    #[arg(long, requires = "images_dir")]
    generate: bool,

    /// Bound oversized source images in place
    #[arg(long, requires = "images_dir")]
    optimize: bool,

    /// Write thumbnailUrl back into each record
    #[arg(long)]
    update: bool,
}

pub async fn run(args: ThumbnailsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = if let Some(path) = config_path {
        HerbariumConfig::from_file(Path::new(path))?
    } else {
        HerbariumConfig::default()
    };

    if !args.plants_dir.is_dir() {
        anyhow::bail!("Not a directory: {}", args.plants_dir.display());
    }

    let options = ThumbnailOptions::from(&config.media);

    let mut entries: Vec<PathBuf> = fs::read_dir(&args.plants_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    entries.sort();

    if entries.is_empty() {
        anyhow::bail!("No JSON records found in {}", args.plants_dir.display());
    }

    let mut records = 0usize;
    let mut updated = 0usize;
    let mut generated = 0usize;
    let mut optimized = 0usize;
    let mut missing = 0usize;
    let mut pending = 0usize;
    let mut skipped = 0usize;

    for path in &entries {
        records += 1;

        let raw = fs::read_to_string(path)?;
        let mut value: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                skipped += 1;
                continue;
            }
        };

        let Some(image_url) = image_url_of(&value) else {
            debug!("No image URL in {}", path.display());
            skipped += 1;
            continue;
        };

        let Some(thumb_url) = derive_thumbnail_url(&image_url) else {
            warn!("Cannot derive thumbnail URL from {}", image_url);
            skipped += 1;
            continue;
        };

        // With an images dir the thumbnail file must exist on disk
        // (generated first if asked) before the URL is recorded.
        let mut verified = args.images_dir.is_none();
        if let Some(images_dir) = &args.images_dir {
            let file_name = image_url.rsplit('/').next().unwrap_or_default();
            if let Some(thumb_name) = derive_thumbnail_url(file_name) {
                let source = images_dir.join(file_name);
                let thumb_path = images_dir.join(&thumb_name);

                if args.optimize && source.exists() {
                    let image = image::open(&source)?;
                    let bound = config.media.max_image_size;
                    if image.width() > bound || image.height() > bound {
                        optimize_image(&image, bound).save(&source)?;
                        debug!("Optimized {}", source.display());
                        optimized += 1;
                    }
                }

                if thumb_path.exists() {
                    verified = true;
                } else if !source.exists() {
                    debug!("Source image missing: {}", source.display());
                    missing += 1;
                } else if args.generate {
                    let image = image::open(&source)?;
                    let bytes = make_thumbnail(&image, &options)?;
                    fs::write(&thumb_path, bytes)?;
                    debug!("Generated {}", thumb_path.display());
                    generated += 1;
                    verified = true;
                } else {
                    pending += 1;
                }
            }
        }

        if args.update && verified {
            let already = value
                .get("thumbnailUrl")
                .or_else(|| value.get("plant_data").and_then(|d| d.get("thumbnailUrl")))
                .and_then(Value::as_str)
                == Some(thumb_url.as_str());
            if !already && set_thumbnail_url(&mut value, &thumb_url) {
                fs::write(path, serde_json::to_string_pretty(&value)?)?;
                debug!("Updated {}", path.display());
                updated += 1;
            }
        }
    }

    println!(
        "{} Scanned {} records ({} skipped)",
        style("✓").green(),
        records,
        skipped
    );
    if args.update {
        println!("   {} records updated with thumbnail URLs", updated);
    }
    if args.images_dir.is_some() {
        if missing > 0 {
            println!("   {} source images missing", style(missing).yellow());
        }
        if args.optimize {
            println!("   {} source images optimized", style(optimized).green());
        }
        if args.generate {
            println!("   {} thumbnails generated", style(generated).green());
        } else if pending > 0 {
            println!(
                "   {} thumbnails missing (pass --generate to create them)",
                style(pending).yellow()
            );
        }
    }

    Ok(())
}

/// Image URL from either a bare seed record or a fetch envelope.
fn image_url_of(value: &Value) -> Option<String> {
    value
        .get("imageUrl")
        .or_else(|| value.get("plant_data").and_then(|d| d.get("imageUrl")))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Set thumbnailUrl next to where the record keeps its image URL.
fn set_thumbnail_url(value: &mut Value, thumb_url: &str) -> bool {
    let target = if value.get("plant_data").is_some() {
        match value.get_mut("plant_data") {
            Some(v) => v,
            None => return false,
        }
    } else {
        value
    };

    match target.as_object_mut() {
        Some(map) => {
            map.insert(
                "thumbnailUrl".to_string(),
                Value::String(thumb_url.to_string()),
            );
            true
        }
        None => false,
    }
}
