//! Fetch command - pull plant seed records from the iNaturalist API.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use herbarium_core::error::FetchError;
use herbarium_core::inaturalist::{
    place_id_for_state, taxon_to_seed, FetchEnvelope, SpeciesCountsResponse, TaxaResponse, Taxon,
    INATURALIST_API_BASE,
};
use herbarium_core::models::config::HerbariumConfig;

/// Arguments for the fetch command.
#[derive(Args)]
pub struct FetchArgs {
    /// Species search query (e.g. "Asclepias tuberosa")
    #[arg(short, long)]
    query: Option<String>,

    /// Fetch species native to a US state instead of searching
    #[arg(long)]
    native_state: Option<String>,

    /// Maximum number of records to fetch
    #[arg(short = 'n', long, default_value = "30")]
    limit: usize,

    /// Output directory for seed records
    #[arg(short, long, default_value = "plants")]
    output_dir: PathBuf,
}

pub async fn run(args: FetchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = if let Some(path) = config_path {
        HerbariumConfig::from_file(Path::new(path))?
    } else {
        HerbariumConfig::default()
    };

    let client = Client::builder()
        .user_agent(config.fetch.user_agent.clone())
        .timeout(Duration::from_secs(config.fetch.timeout_secs))
        .build()?;

    let taxa = match (&args.query, &args.native_state) {
        (Some(query), _) => search_taxa(&client, &config, query, args.limit).await?,
        (None, Some(state)) => fetch_native_taxa(&client, &config, state, args.limit).await?,
        (None, None) => anyhow::bail!("Either --query or --native-state is required"),
    };

    if taxa.is_empty() {
        anyhow::bail!("No matching taxa found");
    }

    println!("{} Found {} taxa", style("ℹ").blue(), taxa.len());

    fs::create_dir_all(&args.output_dir)?;

    let pb = ProgressBar::new(taxa.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records",
            )
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut written = 0usize;
    for taxon in &taxa {
        let seed = taxon_to_seed(taxon);
        let path = args.output_dir.join(format!("{}.json", seed.id));
        let envelope = FetchEnvelope::new("inaturalist", seed);
        fs::write(&path, serde_json::to_string_pretty(&envelope)?)?;
        debug!("Wrote {}", path.display());
        written += 1;
        pb.inc(1);
    }
    pb.finish_with_message("Complete");

    println!(
        "{} Wrote {} records to {}",
        style("✓").green(),
        written,
        args.output_dir.display()
    );

    Ok(())
}

async fn search_taxa(
    client: &Client,
    config: &HerbariumConfig,
    query: &str,
    limit: usize,
) -> anyhow::Result<Vec<Taxon>> {
    info!("Searching iNaturalist taxa for \"{}\"", query);

    let url = format!("{}/taxa", INATURALIST_API_BASE);
    let response: TaxaResponse = get_json(
        client,
        config,
        &url,
        &[
            ("q", query.to_string()),
            ("rank", "species".to_string()),
            ("per_page", limit.to_string()),
        ],
    )
    .await?;

    debug!(
        "Search returned {} of {} total results",
        response.results.len(),
        response.total_results
    );

    Ok(response.results.into_iter().take(limit).collect())
}

async fn fetch_native_taxa(
    client: &Client,
    config: &HerbariumConfig,
    state: &str,
    limit: usize,
) -> anyhow::Result<Vec<Taxon>> {
    let place_id =
        place_id_for_state(state).ok_or_else(|| anyhow::anyhow!("Unknown US state: {}", state))?;

    info!(
        "Fetching native plant species for {} (place {})",
        state, place_id
    );

    let url = format!("{}/observations/species_counts", INATURALIST_API_BASE);
    let mut taxa = Vec::new();
    let mut page = 1u32;

    loop {
        let response: SpeciesCountsResponse = get_json(
            client,
            config,
            &url,
            &[
                ("place_id", place_id.to_string()),
                ("iconic_taxa", "Plantae".to_string()),
                ("native", "true".to_string()),
                ("per_page", "100".to_string()),
                ("page", page.to_string()),
            ],
        )
        .await?;

        if response.results.is_empty() {
            break;
        }

        for entry in response.results {
            // The API filter is authoritative; drop only explicit non-native entries
            if entry.taxon.establishment_means.is_some() && !entry.taxon.is_native() {
                continue;
            }
            taxa.push(entry.taxon);
            if taxa.len() >= limit {
                return Ok(taxa);
            }
        }

        if page.saturating_mul(100) >= response.total_results {
            break;
        }
        page += 1;

        // Stay under the API rate limit between pages
        tokio::time::sleep(Duration::from_millis(config.fetch.rate_limit_ms)).await;
    }

    Ok(taxa)
}

/// GET a JSON payload with retries and exponential backoff.
///
/// Client errors that will not succeed on retry (403, 404) fail
/// immediately.
async fn get_json<T: DeserializeOwned>(
    client: &Client,
    config: &HerbariumConfig,
    url: &str,
    params: &[(&str, String)],
) -> anyhow::Result<T> {
    let mut attempt = 0u32;

    loop {
        attempt += 1;

        match client.get(url).query(params).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    let payload = response
                        .json::<T>()
                        .await
                        .map_err(|e| FetchError::Payload(e.to_string()))?;
                    return Ok(payload);
                }
                if status.as_u16() == 403 || status.as_u16() == 404 {
                    return Err(FetchError::Status {
                        code: status.as_u16(),
                        url: url.to_string(),
                    }
                    .into());
                }
                if attempt > config.fetch.retries {
                    return Err(FetchError::RetriesExhausted(url.to_string()).into());
                }
                warn!("Request failed with status {}, retrying", status);
            }
            Err(e) => {
                if attempt > config.fetch.retries {
                    return Err(anyhow::Error::from(e)
                        .context(format!("Request to {} failed after {} attempts", url, attempt)));
                }
                warn!("Request error: {}, retrying", e);
            }
        }

        let backoff = config.fetch.backoff_factor.saturating_pow(attempt) as u64;
        tokio::time::sleep(Duration::from_secs(backoff)).await;
    }
}
