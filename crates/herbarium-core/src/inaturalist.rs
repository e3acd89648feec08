//! iNaturalist taxa types and record transforms.
//!
//! The fetch pipeline pulls taxa from the iNaturalist API and converts
//! them into seed plant records for the database. Records fetched this
//! way carry placeholder growing attributes until a guide or profile
//! page supplies real ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base URL for the iNaturalist API.
pub const INATURALIST_API_BASE: &str = "https://api.inaturalist.org/v1";

/// Version stamp written into fetch envelopes.
pub const SCRAPER_VERSION: &str = "1.0.0";

/// iNaturalist place IDs for US states, used to scope native-species
/// queries.
pub const US_STATE_PLACE_IDS: [(&str, u32); 50] = [
    ("Alabama", 19),
    ("Alaska", 6),
    ("Arizona", 40),
    ("Arkansas", 36),
    ("California", 14),
    ("Colorado", 34),
    ("Connecticut", 49),
    ("Delaware", 4),
    ("Florida", 7539),
    ("Georgia", 23),
    ("Hawaii", 11),
    ("Idaho", 22),
    ("Illinois", 35),
    ("Indiana", 20),
    ("Iowa", 24),
    ("Kansas", 25),
    ("Kentucky", 26),
    ("Louisiana", 27),
    ("Maine", 17),
    ("Maryland", 39),
    ("Massachusetts", 2),
    ("Michigan", 29),
    ("Minnesota", 38),
    ("Mississippi", 37),
    ("Missouri", 28),
    ("Montana", 16),
    ("Nebraska", 3),
    ("Nevada", 50),
    ("New Hampshire", 41),
    ("New Jersey", 51),
    ("New Mexico", 9),
    ("New York", 48),
    ("North Carolina", 30),
    ("North Dakota", 13),
    ("Ohio", 31),
    ("Oklahoma", 12),
    ("Oregon", 10),
    ("Pennsylvania", 42),
    ("Rhode Island", 8),
    ("South Carolina", 43),
    ("South Dakota", 44),
    ("Tennessee", 45),
    ("Texas", 18),
    ("Utah", 52),
    ("Vermont", 47),
    ("Virginia", 7),
    ("Washington", 46),
    ("West Virginia", 33),
    ("Wisconsin", 32),
    ("Wyoming", 15),
];

/// Look up the iNaturalist place ID for a US state name.
pub fn place_id_for_state(name: &str) -> Option<u32> {
    US_STATE_PLACE_IDS
        .iter()
        .find(|(state, _)| state.eq_ignore_ascii_case(name))
        .map(|&(_, id)| id)
}

/// Response from the `/taxa` search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxaResponse {
    pub total_results: u32,
    pub results: Vec<Taxon>,
}

/// Response from the `/observations/species_counts` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesCountsResponse {
    pub total_results: u32,
    pub results: Vec<SpeciesCount>,
}

/// One species entry in a species-counts response.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesCount {
    pub count: u64,
    pub taxon: Taxon,
}

/// An iNaturalist taxon record.
#[derive(Debug, Clone, Deserialize)]
pub struct Taxon {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub preferred_common_name: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub observations_count: Option<u64>,
    #[serde(default)]
    pub wikipedia_summary: Option<String>,
    #[serde(default)]
    pub iconic_taxon_name: Option<String>,
    #[serde(default)]
    pub default_photo: Option<TaxonPhoto>,
    #[serde(default)]
    pub establishment_means: Option<EstablishmentMeans>,
}

/// Photo URLs attached to a taxon.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonPhoto {
    #[serde(default)]
    pub square_url: Option<String>,
    #[serde(default)]
    pub small_url: Option<String>,
    #[serde(default)]
    pub medium_url: Option<String>,
    #[serde(default)]
    pub large_url: Option<String>,
}

/// Establishment means within a queried place.
#[derive(Debug, Clone, Deserialize)]
pub struct EstablishmentMeans {
    pub establishment_means: String,
}

impl Taxon {
    /// Whether the taxon is native within the queried place.
    pub fn is_native(&self) -> bool {
        self.establishment_means
            .as_ref()
            .map(|m| m.establishment_means == "native")
            .unwrap_or(false)
    }
}

/// Seed plant record derived from an iNaturalist taxon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantSeed {
    pub id: String,
    pub common_name: String,
    pub scientific_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub sun: String,
    pub moisture: String,
    pub soil: String,
    pub height: u32,
    pub width: u32,
    pub perennial: bool,
    pub native_range: Vec<String>,
    pub food_for: Vec<String>,
    pub useful_for: Vec<String>,
    pub rank: String,
    pub iconic_taxon: String,
    pub observations_count: u64,
}

/// Convert a taxon into a seed record.
///
/// Growing attributes are placeholders until guide extraction fills
/// them in later passes.
pub fn taxon_to_seed(taxon: &Taxon) -> PlantSeed {
    let common_name = taxon
        .preferred_common_name
        .clone()
        .unwrap_or_else(|| taxon.name.clone());

    let description = taxon
        .wikipedia_summary
        .clone()
        .filter(|summary| !summary.is_empty())
        .unwrap_or_else(|| {
            format!("A {} species. Native to various regions.", common_name)
        });

    let image_url = taxon.default_photo.as_ref().and_then(|photo| {
        photo
            .large_url
            .clone()
            .or_else(|| photo.medium_url.clone())
            .or_else(|| photo.small_url.clone())
    });

    PlantSeed {
        id: format!("inaturalist-{}", taxon.id),
        common_name,
        scientific_name: taxon.name.clone(),
        description,
        image_url,
        sun: "full-sun".to_string(),
        moisture: "medium".to_string(),
        soil: "loam".to_string(),
        height: 24,
        width: 18,
        perennial: true,
        native_range: vec!["North America".to_string()],
        food_for: vec!["butterflies".to_string(), "bees".to_string()],
        useful_for: vec![
            "pollinator garden".to_string(),
            "native garden".to_string(),
        ],
        rank: taxon.rank.clone().unwrap_or_else(|| "species".to_string()),
        iconic_taxon: taxon
            .iconic_taxon_name
            .clone()
            .unwrap_or_else(|| "Plantae".to_string()),
        observations_count: taxon.observations_count.unwrap_or(0),
    }
}

/// Wrapper written around fetched records on disk.
///
/// Envelope keys stay snake_case; only the record inside uses
/// camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchEnvelope<T> {
    pub scraped_at: DateTime<Utc>,
    pub scraper_version: String,
    pub source: String,
    pub plant_data: T,
}

impl<T> FetchEnvelope<T> {
    /// Wrap a record with the current timestamp and version stamp.
    pub fn new(source: impl Into<String>, plant_data: T) -> Self {
        Self {
            scraped_at: Utc::now(),
            scraper_version: SCRAPER_VERSION.to_string(),
            source: source.into(),
            plant_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bare_taxon(id: u64, name: &str) -> Taxon {
        Taxon {
            id,
            name: name.to_string(),
            preferred_common_name: None,
            rank: None,
            observations_count: None,
            wikipedia_summary: None,
            iconic_taxon_name: None,
            default_photo: None,
            establishment_means: None,
        }
    }

    #[test]
    fn test_seed_defaults_for_bare_taxon() {
        let seed = taxon_to_seed(&bare_taxon(123, "Asclepias tuberosa"));
        assert_eq!(seed.id, "inaturalist-123");
        assert_eq!(seed.common_name, "Asclepias tuberosa");
        assert_eq!(seed.scientific_name, "Asclepias tuberosa");
        assert_eq!(
            seed.description,
            "A Asclepias tuberosa species. Native to various regions."
        );
        assert_eq!(seed.image_url, None);
        assert_eq!(seed.sun, "full-sun");
        assert_eq!(seed.moisture, "medium");
        assert_eq!(seed.soil, "loam");
        assert_eq!(seed.height, 24);
        assert_eq!(seed.width, 18);
        assert!(seed.perennial);
        assert_eq!(seed.native_range, vec!["North America"]);
        assert_eq!(seed.food_for, vec!["butterflies", "bees"]);
        assert_eq!(seed.useful_for, vec!["pollinator garden", "native garden"]);
        assert_eq!(seed.rank, "species");
        assert_eq!(seed.iconic_taxon, "Plantae");
        assert_eq!(seed.observations_count, 0);
    }

    #[test]
    fn test_seed_uses_taxon_details_when_present() {
        let mut taxon = bare_taxon(48662, "Danaus plexippus");
        taxon.preferred_common_name = Some("Monarch".to_string());
        taxon.rank = Some("species".to_string());
        taxon.observations_count = Some(400_000);
        taxon.wikipedia_summary = Some("A milkweed butterfly.".to_string());
        taxon.iconic_taxon_name = Some("Insecta".to_string());
        taxon.default_photo = Some(TaxonPhoto {
            square_url: Some("https://example.org/sq.jpg".to_string()),
            small_url: Some("https://example.org/s.jpg".to_string()),
            medium_url: Some("https://example.org/m.jpg".to_string()),
            large_url: Some("https://example.org/l.jpg".to_string()),
        });

        let seed = taxon_to_seed(&taxon);
        assert_eq!(seed.common_name, "Monarch");
        assert_eq!(seed.description, "A milkweed butterfly.");
        assert_eq!(seed.image_url.as_deref(), Some("https://example.org/l.jpg"));
        assert_eq!(seed.observations_count, 400_000);
        assert_eq!(seed.iconic_taxon, "Insecta");
    }

    #[test]
    fn test_photo_fallback_order() {
        let mut taxon = bare_taxon(1, "Test plant");
        taxon.default_photo = Some(TaxonPhoto {
            square_url: None,
            small_url: Some("small".to_string()),
            medium_url: Some("medium".to_string()),
            large_url: None,
        });
        assert_eq!(taxon_to_seed(&taxon).image_url.as_deref(), Some("medium"));

        taxon.default_photo = Some(TaxonPhoto {
            square_url: None,
            small_url: Some("small".to_string()),
            medium_url: None,
            large_url: None,
        });
        assert_eq!(taxon_to_seed(&taxon).image_url.as_deref(), Some("small"));
    }

    #[test]
    fn test_place_id_lookup() {
        assert_eq!(place_id_for_state("Texas"), Some(18));
        assert_eq!(place_id_for_state("texas"), Some(18));
        assert_eq!(place_id_for_state("New Mexico"), Some(9));
        assert_eq!(place_id_for_state("Narnia"), None);
    }

    #[test]
    fn test_is_native() {
        let mut taxon = bare_taxon(1, "Test plant");
        assert!(!taxon.is_native());

        taxon.establishment_means = Some(EstablishmentMeans {
            establishment_means: "native".to_string(),
        });
        assert!(taxon.is_native());

        taxon.establishment_means = Some(EstablishmentMeans {
            establishment_means: "introduced".to_string(),
        });
        assert!(!taxon.is_native());
    }

    #[test]
    fn test_parse_taxa_response() {
        let json = r#"{
            "total_results": 1,
            "page": 1,
            "per_page": 30,
            "results": [{
                "id": 47912,
                "name": "Asclepias tuberosa",
                "rank": "species",
                "preferred_common_name": "butterfly milkweed",
                "observations_count": 60000,
                "iconic_taxon_name": "Plantae",
                "default_photo": {
                    "square_url": "https://example.org/sq.jpg",
                    "medium_url": "https://example.org/m.jpg"
                }
            }]
        }"#;
        let response: TaxaResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_results, 1);
        assert_eq!(response.results[0].name, "Asclepias tuberosa");
        assert_eq!(
            response.results[0]
                .preferred_common_name
                .as_deref(),
            Some("butterfly milkweed")
        );
    }

    #[test]
    fn test_envelope_keys_stay_snake_case() {
        let envelope = FetchEnvelope::new("inaturalist", vec!["record"]);
        let value = serde_json::to_value(&envelope).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("scraped_at"));
        assert!(object.contains_key("scraper_version"));
        assert!(object.contains_key("plant_data"));
        assert_eq!(object["source"], "inaturalist");
    }
}
