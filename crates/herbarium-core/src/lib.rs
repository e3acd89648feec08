//! Core library for plant database building.
//!
//! This crate provides:
//! - Attribute extraction from semi-structured plant text (dimensions,
//!   bloom traits, growing conditions, hardiness, native range, ecology)
//! - USDA plant guide PDF processing and section parsing
//! - Distribution CSV conversion to FIPS code sets
//! - iNaturalist taxa transforms and fetch envelopes
//! - Image optimization and thumbnail generation

pub mod distribution;
pub mod error;
pub mod extract;
pub mod html;
pub mod inaturalist;
pub mod media;
pub mod models;
pub mod pdf;

pub use error::{HerbariumError, Result};
pub use extract::{FieldKind, FieldSpec, MatchPolicy, PlantExtractor, FIELD_CATALOG};
pub use html::html_to_text;
pub use models::{GuideProfile, PlantFields, PlantRecord, RecordQuality};
pub use pdf::{parse_guide, PdfExtractor, PdfProcessor, PdfType};
