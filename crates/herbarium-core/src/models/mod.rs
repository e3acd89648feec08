//! Data models for plant records and pipeline configuration.

pub mod config;
pub mod plant;

pub use config::HerbariumConfig;
pub use plant::{
    DimensionRange, Ecology, GuideProfile, LengthUnit, LightRequirement, MoistureRequirement,
    PlantDuration, PlantFields, PlantRecord, RecordMetadata, RecordQuality, SoilPreference,
    SoilType, EXTRACTOR_VERSION,
};
