//! Field extraction engine for semi-structured plant text.

mod parser;
pub mod rules;

pub use parser::PlantExtractor;
pub use rules::{FieldKind, FieldSpec, MatchPolicy, FIELD_CATALOG};
