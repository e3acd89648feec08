//! Field policy catalog.
//!
//! Every attribute the engine can emit is described here: whether it is a
//! scalar or a list, and whether the first matching rule wins or matches
//! from all rules are unioned.

use serde::Serialize;

/// Shape of an extracted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Scalar,
    List,
}

/// How multiple rule matches combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// The first matching rule provides the value.
    First,
    /// Matches from all applicable rules are merged.
    Union,
}

/// Policy metadata for one emitted field.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Serialized field name.
    pub name: &'static str,
    pub kind: FieldKind,
    pub match_policy: MatchPolicy,
}

/// One entry per field the engine can emit.
///
/// `hardinessZones` is a list value under a first-match policy: the first
/// valid range (or the discrete collection) provides the whole list.
pub const FIELD_CATALOG: [FieldSpec; 13] = [
    FieldSpec {
        name: "height",
        kind: FieldKind::Scalar,
        match_policy: MatchPolicy::First,
    },
    FieldSpec {
        name: "spread",
        kind: FieldKind::Scalar,
        match_policy: MatchPolicy::First,
    },
    FieldSpec {
        name: "bloomColor",
        kind: FieldKind::List,
        match_policy: MatchPolicy::Union,
    },
    FieldSpec {
        name: "bloomTime",
        kind: FieldKind::List,
        match_policy: MatchPolicy::Union,
    },
    FieldSpec {
        name: "bloomPeriod",
        kind: FieldKind::List,
        match_policy: MatchPolicy::Union,
    },
    FieldSpec {
        name: "duration",
        kind: FieldKind::Scalar,
        match_policy: MatchPolicy::First,
    },
    FieldSpec {
        name: "light",
        kind: FieldKind::List,
        match_policy: MatchPolicy::Union,
    },
    FieldSpec {
        name: "moisture",
        kind: FieldKind::List,
        match_policy: MatchPolicy::Union,
    },
    FieldSpec {
        name: "soil",
        kind: FieldKind::List,
        match_policy: MatchPolicy::Union,
    },
    FieldSpec {
        name: "hardinessZones",
        kind: FieldKind::List,
        match_policy: MatchPolicy::First,
    },
    FieldSpec {
        name: "usaStates",
        kind: FieldKind::List,
        match_policy: MatchPolicy::Union,
    },
    FieldSpec {
        name: "canadianProvinces",
        kind: FieldKind::List,
        match_policy: MatchPolicy::Union,
    },
    FieldSpec {
        name: "ecology",
        kind: FieldKind::List,
        match_policy: MatchPolicy::Union,
    },
];

/// Look up the policy for a serialized field name.
pub fn field_spec(name: &str) -> Option<FieldSpec> {
    FIELD_CATALOG.iter().find(|spec| spec.name == name).copied()
}
