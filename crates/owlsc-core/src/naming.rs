//! Identifier conventions of the target semantic network.
//!
//! All functions are total: every input maps to exactly one identifier.

use serde::{Deserialize, Serialize};

pub const CLASS_PREFIX: &str = "concept_";
pub const NON_ROLE_PREFIX: &str = "nrel";
pub const ROLE_PREFIX: &str = "rrel";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    NonRole,
    Role,
    /// No recognised prefix; such relations get no kind declaration.
    Unclassified,
}

fn normalize(name: &str) -> String {
    name.replace(' ', "_").to_lowercase()
}

/// `Animal Kingdom` -> `concept_animal_kingdom`. Idempotent.
pub fn class_identifier(name: &str) -> String {
    let normalized = normalize(name);
    if normalized.starts_with(CLASS_PREFIX) {
        normalized
    } else {
        format!("{CLASS_PREFIX}{normalized}")
    }
}

pub fn individual_identifier(name: &str) -> String {
    normalize(name)
}

pub fn relation_identifier(name: &str) -> String {
    normalize(name)
}

pub fn relation_kind(identifier: &str) -> RelationKind {
    if identifier.starts_with(NON_ROLE_PREFIX) {
        RelationKind::NonRole
    } else if identifier.starts_with(ROLE_PREFIX) {
        RelationKind::Role
    } else {
        RelationKind::Unclassified
    }
}
