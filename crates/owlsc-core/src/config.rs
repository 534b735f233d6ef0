//! Run configuration (JSON, every field optional).
//!
//! ```json
//! {
//!   "classifier": { "namespace": "http://example.org/onto/", "parent_match": "exact" },
//!   "projector": { "default_language": "ru" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::vocab::DEFAULT_NAMESPACE;

/// How a class or individual is matched against triple subjects when
/// resolving its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentMatch {
    /// First triple whose subject local name *contains* the entity name.
    /// `Cat` also matches `Wildcat`; the first such triple wins.
    #[default]
    Containment,
    /// First triple whose subject local name equals the entity name.
    Exact,
}

impl ParentMatch {
    pub fn matches(self, subject_local: &str, name: &str) -> bool {
        match self {
            ParentMatch::Containment => subject_local.contains(name),
            ParentMatch::Exact => subject_local == name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
    /// Predicates whose IRI contains this string are custom relations.
    pub namespace: String,
    pub parent_match: ParentMatch,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            parent_match: ParentMatch::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorOptions {
    /// Language set used for labels that carry no language tag.
    pub default_language: String,
}

impl Default for ProjectorOptions {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwlScConfig {
    pub classifier: ClassifierOptions,
    pub projector: ProjectorOptions,
}

impl OwlScConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
