//! Portfolio project entries served by `/projects`.

use serde::{Deserialize, Serialize};

/// Display metadata and links for one portfolio project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    /// Project name.
    #[serde(default)]
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
    /// Screenshot URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Technologies used.
    #[serde(default)]
    pub tech: Vec<String>,
    /// Source repository URL.
    #[serde(default, alias = "git")]
    pub github: Option<String>,
    /// Live deployment URL.
    #[serde(default, alias = "live")]
    pub website: Option<String>,
}
