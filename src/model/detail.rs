use serde::{Deserialize, Serialize};

use super::wire;

/// Copyright label shown when a research record has none.
pub const DEFAULT_COPYRIGHT: &str = "CC";

/// An outcome record attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectImpact {
    #[serde(default, deserialize_with = "wire::opt_int_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "wire::int_id")]
    pub project_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A supporting citation attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectResearch {
    #[serde(default, deserialize_with = "wire::opt_int_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "wire::int_id")]
    pub project_id: i64,
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl ProjectResearch {
    pub fn copyright_label(&self) -> &str {
        match self.copyright.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => DEFAULT_COPYRIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactDraft {
    pub project_id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchDraft {
    pub project_id: i64,
    pub title: String,
    pub link: String,
    pub copyright: String,
}
