//! Remote content API: the operation set every front end works against,
//! an async HTTP client, a blocking adapter for the synchronous UIs, and an
//! in-process implementation for tests.

pub mod client;
pub mod http;
pub mod memory;

pub use client::ApiClient;
pub use http::HttpApi;
pub use memory::MemoryApi;

use crate::model::{
    Credentials, ImageUpload, ImpactDraft, NewSection, Project, ProjectDraft, ProjectImpact,
    ProjectResearch, ResearchDraft, Section, Session,
};

/// Errors from the content API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("invalid api url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The blocking adapter could not start its runtime.
    #[error("could not start request runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidUrl { .. } | ApiError::Runtime(_) => None,
        }
    }

    /// Short human-readable reason, preferring the server's `message` field.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { status, body } => serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or_else(|| format!("server returned {}", status)),
            other => other.to_string(),
        }
    }
}

/// The remote operations the front ends need.
///
/// Calls that take a `token` send it as a bearer credential when present.
/// A missing token is not checked here; the server rejects the call.
pub trait ContentApi {
    fn login(&self, credentials: &Credentials) -> Result<Session, ApiError>;

    fn get_sections(&self) -> Result<Vec<Section>, ApiError>;
    fn create_section(&self, data: &NewSection, token: Option<&str>) -> Result<(), ApiError>;
    fn delete_section(&self, id: &str, token: Option<&str>) -> Result<(), ApiError>;

    fn get_projects(&self) -> Result<Vec<Project>, ApiError>;
    fn create_project(
        &self,
        data: &ProjectDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError>;
    fn update_project(
        &self,
        id: &str,
        data: &ProjectDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError>;
    fn delete_project(&self, id: &str, token: Option<&str>) -> Result<(), ApiError>;

    fn get_impact(&self, project_id: i64) -> Result<Vec<ProjectImpact>, ApiError>;
    fn add_impact(
        &self,
        project_id: i64,
        data: &ImpactDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError>;
    fn update_impact(
        &self,
        project_id: i64,
        id: i64,
        data: &ImpactDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError>;
    fn delete_impact(&self, project_id: i64, id: i64, token: Option<&str>)
    -> Result<(), ApiError>;

    fn get_research(&self, project_id: i64) -> Result<Vec<ProjectResearch>, ApiError>;
    fn add_research(
        &self,
        project_id: i64,
        data: &ResearchDraft,
        token: Option<&str>,
    ) -> Result<(), ApiError>;
    fn update_research(
        &self,
        project_id: i64,
        id: i64,
        data: &ResearchDraft,
        token: Option<&str>,
    ) -> Result<(), ApiError>;
    fn delete_research(
        &self,
        project_id: i64,
        id: i64,
        token: Option<&str>,
    ) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_message() {
        let err = ApiError::Status {
            status: 409,
            body: r#"{"message": "Esta ODS ya existe"}"#.into(),
        };
        assert_eq!(err.user_message(), "Esta ODS ya existe");
        assert_eq!(err.status(), Some(409));

        let err = ApiError::Status {
            status: 500,
            body: "<html>".into(),
        };
        assert_eq!(err.user_message(), "server returned 500");
    }
}
