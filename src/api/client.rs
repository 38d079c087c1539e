//! Async HTTP client for the content API.
//!
//! Every route lives under `{api_url}/api/`. Calls that carry an image are
//! sent as `multipart/form-data` with the image in an `image` part; the rest
//! use JSON bodies.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::ApiError;
use crate::model::{
    Credentials, ImageUpload, ImpactDraft, NewSection, Project, ProjectDraft, ProjectImpact,
    ProjectResearch, ResearchDraft, Section, Session,
};

/// HTTP client for one content API deployment.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for `api_url` (e.g. `http://localhost:5000`).
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: &str) -> Result<Self, ApiError> {
        let base = Url::parse(api_url).map_err(|e| ApiError::InvalidUrl {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: api_url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    // ---- auth ----

    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let request = self
            .client
            .post(self.url(&["auth", "login"]))
            .json(credentials);
        Self::parse_response(self.send(request, "login").await?).await
    }

    // ---- sections ----

    pub async fn get_sections(&self) -> Result<Vec<Section>, ApiError> {
        let request = self.client.get(self.url(&["sections"]));
        Self::parse_response(self.send(request, "get_sections").await?).await
    }

    pub async fn create_section(
        &self,
        data: &NewSection,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let request = authed(self.client.post(self.url(&["sections"])), token).json(data);
        Self::check_status(self.send(request, "create_section").await?).await
    }

    pub async fn delete_section(&self, id: &str, token: Option<&str>) -> Result<(), ApiError> {
        let request = authed(self.client.delete(self.url(&["sections", id])), token);
        Self::check_status(self.send(request, "delete_section").await?).await
    }

    // ---- projects ----

    pub async fn get_projects(&self) -> Result<Vec<Project>, ApiError> {
        let request = self.client.get(self.url(&["projects"]));
        Self::parse_response(self.send(request, "get_projects").await?).await
    }

    pub async fn create_project(
        &self,
        data: &ProjectDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let form = with_image(project_form(data), image)?;
        let request = authed(self.client.post(self.url(&["projects"])), token).multipart(form);
        Self::check_status(self.send(request, "create_project").await?).await
    }

    pub async fn update_project(
        &self,
        id: &str,
        data: &ProjectDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let form = with_image(project_form(data), image)?;
        let request =
            authed(self.client.put(self.url(&["projects", id])), token).multipart(form);
        Self::check_status(self.send(request, "update_project").await?).await
    }

    pub async fn delete_project(&self, id: &str, token: Option<&str>) -> Result<(), ApiError> {
        let request = authed(self.client.delete(self.url(&["projects", id])), token);
        Self::check_status(self.send(request, "delete_project").await?).await
    }

    // ---- impact ----

    pub async fn get_impact(&self, project_id: i64) -> Result<Vec<ProjectImpact>, ApiError> {
        let pid = project_id.to_string();
        let request = self.client.get(self.url(&["projects", &pid, "impact"]));
        Self::parse_response(self.send(request, "get_impact").await?).await
    }

    pub async fn add_impact(
        &self,
        project_id: i64,
        data: &ImpactDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let pid = project_id.to_string();
        let form = with_image(impact_form(data), image)?;
        let request = authed(
            self.client.post(self.url(&["projects", &pid, "impact"])),
            token,
        )
        .multipart(form);
        Self::check_status(self.send(request, "add_impact").await?).await
    }

    pub async fn update_impact(
        &self,
        project_id: i64,
        id: i64,
        data: &ImpactDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let (pid, id) = (project_id.to_string(), id.to_string());
        let form = with_image(impact_form(data), image)?;
        let request = authed(
            self.client.put(self.url(&["projects", &pid, "impact", &id])),
            token,
        )
        .multipart(form);
        Self::check_status(self.send(request, "update_impact").await?).await
    }

    pub async fn delete_impact(
        &self,
        project_id: i64,
        id: i64,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let (pid, id) = (project_id.to_string(), id.to_string());
        let request = authed(
            self.client.delete(self.url(&["projects", &pid, "impact", &id])),
            token,
        );
        Self::check_status(self.send(request, "delete_impact").await?).await
    }

    // ---- research ----

    pub async fn get_research(&self, project_id: i64) -> Result<Vec<ProjectResearch>, ApiError> {
        let pid = project_id.to_string();
        let request = self.client.get(self.url(&["projects", &pid, "research"]));
        Self::parse_response(self.send(request, "get_research").await?).await
    }

    pub async fn add_research(
        &self,
        project_id: i64,
        data: &ResearchDraft,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let pid = project_id.to_string();
        let request = authed(
            self.client.post(self.url(&["projects", &pid, "research"])),
            token,
        )
        .json(data);
        Self::check_status(self.send(request, "add_research").await?).await
    }

    pub async fn update_research(
        &self,
        project_id: i64,
        id: i64,
        data: &ResearchDraft,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let (pid, id) = (project_id.to_string(), id.to_string());
        let request = authed(
            self.client.put(self.url(&["projects", &pid, "research", &id])),
            token,
        )
        .json(data);
        Self::check_status(self.send(request, "update_research").await?).await
    }

    pub async fn delete_research(
        &self,
        project_id: i64,
        id: i64,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let (pid, id) = (project_id.to_string(), id.to_string());
        let request = authed(
            self.client.delete(self.url(&["projects", &pid, "research", &id])),
            token,
        );
        Self::check_status(self.send(request, "delete_research").await?).await
    }

    // ---- private helpers ----

    /// Build `{base}/api/{segments...}` with each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn send(
        &self,
        request: RequestBuilder,
        op: &'static str,
    ) -> Result<reqwest::Response, ApiError> {
        tracing::debug!(op, "sending request");
        match request.send().await {
            Ok(response) => {
                tracing::debug!(op, status = response.status().as_u16(), "response");
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(op, error = %e, "request failed");
                Err(e.into())
            }
        }
    }

    /// Return the response unchanged on a 2xx status, or an
    /// [`ApiError::Status`] carrying the body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

fn authed(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(t) => request.bearer_auth(t),
        None => request,
    }
}

fn project_form(data: &ProjectDraft) -> Form {
    Form::new()
        .text("title", data.title.clone())
        .text("category", data.category.clone())
        .text("description", data.description.clone())
        .text("section_id", data.section_id.clone())
}

fn impact_form(data: &ImpactDraft) -> Form {
    Form::new()
        .text("project_id", data.project_id.to_string())
        .text("title", data.title.clone())
        .text("description", data.description.clone())
}

fn with_image(form: Form, image: Option<&ImageUpload>) -> Result<Form, ApiError> {
    match image {
        Some(img) => {
            let part = Part::bytes(img.bytes.clone())
                .file_name(img.file_name.clone())
                .mime_str(img.mime)?;
            Ok(form.part("image", part))
        }
        None => Ok(form),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_rooted_under_api() {
        let client = ApiClient::new("http://localhost:5000", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url(&["projects", "7", "impact"]).as_str(),
            "http://localhost:5000/api/projects/7/impact"
        );
    }

    #[test]
    fn url_keeps_base_path_and_encodes_segments() {
        let client =
            ApiClient::new("https://example.org/cms/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url(&["sections", "a b"]).as_str(),
            "https://example.org/cms/api/sections/a%20b"
        );
    }

    #[test]
    fn rejects_unparseable_base() {
        assert!(ApiClient::new("not a url", Duration::from_secs(1)).is_err());
    }
}
