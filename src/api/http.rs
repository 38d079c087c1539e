use std::time::Duration;

use tokio::runtime::Runtime;

use super::{ApiClient, ApiError, ContentApi};
use crate::model::{
    AppConfig, Credentials, ImageUpload, ImpactDraft, NewSection, Project, ProjectDraft,
    ProjectImpact, ProjectResearch, ResearchDraft, Section, Session,
};

/// Blocking [`ContentApi`] over [`ApiClient`].
///
/// The TUI and CLI are synchronous; each call is driven to completion on an
/// owned current-thread runtime. Must not be called from inside another
/// tokio runtime.
pub struct HttpApi {
    client: ApiClient,
    runtime: Runtime,
}

impl HttpApi {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let client = ApiClient::new(&config.api_url, Duration::from_secs(config.timeout_secs))?;
        Self::with_client(client)
    }

    pub fn with_client(client: ApiClient) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ApiError::Runtime)?;
        Ok(HttpApi { client, runtime })
    }
}

impl ContentApi for HttpApi {
    fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        self.runtime.block_on(self.client.login(credentials))
    }

    fn get_sections(&self) -> Result<Vec<Section>, ApiError> {
        self.runtime.block_on(self.client.get_sections())
    }

    fn create_section(&self, data: &NewSection, token: Option<&str>) -> Result<(), ApiError> {
        self.runtime.block_on(self.client.create_section(data, token))
    }

    fn delete_section(&self, id: &str, token: Option<&str>) -> Result<(), ApiError> {
        self.runtime.block_on(self.client.delete_section(id, token))
    }

    fn get_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.runtime.block_on(self.client.get_projects())
    }

    fn create_project(
        &self,
        data: &ProjectDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        self.runtime
            .block_on(self.client.create_project(data, image, token))
    }

    fn update_project(
        &self,
        id: &str,
        data: &ProjectDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        self.runtime
            .block_on(self.client.update_project(id, data, image, token))
    }

    fn delete_project(&self, id: &str, token: Option<&str>) -> Result<(), ApiError> {
        self.runtime.block_on(self.client.delete_project(id, token))
    }

    fn get_impact(&self, project_id: i64) -> Result<Vec<ProjectImpact>, ApiError> {
        self.runtime.block_on(self.client.get_impact(project_id))
    }

    fn add_impact(
        &self,
        project_id: i64,
        data: &ImpactDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        self.runtime
            .block_on(self.client.add_impact(project_id, data, image, token))
    }

    fn update_impact(
        &self,
        project_id: i64,
        id: i64,
        data: &ImpactDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        self.runtime
            .block_on(self.client.update_impact(project_id, id, data, image, token))
    }

    fn delete_impact(
        &self,
        project_id: i64,
        id: i64,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        self.runtime
            .block_on(self.client.delete_impact(project_id, id, token))
    }

    fn get_research(&self, project_id: i64) -> Result<Vec<ProjectResearch>, ApiError> {
        self.runtime.block_on(self.client.get_research(project_id))
    }

    fn add_research(
        &self,
        project_id: i64,
        data: &ResearchDraft,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        self.runtime
            .block_on(self.client.add_research(project_id, data, token))
    }

    fn update_research(
        &self,
        project_id: i64,
        id: i64,
        data: &ResearchDraft,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        self.runtime
            .block_on(self.client.update_research(project_id, id, data, token))
    }

    fn delete_research(
        &self,
        project_id: i64,
        id: i64,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        self.runtime
            .block_on(self.client.delete_research(project_id, id, token))
    }
}
