use std::path::PathBuf;

use crate::api::ContentApi;
use crate::model::{DEFAULT_COPYRIGHT, ImpactDraft, ProjectImpact, ProjectResearch, ResearchDraft};

use super::forms::{FlowError, FormMode, is_blank, load_image};

/// Sub-resources are keyed by a numeric project id.
pub fn parse_project_id(id: &str) -> Result<i64, FlowError> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| FlowError::Validation(format!("invalid project id: {}", id)))
}

/// Impact records of one project plus the add/edit form.
#[derive(Debug, Clone)]
pub struct ImpactEditor {
    pub project_id: i64,
    pub items: Vec<ProjectImpact>,
    pub mode: FormMode<ProjectImpact>,
    pub title: String,
    pub description: String,
    pub image: Option<PathBuf>,
}

impl ImpactEditor {
    pub fn new(project_id: &str) -> Result<Self, FlowError> {
        Ok(ImpactEditor {
            project_id: parse_project_id(project_id)?,
            items: Vec::new(),
            mode: FormMode::Creating,
            title: String::new(),
            description: String::new(),
            image: None,
        })
    }

    pub fn load(&mut self, api: &dyn ContentApi) -> Result<(), FlowError> {
        self.items = api.get_impact(self.project_id).inspect_err(|e| {
            tracing::error!(error = %e, project_id = self.project_id, "could not fetch impact");
        })?;
        Ok(())
    }

    /// Switch to editing `item`, copying its fields into the form.
    pub fn begin_edit(&mut self, item: &ProjectImpact) {
        self.title = item.title.clone();
        self.description = item.description.clone();
        self.image = None;
        self.mode = FormMode::Editing(item.clone());
    }

    /// Back to an empty create form.
    pub fn cancel(&mut self) {
        self.mode = FormMode::Creating;
        self.title.clear();
        self.description.clear();
        self.image = None;
    }

    /// Title and description are required; nothing is sent otherwise.
    pub fn submit(&mut self, api: &dyn ContentApi, token: Option<&str>) -> Result<(), FlowError> {
        if is_blank(&self.title) || is_blank(&self.description) {
            return Err(FlowError::Validation(
                "Title and description are required.".into(),
            ));
        }
        let editing_id = match &self.mode {
            FormMode::Editing(item) => Some(self.existing_id(item.id)?),
            FormMode::Creating => None,
        };
        let draft = ImpactDraft {
            project_id: self.project_id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
        };
        let image = load_image(self.image.as_ref())?;

        let result = match editing_id {
            Some(id) => api.update_impact(self.project_id, id, &draft, image.as_ref(), token),
            None => api.add_impact(self.project_id, &draft, image.as_ref(), token),
        };
        result.inspect_err(|e| {
            tracing::error!(error = %e, project_id = self.project_id, "could not save impact");
        })?;
        self.cancel();
        self.reload(api);
        Ok(())
    }

    /// Delete a record. The caller confirms with the user first.
    pub fn delete(
        &mut self,
        api: &dyn ContentApi,
        token: Option<&str>,
        id: i64,
    ) -> Result<(), FlowError> {
        api.delete_impact(self.project_id, id, token)
            .inspect_err(|e| {
                tracing::error!(error = %e, project_id = self.project_id, id, "could not delete impact");
            })?;
        if self.mode.editing().is_some_and(|i| i.id == Some(id)) {
            self.cancel();
        }
        self.reload(api);
        Ok(())
    }

    fn existing_id(&self, id: Option<i64>) -> Result<i64, FlowError> {
        id.filter(|id| self.items.iter().any(|i| i.id == Some(*id)))
            .ok_or_else(|| FlowError::Stale("That impact record no longer exists.".into()))
    }

    fn reload(&mut self, api: &dyn ContentApi) {
        if let Err(e) = self.load(api) {
            tracing::warn!(error = %e, "refetch of impact failed");
        }
    }
}

/// Research records of one project plus the add/edit form.
#[derive(Debug, Clone)]
pub struct ResearchEditor {
    pub project_id: i64,
    pub items: Vec<ProjectResearch>,
    pub mode: FormMode<ProjectResearch>,
    pub title: String,
    pub link: String,
    pub copyright: String,
}

impl ResearchEditor {
    pub fn new(project_id: &str) -> Result<Self, FlowError> {
        Ok(ResearchEditor {
            project_id: parse_project_id(project_id)?,
            items: Vec::new(),
            mode: FormMode::Creating,
            title: String::new(),
            link: String::new(),
            copyright: DEFAULT_COPYRIGHT.to_string(),
        })
    }

    pub fn load(&mut self, api: &dyn ContentApi) -> Result<(), FlowError> {
        self.items = api.get_research(self.project_id).inspect_err(|e| {
            tracing::error!(error = %e, project_id = self.project_id, "could not fetch research");
        })?;
        Ok(())
    }

    pub fn begin_edit(&mut self, item: &ProjectResearch) {
        self.title = item.title.clone();
        self.link = item.link.clone();
        self.copyright = item.copyright_label().to_string();
        self.mode = FormMode::Editing(item.clone());
    }

    pub fn cancel(&mut self) {
        self.mode = FormMode::Creating;
        self.title.clear();
        self.link.clear();
        self.copyright = DEFAULT_COPYRIGHT.to_string();
    }

    /// Title and link are required; an empty copyright is sent as `CC`.
    pub fn submit(&mut self, api: &dyn ContentApi, token: Option<&str>) -> Result<(), FlowError> {
        if is_blank(&self.title) || is_blank(&self.link) {
            return Err(FlowError::Validation("Title and link are required.".into()));
        }
        let editing_id = match &self.mode {
            FormMode::Editing(item) => Some(self.existing_id(item.id)?),
            FormMode::Creating => None,
        };
        let copyright = if is_blank(&self.copyright) {
            DEFAULT_COPYRIGHT.to_string()
        } else {
            self.copyright.trim().to_string()
        };
        let draft = ResearchDraft {
            project_id: self.project_id,
            title: self.title.trim().to_string(),
            link: self.link.trim().to_string(),
            copyright,
        };

        let result = match editing_id {
            Some(id) => api.update_research(self.project_id, id, &draft, token),
            None => api.add_research(self.project_id, &draft, token),
        };
        result.inspect_err(|e| {
            tracing::error!(error = %e, project_id = self.project_id, "could not save research");
        })?;
        self.cancel();
        self.reload(api);
        Ok(())
    }

    pub fn delete(
        &mut self,
        api: &dyn ContentApi,
        token: Option<&str>,
        id: i64,
    ) -> Result<(), FlowError> {
        api.delete_research(self.project_id, id, token)
            .inspect_err(|e| {
                tracing::error!(error = %e, project_id = self.project_id, id, "could not delete research");
            })?;
        if self.mode.editing().is_some_and(|r| r.id == Some(id)) {
            self.cancel();
        }
        self.reload(api);
        Ok(())
    }

    fn existing_id(&self, id: Option<i64>) -> Result<i64, FlowError> {
        id.filter(|id| self.items.iter().any(|r| r.id == Some(*id)))
            .ok_or_else(|| FlowError::Stale("That research record no longer exists.".into()))
    }

    fn reload(&mut self, api: &dyn ContentApi) {
        if let Err(e) = self.load(api) {
            tracing::warn!(error = %e, "refetch of research failed");
        }
    }
}
