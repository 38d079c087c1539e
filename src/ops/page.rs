use crate::api::ContentApi;
use crate::model::NewSection;
use crate::model::category::Category;

use super::forms::{FlowError, FormMode, ProjectForm, load_image};
use super::grid::{self, SectionView};
use super::selector::FilterState;

/// State behind the project grid: the last fetched sections with their
/// projects, and the category filter.
///
/// Every mutation is a remote call followed by a full refetch; the local
/// list is never patched in place.
#[derive(Debug, Clone, Default)]
pub struct GridPage {
    pub sections: Vec<SectionView>,
    pub filter: FilterState,
}

impl GridPage {
    pub fn load(api: &dyn ContentApi) -> Result<Self, FlowError> {
        let mut page = GridPage::default();
        page.refresh(api)?;
        Ok(page)
    }

    /// Refetch sections and projects and regroup them.
    pub fn refresh(&mut self, api: &dyn ContentApi) -> Result<(), FlowError> {
        let sections = api.get_sections().inspect_err(|e| {
            tracing::error!(error = %e, "could not fetch sections");
        })?;
        let projects = api.get_projects().inspect_err(|e| {
            tracing::error!(error = %e, "could not fetch projects");
        })?;
        self.sections = grid::group_sections(sections, &projects);
        tracing::debug!(sections = self.sections.len(), "grid refreshed");
        Ok(())
    }

    /// Sections passing the applied filter.
    pub fn visible(&self) -> Vec<&SectionView> {
        grid::visible_sections(&self.sections, &self.filter.applied)
    }

    /// Create a section for `category`, refusing one whose title already
    /// names an existing section.
    pub fn add_section(
        &mut self,
        api: &dyn ContentApi,
        token: Option<&str>,
        category: &Category,
    ) -> Result<(), FlowError> {
        if self.sections.iter().any(|v| v.section.name == category.title) {
            return Err(FlowError::Validation(format!(
                "\"{}\" is already registered.",
                category.title
            )));
        }
        let data = NewSection {
            name: category.title.to_string(),
            image: category.icon.name().to_string(),
            ods_id: category.id,
        };
        api.create_section(&data, token).inspect_err(|e| {
            tracing::error!(error = %e, ods_id = category.id, "could not add section");
        })?;
        tracing::info!(ods_id = category.id, "section added");
        self.refresh_after_write(api);
        Ok(())
    }

    pub fn delete_section(
        &mut self,
        api: &dyn ContentApi,
        token: Option<&str>,
        id: &str,
    ) -> Result<(), FlowError> {
        api.delete_section(id, token).inspect_err(|e| {
            tracing::error!(error = %e, section_id = id, "could not delete section");
        })?;
        tracing::info!(section_id = id, "section deleted");
        self.refresh_after_write(api);
        Ok(())
    }

    /// Create or update a project from `form`. An update whose target is no
    /// longer in the last fetched list is aborted with [`FlowError::Stale`].
    pub fn save_project(
        &mut self,
        api: &dyn ContentApi,
        token: Option<&str>,
        form: &ProjectForm,
    ) -> Result<(), FlowError> {
        let draft = form.validate()?;
        if let FormMode::Editing(id) = &form.mode
            && !grid::project_exists(&self.sections, id)
        {
            return Err(FlowError::Stale("That project no longer exists.".into()));
        }
        let image = load_image(form.image.as_ref())?;

        let result = match &form.mode {
            FormMode::Editing(id) => api.update_project(id, &draft, image.as_ref(), token),
            FormMode::Creating => api.create_project(&draft, image.as_ref(), token),
        };
        result.inspect_err(|e| {
            tracing::error!(error = %e, title = %draft.title, "could not save project");
        })?;
        tracing::info!(title = %draft.title, editing = form.mode.is_editing(), "project saved");
        self.refresh_after_write(api);
        Ok(())
    }

    pub fn delete_project(
        &mut self,
        api: &dyn ContentApi,
        token: Option<&str>,
        id: &str,
    ) -> Result<(), FlowError> {
        if !grid::project_exists(&self.sections, id) {
            return Err(FlowError::Stale("That project no longer exists.".into()));
        }
        api.delete_project(id, token).inspect_err(|e| {
            tracing::error!(error = %e, project_id = id, "could not delete project");
        })?;
        tracing::info!(project_id = id, "project deleted");
        self.refresh_after_write(api);
        Ok(())
    }

    /// The write already succeeded; a failed refetch only leaves the
    /// previous list on screen.
    fn refresh_after_write(&mut self, api: &dyn ContentApi) {
        if let Err(e) = self.refresh(api) {
            tracing::warn!(error = %e, "refetch after write failed; showing previous list");
        }
    }
}
