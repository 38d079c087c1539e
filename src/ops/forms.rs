use std::path::PathBuf;

use crate::api::ApiError;
use crate::model::{ImageError, ImageUpload, Project, ProjectDraft, Section};

/// Whether a form creates a new record or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<T> {
    Creating,
    Editing(T),
}

impl<T> FormMode<T> {
    pub fn is_editing(&self) -> bool {
        matches!(self, FormMode::Editing(_))
    }

    pub fn editing(&self) -> Option<&T> {
        match self {
            FormMode::Editing(t) => Some(t),
            FormMode::Creating => None,
        }
    }
}

/// Errors surfaced by the page and detail flows.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Required input is missing; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The target is gone from the last fetched list; the action was aborted.
    #[error("{0}")]
    Stale(String),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("{}", .0.user_message())]
    Remote(#[from] ApiError),
}

impl FlowError {
    /// Validation, stale-state and image errors are shown as a blocking
    /// alert; remote failures only get a status line.
    pub fn is_alert(&self) -> bool {
        !matches!(self, FlowError::Remote(_))
    }
}

/// Read the optional image attached to a form.
pub fn load_image(path: Option<&PathBuf>) -> Result<Option<ImageUpload>, FlowError> {
    match path {
        Some(p) => Ok(Some(ImageUpload::from_path(p)?)),
        None => Ok(None),
    }
}

/// Treat an empty or whitespace-only field as missing.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Add/edit project form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectForm {
    /// Id of the project being edited
    pub mode: FormMode<String>,
    pub section_id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: Option<PathBuf>,
    /// Stored image of the project being edited, for display
    pub current_image: Option<String>,
}

impl ProjectForm {
    /// Empty form for a new project in `section`, with the category
    /// pre-filled from the section name.
    pub fn for_section(section: &Section) -> Self {
        ProjectForm {
            mode: FormMode::Creating,
            section_id: section.id.clone(),
            title: String::new(),
            category: section.name.clone(),
            description: String::new(),
            image: None,
            current_image: None,
        }
    }

    pub fn for_project(project: &Project) -> Self {
        ProjectForm {
            mode: FormMode::Editing(project.id.clone()),
            section_id: project.section_id.clone(),
            title: project.title.clone(),
            category: project.category.clone(),
            description: project.description.clone().unwrap_or_default(),
            image: None,
            current_image: (!project.image.is_empty()).then(|| project.image.clone()),
        }
    }

    /// All four text fields are required.
    pub fn validate(&self) -> Result<ProjectDraft, FlowError> {
        if is_blank(&self.title)
            || is_blank(&self.section_id)
            || is_blank(&self.category)
            || is_blank(&self.description)
        {
            return Err(FlowError::Validation(
                "Fill in every field before saving.".into(),
            ));
        }
        Ok(ProjectDraft {
            title: self.title.trim().to_string(),
            category: self.category.trim().to_string(),
            description: self.description.trim().to_string(),
            section_id: self.section_id.clone(),
        })
    }
}
