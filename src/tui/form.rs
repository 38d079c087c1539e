use std::path::PathBuf;

use crate::model::{Credentials, ProjectImpact, ProjectResearch};
use crate::ops::forms::ProjectForm;
use crate::util::unicode;

/// Single-line text input with a grapheme-aware cursor (byte offset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    pub cursor: usize,
    /// Render as bullets
    pub masked: bool,
}

impl TextField {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        TextField {
            label,
            cursor: value.len(),
            value,
            masked: false,
        }
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.value, self.cursor) {
            self.value.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.value, self.cursor) {
            self.value.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Text as drawn on screen.
    pub fn display(&self) -> String {
        if self.masked {
            unicode::mask(&self.value)
        } else {
            self.value.clone()
        }
    }

    /// Cursor position in display cells.
    pub fn display_cursor(&self) -> usize {
        if self.masked {
            unicode::mask(&self.value[..self.cursor]).chars().count()
        } else {
            unicode::display_col(&self.value, self.cursor)
        }
    }
}

/// What a form popup submits to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    /// Add/edit project; carries the ids the text fields do not show
    Project(ProjectForm),
    Impact,
    Research,
    Login,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub kind: FormKind,
    pub title: String,
    pub fields: Vec<TextField>,
    pub focus: usize,
}

const PROJECT_TITLE: usize = 0;
const PROJECT_CATEGORY: usize = 1;
const PROJECT_DESCRIPTION: usize = 2;
const PROJECT_IMAGE: usize = 3;

impl FormState {
    pub fn project(form: ProjectForm) -> Self {
        let title = if form.mode.is_editing() {
            "Edit project"
        } else {
            "New project"
        };
        let fields = vec![
            TextField::new("Title", form.title.clone()),
            TextField::new("Category", form.category.clone()),
            TextField::new("Description", form.description.clone()),
            TextField::new("Image file", ""),
        ];
        FormState {
            kind: FormKind::Project(form),
            title: title.into(),
            fields,
            focus: 0,
        }
    }

    pub fn impact(editing: Option<&ProjectImpact>) -> Self {
        let (title, t, d) = match editing {
            Some(i) => ("Edit impact", i.title.as_str(), i.description.as_str()),
            None => ("New impact", "", ""),
        };
        FormState {
            kind: FormKind::Impact,
            title: title.into(),
            fields: vec![
                TextField::new("Title", t),
                TextField::new("Description", d),
                TextField::new("Image file", ""),
            ],
            focus: 0,
        }
    }

    pub fn research(editing: Option<&ProjectResearch>) -> Self {
        let (title, t, l, c) = match editing {
            Some(r) => (
                "Edit research",
                r.title.as_str(),
                r.link.as_str(),
                r.copyright_label(),
            ),
            None => ("New research", "", "", crate::model::DEFAULT_COPYRIGHT),
        };
        FormState {
            kind: FormKind::Research,
            title: title.into(),
            fields: vec![
                TextField::new("Title", t),
                TextField::new("Link", l),
                TextField::new("Copyright", c),
            ],
            focus: 0,
        }
    }

    pub fn login() -> Self {
        FormState {
            kind: FormKind::Login,
            title: "Log in".into(),
            fields: vec![
                TextField::new("Email", ""),
                TextField::new("Password", "").masked(),
            ],
            focus: 0,
        }
    }

    pub fn focused(&mut self) -> &mut TextField {
        let i = self.focus.min(self.fields.len() - 1);
        &mut self.fields[i]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn value(&self, i: usize) -> &str {
        self.fields.get(i).map_or("", |f| f.value.as_str())
    }

    /// Optional file path field: blank means no image.
    pub fn path(&self, i: usize) -> Option<PathBuf> {
        let v = self.value(i).trim();
        (!v.is_empty()).then(|| PathBuf::from(v))
    }

    /// The project form with the typed fields applied.
    pub fn project_form(&self) -> Option<ProjectForm> {
        let FormKind::Project(base) = &self.kind else {
            return None;
        };
        let mut form = base.clone();
        form.title = self.value(PROJECT_TITLE).to_string();
        form.category = self.value(PROJECT_CATEGORY).to_string();
        form.description = self.value(PROJECT_DESCRIPTION).to_string();
        form.image = self.path(PROJECT_IMAGE);
        Some(form)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.value(0).trim().to_string(),
            password: self.value(1).to_string(),
        }
    }
}
