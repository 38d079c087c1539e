use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;
use serde::Serialize;

use crate::model::category::{self, Category, DEFAULT_COLOR, Icon};
use crate::model::{Project, Section};

/// A section together with the projects that belong to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    #[serde(flatten)]
    pub section: Section,
    pub projects: Vec<Project>,
}

static ORIGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^/]+").expect("valid origin pattern"));

/// Strip an absolute `scheme://host[:port]` origin from a stored image
/// reference, leaving the server-relative path.
pub fn clean_image_ref(image: &str) -> String {
    ORIGIN_RE.replace(image, "").into_owned()
}

/// Resolve an image reference for display: absolute URLs pass through,
/// anything else is joined onto `base`.
pub fn resolve_asset_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.is_empty() {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Pair each section with its projects, preserving server order.
pub fn group_sections(sections: Vec<Section>, projects: &[Project]) -> Vec<SectionView> {
    sections
        .into_iter()
        .map(|mut section| {
            section.image = clean_image_ref(&section.image);
            let projects = projects
                .iter()
                .filter(|p| p.section_id == section.id)
                .cloned()
                .collect();
            SectionView { section, projects }
        })
        .collect()
}

/// Icon and color a section is drawn with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionStyle {
    pub category: Option<&'static Category>,
    pub icon: Icon,
    pub color_hex: &'static str,
}

impl SectionStyle {
    /// Match the section to the catalog by exact title. A matched section
    /// takes the category's icon and color; an unmatched one keeps whatever
    /// icon its stored image names (or the fallback) and the default color.
    pub fn derive(section: &Section) -> Self {
        match category::by_title(&section.name) {
            Some(c) => SectionStyle {
                category: Some(c),
                icon: c.icon,
                color_hex: c.color_hex,
            },
            None => SectionStyle {
                category: None,
                icon: Icon::from_image_ref(&section.image).unwrap_or(Icon::QuestionCircle),
                color_hex: DEFAULT_COLOR,
            },
        }
    }

    /// Label shown on a project card: the matched category title, or the
    /// project's own free-text category.
    pub fn card_category<'a>(&self, project: &'a Project) -> &'a str {
        match self.category {
            Some(c) => c.title,
            None => &project.category,
        }
    }
}

/// Sections whose name equals the title of any selected category id.
/// An empty selection shows every section. Every selected id counts, not
/// only the lowest one as in the web front end.
pub fn visible_sections<'a>(
    views: &'a [SectionView],
    selected: &IndexSet<u8>,
) -> Vec<&'a SectionView> {
    if selected.is_empty() {
        return views.iter().collect();
    }
    let titles: Vec<&str> = selected
        .iter()
        .filter_map(|id| category::by_id(*id))
        .map(|c| c.title)
        .collect();
    views
        .iter()
        .filter(|v| titles.contains(&v.section.name.as_str()))
        .collect()
}

pub fn find_project<'a>(views: &'a [SectionView], id: &str) -> Option<&'a Project> {
    views
        .iter()
        .flat_map(|v| v.projects.iter())
        .find(|p| p.id == id)
}

/// Whether `id` was present in the last fetched list.
pub fn project_exists(views: &[SectionView], id: &str) -> bool {
    find_project(views, id).is_some()
}

pub fn find_section<'a>(views: &'a [SectionView], id: &str) -> Option<&'a SectionView> {
    views.iter().find(|v| v.section.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn section(id: &str, name: &str, image: &str) -> Section {
        Section {
            id: id.into(),
            name: name.into(),
            image: image.into(),
            ods_id: None,
        }
    }

    fn project(id: &str, section_id: &str) -> Project {
        Project {
            id: id.into(),
            title: format!("P{}", id),
            section_id: section_id.into(),
            category: "libre".into(),
            image: String::new(),
            description: None,
        }
    }

    #[test]
    fn groups_projects_under_their_section() {
        let views = group_sections(
            vec![section("1", "Hambre cero", ""), section("2", "Vida submarina", "")],
            &[project("a", "2"), project("b", "1"), project("c", "2"), project("d", "9")],
        );
        let ids: Vec<Vec<&str>> = views
            .iter()
            .map(|v| v.projects.iter().map(|p| p.id.as_str()).collect())
            .collect();
        assert_eq!(ids, vec![vec!["b"], vec!["a", "c"]]);
    }

    #[test]
    fn grouping_strips_image_origin() {
        let views = group_sections(
            vec![section("1", "x", "http://localhost:5000/uploads/FaLeaf")],
            &[],
        );
        assert_eq!(views[0].section.image, "/uploads/FaLeaf");
    }

    #[test]
    fn resolves_relative_asset_paths() {
        assert_eq!(
            resolve_asset_url("http://localhost:5000/", "/uploads/a.png"),
            "http://localhost:5000/uploads/a.png"
        );
        assert_eq!(
            resolve_asset_url("http://localhost:5000", "uploads/a.png"),
            "http://localhost:5000/uploads/a.png"
        );
        assert_eq!(
            resolve_asset_url("http://localhost:5000", "https://cdn.org/a.png"),
            "https://cdn.org/a.png"
        );
        assert_eq!(resolve_asset_url("http://localhost:5000", ""), "");
    }

    #[test]
    fn matched_section_takes_category_style() {
        let style = SectionStyle::derive(&section("1", "Hambre cero", ""));
        let entry = category::by_id(2).unwrap();
        assert_eq!(style.icon, entry.icon);
        assert_eq!(style.color_hex, entry.color_hex);
        assert_eq!(style.card_category(&project("a", "1")), "Hambre cero");
    }

    #[test]
    fn unmatched_section_falls_back_to_defaults() {
        let style = SectionStyle::derive(&section("1", "Hambre Cero", ""));
        assert_eq!(style.category, None);
        assert_eq!(style.icon, Icon::QuestionCircle);
        assert_eq!(style.color_hex, DEFAULT_COLOR);
        assert_eq!(style.card_category(&project("a", "1")), "libre");
    }

    #[test]
    fn unmatched_section_keeps_stored_icon() {
        let style = SectionStyle::derive(&section("1", "Pesca local", "FaFish"));
        assert_eq!(style.icon, Icon::Fish);
        assert_eq!(style.color_hex, DEFAULT_COLOR);
    }

    #[test]
    fn empty_filter_shows_everything() {
        let views = group_sections(
            vec![section("1", "Hambre cero", ""), section("2", "Sin categoría", "")],
            &[],
        );
        assert_eq!(visible_sections(&views, &IndexSet::new()).len(), 2);
    }

    #[test]
    fn filter_matches_any_selected_title() {
        let views = group_sections(
            vec![
                section("1", "Hambre cero", ""),
                section("2", "Vida submarina", ""),
                section("3", "Acción por el clima", ""),
            ],
            &[],
        );
        let selected: IndexSet<u8> = [14, 2].into_iter().collect();
        let names: Vec<&str> = visible_sections(&views, &selected)
            .iter()
            .map(|v| v.section.name.as_str())
            .collect();
        assert_eq!(names, vec!["Hambre cero", "Vida submarina"]);
    }

    #[test]
    fn existence_check_uses_last_fetch() {
        let views = group_sections(vec![section("1", "x", "")], &[project("a", "1")]);
        assert!(project_exists(&views, "a"));
        assert!(!project_exists(&views, "b"));
    }
}
