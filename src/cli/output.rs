use serde::Serialize;

use crate::model::category::Category;
use crate::model::{Project, ProjectImpact, ProjectResearch};
use crate::ops::grid::{SectionStyle, SectionView, resolve_asset_url};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct CategoryJson {
    pub id: u8,
    pub title: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

#[derive(Serialize)]
pub struct ProjectDetailJson<'a> {
    #[serde(flatten)]
    pub project: &'a Project,
    pub impact: &'a [ProjectImpact],
    pub research: &'a [ProjectResearch],
}

/// Result of a write command
#[derive(Serialize)]
pub struct Outcome<'a> {
    pub ok: bool,
    pub message: &'a str,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn category_to_json(c: &'static Category) -> CategoryJson {
    CategoryJson {
        id: c.id,
        title: c.title,
        color: c.color_hex,
        icon: c.icon.name(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One catalog row: id, glyph, title and color
pub fn format_category_line(c: &Category) -> String {
    format!("{:>2} {} {} ({})", c.id, c.icon.glyph(), c.title, c.color_hex)
}

/// A section header followed by one indented line per project
pub fn format_section_listing(view: &SectionView) -> Vec<String> {
    let style = SectionStyle::derive(&view.section);
    let count = match view.projects.len() {
        1 => "1 project".to_string(),
        n => format!("{} projects", n),
    };
    let mut lines = vec![format!(
        "{} {} [{}] ({})",
        style.icon.glyph(),
        view.section.name,
        view.section.id,
        count
    )];
    for p in &view.projects {
        lines.push(format!("  {}  {}", p.id, p.title));
    }
    lines
}

/// Detailed project view with its impact and research records
pub fn format_project_detail(
    project: &Project,
    impact: &[ProjectImpact],
    research: &[ProjectResearch],
    asset_base: &str,
) -> Vec<String> {
    let mut lines = vec![format!("{}  {}", project.id, project.title)];
    lines.push(format!("category: {}", project.category));
    lines.push(format!("section: {}", project.section_id));
    if let Some(d) = project.description.as_deref() {
        lines.push(format!("description: {}", d));
    }
    if !project.image.is_empty() {
        lines.push(format!("image: {}", resolve_asset_url(asset_base, &project.image)));
    }

    lines.push(String::new());
    lines.push(format!("impact ({}):", impact.len()));
    for i in impact {
        lines.push(format!("  {}", format_impact_line(i)));
    }
    lines.push(String::new());
    lines.push(format!("research ({}):", research.len()));
    for r in research {
        lines.push(format!("  {}", format_research_line(r)));
    }
    lines
}

fn record_id(id: Option<i64>) -> String {
    id.map_or_else(|| "-".to_string(), |id| id.to_string())
}

pub fn format_impact_line(i: &ProjectImpact) -> String {
    format!("{}  {}: {}", record_id(i.id), i.title, i.description)
}

pub fn format_research_line(r: &ProjectResearch) -> String {
    format!(
        "{}  {}  {}  \u{00A9} {}",
        record_id(r.id),
        r.title,
        r.link,
        r.copyright_label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;
    use crate::model::category;

    fn project(id: &str, title: &str) -> Project {
        Project {
            id: id.into(),
            title: title.into(),
            section_id: "s1".into(),
            category: "Hambre cero".into(),
            image: String::new(),
            description: Some("Huertos".into()),
        }
    }

    #[test]
    fn section_listing() {
        let view = SectionView {
            section: Section {
                id: "s1".into(),
                name: "Hambre cero".into(),
                image: "FaLeaf".into(),
                ods_id: Some(2),
            },
            projects: vec![project("p1", "Huerta"), project("p2", "Comedor")],
        };
        insta::assert_snapshot!(format_section_listing(&view).join("\n"), @r"
        ☘ Hambre cero [s1] (2 projects)
          p1  Huerta
          p2  Comedor
        ");
    }

    #[test]
    fn catalog_line() {
        let c = category::by_id(14).unwrap();
        assert_eq!(format_category_line(c), "14 \u{2652} Vida submarina (#0A97D9)");
    }

    #[test]
    fn research_without_copyright_shows_default() {
        let r = ProjectResearch {
            id: Some(4),
            project_id: 1,
            title: "Informe".into(),
            link: "http://x.org".into(),
            copyright: None,
        };
        assert_eq!(format_research_line(&r), "4  Informe  http://x.org  \u{00A9} CC");
    }

    #[test]
    fn detail_resolves_image_against_asset_base() {
        let mut p = project("7", "Huerta");
        p.image = "/uploads/a.png".into();
        let lines = format_project_detail(&p, &[], &[], "http://cdn.test");
        assert!(lines.contains(&"image: http://cdn.test/uploads/a.png".to_string()));
        assert!(lines.contains(&"impact (0):".to_string()));
    }
}
