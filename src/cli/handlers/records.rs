use std::error::Error;

use crate::api::ContentApi;
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::model::DEFAULT_COPYRIGHT;
use crate::ops::detail::{ImpactEditor, ResearchEditor};
use crate::ops::forms::{FlowError, ProjectForm};
use crate::ops::grid;
use crate::ops::page::GridPage;

use super::{Context, admin_session, confirm};

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

pub(super) fn cmd_project(
    ctx: &Context,
    api: &dyn ContentApi,
    action: ProjectAction,
) -> Result<(), Box<dyn Error>> {
    match action {
        ProjectAction::Add(args) => project_add(ctx, api, args),
        ProjectAction::Edit(args) => project_edit(ctx, api, args),
        ProjectAction::Rm(args) => project_rm(ctx, api, args),
        ProjectAction::Show(args) => project_show(ctx, api, args),
    }
}

fn missing_project(id: &str) -> FlowError {
    FlowError::Stale(format!("no project with id {}", id))
}

fn project_add(
    ctx: &Context,
    api: &dyn ContentApi,
    args: ProjectAddArgs,
) -> Result<(), Box<dyn Error>> {
    let auth = admin_session(ctx)?;
    let mut page = GridPage::load(api)?;
    let view = grid::find_section(&page.sections, &args.section)
        .ok_or_else(|| format!("no section with id {}", args.section))?;

    let mut form = ProjectForm::for_section(&view.section);
    form.title = args.title;
    if let Some(category) = args.category {
        form.category = category;
    }
    form.description = args.description;
    form.image = args.image;

    page.save_project(api, auth.token(), &form)?;
    ctx.outcome(&format!("saved project \"{}\"", form.title.trim()))
}

fn project_edit(
    ctx: &Context,
    api: &dyn ContentApi,
    args: ProjectEditArgs,
) -> Result<(), Box<dyn Error>> {
    let auth = admin_session(ctx)?;
    let mut page = GridPage::load(api)?;
    let project = grid::find_project(&page.sections, &args.id).ok_or_else(|| missing_project(&args.id))?;

    let mut form = ProjectForm::for_project(project);
    if let Some(title) = args.title {
        form.title = title;
    }
    if let Some(category) = args.category {
        form.category = category;
    }
    if let Some(description) = args.description {
        form.description = description;
    }
    form.image = args.image;

    page.save_project(api, auth.token(), &form)?;
    ctx.outcome(&format!("saved project \"{}\"", form.title.trim()))
}

fn project_rm(ctx: &Context, api: &dyn ContentApi, args: ProjectRmArgs) -> Result<(), Box<dyn Error>> {
    let auth = admin_session(ctx)?;
    let mut page = GridPage::load(api)?;
    let title = grid::find_project(&page.sections, &args.id)
        .map(|p| p.title.clone())
        .ok_or_else(|| missing_project(&args.id))?;
    if !confirm(&format!("Delete project \"{}\"?", title), args.yes)? {
        return ctx.outcome("aborted");
    }
    page.delete_project(api, auth.token(), &args.id)?;
    ctx.outcome(&format!("deleted project \"{}\"", title))
}

fn project_show(
    ctx: &Context,
    api: &dyn ContentApi,
    args: ProjectShowArgs,
) -> Result<(), Box<dyn Error>> {
    let page = GridPage::load(api)?;
    let project = grid::find_project(&page.sections, &args.id).ok_or_else(|| missing_project(&args.id))?;
    let mut impact = ImpactEditor::new(&project.id)?;
    impact.load(api)?;
    let mut research = ResearchEditor::new(&project.id)?;
    research.load(api)?;

    if ctx.json {
        let detail = ProjectDetailJson {
            project,
            impact: &impact.items,
            research: &research.items,
        };
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        let lines = format_project_detail(
            project,
            &impact.items,
            &research.items,
            ctx.config.asset_base(),
        );
        for line in lines {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Impact
// ---------------------------------------------------------------------------

pub(super) fn cmd_impact(
    ctx: &Context,
    api: &dyn ContentApi,
    action: ImpactAction,
) -> Result<(), Box<dyn Error>> {
    match action {
        ImpactAction::List(args) => {
            let mut editor = ImpactEditor::new(&args.project)?;
            editor.load(api)?;
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&editor.items)?);
            } else if editor.items.is_empty() {
                println!("no impact records");
            } else {
                for item in &editor.items {
                    println!("{}", format_impact_line(item));
                }
            }
            Ok(())
        }
        ImpactAction::Add(args) => {
            let auth = admin_session(ctx)?;
            let mut editor = ImpactEditor::new(&args.project)?;
            editor.title = args.title;
            editor.description = args.description;
            editor.image = args.image;
            let title = editor.title.trim().to_string();
            editor.submit(api, auth.token())?;
            ctx.outcome(&format!("added impact \"{}\"", title))
        }
        ImpactAction::Edit(args) => {
            let auth = admin_session(ctx)?;
            let mut editor = ImpactEditor::new(&args.project)?;
            editor.load(api)?;
            let item = editor
                .items
                .iter()
                .find(|i| i.id == Some(args.id))
                .cloned()
                .ok_or_else(|| FlowError::Stale("That impact record no longer exists.".into()))?;
            editor.begin_edit(&item);
            if let Some(title) = args.title {
                editor.title = title;
            }
            if let Some(description) = args.description {
                editor.description = description;
            }
            editor.image = args.image;
            let title = editor.title.trim().to_string();
            editor.submit(api, auth.token())?;
            ctx.outcome(&format!("saved impact \"{}\"", title))
        }
        ImpactAction::Rm(args) => {
            let auth = admin_session(ctx)?;
            let mut editor = ImpactEditor::new(&args.project)?;
            editor.load(api)?;
            let title = editor
                .items
                .iter()
                .find(|i| i.id == Some(args.id))
                .map(|i| i.title.clone())
                .ok_or_else(|| FlowError::Stale("That impact record no longer exists.".into()))?;
            if !confirm(&format!("Delete impact record \"{}\"?", title), args.yes)? {
                return ctx.outcome("aborted");
            }
            editor.delete(api, auth.token(), args.id)?;
            ctx.outcome(&format!("deleted impact \"{}\"", title))
        }
    }
}

// ---------------------------------------------------------------------------
// Research
// ---------------------------------------------------------------------------

pub(super) fn cmd_research(
    ctx: &Context,
    api: &dyn ContentApi,
    action: ResearchAction,
) -> Result<(), Box<dyn Error>> {
    match action {
        ResearchAction::List(args) => {
            let mut editor = ResearchEditor::new(&args.project)?;
            editor.load(api)?;
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&editor.items)?);
            } else if editor.items.is_empty() {
                println!("no research records");
            } else {
                for item in &editor.items {
                    println!("{}", format_research_line(item));
                }
            }
            Ok(())
        }
        ResearchAction::Add(args) => {
            let auth = admin_session(ctx)?;
            let mut editor = ResearchEditor::new(&args.project)?;
            editor.title = args.title;
            editor.link = args.link;
            editor.copyright = args.copyright.unwrap_or_else(|| DEFAULT_COPYRIGHT.to_string());
            let title = editor.title.trim().to_string();
            editor.submit(api, auth.token())?;
            ctx.outcome(&format!("added research \"{}\"", title))
        }
        ResearchAction::Edit(args) => {
            let auth = admin_session(ctx)?;
            let mut editor = ResearchEditor::new(&args.project)?;
            editor.load(api)?;
            let item = editor
                .items
                .iter()
                .find(|r| r.id == Some(args.id))
                .cloned()
                .ok_or_else(|| FlowError::Stale("That research record no longer exists.".into()))?;
            editor.begin_edit(&item);
            if let Some(title) = args.title {
                editor.title = title;
            }
            if let Some(link) = args.link {
                editor.link = link;
            }
            if let Some(copyright) = args.copyright {
                editor.copyright = copyright;
            }
            let title = editor.title.trim().to_string();
            editor.submit(api, auth.token())?;
            ctx.outcome(&format!("saved research \"{}\"", title))
        }
        ResearchAction::Rm(args) => {
            let auth = admin_session(ctx)?;
            let mut editor = ResearchEditor::new(&args.project)?;
            editor.load(api)?;
            let title = editor
                .items
                .iter()
                .find(|r| r.id == Some(args.id))
                .map(|r| r.title.clone())
                .ok_or_else(|| FlowError::Stale("That research record no longer exists.".into()))?;
            if !confirm(&format!("Delete research record \"{}\"?", title), args.yes)? {
                return ctx.outcome("aborted");
            }
            editor.delete(api, auth.token(), args.id)?;
            ctx.outcome(&format!("deleted research \"{}\"", title))
        }
    }
}
