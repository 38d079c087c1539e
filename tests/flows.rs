//! End-to-end flows against the in-memory content API: the page and detail
//! operations the TUI drives, and the CLI handlers on top of them.

use clap::Parser;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use odsgrid::api::{ContentApi, MemoryApi};
use odsgrid::cli::commands::Cli;
use odsgrid::cli::handlers::{Context, run_remote};
use odsgrid::model::category;
use odsgrid::model::{AppConfig, Credentials};
use odsgrid::ops::detail::ImpactEditor;
use odsgrid::ops::forms::{FlowError, ProjectForm};
use odsgrid::ops::page::GridPage;

const ADMIN: &str = "admin@ods.org";
const PASSWORD: &str = "pw";

fn api_with_admin() -> (MemoryApi, String) {
    let api = MemoryApi::new();
    let session = api.add_account(ADMIN, PASSWORD, "admin");
    (api, session.token)
}

/// Run one CLI invocation (without the leading `odsg`) against `api`.
fn odsg(ctx: &Context, api: &dyn ContentApi, args: &[&str]) -> Result<(), String> {
    let cli = Cli::try_parse_from(std::iter::once("odsg").chain(args.iter().copied()))
        .map_err(|e| e.to_string())?;
    let cmd = cli.command.ok_or("no subcommand")?;
    run_remote(ctx, api, cmd).map_err(|e| e.to_string())
}

fn cli_context(tmp: &TempDir) -> Context {
    Context::new(AppConfig::default(), tmp.path().join("config.toml"), false)
}

#[test]
fn created_project_is_fetched_under_its_section_and_delete_removes_it() {
    let (api, token) = api_with_admin();
    let mut page = GridPage::load(&api).unwrap();
    page.add_section(&api, Some(&token), category::by_id(2).unwrap())
        .unwrap();
    let section = page.sections[0].section.clone();

    let mut form = ProjectForm::for_section(&section);
    form.title = "Huerta comunitaria".into();
    form.description = "Alimentos para el barrio".into();
    page.save_project(&api, Some(&token), &form).unwrap();

    let fetched = api.get_projects().unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].section_id, section.id);
    assert_eq!(fetched[0].category, "Hambre cero");
    assert_eq!(page.sections[0].projects.len(), 1);

    let id = fetched[0].id.clone();
    page.delete_project(&api, Some(&token), &id).unwrap();
    assert!(api.get_projects().unwrap().is_empty());
    assert!(page.sections[0].projects.is_empty());
}

#[test]
fn impact_with_empty_description_is_not_sent() {
    let (api, token) = api_with_admin();
    let mut page = GridPage::load(&api).unwrap();
    page.add_section(&api, Some(&token), category::by_id(6).unwrap())
        .unwrap();
    let mut form = ProjectForm::for_section(&page.sections[0].section);
    form.title = "Pozos".into();
    form.description = "Agua segura".into();
    page.save_project(&api, Some(&token), &form).unwrap();
    let project_id = page.sections[0].projects[0].id.clone();

    let mut editor = ImpactEditor::new(&project_id).unwrap();
    editor.title = "Familias".into();
    editor.description = "   ".into();
    let err = editor.submit(&api, Some(&token)).unwrap_err();
    assert!(matches!(err, FlowError::Validation(_)));
    assert_eq!(api.call_count("add_impact"), 0);
}

#[test]
fn deleting_a_section_drops_its_projects() {
    let (api, token) = api_with_admin();
    let mut page = GridPage::load(&api).unwrap();
    page.add_section(&api, Some(&token), category::by_id(14).unwrap())
        .unwrap();
    let section_id = page.sections[0].section.id.clone();
    let mut form = ProjectForm::for_section(&page.sections[0].section);
    form.title = "Arrecifes".into();
    form.description = "Monitoreo".into();
    page.save_project(&api, Some(&token), &form).unwrap();

    page.delete_section(&api, Some(&token), &section_id).unwrap();
    assert!(page.sections.is_empty());
    assert!(api.get_projects().unwrap().is_empty());
}

#[test]
fn viewer_cannot_write() {
    let api = MemoryApi::new();
    let viewer = api.add_account("ana@ods.org", "pw", "user");
    let mut page = GridPage::load(&api).unwrap();
    let err = page
        .add_section(&api, Some(&viewer.token), category::by_id(1).unwrap())
        .unwrap_err();
    assert!(matches!(err, FlowError::Remote(_)));
    assert_eq!(err.to_string(), "acceso denegado");
}

#[test]
fn cli_session_and_content_round() {
    let tmp = TempDir::new().unwrap();
    let ctx = cli_context(&tmp);
    let (api, _) = api_with_admin();

    let err = odsg(&ctx, &api, &["section", "add", "2"]).unwrap_err();
    assert!(err.starts_with("not logged in"));

    odsg(&ctx, &api, &["login", "--email", ADMIN, "--password", PASSWORD]).unwrap();
    assert!(tmp.path().join("session.json").exists());

    odsg(&ctx, &api, &["section", "add", "2"]).unwrap();
    let err = odsg(&ctx, &api, &["section", "add", "2"]).unwrap_err();
    assert_eq!(err, "\"Hambre cero\" is already registered.");

    let section_id = api.get_sections().unwrap()[0].id.clone();
    odsg(
        &ctx,
        &api,
        &[
            "project",
            "add",
            "--section",
            &section_id,
            "--title",
            "Huerta",
            "--description",
            "Alimentos",
        ],
    )
    .unwrap();
    let project_id = api.get_projects().unwrap()[0].id.clone();
    let numeric: i64 = project_id.parse().unwrap();

    odsg(&ctx, &api, &["project", "edit", &project_id, "--title", "Huerta escolar"]).unwrap();
    assert_eq!(api.get_projects().unwrap()[0].title, "Huerta escolar");

    odsg(
        &ctx,
        &api,
        &["research", "add", &project_id, "--title", "Informe", "--link", "http://x.org"],
    )
    .unwrap();
    let research = api.get_research(numeric).unwrap();
    assert_eq!(research.len(), 1);
    assert_eq!(research[0].copyright_label(), "CC");

    odsg(
        &ctx,
        &api,
        &["impact", "add", &project_id, "--title", "Familias", "--description", "120"],
    )
    .unwrap();
    let impact_id = api.get_impact(numeric).unwrap()[0].id.unwrap().to_string();
    odsg(&ctx, &api, &["impact", "rm", &project_id, &impact_id, "--yes"]).unwrap();
    assert!(api.get_impact(numeric).unwrap().is_empty());

    odsg(&ctx, &api, &["project", "show", &project_id]).unwrap();
    odsg(&ctx, &api, &["sections", "--ods", "2"]).unwrap();

    odsg(&ctx, &api, &["section", "rm", &section_id, "--yes"]).unwrap();
    assert!(api.get_sections().unwrap().is_empty());
    assert!(api.get_projects().unwrap().is_empty());
}

#[test]
fn cli_rejects_unknown_records() {
    let tmp = TempDir::new().unwrap();
    let ctx = cli_context(&tmp);
    let (api, _) = api_with_admin();
    odsg(&ctx, &api, &["login", "--email", ADMIN, "--password", PASSWORD]).unwrap();

    let err = odsg(&ctx, &api, &["project", "rm", "99", "--yes"]).unwrap_err();
    assert_eq!(err, "no project with id 99");
    let err = odsg(&ctx, &api, &["impact", "list", "abc"]).unwrap_err();
    assert_eq!(err, "invalid project id: abc");
    let err = odsg(&ctx, &api, &["sections", "--ods", "0"]).unwrap_err();
    assert_eq!(err, "unknown ODS id 0 (expected 1-17)");
}

#[test]
fn login_rejection_leaves_no_session() {
    let tmp = TempDir::new().unwrap();
    let ctx = cli_context(&tmp);
    let (api, _) = api_with_admin();
    let err = odsg(&ctx, &api, &["login", "--email", ADMIN, "--password", "wrong"]).unwrap_err();
    assert!(err.starts_with("login failed"));
    assert!(!tmp.path().join("session.json").exists());

    // The credentials type carries exactly what the server expects.
    let creds = Credentials {
        email: ADMIN.into(),
        password: PASSWORD.into(),
    };
    assert!(api.login(&creds).is_ok());
}
