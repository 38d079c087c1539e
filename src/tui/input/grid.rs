use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::forms::ProjectForm;
use crate::ops::selector::{SelectorMode, SelectorState};
use crate::tui::app::{App, ConfirmAction, DetailScreen, Mode, View};
use crate::tui::form::FormState;

pub(super) fn handle_grid(app: &mut App, key: KeyEvent) {
    app.status_message = None;
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        KeyCode::Down | KeyCode::Char('j') => move_section(app, 1),
        KeyCode::Up | KeyCode::Char('k') => move_section(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.section_cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.section_cursor = app.visible_sections().len().saturating_sub(1);
        }
        KeyCode::Left | KeyCode::Char('h') => step_carousel(app, false),
        KeyCode::Right | KeyCode::Char('l') => step_carousel(app, true),

        KeyCode::Enter => open_detail(app),
        KeyCode::Char('r') => app.refresh(),

        KeyCode::Char('f') => {
            app.page.filter.begin_edit();
            app.selector = Some(SelectorState::new(SelectorMode::Filter));
            app.mode = Mode::Selector;
        }
        KeyCode::Char('a') => {
            app.page.filter.clear();
            app.sync_after_refresh();
            app.status_message = Some("showing all sections".into());
        }
        KeyCode::Char('A') => {
            if app.require_admin() {
                app.selector = Some(SelectorState::new(SelectorMode::Create));
                app.mode = Mode::Selector;
            }
        }
        KeyCode::Char('n') => new_project(app),
        KeyCode::Char('e') => edit_project(app),
        KeyCode::Char('x') => confirm_delete_project(app),
        KeyCode::Char('X') => confirm_delete_section(app),
        KeyCode::Char('L') => toggle_login(app),
        _ => {}
    }
}

fn move_section(app: &mut App, delta: isize) {
    let len = app.visible_sections().len();
    if len == 0 {
        return;
    }
    let next = (app.section_cursor as isize + delta).clamp(0, len as isize - 1);
    app.section_cursor = next as usize;
}

fn step_carousel(app: &mut App, forward: bool) {
    let Some(id) = app.current_section().map(|v| v.section.id.clone()) else {
        return;
    };
    if let Some(c) = app.carousels.get_mut(&id) {
        if forward {
            c.next();
        } else {
            c.prev();
        }
    }
}

fn open_detail(app: &mut App) {
    let Some(project) = app.current_project().cloned() else {
        return;
    };
    match DetailScreen::open(app.api.as_ref(), project) {
        Ok(screen) => {
            app.detail = Some(screen);
            app.view = View::Detail;
        }
        Err(e) => app.report(e),
    }
}

fn new_project(app: &mut App) {
    if !app.require_admin() {
        return;
    }
    let Some(view) = app.current_section() else {
        app.status_message = Some("add an ODS section first (A)".into());
        return;
    };
    app.form = Some(FormState::project(ProjectForm::for_section(&view.section)));
    app.mode = Mode::Form;
}

fn edit_project(app: &mut App) {
    if !app.require_admin() {
        return;
    }
    if let Some(project) = app.current_project() {
        app.form = Some(FormState::project(ProjectForm::for_project(project)));
        app.mode = Mode::Form;
    }
}

fn confirm_delete_project(app: &mut App) {
    if !app.require_admin() {
        return;
    }
    if let Some(p) = app.current_project() {
        app.confirm = Some(ConfirmAction::DeleteProject {
            id: p.id.clone(),
            title: p.title.clone(),
        });
        app.mode = Mode::Confirm;
    }
}

fn confirm_delete_section(app: &mut App) {
    if !app.require_admin() {
        return;
    }
    if let Some(v) = app.current_section() {
        app.confirm = Some(ConfirmAction::DeleteSection {
            id: v.section.id.clone(),
            name: v.section.name.clone(),
        });
        app.mode = Mode::Confirm;
    }
}

fn toggle_login(app: &mut App) {
    if app.auth.session().is_some() {
        match app.auth.logout() {
            Ok(()) => app.status_message = Some("logged out".into()),
            Err(e) => app.status_message = Some(format!("error: {}", e)),
        }
    } else {
        app.form = Some(FormState::login());
        app.mode = Mode::Form;
    }
}
