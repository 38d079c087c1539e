use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::session_io::SessionError;
use crate::ops::forms::FlowError;
use crate::tui::app::{App, Mode};
use crate::tui::form::{FormKind, FormState};

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    let Some(form) = app.form.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => cancel(app),
        (_, KeyCode::Enter) => submit(app),
        (_, KeyCode::Tab) | (_, KeyCode::Down) => form.focus_next(),
        (_, KeyCode::BackTab) | (_, KeyCode::Up) => form.focus_prev(),
        (_, KeyCode::Left) => form.focused().left(),
        (_, KeyCode::Right) => form.focused().right(),
        (_, KeyCode::Home) => form.focused().home(),
        (_, KeyCode::End) => form.focused().end(),
        (_, KeyCode::Backspace) => form.focused().backspace(),
        (_, KeyCode::Delete) => form.focused().delete(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            let field = form.focused();
            field.value.clear();
            field.cursor = 0;
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => form.focused().insert(c),
        _ => {}
    }
}

fn cancel(app: &mut App) {
    if let Some(form) = app.form.take() {
        if let Some(d) = app.detail.as_mut() {
            match form.kind {
                FormKind::Impact => d.impact.cancel(),
                FormKind::Research => d.research.cancel(),
                _ => {}
            }
        }
    }
    app.mode = Mode::Navigate;
}

/// Submit the open form. On failure the form stays open with its input,
/// unless its target no longer exists.
fn submit(app: &mut App) {
    let Some(form) = app.form.take() else {
        return;
    };
    let result = match &form.kind {
        FormKind::Project(_) => submit_project(app, &form),
        FormKind::Impact => submit_impact(app, &form),
        FormKind::Research => submit_research(app, &form),
        FormKind::Login => submit_login(app, &form),
    };
    match result {
        Ok(message) => {
            app.status_message = Some(message);
            app.mode = Mode::Navigate;
        }
        // The record being edited is gone; editing ends
        Err(e @ FlowError::Stale(_)) => {
            app.form = Some(form);
            cancel(app);
            app.report(e);
        }
        Err(e) => {
            app.form = Some(form);
            app.report(e);
        }
    }
}

fn submit_project(app: &mut App, form: &FormState) -> Result<String, FlowError> {
    let Some(project) = form.project_form() else {
        return Err(FlowError::Validation("not a project form".into()));
    };
    let token = app.auth.token().map(str::to_string);
    let result = app
        .page
        .save_project(app.api.as_ref(), token.as_deref(), &project);
    app.sync_after_refresh();
    result?;
    Ok(format!("saved \"{}\"", project.title.trim()))
}

fn submit_impact(app: &mut App, form: &FormState) -> Result<String, FlowError> {
    let token = app.auth.token().map(str::to_string);
    let Some(d) = app.detail.as_mut() else {
        return Ok(String::new());
    };
    d.impact.title = form.value(0).to_string();
    d.impact.description = form.value(1).to_string();
    d.impact.image = form.path(2);
    d.impact.submit(app.api.as_ref(), token.as_deref())?;
    d.clamp_cursors();
    Ok("impact saved".into())
}

fn submit_research(app: &mut App, form: &FormState) -> Result<String, FlowError> {
    let token = app.auth.token().map(str::to_string);
    let Some(d) = app.detail.as_mut() else {
        return Ok(String::new());
    };
    d.research.title = form.value(0).to_string();
    d.research.link = form.value(1).to_string();
    d.research.copyright = form.value(2).to_string();
    d.research.submit(app.api.as_ref(), token.as_deref())?;
    d.clamp_cursors();
    Ok("research saved".into())
}

fn submit_login(app: &mut App, form: &FormState) -> Result<String, FlowError> {
    let credentials = form.credentials();
    if credentials.email.is_empty() || credentials.password.is_empty() {
        return Err(FlowError::Validation("Email and password are required.".into()));
    }
    match app.auth.login(app.api.as_ref(), &credentials) {
        Ok(session) => Ok(format!("logged in as {}", session.user.email)),
        Err(e) => Err(login_failure(e)),
    }
}

/// A server answer (bad credentials) is shown as an alert; a failed
/// request is reported like any other remote error.
fn login_failure(err: SessionError) -> FlowError {
    match err {
        SessionError::Login(e) if e.status().is_none() => FlowError::Remote(e),
        other => FlowError::Validation(other.to_string()),
    }
}
