use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::forms::FlowError;
use crate::tui::app::{App, ConfirmAction, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            let action = app.confirm.take();
            app.mode = Mode::Navigate;
            if let Some(action) = action {
                match run_action(app, &action) {
                    Ok(message) => app.status_message = Some(message),
                    Err(e) => app.report(e),
                }
            }
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.confirm = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

fn run_action(app: &mut App, action: &ConfirmAction) -> Result<String, FlowError> {
    let token = app.auth.token().map(str::to_string);
    let token = token.as_deref();
    match action {
        ConfirmAction::DeleteSection { id, name } => {
            let result = app.page.delete_section(app.api.as_ref(), token, id);
            app.sync_after_refresh();
            result.map(|_| format!("deleted \"{}\"", name))
        }
        ConfirmAction::DeleteProject { id, title } => {
            let result = app.page.delete_project(app.api.as_ref(), token, id);
            app.sync_after_refresh();
            result.map(|_| format!("deleted \"{}\"", title))
        }
        ConfirmAction::DeleteImpact { id, title } => {
            let Some(d) = app.detail.as_mut() else {
                return Ok(String::new());
            };
            d.impact.delete(app.api.as_ref(), token, *id)?;
            d.clamp_cursors();
            Ok(format!("deleted \"{}\"", title))
        }
        ConfirmAction::DeleteResearch { id, title } => {
            let Some(d) = app.detail.as_mut() else {
                return Ok(String::new());
            };
            d.research.delete(app.api.as_ref(), token, *id)?;
            d.clamp_cursors();
            Ok(format!("deleted \"{}\"", title))
        }
    }
}
