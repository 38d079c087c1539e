use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, ConfirmAction, DetailPane, Mode, View};
use crate::tui::form::FormState;

pub(super) fn handle_detail(app: &mut App, key: KeyEvent) {
    app.status_message = None;
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => {
            app.detail = None;
            app.view = View::Grid;
        }
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Tab | KeyCode::BackTab => {
            if let Some(d) = app.detail.as_mut() {
                d.pane = match d.pane {
                    DetailPane::Impact => DetailPane::Research,
                    DetailPane::Research => DetailPane::Impact,
                };
            }
        }
        KeyCode::Down | KeyCode::Char('j') => move_cursor(app, 1),
        KeyCode::Up | KeyCode::Char('k') => move_cursor(app, -1),
        KeyCode::Char('r') => reload(app),
        KeyCode::Char('n') => open_form(app, false),
        KeyCode::Char('e') => open_form(app, true),
        KeyCode::Char('x') => confirm_delete(app),
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let Some(d) = app.detail.as_mut() else {
        return;
    };
    let (cursor, len) = match d.pane {
        DetailPane::Impact => (&mut d.impact_cursor, d.impact.items.len()),
        DetailPane::Research => (&mut d.research_cursor, d.research.items.len()),
    };
    if len == 0 {
        return;
    }
    *cursor = (*cursor as isize + delta).clamp(0, len as isize - 1) as usize;
}

fn reload(app: &mut App) {
    let Some(d) = app.detail.as_mut() else {
        return;
    };
    let api = app.api.as_ref();
    let result = d.impact.load(api).and_then(|_| d.research.load(api));
    d.clamp_cursors();
    match result {
        Ok(()) => app.status_message = Some("refreshed".into()),
        Err(e) => app.report(e),
    }
}

/// Open the add form, or the edit form for the highlighted record.
fn open_form(app: &mut App, edit: bool) {
    if !app.require_admin() {
        return;
    }
    let Some(d) = app.detail.as_mut() else {
        return;
    };
    let form = match d.pane {
        DetailPane::Impact => {
            if edit {
                let Some(item) = d.impact.items.get(d.impact_cursor).cloned() else {
                    return;
                };
                d.impact.begin_edit(&item);
                FormState::impact(Some(&item))
            } else {
                d.impact.cancel();
                FormState::impact(None)
            }
        }
        DetailPane::Research => {
            if edit {
                let Some(item) = d.research.items.get(d.research_cursor).cloned() else {
                    return;
                };
                d.research.begin_edit(&item);
                FormState::research(Some(&item))
            } else {
                d.research.cancel();
                FormState::research(None)
            }
        }
    };
    app.form = Some(form);
    app.mode = Mode::Form;
}

fn confirm_delete(app: &mut App) {
    if !app.require_admin() {
        return;
    }
    let Some(d) = app.detail.as_ref() else {
        return;
    };
    let action = match d.pane {
        DetailPane::Impact => d
            .impact
            .items
            .get(d.impact_cursor)
            .and_then(|i| {
                i.id.map(|id| ConfirmAction::DeleteImpact {
                    id,
                    title: i.title.clone(),
                })
            }),
        DetailPane::Research => d
            .research
            .items
            .get(d.research_cursor)
            .and_then(|r| {
                r.id.map(|id| ConfirmAction::DeleteResearch {
                    id,
                    title: r.title.clone(),
                })
            }),
    };
    if let Some(action) = action {
        app.confirm = Some(action);
        app.mode = Mode::Confirm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_support::*;

    fn in_detail(admin: bool) -> (App, tempfile::TempDir) {
        let (mut app, tmp) = app_with(1, admin);
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.view, View::Detail);
        (app, tmp)
    }

    #[test]
    fn tab_switches_pane_and_esc_returns() {
        let (mut app, _tmp) = in_detail(false);
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.detail.as_ref().unwrap().pane, DetailPane::Research);
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.view, View::Grid);
        assert!(app.detail.is_none());
    }

    #[test]
    fn add_impact_through_form() {
        let (mut app, _tmp) = in_detail(true);
        handle_key(&mut app, ch('n'));
        assert_eq!(app.mode, Mode::Form);
        type_str(&mut app, "Acceso");
        handle_key(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "300 familias");
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Navigate);
        let d = app.detail.as_ref().unwrap();
        assert_eq!(d.impact.items.len(), 1);
        assert_eq!(d.impact.items[0].description, "300 familias");
    }

    #[test]
    fn empty_description_keeps_form_open_with_alert() {
        let (mut app, _tmp) = in_detail(true);
        handle_key(&mut app, ch('n'));
        type_str(&mut app, "Acceso");
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.alert.is_some());
        assert_eq!(app.mode, Mode::Form);
        assert!(app.detail.as_ref().unwrap().impact.items.is_empty());
    }

    #[test]
    fn delete_research_after_confirm() {
        let (mut app, _tmp) = in_detail(true);
        handle_key(&mut app, key(KeyCode::Tab));
        handle_key(&mut app, ch('n'));
        type_str(&mut app, "Informe");
        handle_key(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "https://example.org/i.pdf");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.detail.as_ref().unwrap().research.items.len(), 1);

        handle_key(&mut app, ch('x'));
        assert_eq!(app.mode, Mode::Confirm);
        handle_key(&mut app, ch('y'));
        assert!(app.detail.as_ref().unwrap().research.items.is_empty());
    }

    #[test]
    fn delete_impact_after_confirm() {
        let (mut app, _tmp) = in_detail(true);
        handle_key(&mut app, ch('x'));
        assert_eq!(app.mode, Mode::Navigate);

        handle_key(&mut app, ch('n'));
        type_str(&mut app, "Acceso");
        handle_key(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "300 familias");
        handle_key(&mut app, key(KeyCode::Enter));

        handle_key(&mut app, ch('x'));
        assert_eq!(app.mode, Mode::Confirm);
        handle_key(&mut app, ch('y'));
        assert!(app.detail.as_ref().unwrap().impact.items.is_empty());
    }
}
