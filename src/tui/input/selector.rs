use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::selector::SelectorMode;
use crate::tui::app::{App, Mode};

pub(super) fn handle_selector(app: &mut App, key: KeyEvent) {
    let Some(selector) = app.selector.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => selector.move_by(1),
        KeyCode::Up | KeyCode::Char('k') => selector.move_by(-1),
        KeyCode::Char('g') | KeyCode::Home => selector.move_to_first(),
        KeyCode::Char('G') | KeyCode::End => selector.move_to_last(),
        KeyCode::Char(' ') if selector.mode == SelectorMode::Filter => {
            let id = selector.highlighted().id;
            app.page.filter.toggle(id);
        }
        KeyCode::Char('c') if selector.mode == SelectorMode::Filter => {
            app.page.filter.clear();
            close(app);
        }
        KeyCode::Enter => choose(app),
        KeyCode::Esc => close(app),
        _ => {}
    }
}

fn choose(app: &mut App) {
    let Some(selector) = app.selector.take() else {
        return;
    };
    app.mode = Mode::Navigate;
    match selector.mode {
        SelectorMode::Filter => {
            app.page.filter.apply();
            app.section_cursor = 0;
            app.sync_after_refresh();
        }
        SelectorMode::Create => {
            let mut chosen = None;
            selector.choose(|c| chosen = Some(c));
            let Some(category) = chosen else {
                return;
            };
            let token = app.auth.token().map(str::to_string);
            match app
                .page
                .add_section(app.api.as_ref(), token.as_deref(), category)
            {
                Ok(()) => {
                    app.status_message = Some(format!("added \"{}\"", category.title));
                }
                Err(e) => app.report(e),
            }
            app.sync_after_refresh();
        }
    }
}

/// Close without applying; pending filter edits are dropped at the next
/// `begin_edit`.
fn close(app: &mut App) {
    app.selector = None;
    app.mode = Mode::Navigate;
    app.sync_after_refresh();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_support::*;

    #[test]
    fn filter_applies_only_on_enter() {
        let (mut app, _tmp) = app_with(1, false);
        handle_key(&mut app, ch('f'));
        // cursor 0 is id 1, not the "Hambre cero" section
        handle_key(&mut app, ch(' '));
        assert_eq!(app.visible_sections().len(), 1);
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.visible_sections().is_empty());
    }

    #[test]
    fn escape_discards_pending_toggles() {
        let (mut app, _tmp) = app_with(1, false);
        handle_key(&mut app, ch('f'));
        handle_key(&mut app, ch(' '));
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.page.filter.is_active());
        assert_eq!(app.visible_sections().len(), 1);
    }

    #[test]
    fn clear_shows_everything_again() {
        let (mut app, _tmp) = app_with(1, false);
        app.page.filter.toggle(5);
        app.page.filter.apply();
        assert!(app.visible_sections().is_empty());
        handle_key(&mut app, ch('f'));
        handle_key(&mut app, ch('c'));
        assert_eq!(app.visible_sections().len(), 1);
    }

    #[test]
    fn create_mode_adds_highlighted_category() {
        let (mut app, _tmp) = app_with(0, true);
        handle_key(&mut app, ch('A'));
        handle_key(&mut app, ch('G'));
        handle_key(&mut app, key(KeyCode::Enter));
        let names: Vec<&str> = app
            .page
            .sections
            .iter()
            .map(|v| v.section.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Hambre cero", "Alianzas para lograr los objetivos"]
        );
    }

    #[test]
    fn duplicate_category_raises_alert() {
        let (mut app, _tmp) = app_with(0, true);
        handle_key(&mut app, ch('A'));
        handle_key(&mut app, ch('j'));
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.alert.is_some());
        assert_eq!(app.page.sections.len(), 1);
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.alert.is_none());
    }
}
