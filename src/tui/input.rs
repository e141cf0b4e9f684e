//! Key binding dispatch for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_menu::MenuEvent;

use crate::shell::ActiveTab;

use super::app::StudioApp;

/// Handle a key event, mutating app state.
pub fn handle_key(app: &mut StudioApp, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.menu_active {
        handle_menu_key(app, key);
        return;
    }

    if app.show_help {
        // Any key closes the overlay.
        app.show_help = false;
        return;
    }

    // Global bindings
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::F(10) => {
            app.menu_active = true;
            app.menu_state.activate();
            return;
        }
        KeyCode::F(1) => {
            app.show_help = true;
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.shell.next_tab();
            return;
        }
        KeyCode::Char('d') if ctrl => {
            app.toggle_dark_mode();
            return;
        }
        // Ctrl+Enter arrives as Ctrl+J on most terminals.
        KeyCode::Enter if !key.modifiers.contains(KeyModifiers::ALT) => {
            app.submit_active();
            return;
        }
        KeyCode::Char('j') if ctrl => {
            app.submit_active();
            return;
        }
        _ => {}
    }

    // Tab-specific bindings
    match (app.shell.active_tab(), key.code) {
        (ActiveTab::Image, KeyCode::Char('s')) if ctrl => {
            app.export_result();
            return;
        }
        (ActiveTab::Text, KeyCode::Char('y')) if ctrl => {
            app.copy_result();
            return;
        }
        (ActiveTab::Text, KeyCode::Char('t')) if ctrl => {
            app.cycle_content_type();
            return;
        }
        _ => {}
    }

    app.active_prompt_mut().handle_key(key);
}

fn handle_menu_key(app: &mut StudioApp, key: KeyEvent) {
    match key.code {
        KeyCode::Left => app.menu_state.left(),
        KeyCode::Right => app.menu_state.right(),
        KeyCode::Up => app.menu_state.up(),
        KeyCode::Down => app.menu_state.down(),
        KeyCode::Enter => app.menu_state.select(),
        KeyCode::Esc | KeyCode::F(10) => {
            app.menu_state.reset();
            app.menu_active = false;
            return;
        }
        _ => {}
    }

    let actions: Vec<_> = app
        .menu_state
        .drain_events()
        .filter_map(|event| match event {
            MenuEvent::Selected(action) => Some(action),
            #[allow(unreachable_patterns)]
            _ => None,
        })
        .collect();
    if actions.is_empty() {
        return;
    }
    app.menu_state.reset();
    app.menu_active = false;
    for action in actions {
        app.apply_menu_action(action);
    }
}
