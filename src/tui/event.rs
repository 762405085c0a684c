// event handling

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::core::Provider;
use crate::tui::app::{App, Mode, Panel, Popup};

pub enum Action {
    None,
    Quit,
    Submit(String),
    ConfirmCommand,
    CancelCommand,
    ExportZip,
    SetupComplete {
        provider: Provider,
        api_key: Option<String>,
    },
}

pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

pub fn handle_event(app: &mut App, event: Event) -> Action {
    match event {
        Event::Key(key) => handle_key(app, key),
        _ => Action::None,
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    // global keys (work in any mode)
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Action::Quit;
        }
        _ => {}
    }

    // handle popups first
    match app.popup {
        Popup::Themes => return handle_theme_popup(app, key),
        Popup::Confirm => return handle_confirm_popup(key),
        Popup::FileView => return handle_file_view_popup(app, key),
        Popup::SetupProvider => return handle_setup_provider_popup(app, key),
        Popup::SetupApiKey => return handle_setup_api_key_popup(app, key),
        Popup::None => {}
    }

    match app.mode {
        Mode::Normal => handle_normal_key(app, key),
        Mode::Insert => handle_insert_key(app, key),
    }
}

fn handle_theme_popup(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.close_popup();
            Action::None
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.theme_scroll_down();
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.theme_scroll_up();
            Action::None
        }
        KeyCode::Enter => {
            app.select_theme();
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_confirm_popup(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Action::ConfirmCommand,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::CancelCommand,
        _ => Action::None,
    }
}

fn handle_file_view_popup(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
            app.close_file_view();
            Action::None
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.view_scroll_down();
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.view_scroll_up();
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_setup_provider_popup(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        // no agent yet, nothing to fall back to
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            app.setup_provider_down();
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.setup_provider_up();
            Action::None
        }
        KeyCode::Enter => {
            app.setup_provider_select();
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_setup_api_key_popup(app: &mut App, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('a') => {
                app.setup_api_key_move_start();
                Action::None
            }
            KeyCode::Char('e') => {
                app.setup_api_key_move_end();
                Action::None
            }
            KeyCode::Char('u') => {
                app.setup_api_key_clear();
                Action::None
            }
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Enter => Action::SetupComplete {
            provider: app.setup_provider,
            api_key: app.setup_api_key_submit(),
        },
        KeyCode::Char(c) => {
            app.setup_api_key_insert_char(c);
            Action::None
        }
        KeyCode::Backspace => {
            app.setup_api_key_delete_char();
            Action::None
        }
        KeyCode::Delete => {
            app.setup_api_key_delete_char_forward();
            Action::None
        }
        KeyCode::Left => {
            app.setup_api_key_move_left();
            Action::None
        }
        KeyCode::Right => {
            app.setup_api_key_move_right();
            Action::None
        }
        KeyCode::Home => {
            app.setup_api_key_move_start();
            Action::None
        }
        KeyCode::End => {
            app.setup_api_key_move_end();
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        // quit
        KeyCode::Char('q') => Action::Quit,

        // enter insert mode
        KeyCode::Char('i') => {
            app.enter_insert();
            Action::None
        }
        KeyCode::Char('a') => {
            app.move_cursor_end();
            app.enter_insert();
            Action::None
        }
        KeyCode::Char('I') => {
            app.move_cursor_start();
            app.enter_insert();
            Action::None
        }
        KeyCode::Char('A') => {
            app.move_cursor_end();
            app.enter_insert();
            Action::None
        }

        // panel navigation
        KeyCode::Tab => {
            app.cycle_panel();
            Action::None
        }

        // theme popup
        KeyCode::Char('t') => {
            app.open_theme_popup();
            Action::None
        }

        // fullscreen
        KeyCode::Char('f') => {
            app.toggle_fullscreen();
            Action::None
        }

        // export zip
        KeyCode::Char('x') => Action::ExportZip,

        // scrolling
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll_down();
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll_up();
            Action::None
        }

        // history
        KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.history_up();
            Action::None
        }
        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.history_down();
            Action::None
        }

        // submit, or open the entry under the explorer cursor
        KeyCode::Enter => {
            if app.panel == Panel::Files {
                app.activate_explorer_row();
                return Action::None;
            }
            if let Some(request) = app.submit() {
                Action::Submit(request)
            } else {
                Action::None
            }
        }

        _ => Action::None,
    }
}

fn handle_insert_key(app: &mut App, key: KeyEvent) -> Action {
    // check control keys first
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('a') => {
                app.move_cursor_start();
                Action::None
            }
            KeyCode::Char('e') => {
                app.move_cursor_end();
                Action::None
            }
            KeyCode::Char('u') => {
                app.clear_prompt();
                Action::None
            }
            KeyCode::Char('p') => {
                app.history_up();
                Action::None
            }
            KeyCode::Char('n') => {
                app.history_down();
                Action::None
            }
            KeyCode::Enter => {
                // ctrl+enter for newline
                app.insert_newline();
                Action::None
            }
            _ => Action::None,
        };
    }

    // shift+enter for newline
    if key.modifiers.contains(KeyModifiers::SHIFT) && key.code == KeyCode::Enter {
        app.insert_newline();
        return Action::None;
    }

    match key.code {
        // exit insert mode
        KeyCode::Esc => {
            app.exit_insert();
            Action::None
        }

        // submit
        KeyCode::Enter => {
            app.exit_insert();
            if let Some(request) = app.submit() {
                Action::Submit(request)
            } else {
                Action::None
            }
        }

        // editing
        KeyCode::Char(c) => {
            app.insert_char(c);
            Action::None
        }
        KeyCode::Backspace => {
            app.delete_char();
            Action::None
        }
        KeyCode::Delete => {
            app.delete_char_forward();
            Action::None
        }

        // cursor movement
        KeyCode::Left => {
            app.move_cursor_left();
            Action::None
        }
        KeyCode::Right => {
            app.move_cursor_right();
            Action::None
        }
        KeyCode::Home => {
            app.move_cursor_start();
            Action::None
        }
        KeyCode::End => {
            app.move_cursor_end();
            Action::None
        }

        // history
        KeyCode::Up => {
            app.history_up();
            Action::None
        }
        KeyCode::Down => {
            app.history_down();
            Action::None
        }

        _ => Action::None,
    }
}
