//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use scorecast_core::models::EventSortColumn;

use crate::app::{
    can_add_password_char, can_add_username_char, App, AppState, Focus, LoginFocus, Tab,
    PAGE_SCROLL_SIZE,
};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle login overlay
    if matches!(app.state, AppState::LoggingIn) {
        return handle_login_input(app, key).await;
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle search mode
    if matches!(app.state, AppState::Searching) {
        return handle_search_input(app, key);
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('1') => app.switch_tab(Tab::Standings),
        KeyCode::Char('2') => app.switch_tab(Tab::Events),
        KeyCode::Char('3') => app.switch_tab(Tab::Overview),
        KeyCode::Char('4') => app.switch_tab(Tab::Presentation),
        KeyCode::Left => {
            // On the Presentation tab the arrows step slides by hand
            if app.current_tab == Tab::Presentation {
                app.prev_slide();
            } else {
                app.prev_tab();
            }
        }
        KeyCode::Right => {
            if app.current_tab == Tab::Presentation {
                app.next_slide();
            } else {
                app.next_tab();
            }
        }
        KeyCode::Char('u') => {
            app.request_refresh();
        }
        KeyCode::Char('o') => {
            if app.offline_mode {
                app.go_online();
            } else {
                app.go_offline();
            }
        }
        KeyCode::Char('/') => {
            app.state = AppState::Searching;
            app.search_query.clear();
        }
        KeyCode::Char('a') => {
            // Viewing is public; the login only unlocks admin actions
            if app.is_authenticated() {
                app.logout();
            } else {
                app.start_login();
            }
        }
        KeyCode::Char('X') => {
            app.clear_cache();
        }
        KeyCode::Tab if app.current_tab == Tab::Events => {
            app.focus = match app.focus {
                Focus::List => Focus::Detail,
                Focus::Detail => Focus::List,
            };
        }
        KeyCode::Esc => {
            if app.focus == Focus::Detail {
                app.focus = Focus::List;
            } else {
                app.search_query.clear();
            }
        }
        _ => {
            // Tab-specific input
            match app.current_tab {
                Tab::Standings => handle_standings_input(app, key),
                Tab::Events => handle_events_input(app, key),
                Tab::Overview => {}
                Tab::Presentation => handle_presentation_input(app, key),
            }
        }
    }

    Ok(false)
}

fn handle_search_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.search_query.clear();
        }
        KeyCode::Enter => {
            app.state = AppState::Normal;
            // Keep search query active
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            app.event_selection = 0;
            app.winner_selection = 0;
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
            // Reset selection when search changes
            app.event_selection = 0;
            app.winner_selection = 0;
        }
        _ => {}
    }
    Ok(false)
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            // The board itself is public, closing the form just drops
            // back to viewing
            app.state = AppState::Normal;
            app.login_error = None;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Username,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => {
            match app.login_focus {
                LoginFocus::Username => {
                    app.login_focus = LoginFocus::Password;
                }
                LoginFocus::Password => {
                    app.login_focus = LoginFocus::Button;
                }
                LoginFocus::Button => {
                    // On success the state drops back to Normal, on
                    // failure login_error is set for the overlay
                    let _ = app.attempt_login().await;
                    if app.state == AppState::Normal {
                        app.request_refresh();
                    }
                }
            }
        }
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Username => {
                app.login_username.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Username => {
                if can_add_username_char(app.login_username.len(), c) {
                    app.login_username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.len(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

fn handle_standings_input(app: &mut App, key: KeyEvent) {
    let max_index = app.standings.len().saturating_sub(1);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.standings_selection = (app.standings_selection + 1).min(max_index);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.standings_selection = app.standings_selection.saturating_sub(1);
        }
        KeyCode::Home => {
            app.standings_selection = 0;
        }
        KeyCode::End => {
            app.standings_selection = max_index;
        }
        KeyCode::PageDown => {
            app.standings_selection = (app.standings_selection + PAGE_SCROLL_SIZE).min(max_index);
        }
        KeyCode::PageUp => {
            app.standings_selection = app.standings_selection.saturating_sub(PAGE_SCROLL_SIZE);
        }
        _ => {}
    }
}

fn handle_events_input(app: &mut App, key: KeyEvent) {
    match app.focus {
        Focus::List => {
            let max_event = app.get_sorted_events().len().saturating_sub(1);

            match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    app.event_selection = (app.event_selection + 1).min(max_event);
                    app.winner_selection = 0;
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    app.event_selection = app.event_selection.saturating_sub(1);
                    app.winner_selection = 0;
                }
                KeyCode::Home => {
                    app.event_selection = 0;
                    app.winner_selection = 0;
                }
                KeyCode::End => {
                    app.event_selection = max_event;
                    app.winner_selection = 0;
                }
                KeyCode::PageDown => {
                    app.event_selection = (app.event_selection + PAGE_SCROLL_SIZE).min(max_event);
                    app.winner_selection = 0;
                }
                KeyCode::PageUp => {
                    app.event_selection = app.event_selection.saturating_sub(PAGE_SCROLL_SIZE);
                    app.winner_selection = 0;
                }
                KeyCode::Enter => {
                    app.focus = Focus::Detail;
                }
                // Sort keys - toggle ascending/descending if same column
                KeyCode::Char('n') => {
                    app.toggle_event_sort(EventSortColumn::Name);
                }
                KeyCode::Char('d') => {
                    app.toggle_event_sort(EventSortColumn::Date);
                }
                KeyCode::Char('t') => {
                    app.toggle_event_sort(EventSortColumn::Category);
                }
                KeyCode::Char('l') => {
                    app.toggle_event_sort(EventSortColumn::Grade);
                }
                // Filter keys
                KeyCode::Char('c') => {
                    app.cycle_category_filter();
                }
                KeyCode::Char('g') => {
                    app.cycle_grade_filter();
                }
                _ => {}
            }
        }
        Focus::Detail => {
            let max_winner = app.selected_event_winners().len().saturating_sub(1);

            match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    app.winner_selection = (app.winner_selection + 1).min(max_winner);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    app.winner_selection = app.winner_selection.saturating_sub(1);
                }
                _ => {}
            }
        }
    }
}

fn handle_presentation_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') => {
            app.toggle_rotation();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.next_slide();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.prev_slide();
        }
        _ => {}
    }
}
