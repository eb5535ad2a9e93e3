use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    // The search box captures every printable key while composing.
    if guard.state.active_tab == MenuItem::Roster && guard.state.roster.composing {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Enter | KeyCode::Esc, _) => guard.end_search(),
            (KeyCode::Backspace, _) => guard.search_backspace(),
            (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            (Char(c), _) => guard.search_push(c),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Roster),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Detail),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Roster filters and ordering
        (MenuItem::Roster, Char('/'), _) => guard.begin_search(),
        (MenuItem::Roster, Char('x'), _) => guard.clear_search(),
        (MenuItem::Roster, Char('t'), _) => guard.cycle_team(),
        (MenuItem::Roster, Char('T'), _) => guard.cycle_team_back(),
        (MenuItem::Roster, Char('p'), _) => guard.cycle_position(),
        (MenuItem::Roster, Char('P'), _) => guard.cycle_position_back(),
        (MenuItem::Roster, Char('s'), _) => guard.cycle_sort(),
        (MenuItem::Roster, Char('S'), _) => guard.cycle_sort_back(),

        // Roster navigation and selection
        (MenuItem::Roster, Char('j') | KeyCode::Down, _) => guard.roster_down(),
        (MenuItem::Roster, Char('k') | KeyCode::Up, _) => guard.roster_up(),
        (MenuItem::Roster, KeyCode::Enter, _) => {
            if let Some(id) = guard.roster_select_player() {
                drop(guard);
                let _ = network_requests
                    .send(NetworkRequest::LoadPlayer { id })
                    .await;
                return;
            }
        }
        (MenuItem::Roster, Char('R'), _) => {
            drop(guard);
            let _ = network_requests.send(NetworkRequest::LoadRoster).await;
            return;
        }

        // Detail view
        (MenuItem::Detail, KeyCode::Esc, _) => guard.update_tab(MenuItem::Roster),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
