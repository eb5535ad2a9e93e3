use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use statfut_api::Player;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadRoster,
    LoadPlayer { id: u32 },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    RosterLoaded { players: Vec<Player> },
    PlayerLoaded { player: Box<Player> },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
