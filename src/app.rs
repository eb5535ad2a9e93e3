use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, RosterState};
use chrono::Local;
use statfut_api::chart::{self, COMPARE_METRICS};
use statfut_api::{Player, StatError};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Roster,
    Detail,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_roster_loaded(&mut self, players: Vec<Player>) {
        self.state.last_error = None;
        self.state.roster.fetched_at = Some(Local::now().format("%H:%M").to_string());
        if let Err(e) = self.state.roster.load(players) {
            self.state.last_error = Some(e.to_string());
        }
    }

    pub fn on_player_loaded(&mut self, player: Player) {
        self.state.last_error = None;
        self.rebuild_charts(&player);
        self.state.detail.player = Some(player);
        self.update_tab(MenuItem::Detail);
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    /// Derive both chart series for the selected player. The comparison
    /// peers are the currently filtered view, so the chart answers "how
    /// does this player compare to the players I am looking at".
    fn rebuild_charts(&mut self, player: &Player) {
        self.state.detail.radar = None;
        self.state.detail.compare = None;

        match chart::radar_series(player) {
            Ok(series) => self.state.detail.radar = series,
            Err(e) => self.state.last_error = Some(e.to_string()),
        }
        match chart::compare_series(player, &self.state.roster.view, &COMPARE_METRICS) {
            Ok(series) => self.state.detail.compare = series,
            Err(e) => self.state.last_error = Some(e.to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Roster interactions — delegated to RosterState; pipeline failures
    // (malformed upstream statistics) land in last_error
    // -----------------------------------------------------------------------

    pub fn roster_down(&mut self) {
        self.state.roster.select_next();
    }

    pub fn roster_up(&mut self) {
        self.state.roster.select_prev();
    }

    pub fn begin_search(&mut self) {
        self.state.roster.composing = true;
    }

    pub fn end_search(&mut self) {
        self.state.roster.composing = false;
    }

    pub fn search_push(&mut self, c: char) {
        self.apply_roster(|r| r.search_push(c));
    }

    pub fn search_backspace(&mut self) {
        self.apply_roster(RosterState::search_pop);
    }

    pub fn clear_search(&mut self) {
        self.apply_roster(RosterState::search_clear);
    }

    pub fn cycle_team(&mut self) {
        self.apply_roster(RosterState::cycle_team);
    }

    pub fn cycle_team_back(&mut self) {
        self.apply_roster(RosterState::cycle_team_back);
    }

    pub fn cycle_position(&mut self) {
        self.apply_roster(RosterState::cycle_position);
    }

    pub fn cycle_position_back(&mut self) {
        self.apply_roster(RosterState::cycle_position_back);
    }

    pub fn cycle_sort(&mut self) {
        self.apply_roster(RosterState::cycle_sort);
    }

    pub fn cycle_sort_back(&mut self) {
        self.apply_roster(RosterState::cycle_sort_back);
    }

    fn apply_roster<F>(&mut self, op: F)
    where
        F: FnOnce(&mut RosterState) -> Result<(), StatError>,
    {
        if let Err(e) = op(&mut self.state.roster) {
            self.state.last_error = Some(e.to_string());
        }
    }

    /// Returns the selected player's id if the user pressed Enter on a row.
    /// Switches to the Detail tab as a side-effect; the full record arrives
    /// through the network worker.
    pub fn roster_select_player(&mut self) -> Option<u32> {
        let id = self.state.roster.selected_player().map(|p| p.id)?;
        self.update_tab(MenuItem::Detail);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player(id: u32, name: &str, gols90: f64) -> Player {
        Player {
            id,
            name: name.to_owned(),
            team: "A".to_owned(),
            position: "FW".to_owned(),
            stats: [("golsper90".to_owned(), json!(gols90))]
                .into_iter()
                .collect(),
            ..Player::default()
        }
    }

    fn app_with_roster() -> App {
        let mut app = App::new();
        app.on_roster_loaded(vec![player(1, "Ana", 0.5), player(2, "Bea", 1.2)]);
        app
    }

    #[test]
    fn roster_load_clears_previous_error() {
        let mut app = App::new();
        app.on_error("boom".to_owned());
        app.on_roster_loaded(vec![player(1, "Ana", 0.5)]);
        assert!(app.state.last_error.is_none());
        assert_eq!(app.state.roster.view.len(), 1);
        assert!(app.state.roster.fetched_at.is_some());
    }

    #[test]
    fn selecting_a_row_switches_to_detail() {
        let mut app = app_with_roster();
        let id = app.roster_select_player();
        assert_eq!(id, Some(1));
        assert_eq!(app.state.active_tab, MenuItem::Detail);
    }

    #[test]
    fn select_on_empty_view_is_none() {
        let mut app = App::new();
        assert_eq!(app.roster_select_player(), None);
        assert_eq!(app.state.active_tab, MenuItem::Roster);
    }

    #[test]
    fn player_loaded_builds_both_series() {
        let mut app = app_with_roster();
        app.on_player_loaded(player(1, "Ana", 0.5));
        let detail = &app.state.detail;
        assert!(detail.player.is_some());
        assert!(detail.radar.is_some());
        let compare = detail.compare.as_ref().expect("one peer in the view");
        assert_eq!(compare.rows.len(), 1);
        assert_eq!(compare.rows[0].name, "Bea");
    }

    #[test]
    fn lone_player_has_no_comparison_chart() {
        let mut app = App::new();
        app.on_roster_loaded(vec![player(1, "Ana", 0.5)]);
        app.on_player_loaded(player(1, "Ana", 0.5));
        assert!(app.state.detail.radar.is_some());
        assert!(app.state.detail.compare.is_none());
    }

    #[test]
    fn pipeline_failure_surfaces_in_last_error() {
        let mut app = app_with_roster();
        app.state.roster.players[0].stats = [("golsper90".to_owned(), json!("ruim"))]
            .into_iter()
            .collect();
        app.cycle_sort(); // Name → Team, fine
        assert!(app.state.last_error.is_none());
        app.cycle_sort();
        app.cycle_sort(); // → Goals, hits the malformed value
        assert!(app.state.last_error.is_some());
        assert!(app.state.roster.view.is_empty());
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = app_with_roster();
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Roster);
    }
}
