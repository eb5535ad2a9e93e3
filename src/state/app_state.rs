use crate::app::MenuItem;
use statfut_api::chart::{CompareSeries, RadarSeries};
use statfut_api::select::{self, ALL_POSITIONS, ALL_TEAMS, RosterFilter, SortKey};
use statfut_api::{Player, StatError};

// ---------------------------------------------------------------------------
// Roster state
// ---------------------------------------------------------------------------

/// The fetched roster plus everything needed to re-derive the filtered,
/// sorted view in memory. The view is recomputed on every filter, search or
/// sort interaction from `players` — no refetch, no in-place mutation.
#[derive(Debug, Default)]
pub struct RosterState {
    /// Last fetched full roster, held for the duration of the session.
    pub players: Vec<Player>,
    /// Current filtered + sorted view, re-derived after each interaction.
    pub view: Vec<Player>,
    pub filter: RosterFilter,
    pub sort: SortKey,
    /// Team/position option lists, derived once per fetch.
    pub teams: Vec<String>,
    pub positions: Vec<String>,
    /// Index into the option cycle; 0 means the sentinel ("Todos"/"Todas").
    team_index: usize,
    position_index: usize,
    /// Selected row index within `view`.
    pub selected: usize,
    /// True while the search box is capturing keystrokes.
    pub composing: bool,
    /// "%H:%M" stamp of the last successful fetch.
    pub fetched_at: Option<String>,
}

impl RosterState {
    /// Store a freshly fetched roster, derive the filter option lists, and
    /// rebuild the view. Team/position selections reset to the sentinels
    /// because the old options may no longer exist.
    pub fn load(&mut self, players: Vec<Player>) -> Result<(), StatError> {
        self.teams = select::team_options(&players);
        self.positions = select::position_options(&players);
        self.players = players;
        self.team_index = 0;
        self.position_index = 0;
        self.filter.team = ALL_TEAMS.to_owned();
        self.filter.position = ALL_POSITIONS.to_owned();
        self.selected = 0;
        self.reapply()
    }

    /// Re-derive the view from the stored roster. On a coercion failure the
    /// view empties and the error propagates for the app to report.
    pub fn reapply(&mut self) -> Result<(), StatError> {
        match select::filter_and_sort(&self.players, &self.filter, self.sort) {
            Ok(view) => {
                self.view = view;
                self.selected = self.selected.min(self.view.len().saturating_sub(1));
                Ok(())
            }
            Err(e) => {
                self.view.clear();
                self.selected = 0;
                Err(e)
            }
        }
    }

    pub fn cycle_team(&mut self) -> Result<(), StatError> {
        self.team_index = (self.team_index + 1) % (self.teams.len() + 1);
        self.sync_team_filter()
    }

    pub fn cycle_team_back(&mut self) -> Result<(), StatError> {
        let options = self.teams.len() + 1;
        self.team_index = (self.team_index + options - 1) % options;
        self.sync_team_filter()
    }

    fn sync_team_filter(&mut self) -> Result<(), StatError> {
        self.filter.team = match self.team_index {
            0 => ALL_TEAMS.to_owned(),
            i => self.teams[i - 1].clone(),
        };
        self.selected = 0;
        self.reapply()
    }

    pub fn cycle_position(&mut self) -> Result<(), StatError> {
        self.position_index = (self.position_index + 1) % (self.positions.len() + 1);
        self.sync_position_filter()
    }

    pub fn cycle_position_back(&mut self) -> Result<(), StatError> {
        let options = self.positions.len() + 1;
        self.position_index = (self.position_index + options - 1) % options;
        self.sync_position_filter()
    }

    fn sync_position_filter(&mut self) -> Result<(), StatError> {
        self.filter.position = match self.position_index {
            0 => ALL_POSITIONS.to_owned(),
            i => self.positions[i - 1].clone(),
        };
        self.selected = 0;
        self.reapply()
    }

    pub fn cycle_sort(&mut self) -> Result<(), StatError> {
        self.sort = self.sort.next();
        self.reapply()
    }

    pub fn cycle_sort_back(&mut self) -> Result<(), StatError> {
        self.sort = self.sort.prev();
        self.reapply()
    }

    pub fn search_push(&mut self, c: char) -> Result<(), StatError> {
        self.filter.search.push(c);
        self.selected = 0;
        self.reapply()
    }

    pub fn search_pop(&mut self) -> Result<(), StatError> {
        self.filter.search.pop();
        self.reapply()
    }

    pub fn search_clear(&mut self) -> Result<(), StatError> {
        self.filter.search.clear();
        self.reapply()
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.view.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_player(&self) -> Option<&Player> {
        self.view.get(self.selected)
    }
}

// ---------------------------------------------------------------------------
// Detail state
// ---------------------------------------------------------------------------

/// The selected player's full record plus the chart series derived from it.
#[derive(Debug, Default)]
pub struct DetailState {
    pub player: Option<Player>,
    pub radar: Option<RadarSeries>,
    pub compare: Option<CompareSeries>,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub roster: RosterState,
    pub detail: DetailState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player(id: u32, name: &str, team: &str, position: &str, gols90: f64) -> Player {
        Player {
            id,
            name: name.to_owned(),
            team: team.to_owned(),
            position: position.to_owned(),
            stats: [("golsper90".to_owned(), json!(gols90))]
                .into_iter()
                .collect(),
            ..Player::default()
        }
    }

    fn loaded() -> RosterState {
        let mut roster = RosterState::default();
        roster
            .load(vec![
                player(1, "Ana", "Palmeiras", "FW", 0.5),
                player(2, "Bea", "Santos", "MF", 1.2),
                player(3, "Carla", "Palmeiras", "DF", 0.1),
            ])
            .expect("load should succeed");
        roster
    }

    #[test]
    fn load_derives_sorted_option_lists() {
        let roster = loaded();
        assert_eq!(roster.teams, vec!["Palmeiras", "Santos"]);
        assert_eq!(roster.positions, vec!["DF", "FW", "MF"]);
        assert_eq!(roster.view.len(), 3);
    }

    #[test]
    fn team_cycle_wraps_through_sentinel() {
        let mut roster = loaded();
        roster.cycle_team().expect("cycle");
        assert_eq!(roster.filter.team, "Palmeiras");
        assert_eq!(roster.view.len(), 2);
        roster.cycle_team().expect("cycle");
        assert_eq!(roster.filter.team, "Santos");
        roster.cycle_team().expect("cycle");
        assert_eq!(roster.filter.team, ALL_TEAMS);
        assert_eq!(roster.view.len(), 3);
    }

    #[test]
    fn team_cycle_back_reaches_last_option() {
        let mut roster = loaded();
        roster.cycle_team_back().expect("cycle");
        assert_eq!(roster.filter.team, "Santos");
    }

    #[test]
    fn search_editing_reapplies_the_view() {
        let mut roster = loaded();
        roster.search_push('b').expect("reapply");
        assert_eq!(roster.view.len(), 1);
        assert_eq!(roster.view[0].name, "Bea");
        roster.search_pop().expect("reapply");
        assert_eq!(roster.view.len(), 3);
        roster.search_push('z').expect("reapply");
        assert!(roster.view.is_empty());
        roster.search_clear().expect("reapply");
        assert_eq!(roster.view.len(), 3);
    }

    #[test]
    fn selection_clamps_when_the_view_shrinks() {
        let mut roster = loaded();
        roster.selected = 2;
        roster.cycle_position().expect("position DF"); // one player
        assert_eq!(roster.view.len(), 1);
        assert_eq!(roster.selected, 0);
    }

    #[test]
    fn selection_stops_at_the_edges() {
        let mut roster = loaded();
        roster.select_prev();
        assert_eq!(roster.selected, 0);
        roster.select_next();
        roster.select_next();
        roster.select_next();
        assert_eq!(roster.selected, 2);
        assert_eq!(roster.selected_player().map(|p| p.id), Some(3));
    }

    #[test]
    fn malformed_stat_empties_the_view_and_reports() {
        let mut roster = loaded();
        roster.players[0].stats = [("golsper90".to_owned(), json!("ruim"))]
            .into_iter()
            .collect();
        roster.sort = roster.sort.next().next().next(); // Goals
        let err = roster.reapply().unwrap_err();
        assert_eq!(err.key, "golsper90");
        assert!(roster.view.is_empty());
    }
}
