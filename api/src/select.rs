//! Roster filtering and ordering — pure functions over immutable slices,
//! independent of any rendering or fetching concern.

use crate::{Player, StatError};

/// Sentinel option that disables the team filter.
pub const ALL_TEAMS: &str = "Todos";
/// Sentinel option that disables the position filter.
pub const ALL_POSITIONS: &str = "Todas";

/// The three roster filters. They compose conjunctively and commute;
/// each disabled condition passes every player through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterFilter {
    /// Case-insensitive substring match on the player name. Empty = pass all.
    pub search: String,
    /// Exact team match, or [`ALL_TEAMS`].
    pub team: String,
    /// Exact position match, or [`ALL_POSITIONS`].
    pub position: String,
}

impl Default for RosterFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            team: ALL_TEAMS.to_owned(),
            position: ALL_POSITIONS.to_owned(),
        }
    }
}

impl RosterFilter {
    pub fn matches(&self, player: &Player) -> bool {
        let search_ok = self.search.is_empty()
            || player
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        let team_ok = self.team == ALL_TEAMS || player.team == self.team;
        let position_ok = self.position == ALL_POSITIONS || player.position == self.position;
        search_ok && team_ok && position_ok
    }
}

/// Ordering axis for the roster view. Ordered the way the sort selector
/// cycles through them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    Team,
    Position,
    Goals,
    Assists,
    Matches,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Nome",
            SortKey::Team => "Time",
            SortKey::Position => "Posição",
            SortKey::Goals => "Gols",
            SortKey::Assists => "Assistências",
            SortKey::Matches => "Partidas",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortKey::Name => SortKey::Team,
            SortKey::Team => SortKey::Position,
            SortKey::Position => SortKey::Goals,
            SortKey::Goals => SortKey::Assists,
            SortKey::Assists => SortKey::Matches,
            SortKey::Matches => SortKey::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SortKey::Name => SortKey::Matches,
            SortKey::Team => SortKey::Name,
            SortKey::Position => SortKey::Team,
            SortKey::Goals => SortKey::Position,
            SortKey::Assists => SortKey::Goals,
            SortKey::Matches => SortKey::Assists,
        }
    }

    /// Statistic backing the descending sorts; `None` for the
    /// lexicographic keys.
    fn stat_key(&self) -> Option<&'static str> {
        match self {
            SortKey::Goals => Some("golsper90"),
            SortKey::Assists => Some("assistper90"),
            SortKey::Matches => Some("partidas"),
            _ => None,
        }
    }
}

/// Apply the filters, then order the survivors.
///
/// Lexicographic keys sort ascending with name as the tie-break; statistic
/// keys sort descending with absent values reading as 0 (players with no
/// stats land last). Both paths are stable. No match is `Ok(empty)`, never
/// an error; a non-coercible statistic fails the whole call.
pub fn filter_and_sort(
    players: &[Player],
    filter: &RosterFilter,
    sort: SortKey,
) -> Result<Vec<Player>, StatError> {
    let kept: Vec<Player> = players
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect();

    if let Some(key) = sort.stat_key() {
        // Project the statistic once per player; a malformed value fails
        // the call rather than silently reading as 0.
        let mut ranked: Vec<(f64, Player)> = kept
            .into_iter()
            .map(|p| p.stats.metric(key).map(|v| (v, p)))
            .collect::<Result<_, _>>()?;
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        return Ok(ranked.into_iter().map(|(_, p)| p).collect());
    }

    let mut kept = kept;
    kept.sort_by(|a, b| match sort {
        SortKey::Team => a.team.cmp(&b.team).then_with(|| a.name.cmp(&b.name)),
        SortKey::Position => a
            .position
            .cmp(&b.position)
            .then_with(|| a.name.cmp(&b.name)),
        _ => a.name.cmp(&b.name),
    });
    Ok(kept)
}

/// Sorted, deduplicated team names for the filter dropdown.
/// Derived from one fetched roster — the options never need a refetch.
pub fn team_options(players: &[Player]) -> Vec<String> {
    unique_sorted(players.iter().map(|p| p.team.clone()))
}

/// Sorted, deduplicated position names for the filter dropdown.
pub fn position_options(players: &[Player]) -> Vec<String> {
    unique_sorted(players.iter().map(|p| p.position.clone()))
}

fn unique_sorted(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = values.collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Statistics;
    use serde_json::json;

    fn player(id: u32, name: &str, team: &str, position: &str) -> Player {
        Player {
            id,
            name: name.to_owned(),
            team: team.to_owned(),
            position: position.to_owned(),
            ..Player::default()
        }
    }

    fn with_stat(mut p: Player, key: &str, value: f64) -> Player {
        p.stats = [(key.to_owned(), json!(value))].into_iter().collect();
        p
    }

    fn roster() -> Vec<Player> {
        vec![
            with_stat(player(1, "Ana", "A", "FW"), "golsper90", 0.5),
            with_stat(player(2, "Bea", "B", "MF"), "golsper90", 1.2),
            player(3, "Carla", "A", "DF"),
        ]
    }

    fn names(players: &[Player]) -> Vec<&str> {
        players.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn default_filter_passes_everything() {
        let out = filter_and_sort(&roster(), &RosterFilter::default(), SortKey::Name)
            .expect("should sort");
        assert_eq!(names(&out), vec!["Ana", "Bea", "Carla"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let filter = RosterFilter {
            search: "an".to_owned(),
            ..RosterFilter::default()
        };
        let out = filter_and_sort(&roster(), &filter, SortKey::Name).expect("should filter");
        assert_eq!(names(&out), vec!["Ana"]);

        let filter = RosterFilter {
            search: "AN".to_owned(),
            ..RosterFilter::default()
        };
        let out = filter_and_sort(&roster(), &filter, SortKey::Name).expect("should filter");
        assert_eq!(names(&out), vec!["Ana"]);
    }

    #[test]
    fn search_is_idempotent() {
        let filter = RosterFilter {
            search: "a".to_owned(),
            ..RosterFilter::default()
        };
        let once = filter_and_sort(&roster(), &filter, SortKey::Name).expect("first pass");
        let twice = filter_and_sort(&once, &filter, SortKey::Name).expect("second pass");
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_team_yields_empty_not_error() {
        let filter = RosterFilter {
            team: "C".to_owned(),
            ..RosterFilter::default()
        };
        let out = filter_and_sort(&roster(), &filter, SortKey::Name).expect("should not fail");
        assert!(out.is_empty());
    }

    #[test]
    fn team_and_position_filters_commute() {
        let team_first = RosterFilter {
            team: "A".to_owned(),
            ..RosterFilter::default()
        };
        let both = RosterFilter {
            team: "A".to_owned(),
            position: "FW".to_owned(),
            ..RosterFilter::default()
        };
        let position_only = RosterFilter {
            position: "FW".to_owned(),
            ..RosterFilter::default()
        };

        // team → position
        let step1 = filter_and_sort(&roster(), &team_first, SortKey::Name).expect("team pass");
        let a = filter_and_sort(&step1, &position_only, SortKey::Name).expect("position pass");
        // position → team
        let step2 =
            filter_and_sort(&roster(), &position_only, SortKey::Name).expect("position pass");
        let b = filter_and_sort(&step2, &team_first, SortKey::Name).expect("team pass");
        // single combined pass
        let c = filter_and_sort(&roster(), &both, SortKey::Name).expect("combined pass");

        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn name_sort_is_non_decreasing() {
        let out = filter_and_sort(&roster(), &RosterFilter::default(), SortKey::Name)
            .expect("should sort");
        let sorted_names = names(&out);
        let mut expected = sorted_names.clone();
        expected.sort();
        assert_eq!(sorted_names, expected);
    }

    #[test]
    fn goals_sort_is_descending_with_zero_default() {
        let out = filter_and_sort(&roster(), &RosterFilter::default(), SortKey::Goals)
            .expect("should sort");
        // Bea (1.2) > Ana (0.5) > Carla (no stat → 0, lands last).
        assert_eq!(names(&out), vec!["Bea", "Ana", "Carla"]);
    }

    #[test]
    fn team_sort_breaks_ties_by_name() {
        let out = filter_and_sort(&roster(), &RosterFilter::default(), SortKey::Team)
            .expect("should sort");
        assert_eq!(names(&out), vec!["Ana", "Carla", "Bea"]);
    }

    #[test]
    fn matches_sort_uses_partidas() {
        let players = vec![
            with_stat(player(1, "Ana", "A", "FW"), "partidas", 12.0),
            with_stat(player(2, "Bea", "B", "MF"), "partidas", 30.0),
        ];
        let out = filter_and_sort(&players, &RosterFilter::default(), SortKey::Matches)
            .expect("should sort");
        assert_eq!(names(&out), vec!["Bea", "Ana"]);
    }

    #[test]
    fn stat_sort_is_stable_for_equal_values() {
        let players = vec![
            with_stat(player(1, "Ana", "A", "FW"), "golsper90", 0.7),
            with_stat(player(2, "Bea", "B", "MF"), "golsper90", 0.7),
        ];
        let out = filter_and_sort(&players, &RosterFilter::default(), SortKey::Goals)
            .expect("should sort");
        assert_eq!(names(&out), vec!["Ana", "Bea"]);
    }

    #[test]
    fn malformed_stat_fails_the_sort() {
        let mut bad = player(1, "Ana", "A", "FW");
        bad.stats = [("golsper90".to_owned(), json!("muitos"))]
            .into_iter()
            .collect();
        let err = filter_and_sort(&[bad], &RosterFilter::default(), SortKey::Goals).unwrap_err();
        assert_eq!(err.key, "golsper90");
    }

    #[test]
    fn sort_key_cycles_through_all_keys() {
        let mut key = SortKey::Name;
        let mut seen = vec![key];
        for _ in 0..5 {
            key = key.next();
            seen.push(key);
        }
        assert_eq!(key.next(), SortKey::Name);
        assert_eq!(seen.len(), 6);
        assert_eq!(SortKey::Name.prev(), SortKey::Matches);
        assert_eq!(SortKey::Goals.prev(), SortKey::Position);
    }

    #[test]
    fn option_lists_are_sorted_and_deduped() {
        assert_eq!(team_options(&roster()), vec!["A", "B"]);
        assert_eq!(position_options(&roster()), vec!["DF", "FW", "MF"]);
        assert!(team_options(&[]).is_empty());
    }
}
