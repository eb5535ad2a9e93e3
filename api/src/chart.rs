//! Chart data derivation — pure and deterministic, no I/O, no rendering.
//! The TUI widgets consume these series; the builders never touch them.

use crate::{Player, StatError, Statistics};

/// One named metric: the backend's statistic key and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    pub key: &'static str,
    pub label: &'static str,
}

/// The six core per-90 axes of the radar chart, in drawing order.
pub const RADAR_METRICS: [Metric; 6] = [
    Metric { key: "golsper90", label: "Gols/90" },
    Metric { key: "assistper90", label: "Assist/90" },
    Metric { key: "xg", label: "xG" },
    Metric { key: "xag", label: "xAG" },
    Metric { key: "prgc", label: "PRGC" },
    Metric { key: "prgp", label: "PRGP" },
];

/// The four metrics contrasted in the peer comparison chart.
pub const COMPARE_METRICS: [Metric; 4] = [
    Metric { key: "golsper90", label: "Gols/90" },
    Metric { key: "assistper90", label: "Assist/90" },
    Metric { key: "xg", label: "xG" },
    Metric { key: "xag", label: "xAG" },
];

#[derive(Debug, Clone, PartialEq)]
pub struct MetricValue {
    pub label: &'static str,
    pub value: f64,
}

/// Project a fixed ordered metric list out of a statistics bag.
/// Absent keys read as 0.0; a present non-numeric value fails loudly.
/// An empty bag therefore projects to all zeros, never an error.
pub fn project(stats: &Statistics, metrics: &[Metric]) -> Result<Vec<MetricValue>, StatError> {
    metrics
        .iter()
        .map(|m| {
            stats.metric(m.key).map(|value| MetricValue {
                label: m.label,
                value,
            })
        })
        .collect()
}

/// Radial axis headroom above the largest value.
const AXIS_HEADROOM: f64 = 1.2;
/// Minimum radial range, so an all-zero projection still has a drawable axis.
const AXIS_MIN: f64 = 1.0;

/// Closed polar series for one player's core metrics.
/// The radial range is `[0, axis_max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarSeries {
    pub player: String,
    pub metrics: Vec<MetricValue>,
    pub axis_max: f64,
}

/// Build the radar series, or `None` when the player has no statistics at
/// all (nothing to draw — matches the dashboard's empty-bag behavior).
pub fn radar_series(player: &Player) -> Result<Option<RadarSeries>, StatError> {
    if player.stats.is_empty() {
        return Ok(None);
    }
    let metrics = project(&player.stats, &RADAR_METRICS)?;
    let peak = metrics.iter().map(|m| m.value).fold(0.0_f64, f64::max);
    let axis_max = if peak > 0.0 {
        peak * AXIS_HEADROOM
    } else {
        AXIS_MIN
    };
    Ok(Some(RadarSeries {
        player: player.name.clone(),
        metrics,
        axis_max,
    }))
}

/// One peer in the comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareRow {
    pub id: u32,
    pub name: String,
    pub team: String,
    pub position: String,
    /// Values in the order of the requested metric list.
    pub values: Vec<f64>,
}

/// Grouped comparison series: the selected player's name plus one row per
/// peer, with the largest value across all rows for bar scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareSeries {
    pub player: String,
    pub metrics: Vec<Metric>,
    pub rows: Vec<CompareRow>,
    pub peak: f64,
}

/// Build the comparison series against every listed player except the
/// selected one. Identity is by id, never by name, so same-named players
/// stay in. `None` when the peer set is empty.
pub fn compare_series(
    selected: &Player,
    players: &[Player],
    metrics: &[Metric],
) -> Result<Option<CompareSeries>, StatError> {
    let mut rows = Vec::new();
    for peer in players {
        if peer.id == selected.id {
            continue;
        }
        let values = project(&peer.stats, metrics)?
            .into_iter()
            .map(|m| m.value)
            .collect();
        rows.push(CompareRow {
            id: peer.id,
            name: peer.name.clone(),
            team: peer.team.clone(),
            position: peer.position.clone(),
            values,
        });
    }

    if rows.is_empty() {
        return Ok(None);
    }

    let peak = rows
        .iter()
        .flat_map(|r| r.values.iter())
        .fold(0.0_f64, |acc, v| acc.max(*v));

    Ok(Some(CompareSeries {
        player: selected.name.clone(),
        metrics: metrics.to_vec(),
        rows,
        peak,
    }))
}
