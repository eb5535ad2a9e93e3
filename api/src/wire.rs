/// Backend API raw wire types — serde shapes for deserializing player JSON.
/// The backend speaks Portuguese field names; these map to our clean domain
/// types via `map_player`.
use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::{Player, Statistics};

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayerWire {
    pub id: Option<u32>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "time")]
    pub team: Option<String>,
    #[serde(rename = "posicao")]
    pub position: Option<String>,
    #[serde(rename = "idade")]
    pub age: Option<u8>,
    #[serde(rename = "nacionalidade")]
    pub nationality: Option<String>,
    #[serde(rename = "pedominante")]
    pub preferred_foot: Option<String>,
    /// Height/weight arrive as a number on some records, a string on others.
    #[serde(rename = "altura")]
    pub height: Option<Value>,
    #[serde(rename = "peso")]
    pub weight: Option<Value>,
    #[serde(rename = "agencia")]
    pub agency: Option<String>,
    #[serde(rename = "gols")]
    pub goals: Option<u32>,
    #[serde(rename = "assistencias")]
    pub assists: Option<u32>,
    /// Kept as raw JSON; numeric coercion happens at the metric accessor,
    /// so a malformed value fails the read, not the whole roster parse.
    #[serde(rename = "estatisticas")]
    pub stats: Option<BTreeMap<String, Value>>,
}

pub(crate) fn map_player(wire: PlayerWire) -> Player {
    Player {
        id: wire.id.unwrap_or_default(),
        name: wire.name.unwrap_or_default(),
        team: wire.team.unwrap_or_default(),
        position: wire.position.unwrap_or_default(),
        age: wire.age.unwrap_or_default(),
        nationality: wire.nationality.unwrap_or_default(),
        preferred_foot: wire.preferred_foot.unwrap_or_default(),
        height: display_value(wire.height),
        weight: display_value(wire.weight),
        agency: wire.agency.unwrap_or_default(),
        goals: wire.goals.unwrap_or_default(),
        assists: wire.assists.unwrap_or_default(),
        stats: Statistics::new(wire.stats.unwrap_or_default()),
    }
}

/// Render a number-or-string attribute the way the backend sent it.
fn display_value(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
