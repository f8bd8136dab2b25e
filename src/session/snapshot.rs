use super::*;
use crate::ID;
use crate::club::Club;
use crate::club::Player;
use std::collections::BTreeMap;

/// Whole-store document: every player, club and session, keyed by id.
///
/// Records do not carry their own key on the wire; [`Snapshot::from_json`]
/// hands each record the key it was stored under.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub players: BTreeMap<ID<Player>, Player>,
    #[serde(default)]
    pub clubs: BTreeMap<ID<Club>, Club>,
    #[serde(default)]
    pub sessions: BTreeMap<ID<Session>, Session>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::keyed)
    }
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
    fn keyed(self) -> Self {
        Self {
            players: self
                .players
                .into_iter()
                .map(|(id, p)| (id.clone(), p.keyed(id)))
                .collect(),
            clubs: self
                .clubs
                .into_iter()
                .map(|(id, c)| (id.clone(), c.keyed(id)))
                .collect(),
            sessions: self
                .sessions
                .into_iter()
                .map(|(id, s)| (id.clone(), s.keyed(id)))
                .collect(),
        }
    }
}
