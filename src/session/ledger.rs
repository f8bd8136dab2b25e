use super::*;
use crate::ID;
use crate::LedgerError;
use crate::Money;
use crate::Unique;
use crate::club::Player;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Authoritative event log of one session.
///
/// The ledger owns every buy-in and cash-out, keyed by opaque event id.
/// Players are only referenced by id. At most one cash-out per player
/// is ever present; [`Ledger::insert_cashout`] enforces it.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ledger {
    #[serde(default, rename = "players", with = "seats")]
    seats: BTreeSet<ID<Player>>,
    #[serde(default)]
    buyins: BTreeMap<ID<Buyin>, Buyin>,
    #[serde(default)]
    cashouts: BTreeMap<ID<Cashout>, Cashout>,
}

impl Ledger {
    pub fn seats(&self) -> impl Iterator<Item = &ID<Player>> {
        self.seats.iter()
    }
    pub fn seated(&self, player: &ID<Player>) -> bool {
        self.seats.contains(player)
    }
    pub fn buyins(&self) -> impl Iterator<Item = (&ID<Buyin>, &Buyin)> {
        self.buyins.iter()
    }
    pub fn cashouts(&self) -> impl Iterator<Item = (&ID<Cashout>, &Cashout)> {
        self.cashouts.iter()
    }
    pub fn buyins_of<'a>(&'a self, player: &'a ID<Player>) -> impl Iterator<Item = &'a Buyin> {
        self.buyins.values().filter(move |b| b.player() == player)
    }
    pub fn total_buyins(&self, player: &ID<Player>) -> Money {
        self.buyins_of(player).map(Buyin::amount).sum()
    }
    pub fn bought_in(&self, player: &ID<Player>) -> bool {
        self.buyins_of(player).next().is_some()
    }
    /// The player's cash-out, found by scanning the (small) cash-out map.
    pub fn find_cashout(&self, player: &ID<Player>) -> Option<(&ID<Cashout>, &Cashout)> {
        self.cashouts.iter().find(|(_, c)| c.player() == player)
    }
    pub fn cashout_of(&self, player: &ID<Player>) -> Option<&Cashout> {
        self.find_cashout(player).map(|(_, c)| c)
    }
    /// Roster players with at least one buy-in, in roster order.
    pub fn players_with_buyins<'a>(&self, roster: &'a [Player]) -> Vec<&'a Player> {
        roster
            .iter()
            .filter(|p| self.bought_in(&p.id()))
            .collect()
    }
    /// Players with buy-ins who have not cashed out yet, in roster order.
    pub fn eligible_for_cashout<'a>(&self, roster: &'a [Player]) -> Vec<&'a Player> {
        self.players_with_buyins(roster)
            .into_iter()
            .filter(|p| self.cashout_of(&p.id()).is_none())
            .collect()
    }
}

impl Ledger {
    pub fn seat(&mut self, player: ID<Player>) {
        self.seats.insert(player);
    }
    /// Append a buy-in. Seats are recorded separately through [`Ledger::seat`].
    pub fn insert_buyin(&mut self, id: ID<Buyin>, buyin: Buyin) {
        self.buyins.insert(id, buyin);
    }
    pub fn insert_cashout(&mut self, id: ID<Cashout>, cashout: Cashout) -> Result<(), LedgerError> {
        if self.find_cashout(cashout.player()).is_some() {
            return Err(LedgerError::InvalidState(format!(
                "player {} already cashed out",
                cashout.player()
            )));
        }
        self.cashouts.insert(id, cashout);
        Ok(())
    }
    /// Write back a stored cash-out. A second one for the same player is
    /// dropped with a warning and the first is kept.
    pub fn restore_cashout(&mut self, id: ID<Cashout>, cashout: Cashout) -> bool {
        match self.insert_cashout(id.clone(), cashout) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[ledger] dropping stored cash-out {}: {}", id, e);
                false
            }
        }
    }
    pub fn remove_cashout(&mut self, player: &ID<Player>) -> Option<(ID<Cashout>, Cashout)> {
        let id = self.find_cashout(player).map(|(id, _)| id.clone())?;
        self.cashouts.remove(&id).map(|c| (id, c))
    }
    pub fn clear_cashouts(&mut self) -> Vec<ID<Cashout>> {
        std::mem::take(&mut self.cashouts).into_keys().collect()
    }
    /// Every stored event must name a player.
    pub fn check(&self) -> Result<(), LedgerError> {
        let buyins = self.buyins.iter().map(|(id, b)| (id.as_str(), b.player()));
        let cashouts = self.cashouts.iter().map(|(id, c)| (id.as_str(), c.player()));
        match buyins.chain(cashouts).find(|(_, player)| player.is_empty()) {
            Some((event, _)) => Err(LedgerError::DataIntegrity(format!(
                "event {} has no player id",
                event
            ))),
            None => Ok(()),
        }
    }
}

/// Seats are stored as a keyed set (`{"playerId": true}`); values are ignored on read.
mod seats {
    use crate::ID;
    use crate::club::Player;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;
    use serde::de::IgnoredAny;
    use std::collections::BTreeMap;
    use std::collections::BTreeSet;

    pub fn serialize<S>(seats: &BTreeSet<ID<Player>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(seats.iter().map(|id| (id, true)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeSet<ID<Player>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        BTreeMap::<ID<Player>, IgnoredAny>::deserialize(deserializer)
            .map(|map| map.into_keys().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;

    fn roster() -> Vec<Player> {
        ["alice", "bob", "carol"]
            .into_iter()
            .map(|name| Player::new(ID::from(name), name.to_string(), None))
            .collect()
    }

    fn ledger() -> Ledger {
        let mut ledger = Ledger::default();
        ledger.insert_buyin(ID::from("b1"), Buyin::new(ID::from("carol"), 100.0, 0));
        ledger.insert_buyin(ID::from("b2"), Buyin::new(ID::from("alice"), 100.0, 0));
        ledger.insert_buyin(ID::from("b3"), Buyin::new(ID::from("alice"), 50.0, 600_000));
        ledger.seat(ID::from("bob"));
        ledger
    }

    #[test]
    fn totals_sum_per_player() {
        let ledger = ledger();
        assert_eq!(ledger.total_buyins(&ID::from("alice")), 150.0);
        assert_eq!(ledger.total_buyins(&ID::from("carol")), 100.0);
        assert_eq!(ledger.total_buyins(&ID::from("bob")), 0.0);
    }

    #[test]
    fn buyers_follow_roster_order() {
        let ledger = ledger();
        let ref roster = roster();
        let names = ledger
            .players_with_buyins(roster)
            .into_iter()
            .map(Player::name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["alice", "carol"]);
    }

    #[test]
    fn cashed_out_players_are_not_eligible() {
        let mut ledger = ledger();
        let ref roster = roster();
        ledger
            .insert_cashout(ID::from("c1"), Cashout::new(ID::from("alice"), 200.0, 200.0, 1))
            .unwrap();
        let names = ledger
            .eligible_for_cashout(roster)
            .into_iter()
            .map(Player::name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["carol"]);
    }

    #[test]
    fn second_cashout_for_a_player_is_rejected() {
        let mut ledger = ledger();
        let first = Cashout::new(ID::from("alice"), 200.0, 200.0, 1);
        ledger.insert_cashout(ID::from("c1"), first.clone()).unwrap();
        let err = ledger
            .insert_cashout(ID::from("c2"), first)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState(_)));
        assert_eq!(ledger.cashouts().count(), 1);
    }

    #[test]
    fn restoring_a_duplicate_keeps_the_first() {
        let mut ledger = ledger();
        assert!(ledger.restore_cashout(ID::from("c1"), Cashout::new(ID::from("alice"), 200.0, 200.0, 1)));
        assert!(!ledger.restore_cashout(ID::from("c2"), Cashout::new(ID::from("alice"), 9.0, 9.0, 2)));
        let (id, kept) = ledger.find_cashout(&ID::from("alice")).unwrap();
        assert_eq!(id, &ID::from("c1"));
        assert_eq!(kept.cashout(), 200.0);
    }

    #[test]
    fn buying_in_does_not_take_a_seat() {
        let ledger = ledger();
        assert!(ledger.bought_in(&ID::from("alice")));
        assert!(!ledger.seated(&ID::from("alice")));
        assert_eq!(ledger.seats().collect::<Vec<_>>(), vec![&ID::from("bob")]);
    }

    #[test]
    fn remove_and_clear_cashouts() {
        let mut ledger = ledger();
        ledger
            .insert_cashout(ID::from("c1"), Cashout::new(ID::from("alice"), 1.0, 1.0, 1))
            .unwrap();
        ledger
            .insert_cashout(ID::from("c2"), Cashout::new(ID::from("carol"), 2.0, 2.0, 1))
            .unwrap();
        let (id, removed) = ledger.remove_cashout(&ID::from("alice")).unwrap();
        assert_eq!(id, ID::from("c1"));
        assert_eq!(removed.cashout(), 1.0);
        assert!(ledger.remove_cashout(&ID::from("alice")).is_none());
        assert_eq!(ledger.clear_cashouts(), vec![ID::<Cashout>::from("c2")]);
        assert_eq!(ledger.cashouts().count(), 0);
    }

    #[test]
    fn events_without_player_fail_integrity() {
        let mut ledger = ledger();
        assert!(ledger.check().is_ok());
        ledger.insert_buyin(ID::from("bad"), Buyin::new(ID::from(""), 5.0, 0));
        assert!(matches!(ledger.check(), Err(LedgerError::DataIntegrity(_))));
    }

    #[test]
    fn random_totals_partition_the_log() {
        let mut ledger = Ledger::default();
        let buyins = (0..64).map(|_| Buyin::random()).collect::<Vec<_>>();
        for buyin in buyins.iter().cloned() {
            ledger.insert_buyin(ID::default(), buyin);
        }
        let raw = buyins.iter().map(Buyin::amount).sum::<Money>();
        let split = (0..4)
            .map(|i| ledger.total_buyins(&ID::from(format!("p{}", i))))
            .sum::<Money>();
        assert!((raw - split).abs() < 1e-6);
    }

    #[test]
    fn seats_load_from_keyed_set() {
        let json = r#"{
            "players": {"alice": true, "bob": {"joined": 1}},
            "buyins": {"b1": {"playerId": "alice", "amount": 100, "time": 0}}
        }"#;
        let ledger = serde_json::from_str::<Ledger>(json).unwrap();
        assert!(ledger.seated(&ID::from("alice")));
        assert!(ledger.seated(&ID::from("bob")));
        assert_eq!(ledger.cashouts().count(), 0);
        assert_eq!(ledger.total_buyins(&ID::from("alice")), 100.0);
    }
}
