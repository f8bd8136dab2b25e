use super::*;
use crate::ID;
use crate::LedgerError;
use crate::Millis;
use crate::Unique;
use crate::club::Capability;
use crate::club::Club;
use crate::club::Player;

/// Lifecycle of a session. Closing is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Open,
    Close,
}

/// Scheduling facts of a session, fixed at creation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    #[serde(default, deserialize_with = "super::lenient::millis")]
    start_time: Option<Millis>,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    stakes: Stakes,
}

/// One poker session of a club together with its event ledger.
///
/// Every cash-out mutation goes through here so that the closed-session
/// freeze, the edit capability, and the roster are checked before the
/// ledger is touched.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(skip)]
    id: ID<Self>,
    club_id: ID<Club>,
    details: Details,
    #[serde(default)]
    status: Status,
    #[serde(default)]
    data: Ledger,
}

impl Session {
    pub fn new(id: ID<Self>, club: ID<Club>, start: Millis, kind: &str, stakes: Stakes) -> Self {
        Self {
            id,
            club_id: club,
            details: Details {
                start_time: Some(start),
                kind: kind.to_string(),
                stakes,
            },
            status: Status::Open,
            data: Ledger::default(),
        }
    }
    pub fn club(&self) -> &ID<Club> {
        &self.club_id
    }
    pub fn start(&self) -> Option<Millis> {
        self.details.start_time
    }
    pub fn kind(&self) -> &str {
        &self.details.kind
    }
    pub fn stakes(&self) -> Stakes {
        self.details.stakes
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn closed(&self) -> bool {
        self.status == Status::Close
    }
    pub fn ledger(&self) -> &Ledger {
        &self.data
    }
    pub(crate) fn keyed(mut self, id: ID<Self>) -> Self {
        self.id = id;
        self
    }
    /// Unguarded access for stores writing back already-validated events.
    pub(crate) fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.data
    }
}

impl Session {
    pub fn seat(&mut self, player: ID<Player>) -> Result<(), LedgerError> {
        self.open()?;
        self.data.seat(player);
        Ok(())
    }
    pub fn record_buyin(&mut self, id: ID<Buyin>, buyin: Buyin) -> Result<(), LedgerError> {
        self.open()?;
        if buyin.player().is_empty() {
            return Err(LedgerError::Validation("player id is empty".into()));
        }
        if !buyin.amount().is_finite() || buyin.amount() < 0.0 {
            return Err(LedgerError::Validation(format!(
                "buy-in must be a non-negative number, got {}",
                buyin.amount()
            )));
        }
        self.data.insert_buyin(id, buyin);
        Ok(())
    }
    /// Append one cash-out for a player who bought in and has not cashed out.
    pub fn record_cashout(
        &mut self,
        roster: &[Player],
        capability: Capability,
        id: ID<Cashout>,
        cashout: Cashout,
    ) -> Result<(), LedgerError> {
        self.editable(capability)?;
        let cashout = cashout.validated()?;
        let player = cashout.player();
        if !roster.iter().any(|p| &p.id() == player) {
            return Err(LedgerError::DataIntegrity(format!(
                "player {} is not on the roster",
                player
            )));
        }
        if !self.data.bought_in(player) {
            return Err(LedgerError::InvalidState(format!(
                "player {} has no buy-ins",
                player
            )));
        }
        self.data.insert_cashout(id, cashout)
    }
    /// Remove a player's cash-out, returning them to the cash-out selector.
    pub fn reset_cashout(
        &mut self,
        capability: Capability,
        player: &ID<Player>,
    ) -> Result<(ID<Cashout>, Cashout), LedgerError> {
        self.editable(capability)?;
        self.data.remove_cashout(player).ok_or_else(|| {
            LedgerError::InvalidState(format!("player {} has no cash-out to reset", player))
        })
    }
    pub fn reset_all_cashouts(
        &mut self,
        capability: Capability,
    ) -> Result<Vec<ID<Cashout>>, LedgerError> {
        self.editable(capability)?;
        Ok(self.data.clear_cashouts())
    }
    pub fn close(&mut self) {
        self.status = Status::Close;
    }

    fn open(&self) -> Result<(), LedgerError> {
        match self.closed() {
            true => Err(LedgerError::InvalidState(format!("session {} is closed", self.id))),
            false => Ok(()),
        }
    }
    fn editable(&self, capability: Capability) -> Result<(), LedgerError> {
        self.open()?;
        match capability {
            Capability::Edit => Ok(()),
            Capability::View => Err(LedgerError::InvalidState(
                "edit capability required to change cash-outs".into(),
            )),
        }
    }
}

impl Unique for Session {
    fn id(&self) -> ID<Self> {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Player> {
        ["p", "q", "r"]
            .into_iter()
            .map(|name| Player::new(ID::from(name), name.to_uppercase(), None))
            .collect()
    }

    fn session() -> Session {
        let mut session = Session::new(
            ID::from("s1"),
            ID::from("c1"),
            0,
            "cash",
            Stakes::new(1.0, 2.0, None),
        );
        session
            .record_buyin(ID::from("b1"), Buyin::new(ID::from("p"), 100.0, 0))
            .unwrap();
        session
            .record_buyin(ID::from("b2"), Buyin::new(ID::from("q"), 100.0, 0))
            .unwrap();
        session
    }

    fn cashout(player: &str, amount: f64) -> Cashout {
        Cashout::new(ID::from(player), amount, amount, 60_000)
    }

    #[test]
    fn record_then_duplicate_is_rejected() {
        let ref roster = roster();
        let mut session = session();
        session
            .record_cashout(roster, Capability::Edit, ID::from("c1"), cashout("p", 200.0))
            .unwrap();
        let err = session
            .record_cashout(roster, Capability::Edit, ID::from("c2"), cashout("p", 200.0))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState(_)));
        assert_eq!(session.ledger().cashouts().count(), 1);
    }

    #[test]
    fn closed_sessions_are_frozen() {
        let ref roster = roster();
        let mut session = session();
        session
            .record_cashout(roster, Capability::Edit, ID::from("c1"), cashout("p", 200.0))
            .unwrap();
        session.close();
        let record = session.record_cashout(roster, Capability::Edit, ID::from("c2"), cashout("q", 1.0));
        let reset = session.clone().reset_cashout(Capability::Edit, &ID::from("p"));
        let clear = session.clone().reset_all_cashouts(Capability::Edit);
        assert!(matches!(record, Err(LedgerError::InvalidState(_))));
        assert!(matches!(reset, Err(LedgerError::InvalidState(_))));
        assert!(matches!(clear, Err(LedgerError::InvalidState(_))));
        assert_eq!(session.ledger().cashouts().count(), 1);
    }

    #[test]
    fn viewers_cannot_mutate() {
        let ref roster = roster();
        let mut session = session();
        let err = session
            .record_cashout(roster, Capability::View, ID::from("c1"), cashout("p", 1.0))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState(_)));
    }

    #[test]
    fn players_without_buyins_cannot_cash_out() {
        let ref roster = roster();
        let mut session = session();
        let err = session
            .record_cashout(roster, Capability::Edit, ID::from("c1"), cashout("r", 1.0))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState(_)));
    }

    #[test]
    fn unknown_players_break_integrity() {
        let ref roster = roster();
        let mut session = session();
        let err = session
            .record_cashout(roster, Capability::Edit, ID::from("c1"), cashout("zed", 1.0))
            .unwrap_err();
        assert!(matches!(err, LedgerError::DataIntegrity(_)));
    }

    #[test]
    fn negative_amounts_fail_validation() {
        let ref roster = roster();
        let mut session = session();
        let err = session
            .record_cashout(roster, Capability::Edit, ID::from("c1"), cashout("p", -5.0))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn reset_then_record_reproduces_the_event() {
        let ref roster = roster();
        let mut session = session();
        let original = Cashout::new(ID::from("p"), 200.0, 180.0, 60_000);
        session
            .record_cashout(roster, Capability::Edit, ID::from("c1"), original.clone())
            .unwrap();
        let (id, removed) = session.reset_cashout(Capability::Edit, &ID::from("p")).unwrap();
        assert_eq!(removed, original);
        session
            .record_cashout(roster, Capability::Edit, id.clone(), removed)
            .unwrap();
        assert_eq!(session.ledger().find_cashout(&ID::from("p")), Some((&id, &original)));
    }

    #[test]
    fn reset_of_missing_cashout_is_rejected() {
        let mut session = session();
        let err = session
            .reset_cashout(Capability::Edit, &ID::from("p"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState(_)));
    }

    #[test]
    fn reset_all_clears_every_cashout() {
        let ref roster = roster();
        let mut session = session();
        session
            .record_cashout(roster, Capability::Edit, ID::from("c1"), cashout("p", 1.0))
            .unwrap();
        session
            .record_cashout(roster, Capability::Edit, ID::from("c2"), cashout("q", 2.0))
            .unwrap();
        let cleared = session.reset_all_cashouts(Capability::Edit).unwrap();
        assert_eq!(cleared.len(), 2);
        assert_eq!(session.ledger().cashouts().count(), 0);
        assert_eq!(session.ledger().eligible_for_cashout(roster).len(), 2);
    }

    #[test]
    fn loads_the_stored_layout() {
        let json = r#"{
            "clubId": "c1",
            "details": {"startTime": 1700000000000, "type": "cash", "stakes": {"smallBlind": 5, "bigBlind": 10}},
            "status": "close",
            "data": {"players": {"p": true}}
        }"#;
        let session = serde_json::from_str::<Session>(json).unwrap();
        assert!(session.closed());
        assert_eq!(session.club(), &ID::from("c1"));
        assert_eq!(session.stakes().big_blind(), 10.0);
        assert_eq!(session.kind(), "cash");
        assert!(session.ledger().seated(&ID::from("p")));
    }
}
