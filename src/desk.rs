//! Mutation entry points.
//!
//! Each operation fetches current state from the [`Store`], validates and
//! mutates it in memory through [`Session`], writes the single changed
//! record back, and returns the updated session. A failed write is reported
//! and never retried; the caller refetches.
use crate::ID;
use crate::LedgerError;
use crate::Millis;
use crate::Unique;
use crate::club::Capability;
use crate::club::Player;
use crate::club::Viewer;
use crate::confirm::Confirmation;
use crate::reconcile::CashoutForm;
use crate::reconcile::CashoutView;
use crate::reconcile::Report;
use crate::session::Cashout;
use crate::session::Session;
use crate::store::Store;

/// Result of a confirmed-destructive operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied(Session),
    /// The typed confirmation did not match; nothing was touched.
    Unconfirmed,
}

pub struct Desk<S: Store> {
    store: S,
    clock: fn() -> Millis,
}

impl<S: Store> From<S> for Desk<S> {
    fn from(store: S) -> Self {
        Self::with_clock(store, crate::now)
    }
}

impl<S: Store> Desk<S> {
    pub fn with_clock(store: S, clock: fn() -> Millis) -> Self {
        Self { store, clock }
    }
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The cash-out board of one session as this viewer sees it.
    pub async fn board(&self, id: &ID<Session>, viewer: &Viewer) -> Result<CashoutView, LedgerError> {
        let session = self.session(id).await?;
        let capability = Self::capability(viewer, &session)?;
        let roster = self.roster().await?;
        Ok(CashoutView::of(&roster, &session, capability))
    }

    /// Every session the players registered under `email` took part in.
    pub async fn report(&self, email: &str) -> Result<Report, LedgerError> {
        let players = self.store.fetch_players().await?;
        let sessions = self.store.fetch_sessions().await?;
        let clubs = self.store.fetch_clubs().await?;
        Report::mine(email, &players, &sessions, &clubs, (self.clock)())
    }

    pub async fn record_cashout(
        &self,
        id: &ID<Session>,
        viewer: &Viewer,
        form: &CashoutForm,
    ) -> Result<Session, LedgerError> {
        let mut session = self.session(id).await?;
        let capability = Self::capability(viewer, &session)?;
        let roster = self.roster().await?;
        let cashout = form.settle((self.clock)())?;
        let key = ID::<Cashout>::default();
        session.record_cashout(&roster, capability, key.clone(), cashout.clone())?;
        self.store.persist_cashout(id, &key, &cashout).await?;
        log::info!(
            "[desk] session {} cash-out {} for {} ({} / stack {})",
            id,
            key,
            cashout.player(),
            cashout.cashout(),
            cashout.stack_value()
        );
        Ok(session)
    }

    /// Reset one player's cash-out once their name has been typed back.
    pub async fn reset_cashout(
        &self,
        id: &ID<Session>,
        viewer: &Viewer,
        player: &ID<Player>,
        typed: &str,
    ) -> Result<Outcome, LedgerError> {
        let mut session = self.session(id).await?;
        let capability = Self::capability(viewer, &session)?;
        let roster = self.roster().await?;
        let ref target = roster
            .iter()
            .find(|p| &p.id() == player)
            .ok_or_else(|| LedgerError::DataIntegrity(format!("player {} is not on the roster", player)))?;
        if !Confirmation::player(target).accepts(typed) {
            log::warn!("[desk] reset of {} in session {} not confirmed", player, id);
            return Ok(Outcome::Unconfirmed);
        }
        let (key, _) = session.reset_cashout(capability, player)?;
        self.store.delete_cashout(id, &key).await?;
        log::info!("[desk] session {} cash-out {} reset for {}", id, key, player);
        Ok(Outcome::Applied(session))
    }

    /// Reset every cash-out in the session once `DELETE ALL` has been typed.
    pub async fn reset_all(
        &self,
        id: &ID<Session>,
        viewer: &Viewer,
        typed: &str,
    ) -> Result<Outcome, LedgerError> {
        let mut session = self.session(id).await?;
        let capability = Self::capability(viewer, &session)?;
        if !Confirmation::All.accepts(typed) {
            log::warn!("[desk] reset of all cash-outs in session {} not confirmed", id);
            return Ok(Outcome::Unconfirmed);
        }
        let cleared = session.reset_all_cashouts(capability)?;
        self.store.delete_all_cashouts(id).await?;
        log::info!("[desk] session {} reset {} cash-outs", id, cleared.len());
        Ok(Outcome::Applied(session))
    }

    async fn session(&self, id: &ID<Session>) -> Result<Session, LedgerError> {
        self.store
            .fetch_session(id)
            .await?
            .ok_or_else(|| LedgerError::DataIntegrity(format!("session {} not found", id)))
    }
    /// Every player in the store, in key order.
    async fn roster(&self) -> Result<Vec<Player>, LedgerError> {
        Ok(self.store.fetch_players().await?.into_values().collect())
    }
    fn capability(viewer: &Viewer, session: &Session) -> Result<Capability, LedgerError> {
        viewer.capability(session.club()).ok_or_else(|| {
            LedgerError::InvalidState(format!(
                "no access to club {} of session {}",
                session.club(),
                session.id()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::Role;
    use crate::reconcile::BoardRow;
    use crate::session::Buyin;
    use crate::session::Snapshot;
    use crate::session::Stakes;
    use crate::store::Memory;
    use futures::executor::block_on;

    fn desk() -> Desk<Memory> {
        let mut snapshot = Snapshot::default();
        for (id, name, email) in [("p1", "Dana", Some("dana@club.org")), ("p2", "Eli", None)] {
            let player = Player::new(ID::from(id), name.into(), email.map(String::from));
            snapshot.players.insert(ID::from(id), player);
        }
        let mut session = Session::new(ID::from("s1"), ID::from("c1"), 0, "cash", Stakes::new(1.0, 2.0, None));
        session
            .record_buyin(ID::from("b1"), Buyin::new(ID::from("p1"), 100.0, 0))
            .unwrap();
        session
            .record_buyin(ID::from("b2"), Buyin::new(ID::from("p2"), 100.0, 0))
            .unwrap();
        snapshot.sessions.insert(ID::from("s1"), session);
        Desk::with_clock(Memory::from(snapshot), || 60_000)
    }

    fn form(player: &str, amount: f64) -> CashoutForm {
        CashoutForm {
            player_id: Some(ID::from(player)),
            amount: Some(amount),
            ..CashoutForm::default()
        }
    }

    fn stored(desk: &Desk<Memory>) -> Session {
        block_on(desk.store().fetch_session(&ID::from("s1"))).unwrap().unwrap()
    }

    #[test]
    fn record_persists_and_returns_the_session() {
        let desk = desk();
        let ref sid = ID::from("s1");
        let session = block_on(desk.record_cashout(sid, &Viewer::admin(), &form("p1", 150.0))).unwrap();
        assert_eq!(session, stored(&desk));
        let cashout = session.ledger().cashout_of(&ID::from("p1")).unwrap();
        assert_eq!(cashout.cashout(), 150.0);
        assert_eq!(cashout.time(), Some(60_000));
    }

    #[test]
    fn rejected_mutations_leave_the_store_untouched() {
        let desk = desk();
        let ref sid = ID::from("s1");
        let member = Viewer::member_of(ID::from("c1"), Role::Member);
        let err = block_on(desk.record_cashout(sid, &member, &form("p1", 150.0))).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState(_)));
        let stranger = Viewer::default();
        let err = block_on(desk.record_cashout(sid, &stranger, &form("p1", 150.0))).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState(_)));
        assert_eq!(stored(&desk).ledger().cashouts().count(), 0);
    }

    #[test]
    fn unknown_session_is_an_integrity_error() {
        let desk = desk();
        let err = block_on(desk.board(&ID::from("s9"), &Viewer::admin())).unwrap_err();
        assert!(matches!(err, LedgerError::DataIntegrity(_)));
    }

    #[test]
    fn reset_requires_the_exact_name() {
        let desk = desk();
        let ref sid = ID::from("s1");
        let ref admin = Viewer::admin();
        block_on(desk.record_cashout(sid, admin, &form("p1", 150.0))).unwrap();
        let outcome = block_on(desk.reset_cashout(sid, admin, &ID::from("p1"), "dana")).unwrap();
        assert_eq!(outcome, Outcome::Unconfirmed);
        assert_eq!(stored(&desk).ledger().cashouts().count(), 1);
        let outcome = block_on(desk.reset_cashout(sid, admin, &ID::from("p1"), "Dana")).unwrap();
        assert!(matches!(outcome, Outcome::Applied(_)));
        assert_eq!(stored(&desk).ledger().cashouts().count(), 0);
    }

    #[test]
    fn reset_all_requires_the_literal() {
        let desk = desk();
        let ref sid = ID::from("s1");
        let ref admin = Viewer::admin();
        block_on(desk.record_cashout(sid, admin, &form("p1", 150.0))).unwrap();
        block_on(desk.record_cashout(sid, admin, &form("p2", 50.0))).unwrap();
        let outcome = block_on(desk.reset_all(sid, admin, "delete all")).unwrap();
        assert_eq!(outcome, Outcome::Unconfirmed);
        let outcome = block_on(desk.reset_all(sid, admin, "DELETE ALL")).unwrap();
        assert!(matches!(outcome, Outcome::Applied(_)));
        let view = block_on(desk.board(sid, admin)).unwrap();
        assert_eq!(view.eligible().len(), 2);
        assert!(!view.reset_all());
    }

    #[test]
    fn board_lists_store_players_in_key_order() {
        let mut snapshot = Snapshot::default();
        let mut session = Session::new(ID::from("s1"), ID::from("c1"), 0, "cash", Stakes::default());
        for (id, name) in [("p3", "Zoe"), ("p1", "Avi"), ("p2", "Moe")] {
            snapshot.players.insert(ID::from(id), Player::new(ID::from(id), name.into(), None));
            session
                .record_buyin(ID::from(format!("b-{}", id)), Buyin::new(ID::from(id), 10.0, 0))
                .unwrap();
        }
        snapshot.sessions.insert(ID::from("s1"), session);
        let desk = Desk::with_clock(Memory::from(snapshot), || 0);
        let view = block_on(desk.board(&ID::from("s1"), &Viewer::admin())).unwrap();
        let names = view.rows().iter().map(BoardRow::name).collect::<Vec<_>>();
        assert_eq!(names, vec!["Avi", "Moe", "Zoe"]);
    }

    #[test]
    fn report_reflects_recorded_cashouts() {
        let desk = desk();
        block_on(desk.record_cashout(&ID::from("s1"), &Viewer::admin(), &form("p1", 150.0))).unwrap();
        let report = block_on(desk.report("dana@club.org")).unwrap();
        assert_eq!(report.rows().len(), 1);
        assert_eq!(report.profit_loss(), 50.0);
        assert!(block_on(desk.report("Dana@Club.org")).unwrap().is_empty());
        assert!(block_on(desk.report("nobody@club.org")).unwrap().is_empty());
    }
}
