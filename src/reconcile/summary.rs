use super::*;
use crate::ID;
use crate::LedgerError;
use crate::Millis;
use crate::Money;
use crate::UNKNOWN_CLUB;
use crate::Unique;
use crate::club::Club;
use crate::club::Player;
use crate::session::Session;
use crate::session::Stakes;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// A viewer's result in one session, ready for display.
///
/// `profit_loss` is measured against the counted stack (`stack_value`),
/// which is what the chips were worth regardless of any payout correction.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    id: ID<Session>,
    date: Option<Millis>,
    status: Participation,
    play_time: Option<PlayTime>,
    buyin_count: usize,
    buyin_total: Money,
    final_stack: Option<Money>,
    profit_loss: Option<Money>,
    #[serde(rename = "profitLossBB")]
    profit_loss_bb: Option<f64>,
    club_name: String,
    player_count: usize,
    hands: Option<u32>,
    stakes: Stakes,
}

impl SessionSummary {
    pub fn id(&self) -> &ID<Session> {
        &self.id
    }
    /// `None` when the session's start time was unreadable.
    pub fn date(&self) -> Option<Millis> {
        self.date
    }
    pub fn status(&self) -> Participation {
        self.status
    }
    pub fn play_time(&self) -> Option<PlayTime> {
        self.play_time
    }
    pub fn buyin_count(&self) -> usize {
        self.buyin_count
    }
    pub fn buyin_total(&self) -> Money {
        self.buyin_total
    }
    pub fn final_stack(&self) -> Option<Money> {
        self.final_stack
    }
    pub fn profit_loss(&self) -> Option<Money> {
        self.profit_loss
    }
    pub fn profit_loss_bb(&self) -> Option<f64> {
        self.profit_loss_bb
    }
    pub fn club_name(&self) -> &str {
        &self.club_name
    }
    pub fn player_count(&self) -> usize {
        self.player_count
    }
    pub fn hands(&self) -> Option<u32> {
        self.hands
    }
    pub fn stakes(&self) -> Stakes {
        self.stakes
    }
}

/// Derives summaries from already-fetched records. Never mutates, never does I/O.
pub struct Reconciler<'a, P: Pace = Live> {
    clubs: &'a BTreeMap<ID<Club>, Club>,
    pace: P,
    now: Millis,
}

impl<'a> Reconciler<'a, Live> {
    pub fn new(clubs: &'a BTreeMap<ID<Club>, Club>, now: Millis) -> Self {
        Self::with_pace(clubs, Live, now)
    }
}

impl<'a, P: Pace> Reconciler<'a, P> {
    pub fn with_pace(clubs: &'a BTreeMap<ID<Club>, Club>, pace: P, now: Millis) -> Self {
        Self { clubs, pace, now }
    }

    /// Summarize `session` from the point of view of the `relevant` players.
    /// Sessions they neither bought into nor sat in yield `None`.
    pub fn summarize(
        &self,
        session: &Session,
        relevant: &BTreeSet<ID<Player>>,
    ) -> Result<Option<SessionSummary>, LedgerError> {
        let ledger = session.ledger();
        ledger.check()?;
        let buyins = ledger
            .buyins()
            .map(|(_, b)| b)
            .filter(|b| relevant.contains(b.player()))
            .collect::<Vec<_>>();
        let seated = relevant.iter().any(|p| ledger.seated(p));
        if buyins.is_empty() && !seated {
            return Ok(None);
        }
        let cashout = ledger
            .cashouts()
            .map(|(_, c)| c)
            .find(|c| relevant.contains(c.player()))
            .filter(|_| !buyins.is_empty());
        let player_count = ledger.seats().count();
        // one unreadable timestamp among the relevant events voids the duration
        let first = buyins
            .iter()
            .map(|b| b.time())
            .collect::<Option<Vec<_>>>()
            .and_then(|times| times.into_iter().min());
        let last = cashout.map_or(Some(self.now), |c| c.time());
        let play_time = first.zip(last).map(|(a, b)| PlayTime::between(a, b));
        let hands = play_time
            .filter(|_| player_count > 0)
            .map(|t| self.pace.hands(player_count, t.total_minutes()));
        let buyin_total = buyins.iter().map(|b| b.amount()).sum::<Money>();
        let final_stack = cashout.map(|c| c.stack_value());
        let profit_loss = final_stack.map(|stack| stack - buyin_total);
        let stakes = session.stakes();
        log::debug!("[reconcile] summarized session {}", session.id());
        Ok(Some(SessionSummary {
            id: session.id(),
            date: session.start(),
            status: Participation::replay(
                buyins
                    .iter()
                    .map(|_| Transition::Buyin)
                    .chain(cashout.map(|_| Transition::Cashout)),
            ),
            play_time,
            buyin_count: buyins.len(),
            buyin_total,
            final_stack,
            profit_loss,
            profit_loss_bb: profit_loss.and_then(|pnl| stakes.in_big_blinds(pnl)),
            club_name: self
                .clubs
                .get(session.club())
                .map_or_else(|| UNKNOWN_CLUB.to_string(), |c| c.name().to_string()),
            player_count,
            hands,
            stakes,
        }))
    }
}

/// Newest first. Stable, so sessions starting together keep their order.
pub fn sort_by_date_descending(mut summaries: Vec<SessionSummary>) -> Vec<SessionSummary> {
    summaries.sort_by(|a, b| b.date.cmp(&a.date));
    summaries
}
