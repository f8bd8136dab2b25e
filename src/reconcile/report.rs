use super::*;
use crate::ID;
use crate::LedgerError;
use crate::Millis;
use crate::Money;
use crate::club::Club;
use crate::club::Player;
use crate::format;
use crate::session::Session;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Cross-session "my sessions" report for one signed-in user.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Report {
    rows: Vec<SessionSummary>,
}

impl Report {
    /// Every roster entry registered under this email counts as the viewer.
    pub fn relevant(players: &BTreeMap<ID<Player>, Player>, email: &str) -> BTreeSet<ID<Player>> {
        players
            .iter()
            .filter(|(_, p)| p.owned_by(email))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn mine(
        email: &str,
        players: &BTreeMap<ID<Player>, Player>,
        sessions: &BTreeMap<ID<Session>, Session>,
        clubs: &BTreeMap<ID<Club>, Club>,
        now: Millis,
    ) -> Result<Self, LedgerError> {
        let ref relevant = Self::relevant(players, email);
        if relevant.is_empty() {
            log::debug!("[report] no players registered to {}", email);
            return Ok(Self::default());
        }
        Self::over(relevant, sessions, &Reconciler::new(clubs, now))
    }

    pub fn over<P: Pace>(
        relevant: &BTreeSet<ID<Player>>,
        sessions: &BTreeMap<ID<Session>, Session>,
        reconciler: &Reconciler<'_, P>,
    ) -> Result<Self, LedgerError> {
        let rows = sessions
            .values()
            .map(|s| reconciler.summarize(s, relevant))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        Ok(Self {
            rows: sort_by_date_descending(rows),
        })
    }

    pub fn rows(&self) -> &[SessionSummary] {
        &self.rows
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    pub fn buyin_total(&self) -> Money {
        self.rows.iter().map(SessionSummary::buyin_total).sum()
    }
    /// Net result over completed sessions.
    pub fn profit_loss(&self) -> Money {
        self.rows.iter().filter_map(SessionSummary::profit_loss).sum()
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "No sessions found.");
        }
        writeln!(
            f,
            "{:<10}  {:<16}  {:<10}  {:<9}  {:>7}  {:>8}  {:>6}  {:>7}  {:>9}  {:>9}  {:>9}  {:>7}",
            "Date", "Club", "Stakes", "Status", "Players", "Time", "Hands", "Buy-ins", "Total", "Final", "P&L", "BB"
        )?;
        for row in self.rows.iter() {
            writeln!(
                f,
                "{:<10}  {:<16}  {:<10}  {:<9}  {:>7}  {:>8}  {:>6}  {:>7}  {:>9}  {:>9}  {:>9}  {:>7}",
                row.date().map_or_else(|| "-".to_string(), format::format_date),
                row.club_name(),
                row.stakes().to_string(),
                row.status().to_string(),
                row.player_count(),
                row.play_time().map_or_else(|| "-".to_string(), |t| t.to_string()),
                format::format_hands(row.hands()),
                row.buyin_count(),
                format::money(row.buyin_total()),
                row.final_stack().map_or_else(|| "-".to_string(), format::money),
                row.profit_loss().map_or_else(|| "-".to_string(), format::signed_money),
                row.profit_loss_bb().map_or_else(|| "-".to_string(), format::signed_bb),
            )?;
        }
        write!(
            f,
            "{} sessions, {} in, net {}",
            self.rows.len(),
            format::money(self.buyin_total()),
            format::signed_money(self.profit_loss())
        )
    }
}
