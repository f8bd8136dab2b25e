use super::*;
use crate::ID;
use crate::LedgerError;
use crate::Millis;
use crate::Money;
use crate::Unique;
use crate::club::Capability;
use crate::club::Player;
use crate::session::Cashout;
use crate::session::Session;

/// Cash-out entry as submitted from the cage.
///
/// The stack value is only read when the miscalculation switch is on;
/// otherwise it is recorded equal to the amount paid.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashoutForm {
    #[serde(default)]
    pub player_id: Option<ID<Player>>,
    #[serde(default)]
    pub amount: Option<Money>,
    #[serde(default)]
    pub miscalculation: bool,
    #[serde(default)]
    pub stack_value: Option<Money>,
}

impl CashoutForm {
    /// Whether the submit action is enabled.
    pub fn ready(&self, session: &Session, capability: Capability) -> bool {
        !session.closed()
            && capability == Capability::Edit
            && self.player_id.as_ref().is_some_and(|p| !p.is_empty())
            && self.amount.is_some()
            && (!self.miscalculation || self.stack_value.is_some())
    }
    pub fn settle(&self, time: Millis) -> Result<Cashout, LedgerError> {
        let player = self
            .player_id
            .clone()
            .ok_or_else(|| LedgerError::Validation("no player selected".into()))?;
        let amount = self
            .amount
            .ok_or_else(|| LedgerError::Validation("no amount given".into()))?;
        let correction = match self.miscalculation {
            false => None,
            true => Some(self.stack_value.ok_or_else(|| {
                LedgerError::Validation("miscalculation needs a stack value".into())
            })?),
        };
        Cashout::settle(player, amount, correction, time)
    }
}

/// One line of the cash-out board.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRow {
    player_id: ID<Player>,
    name: String,
    status: String,
    resettable: bool,
}

impl BoardRow {
    pub fn player(&self) -> &ID<Player> {
        &self.player_id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn status(&self) -> &str {
        &self.status
    }
    pub fn resettable(&self) -> bool {
        self.resettable
    }
}

/// Everything the cash-out screen of one session shows.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashoutView {
    rows: Vec<BoardRow>,
    eligible: Vec<BoardRow>,
    reset_all: bool,
    editable: bool,
}

impl CashoutView {
    pub fn of(roster: &[Player], session: &Session, capability: Capability) -> Self {
        let ledger = session.ledger();
        let editable = !session.closed() && capability == Capability::Edit;
        let row = |player: &Player| {
            let ref id = player.id();
            BoardRow {
                player_id: id.clone(),
                name: player.name().to_string(),
                status: CashoutStatus::of(player, session).to_string(),
                resettable: editable && ledger.cashout_of(id).is_some(),
            }
        };
        let rows = ledger
            .players_with_buyins(roster)
            .into_iter()
            .map(row)
            .collect::<Vec<_>>();
        let eligible = ledger
            .eligible_for_cashout(roster)
            .into_iter()
            .map(row)
            .collect::<Vec<_>>();
        let cashed = rows.len() > eligible.len();
        Self {
            rows,
            eligible,
            reset_all: cashed && !session.closed(),
            editable,
        }
    }
    pub fn rows(&self) -> &[BoardRow] {
        &self.rows
    }
    /// Players offered in the cash-out selector.
    pub fn eligible(&self) -> &[BoardRow] {
        &self.eligible
    }
    /// "Reset all" is offered once anyone has cashed out of an open session.
    pub fn reset_all(&self) -> bool {
        self.reset_all
    }
    pub fn editable(&self) -> bool {
        self.editable
    }
}

impl std::fmt::Display for CashoutView {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in self.rows.iter() {
            writeln!(f, "{:<20} {}", row.name, row.status)?;
        }
        Ok(())
    }
}
