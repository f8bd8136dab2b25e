use crate::Money;
use crate::Unique;
use crate::club::Player;
use crate::format::money;
use crate::session::Cashout;
use crate::session::Session;

/// One-line cash-out status of a player in a session.
///
/// Profit/loss here is measured against what was actually paid out
/// (`cashout`), not the counted stack. [`SessionSummary`](super::SessionSummary)
/// uses the stack value instead.
#[derive(Debug, Clone, PartialEq)]
pub struct CashoutStatus {
    buyins: Money,
    settled: Option<Cashout>,
}

impl CashoutStatus {
    pub fn of(player: &Player, session: &Session) -> Self {
        let ref id = player.id();
        let ledger = session.ledger();
        Self {
            buyins: ledger.total_buyins(id),
            settled: ledger.cashout_of(id).cloned(),
        }
    }
    pub fn buyins(&self) -> Money {
        self.buyins
    }
    pub fn cashout(&self) -> Option<&Cashout> {
        self.settled.as_ref()
    }
    /// Settled amount minus buy-ins.
    pub fn profit_loss(&self) -> Option<Money> {
        self.settled.as_ref().map(|c| c.cashout() - self.buyins)
    }
    /// `₪180`, or `₪180 (₪200)` when the payout was corrected away from the stack.
    pub fn cashout_display(&self) -> Option<String> {
        self.settled.as_ref().map(|c| match c.miscalculated() {
            true => format!("{} ({})", money(c.cashout()), money(c.stack_value())),
            false => money(c.cashout()),
        })
    }
}

impl std::fmt::Display for CashoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Buy-ins: {}", money(self.buyins))?;
        match (self.cashout_display(), self.profit_loss()) {
            (Some(cashout), Some(pnl)) => write!(
                f,
                " | Cashout: {} | {}: {}",
                cashout,
                if pnl >= 0.0 { "Profit" } else { "Loss" },
                money(pnl.abs())
            ),
            _ => Ok(()),
        }
    }
}
