use crate::Arbitrary;
use crate::EPSILON;
use crate::ID;
use crate::LedgerError;
use crate::Millis;
use crate::Money;
use crate::club::Player;

/// A player putting money into a session. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyin {
    player_id: ID<Player>,
    amount: Money,
    #[serde(default, deserialize_with = "super::lenient::millis")]
    time: Option<Millis>,
}

impl Buyin {
    pub fn new(player_id: ID<Player>, amount: Money, time: Millis) -> Self {
        Self {
            player_id,
            amount,
            time: Some(time),
        }
    }
    pub fn player(&self) -> &ID<Player> {
        &self.player_id
    }
    pub fn amount(&self) -> Money {
        self.amount
    }
    /// `None` when the stored timestamp was unreadable.
    pub fn time(&self) -> Option<Millis> {
        self.time
    }
}

/// A player's terminal settlement in a session.
///
/// `stack_value` is what the chips counted to; `cashout` is what was paid.
/// They only differ when a miscalculation was corrected at the cage.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cashout {
    player_id: ID<Player>,
    stack_value: Money,
    cashout: Money,
    #[serde(default, deserialize_with = "super::lenient::millis")]
    time: Option<Millis>,
}

impl Cashout {
    pub fn new(player_id: ID<Player>, stack_value: Money, cashout: Money, time: Millis) -> Self {
        Self {
            player_id,
            stack_value,
            cashout,
            time: Some(time),
        }
    }
    /// Build a cash-out from caller input. Without an explicit correction
    /// the stack value is recorded equal to the paid amount.
    pub fn settle(
        player_id: ID<Player>,
        cashout: Money,
        correction: Option<Money>,
        time: Millis,
    ) -> Result<Self, LedgerError> {
        let stack_value = correction.unwrap_or(cashout);
        Self::new(player_id, stack_value, cashout, time).validated()
    }
    /// Reject an empty player or an amount that is not a finite, non-negative number.
    pub fn validated(self) -> Result<Self, LedgerError> {
        if self.player_id.is_empty() {
            return Err(LedgerError::Validation("player id is empty".into()));
        }
        for (label, value) in [("cashout amount", self.cashout), ("stack value", self.stack_value)] {
            if !value.is_finite() || value < 0.0 {
                return Err(LedgerError::Validation(format!(
                    "{} must be a non-negative number, got {}",
                    label, value
                )));
            }
        }
        Ok(self)
    }
    pub fn player(&self) -> &ID<Player> {
        &self.player_id
    }
    pub fn stack_value(&self) -> Money {
        self.stack_value
    }
    pub fn cashout(&self) -> Money {
        self.cashout
    }
    pub fn time(&self) -> Option<Millis> {
        self.time
    }
    /// Whether the paid amount was corrected away from the counted stack.
    pub fn miscalculated(&self) -> bool {
        (self.cashout - self.stack_value).abs() > EPSILON
    }
}

impl Arbitrary for Buyin {
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::rng();
        Self::new(
            ID::from(format!("p{}", rng.random_range(0..4))),
            rng.random_range(1..=40) as Money * 25.0,
            rng.random_range(0..4 * 3_600_000),
        )
    }
}
