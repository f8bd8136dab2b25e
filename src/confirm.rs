use crate::DELETE_ALL;
use crate::club::Player;

/// Typed safeguard in front of destructive cash-out resets.
///
/// The presentation layer asks [`Confirmation::accepts`] before dispatching
/// a reset; the ledger itself never sees the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// Reset one player's cash-out: type the player's name.
    Player(String),
    /// Reset every cash-out in the session: type `DELETE ALL`.
    All,
}

impl Confirmation {
    pub fn player(player: &Player) -> Self {
        Self::Player(player.name().to_string())
    }
    /// What the user has to type.
    pub fn token(&self) -> &str {
        match self {
            Self::Player(name) => name,
            Self::All => DELETE_ALL,
        }
    }
    /// Exact, case-sensitive match. No trimming.
    pub fn accepts(&self, typed: &str) -> bool {
        typed == self.token()
    }
    pub fn prompt(&self) -> String {
        format!("Type \"{}\" to confirm", self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ID;

    #[test]
    fn player_reset_requires_exact_name() {
        let dana = Player::new(ID::from("p1"), "Dana".into(), None);
        let confirm = Confirmation::player(&dana);
        assert!(confirm.accepts("Dana"));
        assert!(!confirm.accepts("dana"));
        assert!(!confirm.accepts("Dana "));
        assert!(!confirm.accepts(""));
    }

    #[test]
    fn bulk_reset_requires_literal() {
        assert!(Confirmation::All.accepts("DELETE ALL"));
        assert!(!Confirmation::All.accepts("delete all"));
        assert_eq!(Confirmation::All.prompt(), "Type \"DELETE ALL\" to confirm");
    }
}
