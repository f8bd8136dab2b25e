/// Where a player (or a viewer's set of players) stands in one session.
///
/// ```text
/// Scheduled --buy-in--> Playing --cash-out--> Completed
///                          ^                      |
///                          +-------reset----------+
/// ```
///
/// A buy-in is never undone, so nothing returns to `Scheduled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Participation {
    Scheduled,
    Playing,
    Completed,
}

/// Ledger events that move a participation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Buyin,
    Cashout,
    Reset,
}

impl Participation {
    /// Walk ledger events in order, starting from `Scheduled`.
    pub fn replay(transitions: impl IntoIterator<Item = Transition>) -> Self {
        transitions.into_iter().fold(Self::Scheduled, Self::step)
    }
    pub fn step(self, transition: Transition) -> Self {
        match (self, transition) {
            (Self::Scheduled, Transition::Buyin) => Self::Playing,
            (Self::Playing, Transition::Cashout) => Self::Completed,
            (Self::Completed, Transition::Reset) => Self::Playing,
            (state, _) => state,
        }
    }
}

impl std::fmt::Display for Participation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "Scheduled"),
            Self::Playing => write!(f, "Playing"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}
