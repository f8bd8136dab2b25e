use crate::ID;
use crate::Unique;

/// Roster entry for a club member who can sit in sessions.
///
/// Buy-ins are never embedded here; they live in the session
/// [`Ledger`](crate::session::Ledger) and point back by player id.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Player {
    #[serde(skip)]
    id: ID<Self>,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl Player {
    pub fn new(id: ID<Self>, name: String, email: Option<String>) -> Self {
        Self { id, name, email }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
    /// Exact match against a signed-in user's email.
    pub fn owned_by(&self, email: &str) -> bool {
        self.email.as_deref() == Some(email)
    }
    /// Restore the key this record was stored under.
    pub(crate) fn keyed(mut self, id: ID<Self>) -> Self {
        self.id = id;
        self
    }
}

impl Unique for Player {
    fn id(&self) -> ID<Self> {
        self.id.clone()
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_is_an_exact_email_match() {
        let p = Player::new(ID::from("p1"), "Dana".into(), Some("dana@club.org".into()));
        assert!(p.owned_by("dana@club.org"));
        assert!(!p.owned_by("Dana@Club.org"));
        assert!(!p.owned_by("dana@club.org "));
        assert!(!p.owned_by("other@club.org"));
    }

    #[test]
    fn players_without_email_own_nothing() {
        let p = Player::new(ID::from("p1"), "Dana".into(), None);
        assert!(!p.owned_by(""));
    }
}
