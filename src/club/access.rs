use super::*;
use crate::ID;
use std::collections::BTreeMap;

/// Role a viewer holds, either system-wide or within one club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Member,
}

impl TryFrom<&str> for Role {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "member" => Ok(Self::Member),
            other => Err(format!("unknown role {:?}", other)),
        }
    }
}

/// What a viewer may do with a club's sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    View,
    Edit,
}

/// Identity as handed over by the authentication collaborator.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    #[serde(default)]
    system_role: Option<Role>,
    #[serde(default)]
    clubs: BTreeMap<ID<Club>, Role>,
}

impl Viewer {
    pub fn new(system_role: Option<Role>, clubs: BTreeMap<ID<Club>, Role>) -> Self {
        Self { system_role, clubs }
    }
    pub fn admin() -> Self {
        Self::new(Some(Role::Admin), BTreeMap::new())
    }
    pub fn member_of(club: ID<Club>, role: Role) -> Self {
        Self::new(None, BTreeMap::from([(club, role)]))
    }
    /// Effective role within a club, or `None` when the club is off limits.
    /// System admins act as admins everywhere.
    pub fn role(&self, club: &ID<Club>) -> Option<Role> {
        match self.system_role {
            Some(Role::Admin) => Some(Role::Admin),
            _ => self.clubs.get(club).copied(),
        }
    }
    pub fn capability(&self, club: &ID<Club>) -> Option<Capability> {
        self.role(club).map(|role| match role {
            Role::Admin => Capability::Edit,
            Role::Manager | Role::Member => Capability::View,
        })
    }
    pub fn can_edit(&self, club: &ID<Club>) -> bool {
        self.capability(club) == Some(Capability::Edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_admin_edits_every_club() {
        let viewer = Viewer::admin();
        assert_eq!(viewer.role(&ID::from("any")), Some(Role::Admin));
        assert!(viewer.can_edit(&ID::from("any")));
    }

    #[test]
    fn members_only_see_their_own_clubs() {
        let viewer = Viewer::member_of(ID::from("c1"), Role::Member);
        assert_eq!(viewer.capability(&ID::from("c1")), Some(Capability::View));
        assert_eq!(viewer.capability(&ID::from("c2")), None);
        assert!(!viewer.can_edit(&ID::from("c1")));
    }

    #[test]
    fn club_admins_edit_their_club() {
        let viewer = Viewer::member_of(ID::from("c1"), Role::Admin);
        assert!(viewer.can_edit(&ID::from("c1")));
        assert!(!viewer.can_edit(&ID::from("c2")));
    }

    #[test]
    fn roles_parse_loosely() {
        assert_eq!(Role::try_from(" Admin "), Ok(Role::Admin));
        assert!(Role::try_from("owner").is_err());
    }
}
