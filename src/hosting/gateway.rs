use crate::ID;
use crate::club::Role;
use crate::club::Viewer;

/// System-wide role, e.g. `admin`.
pub const SYSTEM_ROLE: &str = "X-System-Role";
/// Club roles as `club=role` pairs separated by commas.
pub const CLUB_ROLE: &str = "X-Club-Role";

/// Builds the viewer from the gateway headers. Unparseable entries grant nothing.
pub fn viewer(system: Option<&str>, clubs: Option<&str>) -> Viewer {
    let system = system.and_then(|s| Role::try_from(s).ok());
    let clubs = clubs
        .unwrap_or_default()
        .split(',')
        .filter_map(|pair| pair.split_once('='))
        .filter_map(|(club, role)| {
            Role::try_from(role)
                .ok()
                .map(|role| (ID::from(club.trim()), role))
        })
        .filter(|(club, _)| !club.is_empty())
        .collect();
    Viewer::new(system, clubs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::Capability;

    #[test]
    fn parses_club_roles() {
        let viewer = viewer(None, Some("c1=admin, c2=member,bogus,c3=owner"));
        assert_eq!(viewer.capability(&ID::from("c1")), Some(Capability::Edit));
        assert_eq!(viewer.capability(&ID::from("c2")), Some(Capability::View));
        assert_eq!(viewer.capability(&ID::from("c3")), None);
    }

    #[test]
    fn system_admin_header_grants_everything() {
        assert!(viewer(Some("Admin"), None).can_edit(&ID::from("anywhere")));
        assert_eq!(viewer(Some("root"), None).role(&ID::from("c1")), None);
    }

    #[test]
    fn missing_headers_grant_nothing() {
        assert_eq!(viewer(None, None), Viewer::default());
    }
}
