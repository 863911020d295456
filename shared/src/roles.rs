use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role scopes, ordered from narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Supervisor,
    OrphanageAdmin,
    Superuser,
}

/// Dashboard sections a role may open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Overview,
    Centres,
    Staff,
    Branches,
    Inventory,
    Fundraisers,
    Notifications,
    Reports,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Centres => "Orphanage Centres",
            Section::Staff => "Staff",
            Section::Branches => "Branches",
            Section::Inventory => "Inventory",
            Section::Fundraisers => "Fundraising",
            Section::Notifications => "Notifications",
            Section::Reports => "Reports",
        }
    }
}

impl Role {
    pub fn as_key(&self) -> &'static str {
        match self {
            Role::Supervisor => "SUPERVISOR",
            Role::OrphanageAdmin => "ORPHANAGE_ADMIN",
            Role::Superuser => "SUPERUSER",
        }
    }

    /// Sections shown in the sidebar, in display order
    pub fn sections(&self) -> &'static [Section] {
        match self {
            Role::Superuser => &[
                Section::Overview,
                Section::Centres,
                Section::Notifications,
                Section::Reports,
            ],
            Role::OrphanageAdmin => &[
                Section::Overview,
                Section::Staff,
                Section::Branches,
                Section::Inventory,
                Section::Fundraisers,
                Section::Notifications,
                Section::Reports,
            ],
            Role::Supervisor => &[
                Section::Overview,
                Section::Inventory,
                Section::Fundraisers,
                Section::Notifications,
                Section::Reports,
            ],
        }
    }

    pub fn can_open(&self, section: Section) -> bool {
        self.sections().contains(&section)
    }

    pub fn can_view_notifications(&self) -> bool {
        self.can_open(Section::Notifications)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::labels::translate(self.as_key()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches("ROLE_").to_ascii_uppercase();
        match normalized.as_str() {
            "SUPERUSER" | "SUPER_USER" | "SYSTEM_ADMIN" => Ok(Role::Superuser),
            "ORPHANAGE_ADMIN" | "ADMIN" => Ok(Role::OrphanageAdmin),
            "SUPERVISOR" | "BRANCH_SUPERVISOR" => Ok(Role::Supervisor),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Credentials a login flow left in browser storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    /// Branch the caller is scoped to, if any
    pub branch_id: Option<String>,
}

impl Session {
    /// Build a session from raw storage values; a blank token means no session
    pub fn from_parts(token: Option<String>, role: Option<String>, branch_id: Option<String>) -> Option<Self> {
        let token = token.filter(|t| !t.trim().is_empty())?;
        let role = role.as_deref().and_then(|r| r.parse().ok())?;
        Some(Self {
            token,
            role,
            branch_id: branch_id.filter(|b| !b.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Supervisor < Role::OrphanageAdmin);
        assert!(Role::OrphanageAdmin < Role::Superuser);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("ROLE_SUPERVISOR".parse::<Role>(), Ok(Role::Supervisor));
        assert_eq!("orphanage_admin".parse::<Role>(), Ok(Role::OrphanageAdmin));
        assert_eq!("SUPERUSER".parse::<Role>(), Ok(Role::Superuser));
        assert!("GUEST".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(
            serde_json::to_value(Role::OrphanageAdmin).unwrap(),
            serde_json::json!("ORPHANAGE_ADMIN")
        );
    }

    #[test]
    fn test_sections_by_role() {
        assert!(Role::Superuser.can_open(Section::Centres));
        assert!(!Role::Superuser.can_open(Section::Staff));
        assert!(Role::OrphanageAdmin.can_open(Section::Staff));
        assert!(!Role::Supervisor.can_open(Section::Branches));
        for role in [Role::Supervisor, Role::OrphanageAdmin, Role::Superuser] {
            assert!(role.can_view_notifications());
            assert_eq!(role.sections()[0], Section::Overview);
        }
    }

    #[test]
    fn test_session_from_parts() {
        let session = Session::from_parts(
            Some("abc".into()),
            Some("SUPERVISOR".into()),
            Some("".into()),
        )
        .unwrap();
        assert_eq!(session.role, Role::Supervisor);
        assert_eq!(session.branch_id, None);

        assert!(Session::from_parts(Some("  ".into()), Some("SUPERVISOR".into()), None).is_none());
        assert!(Session::from_parts(Some("abc".into()), Some("GUEST".into()), None).is_none());
        assert!(Session::from_parts(None, Some("SUPERVISOR".into()), None).is_none());
    }
}
