//! Identity and role label types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display identity, stored verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Cosmetic label for this identity
    pub fn role(&self) -> RoleLabel {
        RoleLabel::from_identity(self.as_str())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Badge shown next to the identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoleLabel {
    Admin,
    Guest,
    User,
}

impl RoleLabel {
    /// Case-sensitive, unanchored substring match. `admin` is checked
    /// before `guest`, so `"guest_admin"` is an admin badge.
    pub fn from_identity(identity: &str) -> Self {
        if identity.contains("admin") {
            RoleLabel::Admin
        } else if identity.contains("guest") {
            RoleLabel::Guest
        } else {
            RoleLabel::User
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleLabel::Admin => "ADMIN",
            RoleLabel::Guest => "GUEST",
            RoleLabel::User => "USER",
        }
    }

    /// Style class for the badge region
    pub fn css_class(&self) -> &'static str {
        match self {
            RoleLabel::Admin => "role-badge admin",
            RoleLabel::Guest => "role-badge guest",
            RoleLabel::User => "role-badge user",
        }
    }
}

impl fmt::Display for RoleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_substring_anywhere() {
        assert_eq!(RoleLabel::from_identity("admin"), RoleLabel::Admin);
        assert_eq!(RoleLabel::from_identity("adminXYZ"), RoleLabel::Admin);
        assert_eq!(RoleLabel::from_identity("XYZadminXYZ"), RoleLabel::Admin);
    }

    #[test]
    fn test_admin_wins_over_guest() {
        assert_eq!(RoleLabel::from_identity("guest_admin"), RoleLabel::Admin);
        assert_eq!(RoleLabel::from_identity("admin_guest"), RoleLabel::Admin);
    }

    #[test]
    fn test_guest_and_default() {
        assert_eq!(RoleLabel::from_identity("guest42"), RoleLabel::Guest);
        assert_eq!(RoleLabel::from_identity("bob"), RoleLabel::User);
        assert_eq!(RoleLabel::from_identity(""), RoleLabel::User);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(RoleLabel::from_identity("ADMIN"), RoleLabel::User);
        assert_eq!(RoleLabel::from_identity("Guest"), RoleLabel::User);
    }

    #[test]
    fn test_badge_text_and_class() {
        let role = Identity::new("alice_admin").role();
        assert_eq!(role.as_str(), "ADMIN");
        assert_eq!(role.css_class(), "role-badge admin");
        assert_eq!(RoleLabel::Guest.css_class(), "role-badge guest");
        assert_eq!(RoleLabel::User.to_string(), "USER");
    }
}
