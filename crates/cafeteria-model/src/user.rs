//! User records

use crate::campus::Campus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate new user ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Browsing without an account
    Guest,
    /// Signed in with the platform provider
    Authenticated,
}

/// A signed-in (or guest) user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Option<String>,
    #[serde(rename = "campus_id")]
    pub campus: Campus,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create an authenticated user
    #[must_use]
    pub fn authenticated(email: impl Into<String>, campus: Campus, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            email: Some(email.into()),
            campus,
            user_type: UserType::Authenticated,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a local guest user; guests always start on the default campus
    #[must_use]
    pub fn guest(now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            email: None,
            campus: Campus::default(),
            user_type: UserType::Guest,
            created_at: now,
            updated_at: now,
        }
    }

    /// With campus
    #[inline]
    #[must_use]
    pub fn with_campus(mut self, campus: Campus) -> Self {
        self.campus = campus;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.user_type == UserType::Guest
    }

    /// Guests can browse; only authenticated users edit menus
    #[inline]
    #[must_use]
    pub fn can_edit_menus(&self) -> bool {
        self.user_type == UserType::Authenticated
    }

    /// Guests have no account to delete
    #[inline]
    #[must_use]
    pub fn can_delete_account(&self) -> bool {
        self.user_type == UserType::Authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_permissions() {
        let guest = User::guest(Utc::now());
        assert!(guest.is_guest());
        assert!(!guest.can_edit_menus());
        assert!(!guest.can_delete_account());
        assert_eq!(guest.campus, Campus::Daejeon);
    }

    #[test]
    fn authenticated_permissions() {
        let user = User::authenticated("a@b.c", Campus::Seoul, Utc::now());
        assert!(!user.is_guest());
        assert!(user.can_edit_menus());
        assert!(user.can_delete_account());
    }

    #[test]
    fn wire_names_are_snake_case() {
        let user = User::authenticated("a@b.c", Campus::Daejeon, Utc::now());
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["campus_id"], "daejeon");
        assert_eq!(value["user_type"], "authenticated");
        assert!(value.get("created_at").is_some());
        assert!(value.get("campus").is_none());
    }
}
