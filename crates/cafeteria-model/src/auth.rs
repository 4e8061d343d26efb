//! Authentication state

use crate::user::User;

/// Session state as seen by the app
///
/// Equality compares the contained user's id only: a refreshed copy of the
/// same account is the same state.
#[derive(Debug, Clone, Default)]
pub enum AuthState {
    /// Session restore in progress
    #[default]
    Loading,
    /// No session
    Unauthenticated,
    /// Signed in (or browsing as a guest)
    Authenticated(User),
}

impl AuthState {
    #[inline]
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            AuthState::Loading | AuthState::Unauthenticated => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

impl PartialEq for AuthState {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AuthState::Loading, AuthState::Loading)
            | (AuthState::Unauthenticated, AuthState::Unauthenticated) => true,
            (AuthState::Authenticated(a), AuthState::Authenticated(b)) => a.id == b.id,
            _ => false,
        }
    }
}

impl Eq for AuthState {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campus::Campus;
    use chrono::Utc;

    #[test]
    fn equality_uses_user_id_only() {
        let user = User::authenticated("a@b.c", Campus::Daejeon, Utc::now());
        let mut refreshed = user.clone();
        refreshed.email = Some("other@b.c".into());
        refreshed.campus = Campus::Seoul;

        assert_eq!(
            AuthState::Authenticated(user.clone()),
            AuthState::Authenticated(refreshed)
        );

        let someone_else = User::authenticated("a@b.c", Campus::Daejeon, Utc::now());
        assert_ne!(
            AuthState::Authenticated(user),
            AuthState::Authenticated(someone_else)
        );
    }

    #[test]
    fn variants_differ() {
        assert_ne!(AuthState::Loading, AuthState::Unauthenticated);
        assert_eq!(AuthState::default(), AuthState::Loading);
        assert!(AuthState::Unauthenticated.user().is_none());
    }
}
