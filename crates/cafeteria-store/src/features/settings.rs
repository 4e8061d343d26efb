//! Settings feature
//!
//! Destructive actions (sign-out, account deletion) follow
//! tap -> confirm -> service call. Success clears the user; failure sets an
//! error and leaves the user in place. Cancelling only hides the dialog.

use crate::clock::Clock;
use crate::effect::Effect;
use crate::reducer::Reducer;
use cafeteria_model::{Campus, User};
use cafeteria_service::AuthService;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

const GUEST_DELETE_MESSAGE: &str = "게스트 계정은 삭제할 수 없습니다.";
const GUEST_CAMPUS_MESSAGE: &str = "로그인 후 캠퍼스를 변경할 수 있습니다.";

/// Settings feature state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsFeatureState {
    pub current_user: Option<User>,
    pub is_signing_out: bool,
    pub is_deleting_account: bool,
    pub is_updating_campus: bool,
    pub show_sign_out_confirmation: bool,
    pub show_delete_account_confirmation: bool,
    pub error_message: Option<String>,
}

/// Settings feature actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    SignOutTapped,
    SignOutCancelled,
    SignOutConfirmed,
    SignOutSucceeded,
    SignOutFailed(String),
    DeleteAccountTapped,
    DeleteAccountCancelled,
    DeleteAccountConfirmed,
    AccountDeleted,
    DeleteAccountFailed(String),
    /// Change the signed-in user's campus
    ChangeCampus(Campus),
    CampusChanged(Campus),
    CampusChangeFailed(String),
    SetError(Option<String>),
    ClearError,
}

impl SettingsAction {
    /// Whether this action ends the session
    #[inline]
    #[must_use]
    pub fn ends_session(&self) -> bool {
        matches!(self, Self::SignOutSucceeded | Self::AccountDeleted)
    }
}

/// Settings reducer
#[derive(Clone)]
pub struct SettingsReducer {
    auth: Arc<dyn AuthService>,
    clock: Arc<dyn Clock>,
}

impl SettingsReducer {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthService>, clock: Arc<dyn Clock>) -> Self {
        Self { auth, clock }
    }

    fn sign_out(&self) -> Effect<SettingsAction> {
        let auth = self.auth.clone();
        Effect::task(async move {
            match auth.sign_out().await {
                Ok(()) => SettingsAction::SignOutSucceeded,
                Err(e) => {
                    warn!(error = %e, "sign-out failed");
                    SettingsAction::SignOutFailed(e.user_message())
                }
            }
        })
    }

    fn delete_account(&self) -> Effect<SettingsAction> {
        let auth = self.auth.clone();
        Effect::task(async move {
            match auth.delete_account().await {
                Ok(()) => SettingsAction::AccountDeleted,
                Err(e) => {
                    warn!(error = %e, "account deletion failed");
                    SettingsAction::DeleteAccountFailed(e.user_message())
                }
            }
        })
    }

    fn update_campus(&self, campus: Campus) -> Effect<SettingsAction> {
        let auth = self.auth.clone();
        Effect::task(async move {
            match auth.update_user_campus(campus).await {
                Ok(()) => SettingsAction::CampusChanged(campus),
                Err(e) => {
                    warn!(error = %e, %campus, "campus update failed");
                    SettingsAction::CampusChangeFailed(e.user_message())
                }
            }
        })
    }
}

impl fmt::Debug for SettingsReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsReducer")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl Reducer for SettingsReducer {
    type State = SettingsFeatureState;
    type Action = SettingsAction;

    fn reduce(
        &self,
        state: &mut SettingsFeatureState,
        action: SettingsAction,
    ) -> Effect<SettingsAction> {
        debug!(?action, "settings");

        match action {
            SettingsAction::SignOutTapped => {
                state.show_sign_out_confirmation = true;
                Effect::none()
            }

            SettingsAction::SignOutCancelled => {
                state.show_sign_out_confirmation = false;
                Effect::none()
            }

            SettingsAction::SignOutConfirmed => {
                if !state.show_sign_out_confirmation || state.is_signing_out {
                    return Effect::none();
                }
                state.show_sign_out_confirmation = false;
                state.is_signing_out = true;
                state.error_message = None;
                self.sign_out()
            }

            SettingsAction::SignOutSucceeded => {
                info!("signed out from settings");
                state.is_signing_out = false;
                state.current_user = None;
                state.error_message = None;
                Effect::none()
            }

            SettingsAction::SignOutFailed(message) => {
                state.is_signing_out = false;
                state.error_message = Some(message);
                Effect::none()
            }

            SettingsAction::DeleteAccountTapped => {
                if !state.current_user.as_ref().is_some_and(User::can_delete_account) {
                    state.error_message = Some(GUEST_DELETE_MESSAGE.to_string());
                    return Effect::none();
                }
                state.show_delete_account_confirmation = true;
                Effect::none()
            }

            SettingsAction::DeleteAccountCancelled => {
                state.show_delete_account_confirmation = false;
                Effect::none()
            }

            SettingsAction::DeleteAccountConfirmed => {
                if !state.show_delete_account_confirmation || state.is_deleting_account {
                    return Effect::none();
                }
                state.show_delete_account_confirmation = false;
                state.is_deleting_account = true;
                state.error_message = None;
                self.delete_account()
            }

            SettingsAction::AccountDeleted => {
                info!("account deleted");
                state.is_deleting_account = false;
                state.current_user = None;
                state.error_message = None;
                Effect::none()
            }

            SettingsAction::DeleteAccountFailed(message) => {
                state.is_deleting_account = false;
                state.error_message = Some(message);
                Effect::none()
            }

            SettingsAction::ChangeCampus(campus) => {
                if !campus.is_available() {
                    warn!(%campus, "campus not available");
                    return Effect::none();
                }
                let Some(user) = state.current_user.as_ref() else {
                    return Effect::none();
                };
                if user.is_guest() {
                    state.error_message = Some(GUEST_CAMPUS_MESSAGE.to_string());
                    return Effect::none();
                }
                if user.campus == campus || state.is_updating_campus {
                    return Effect::none();
                }
                state.is_updating_campus = true;
                self.update_campus(campus)
            }

            SettingsAction::CampusChanged(campus) => {
                state.is_updating_campus = false;
                state.error_message = None;
                if let Some(user) = state.current_user.as_mut() {
                    user.campus = campus;
                    user.updated_at = self.clock.now();
                }
                Effect::none()
            }

            SettingsAction::CampusChangeFailed(message) => {
                state.is_updating_campus = false;
                state.error_message = Some(message);
                Effect::none()
            }

            SettingsAction::SetError(message) => {
                state.error_message = message;
                Effect::none()
            }

            SettingsAction::ClearError => {
                state.error_message = None;
                Effect::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use cafeteria_service::MemoryBackend;
    use chrono::{NaiveDate, Utc};

    fn reducer() -> SettingsReducer {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
        SettingsReducer::new(Arc::new(MemoryBackend::new()), Arc::new(clock))
    }

    fn signed_in() -> SettingsFeatureState {
        SettingsFeatureState {
            current_user: Some(User::authenticated("me@ssafy.com", Campus::Daejeon, Utc::now())),
            ..SettingsFeatureState::default()
        }
    }

    #[test]
    fn cancel_only_hides_dialog() {
        let reducer = reducer();
        let mut state = signed_in();
        reducer.reduce(&mut state, SettingsAction::SignOutTapped);
        assert!(state.show_sign_out_confirmation);

        let before = state.clone();
        let effect = reducer.reduce(&mut state, SettingsAction::SignOutCancelled);
        assert!(effect.is_none());
        assert_eq!(
            state,
            SettingsFeatureState {
                show_sign_out_confirmation: false,
                ..before
            }
        );
    }

    #[test]
    fn confirm_without_dialog_is_ignored() {
        let reducer = reducer();
        let mut state = signed_in();
        let effect = reducer.reduce(&mut state, SettingsAction::SignOutConfirmed);
        assert!(effect.is_none());
        assert!(!state.is_signing_out);
    }

    #[tokio::test]
    async fn confirmed_sign_out_clears_user() {
        let reducer = reducer();
        let mut state = signed_in();
        reducer.reduce(&mut state, SettingsAction::SignOutTapped);
        let actions = reducer
            .reduce(&mut state, SettingsAction::SignOutConfirmed)
            .collect()
            .await;
        assert!(state.is_signing_out);
        assert!(!state.show_sign_out_confirmation);
        assert_eq!(actions, vec![SettingsAction::SignOutSucceeded]);

        reducer.reduce(&mut state, SettingsAction::SignOutSucceeded);
        assert!(state.current_user.is_none());
        assert!(!state.is_signing_out);
    }

    #[test]
    fn guests_cannot_delete_accounts() {
        let reducer = reducer();
        let mut state = SettingsFeatureState {
            current_user: Some(User::guest(Utc::now())),
            ..SettingsFeatureState::default()
        };
        reducer.reduce(&mut state, SettingsAction::DeleteAccountTapped);
        assert!(!state.show_delete_account_confirmation);
        assert_eq!(state.error_message.as_deref(), Some(GUEST_DELETE_MESSAGE));
    }

    #[test]
    fn unavailable_campus_change_is_ignored() {
        let reducer = reducer();
        let mut state = signed_in();
        let effect = reducer.reduce(&mut state, SettingsAction::ChangeCampus(Campus::Seoul));
        assert!(effect.is_none());
        assert!(!state.is_updating_campus);
    }

    #[test]
    fn campus_changed_updates_user() {
        let reducer = reducer();
        let mut state = SettingsFeatureState {
            current_user: Some(User::authenticated("me@ssafy.com", Campus::Seoul, Utc::now())),
            is_updating_campus: true,
            ..SettingsFeatureState::default()
        };
        reducer.reduce(&mut state, SettingsAction::CampusChanged(Campus::Daejeon));
        assert!(!state.is_updating_campus);
        assert_eq!(state.current_user.unwrap().campus, Campus::Daejeon);
    }
}
