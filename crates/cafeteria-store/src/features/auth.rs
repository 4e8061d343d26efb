//! Authentication feature
//!
//! Tracks the session: restore on appear, platform sign-in, guest browsing,
//! and sign-out. `UserAuthenticated` is the only action carrying a user and
//! always clears any previous error.
//!
//! A restore reply is applied only if it answers the latest `Appear` and the
//! session is still loading; a sign-in that finished first wins.

use crate::clock::Clock;
use crate::effect::Effect;
use crate::reducer::Reducer;
use cafeteria_model::{AuthState, User};
use cafeteria_service::AuthService;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication feature state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthFeatureState {
    pub auth_state: AuthState,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub is_guest_mode: bool,
    /// Token of the most recently issued session restore
    pub restore_request: u64,
}

impl AuthFeatureState {
    #[inline]
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.auth_state.user()
    }

    fn awaits_restore(&self, request: u64) -> bool {
        request == self.restore_request && matches!(self.auth_state, AuthState::Loading)
    }
}

/// Authentication feature actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    /// Screen shown; restores a persisted session
    Appear,
    /// Start the platform sign-in flow
    SignInTapped,
    SignInAsGuest,
    ExitGuestMode,
    SignOut,
    UserAuthenticated(User),
    UserSignedOut,
    SignInFailed(String),
    SignOutFailed(String),
    /// Reply to the restore issued with token `request`
    SessionRestored { request: u64, user: Option<User> },
    SessionRestoreFailed { request: u64, message: String },
    SetLoading(bool),
    SetError(Option<String>),
    ClearError,
}

/// Authentication reducer
#[derive(Clone)]
pub struct AuthReducer {
    auth: Arc<dyn AuthService>,
    clock: Arc<dyn Clock>,
}

impl AuthReducer {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthService>, clock: Arc<dyn Clock>) -> Self {
        Self { auth, clock }
    }

    fn restore_session(&self, request: u64) -> Effect<AuthAction> {
        let auth = self.auth.clone();
        Effect::task(async move {
            match auth.restore_session().await {
                Ok(user) => AuthAction::SessionRestored { request, user },
                Err(e) => {
                    warn!(request, error = %e, "session restore failed");
                    AuthAction::SessionRestoreFailed {
                        request,
                        message: e.user_message(),
                    }
                }
            }
        })
    }

    fn sign_in(&self) -> Effect<AuthAction> {
        let auth = self.auth.clone();
        Effect::task(async move {
            match auth.sign_in_with_apple().await {
                Ok(user) => AuthAction::UserAuthenticated(user),
                Err(e) => {
                    warn!(error = %e, "sign-in failed");
                    AuthAction::SignInFailed(e.user_message())
                }
            }
        })
    }

    fn sign_out(&self) -> Effect<AuthAction> {
        let auth = self.auth.clone();
        Effect::task(async move {
            match auth.sign_out().await {
                Ok(()) => AuthAction::UserSignedOut,
                Err(e) => {
                    warn!(error = %e, "sign-out failed");
                    AuthAction::SignOutFailed(e.user_message())
                }
            }
        })
    }
}

impl fmt::Debug for AuthReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthReducer")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl Reducer for AuthReducer {
    type State = AuthFeatureState;
    type Action = AuthAction;

    fn reduce(&self, state: &mut AuthFeatureState, action: AuthAction) -> Effect<AuthAction> {
        debug!(?action, "auth");

        match action {
            AuthAction::Appear => {
                if state.auth_state.is_authenticated() {
                    return Effect::none();
                }
                state.auth_state = AuthState::Loading;
                state.restore_request += 1;
                self.restore_session(state.restore_request)
            }

            AuthAction::SignInTapped => {
                if state.is_loading {
                    return Effect::none();
                }
                state.is_loading = true;
                state.error_message = None;
                self.sign_in()
            }

            AuthAction::SignInAsGuest => {
                state.is_guest_mode = true;
                state.error_message = None;
                Effect::send(AuthAction::UserAuthenticated(User::guest(self.clock.now())))
            }

            AuthAction::ExitGuestMode => {
                if !state.is_guest_mode {
                    warn!("exit guest mode outside guest mode");
                    return Effect::none();
                }
                state.is_loading = true;
                self.sign_out()
            }

            AuthAction::SignOut => {
                state.is_loading = true;
                self.sign_out()
            }

            AuthAction::UserAuthenticated(user) => {
                info!(user_id = %user.id, guest = user.is_guest(), "authenticated");
                state.is_guest_mode = user.is_guest();
                state.auth_state = AuthState::Authenticated(user);
                state.is_loading = false;
                state.error_message = None;
                Effect::none()
            }

            AuthAction::UserSignedOut => {
                state.auth_state = AuthState::Unauthenticated;
                state.is_guest_mode = false;
                state.is_loading = false;
                state.error_message = None;
                Effect::none()
            }

            AuthAction::SignInFailed(message) | AuthAction::SignOutFailed(message) => {
                state.is_loading = false;
                state.error_message = Some(message);
                Effect::none()
            }

            AuthAction::SessionRestored { request, user } => {
                if !state.awaits_restore(request) {
                    debug!(
                        request,
                        latest = state.restore_request,
                        "discarding stale session restore"
                    );
                    return Effect::none();
                }
                match user {
                    Some(user) => Effect::send(AuthAction::UserAuthenticated(user)),
                    None => Effect::send(AuthAction::UserSignedOut),
                }
            }

            AuthAction::SessionRestoreFailed { request, message } => {
                if !state.awaits_restore(request) {
                    debug!(
                        request,
                        latest = state.restore_request,
                        "discarding stale restore failure"
                    );
                    return Effect::none();
                }
                state.auth_state = AuthState::Unauthenticated;
                state.is_loading = false;
                state.error_message = Some(message);
                Effect::none()
            }

            AuthAction::SetLoading(loading) => {
                state.is_loading = loading;
                Effect::none()
            }

            AuthAction::SetError(message) => {
                state.error_message = message;
                Effect::none()
            }

            AuthAction::ClearError => {
                state.error_message = None;
                Effect::none()
            }
        }
    }
}
