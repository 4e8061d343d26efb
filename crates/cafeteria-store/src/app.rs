//! App reducer
//!
//! Composes the four feature reducers into one state tree. Every feature
//! action goes to exactly one feature. After that feature has run, the app
//! applies its cross-feature rules inside the same transition:
//! - `UserAuthenticated(user)`: menu campus <- `user.campus`, settings user <- `user`
//! - `UserSignedOut`: menu campus <- daejeon, settings user <- none
//! - settings sign-out / account deletion success ends the session through
//!   the auth feature
//! - editor submit success folds the saved menu into the menu feature

use crate::clock::Clock;
use crate::config::AppConfig;
use crate::effect::Effect;
use crate::features::{
    AuthAction, AuthFeatureState, AuthReducer, EditorAction, EditorFeatureState, EditorReducer,
    MenuAction, MenuFeatureState, MenuReducer, SettingsAction, SettingsFeatureState,
    SettingsReducer,
};
use crate::reducer::Reducer;
use cafeteria_model::{Campus, User};
use cafeteria_service::Services;
use std::sync::Arc;
use tracing::{debug, info};

/// Top-level tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Menu,
    Settings,
}

/// Whole-app state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub auth: AuthFeatureState,
    pub menu: MenuFeatureState,
    pub editor: EditorFeatureState,
    pub settings: SettingsFeatureState,
    pub selected_tab: Tab,
    pub is_initialized: bool,
}

impl AppState {
    #[must_use]
    pub fn new(today: chrono::NaiveDate) -> Self {
        Self {
            auth: AuthFeatureState::default(),
            menu: MenuFeatureState::new(today),
            editor: EditorFeatureState::default(),
            settings: SettingsFeatureState::default(),
            selected_tab: Tab::default(),
            is_initialized: false,
        }
    }

    /// Open the editor on the menu currently shown, authored by the
    /// signed-in user
    #[must_use]
    pub fn begin_editing(&self) -> AppAction {
        AppAction::Editor(EditorAction::Begin {
            date: self.menu.current_date,
            campus: self.menu.selected_campus,
            existing: self.menu.current_menu.clone(),
            author: self.settings.current_user.clone(),
        })
    }
}

/// Whole-app actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// App launched
    Initialize,
    SelectTab(Tab),
    Auth(AuthAction),
    Menu(MenuAction),
    Editor(EditorAction),
    Settings(SettingsAction),
}

/// Root reducer
#[derive(Debug, Clone)]
pub struct AppReducer {
    auth: AuthReducer,
    menu: MenuReducer,
    editor: EditorReducer,
    settings: SettingsReducer,
    clock: Arc<dyn Clock>,
    default_campus: Campus,
}

impl AppReducer {
    /// Wire every feature to the injected services
    #[must_use]
    pub fn new(services: &Services, clock: Arc<dyn Clock>, config: &AppConfig) -> Self {
        Self {
            auth: AuthReducer::new(services.auth.clone(), clock.clone()),
            menu: MenuReducer::new(services.menus.clone(), clock.clone(), config.history_days),
            editor: EditorReducer::new(services.menus.clone()),
            settings: SettingsReducer::new(services.auth.clone(), clock.clone()),
            clock,
            default_campus: config.default_campus,
        }
    }

    /// Fresh state for today
    #[must_use]
    pub fn initial_state(&self) -> AppState {
        let mut state = AppState::new(self.clock.today());
        state.menu.selected_campus = self.default_campus;
        state
    }

    #[inline]
    #[must_use]
    pub fn menu(&self) -> &MenuReducer {
        &self.menu
    }

    fn reduce_auth(&self, state: &mut AppState, action: AuthAction) -> Effect<AppAction> {
        let authenticated = match &action {
            AuthAction::UserAuthenticated(user) => Some(user.clone()),
            _ => None,
        };
        let signed_out = matches!(action, AuthAction::UserSignedOut);

        let mut effect = self.auth.reduce(&mut state.auth, action).map(AppAction::Auth);

        if let Some(user) = authenticated {
            effect = effect.merge(self.apply_authenticated(state, user));
        } else if signed_out {
            effect = effect.merge(self.apply_signed_out(state));
        }
        effect
    }

    fn apply_authenticated(&self, state: &mut AppState, user: User) -> Effect<AppAction> {
        info!(user_id = %user.id, campus = %user.campus, "syncing features to user");
        let campus = user.campus;
        state.settings.current_user = Some(user);
        self.menu
            .reduce(&mut state.menu, MenuAction::SyncCampus(campus))
            .map(AppAction::Menu)
    }

    fn apply_signed_out(&self, state: &mut AppState) -> Effect<AppAction> {
        info!("clearing user from features");
        state.settings.current_user = None;
        self.menu
            .reduce(&mut state.menu, MenuAction::SyncCampus(Campus::Daejeon))
            .map(AppAction::Menu)
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;

    fn reduce(&self, state: &mut AppState, action: AppAction) -> Effect<AppAction> {
        match action {
            AppAction::Initialize => {
                if state.is_initialized {
                    return Effect::none();
                }
                state.is_initialized = true;
                Effect::send(AppAction::Auth(AuthAction::Appear))
            }

            AppAction::SelectTab(tab) => {
                debug!(?tab, "select tab");
                state.selected_tab = tab;
                Effect::none()
            }

            AppAction::Auth(action) => self.reduce_auth(state, action),

            AppAction::Menu(action) => self
                .menu
                .reduce(&mut state.menu, action)
                .map(AppAction::Menu),

            AppAction::Editor(action) => {
                let saved = match &action {
                    EditorAction::SubmitSucceeded(menu) => Some(menu.clone()),
                    _ => None,
                };
                let effect = self
                    .editor
                    .reduce(&mut state.editor, action)
                    .map(AppAction::Editor);

                match saved {
                    Some(menu) => effect.merge(
                        self.menu
                            .reduce(&mut state.menu, MenuAction::MenuSaved(menu))
                            .map(AppAction::Menu),
                    ),
                    None => effect,
                }
            }

            AppAction::Settings(action) => {
                let ends_session = action.ends_session();
                let effect = self
                    .settings
                    .reduce(&mut state.settings, action)
                    .map(AppAction::Settings);

                if ends_session {
                    effect.merge(self.reduce_auth(state, AuthAction::UserSignedOut))
                } else {
                    effect
                }
            }
        }
    }
}
