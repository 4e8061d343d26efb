//! Feature reducers
//!
//! Each feature owns one state record and one action enum. Features never
//! touch each other's state; the app reducer is the only place that does.

pub mod auth;
pub mod editor;
pub mod menu;
pub mod settings;

pub use auth::{AuthAction, AuthFeatureState, AuthReducer};
pub use editor::{EditTarget, EditorAction, EditorFeatureState, EditorReducer};
pub use menu::{MenuAction, MenuFeatureState, MenuReducer};
pub use settings::{SettingsAction, SettingsFeatureState, SettingsReducer};
