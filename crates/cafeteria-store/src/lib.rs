//! Cafeteria Store - reducer-based app core
//!
//! The app's state lives in one tree of feature states, changed only by
//! pure transitions:
//! - [`Reducer`]s map `(state, action)` to a new state and an [`Effect`]
//! - effects run the async service calls and re-enter as actions
//! - [`AppReducer`] routes actions to features and keeps them consistent
//! - [`Store`] owns the state, drives effects and publishes snapshots
//!
//! # Example
//!
//! ```rust,ignore
//! use cafeteria_store::prelude::*;
//!
//! # async fn example(services: Services) {
//! let reducer = AppReducer::new(&services, Arc::new(SystemClock), &AppConfig::default());
//! let mut store = Store::new(reducer.clone(), reducer.initial_state());
//!
//! store.send(AppAction::Initialize);
//! store.settle().await;
//! println!("authenticated: {}", store.state().auth.auth_state.is_authenticated());
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod app;
pub mod clock;
pub mod config;
pub mod effect;
pub mod error;
pub mod features;
pub mod reducer;
pub mod store;

pub use app::{AppAction, AppReducer, AppState, Tab};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use effect::Effect;
pub use error::{ConfigError, StoreError};
pub use reducer::Reducer;
pub use store::{Store, StoreHandle};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the app core
    pub use crate::features::{AuthAction, EditorAction, MenuAction, SettingsAction};
    pub use crate::{
        AppAction, AppConfig, AppReducer, AppState, Clock, Effect, FixedClock, Reducer, Store,
        StoreHandle, SystemClock, Tab,
    };
    pub use cafeteria_service::Services;
    pub use std::sync::Arc;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
