//! Cafeteria Service - backend and sign-in adapters
//!
//! Thin async boundaries over the external backend client and the platform
//! sign-in provider. Adapters perform no retry, caching or validation; they
//! delegate and propagate [`ServiceError`].
//!
//! Feature reducers receive a [`Services`] bundle at construction instead of
//! reaching for process-wide singletons.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod auth;
pub mod error;
pub mod memory;
pub mod menu;

use std::fmt;
use std::sync::Arc;

pub use auth::AuthService;
pub use error::ServiceError;
pub use memory::MemoryBackend;
pub use menu::MenuService;

/// Result alias for adapter calls
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Injected service handles
#[derive(Clone)]
pub struct Services {
    /// Session and account operations
    pub auth: Arc<dyn AuthService>,
    /// Menu row operations
    pub menus: Arc<dyn MenuService>,
}

impl Services {
    /// Bundle separate adapters
    #[inline]
    #[must_use]
    pub fn new(auth: Arc<dyn AuthService>, menus: Arc<dyn MenuService>) -> Self {
        Self { auth, menus }
    }

    /// Use one backend for both surfaces
    #[must_use]
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: AuthService + MenuService + 'static,
    {
        Self {
            auth: backend.clone(),
            menus: backend,
        }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
