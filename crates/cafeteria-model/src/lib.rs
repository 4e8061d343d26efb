//! Cafeteria Model - domain records
//!
//! Plain data shared by the app core, the service adapters and the widget:
//! - Campuses and their display names
//! - Users and account classification
//! - Menus, menu inputs and editable menu items
//! - Authentication state
//!
//! Persisted records keep the backend's snake_case field names on the wire
//! (`campus_id`, `items_a`, `items_b`, `updated_at`, `updated_by`).

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod auth;
pub mod campus;
pub mod menu;
pub mod user;

pub use auth::AuthState;
pub use campus::Campus;
pub use menu::{MealType, Menu, MenuId, MenuInput, MenuItem, MenuItemId};
pub use user::{User, UserId, UserType};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
