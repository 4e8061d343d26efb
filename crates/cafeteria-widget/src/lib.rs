//! Cafeteria Widget - home-screen menu snapshot
//!
//! The widget runs outside the app and never mutates anything. The host
//! hands it a [`TimelineEntry`] (a day plus the menu saved for it, if any)
//! and it renders the lines of one meal type, or a placeholder when there
//! is nothing to show.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod entry;
pub mod render;

pub use entry::TimelineEntry;
pub use render::{header, render, WidgetView};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
