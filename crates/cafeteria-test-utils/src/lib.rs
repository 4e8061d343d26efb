//! Testing utilities for the cafeteria workspace
//!
//! Shared fixtures: a pinned "today", users, menu inputs, and stores wired
//! to an in-memory backend.

#![allow(missing_docs)]

use cafeteria_model::{Campus, MealType, MenuInput, User};
use cafeteria_service::{MemoryBackend, Services};
use cafeteria_store::{AppConfig, AppReducer, FixedClock, Store};
use chrono::{Days, NaiveDate, Utc};
use std::sync::Arc;

/// The day every fixture treats as today
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
}

pub fn days_ago(days: u64) -> NaiveDate {
    today().checked_sub_days(Days::new(days)).unwrap()
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::on(today()))
}

pub fn authenticated_user(campus: Campus) -> User {
    User::authenticated("tester@ssafy.com", campus, Utc::now())
}

pub fn guest_user() -> User {
    User::guest(Utc::now())
}

pub fn menu_input(date: NaiveDate, items_a: &[&str], items_b: &[&str]) -> MenuInput {
    MenuInput::new(date, Campus::Daejeon)
        .with_items(MealType::A, items_a.iter().copied())
        .with_items(MealType::B, items_b.iter().copied())
}

/// Backend whose persisted session belongs to `user`
pub fn backend_with_session(user: &User) -> Arc<MemoryBackend> {
    Arc::new(MemoryBackend::new().with_session(user).unwrap())
}

pub fn app_store_with(services: &Services, config: &AppConfig) -> Store<AppReducer> {
    let reducer = AppReducer::new(services, fixed_clock(), config);
    let initial = reducer.initial_state();
    Store::new(reducer, initial)
}

pub fn app_store(backend: Arc<MemoryBackend>) -> Store<AppReducer> {
    app_store_with(&Services::from_backend(backend), &AppConfig::default())
}
