//! Store runtime: snapshots, spawned handles, shutdown.

use cafeteria_model::{AuthState, Campus};
use cafeteria_service::MemoryBackend;
use cafeteria_store::features::{AuthAction, MenuAction};
use cafeteria_store::{AppAction, Tab};
use cafeteria_test_utils::{app_store, authenticated_user, backend_with_session, menu_input, today};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[tokio::test]
async fn send_publishes_snapshot() {
    let mut store = app_store(Arc::new(MemoryBackend::new()));
    let mut snapshots = store.subscribe();

    store.send(AppAction::SelectTab(Tab::Settings));

    assert!(snapshots.has_changed().unwrap());
    assert_eq!(snapshots.borrow_and_update().selected_tab, Tab::Settings);
}

#[tokio::test]
async fn step_resolves_one_effect_at_a_time() {
    let mut store = app_store(Arc::new(MemoryBackend::new()));
    store.send(AppAction::Initialize);
    assert_eq!(store.in_flight(), 1);

    assert!(store.step().await);
    assert_eq!(store.state().auth.auth_state, AuthState::Unauthenticated);
    assert!(!store.step().await);
}

#[tokio::test]
async fn spawned_store_restores_session() {
    let user = authenticated_user(Campus::Daejeon);
    let handle = app_store(backend_with_session(&user)).spawn();

    handle.send(AppAction::Initialize).await.unwrap();
    let state = handle
        .wait_for(|s| s.auth.auth_state != AuthState::Loading)
        .await
        .unwrap();

    assert_eq!(state.auth.auth_state, AuthState::Authenticated(user));
    assert_eq!(handle.state(), state);
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn spawned_store_drives_menu_fetch() {
    let backend = Arc::new(MemoryBackend::new());
    backend
        .seed_menu(menu_input(today(), &["비빔밥"], &["우동"]))
        .unwrap();
    let handle = app_store(backend).spawn();
    let mut snapshots = handle.subscribe();

    handle.send(AppAction::Menu(MenuAction::Appear)).await.unwrap();
    let state = handle
        .wait_for(|s| s.menu.current_menu.is_some())
        .await
        .unwrap();

    assert!(!state.menu.is_loading);
    assert_eq!(
        state.menu.current_menu.map(|m| m.items_b),
        Some(vec!["우동".to_string()])
    );
    assert!(snapshots.has_changed().unwrap());
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_closes_subscribers() {
    let handle = app_store(Arc::new(MemoryBackend::new())).spawn();
    let mut snapshots = handle.subscribe();
    handle
        .send(AppAction::Auth(AuthAction::SignInAsGuest))
        .await
        .unwrap();
    handle.wait_for(|s| s.auth.is_guest_mode).await.unwrap();

    handle.shutdown().await.unwrap();

    snapshots.borrow_and_update();
    assert!(snapshots.changed().await.is_err());
}
