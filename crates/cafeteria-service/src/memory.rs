//! In-process backend
//!
//! Stands in for the hosted backend: rows live as JSON documents in the
//! wire shape (`campus_id`, `items_a`, ...) so every read and write goes
//! through the same field-name contract the real tables use. Writes need a
//! session; seeding helpers bypass that for fixtures.

use crate::auth::AuthService;
use crate::error::ServiceError;
use crate::menu::MenuService;
use crate::ServiceResult;
use async_trait::async_trait;
use cafeteria_model::{Campus, Menu, MenuId, MenuInput, User, UserId};
use chrono::{NaiveDate, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info};

/// Platform account returned by the simulated sign-in sheet
#[derive(Debug, Clone)]
struct PlatformAccount {
    email: String,
    campus: Campus,
}

#[derive(Debug, Default)]
struct Tables {
    menus: Vec<Value>,
    users: Vec<Value>,
    session: Option<UserId>,
    platform_account: Option<PlatformAccount>,
}

impl Tables {
    fn user_index(&self, id: UserId) -> Option<usize> {
        let id = id.to_string();
        self.users
            .iter()
            .position(|row| row.get("id").and_then(Value::as_str) == Some(id.as_str()))
    }

    fn user_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        self.users
            .iter()
            .find(|row| row.get("email").and_then(Value::as_str) == Some(email))
            .map(|row| serde_json::from_value(row.clone()).map_err(ServiceError::from))
            .transpose()
    }

    fn session_user(&self) -> ServiceResult<User> {
        let id = self.session.ok_or(ServiceError::Unauthorized)?;
        let idx = self.user_index(id).ok_or(ServiceError::Unauthorized)?;
        Ok(serde_json::from_value(self.users[idx].clone())?)
    }

    fn menu_index_for(&self, date: NaiveDate, campus: Campus) -> Option<usize> {
        let date = date.to_string();
        self.menus.iter().position(|row| {
            row.get("date").and_then(Value::as_str) == Some(date.as_str())
                && row.get("campus_id").and_then(Value::as_str) == Some(campus.id())
        })
    }

    fn menu_index_by_id(&self, id: MenuId) -> Option<usize> {
        let id = id.to_string();
        self.menus
            .iter()
            .position(|row| row.get("id").and_then(Value::as_str) == Some(id.as_str()))
    }

    fn insert_menu(&mut self, input: MenuInput, updated_by: Option<UserId>) -> ServiceResult<Menu> {
        if self.menu_index_for(input.date, input.campus).is_some() {
            return Err(ServiceError::Backend(format!(
                "menu already exists for {} at {}",
                input.date, input.campus
            )));
        }

        let menu = Menu {
            id: MenuId::new(),
            date: input.date,
            campus: input.campus,
            items_a: input.items_a,
            items_b: input.items_b,
            updated_at: Utc::now(),
            updated_by,
            revision: Some(1),
        };
        self.menus.push(serde_json::to_value(&menu)?);
        Ok(menu)
    }
}

/// Backend kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: Mutex<Tables>,
}

impl MemoryBackend {
    /// Create an empty backend with no platform account
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Account the platform sign-in sheet hands back; without one, sign-in
    /// behaves as if the user dismissed the sheet
    #[must_use]
    pub fn with_platform_account(self, email: impl Into<String>, campus: Campus) -> Self {
        self.tables.lock().platform_account = Some(PlatformAccount {
            email: email.into(),
            campus,
        });
        self
    }

    /// Register a user and make it the persisted session
    pub fn with_session(self, user: &User) -> ServiceResult<Self> {
        {
            let mut tables = self.tables.lock();
            tables.users.push(serde_json::to_value(user)?);
            tables.session = Some(user.id);
        }
        Ok(self)
    }

    /// Insert a menu row without a session
    pub fn seed_menu(&self, input: MenuInput) -> ServiceResult<Menu> {
        self.tables.lock().insert_menu(input, None)
    }

    /// Raw menu rows as stored
    #[must_use]
    pub fn menu_rows(&self) -> Vec<Value> {
        self.tables.lock().menus.clone()
    }

    /// Raw user row for an id
    #[must_use]
    pub fn user_row(&self, id: UserId) -> Option<Value> {
        let tables = self.tables.lock();
        tables.user_index(id).map(|idx| tables.users[idx].clone())
    }

    /// Current session's user id
    #[must_use]
    pub fn session(&self) -> Option<UserId> {
        self.tables.lock().session
    }
}

#[async_trait]
impl AuthService for MemoryBackend {
    async fn sign_in_with_apple(&self) -> ServiceResult<User> {
        let mut tables = self.tables.lock();
        let account = tables
            .platform_account
            .clone()
            .ok_or(ServiceError::Cancelled)?;

        let user = match tables.user_by_email(&account.email)? {
            Some(user) => user,
            None => {
                let user = User::authenticated(account.email, account.campus, Utc::now());
                tables.users.push(serde_json::to_value(&user)?);
                info!(user_id = %user.id, "created account");
                user
            }
        };

        tables.session = Some(user.id);
        info!(user_id = %user.id, "signed in");
        Ok(user)
    }

    async fn sign_out(&self) -> ServiceResult<()> {
        let previous = self.tables.lock().session.take();
        info!(had_session = previous.is_some(), "signed out");
        Ok(())
    }

    async fn delete_account(&self) -> ServiceResult<()> {
        let mut tables = self.tables.lock();
        let id = tables.session.ok_or(ServiceError::Unauthorized)?;
        let idx = tables.user_index(id).ok_or(ServiceError::Unauthorized)?;
        tables.users.remove(idx);
        tables.session = None;
        info!(user_id = %id, "deleted account");
        Ok(())
    }

    async fn restore_session(&self) -> ServiceResult<Option<User>> {
        let tables = self.tables.lock();
        if tables.session.is_none() {
            debug!("no persisted session");
            return Ok(None);
        }
        tables.session_user().map(Some)
    }

    async fn update_user_campus(&self, campus: Campus) -> ServiceResult<()> {
        let mut tables = self.tables.lock();
        let user = tables.session_user()?;
        let idx = tables.user_index(user.id).ok_or(ServiceError::Unauthorized)?;
        let row = &mut tables.users[idx];
        row["campus_id"] = Value::String(campus.id().to_string());
        row["updated_at"] = serde_json::to_value(Utc::now())?;
        info!(user_id = %user.id, %campus, "updated campus");
        Ok(())
    }
}

#[async_trait]
impl MenuService for MemoryBackend {
    async fn fetch_menu(&self, date: NaiveDate, campus: Campus) -> ServiceResult<Option<Menu>> {
        let tables = self.tables.lock();
        let menu = tables
            .menu_index_for(date, campus)
            .map(|idx| serde_json::from_value(tables.menus[idx].clone()))
            .transpose()?;
        debug!(%date, %campus, found = menu.is_some(), "fetched menu");
        Ok(menu)
    }

    async fn save_menu(&self, input: MenuInput) -> ServiceResult<Menu> {
        let mut tables = self.tables.lock();
        let user = tables.session_user()?;
        let menu = tables.insert_menu(input, Some(user.id))?;
        info!(menu_id = %menu.id, date = %menu.date, campus = %menu.campus, "saved menu");
        Ok(menu)
    }

    async fn update_menu(&self, existing: &Menu, input: MenuInput) -> ServiceResult<Menu> {
        let mut tables = self.tables.lock();
        let user = tables.session_user()?;
        let idx = tables
            .menu_index_by_id(existing.id)
            .ok_or_else(|| ServiceError::NotFound(format!("menu {}", existing.id)))?;

        let current: Menu = serde_json::from_value(tables.menus[idx].clone())?;
        let updated = Menu {
            id: current.id,
            date: input.date,
            campus: input.campus,
            items_a: input.items_a,
            items_b: input.items_b,
            updated_at: Utc::now(),
            updated_by: Some(user.id),
            revision: Some(current.revision.unwrap_or(0) + 1),
        };
        tables.menus[idx] = serde_json::to_value(&updated)?;
        info!(menu_id = %updated.id, revision = ?updated.revision, "updated menu");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafeteria_model::MealType;
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    #[tokio::test]
    async fn sign_in_without_platform_account_is_cancelled() {
        let backend = MemoryBackend::new();
        let err = backend.sign_in_with_apple().await.unwrap_err();
        assert_eq!(err, ServiceError::Cancelled);
    }

    #[tokio::test]
    async fn sign_in_reuses_existing_account() {
        let backend = MemoryBackend::new().with_platform_account("me@ssafy.com", Campus::Daejeon);
        let first = backend.sign_in_with_apple().await.unwrap();
        backend.sign_out().await.unwrap();
        let second = backend.sign_in_with_apple().await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(backend.session(), Some(second.id));
    }

    #[tokio::test]
    async fn restore_session_returns_persisted_user() {
        let user = User::authenticated("me@ssafy.com", Campus::Daejeon, Utc::now());
        let backend = MemoryBackend::new().with_session(&user).unwrap();
        let restored = backend.restore_session().await.unwrap().unwrap();
        assert_eq!(restored, user);

        backend.sign_out().await.unwrap();
        assert!(backend.restore_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn writes_require_session() {
        let backend = MemoryBackend::new();
        let err = backend
            .save_menu(MenuInput::new(day(), Campus::Daejeon))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Unauthorized);
        assert_eq!(
            backend.update_user_campus(Campus::Daejeon).await.unwrap_err(),
            ServiceError::Unauthorized
        );
    }

    #[tokio::test]
    async fn saved_menu_round_trips_items() {
        let user = User::authenticated("me@ssafy.com", Campus::Daejeon, Utc::now());
        let backend = MemoryBackend::new().with_session(&user).unwrap();
        let input = MenuInput::new(day(), Campus::Daejeon)
            .with_items(MealType::A, ["김치찌개", "쌀밥"])
            .with_items(MealType::B, ["돈까스"]);

        let saved = backend.save_menu(input.clone()).await.unwrap();
        assert_eq!(saved.items_a, input.items_a);
        assert_eq!(saved.items_b, input.items_b);
        assert_eq!(saved.updated_by, Some(user.id));

        let fetched = backend.fetch_menu(day(), Campus::Daejeon).await.unwrap();
        assert_eq!(fetched, Some(saved));
        assert!(backend.fetch_menu(day(), Campus::Seoul).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rows_use_wire_field_names() {
        let backend = MemoryBackend::new();
        backend
            .seed_menu(MenuInput::new(day(), Campus::Daejeon).with_items(MealType::A, ["국"]))
            .unwrap();
        let rows = backend.menu_rows();
        assert_eq!(rows[0]["campus_id"], "daejeon");
        assert_eq!(rows[0]["items_a"][0], "국");
        assert!(rows[0].get("items_b").is_some());
    }

    #[tokio::test]
    async fn duplicate_save_is_rejected() {
        let user = User::authenticated("me@ssafy.com", Campus::Daejeon, Utc::now());
        let backend = MemoryBackend::new().with_session(&user).unwrap();
        backend.seed_menu(MenuInput::new(day(), Campus::Daejeon)).unwrap();
        let err = backend
            .save_menu(MenuInput::new(day(), Campus::Daejeon))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Backend(_)));
    }

    #[tokio::test]
    async fn update_bumps_revision() {
        let user = User::authenticated("me@ssafy.com", Campus::Daejeon, Utc::now());
        let backend = MemoryBackend::new().with_session(&user).unwrap();
        let seeded = backend.seed_menu(MenuInput::new(day(), Campus::Daejeon)).unwrap();

        let input = seeded.to_input().with_items(MealType::B, ["카레"]);
        let updated = backend.update_menu(&seeded, input).await.unwrap();
        assert_eq!(updated.id, seeded.id);
        assert_eq!(updated.revision, Some(2));
        assert_eq!(updated.items_b, vec!["카레".to_string()]);
        assert_eq!(backend.menu_rows().len(), 1);
    }

    #[tokio::test]
    async fn update_missing_menu_is_not_found() {
        let user = User::authenticated("me@ssafy.com", Campus::Daejeon, Utc::now());
        let backend = MemoryBackend::new().with_session(&user).unwrap();
        let other = MemoryBackend::new();
        let foreign = other.seed_menu(MenuInput::new(day(), Campus::Daejeon)).unwrap();

        let err = backend
            .update_menu(&foreign, foreign.to_input())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn campus_update_and_account_deletion() {
        let user = User::authenticated("me@ssafy.com", Campus::Daejeon, Utc::now());
        let backend = MemoryBackend::new().with_session(&user).unwrap();

        backend.update_user_campus(Campus::Seoul).await.unwrap();
        assert_eq!(backend.user_row(user.id).unwrap()["campus_id"], "seoul");

        backend.delete_account().await.unwrap();
        assert!(backend.user_row(user.id).is_none());
        assert!(backend.session().is_none());
        assert_eq!(
            backend.delete_account().await.unwrap_err(),
            ServiceError::Unauthorized
        );
    }
}
