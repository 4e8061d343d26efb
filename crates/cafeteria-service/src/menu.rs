//! Menu row adapter surface

use crate::ServiceResult;
use async_trait::async_trait;
use cafeteria_model::{Campus, Menu, MenuInput};
use chrono::NaiveDate;

/// Menu operations against the backend's menu table
#[async_trait]
pub trait MenuService: Send + Sync {
    /// Menu for a day and campus; `None` when nothing was published
    async fn fetch_menu(&self, date: NaiveDate, campus: Campus) -> ServiceResult<Option<Menu>>;

    /// Create a menu row
    async fn save_menu(&self, input: MenuInput) -> ServiceResult<Menu>;

    /// Overwrite an existing row with new contents
    async fn update_menu(&self, existing: &Menu, input: MenuInput) -> ServiceResult<Menu>;
}
