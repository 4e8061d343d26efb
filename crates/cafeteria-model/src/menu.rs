//! Menu records
//!
//! A [`Menu`] is the server-side row for one campus and one day. A
//! [`MenuInput`] is the subset a client submits; the backend assigns the id,
//! timestamps and revision. [`MenuItem`]s are the editable lines used while
//! a menu is being edited.

use crate::campus::Campus;
use crate::user::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Menu row identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(pub Uuid);

impl MenuId {
    /// Generate new menu ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MenuId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MenuId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Meal line classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MealType {
    /// Type A line
    A,
    /// Type B line
    B,
}

impl MealType {
    /// Both meal types, in display order
    pub const ALL: [MealType; 2] = [MealType::A, MealType::B];

    #[inline]
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            MealType::A => "A타입",
            MealType::B => "B타입",
        }
    }
}

/// Server-side menu for one campus and one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub id: MenuId,
    pub date: NaiveDate,
    #[serde(rename = "campus_id")]
    pub campus: Campus,
    pub items_a: Vec<String>,
    pub items_b: Vec<String>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<UserId>,
    /// Monotonic revision assigned by the backend; informational only,
    /// nothing compares it before writing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
}

impl Menu {
    /// Lines for a meal type
    #[inline]
    #[must_use]
    pub fn items(&self, meal_type: MealType) -> &[String] {
        match meal_type {
            MealType::A => &self.items_a,
            MealType::B => &self.items_b,
        }
    }

    /// The client-editable subset of this menu
    #[must_use]
    pub fn to_input(&self) -> MenuInput {
        MenuInput {
            date: self.date,
            campus: self.campus,
            items_a: self.items_a.clone(),
            items_b: self.items_b.clone(),
        }
    }

    /// Whether both meal types lack any visible line
    #[must_use]
    pub fn is_blank(&self) -> bool {
        MealType::ALL
            .iter()
            .all(|m| self.items(*m).iter().all(|line| line.trim().is_empty()))
    }
}

/// Client-submitted menu contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuInput {
    pub date: NaiveDate,
    #[serde(rename = "campus_id")]
    pub campus: Campus,
    pub items_a: Vec<String>,
    pub items_b: Vec<String>,
}

impl MenuInput {
    /// Create an empty input for a day and campus
    #[inline]
    #[must_use]
    pub fn new(date: NaiveDate, campus: Campus) -> Self {
        Self {
            date,
            campus,
            items_a: Vec::new(),
            items_b: Vec::new(),
        }
    }

    /// With lines for a meal type
    #[must_use]
    pub fn with_items<I, S>(mut self, meal_type: MealType, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = items.into_iter().map(Into::into).collect();
        match meal_type {
            MealType::A => self.items_a = items,
            MealType::B => self.items_b = items,
        }
        self
    }

    #[inline]
    #[must_use]
    pub fn items(&self, meal_type: MealType) -> &[String] {
        match meal_type {
            MealType::A => &self.items_a,
            MealType::B => &self.items_b,
        }
    }
}

/// Editable menu item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub Uuid);

impl MenuItemId {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MenuItemId {
    fn default() -> Self {
        Self::new()
    }
}

/// One editable line of menu text
///
/// Identity is the generated id, not the text: two items reading the same
/// text are still distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub text: String,
    pub meal_type: MealType,
}

impl MenuItem {
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>, meal_type: MealType) -> Self {
        Self {
            id: MenuItemId::new(),
            text: text.into(),
            meal_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn menu() -> Menu {
        Menu {
            id: MenuId::new(),
            date: day(),
            campus: Campus::Daejeon,
            items_a: vec!["김치찌개".into(), "쌀밥".into()],
            items_b: vec!["돈까스".into()],
            updated_at: Utc::now(),
            updated_by: None,
            revision: Some(3),
        }
    }

    #[test]
    fn menu_wire_field_names() {
        let value = serde_json::to_value(menu()).unwrap();
        assert_eq!(value["campus_id"], "daejeon");
        assert_eq!(value["items_a"][0], "김치찌개");
        assert_eq!(value["items_b"][0], "돈까스");
        assert_eq!(value["date"], "2026-03-02");
        assert!(value.get("updated_at").is_some());
        assert!(value.get("updated_by").is_some());
        assert!(value.get("itemsA").is_none());
    }

    #[test]
    fn menu_without_revision_deserializes() {
        let mut value = serde_json::to_value(menu()).unwrap();
        value.as_object_mut().unwrap().remove("revision");
        let parsed: Menu = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.revision, None);
    }

    #[test]
    fn to_input_keeps_editable_fields() {
        let m = menu();
        let input = m.to_input();
        assert_eq!(input.date, m.date);
        assert_eq!(input.campus, m.campus);
        assert_eq!(input.items_a, m.items_a);
        assert_eq!(input.items_b, m.items_b);
    }

    #[test]
    fn blank_menu_detection() {
        let mut m = menu();
        assert!(!m.is_blank());
        m.items_a = vec!["  ".into(), String::new()];
        m.items_b = vec!["\t".into()];
        assert!(m.is_blank());
    }

    #[test]
    fn items_with_same_text_stay_distinct() {
        let first = MenuItem::new("김치", MealType::A);
        let second = MenuItem::new("김치", MealType::A);
        assert_ne!(first, second);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn input_builder_sets_meal_lines() {
        let input = MenuInput::new(day(), Campus::Daejeon)
            .with_items(MealType::A, ["a1", "a2"])
            .with_items(MealType::B, ["b1"]);
        assert_eq!(input.items(MealType::A), ["a1", "a2"]);
        assert_eq!(input.items(MealType::B), ["b1"]);
    }
}
