//! Snapshot rendering
//!
//! Two outcomes only: the visible lines of a meal, or the placeholder.

use crate::entry::TimelineEntry;
use cafeteria_model::{Campus, MealType};
use chrono::{Datelike, Weekday};

/// What the widget shows for one meal type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetView {
    /// Trimmed, non-empty menu lines in their saved order
    Lines(Vec<String>),
    /// No menu, or every line was blank
    Placeholder(String),
}

impl WidgetView {
    #[inline]
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// Text rows as displayed
    #[must_use]
    pub fn rows(&self) -> Vec<&str> {
        match self {
            Self::Lines(lines) => lines.iter().map(String::as_str).collect(),
            Self::Placeholder(text) => vec![text.as_str()],
        }
    }
}

/// Render one meal type of a timeline entry
#[must_use]
pub fn render(entry: &TimelineEntry, meal_type: MealType, placeholder: &str) -> WidgetView {
    let lines: Vec<String> = entry
        .menu
        .as_ref()
        .map(|menu| {
            menu.items(meal_type)
                .iter()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if lines.is_empty() {
        WidgetView::Placeholder(placeholder.to_string())
    } else {
        WidgetView::Lines(lines)
    }
}

/// Title row, e.g. `대전 · 10월 15일 (목) A타입`
#[must_use]
pub fn header(entry: &TimelineEntry, campus: Campus, meal_type: MealType) -> String {
    let campus = entry.campus_or(campus);
    format!(
        "{} · {}월 {}일 ({}) {}",
        campus.display_name(),
        entry.date.month(),
        entry.date.day(),
        weekday_label(entry.date.weekday()),
        meal_type.display_name()
    )
}

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "월",
        Weekday::Tue => "화",
        Weekday::Wed => "수",
        Weekday::Thu => "목",
        Weekday::Fri => "금",
        Weekday::Sat => "토",
        Weekday::Sun => "일",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn weekday_labels_cover_the_week() {
        let monday = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        let labels: Vec<_> = monday
            .iter_days()
            .take(7)
            .map(|d| weekday_label(d.weekday()))
            .collect();
        assert_eq!(labels, ["월", "화", "수", "목", "금", "토", "일"]);
    }

    #[test]
    fn placeholder_rows() {
        let view = WidgetView::Placeholder("없음".into());
        assert!(view.is_placeholder());
        assert_eq!(view.rows(), vec!["없음"]);
    }
}
