//! Timeline entries

use cafeteria_model::{Campus, Menu};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One point on the widget timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Day this entry is shown for
    pub date: NaiveDate,
    /// Snapshot of the menu for that day, if one was saved
    pub menu: Option<Menu>,
}

impl TimelineEntry {
    /// Entry carrying a menu snapshot
    #[inline]
    #[must_use]
    pub fn new(date: NaiveDate, menu: Option<Menu>) -> Self {
        Self { date, menu }
    }

    /// Entry with no data, shown before any snapshot is available
    #[inline]
    #[must_use]
    pub fn placeholder(date: NaiveDate) -> Self {
        Self { date, menu: None }
    }

    /// Whether a menu snapshot is attached
    #[inline]
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.menu.is_some()
    }

    /// Campus of the attached menu, or `fallback`
    #[must_use]
    pub fn campus_or(&self, fallback: Campus) -> Campus {
        self.menu.as_ref().map_or(fallback, |menu| menu.campus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_has_no_data() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let entry = TimelineEntry::placeholder(date);
        assert!(!entry.has_data());
        assert_eq!(entry.campus_or(Campus::Daejeon), Campus::Daejeon);
    }
}
