//! Campus enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A physical location that serves a menu
///
/// Only [`Campus::Daejeon`] is open for interaction today; the others are
/// display-only placeholders.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Campus {
    /// Seoul campus
    Seoul,
    /// Daejeon campus
    #[default]
    Daejeon,
    /// Gwangju campus
    Gwangju,
    /// Gumi campus
    Gumi,
    /// Busan-Ulsan-Gyeongnam campus
    Busan,
}

impl Campus {
    /// Every campus, in display order
    pub const ALL: [Campus; 5] = [
        Campus::Seoul,
        Campus::Daejeon,
        Campus::Gwangju,
        Campus::Gumi,
        Campus::Busan,
    ];

    /// Wire identifier (`campus_id` column value)
    #[inline]
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Campus::Seoul => "seoul",
            Campus::Daejeon => "daejeon",
            Campus::Gwangju => "gwangju",
            Campus::Gumi => "gumi",
            Campus::Busan => "busan",
        }
    }

    /// Human-readable name
    #[inline]
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Campus::Seoul => "서울",
            Campus::Daejeon => "대전",
            Campus::Gwangju => "광주",
            Campus::Gumi => "구미",
            Campus::Busan => "부울경",
        }
    }

    /// Whether the campus can be selected
    #[inline]
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Campus::Daejeon)
    }
}

impl fmt::Display for Campus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when parsing an unknown campus id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCampus(pub String);

impl fmt::Display for UnknownCampus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown campus: {}", self.0)
    }
}

impl std::error::Error for UnknownCampus {}

impl FromStr for Campus {
    type Err = UnknownCampus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Campus::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCampus(s.to_string()))
    }
}
