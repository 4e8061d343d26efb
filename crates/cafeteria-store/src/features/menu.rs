//! Menu browsing feature
//!
//! Shows the menu for a (date, campus) key and refetches whenever the key
//! changes. Each fetch takes a fresh request token; a response is applied
//! only if its token is still the latest, so a slow earlier fetch can never
//! overwrite a later one.
//!
//! Date navigation is bounded: never past today, and never more than
//! `history_days` before it.

use crate::clock::Clock;
use crate::effect::Effect;
use crate::reducer::Reducer;
use cafeteria_model::{Campus, Menu};
use cafeteria_service::MenuService;
use chrono::{Days, NaiveDate};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Menu feature state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuFeatureState {
    pub selected_campus: Campus,
    pub current_date: NaiveDate,
    pub current_menu: Option<Menu>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    /// Token of the most recently issued fetch
    pub latest_request: u64,
}

impl MenuFeatureState {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_campus: Campus::default(),
            current_date: today,
            current_menu: None,
            is_loading: false,
            error_message: None,
            latest_request: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn can_go_to_next_day(&self, today: NaiveDate) -> bool {
        can_go_to_next_day(self.current_date, today)
    }

    #[inline]
    #[must_use]
    pub fn can_go_to_previous_day(&self, today: NaiveDate, history_days: u32) -> bool {
        can_go_to_previous_day(self.current_date, today, history_days)
    }
}

/// Forward navigation stops at today
#[inline]
#[must_use]
pub fn can_go_to_next_day(current: NaiveDate, today: NaiveDate) -> bool {
    current < today
}

/// Backward navigation stops `history_days` before today
#[must_use]
pub fn can_go_to_previous_day(current: NaiveDate, today: NaiveDate, history_days: u32) -> bool {
    current
        .checked_sub_days(Days::new(1))
        .is_some_and(|previous| is_within_window(previous, today, history_days))
}

/// Whether `date` lies in `[today - history_days, today]`
#[must_use]
pub fn is_within_window(date: NaiveDate, today: NaiveDate, history_days: u32) -> bool {
    let earliest = today
        .checked_sub_days(Days::new(u64::from(history_days)))
        .unwrap_or(NaiveDate::MIN);
    date <= today && date >= earliest
}

/// Menu feature actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Screen shown; fetches the current key
    Appear,
    Refresh,
    /// User picked a campus; unavailable campuses are ignored
    SelectCampus(Campus),
    /// Campus copied from the signed-in user; applied unconditionally
    SyncCampus(Campus),
    GoToNextDay,
    GoToPreviousDay,
    GoToToday,
    SelectDate(NaiveDate),
    MenuLoaded { request: u64, menu: Option<Menu> },
    MenuLoadFailed { request: u64, message: String },
    /// A menu written by the editor
    MenuSaved(Menu),
    SetError(Option<String>),
    ClearError,
}

/// Menu reducer
#[derive(Clone)]
pub struct MenuReducer {
    menus: Arc<dyn MenuService>,
    clock: Arc<dyn Clock>,
    history_days: u32,
}

impl MenuReducer {
    #[must_use]
    pub fn new(menus: Arc<dyn MenuService>, clock: Arc<dyn Clock>, history_days: u32) -> Self {
        Self {
            menus,
            clock,
            history_days,
        }
    }

    #[inline]
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    #[inline]
    #[must_use]
    pub fn history_days(&self) -> u32 {
        self.history_days
    }

    #[inline]
    #[must_use]
    pub fn can_go_to_next_day(&self, state: &MenuFeatureState) -> bool {
        state.can_go_to_next_day(self.today())
    }

    #[inline]
    #[must_use]
    pub fn can_go_to_previous_day(&self, state: &MenuFeatureState) -> bool {
        state.can_go_to_previous_day(self.today(), self.history_days)
    }

    /// Issue a fetch for the current key, superseding any in flight
    fn fetch(&self, state: &mut MenuFeatureState) -> Effect<MenuAction> {
        state.latest_request += 1;
        state.is_loading = true;

        let request = state.latest_request;
        let date = state.current_date;
        let campus = state.selected_campus;
        let menus = self.menus.clone();
        debug!(request, %date, %campus, "fetching menu");

        Effect::task(async move {
            match menus.fetch_menu(date, campus).await {
                Ok(menu) => MenuAction::MenuLoaded { request, menu },
                Err(e) => {
                    warn!(request, error = %e, "menu fetch failed");
                    MenuAction::MenuLoadFailed {
                        request,
                        message: e.user_message(),
                    }
                }
            }
        })
    }

    /// Move to a new key and fetch it
    fn navigate(&self, state: &mut MenuFeatureState, date: NaiveDate) -> Effect<MenuAction> {
        if date == state.current_date {
            return Effect::none();
        }
        state.current_date = date;
        state.current_menu = None;
        self.fetch(state)
    }

    fn set_campus(&self, state: &mut MenuFeatureState, campus: Campus) -> Effect<MenuAction> {
        if campus == state.selected_campus {
            return Effect::none();
        }
        state.selected_campus = campus;
        state.current_menu = None;
        self.fetch(state)
    }
}

impl fmt::Debug for MenuReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuReducer")
            .field("clock", &self.clock)
            .field("history_days", &self.history_days)
            .finish_non_exhaustive()
    }
}

impl Reducer for MenuReducer {
    type State = MenuFeatureState;
    type Action = MenuAction;

    fn reduce(&self, state: &mut MenuFeatureState, action: MenuAction) -> Effect<MenuAction> {
        debug!(?action, "menu");
        let today = self.today();

        match action {
            MenuAction::Appear | MenuAction::Refresh => self.fetch(state),

            MenuAction::SelectCampus(campus) => {
                if !campus.is_available() {
                    warn!(%campus, "campus not available");
                    return Effect::none();
                }
                self.set_campus(state, campus)
            }

            MenuAction::SyncCampus(campus) => self.set_campus(state, campus),

            MenuAction::GoToNextDay => {
                if !state.can_go_to_next_day(today) {
                    return Effect::none();
                }
                match state.current_date.checked_add_days(Days::new(1)) {
                    Some(next) => self.navigate(state, next),
                    None => Effect::none(),
                }
            }

            MenuAction::GoToPreviousDay => {
                if !state.can_go_to_previous_day(today, self.history_days) {
                    return Effect::none();
                }
                match state.current_date.checked_sub_days(Days::new(1)) {
                    Some(previous) => self.navigate(state, previous),
                    None => Effect::none(),
                }
            }

            MenuAction::GoToToday => self.navigate(state, today),

            MenuAction::SelectDate(date) => {
                if !is_within_window(date, today, self.history_days) {
                    warn!(%date, "date outside navigation window");
                    return Effect::none();
                }
                self.navigate(state, date)
            }

            MenuAction::MenuLoaded { request, menu } => {
                if request != state.latest_request {
                    debug!(request, latest = state.latest_request, "discarding stale menu");
                    return Effect::none();
                }
                state.current_menu = menu;
                state.is_loading = false;
                state.error_message = None;
                Effect::none()
            }

            MenuAction::MenuLoadFailed { request, message } => {
                if request != state.latest_request {
                    debug!(request, latest = state.latest_request, "discarding stale failure");
                    return Effect::none();
                }
                state.is_loading = false;
                state.error_message = Some(message);
                Effect::none()
            }

            MenuAction::MenuSaved(menu) => {
                if menu.date != state.current_date || menu.campus != state.selected_campus {
                    return Effect::none();
                }
                // a fetch started before the save would carry older contents
                state.latest_request += 1;
                state.current_menu = Some(menu);
                state.is_loading = false;
                state.error_message = None;
                Effect::none()
            }

            MenuAction::SetError(message) => {
                state.error_message = message;
                Effect::none()
            }

            MenuAction::ClearError => {
                state.error_message = None;
                Effect::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    #[test]
    fn next_day_blocked_at_today() {
        let today = date(15);
        assert!(!can_go_to_next_day(today, today));
        assert!(can_go_to_next_day(date(14), today));
        assert!(!can_go_to_next_day(date(16), today));
    }

    #[test]
    fn previous_day_bounded_by_window() {
        let today = date(15);
        assert!(can_go_to_previous_day(today, today, 7));
        assert!(can_go_to_previous_day(date(9), today, 7));
        assert!(!can_go_to_previous_day(date(8), today, 7));
        assert!(!can_go_to_previous_day(date(1), today, 7));
    }

    #[test]
    fn window_contains_bounds() {
        let today = date(15);
        assert!(is_within_window(today, today, 7));
        assert!(is_within_window(date(8), today, 7));
        assert!(!is_within_window(date(7), today, 7));
        assert!(!is_within_window(date(16), today, 7));
    }
}
