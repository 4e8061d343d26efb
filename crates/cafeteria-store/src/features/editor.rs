//! Menu editor feature
//!
//! Holds a working copy of the lines for each meal type. `Submit` packages
//! the copy into a [`MenuInput`] and saves it, updating the existing row
//! when the editor was opened on one.

use crate::effect::Effect;
use crate::reducer::Reducer;
use cafeteria_model::{Campus, MealType, Menu, MenuInput, MenuItem, MenuItemId, User};
use cafeteria_service::MenuService;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub(crate) const GUEST_EDIT_MESSAGE: &str = "게스트는 메뉴를 편집할 수 없습니다.";
const NO_TARGET_MESSAGE: &str = "편집할 메뉴가 없습니다.";

/// Day and campus being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditTarget {
    pub date: NaiveDate,
    pub campus: Campus,
}

/// Editor feature state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorFeatureState {
    pub target: Option<EditTarget>,
    /// Row being edited; `None` creates a new one
    pub existing: Option<Menu>,
    pub author: Option<User>,
    pub items: BTreeMap<MealType, Vec<MenuItem>>,
    pub is_saving: bool,
    pub is_presented: bool,
    pub error_message: Option<String>,
}

impl EditorFeatureState {
    /// Working lines for a meal type
    #[must_use]
    pub fn items(&self, meal_type: MealType) -> &[MenuItem] {
        self.items
            .get(&meal_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Package the working copy; blank lines are dropped
    #[must_use]
    pub fn input(&self) -> Option<MenuInput> {
        let target = self.target?;
        let lines = |meal_type: MealType| -> Vec<String> {
            self.items(meal_type)
                .iter()
                .map(|item| item.text.trim())
                .filter(|text| !text.is_empty())
                .map(str::to_string)
                .collect()
        };
        Some(
            MenuInput::new(target.date, target.campus)
                .with_items(MealType::A, lines(MealType::A))
                .with_items(MealType::B, lines(MealType::B)),
        )
    }

    fn item_mut(&mut self, meal_type: MealType, id: MenuItemId) -> Option<&mut MenuItem> {
        self.items
            .get_mut(&meal_type)
            .and_then(|items| items.iter_mut().find(|item| item.id == id))
    }
}

/// Editor feature actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Open the editor on a day and campus
    Begin {
        date: NaiveDate,
        campus: Campus,
        existing: Option<Menu>,
        author: Option<User>,
    },
    AddItem { meal_type: MealType, text: String },
    RemoveItem { meal_type: MealType, id: MenuItemId },
    EditItem { meal_type: MealType, id: MenuItemId, text: String },
    Submit,
    SubmitSucceeded(Menu),
    SubmitFailed(String),
    Dismiss,
    SetError(Option<String>),
    ClearError,
}

/// Editor reducer
#[derive(Clone)]
pub struct EditorReducer {
    menus: Arc<dyn MenuService>,
}

impl EditorReducer {
    #[must_use]
    pub fn new(menus: Arc<dyn MenuService>) -> Self {
        Self { menus }
    }

    fn submit(&self, existing: Option<Menu>, input: MenuInput) -> Effect<EditorAction> {
        let menus = self.menus.clone();
        Effect::task(async move {
            let result = match existing {
                Some(menu) => menus.update_menu(&menu, input).await,
                None => menus.save_menu(input).await,
            };
            match result {
                Ok(menu) => EditorAction::SubmitSucceeded(menu),
                Err(e) => {
                    warn!(error = %e, "menu submit failed");
                    EditorAction::SubmitFailed(e.user_message())
                }
            }
        })
    }
}

impl fmt::Debug for EditorReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorReducer").finish_non_exhaustive()
    }
}

impl Reducer for EditorReducer {
    type State = EditorFeatureState;
    type Action = EditorAction;

    fn reduce(&self, state: &mut EditorFeatureState, action: EditorAction) -> Effect<EditorAction> {
        debug!(?action, "editor");

        match action {
            EditorAction::Begin {
                date,
                campus,
                existing,
                author,
            } => {
                let items: BTreeMap<_, _> = MealType::ALL
                    .into_iter()
                    .map(|meal_type| {
                        let lines = existing
                            .as_ref()
                            .map(|menu| {
                                menu.items(meal_type)
                                    .iter()
                                    .map(|text| MenuItem::new(text.clone(), meal_type))
                                    .collect::<Vec<_>>()
                            })
                            .unwrap_or_default();
                        (meal_type, lines)
                    })
                    .collect();

                *state = EditorFeatureState {
                    target: Some(EditTarget { date, campus }),
                    existing,
                    author,
                    items,
                    is_saving: false,
                    is_presented: true,
                    error_message: None,
                };
                Effect::none()
            }

            EditorAction::AddItem { meal_type, text } => {
                state
                    .items
                    .entry(meal_type)
                    .or_default()
                    .push(MenuItem::new(text, meal_type));
                Effect::none()
            }

            EditorAction::RemoveItem { meal_type, id } => {
                if let Some(items) = state.items.get_mut(&meal_type) {
                    items.retain(|item| item.id != id);
                }
                Effect::none()
            }

            EditorAction::EditItem {
                meal_type,
                id,
                text,
            } => {
                match state.item_mut(meal_type, id) {
                    Some(item) => item.text = text,
                    None => warn!(?meal_type, "edit of unknown item"),
                }
                Effect::none()
            }

            EditorAction::Submit => {
                if state.is_saving {
                    return Effect::none();
                }
                if !state.author.as_ref().is_some_and(User::can_edit_menus) {
                    warn!("menu edit rejected for guest or anonymous author");
                    state.error_message = Some(GUEST_EDIT_MESSAGE.to_string());
                    return Effect::none();
                }
                let Some(input) = state.input() else {
                    state.error_message = Some(NO_TARGET_MESSAGE.to_string());
                    return Effect::none();
                };
                state.is_saving = true;
                state.error_message = None;
                self.submit(state.existing.clone(), input)
            }

            EditorAction::SubmitSucceeded(menu) => {
                info!(menu_id = %menu.id, "menu saved");
                if !state.is_saving {
                    debug!("editor dismissed before save completed");
                    return Effect::none();
                }
                state.is_saving = false;
                state.is_presented = false;
                state.error_message = None;
                state.existing = Some(menu);
                Effect::none()
            }

            EditorAction::SubmitFailed(message) => {
                if !state.is_saving {
                    debug!("editor dismissed before save failed");
                    return Effect::none();
                }
                state.is_saving = false;
                state.error_message = Some(message);
                Effect::none()
            }

            EditorAction::Dismiss => {
                *state = EditorFeatureState::default();
                Effect::none()
            }

            EditorAction::SetError(message) => {
                state.error_message = message;
                Effect::none()
            }

            EditorAction::ClearError => {
                state.error_message = None;
                Effect::none()
            }
        }
    }
}
