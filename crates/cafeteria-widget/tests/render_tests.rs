//! Widget rendering against saved menus.

use cafeteria_model::{Campus, MealType, Menu};
use cafeteria_service::MemoryBackend;
use cafeteria_test_utils::{menu_input, today};
use cafeteria_widget::{header, render, TimelineEntry, WidgetView};
use pretty_assertions::assert_eq;

const PLACEHOLDER: &str = "등록된 메뉴가 없습니다";

fn saved(items_a: &[&str], items_b: &[&str]) -> Menu {
    MemoryBackend::new()
        .seed_menu(menu_input(today(), items_a, items_b))
        .unwrap()
}

#[test]
fn renders_non_empty_lines_in_order() {
    let entry = TimelineEntry::new(today(), Some(saved(&["쌀밥", "  ", " 된장국 ", ""], &[])));

    assert_eq!(
        render(&entry, MealType::A, PLACEHOLDER),
        WidgetView::Lines(vec!["쌀밥".to_string(), "된장국".to_string()])
    );
}

#[test]
fn whitespace_only_meal_renders_placeholder() {
    let entry = TimelineEntry::new(today(), Some(saved(&["김치찌개"], &["", "   ", "\t"])));

    assert_eq!(
        render(&entry, MealType::B, PLACEHOLDER),
        WidgetView::Placeholder(PLACEHOLDER.to_string())
    );
    assert!(!render(&entry, MealType::A, PLACEHOLDER).is_placeholder());
}

#[test]
fn entry_without_menu_renders_placeholder() {
    let entry = TimelineEntry::placeholder(today());
    for meal in MealType::ALL {
        assert_eq!(render(&entry, meal, "없음").rows(), vec!["없음"]);
    }
}

#[test]
fn header_names_campus_day_and_meal() {
    let entry = TimelineEntry::new(today(), Some(saved(&["김치찌개"], &[])));
    assert_eq!(
        header(&entry, Campus::Seoul, MealType::A),
        "대전 · 10월 15일 (목) A타입"
    );

    let empty = TimelineEntry::placeholder(today());
    assert_eq!(
        header(&empty, Campus::Daejeon, MealType::B),
        "대전 · 10월 15일 (목) B타입"
    );
}

#[test]
fn entry_keeps_backend_field_names() {
    let entry = TimelineEntry::new(today(), Some(saved(&["김치찌개"], &[])));
    let json = serde_json::to_value(&entry).unwrap();

    assert_eq!(json["date"], "2026-10-15");
    assert_eq!(json["menu"]["campus_id"], "daejeon");
    assert_eq!(json["menu"]["items_a"][0], "김치찌개");
}
