// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crossterm::event::KeyCode;
use rstest::{fixture, rstest};

use super::testing::HeadlessTui;
use super::{chat_view_title, footer_label_ucfirst, wrap_plain, Focus};
use crate::chat::{GenerateError, TextGenerator, UnavailableGenerator, APOLOGY_TEXT};
use crate::model::{
    Animal, AnimalCategory, AnimalId, Catalog, ConservationStatus, MapZone, Point, Shape, ZoneId,
};
use crate::panel::AssetResolver;
use crate::store::builtin_catalog;

const WIDTH: u16 = 160;
const HEIGHT: u16 = 48;

#[derive(Default)]
struct RecordingGenerator {
    calls: Mutex<Vec<(String, Option<String>)>>,
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate_reply(
        &self,
        user_text: &str,
        context: Option<&str>,
    ) -> Result<String, GenerateError> {
        self.calls
            .lock()
            .expect("calls")
            .push((user_text.to_owned(), context.map(str::to_owned)));
        Ok("Зубры пасутся в северо-восточном вольере.".to_owned())
    }
}

fn missing_assets() -> Box<AssetResolver> {
    Box::new(AssetResolver::new("/nonexistent/laura-assets"))
}

#[fixture]
fn generator() -> Arc<RecordingGenerator> {
    Arc::new(RecordingGenerator::default())
}

fn headless(generator: Arc<dyn TextGenerator>) -> HeadlessTui {
    let catalog = builtin_catalog().expect("builtin catalog");
    HeadlessTui::new(catalog, generator, missing_assets(), WIDTH, HEIGHT)
}

fn screen_position(tui: &mut HeadlessTui, zone_id: &str) -> (u16, u16) {
    tui.render();
    tui.zone_position(zone_id).expect("zone on screen")
}

#[rstest]
#[tokio::test]
async fn first_frame_shows_header_map_and_labels(generator: Arc<RecordingGenerator>) {
    let mut tui = headless(generator);
    let screen = tui.render();

    assert!(screen.contains("Вольерный комплекс «Лаура»"));
    assert!(screen.contains("Карта комплекса"));
    assert!(screen.contains("Нажмите на зеленые зоны, чтобы узнать о животных."));
    assert!(screen.contains("ВОЛК"));
    assert!(screen.contains("ЗУБР"));
    assert!(screen.contains("Help:?"));
    assert!(!tui.panel().is_open());
}

#[rstest]
#[tokio::test]
async fn hovering_a_zone_shows_its_tooltip(generator: Arc<RecordingGenerator>) {
    let mut tui = headless(generator);
    let (col, row) = screen_position(&mut tui, "z-wolf");

    tui.mouse_move(col, row);
    assert_eq!(
        tui.interaction().hovered_zone_id().map(|id| id.as_str()),
        Some("z-wolf")
    );
    let screen = tui.render();
    assert!(screen.contains("Умный хищник, живущий стаями."));
    assert!(screen.contains("фото: https://placehold.co/50x50"));

    // Hover never selects.
    assert!(tui.interaction().selection().is_none());

    tui.mouse_move(0, 0);
    assert!(tui.interaction().hovered_zone_id().is_none());
    assert!(!tui.render().contains("Умный хищник"));
}

#[rstest]
#[tokio::test]
async fn clicking_a_zone_opens_the_panel_and_esc_closes_it(generator: Arc<RecordingGenerator>) {
    let mut tui = headless(generator);
    let (col, row) = screen_position(&mut tui, "z-zubr");

    tui.mouse_click(col, row);
    assert_eq!(
        tui.interaction().active_zone_id().map(|id| id.as_str()),
        Some("z-zubr")
    );
    assert_eq!(tui.panel().animal().map(|a| a.name()), Some("Зубр"));
    let screen = tui.render();
    assert!(screen.contains("Вымирающий"));
    assert!(screen.contains("Фото [1/3]"));
    assert!(screen.contains("placehold.co/800x600"));

    assert!(tui.press(KeyCode::Right));
    assert_eq!(tui.panel().current_image_index(), 1);
    assert!(tui.press(KeyCode::Left));
    assert!(tui.press(KeyCode::Left));
    assert_eq!(tui.panel().current_image_index(), 2);

    assert!(tui.press(KeyCode::Esc));
    assert!(!tui.panel().is_open());
    assert!(tui.interaction().selection().is_none());
    assert!(tui.interaction().active_animal_id().is_none());
    assert!(!tui.press(KeyCode::Esc));
}

#[rstest]
#[tokio::test]
async fn clicking_empty_ground_changes_nothing(generator: Arc<RecordingGenerator>) {
    let mut tui = headless(generator);
    tui.render();
    // First map row is above every enclosure.
    tui.mouse_click(2, 2);
    assert!(tui.interaction().selection().is_none());
    assert!(!tui.panel().is_open());
}

#[rstest]
#[tokio::test]
async fn keyboard_cycles_hover_and_selects(generator: Arc<RecordingGenerator>) {
    let mut tui = headless(generator);
    tui.render();

    assert!(!tui.press(KeyCode::Enter));
    assert!(tui.press(KeyCode::Tab));
    assert_eq!(
        tui.interaction().hovered_zone_id().map(|id| id.as_str()),
        Some("z-wolf")
    );
    assert!(tui.press(KeyCode::Tab));
    assert_eq!(
        tui.interaction().hovered_zone_id().map(|id| id.as_str()),
        Some("z-sika")
    );
    assert!(tui.press(KeyCode::BackTab));
    assert!(tui.press(KeyCode::BackTab));
    assert_eq!(
        tui.interaction().hovered_zone_id().map(|id| id.as_str()),
        Some("z-swans")
    );

    assert!(tui.press(KeyCode::Enter));
    assert_eq!(
        tui.interaction().active_zone_id().map(|id| id.as_str()),
        Some("z-swans")
    );
    assert!(tui.panel().is_open());
}

#[rstest]
#[tokio::test]
async fn chat_round_trip_carries_the_selected_animal(generator: Arc<RecordingGenerator>) {
    let mut tui = headless(generator.clone());
    let (col, row) = screen_position(&mut tui, "z-zubr");
    tui.mouse_click(col, row);

    assert!(tui.press(KeyCode::Char('c')));
    let screen = tui.render();
    assert!(screen.contains("Гид Заповедника"));
    assert!(screen.contains("О: Зубр"));

    tui.type_text("Где зубры?");
    assert!(tui.press(KeyCode::Enter));
    assert!(tui.chat().is_pending());
    assert_eq!(tui.chat().draft(), "");
    assert!(tui.render().contains("Думаю..."));

    // A second question while the first is in flight is ignored.
    tui.type_text("Ещё?");
    assert!(!tui.press(KeyCode::Enter));

    tui.wait_for_reply().await;
    assert!(!tui.chat().is_pending());
    let texts: Vec<&str> = tui.chat().messages().iter().map(|m| m.text()).collect();
    assert_eq!(texts.len(), 3);
    assert_eq!(texts[1], "Где зубры?");
    assert_eq!(texts[2], "Зубры пасутся в северо-восточном вольере.");

    let calls = generator.calls.lock().expect("calls").clone();
    assert_eq!(
        calls,
        vec![("Где зубры?".to_owned(), Some("Зубр".to_owned()))]
    );
}

#[tokio::test]
async fn failed_reply_becomes_an_apology() {
    let mut tui = headless(Arc::new(UnavailableGenerator));
    tui.press(KeyCode::Char('c'));
    tui.type_text("Привет");
    assert!(tui.press(KeyCode::Enter));

    tui.wait_for_reply().await;
    let last = tui.chat().messages().last().expect("message");
    assert!(last.is_error());
    assert_eq!(last.text(), APOLOGY_TEXT);
    assert!(tui.render().contains("Простите"));
}

#[rstest]
#[tokio::test]
async fn blank_questions_are_not_sent(generator: Arc<RecordingGenerator>) {
    let mut tui = headless(generator.clone());
    tui.press(KeyCode::Char('c'));
    tui.type_text("   ");
    assert!(!tui.press(KeyCode::Enter));
    assert_eq!(tui.chat().messages().len(), 1);
    assert!(!tui.chat().is_pending());
    assert!(generator.calls.lock().expect("calls").is_empty());
}

#[rstest]
#[tokio::test]
async fn q_quits_from_the_map_but_types_in_chat(generator: Arc<RecordingGenerator>) {
    let mut tui = headless(generator);
    tui.press(KeyCode::Char('c'));
    tui.press(KeyCode::Char('q'));
    assert!(!tui.should_quit());
    assert_eq!(tui.chat().draft(), "q");
    assert!(tui.press(KeyCode::Backspace));
    assert!(!tui.press(KeyCode::Backspace));

    tui.press(KeyCode::Esc);
    tui.press(KeyCode::Char('q'));
    assert!(tui.should_quit());
}

#[rstest]
#[tokio::test]
async fn ctrl_c_quits_from_anywhere(generator: Arc<RecordingGenerator>) {
    let mut tui = headless(generator);
    tui.press(KeyCode::Char('c'));
    assert!(tui.press_ctrl_c());
    assert!(tui.should_quit());
}

#[rstest]
#[tokio::test]
async fn help_overlay_toggles(generator: Arc<RecordingGenerator>) {
    let mut tui = headless(generator);
    assert!(tui.press(KeyCode::Char('?')));
    assert!(tui.render().contains("Справка"));
    assert!(!tui.press(KeyCode::Tab));
    assert!(tui.press(KeyCode::Esc));
    assert!(!tui.render().contains("Справка"));
}

#[tokio::test]
async fn dangling_zone_hover_has_no_tooltip_and_click_keeps_panel_closed() {
    let animal = Animal::new(
        AnimalId::new("wolf").unwrap(),
        "Волк",
        AnimalCategory::Mammal,
        ConservationStatus::LeastConcern,
        vec!["/animals/wolf/1.jpg".to_owned()],
    )
    .unwrap();
    let ghost = MapZone::new(
        ZoneId::new("z-ghost").unwrap(),
        AnimalId::new("ghost").unwrap(),
        Shape::rect(100.0, 100.0, 400.0, 400.0).unwrap(),
        Point::new(250.0, 250.0),
    );
    let catalog = Catalog::new([animal], vec![ghost]).unwrap();
    let mut tui = HeadlessTui::new(
        catalog,
        Arc::new(UnavailableGenerator),
        missing_assets(),
        WIDTH,
        HEIGHT,
    );

    let (col, row) = screen_position(&mut tui, "z-ghost");
    tui.mouse_move(col, row);
    assert_eq!(
        tui.interaction().hovered_zone_id().map(|id| id.as_str()),
        Some("z-ghost")
    );
    assert!(!tui.render().contains("фото:"));

    tui.mouse_click(col, row);
    assert_eq!(
        tui.interaction().active_zone_id().map(|id| id.as_str()),
        Some("z-ghost")
    );
    assert!(tui.interaction().panel_open());
    assert!(!tui.panel().is_open());
    assert!(!tui.render().contains("Фото ["));

    // Esc still clears the highlighted selection.
    assert!(tui.press(KeyCode::Esc));
    assert!(!tui.interaction().panel_open());
    assert!(!tui.press(KeyCode::Esc));
}

#[test]
fn wrap_plain_breaks_on_words_and_splits_long_ones() {
    assert_eq!(wrap_plain("Гид: привет всем", 10), vec!["Гид:", "привет", "всем"]);
    assert_eq!(wrap_plain("абвгдеёжзи", 4), vec!["абвг", "деёж", "зи"]);
    assert_eq!(wrap_plain("a\n\nb", 5), vec!["a", "", "b"]);
}

#[test]
fn chat_title_names_the_context_animal() {
    assert_eq!(chat_view_title(None), "─[c]─ Гид Заповедника ");
    assert_eq!(chat_view_title(Some("Зубр")), "─[c]─ Гид Заповедника · О: Зубр ");
    assert_eq!(footer_label_ucfirst("PHOTO"), "Photo");
    assert_eq!(Focus::Map.cycle(), Focus::Chat);
}
