// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use laura::chat::{ChatRole, ChatSession, GenerateError, TextGenerator, APOLOGY_TEXT};
use laura::layout::layout_zones;
use laura::model::{Catalog, Point};
use laura::panel::{AssetResolver, DetailPanel, PANEL_IMAGE_PLACEHOLDER};
use laura::render::{render_svg, SvgOptions};
use laura::store::{builtin_catalog, load_catalog};
use laura::ui::MapInteraction;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_catalog() -> Catalog {
    let path = fixture_path("two_enclosures.json");
    load_catalog(&path).unwrap_or_else(|err| panic!("failed to load {path:?}: {err}"))
}

struct ScriptedGenerator(Result<String, GenerateError>);

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_reply(
        &self,
        _user_text: &str,
        _context: Option<&str>,
    ) -> Result<String, GenerateError> {
        self.0.clone()
    }
}

#[test]
fn clicking_zubr_then_closing_clears_the_whole_selection() {
    let catalog = builtin_catalog().expect("builtin catalog");
    let mut interaction = MapInteraction::default();
    let mut panel = DetailPanel::default();

    let zone = catalog.zone("z-zubr").expect("zubr zone");
    interaction.click_zone(zone);
    panel.display(catalog.animal_for_zone(zone).expect("zubr").clone());

    assert_eq!(interaction.active_zone_id().map(|id| id.as_str()), Some("z-zubr"));
    assert_eq!(interaction.active_animal_id().map(|id| id.as_str()), Some("zubr"));
    assert!(interaction.panel_open());
    assert_eq!(panel.counter_label().as_deref(), Some("1/3"));

    interaction.close();
    panel.close();
    assert!(interaction.active_zone_id().is_none());
    assert!(interaction.active_animal_id().is_none());
    assert!(!interaction.panel_open());
    assert!(!panel.is_open());
}

#[test]
fn hovering_a_zone_without_an_animal_yields_no_tooltip() {
    let catalog = fixture_catalog();
    assert_eq!(catalog.dangling_zones().len(), 1);

    let mut interaction = MapInteraction::default();
    let point = Point::new(550.0, 450.0);
    interaction.pointer_move(point);
    let hit = catalog.zone_at(point).map(|zone| zone.id().clone());
    interaction.track_hover(hit.as_ref());

    assert_eq!(
        interaction.hovered_zone_id().map(|id| id.as_str()),
        Some("z-closed")
    );
    assert!(interaction.tooltip(&catalog).is_none());
}

#[test]
fn overlapping_zones_hit_the_later_one() {
    let catalog = fixture_catalog();
    let overlap = Point::new(350.0, 350.0);
    assert_eq!(
        catalog.zone_at(overlap).map(|zone| zone.id().as_str()),
        Some("z-closed")
    );
    assert_eq!(
        catalog
            .zone_at(Point::new(150.0, 150.0))
            .map(|zone| zone.id().as_str()),
        Some("z-lynx")
    );
    assert!(catalog.zone_at(Point::new(900.0, 50.0)).is_none());
}

#[test]
fn svg_export_labels_resolved_zones_only() {
    let catalog = fixture_catalog();
    let layouts = layout_zones(&catalog, None, None);
    let svg = render_svg(&layouts, SvgOptions::default());

    assert!(svg.contains(r#"id="z-lynx""#));
    assert!(svg.contains(r#"id="z-closed""#));
    assert!(svg.contains(">КАВКАЗСКАЯ</tspan>"));
    assert!(svg.contains(">РЫСЬ</tspan>"));
    assert_eq!(svg.matches("<text").count(), 1 + 3, "one zone label plus the legend");

    let closed = svg
        .lines()
        .find(|line| line.contains(r#"id="z-closed""#))
        .expect("closed zone");
    assert!(!closed.contains("<text"));
    assert!(!closed.contains("<title>"));
}

#[test]
fn panel_photos_fall_back_to_the_placeholder() {
    let catalog = fixture_catalog();
    let resolver = AssetResolver::new(fixture_path("no-such-assets"));
    let mut panel = DetailPanel::default();
    panel.display(catalog.animal("lynx").expect("lynx").clone());

    assert_eq!(
        panel.resolved_image(&resolver).as_deref(),
        Some(PANEL_IMAGE_PLACEHOLDER)
    );
    panel.next();
    assert_eq!(
        panel.resolved_image(&resolver).as_deref(),
        Some("https://example.org/lynx/2.jpg")
    );
    panel.next();
    assert_eq!(panel.current_image_index(), 0);
}

#[tokio::test]
async fn guide_conversation_logs_reply_and_failure() {
    let mut chat = ChatSession::new();

    chat.send(
        "Кто живет у реки?",
        Some("Кавказская рысь"),
        &ScriptedGenerator(Ok("У реки гнездятся лебеди.".to_owned())),
    )
    .await;
    chat.send(
        "А ночью?",
        None,
        &ScriptedGenerator(Err(GenerateError::EmptyResponse)),
    )
    .await;
    chat.send("   ", None, &ScriptedGenerator(Ok("unused".to_owned())))
        .await;

    let log: Vec<(ChatRole, &str, bool)> = chat
        .messages()
        .iter()
        .map(|message| (message.role(), message.text(), message.is_error()))
        .collect();
    assert_eq!(log.len(), 5);
    assert_eq!(log[1], (ChatRole::User, "Кто живет у реки?", false));
    assert_eq!(log[2], (ChatRole::Model, "У реки гнездятся лебеди.", false));
    assert_eq!(log[3], (ChatRole::User, "А ночью?", false));
    assert_eq!(log[4], (ChatRole::Model, APOLOGY_TEXT, true));
    assert!(!chat.is_pending());
}
