// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Standalone SVG document for the site plan.

use super::text::{escape_xml, push_number};
use crate::layout::{ZoneLayout, ZoneVisualState, LINE_ADVANCE_EM};
use crate::model::{CANVAS_HEIGHT, CANVAS_WIDTH};

const BACKGROUND: &str = "#f5e6ca";
const WOOD: &str = "#8c603f";
const BRIDGE_FILL: &str = "#d4b483";
const RIVER_FILL: &str = "#3b82f6";
const RIVER_PATH: &str = "M 0,550 L 1000,550 L 1000,600 L 0,600 Z";
const RIPPLE_PATHS: [&str; 2] = [
    "M 50,565 Q 100,555 150,565 T 250,565",
    "M 600,580 Q 650,570 700,580 T 800,580",
];
const SHADOW_OFFSET: f64 = 4.0;

const LEGEND_TITLE: &str = "Карта комплекса";
const LEGEND_HINT: [&str; 2] = ["Нажмите на зеленые зоны,", "чтобы узнать о животных."];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgOptions {
    /// Adds `<title>` hover text (name and short description) to each labelled zone.
    pub titles: bool,
    pub legend: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            titles: true,
            legend: true,
        }
    }
}

/// Renders `layouts` (in drawing order) as an SVG document in the 1000x600 viewBox.
pub fn render_svg(layouts: &[ZoneLayout<'_>], options: SvgOptions) -> String {
    let mut out = String::with_capacity(8 * 1024);

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 "#);
    push_number(&mut out, CANVAS_WIDTH);
    out.push(' ');
    push_number(&mut out, CANVAS_HEIGHT);
    out.push_str(r#"" preserveAspectRatio="xMidYMid meet" font-family="sans-serif">"#);
    out.push('\n');

    push_defs(&mut out);
    out.push_str(&format!(
        r#"<rect width="100%" height="100%" fill="{BACKGROUND}"/>"#
    ));
    out.push('\n');
    push_river(&mut out);
    push_bridge(&mut out);

    for layout in layouts {
        push_zone(&mut out, layout, options);
    }

    if options.legend {
        push_legend(&mut out);
    }

    out.push_str("</svg>\n");
    out
}

fn push_defs(out: &mut String) {
    out.push_str(concat!(
        r#"<defs><pattern id="grass-pattern" x="0" y="0" width="20" height="20" patternUnits="userSpaceOnUse">"#,
        r#"<circle cx="2" cy="2" r="1" fill="black"/><circle cx="10" cy="12" r="1" fill="black"/>"#,
        "</pattern></defs>\n",
    ));
}

fn push_river(out: &mut String) {
    out.push_str(&format!(
        r#"<path d="{RIVER_PATH}" fill="{RIVER_FILL}" stroke="none" opacity="0.9"/>"#
    ));
    out.push('\n');
    for ripple in RIPPLE_PATHS {
        out.push_str(&format!(
            r#"<path d="{ripple}" stroke="white" stroke-width="2" fill="none" opacity="0.5"/>"#
        ));
        out.push('\n');
    }
}

fn push_bridge(out: &mut String) {
    out.push_str(r#"<g id="bridge">"#);
    out.push_str(&format!(
        r#"<rect x="525" y="545" width="30" height="60" fill="{BRIDGE_FILL}" stroke="{WOOD}" stroke-width="2"/>"#
    ));
    for y in (555..=595).step_by(10) {
        out.push_str(&format!(
            r#"<line x1="525" y1="{y}" x2="555" y2="{y}" stroke="{WOOD}" stroke-width="1" opacity="0.5"/>"#
        ));
    }
    out.push_str(&format!(
        r#"<path d="M 540,610 L 540,585 L 535,590 M 540,585 L 545,590" stroke="{WOOD}" stroke-width="2" fill="none"/>"#
    ));
    out.push_str("</g>\n");
}

fn push_zone(out: &mut String, layout: &ZoneLayout<'_>, options: SvgOptions) {
    let zone = layout.zone;
    let path = escape_xml(zone.shape().path_data());

    out.push_str(r#"<g class="zone" id=""#);
    out.push_str(&escape_xml(zone.id().as_str()));
    out.push_str(r#"" data-animal-id=""#);
    out.push_str(&escape_xml(zone.animal_id().as_str()));
    out.push_str(r#"" data-state=""#);
    out.push_str(match layout.state {
        ZoneVisualState::Idle => "idle",
        ZoneVisualState::Hovered => "hover",
        ZoneVisualState::Active => "active",
    });
    out.push_str("\">");

    if options.titles {
        if let Some(animal) = layout.animal {
            out.push_str("<title>");
            out.push_str(&escape_xml(animal.name()));
            if !animal.short_description().is_empty() {
                out.push_str(" — ");
                out.push_str(&escape_xml(animal.short_description()));
            }
            out.push_str("</title>");
        }
    }

    out.push_str(r#"<path d=""#);
    out.push_str(&path);
    out.push_str(r#"" fill="black" opacity="0.2" transform="translate("#);
    push_number(out, SHADOW_OFFSET);
    out.push(',');
    push_number(out, SHADOW_OFFSET);
    out.push_str(")\"/>");

    out.push_str(r#"<path d=""#);
    out.push_str(&path);
    out.push_str(&format!(
        r#"" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        layout.style.fill, layout.style.stroke, layout.style.stroke_width
    ));

    if !layout.is_pond() {
        out.push_str(r#"<path d=""#);
        out.push_str(&path);
        out.push_str(r#"" fill="url(#grass-pattern)" opacity="0.1" pointer-events="none"/>"#);
    }

    let anchor = layout.label_anchor();
    if let Some(label) = &layout.label {
        out.push_str(r#"<text x=""#);
        push_number(out, anchor.x);
        out.push_str(r#"" y=""#);
        push_number(out, anchor.y);
        out.push_str(&format!(
            r#"" text-anchor="middle" font-weight="bold" fill="white" letter-spacing="0.05em" pointer-events="none" style="font-size:{}px">"#,
            label.font_px
        ));
        for span in &label.spans {
            out.push_str(r#"<tspan x=""#);
            push_number(out, anchor.x);
            out.push_str(r#"" dy=""#);
            if span.dy_em == 0.0 {
                out.push('0');
            } else {
                push_number(out, span.dy_em);
                out.push_str("em");
            }
            out.push_str("\">");
            out.push_str(&escape_xml(&span.text));
            out.push_str("</tspan>");
        }
        out.push_str("</text>");
    }

    if layout.is_pond() {
        push_fish(out, anchor.x, anchor.y + 20.0);
    }

    out.push_str("</g>\n");
}

/// Small fish glyph, 24 units wide, top-centered at `(cx, top)`.
fn push_fish(out: &mut String, cx: f64, top: f64) {
    out.push_str(r#"<g class="pond-icon" opacity="0.8" pointer-events="none" transform="translate("#);
    push_number(out, cx - 12.0);
    out.push(',');
    push_number(out, top);
    out.push_str(concat!(
        r#")"><path d="M 2,12 Q 10,4 18,12 Q 10,20 2,12 Z M 18,12 L 23,7 L 23,17 Z" "#,
        r#"fill="none" stroke="white" stroke-width="2" stroke-linejoin="round"/>"#,
        r#"<circle cx="7" cy="11" r="1" fill="white"/></g>"#,
    ));
}

fn push_legend(out: &mut String) {
    out.push_str(&format!(
        r#"<g id="legend"><rect x="16" y="470" width="230" height="62" rx="8" fill="white" fill-opacity="0.9" stroke="{WOOD}"/>"#
    ));
    out.push_str(&format!(
        r##"<circle cx="32" cy="488" r="4" fill="#ef4444"/><text x="42" y="492" font-size="13" font-weight="bold" fill="{WOOD}">{}</text>"##,
        escape_xml(LEGEND_TITLE)
    ));
    let mut y = 508.0;
    for line in LEGEND_HINT {
        out.push_str(r##"<text x="26" y=""##);
        push_number(out, y);
        out.push_str(r##"" font-size="11" fill="#4b5563">"##);
        out.push_str(&escape_xml(line));
        out.push_str("</text>");
        y += LINE_ADVANCE_EM * 13.0;
    }
    out.push_str("</g>\n");
}
