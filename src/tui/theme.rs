// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

use crate::layout::ZoneStyle;
use crate::model::ConservationStatus;

pub(crate) const ENV_TUI_PALETTE: &str = "LAURA_TUI_PALETTE";

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: TuiPalette,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let palette = palette_override_from_env()?;
        Ok(Self {
            palette: palette.unwrap_or_default(),
        })
    }

    pub(crate) fn base_style(&self) -> Style {
        let mut style = Style::default();
        if let Some(fg) = self.palette.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.palette.bg {
            style = style.bg(bg);
        }
        style
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.palette.accent)
        } else {
            self.base_style()
        }
    }

    pub(crate) fn title_style(&self) -> Style {
        self.base_style()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn dim_style(&self) -> Style {
        self.base_style().fg(Color::DarkGray)
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(self.palette.error)
    }

    pub(crate) fn ground_style(&self) -> Style {
        Style::default().fg(Color::Black).bg(self.palette.ground)
    }

    pub(crate) fn river_style(&self) -> Style {
        Style::default().fg(Color::White).bg(self.palette.water)
    }

    pub(crate) fn bridge_style(&self) -> Style {
        Style::default()
            .fg(hex_color(BRIDGE_STROKE))
            .bg(hex_color(BRIDGE_FILL))
    }

    /// Interior cells take the zone fill; outline cells draw the stroke color on that fill.
    pub(crate) fn zone_fill_style(&self, style: &ZoneStyle) -> Style {
        Style::default().fg(Color::White).bg(hex_color(style.fill))
    }

    pub(crate) fn zone_outline_style(&self, style: &ZoneStyle) -> Style {
        let outline = Style::default()
            .fg(hex_color(style.stroke))
            .bg(hex_color(style.fill));
        if style.stroke_width > 2 {
            outline.add_modifier(Modifier::BOLD)
        } else {
            outline
        }
    }

    pub(crate) fn zone_label_style(&self, style: &ZoneStyle) -> Style {
        self.zone_fill_style(style).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn status_badge_style(&self, status: ConservationStatus) -> Style {
        Style::default()
            .fg(Color::White)
            .bg(hex_color(status.badge_color()))
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn user_message_style(&self) -> Style {
        self.base_style().fg(self.palette.accent)
    }

    pub(crate) fn model_message_style(&self) -> Style {
        self.base_style()
    }
}

const BRIDGE_FILL: &str = "#d4b483";
const BRIDGE_STROKE: &str = "#8c603f";

/// Colors a visitor can override through `LAURA_TUI_PALETTE`.
#[derive(Debug, Clone, PartialEq)]
struct TuiPalette {
    fg: Option<Color>,
    bg: Option<Color>,
    accent: Color,
    error: Color,
    ground: Color,
    water: Color,
}

impl Default for TuiPalette {
    fn default() -> Self {
        Self {
            fg: None,
            bg: None,
            accent: Color::Yellow,
            error: Color::LightRed,
            ground: Color::Rgb(0xf5, 0xe6, 0xca),
            water: Color::Rgb(0x3b, 0x82, 0xf6),
        }
    }
}

impl TuiPalette {
    const KEYS: &'static str = "fg,bg,accent,error,ground,water";

    /// Parses `key=color` pairs separated by commas; unnamed keys keep their defaults.
    fn parse_pairs(value: &str) -> Result<Self, String> {
        let mut palette = Self::default();
        for pair in value.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
            let Some((key, color)) = pair.split_once('=') else {
                return Err(format!("expected key=color, got {pair:?}"));
            };
            let color = parse_palette_color(color)?;
            match key.trim().to_ascii_lowercase().as_str() {
                "fg" => palette.fg = Some(color),
                "bg" => palette.bg = Some(color),
                "accent" => palette.accent = color,
                "error" => palette.error = color,
                "ground" => palette.ground = color,
                "water" => palette.water = color,
                other => {
                    return Err(format!(
                        "unknown palette key {other:?} (expected one of {})",
                        Self::KEYS
                    ))
                }
            }
        }
        Ok(palette)
    }
}

fn palette_override_from_env() -> Result<Option<TuiPalette>, ThemeError> {
    let value = match env::var(ENV_TUI_PALETTE) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(ThemeError::InvalidEnv {
                name: ENV_TUI_PALETTE.to_owned(),
                value: "<non-unicode>".to_owned(),
            });
        }
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed = TuiPalette::parse_pairs(trimmed).map_err(|error| ThemeError::InvalidEnv {
        name: ENV_TUI_PALETTE.to_owned(),
        value: format!("{trimmed} ({error})"),
    })?;
    Ok(Some(parsed))
}

/// Colors from the catalog and zone styles are compile-time constants; a malformed one falls back
/// to the terminal default.
fn hex_color(value: &str) -> Color {
    parse_palette_color(value).unwrap_or(Color::Reset)
}

fn parse_palette_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("rgb:") {
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != 3 {
            return Err(format!("invalid rgb: value: {trimmed}"));
        }
        let r = parse_hex_channel(parts[0])?;
        let g = parse_hex_channel(parts[1])?;
        let b = parse_hex_channel(parts[2])?;
        return Ok(Color::Rgb(r, g, b));
    }

    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    Ok(Color::Rgb(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    ))
}

fn parse_hex_channel(value: &str) -> Result<u8, String> {
    let value = value.trim();
    match value.len() {
        2 => u8::from_str_radix(value, 16).map_err(|_| format!("invalid rgb: component {value}")),
        4 => u16::from_str_radix(value, 16)
            .map(|parsed| (parsed >> 8) as u8)
            .map_err(|_| format!("invalid rgb: component {value}")),
        _ => Err(format!(
            "invalid rgb: component {value} (expected 2 or 4 hex digits)"
        )),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ThemeError {
    #[error("invalid env {name}={value}")]
    InvalidEnv { name: String, value: String },
}

#[cfg(test)]
mod tests {
    use ratatui::style::{Color, Modifier};

    use super::{hex_color, parse_palette_color, TuiPalette, TuiTheme};
    use crate::layout::{ZoneStyle, ZoneVisualState};

    #[test]
    fn palette_pairs_override_only_named_keys() {
        let palette = TuiPalette::parse_pairs("water=#0000ff, fg=rgb:ffff/0000/8080").unwrap();
        assert_eq!(palette.water, Color::Rgb(0, 0, 0xff));
        assert_eq!(palette.fg, Some(Color::Rgb(0xff, 0, 0x80)));
        assert_eq!(palette.accent, TuiPalette::default().accent);
        assert_eq!(palette.bg, None);
    }

    #[test]
    fn palette_rejects_unknown_keys_and_bad_colors() {
        let err = TuiPalette::parse_pairs("grass=#00ff00").unwrap_err();
        assert!(err.contains("unknown palette key"));
        let err = TuiPalette::parse_pairs("fg").unwrap_err();
        assert!(err.contains("key=color"));
        assert!(TuiPalette::parse_pairs("fg=#12345").is_err());
    }

    #[test]
    fn hex_colors_accept_common_prefixes() {
        assert_eq!(parse_palette_color("#65a30d").unwrap(), Color::Rgb(0x65, 0xa3, 0x0d));
        assert_eq!(parse_palette_color("0x65A30D").unwrap(), Color::Rgb(0x65, 0xa3, 0x0d));
        assert_eq!(hex_color("not a color"), Color::Reset);
    }

    #[test]
    fn active_outline_is_bold() {
        let theme = TuiTheme::default();
        let active = theme.zone_outline_style(&ZoneStyle::for_zone(false, ZoneVisualState::Active));
        assert_eq!(active.fg, Some(Color::Rgb(0xfa, 0xcc, 0x15)));
        assert!(active.add_modifier.contains(Modifier::BOLD));
        let idle = theme.zone_outline_style(&ZoneStyle::for_zone(false, ZoneVisualState::Idle));
        assert!(!idle.add_modifier.contains(Modifier::BOLD));
    }
}
