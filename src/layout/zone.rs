// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Animal, Catalog, MapZone, Point};

use super::label::ZoneLabel;

pub const POND_FILL: &str = "#60a5fa";
pub const ACTIVE_FILL: &str = "#22c55e";
pub const HOVER_FILL: &str = "#4ade80";
pub const IDLE_FILL: &str = "#65a30d";

pub const ACTIVE_STROKE: &str = "#facc15";
pub const IDLE_STROKE: &str = "#fefce8";
pub const ACTIVE_STROKE_WIDTH: u8 = 4;
pub const IDLE_STROKE_WIDTH: u8 = 2;

/// Interaction state of a single zone, from the map's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ZoneVisualState {
    Idle,
    Hovered,
    Active,
}

impl ZoneVisualState {
    /// Active wins over hover.
    pub fn resolve(zone_id: &str, hovered: Option<&str>, active: Option<&str>) -> Self {
        if active == Some(zone_id) {
            Self::Active
        } else if hovered == Some(zone_id) {
            Self::Hovered
        } else {
            Self::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneStyle {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: u8,
}

impl ZoneStyle {
    pub fn for_zone(is_pond: bool, state: ZoneVisualState) -> Self {
        let fill = if is_pond {
            POND_FILL
        } else {
            match state {
                ZoneVisualState::Active => ACTIVE_FILL,
                ZoneVisualState::Hovered => HOVER_FILL,
                ZoneVisualState::Idle => IDLE_FILL,
            }
        };
        let (stroke, stroke_width) = match state {
            ZoneVisualState::Active => (ACTIVE_STROKE, ACTIVE_STROKE_WIDTH),
            _ => (IDLE_STROKE, IDLE_STROKE_WIDTH),
        };

        Self {
            fill,
            stroke,
            stroke_width,
        }
    }
}

/// Everything a renderer needs to draw one zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneLayout<'a> {
    pub zone: &'a MapZone,
    pub animal: Option<&'a Animal>,
    pub state: ZoneVisualState,
    pub style: ZoneStyle,
    /// `None` when the zone's animal id does not resolve.
    pub label: Option<ZoneLabel>,
}

impl ZoneLayout<'_> {
    pub fn label_anchor(&self) -> Point {
        self.zone.label_anchor()
    }

    pub fn is_pond(&self) -> bool {
        self.zone.is_pond()
    }
}

/// Lays out every zone in drawing order.
pub fn layout_zones<'a>(
    catalog: &'a Catalog,
    hovered: Option<&str>,
    active: Option<&str>,
) -> Vec<ZoneLayout<'a>> {
    catalog
        .zones()
        .iter()
        .map(|zone| {
            let animal = catalog.animal_for_zone(zone);
            let state = ZoneVisualState::resolve(zone.id().as_str(), hovered, active);
            ZoneLayout {
                zone,
                animal,
                state,
                style: ZoneStyle::for_zone(zone.is_pond(), state),
                label: animal.map(ZoneLabel::for_animal),
            }
        })
        .collect()
}
