// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Map interaction state.
//!
//! Hover, selection and pointer position for the site plan. The terminal UI feeds pointer events
//! in; the detail panel and renderers read the result. Every change bumps `rev` so observers can
//! skip redundant work.

use crate::model::{AnimalId, Catalog, MapZone, Point, ZoneId};

/// Placeholder shown in the tooltip when the cover image cannot be resolved.
pub const TOOLTIP_IMAGE_PLACEHOLDER: &str = "https://placehold.co/50x50?text=?";

/// Distance between the tooltip's bottom edge and the pointer, in logical canvas units.
pub const TOOLTIP_OFFSET: f64 = 16.0;

/// The zone and animal shown in the detail panel.
///
/// Kept as one value so "panel open" can never disagree with the active ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub zone_id: ZoneId,
    pub animal_id: AnimalId,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapInteraction {
    rev: u64,
    hovered: Option<ZoneId>,
    selection: Option<Selection>,
    pointer: Point,
}

impl MapInteraction {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn hovered_zone_id(&self) -> Option<&ZoneId> {
        self.hovered.as_ref()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn active_zone_id(&self) -> Option<&ZoneId> {
        self.selection.as_ref().map(|selection| &selection.zone_id)
    }

    pub fn active_animal_id(&self) -> Option<&AnimalId> {
        self.selection.as_ref().map(|selection| &selection.animal_id)
    }

    /// True while a selection exists.
    ///
    /// A selected zone whose animal is missing still counts; whether the detail panel is actually
    /// drawn is [`crate::panel::DetailPanel::is_open`].
    pub fn panel_open(&self) -> bool {
        self.selection.is_some()
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn pointer_enter(&mut self, zone_id: &ZoneId) {
        if self.hovered.as_ref() == Some(zone_id) {
            return;
        }
        self.hovered = Some(zone_id.clone());
        self.bump();
    }

    /// Clears hover only if `zone_id` is still the hovered zone.
    ///
    /// A late leave for a zone the pointer already moved away from must not clobber the hover of
    /// the zone it moved into.
    pub fn pointer_leave(&mut self, zone_id: &ZoneId) {
        if self.hovered.as_ref() != Some(zone_id) {
            return;
        }
        self.hovered = None;
        self.bump();
    }

    pub fn pointer_move(&mut self, point: Point) {
        if self.pointer == point {
            return;
        }
        self.pointer = point;
        self.bump();
    }

    /// Turns a hit-test result into enter/leave transitions.
    pub fn track_hover(&mut self, hit: Option<&ZoneId>) {
        match (self.hovered.clone(), hit) {
            (Some(current), Some(hit)) if current == *hit => {}
            (Some(current), hit) => {
                self.pointer_leave(&current);
                if let Some(hit) = hit {
                    self.pointer_enter(hit);
                }
            }
            (None, Some(hit)) => self.pointer_enter(hit),
            (None, None) => {}
        }
    }

    /// Selects a zone and opens the detail panel. Selection is a click-only transition.
    pub fn click(&mut self, zone_id: &ZoneId, animal_id: &AnimalId) {
        let selection = Selection {
            zone_id: zone_id.clone(),
            animal_id: animal_id.clone(),
        };
        if self.selection.as_ref() == Some(&selection) {
            return;
        }
        self.selection = Some(selection);
        self.bump();
    }

    pub fn click_zone(&mut self, zone: &MapZone) {
        self.click(zone.id(), zone.animal_id());
    }

    /// Closes the detail panel, clearing the active zone and animal together.
    pub fn close(&mut self) {
        if self.selection.take().is_some() {
            self.bump();
        }
    }

    /// Content for the hover tooltip, if the hovered zone resolves to an animal.
    pub fn tooltip<'a>(&self, catalog: &'a Catalog) -> Option<Tooltip<'a>> {
        let zone = catalog.zone(self.hovered.as_ref()?.as_str())?;
        let animal = catalog.animal_for_zone(zone)?;
        Some(Tooltip {
            name: animal.name(),
            short_description: animal.short_description(),
            image: animal.cover_image(),
            anchor: self.pointer,
        })
    }

    fn bump(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tooltip<'a> {
    pub name: &'a str,
    pub short_description: &'a str,
    pub image: &'a str,
    /// Pointer position the tooltip is anchored to.
    pub anchor: Point,
}

/// Axis-aligned rectangle in some viewport's units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Places a `width` x `height` box centered horizontally on `anchor` with its bottom edge `offset`
/// above it, clamped horizontally into `viewport_width` x `viewport_height`.
///
/// When the box does not fit above the pointer it flips below it. When it fits on neither side it
/// takes the roomier side and shrinks to that room, so the box never covers the pointer. Returns
/// `None` when neither side has any room.
pub fn place_tooltip(
    anchor: Point,
    width: f64,
    height: f64,
    offset: f64,
    viewport_width: f64,
    viewport_height: f64,
) -> Option<Placement> {
    let max_x = (viewport_width - width).max(0.0);
    let x = (anchor.x - width / 2.0).clamp(0.0, max_x);

    let room_above = anchor.y - offset;
    let below = anchor.y + offset;
    let room_below = viewport_height - below;

    let (y, height) = if height <= room_above {
        (room_above - height, height)
    } else if height <= room_below {
        (below, height)
    } else if room_above >= room_below {
        (0.0, room_above)
    } else {
        (below, room_below)
    };
    if height <= 0.0 {
        return None;
    }

    Some(Placement {
        x,
        y,
        width,
        height,
    })
}
