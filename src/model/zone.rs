// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{AnimalId, ZoneId};
use super::shape::{Point, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    #[default]
    Enclosure,
    /// Water feature; always drawn in water color.
    Pond,
}

impl ZoneKind {
    pub fn is_enclosure(&self) -> bool {
        *self == Self::Enclosure
    }
}

/// One enclosure's hit region on the site plan.
#[derive(Debug, Clone, PartialEq)]
pub struct MapZone {
    id: ZoneId,
    animal_id: AnimalId,
    shape: Shape,
    label_anchor: Point,
    kind: ZoneKind,
}

impl MapZone {
    pub fn new(id: ZoneId, animal_id: AnimalId, shape: Shape, label_anchor: Point) -> Self {
        Self {
            id,
            animal_id,
            shape,
            label_anchor,
            kind: ZoneKind::Enclosure,
        }
    }

    pub fn with_kind(mut self, kind: ZoneKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn id(&self) -> &ZoneId {
        &self.id
    }

    pub fn animal_id(&self) -> &AnimalId {
        &self.animal_id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn label_anchor(&self) -> Point {
        self.label_anchor
    }

    pub fn kind(&self) -> ZoneKind {
        self.kind
    }

    pub fn is_pond(&self) -> bool {
        self.kind == ZoneKind::Pond
    }
}
