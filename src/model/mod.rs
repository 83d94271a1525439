// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A catalog holds animals keyed by id plus the ordered zones of the site plan.

pub mod animal;
pub mod catalog;
pub mod ids;
pub mod shape;
pub mod zone;

pub use animal::{Animal, AnimalCategory, AnimalError, ConservationStatus};
pub use catalog::{Catalog, CatalogError};
pub use ids::{AnimalId, Id, IdError, ZoneId};
pub use shape::{Bounds, PathSegment, Point, Shape, ShapeError, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use zone::{MapZone, ZoneKind};
