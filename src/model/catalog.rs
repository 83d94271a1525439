// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::animal::Animal;
use super::ids::{AnimalId, ZoneId};
use super::shape::Point;
use super::zone::MapZone;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate animal id: {0}")]
    DuplicateAnimal(AnimalId),
    #[error("duplicate zone id: {0}")]
    DuplicateZone(ZoneId),
}

/// Static reference data: animals by id plus zones in drawing order.
///
/// Zones may reference animal ids that do not exist; lookups through [`Catalog::animal_for_zone`]
/// then return `None` and callers treat the zone as unlabeled.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    animals: BTreeMap<AnimalId, Animal>,
    zones: Vec<MapZone>,
}

impl Catalog {
    pub fn new(
        animals: impl IntoIterator<Item = Animal>,
        zones: Vec<MapZone>,
    ) -> Result<Self, CatalogError> {
        let mut by_id = BTreeMap::new();
        for animal in animals {
            let id = animal.id().clone();
            if by_id.insert(id.clone(), animal).is_some() {
                return Err(CatalogError::DuplicateAnimal(id));
            }
        }

        let mut zone_ids = BTreeSet::new();
        for zone in &zones {
            if !zone_ids.insert(zone.id().clone()) {
                return Err(CatalogError::DuplicateZone(zone.id().clone()));
            }
        }

        Ok(Self {
            animals: by_id,
            zones,
        })
    }

    pub fn animal(&self, id: &str) -> Option<&Animal> {
        self.animals.get(id)
    }

    pub fn animals(&self) -> impl Iterator<Item = &Animal> {
        self.animals.values()
    }

    pub fn zones(&self) -> &[MapZone] {
        &self.zones
    }

    pub fn zone(&self, id: &str) -> Option<&MapZone> {
        self.zones.iter().find(|zone| zone.id().as_str() == id)
    }

    pub fn animal_for_zone(&self, zone: &MapZone) -> Option<&Animal> {
        self.animal(zone.animal_id().as_str())
    }

    pub fn zones_for_animal<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a MapZone> + 'a {
        self.zones
            .iter()
            .filter(move |zone| zone.animal_id().as_str() == id)
    }

    /// Zones whose animal id has no record.
    pub fn dangling_zones(&self) -> Vec<&MapZone> {
        self.zones
            .iter()
            .filter(|zone| !self.animals.contains_key(zone.animal_id().as_str()))
            .collect()
    }

    /// Topmost zone containing `point`; later zones are drawn above earlier ones.
    pub fn zone_at(&self, point: Point) -> Option<&MapZone> {
        self.zones.iter().rev().find(|zone| zone.shape().contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, CatalogError};
    use crate::model::{
        Animal, AnimalCategory, AnimalId, ConservationStatus, MapZone, Point, Shape, ZoneId,
    };

    fn animal(id: &str) -> Animal {
        Animal::new(
            AnimalId::new(id).unwrap(),
            id.to_uppercase(),
            AnimalCategory::Mammal,
            ConservationStatus::LeastConcern,
            vec![format!("/animals/{id}/1.jpg")],
        )
        .unwrap()
    }

    fn zone(id: &str, animal_id: &str, rect: (f64, f64, f64, f64)) -> MapZone {
        MapZone::new(
            ZoneId::new(id).unwrap(),
            AnimalId::new(animal_id).unwrap(),
            Shape::rect(rect.0, rect.1, rect.2, rect.3).unwrap(),
            Point::new((rect.0 + rect.2) / 2.0, (rect.1 + rect.3) / 2.0),
        )
    }

    #[test]
    fn zone_at_prefers_later_zones_when_overlapping() {
        let catalog = Catalog::new(
            [animal("a"), animal("b")],
            vec![
                zone("z-a", "a", (0.0, 0.0, 100.0, 100.0)),
                zone("z-b", "b", (50.0, 50.0, 150.0, 150.0)),
            ],
        )
        .unwrap();

        let hit = catalog.zone_at(Point::new(75.0, 75.0)).unwrap();
        assert_eq!(hit.id().as_str(), "z-b");
        let hit = catalog.zone_at(Point::new(25.0, 25.0)).unwrap();
        assert_eq!(hit.id().as_str(), "z-a");
        assert!(catalog.zone_at(Point::new(500.0, 500.0)).is_none());
    }

    #[test]
    fn dangling_zones_are_reported_not_rejected() {
        let catalog = Catalog::new(
            [animal("a")],
            vec![
                zone("z-a", "a", (0.0, 0.0, 10.0, 10.0)),
                zone("z-ghost", "ghost", (20.0, 0.0, 30.0, 10.0)),
            ],
        )
        .unwrap();

        let dangling = catalog.dangling_zones();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].id().as_str(), "z-ghost");
        assert!(catalog.animal_for_zone(dangling[0]).is_none());
    }

    #[test]
    fn an_animal_may_own_several_zones() {
        let catalog = Catalog::new(
            [animal("a")],
            vec![
                zone("z-a1", "a", (0.0, 0.0, 10.0, 10.0)),
                zone("z-a2", "a", (20.0, 0.0, 30.0, 10.0)),
            ],
        )
        .unwrap();
        assert_eq!(catalog.zones_for_animal("a").count(), 2);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new([animal("a"), animal("a")], Vec::new()).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateAnimal(AnimalId::new("a").unwrap()));

        let err = Catalog::new(
            [animal("a")],
            vec![
                zone("z", "a", (0.0, 0.0, 10.0, 10.0)),
                zone("z", "a", (0.0, 0.0, 10.0, 10.0)),
            ],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateZone(ZoneId::new("z").unwrap()));
    }
}
