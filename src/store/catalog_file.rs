// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    Animal, AnimalCategory, AnimalError, AnimalId, Catalog, CatalogError, ConservationStatus,
    IdError, MapZone, Point, Shape, ShapeError, ZoneId, ZoneKind,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid catalog JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode catalog: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("invalid {field} {value:?}: {source}")]
    InvalidId {
        field: &'static str,
        value: String,
        source: IdError,
    },
    #[error("zone {zone_id} has an invalid path: {source}")]
    InvalidShape { zone_id: String, source: ShapeError },
    #[error(transparent)]
    Animal(#[from] AnimalError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// On-disk catalog document.
///
/// Zones keep their array order, which is also their drawing order on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogRecord {
    pub animals: Vec<AnimalRecord>,
    pub zones: Vec<ZoneRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnimalRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    /// Local paths (resolved against the asset root) or `http(s)` URLs. Must not be empty.
    pub images: Vec<String>,
    pub category: AnimalCategory,
    /// IUCN code.
    pub conservation_status: ConservationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ZoneRecord {
    pub id: String,
    pub animal_id: String,
    /// SVG path data in the 1000x600 canvas.
    pub path: String,
    pub label_x: f64,
    pub label_y: f64,
    #[serde(default, skip_serializing_if = "ZoneKind::is_enclosure")]
    pub kind: ZoneKind,
}

impl CatalogRecord {
    pub fn into_catalog(self) -> Result<Catalog, StoreError> {
        let animals = self
            .animals
            .into_iter()
            .map(AnimalRecord::into_animal)
            .collect::<Result<Vec<_>, _>>()?;
        let zones = self
            .zones
            .into_iter()
            .map(ZoneRecord::into_zone)
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Catalog::new(animals, zones)?;
        for zone in catalog.dangling_zones() {
            tracing::warn!(
                zone_id = %zone.id(),
                animal_id = %zone.animal_id(),
                "zone references an unknown animal; it will render unlabeled"
            );
        }
        Ok(catalog)
    }

    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            animals: catalog.animals().map(AnimalRecord::from_animal).collect(),
            zones: catalog.zones().iter().map(ZoneRecord::from_zone).collect(),
        }
    }
}

impl AnimalRecord {
    fn into_animal(self) -> Result<Animal, StoreError> {
        let id = parse_id::<AnimalId>("animal id", &self.id)?;
        Ok(Animal::new(
            id,
            self.name,
            self.category,
            self.conservation_status,
            self.images,
        )?
            .with_scientific_name(self.scientific_name)
            .with_short_description(self.short_description)
            .with_description(self.description))
    }

    fn from_animal(animal: &Animal) -> Self {
        Self {
            id: animal.id().to_string(),
            name: animal.name().to_owned(),
            scientific_name: animal.scientific_name().to_owned(),
            short_description: animal.short_description().to_owned(),
            description: animal.description().to_owned(),
            images: animal.images().to_vec(),
            category: animal.category(),
            conservation_status: animal.conservation_status(),
        }
    }
}

impl ZoneRecord {
    fn into_zone(self) -> Result<MapZone, StoreError> {
        let id = parse_id::<ZoneId>("zone id", &self.id)?;
        let animal_id = parse_id::<AnimalId>("animal id", &self.animal_id)?;
        let shape = Shape::parse(self.path).map_err(|source| StoreError::InvalidShape {
            zone_id: self.id.clone(),
            source,
        })?;
        Ok(MapZone::new(id, animal_id, shape, Point::new(self.label_x, self.label_y))
            .with_kind(self.kind))
    }

    fn from_zone(zone: &MapZone) -> Self {
        let anchor = zone.label_anchor();
        Self {
            id: zone.id().to_string(),
            animal_id: zone.animal_id().to_string(),
            path: zone.shape().path_data().to_owned(),
            label_x: anchor.x,
            label_y: anchor.y,
            kind: zone.kind(),
        }
    }
}

fn parse_id<I>(field: &'static str, value: &str) -> Result<I, StoreError>
where
    I: std::str::FromStr<Err = IdError>,
{
    value.parse().map_err(|source| StoreError::InvalidId {
        field,
        value: value.to_owned(),
        source,
    })
}

/// Reads a catalog JSON file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, StoreError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let record: CatalogRecord = serde_json::from_str(&raw).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = record.into_catalog()?;
    tracing::info!(
        path = %path.display(),
        animals = catalog.animals().count(),
        zones = catalog.zones().len(),
        "loaded catalog"
    );
    Ok(catalog)
}

pub fn catalog_to_json(catalog: &Catalog) -> Result<String, StoreError> {
    serde_json::to_string_pretty(&CatalogRecord::from_catalog(catalog)).map_err(StoreError::Encode)
}

/// JSON schema describing [`CatalogRecord`].
pub fn catalog_schema_json() -> Result<String, StoreError> {
    let schema = schemars::schema_for!(CatalogRecord);
    serde_json::to_string_pretty(&schema).map_err(StoreError::Encode)
}
