// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Catalog sources.
//!
//! The store module turns the built-in «Лаура» data or a catalog JSON file into a validated
//! [`crate::model::Catalog`]. Catalogs are read-only; nothing here writes back to disk.

pub mod builtin;
pub mod catalog_file;

pub use builtin::{builtin_catalog, builtin_record};
pub use catalog_file::{
    catalog_schema_json, catalog_to_json, load_catalog, AnimalRecord, CatalogRecord, StoreError,
    ZoneRecord,
};
