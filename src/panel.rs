// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Detail panel for the selected animal.

use std::path::{Path, PathBuf};

use crate::model::{Animal, ConservationStatus};

/// Shown in place of a photo that cannot be resolved.
pub const PANEL_IMAGE_PLACEHOLDER: &str = "https://placehold.co/800x600?text=No+Photo";

/// Resolves catalog image references to something displayable.
pub trait ImageResolver {
    /// Returns `None` when the reference cannot be loaded.
    fn resolve(&self, reference: &str) -> Option<String>;

    /// Resolves `reference`, substituting `placeholder` on failure.
    fn resolve_or(&self, reference: &str, placeholder: &str) -> String {
        match self.resolve(reference) {
            Some(resolved) => resolved,
            None => {
                tracing::debug!(reference, "image unavailable; using placeholder");
                placeholder.to_owned()
            }
        }
    }
}

/// Resolves local references against an asset directory.
///
/// `http(s)` URLs pass through untouched. Local references like `/animals/wolf/1.jpg` are joined
/// onto `root` and must exist on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageResolver for AssetResolver {
    fn resolve(&self, reference: &str) -> Option<String> {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Some(reference.to_owned());
        }

        let relative = reference.trim_start_matches('/');
        if relative.is_empty() {
            return None;
        }
        let path = self.root.join(relative);
        path.is_file().then(|| path.display().to_string())
    }
}

/// Carousel and metadata for the animal currently shown in the panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailPanel {
    animal: Option<Animal>,
    current_image_index: usize,
}

impl DetailPanel {
    /// Shows `animal`, always starting from its first photo.
    pub fn display(&mut self, animal: Animal) {
        self.animal = Some(animal);
        self.current_image_index = 0;
    }

    pub fn close(&mut self) {
        self.animal = None;
        self.current_image_index = 0;
    }

    pub fn animal(&self) -> Option<&Animal> {
        self.animal.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.animal.is_some()
    }

    pub fn current_image_index(&self) -> usize {
        self.current_image_index
    }

    pub fn image_count(&self) -> usize {
        self.animal.as_ref().map_or(0, |animal| animal.images().len())
    }

    /// Carousel controls only make sense with more than one photo.
    pub fn has_carousel(&self) -> bool {
        self.image_count() > 1
    }

    pub fn next(&mut self) {
        let count = self.image_count();
        if count > 1 {
            self.current_image_index = (self.current_image_index + 1) % count;
        }
    }

    pub fn previous(&mut self) {
        let count = self.image_count();
        if count > 1 {
            self.current_image_index = (self.current_image_index + count - 1) % count;
        }
    }

    pub fn current_image(&self) -> Option<&str> {
        let animal = self.animal.as_ref()?;
        let images = animal.images();
        images
            .get(self.current_image_index % images.len())
            .map(String::as_str)
    }

    /// The current photo resolved for display, or the panel placeholder.
    pub fn resolved_image(&self, resolver: &dyn ImageResolver) -> Option<String> {
        let reference = self.current_image()?;
        Some(resolver.resolve_or(reference, PANEL_IMAGE_PLACEHOLDER))
    }

    /// `n/total`, 1-based.
    pub fn counter_label(&self) -> Option<String> {
        let count = self.image_count();
        (count > 0).then(|| format!("{}/{}", self.current_image_index + 1, count))
    }

    pub fn status(&self) -> Option<ConservationStatus> {
        self.animal.as_ref().map(Animal::conservation_status)
    }
}
