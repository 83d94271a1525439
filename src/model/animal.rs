// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::AnimalId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnimalCategory {
    Mammal,
    Bird,
}

/// IUCN conservation status, ordered from least to most threatened.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum ConservationStatus {
    #[serde(rename = "LC")]
    LeastConcern,
    #[serde(rename = "NT")]
    NearThreatened,
    #[serde(rename = "VU")]
    Vulnerable,
    #[serde(rename = "EN")]
    Endangered,
    #[serde(rename = "CR")]
    CriticallyEndangered,
}

impl ConservationStatus {
    pub fn code(self) -> &'static str {
        match self {
            Self::LeastConcern => "LC",
            Self::NearThreatened => "NT",
            Self::Vulnerable => "VU",
            Self::Endangered => "EN",
            Self::CriticallyEndangered => "CR",
        }
    }

    /// Visitor-facing label shown on the detail panel badge.
    pub fn label(self) -> &'static str {
        match self {
            Self::LeastConcern => "Наименьшие опасения",
            Self::NearThreatened => "Близок к уязвимому",
            Self::Vulnerable => "Уязвимый",
            Self::Endangered => "Вымирающий",
            Self::CriticallyEndangered => "На грани исчезновения",
        }
    }

    /// Badge color as `#RRGGBB`.
    pub fn badge_color(self) -> &'static str {
        match self {
            Self::LeastConcern => "#22c55e",
            Self::NearThreatened => "#eab308",
            Self::Vulnerable => "#f97316",
            Self::Endangered => "#ef4444",
            Self::CriticallyEndangered => "#b91c1c",
        }
    }
}

impl fmt::Display for ConservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimalError {
    #[error("animal {animal_id} has no images")]
    NoImages { animal_id: AnimalId },
}

/// One resident of the complex.
///
/// `images` is never empty; code that indexes into it may rely on that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animal {
    id: AnimalId,
    name: String,
    scientific_name: String,
    short_description: String,
    description: String,
    images: Vec<String>,
    category: AnimalCategory,
    conservation_status: ConservationStatus,
}

impl Animal {
    pub fn new(
        id: AnimalId,
        name: impl Into<String>,
        category: AnimalCategory,
        conservation_status: ConservationStatus,
        images: Vec<String>,
    ) -> Result<Self, AnimalError> {
        if images.is_empty() {
            return Err(AnimalError::NoImages { animal_id: id });
        }

        Ok(Self {
            id,
            name: name.into(),
            scientific_name: String::new(),
            short_description: String::new(),
            description: String::new(),
            images,
            category,
            conservation_status,
        })
    }

    pub fn with_scientific_name(mut self, scientific_name: impl Into<String>) -> Self {
        self.scientific_name = scientific_name.into();
        self
    }

    pub fn with_short_description(mut self, short_description: impl Into<String>) -> Self {
        self.short_description = short_description.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> &AnimalId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scientific_name(&self) -> &str {
        &self.scientific_name
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// First image, used by the hover tooltip.
    pub fn cover_image(&self) -> &str {
        &self.images[0]
    }

    pub fn category(&self) -> AnimalCategory {
        self.category
    }

    pub fn conservation_status(&self) -> ConservationStatus {
        self.conservation_status
    }
}

#[cfg(test)]
mod tests {
    use super::{Animal, AnimalCategory, AnimalError, ConservationStatus};
    use crate::model::AnimalId;

    #[test]
    fn conservation_status_orders_least_to_most_threatened() {
        use ConservationStatus::*;
        let mut statuses = vec![CriticallyEndangered, LeastConcern, Endangered, Vulnerable, NearThreatened];
        statuses.sort();
        assert_eq!(
            statuses,
            vec![LeastConcern, NearThreatened, Vulnerable, Endangered, CriticallyEndangered]
        );
    }

    #[test]
    fn conservation_status_uses_iucn_codes_on_the_wire() {
        for code in ["LC", "NT", "VU", "EN", "CR"] {
            let status: ConservationStatus = serde_json::from_str(&format!("\"{code}\"")).unwrap();
            assert_eq!(status.code(), code);
            assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{code}\""));
        }
        assert!(serde_json::from_str::<ConservationStatus>("\"XX\"").is_err());
    }

    #[test]
    fn category_is_lowercase_on_the_wire() {
        let bird: AnimalCategory = serde_json::from_str("\"bird\"").unwrap();
        assert_eq!(bird, AnimalCategory::Bird);
        assert_eq!(serde_json::to_string(&AnimalCategory::Mammal).unwrap(), "\"mammal\"");
        assert!(serde_json::from_str::<AnimalCategory>("\"Mammal\"").is_err());
    }

    #[test]
    fn animal_requires_at_least_one_image() {
        let id = AnimalId::new("wolf").unwrap();
        let err = Animal::new(
            id.clone(),
            "Волк",
            AnimalCategory::Mammal,
            ConservationStatus::LeastConcern,
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(err, AnimalError::NoImages { animal_id: id });
    }
}
