// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Zone layout for the site plan.
//!
//! This module decides how each zone looks for a given hover/active state and how its label is
//! broken into lines. Renderers consume the result without further decisions.

pub mod label;
pub mod zone;

pub use label::{label_font_px, wrap_label, LabelLines, LabelSpan, ZoneLabel, LINE_ADVANCE_EM};
pub use zone::{layout_zones, ZoneLayout, ZoneStyle, ZoneVisualState};
