// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Laura: interactive visitor map of the «Лаура» enclosure complex.
//!
//! The catalog (animals and map zones) feeds a zone layout that two renderers consume: an SVG
//! writer and a terminal rasterizer. The terminal UI adds hover tooltips, a detail panel with a
//! photo carousel and a chat with a guide backed by an external text generator.

pub mod chat;
pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod panel;
pub mod render;
pub mod store;
pub mod tui;
pub mod ui;
