// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Character-cell rendering of the site plan.
//!
//! Each cell samples the logical canvas at its center. The topmost zone containing that point owns
//! the cell; cells on the edge of their owner's region become outline glyphs. Labels are written
//! centered on the anchor cell and clipped to the zone.

use super::text::{text_len, truncate_with_ellipsis};
use super::{BoxEdges, Canvas, CanvasError};
use crate::layout::ZoneLayout;
use crate::model::{Point, CANVAS_HEIGHT, CANVAS_WIDTH};

const RIVER_TOP: f64 = 550.0;
const BRIDGE_LEFT: f64 = 525.0;
const BRIDGE_RIGHT: f64 = 555.0;
const BRIDGE_TOP: f64 = 545.0;

const RIVER_GLYPH: char = '≈';
const BRIDGE_GLYPH: char = '=';
const POND_ICON: &str = "><>";

/// What a cell shows; the TUI maps this to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Ground,
    River,
    Bridge,
    /// Interior of the zone at this index in the layout list.
    Zone(usize),
    Outline(usize),
    Label(usize),
}

impl CellKind {
    pub fn zone_index(self) -> Option<usize> {
        match self {
            Self::Zone(idx) | Self::Outline(idx) | Self::Label(idx) => Some(idx),
            _ => None,
        }
    }
}

/// The map rasterized for a `width` x `height` cell area.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRaster {
    canvas: Canvas,
    kinds: Vec<CellKind>,
}

impl MapRaster {
    pub fn width(&self) -> usize {
        self.canvas.width()
    }

    pub fn height(&self) -> usize {
        self.canvas.height()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn kind_at(&self, col: usize, row: usize) -> Option<CellKind> {
        if !self.canvas.in_bounds(col, row) {
            return None;
        }
        self.kinds.get(row * self.width() + col).copied()
    }

    /// Index into the layout list of the zone drawn at `(col, row)`.
    pub fn zone_at(&self, col: usize, row: usize) -> Option<usize> {
        self.kind_at(col, row).and_then(CellKind::zone_index)
    }

    /// Logical canvas point at the center of `(col, row)`.
    pub fn cell_to_logical(&self, col: usize, row: usize) -> Point {
        cell_center(col, row, self.width(), self.height())
    }

    /// Cell containing the logical point `p`, clamped into the raster.
    pub fn logical_to_cell(&self, p: Point) -> (usize, usize) {
        logical_to_cell(p, self.width(), self.height())
    }
}

fn cell_center(col: usize, row: usize, width: usize, height: usize) -> Point {
    Point::new(
        (col as f64 + 0.5) * CANVAS_WIDTH / width.max(1) as f64,
        (row as f64 + 0.5) * CANVAS_HEIGHT / height.max(1) as f64,
    )
}

fn logical_to_cell(p: Point, width: usize, height: usize) -> (usize, usize) {
    let scale = |value: f64, extent: f64, cells: usize| -> usize {
        let cell = (value / extent * cells as f64).floor();
        if cell <= 0.0 {
            0
        } else {
            (cell as usize).min(cells.saturating_sub(1))
        }
    };
    (
        scale(p.x, CANVAS_WIDTH, width),
        scale(p.y, CANVAS_HEIGHT, height),
    )
}

fn backdrop_at(p: Point) -> (CellKind, char) {
    if p.x >= BRIDGE_LEFT && p.x <= BRIDGE_RIGHT && p.y >= BRIDGE_TOP {
        (CellKind::Bridge, BRIDGE_GLYPH)
    } else if p.y >= RIVER_TOP {
        (CellKind::River, RIVER_GLYPH)
    } else {
        (CellKind::Ground, ' ')
    }
}

/// Rasterizes `layouts` (in drawing order) onto a `width` x `height` grid.
pub fn rasterize(
    layouts: &[ZoneLayout<'_>],
    width: usize,
    height: usize,
) -> Result<MapRaster, CanvasError> {
    let mut canvas = Canvas::new(width, height)?;
    let mut owners: Vec<Option<usize>> = Vec::with_capacity(width * height);
    let mut kinds: Vec<CellKind> = Vec::with_capacity(width * height);

    for row in 0..height {
        for col in 0..width {
            let p = cell_center(col, row, width, height);
            let owner = layouts
                .iter()
                .rposition(|layout| layout.zone.shape().contains(p));
            owners.push(owner);
            match owner {
                Some(idx) => kinds.push(CellKind::Zone(idx)),
                None => {
                    let (kind, glyph) = backdrop_at(p);
                    kinds.push(kind);
                    canvas.set(col, row, glyph)?;
                }
            }
        }
    }

    let owner_at = |col: isize, row: isize| -> Option<usize> {
        if col < 0 || row < 0 || col as usize >= width || row as usize >= height {
            return None;
        }
        owners[row as usize * width + col as usize]
    };

    // Outline cells: owned cells with any of their eight neighbors owned by someone else.
    let mut outline = vec![false; width * height];
    for row in 0..height {
        for col in 0..width {
            let Some(owner) = owners[row * width + col] else {
                continue;
            };
            let (c, r) = (col as isize, row as isize);
            let on_edge = (-1..=1)
                .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
                .filter(|&(dx, dy)| dx != 0 || dy != 0)
                .any(|(dx, dy)| owner_at(c + dx, r + dy) != Some(owner));
            outline[row * width + col] = on_edge;
        }
    }

    for row in 0..height {
        for col in 0..width {
            let idx = row * width + col;
            if !outline[idx] {
                continue;
            }
            let owner = owners[idx];
            let joins = |ncol: usize, nrow: usize| {
                outline[nrow * width + ncol] && owners[nrow * width + ncol] == owner
            };

            let mut edges = BoxEdges::NONE;
            if col > 0 && joins(col - 1, row) {
                edges = edges.union(BoxEdges::LEFT);
            }
            if col + 1 < width && joins(col + 1, row) {
                edges = edges.union(BoxEdges::RIGHT);
            }
            if row > 0 && joins(col, row - 1) {
                edges = edges.union(BoxEdges::UP);
            }
            if row + 1 < height && joins(col, row + 1) {
                edges = edges.union(BoxEdges::DOWN);
            }
            canvas.add_edges(col, row, edges)?;
            if let Some(zone_idx) = owner {
                kinds[idx] = CellKind::Outline(zone_idx);
            }
        }
    }

    let mut raster = MapRaster { canvas, kinds };
    for (zone_idx, layout) in layouts.iter().enumerate() {
        write_label(&mut raster, &owners, zone_idx, layout)?;
    }
    Ok(raster)
}

fn write_label(
    raster: &mut MapRaster,
    owners: &[Option<usize>],
    zone_idx: usize,
    layout: &ZoneLayout<'_>,
) -> Result<(), CanvasError> {
    let (width, height) = (raster.width(), raster.height());
    if width == 0 || height == 0 {
        return Ok(());
    }

    let (anchor_col, anchor_row) = logical_to_cell(layout.label_anchor(), width, height);
    let bounds = layout.zone.shape().bounds();
    let (left, _) = logical_to_cell(bounds.min, width, height);
    let (right, _) = logical_to_cell(bounds.max, width, height);
    let room = right.saturating_sub(left).saturating_sub(1).max(1);

    let mut lines: Vec<String> = layout
        .label
        .iter()
        .flat_map(|label| label.lines())
        .map(|line| truncate_with_ellipsis(line, room))
        .collect();
    if layout.is_pond() {
        lines.push(POND_ICON.to_owned());
    }

    for (offset, line) in lines.iter().enumerate() {
        let row = anchor_row + offset;
        if row >= height {
            break;
        }
        let len = text_len(line);
        let start = anchor_col.saturating_sub(len / 2);
        for (i, ch) in line.chars().enumerate() {
            let col = start + i;
            if col >= width || owners[row * width + col] != Some(zone_idx) {
                continue;
            }
            raster.canvas.set(col, row, ch)?;
            raster.kinds[row * width + col] = CellKind::Label(zone_idx);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{rasterize, CellKind};
    use crate::layout::layout_zones;
    use crate::model::{Animal, AnimalCategory, AnimalId, Catalog, ConservationStatus, MapZone};
    use crate::model::{Point, Shape, ZoneId};
    use crate::store::builtin_catalog;

    fn single_zone_catalog() -> Catalog {
        let animal = Animal::new(
            AnimalId::new("wolf").unwrap(),
            "Волк",
            AnimalCategory::Mammal,
            ConservationStatus::LeastConcern,
            vec!["/animals/wolf/1.jpg".to_owned()],
        )
        .unwrap();
        let zone = MapZone::new(
            ZoneId::new("z-wolf").unwrap(),
            AnimalId::new("wolf").unwrap(),
            Shape::rect(100.0, 100.0, 500.0, 400.0).unwrap(),
            Point::new(300.0, 250.0),
        );
        Catalog::new([animal], vec![zone]).unwrap()
    }

    #[test]
    fn rectangle_becomes_a_box_with_a_centered_label() {
        let catalog = single_zone_catalog();
        let layouts = layout_zones(&catalog, None, None);
        let raster = rasterize(&layouts, 20, 12).unwrap();

        let lines = raster.canvas().lines();
        assert_eq!(lines[2], "  ┌──────┐");
        assert_eq!(lines[5], "  │ ВОЛК │");
        assert_eq!(lines[7], "  └──────┘");
        assert_eq!(raster.zone_at(5, 4), Some(0));
        assert_eq!(raster.kind_at(2, 2), Some(CellKind::Outline(0)));
        assert_eq!(raster.kind_at(5, 5), Some(CellKind::Label(0)));
        assert_eq!(raster.zone_at(15, 4), None);
        assert_eq!(raster.kind_at(0, 11), Some(CellKind::River));
    }

    #[test]
    fn builtin_zones_are_hit_at_their_anchor_cells() {
        let catalog = builtin_catalog().unwrap();
        let layouts = layout_zones(&catalog, None, None);
        let raster = rasterize(&layouts, 200, 60).unwrap();

        for (idx, zone) in catalog.zones().iter().enumerate() {
            let (col, row) = raster.logical_to_cell(zone.label_anchor());
            assert_eq!(raster.zone_at(col, row), Some(idx), "zone {}", zone.id());
        }
        let (col, row) = raster.logical_to_cell(Point::new(540.0, 580.0));
        assert_eq!(raster.kind_at(col, row), Some(CellKind::Bridge));
    }

    #[test]
    fn cell_mapping_round_trips_through_centers() {
        let catalog = builtin_catalog().unwrap();
        let layouts = layout_zones(&catalog, None, None);
        let raster = rasterize(&layouts, 100, 30).unwrap();
        for (col, row) in [(0, 0), (57, 12), (99, 29)] {
            let p = raster.cell_to_logical(col, row);
            assert_eq!(raster.logical_to_cell(p), (col, row));
        }
    }

    #[test]
    fn empty_area_is_fine() {
        let catalog = builtin_catalog().unwrap();
        let layouts = layout_zones(&catalog, None, None);
        let raster = rasterize(&layouts, 0, 0).unwrap();
        assert_eq!(raster.zone_at(0, 0), None);
    }
}
