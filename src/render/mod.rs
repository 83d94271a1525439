// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering for the site plan.
//!
//! Two back ends consume the same [`crate::layout::ZoneLayout`] list: an SVG document writer and
//! a terminal rasterizer that maps the 1000x600 canvas onto character cells.

use std::fmt;

use thiserror::Error;

pub mod svg;
pub mod terminal;
pub(crate) mod text;

pub use svg::{render_svg, SvgOptions};
pub use terminal::{rasterize, CellKind, MapRaster};

pub const UNICODE_BOX_HORIZONTAL: char = '─';
pub const UNICODE_BOX_VERTICAL: char = '│';
pub const UNICODE_BOX_TOP_LEFT: char = '┌';
pub const UNICODE_BOX_TOP_RIGHT: char = '┐';
pub const UNICODE_BOX_BOTTOM_LEFT: char = '└';
pub const UNICODE_BOX_BOTTOM_RIGHT: char = '┘';
pub const UNICODE_BOX_TEE_RIGHT: char = '├';
pub const UNICODE_BOX_TEE_LEFT: char = '┤';
pub const UNICODE_BOX_TEE_DOWN: char = '┬';
pub const UNICODE_BOX_TEE_UP: char = '┴';
pub const UNICODE_BOX_CROSS: char = '┼';

/// Outline point with no neighbors on the same outline.
const ISOLATED_OUTLINE: char = '·';

/// Line directions leaving a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxEdges(u8);

impl BoxEdges {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const UP: Self = Self(1 << 2);
    pub const DOWN: Self = Self(1 << 3);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    fn glyph(self) -> char {
        match self.0 {
            0 => ISOLATED_OUTLINE,
            1..=3 => UNICODE_BOX_HORIZONTAL,
            4 | 8 | 12 => UNICODE_BOX_VERTICAL,
            10 => UNICODE_BOX_TOP_LEFT,
            9 => UNICODE_BOX_TOP_RIGHT,
            6 => UNICODE_BOX_BOTTOM_LEFT,
            5 => UNICODE_BOX_BOTTOM_RIGHT,
            14 => UNICODE_BOX_TEE_RIGHT,
            13 => UNICODE_BOX_TEE_LEFT,
            11 => UNICODE_BOX_TEE_DOWN,
            7 => UNICODE_BOX_TEE_UP,
            _ => UNICODE_BOX_CROSS,
        }
    }
}

/// A fixed-size, bounds-checked character grid.
///
/// Cells hold either a plain character or a set of outline edges. Edge cells render as the
/// box-drawing glyph for their edges, so outlines written cell by cell join up into corners and
/// tees without the writer choosing glyphs. Writing a plain character replaces any edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    edges: Vec<BoxEdges>,
}

impl Canvas {
    /// Creates a new canvas filled with spaces (`' '`).
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        Self::new_filled(width, height, ' ')
    }

    pub fn new_filled(width: usize, height: usize, fill: char) -> Result<Self, CanvasError> {
        let len = width
            .checked_mul(height)
            .ok_or(CanvasError::AreaOverflow { width, height })?;

        Ok(Self {
            width,
            height,
            cells: vec![fill; len],
            edges: vec![BoxEdges::NONE; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.render_at(idx))
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = ch;
        self.edges[idx] = BoxEdges::NONE;
        Ok(())
    }

    /// Marks `(x, y)` as an outline cell with the given edges, merging with edges already there.
    pub fn add_edges(&mut self, x: usize, y: usize, edges: BoxEdges) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.edges[idx] = self.edges[idx].union(edges);
        // An outline with no edges still has to show up.
        if edges.is_empty() {
            self.cells[idx] = ISOLATED_OUTLINE;
        }
        Ok(())
    }

    pub fn is_outline(&self, x: usize, y: usize) -> Result<bool, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(!self.edges[idx].is_empty() || self.cells[idx] == ISOLATED_OUTLINE)
    }

    pub fn fill(&mut self, ch: char) {
        self.cells.fill(ch);
        self.edges.fill(BoxEdges::NONE);
    }

    /// Writes `text` left-to-right starting at `(x, y)`, clipping at the right edge.
    pub fn write_str(&mut self, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
        if y >= self.height {
            return Err(CanvasError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        for (offset, ch) in text.chars().enumerate() {
            let Some(cx) = x.checked_add(offset).filter(|cx| *cx < self.width) else {
                break;
            };
            self.set(cx, y, ch)?;
        }
        Ok(())
    }

    /// Rows as strings with trailing spaces removed.
    pub fn lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                let row: String = (0..self.width)
                    .map(|x| self.render_at(y * self.width + x))
                    .collect();
                row.trim_end_matches(' ').to_owned()
            })
            .collect()
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if !self.in_bounds(x, y) {
            return Err(CanvasError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        Ok((y * self.width) + x)
    }

    fn render_at(&self, idx: usize) -> char {
        let edges = self.edges[idx];
        if edges.is_empty() {
            self.cells[idx]
        } else {
            edges.glyph()
        }
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            for x in 0..self.width {
                f.write_char(self.render_at((y * self.width) + x))?;
            }

            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("canvas area overflow: {width}*{height}")]
    AreaOverflow { width: usize, height: usize },
    #[error("out of bounds: ({x},{y}) for {width}x{height} canvas")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}
