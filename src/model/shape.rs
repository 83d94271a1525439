// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Zone outlines expressed as SVG path data.
//!
//! Only the subset used by site plans is supported: `M`, `L`, `H`, `V`, `Q`, `T` and `Z` in both
//! absolute and relative form. Curves are flattened into polygons for hit-testing.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Logical canvas the site plan is drawn in.
pub const CANVAS_WIDTH: f64 = 1000.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

const QUAD_FLATTEN_STEPS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    Close,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("path data is empty")]
    Empty,
    #[error("unexpected character {ch:?} at byte {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("path must start with a moveto command")]
    MissingMoveTo,
    #[error("unsupported path command {0:?}")]
    UnsupportedCommand(char),
    #[error("command {command:?} expects {expected} coordinates")]
    MissingCoordinates { command: char, expected: usize },
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("path outline encloses no area")]
    Degenerate,
}

/// A closed zone outline.
///
/// The original path text is kept verbatim so SVG output round-trips exactly; the parsed segments
/// and flattened rings are derived from it once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    source: String,
    segments: Vec<PathSegment>,
    rings: Vec<Vec<Point>>,
    bounds: Bounds,
}

impl Shape {
    pub fn parse(path_data: impl Into<String>) -> Result<Self, ShapeError> {
        let source = path_data.into();
        let segments = parse_path(&source)?;
        let rings = flatten(&segments);
        let bounds = bounds_of(&rings).ok_or(ShapeError::Degenerate)?;
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(ShapeError::Degenerate);
        }

        Ok(Self {
            source,
            segments,
            rings,
            bounds,
        })
    }

    /// Axis-aligned rectangle with corners `(x0, y0)` and `(x1, y1)`.
    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Result<Self, ShapeError> {
        Self::parse(format!("M {x0},{y0} L {x1},{y0} L {x1},{y1} L {x0},{y1} Z"))
    }

    pub fn path_data(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Even-odd point-in-outline test on the flattened rings.
    pub fn contains(&self, point: Point) -> bool {
        if point.x < self.bounds.min.x
            || point.x > self.bounds.max.x
            || point.y < self.bounds.min.y
            || point.y > self.bounds.max.y
        {
            return false;
        }

        let mut inside = false;
        for ring in &self.rings {
            if ring_contains(ring, point) {
                inside = !inside;
            }
        }
        inside
    }
}

fn ring_contains(ring: &[Point], point: Point) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r"[A-Za-z]|[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?")
            .expect("static path token regex")
    })
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

fn tokenize(source: &str) -> Result<Vec<Token>, ShapeError> {
    let mut tokens = Vec::new();
    let mut cursor = 0usize;

    for found in token_regex().find_iter(source) {
        check_separators(source, cursor, found.start())?;
        cursor = found.end();

        let text = found.as_str();
        let first = text.chars().next().unwrap_or(' ');
        if first.is_ascii_alphabetic() && text.len() == 1 {
            tokens.push(Token::Command(first));
        } else {
            let value: f64 = text
                .parse()
                .map_err(|_| ShapeError::InvalidNumber(text.to_owned()))?;
            tokens.push(Token::Number(value));
        }
    }
    check_separators(source, cursor, source.len())?;

    Ok(tokens)
}

fn check_separators(source: &str, start: usize, end: usize) -> Result<(), ShapeError> {
    for (offset, ch) in source[start..end].char_indices() {
        if !ch.is_whitespace() && ch != ',' {
            return Err(ShapeError::UnexpectedChar {
                ch,
                offset: start + offset,
            });
        }
    }
    Ok(())
}

struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    fn has_number(&self) -> bool {
        matches!(self.tokens.get(self.pos), Some(Token::Number(_)))
    }

    fn numbers<const N: usize>(&mut self, command: char) -> Result<[f64; N], ShapeError> {
        let mut out = [0.0; N];
        for slot in &mut out {
            match self.tokens.get(self.pos) {
                Some(Token::Number(value)) => {
                    *slot = *value;
                    self.pos += 1;
                }
                _ => {
                    return Err(ShapeError::MissingCoordinates {
                        command,
                        expected: N,
                    })
                }
            }
        }
        Ok(out)
    }
}

fn parse_path(source: &str) -> Result<Vec<PathSegment>, ShapeError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(ShapeError::Empty);
    }

    let mut cursor = Cursor { tokens, pos: 0 };
    let mut segments = Vec::new();
    let mut current = Point::default();
    let mut subpath_start = Point::default();
    let mut last_quad_ctrl: Option<Point> = None;
    let mut started = false;

    while let Some(token) = cursor.tokens.get(cursor.pos).cloned() {
        cursor.pos += 1;
        let Token::Command(command) = token else {
            return Err(ShapeError::MissingMoveTo);
        };

        if !started && !matches!(command, 'M' | 'm') {
            return Err(ShapeError::MissingMoveTo);
        }
        started = true;

        let relative = command.is_ascii_lowercase();
        let offset = |p: Point, current: Point| {
            if relative {
                Point::new(current.x + p.x, current.y + p.y)
            } else {
                p
            }
        };

        match command.to_ascii_uppercase() {
            'M' => {
                let [x, y] = cursor.numbers::<2>(command)?;
                current = offset(Point::new(x, y), current);
                subpath_start = current;
                segments.push(PathSegment::MoveTo(current));
                last_quad_ctrl = None;
                // Extra coordinate pairs after a moveto are implicit linetos.
                while cursor.has_number() {
                    let [x, y] = cursor.numbers::<2>(command)?;
                    current = offset(Point::new(x, y), current);
                    segments.push(PathSegment::LineTo(current));
                }
            }
            'L' => loop {
                let [x, y] = cursor.numbers::<2>(command)?;
                current = offset(Point::new(x, y), current);
                segments.push(PathSegment::LineTo(current));
                last_quad_ctrl = None;
                if !cursor.has_number() {
                    break;
                }
            },
            'H' => loop {
                let [x] = cursor.numbers::<1>(command)?;
                current.x = if relative { current.x + x } else { x };
                segments.push(PathSegment::LineTo(current));
                last_quad_ctrl = None;
                if !cursor.has_number() {
                    break;
                }
            },
            'V' => loop {
                let [y] = cursor.numbers::<1>(command)?;
                current.y = if relative { current.y + y } else { y };
                segments.push(PathSegment::LineTo(current));
                last_quad_ctrl = None;
                if !cursor.has_number() {
                    break;
                }
            },
            'Q' => loop {
                let [cx, cy, x, y] = cursor.numbers::<4>(command)?;
                let ctrl = offset(Point::new(cx, cy), current);
                let to = offset(Point::new(x, y), current);
                segments.push(PathSegment::QuadTo { ctrl, to });
                last_quad_ctrl = Some(ctrl);
                current = to;
                if !cursor.has_number() {
                    break;
                }
            },
            'T' => loop {
                let [x, y] = cursor.numbers::<2>(command)?;
                let ctrl = match last_quad_ctrl {
                    Some(prev) => Point::new(2.0 * current.x - prev.x, 2.0 * current.y - prev.y),
                    None => current,
                };
                let to = offset(Point::new(x, y), current);
                segments.push(PathSegment::QuadTo { ctrl, to });
                last_quad_ctrl = Some(ctrl);
                current = to;
                if !cursor.has_number() {
                    break;
                }
            },
            'Z' => {
                segments.push(PathSegment::Close);
                current = subpath_start;
                last_quad_ctrl = None;
            }
            _ => return Err(ShapeError::UnsupportedCommand(command)),
        }
    }

    Ok(segments)
}

fn flatten(segments: &[PathSegment]) -> Vec<Vec<Point>> {
    let mut rings = Vec::<Vec<Point>>::new();
    let mut ring = Vec::<Point>::new();
    let mut current = Point::default();

    for segment in segments {
        match *segment {
            PathSegment::MoveTo(p) => {
                if ring.len() >= 3 {
                    rings.push(std::mem::take(&mut ring));
                }
                ring.clear();
                ring.push(p);
                current = p;
            }
            PathSegment::LineTo(p) => {
                ring.push(p);
                current = p;
            }
            PathSegment::QuadTo { ctrl, to } => {
                for step in 1..=QUAD_FLATTEN_STEPS {
                    let t = step as f64 / QUAD_FLATTEN_STEPS as f64;
                    let mt = 1.0 - t;
                    ring.push(Point::new(
                        mt * mt * current.x + 2.0 * mt * t * ctrl.x + t * t * to.x,
                        mt * mt * current.y + 2.0 * mt * t * ctrl.y + t * t * to.y,
                    ));
                }
                current = to;
            }
            PathSegment::Close => {
                if let Some(first) = ring.first().copied() {
                    current = first;
                }
                if ring.len() >= 3 {
                    rings.push(std::mem::take(&mut ring));
                }
                ring.clear();
                ring.push(current);
            }
        }
    }

    if ring.len() >= 3 {
        rings.push(ring);
    }

    rings
}

fn bounds_of(rings: &[Vec<Point>]) -> Option<Bounds> {
    let mut points = rings.iter().flatten();
    let first = *points.next()?;
    let mut bounds = Bounds {
        min: first,
        max: first,
    };
    for p in points {
        bounds.min.x = bounds.min.x.min(p.x);
        bounds.min.y = bounds.min.y.min(p.y);
        bounds.max.x = bounds.max.x.max(p.x);
        bounds.max.y = bounds.max.y.max(p.y);
    }
    Some(bounds)
}
