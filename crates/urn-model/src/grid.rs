//! Integer grid coordinates for exterior cells.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of one exterior cell in its worldspace grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const ORIGIN: GridPoint = GridPoint { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive rectangle of grid points.
///
/// A bounds whose `min` exceeds `max` on either axis contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBounds {
    pub min: GridPoint,
    pub max: GridPoint,
}

impl GridBounds {
    pub const fn new(min: GridPoint, max: GridPoint) -> Self {
        Self { min, max }
    }

    /// Smallest bounds containing every point, or `None` for no points.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a GridPoint>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let mut bounds = Self::new(first, first);
        for point in points {
            bounds.min.x = bounds.min.x.min(point.x);
            bounds.min.y = bounds.min.y.min(point.y);
            bounds.max.x = bounds.max.x.max(point.x);
            bounds.max.y = bounds.max.y.max(point.y);
        }
        Some(bounds)
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn contains(&self, point: GridPoint) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }

    /// Overlap of two bounds, `None` when they are disjoint.
    pub fn intersect(&self, other: &GridBounds) -> Option<GridBounds> {
        let bounds = GridBounds {
            min: GridPoint::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: GridPoint::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        (!bounds.is_empty()).then_some(bounds)
    }

    /// Number of grid points inside, zero when empty.
    pub fn area(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let width = (i64::from(self.max.x) - i64::from(self.min.x) + 1) as u64;
        let height = (i64::from(self.max.y) - i64::from(self.min.y) + 1) as u64;
        width * height
    }

    /// Row-major iteration, `y` outer, `x` inner.
    pub fn points(&self) -> impl Iterator<Item = GridPoint> + '_ {
        let (min, max) = (self.min, self.max);
        let empty = self.is_empty();
        (min.y..=max.y)
            .filter(move |_| !empty)
            .flat_map(move |y| (min.x..=max.x).map(move |x| GridPoint::new(x, y)))
    }
}
