//! Coverage areas attached to region definitions.
//!
//! The index never inspects an area's shape. It asks for the area's
//! [`Coverage::extent`], walks the grid points inside it and keeps the ones
//! for which [`Coverage::contains`] holds. Shapes that can list their points
//! directly override [`Coverage::covered_points`].

use serde::{Deserialize, Serialize};

use crate::grid::{GridBounds, GridPoint};

/// Membership test over grid points.
pub trait Coverage {
    /// Bounds enclosing every covered point, `None` when nothing is covered.
    fn extent(&self) -> Option<GridBounds>;

    fn contains(&self, point: GridPoint) -> bool;

    /// Every covered point, optionally restricted to `clip`.
    ///
    /// Order is deterministic for a given area.
    fn covered_points(&self, clip: Option<&GridBounds>) -> Vec<GridPoint> {
        scan_extent(self, clip)
    }
}

/// Walks the area's extent (clipped) and keeps the points it contains.
///
/// Work is proportional to the area of the scanned extent. Without a clip
/// the full extent is walked, so large unbounded shapes should be indexed
/// against a worldspace with declared bounds.
pub fn scan_extent<C: Coverage + ?Sized>(area: &C, clip: Option<&GridBounds>) -> Vec<GridPoint> {
    let Some(extent) = area.extent() else {
        return Vec::new();
    };
    let scan = match clip {
        Some(clip) => match extent.intersect(clip) {
            Some(scan) => scan,
            None => return Vec::new(),
        },
        None => extent,
    };
    scan.points().filter(|point| area.contains(*point)).collect()
}

/// Area shapes carried in plugin data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoverageArea {
    /// Inclusive box between two corners.
    Rect { min: GridPoint, max: GridPoint },
    /// Explicit list of covered cells.
    Points { points: Vec<GridPoint> },
    /// Closed polygon in grid coordinates. Points on an edge are covered.
    Polygon { vertices: Vec<GridPoint> },
}

impl CoverageArea {
    pub fn rect(min: impl Into<GridPoint>, max: impl Into<GridPoint>) -> Self {
        Self::Rect {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn points<P: Into<GridPoint>>(points: impl IntoIterator<Item = P>) -> Self {
        Self::Points {
            points: points.into_iter().map(Into::into).collect(),
        }
    }

    pub fn polygon<P: Into<GridPoint>>(vertices: impl IntoIterator<Item = P>) -> Self {
        Self::Polygon {
            vertices: vertices.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the area cannot cover any point.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Rect { min, max } => GridBounds::new(*min, *max).is_empty(),
            Self::Points { points } => points.is_empty(),
            Self::Polygon { vertices } => vertices.len() < 3,
        }
    }
}

impl Coverage for CoverageArea {
    fn extent(&self) -> Option<GridBounds> {
        if self.is_degenerate() {
            return None;
        }
        match self {
            Self::Rect { min, max } => Some(GridBounds::new(*min, *max)),
            Self::Points { points } => GridBounds::enclosing(points),
            Self::Polygon { vertices } => GridBounds::enclosing(vertices),
        }
    }

    fn contains(&self, point: GridPoint) -> bool {
        match self {
            Self::Rect { min, max } => GridBounds::new(*min, *max).contains(point),
            Self::Points { points } => points.contains(&point),
            Self::Polygon { vertices } => polygon_contains(vertices, point),
        }
    }

    fn covered_points(&self, clip: Option<&GridBounds>) -> Vec<GridPoint> {
        match self {
            Self::Points { points } => points
                .iter()
                .copied()
                .filter(|point| clip.is_none_or(|clip| clip.contains(*point)))
                .collect(),
            _ => scan_extent(self, clip),
        }
    }
}

/// Crossing-number test in exact integer arithmetic, boundary inclusive.
///
/// Products of two coordinate differences reach 2^64, past the `i64` range.
fn polygon_contains(vertices: &[GridPoint], point: GridPoint) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let (px, py) = (i128::from(point.x), i128::from(point.y));
    let mut inside = false;
    for (index, a) in vertices.iter().enumerate() {
        let b = vertices[(index + 1) % vertices.len()];
        let (ax, ay) = (i128::from(a.x), i128::from(a.y));
        let (bx, by) = (i128::from(b.x), i128::from(b.y));

        let cross = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
        if cross == 0
            && (ax.min(bx)..=ax.max(bx)).contains(&px)
            && (ay.min(by)..=ay.max(by)).contains(&py)
        {
            return true;
        }

        if (ay > py) != (by > py) {
            let dy = by - ay;
            let lhs = (px - ax) * dy;
            let rhs = (py - ay) * (bx - ax);
            let crosses = if dy > 0 { lhs < rhs } else { lhs > rhs };
            if crosses {
                inside = !inside;
            }
        }
    }
    inside
}
