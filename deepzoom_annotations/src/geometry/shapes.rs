use crate::core::math::{BoundingBox, Vector2};
use crate::core::traits::Real;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle decoded from a fragment selector.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect<T = f64> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T> Rect<T>
where
    T: Real,
{
    #[inline]
    pub fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn bounds(&self) -> BoundingBox<T> {
        BoundingBox::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Returns `true` if `point` lies inside the rectangle (edges inclusive).
    #[inline]
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        self.bounds().contains_point(point)
    }
}

/// Point marker decoded from a degenerate (`w = h = 0`) fragment selector.
///
/// A point has no interior; hit-testing treats the buffered query box around
/// it as the entire hit target.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point<T = f64> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T>
where
    T: Real,
{
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn position(&self) -> Vector2<T> {
        Vector2::new(self.x, self.y)
    }
}

/// Closed polygon given by its vertex ring.
///
/// The ring is implicitly closed (last vertex connects back to the first).
/// Concave and self-intersecting rings are supported by hit-testing.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<T = f64> {
    pub vertices: Vec<Vector2<T>>,
}

impl<T> Polygon<T>
where
    T: Real,
{
    #[inline]
    pub fn new(vertices: Vec<Vector2<T>>) -> Self {
        Polygon { vertices }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Circle given by center and radius.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle<T = f64> {
    pub center: Vector2<T>,
    pub radius: T,
}

impl<T> Circle<T>
where
    T: Real,
{
    #[inline]
    pub fn new(center: Vector2<T>, radius: T) -> Self {
        Circle { center, radius }
    }
}

/// Ellipse given by center and per-axis radii.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ellipse<T = f64> {
    pub center: Vector2<T>,
    pub radius_x: T,
    pub radius_y: T,
}

impl<T> Ellipse<T>
where
    T: Real,
{
    #[inline]
    pub fn new(center: Vector2<T>, radius_x: T, radius_y: T) -> Self {
        Ellipse {
            center,
            radius_x,
            radius_y,
        }
    }
}

/// One flattened run of a path: a polyline that is either closed (`Z`) or
/// left open.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath<T = f64> {
    pub vertices: Vec<Vector2<T>>,
    pub closed: bool,
}

impl<T> SubPath<T>
where
    T: Real,
{
    #[inline]
    pub fn new(vertices: Vec<Vector2<T>>, closed: bool) -> Self {
        SubPath { vertices, closed }
    }
}

/// Multi-segment path decoded from SVG path data, flattened to polylines.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Path<T = f64> {
    pub subpaths: Vec<SubPath<T>>,
}

impl<T> Path<T>
where
    T: Real,
{
    #[inline]
    pub fn new(subpaths: Vec<SubPath<T>>) -> Self {
        Path { subpaths }
    }
}

/// Line segment between two endpoints.
///
/// Like [Point], a line has no interior; its bounding box is the hit target.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Line<T = f64> {
    pub start: Vector2<T>,
    pub end: Vector2<T>,
}

impl<T> Line<T>
where
    T: Real,
{
    #[inline]
    pub fn new(start: Vector2<T>, end: Vector2<T>) -> Self {
        Line { start, end }
    }
}
