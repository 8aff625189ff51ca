use super::internal::hit_test::{point_in_circle, point_in_ellipse, point_in_ring};
use super::{Circle, Ellipse, Line, Path, Point, Polygon, Rect};
use crate::core::math::{BoundingBox, Vector2};
use crate::core::traits::Real;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The shape kinds this crate supports.
///
/// [GeometryKind::Point] is the decoded form of a degenerate fragment
/// selector (`w = h = 0`); the remaining kinds map one-to-one onto the
/// selector encodings.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Rect,
    Point,
    Polygon,
    Circle,
    Ellipse,
    Path,
    Line,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryKind::Rect => "rect",
            GeometryKind::Point => "point",
            GeometryKind::Polygon => "polygon",
            GeometryKind::Circle => "circle",
            GeometryKind::Ellipse => "ellipse",
            GeometryKind::Path => "path",
            GeometryKind::Line => "line",
        };
        f.write_str(name)
    }
}

/// Decoded annotation shape.
///
/// The enum is closed: every component operating on geometry (bounds,
/// hit-testing, viewport transform) matches exhaustively, so adding a kind is
/// a compiler-enforced update of each of them rather than a silent
/// fallthrough.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry<T = f64> {
    Rect(Rect<T>),
    Point(Point<T>),
    Polygon(Polygon<T>),
    Circle(Circle<T>),
    Ellipse(Ellipse<T>),
    Path(Path<T>),
    Line(Line<T>),
}

impl<T> Geometry<T>
where
    T: Real,
{
    /// The kind tag of this shape.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Rect(_) => GeometryKind::Rect,
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::Circle(_) => GeometryKind::Circle,
            Geometry::Ellipse(_) => GeometryKind::Ellipse,
            Geometry::Path(_) => GeometryKind::Path,
            Geometry::Line(_) => GeometryKind::Line,
        }
    }

    /// Returns `true` when this shape decoded from the degenerate point
    /// encoding and should be rendered as a point marker rather than a
    /// zero-area rectangle.
    #[inline]
    pub fn rendered_as_point(&self) -> bool {
        matches!(self, Geometry::Point(_))
    }

    /// Axis-aligned bounding box of the shape, computed analytically from
    /// the shape's own numeric fields.
    ///
    /// Returns `None` for shapes with no vertices to derive an extent from
    /// (an empty polygon or path).
    pub fn bounds(&self) -> Option<BoundingBox<T>> {
        match self {
            Geometry::Rect(rect) => Some(rect.bounds()),
            Geometry::Point(point) => Some(BoundingBox::from_point(point.position())),
            Geometry::Polygon(polygon) => BoundingBox::from_points(&polygon.vertices),
            Geometry::Circle(circle) => Some(BoundingBox::new(
                circle.center.x - circle.radius,
                circle.center.y - circle.radius,
                circle.center.x + circle.radius,
                circle.center.y + circle.radius,
            )),
            Geometry::Ellipse(ellipse) => Some(BoundingBox::new(
                ellipse.center.x - ellipse.radius_x,
                ellipse.center.y - ellipse.radius_y,
                ellipse.center.x + ellipse.radius_x,
                ellipse.center.y + ellipse.radius_y,
            )),
            Geometry::Path(path) => {
                let mut result: Option<BoundingBox<T>> = None;
                for subpath in &path.subpaths {
                    if let Some(bounds) = BoundingBox::from_points(&subpath.vertices) {
                        result = Some(match result {
                            Some(acc) => acc.union(&bounds),
                            None => bounds,
                        });
                    }
                }
                result
            }
            Geometry::Line(line) => Some(BoundingBox::of_corners(line.start, line.end)),
        }
    }

    /// Exact point-in-shape test.
    ///
    /// Point and line shapes have no interior and always report `false`
    /// here; the hit-tester accepts them straight from the buffered
    /// bounding-box pass instead. Path sub-paths are each treated as a
    /// closed ring.
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        match self {
            Geometry::Rect(rect) => rect.contains_point(point),
            Geometry::Point(_) | Geometry::Line(_) => false,
            Geometry::Polygon(polygon) => point_in_ring(&polygon.vertices, point),
            Geometry::Circle(circle) => point_in_circle(circle.center, circle.radius, point),
            Geometry::Ellipse(ellipse) => {
                point_in_ellipse(ellipse.center, ellipse.radius_x, ellipse.radius_y, point)
            }
            Geometry::Path(path) => path
                .subpaths
                .iter()
                .any(|subpath| point_in_ring(&subpath.vertices, point)),
        }
    }

    /// Fuzzy equal comparison with another shape using `fuzzy_epsilon`
    /// given. Shapes of different kinds never compare equal.
    pub fn fuzzy_eq_eps(&self, other: &Self, fuzzy_epsilon: T) -> bool {
        match (self, other) {
            (Geometry::Rect(a), Geometry::Rect(b)) => {
                a.x.fuzzy_eq_eps(b.x, fuzzy_epsilon)
                    && a.y.fuzzy_eq_eps(b.y, fuzzy_epsilon)
                    && a.width.fuzzy_eq_eps(b.width, fuzzy_epsilon)
                    && a.height.fuzzy_eq_eps(b.height, fuzzy_epsilon)
            }
            (Geometry::Point(a), Geometry::Point(b)) => {
                a.position().fuzzy_eq_eps(b.position(), fuzzy_epsilon)
            }
            (Geometry::Polygon(a), Geometry::Polygon(b)) => {
                vertices_fuzzy_eq(&a.vertices, &b.vertices, fuzzy_epsilon)
            }
            (Geometry::Circle(a), Geometry::Circle(b)) => {
                a.center.fuzzy_eq_eps(b.center, fuzzy_epsilon)
                    && a.radius.fuzzy_eq_eps(b.radius, fuzzy_epsilon)
            }
            (Geometry::Ellipse(a), Geometry::Ellipse(b)) => {
                a.center.fuzzy_eq_eps(b.center, fuzzy_epsilon)
                    && a.radius_x.fuzzy_eq_eps(b.radius_x, fuzzy_epsilon)
                    && a.radius_y.fuzzy_eq_eps(b.radius_y, fuzzy_epsilon)
            }
            (Geometry::Path(a), Geometry::Path(b)) => {
                a.subpaths.len() == b.subpaths.len()
                    && a.subpaths.iter().zip(&b.subpaths).all(|(sa, sb)| {
                        sa.closed == sb.closed
                            && vertices_fuzzy_eq(&sa.vertices, &sb.vertices, fuzzy_epsilon)
                    })
            }
            (Geometry::Line(a), Geometry::Line(b)) => {
                a.start.fuzzy_eq_eps(b.start, fuzzy_epsilon)
                    && a.end.fuzzy_eq_eps(b.end, fuzzy_epsilon)
            }
            _ => false,
        }
    }

    /// Fuzzy equal comparison with another shape using `T::fuzzy_epsilon()`.
    #[inline]
    pub fn fuzzy_eq(&self, other: &Self) -> bool {
        self.fuzzy_eq_eps(other, T::fuzzy_epsilon())
    }
}

fn vertices_fuzzy_eq<T>(a: &[Vector2<T>], b: &[Vector2<T>], fuzzy_epsilon: T) -> bool
where
    T: Real,
{
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(va, vb)| va.fuzzy_eq_eps(*vb, fuzzy_epsilon))
}
