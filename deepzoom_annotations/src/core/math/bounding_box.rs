use super::{min_max, Vector2};
use crate::core::traits::Real;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// A box is well formed when all components are finite and `min_x <= max_x`,
/// `min_y <= max_y` ([BoundingBox::is_valid]). Boxes are derived from
/// geometry and never persisted; the spatial index rejects malformed boxes at
/// its boundary.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox<T = f64> {
    pub min_x: T,
    pub min_y: T,
    pub max_x: T,
    pub max_y: T,
}

impl<T> BoundingBox<T>
where
    T: Real,
{
    /// Create a new bounding box from its corner components.
    #[inline]
    pub fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a degenerate bounding box covering a single point.
    #[inline]
    pub fn from_point(point: Vector2<T>) -> Self {
        Self::new(point.x, point.y, point.x, point.y)
    }

    /// Create the bounding box of a set of points.
    ///
    /// Returns `None` when `points` is empty.
    pub fn from_points(points: &[Vector2<T>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::from_point(*first);
        for point in rest {
            bounds.min_x = bounds.min_x.min(point.x);
            bounds.min_y = bounds.min_y.min(point.y);
            bounds.max_x = bounds.max_x.max(point.x);
            bounds.max_y = bounds.max_y.max(point.y);
        }
        Some(bounds)
    }

    /// Create the bounding box spanned by two corner points in any order.
    #[inline]
    pub fn of_corners(p1: Vector2<T>, p2: Vector2<T>) -> Self {
        let (min_x, max_x) = min_max(p1.x, p2.x);
        let (min_y, max_y) = min_max(p1.y, p2.y);
        Self::new(min_x, min_y, max_x, max_y)
    }

    #[inline]
    pub fn width(&self) -> T {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> T {
        self.max_y - self.min_y
    }

    /// Area of the box. Degenerate (point/line) boxes have zero area.
    #[inline]
    pub fn area(&self) -> T {
        self.width() * self.height()
    }

    /// Returns `true` when all components are finite and mins do not exceed
    /// maxes.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    /// Returns `true` if this box and `other` overlap or touch.
    ///
    /// # Examples
    ///
    /// ```
    /// # use deepzoom_annotations::core::math::BoundingBox;
    /// let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    /// assert!(a.intersects(&BoundingBox::new(5.0, 5.0, 15.0, 15.0)));
    /// assert!(!a.intersects(&BoundingBox::new(20.0, 20.0, 30.0, 30.0)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Returns `true` if `point` lies inside the box (edges inclusive).
    #[inline]
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Returns the box grown by `buffer` on every side.
    #[inline]
    pub fn expanded(&self, buffer: T) -> Self {
        Self::new(
            self.min_x - buffer,
            self.min_y - buffer,
            self.max_x + buffer,
            self.max_y + buffer,
        )
    }

    /// Returns the smallest box covering both this box and `other`.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Fuzzy equal comparison with another box using `fuzzy_epsilon` given.
    pub fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: T) -> bool {
        self.min_x.fuzzy_eq_eps(other.min_x, fuzzy_epsilon)
            && self.min_y.fuzzy_eq_eps(other.min_y, fuzzy_epsilon)
            && self.max_x.fuzzy_eq_eps(other.max_x, fuzzy_epsilon)
            && self.max_y.fuzzy_eq_eps(other.max_y, fuzzy_epsilon)
    }

    /// Fuzzy equal comparison with another box using `T::fuzzy_epsilon()`.
    #[inline]
    pub fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, T::fuzzy_epsilon())
    }
}
