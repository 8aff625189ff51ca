//! Viewport coordinate transform engine.
//!
//! Annotations are stored in image-space coordinates; rendering and input
//! happen in viewport-space coordinates. The mapping between the two is the
//! translate + uniform-scale pair `(extent, scale)` read from the host
//! viewer, where `extent` is the image-space region currently visible and
//! `scale` is viewport pixels per image pixel at the current zoom.

use crate::core::math::{vec2, BoundingBox, Vector2};
use crate::core::traits::Real;
use crate::error::TransformError;
use crate::geometry::{Circle, Ellipse, Geometry, Line, Path, Point, Polygon, Rect, SubPath};
use num_traits::ToPrimitive;

/// Read-only view of the host viewer's camera, queried per operation.
///
/// Rotation and flip are assumed normalized out by the viewer before the
/// values below are reported; the transform engine applies only the
/// translate + uniform-scale component.
pub trait ViewerState<T>
where
    T: Real,
{
    /// Current size of the viewer container, in viewport pixels.
    fn container_size(&self) -> (T, T);

    /// Current zoom level.
    fn current_zoom(&self) -> T;

    /// Native image pixels per viewport unit at zoom = 1.
    fn content_scale_factor(&self) -> T;

    /// The image-space region currently visible in the viewport.
    fn viewport_bounds_in_image_space(&self) -> BoundingBox<T>;
}

/// Validated `(extent, scale)` snapshot describing how image space maps to
/// viewport space at one instant.
///
/// Recompute on every viewport change (pan, zoom, rotation, flip, resize);
/// a snapshot is only valid for the current event-handling turn and must not
/// be cached across turns.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportTransform<T = f64> {
    extent: BoundingBox<T>,
    scale: T,
}

impl<T> ViewportTransform<T>
where
    T: Real,
{
    /// Create a transform from an image-space extent and a scale.
    ///
    /// Fails with [TransformError] when `scale` is zero or non-finite (the
    /// viewer has not been laid out yet) or the extent is malformed, instead
    /// of letting NaN coordinates propagate into geometry.
    pub fn new(extent: BoundingBox<T>, scale: T) -> Result<Self, TransformError> {
        if !scale.is_finite() || scale <= T::zero() {
            return Err(TransformError::InvalidScale {
                scale: scale.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !extent.is_valid() {
            return Err(TransformError::InvalidExtent {
                min_x: extent.min_x.to_f64().unwrap_or(f64::NAN),
                min_y: extent.min_y.to_f64().unwrap_or(f64::NAN),
                max_x: extent.max_x.to_f64().unwrap_or(f64::NAN),
                max_y: extent.max_y.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(ViewportTransform { extent, scale })
    }

    /// Read the current transform from the viewer:
    /// `scale = zoom * container_width / content_scale_factor` and the
    /// visible extent as reported by the viewer.
    pub fn from_viewer(viewer: &impl ViewerState<T>) -> Result<Self, TransformError> {
        let (container_width, _) = viewer.container_size();
        let scale = viewer.current_zoom() * container_width / viewer.content_scale_factor();
        Self::new(viewer.viewport_bounds_in_image_space(), scale)
    }

    /// The image-space region currently visible in the viewport.
    #[inline]
    pub fn extent(&self) -> BoundingBox<T> {
        self.extent
    }

    /// Viewport pixels per image pixel.
    #[inline]
    pub fn scale(&self) -> T {
        self.scale
    }

    /// Map an image-space point into viewport space.
    #[inline]
    pub fn point_to_viewport(&self, point: Vector2<T>) -> Vector2<T> {
        vec2(
            (point.x - self.extent.min_x) * self.scale,
            (point.y - self.extent.min_y) * self.scale,
        )
    }

    /// Map a viewport-space point back into image space.
    #[inline]
    pub fn point_to_image(&self, point: Vector2<T>) -> Vector2<T> {
        vec2(
            self.extent.min_x + point.x / self.scale,
            self.extent.min_y + point.y / self.scale,
        )
    }

    /// Map an image-space length (size or radius) into viewport space.
    #[inline]
    pub fn length_to_viewport(&self, length: T) -> T {
        length * self.scale
    }

    /// Map a viewport-space length back into image space.
    #[inline]
    pub fn length_to_image(&self, length: T) -> T {
        length / self.scale
    }

    /// Map an image-space shape into viewport space. Every vertex of a
    /// polygon or path is transformed independently.
    pub fn to_viewport_space(&self, geometry: &Geometry<T>) -> Geometry<T> {
        self.map_geometry(geometry, Self::point_to_viewport, Self::length_to_viewport)
    }

    /// Map a viewport-space shape back into image space. Exact inverse of
    /// [ViewportTransform::to_viewport_space] within floating point
    /// tolerance.
    pub fn to_image_space(&self, geometry: &Geometry<T>) -> Geometry<T> {
        self.map_geometry(geometry, Self::point_to_image, Self::length_to_image)
    }

    fn map_geometry(
        &self,
        geometry: &Geometry<T>,
        point_map: impl Fn(&Self, Vector2<T>) -> Vector2<T>,
        length_map: impl Fn(&Self, T) -> T,
    ) -> Geometry<T> {
        match geometry {
            Geometry::Rect(rect) => {
                let origin = point_map(self, vec2(rect.x, rect.y));
                Geometry::Rect(Rect::new(
                    origin.x,
                    origin.y,
                    length_map(self, rect.width),
                    length_map(self, rect.height),
                ))
            }
            // a point carries no size fields, only the coordinate pair moves
            Geometry::Point(point) => {
                let position = point_map(self, point.position());
                Geometry::Point(Point::new(position.x, position.y))
            }
            Geometry::Polygon(polygon) => Geometry::Polygon(Polygon::new(
                polygon
                    .vertices
                    .iter()
                    .map(|vertex| point_map(self, *vertex))
                    .collect(),
            )),
            Geometry::Circle(circle) => Geometry::Circle(Circle::new(
                point_map(self, circle.center),
                length_map(self, circle.radius),
            )),
            Geometry::Ellipse(ellipse) => Geometry::Ellipse(Ellipse::new(
                point_map(self, ellipse.center),
                length_map(self, ellipse.radius_x),
                length_map(self, ellipse.radius_y),
            )),
            Geometry::Path(path) => Geometry::Path(Path::new(
                path.subpaths
                    .iter()
                    .map(|subpath| {
                        SubPath::new(
                            subpath
                                .vertices
                                .iter()
                                .map(|vertex| point_map(self, *vertex))
                                .collect(),
                            subpath.closed,
                        )
                    })
                    .collect(),
            )),
            Geometry::Line(line) => Geometry::Line(Line::new(
                point_map(self, line.start),
                point_map(self, line.end),
            )),
        }
    }
}
