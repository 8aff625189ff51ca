//! Selector codec: the persisted wire encodings of annotation shapes.
//!
//! Two encodings exist. Fragment selectors carry an axis-aligned box as a
//! media fragment string (`xywh=pixel:x,y,w,h`, with `w = h = 0` as the
//! degenerate point form, and percent units resolved against the image's
//! natural size). Vector selectors carry a single-element SVG markup
//! fragment holding exactly one of `polygon`, `circle`, `ellipse`, `path`,
//! or `line`.
mod fragment;
mod svg;

pub use fragment::{FragmentSelector, FragmentUnit};
pub use svg::SvgSelector;

use crate::core::traits::Real;
use crate::error::SelectorError;
use crate::geometry::Geometry;
use crate::store::ImageContext;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Persisted shape description of an annotation target.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq)]
pub enum Selector<T = f64> {
    Fragment(FragmentSelector<T>),
    Svg(SvgSelector),
}

impl<T> Selector<T>
where
    T: Real,
{
    /// Parse a fragment selector wire value (`xywh=pixel:x,y,w,h`).
    pub fn parse_fragment(value: &str) -> Result<Self, SelectorError> {
        Ok(Selector::Fragment(FragmentSelector::parse(value)?))
    }

    /// Wrap a vector selector wire value (`<svg>...</svg>`).
    ///
    /// The markup is validated when the selector is decoded.
    pub fn svg(value: impl Into<String>) -> Self {
        Selector::Svg(SvgSelector::new(value))
    }

    /// Decode this selector into its geometry.
    ///
    /// `image` resolves percent fragment units against the image's natural
    /// size. Fails with [SelectorError::UnsupportedKind] for vector shapes
    /// outside the supported set, never silently.
    pub fn decode(&self, image: &ImageContext) -> Result<Geometry<T>, SelectorError> {
        match self {
            Selector::Fragment(fragment) => Ok(fragment.decode(image)),
            Selector::Svg(selector) => svg::decode(&selector.value),
        }
    }

    /// Encode a geometry back into a selector.
    ///
    /// Exact inverse of [Selector::decode] for every kind that round-trips:
    /// rectangles and points become pixel fragments (points the degenerate
    /// `w = h = 0` form), the remaining kinds become vector selectors.
    /// Percent fragments re-encode as pixels, since decoding resolved them.
    pub fn from_geometry(geometry: &Geometry<T>) -> Self {
        match geometry {
            Geometry::Rect(rect) => Selector::Fragment(FragmentSelector::pixels(
                rect.x,
                rect.y,
                rect.width,
                rect.height,
            )),
            Geometry::Point(point) => Selector::Fragment(FragmentSelector::pixels(
                point.x,
                point.y,
                T::zero(),
                T::zero(),
            )),
            Geometry::Polygon(polygon) => Selector::svg(svg::encode_polygon(polygon)),
            Geometry::Circle(circle) => Selector::svg(svg::encode_circle(circle)),
            Geometry::Ellipse(ellipse) => Selector::svg(svg::encode_ellipse(ellipse)),
            Geometry::Path(path) => Selector::svg(svg::encode_path(path)),
            Geometry::Line(line) => Selector::svg(svg::encode_line(line)),
        }
    }

    /// The wire value of this selector.
    pub fn value(&self) -> String {
        match self {
            Selector::Fragment(fragment) => fragment.to_value(),
            Selector::Svg(selector) => selector.value.clone(),
        }
    }
}
