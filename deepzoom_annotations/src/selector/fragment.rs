use crate::core::traits::Real;
use crate::error::SelectorError;
use crate::geometry::{Geometry, Point, Rect};
use crate::store::ImageContext;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coordinate unit of a fragment selector.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FragmentUnit {
    /// Image pixels.
    Pixel,
    /// Percent of the image's natural size, resolved at decode time.
    Percent,
}

/// Axis-aligned box selector parsed from a media fragment string.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FragmentSelector<T = f64> {
    pub x: T,
    pub y: T,
    pub w: T,
    pub h: T,
    pub unit: FragmentUnit,
}

impl<T> FragmentSelector<T>
where
    T: Real,
{
    /// Create a pixel-unit fragment selector.
    #[inline]
    pub fn pixels(x: T, y: T, w: T, h: T) -> Self {
        FragmentSelector {
            x,
            y,
            w,
            h,
            unit: FragmentUnit::Pixel,
        }
    }

    /// Parse a wire value of the form `xywh=[pixel:|percent:]x,y,w,h`.
    ///
    /// A missing unit prefix means pixels. All four values must be
    /// non-negative finite numbers.
    ///
    /// # Examples
    ///
    /// ```
    /// # use deepzoom_annotations::selector::{FragmentSelector, FragmentUnit};
    /// let fragment: FragmentSelector = FragmentSelector::parse("xywh=pixel:10,20,30,40")?;
    /// assert_eq!(fragment.x, 10.0);
    /// assert_eq!(fragment.h, 40.0);
    /// assert_eq!(fragment.unit, FragmentUnit::Pixel);
    /// # Ok::<(), deepzoom_annotations::SelectorError>(())
    /// ```
    pub fn parse(value: &str) -> Result<Self, SelectorError> {
        let malformed = || SelectorError::MalformedFragment {
            value: value.to_string(),
        };

        let rest = value.trim().strip_prefix("xywh=").ok_or_else(malformed)?;
        let (unit, coords) = if let Some(coords) = rest.strip_prefix("pixel:") {
            (FragmentUnit::Pixel, coords)
        } else if let Some(coords) = rest.strip_prefix("percent:") {
            (FragmentUnit::Percent, coords)
        } else {
            (FragmentUnit::Pixel, rest)
        };

        let mut components = [T::zero(); 4];
        let mut count = 0;
        for token in coords.split(',') {
            if count == components.len() {
                return Err(malformed());
            }
            let parsed = token.trim().parse::<f64>().map_err(|_| malformed())?;
            if !parsed.is_finite() || parsed < 0.0 {
                return Err(malformed());
            }
            components[count] = T::from(parsed).ok_or_else(malformed)?;
            count += 1;
        }
        if count != components.len() {
            return Err(malformed());
        }

        let [x, y, w, h] = components;
        Ok(FragmentSelector { x, y, w, h, unit })
    }

    /// Serialize back to the wire form.
    pub fn to_value(&self) -> String {
        let unit = match self.unit {
            FragmentUnit::Pixel => "pixel",
            FragmentUnit::Percent => "percent",
        };
        format!("xywh={}:{},{},{},{}", unit, self.x, self.y, self.w, self.h)
    }

    /// Decode into geometry, resolving percent units against the image's
    /// natural size. The degenerate `w = h = 0` form decodes to a point.
    pub(crate) fn decode(&self, image: &ImageContext) -> Geometry<T> {
        let (x, y, w, h) = match self.unit {
            FragmentUnit::Pixel => (self.x, self.y, self.w, self.h),
            FragmentUnit::Percent => {
                let (native_w, native_h) = image.native_size::<T>();
                let hundred = T::from(100.0).unwrap();
                (
                    self.x / hundred * native_w,
                    self.y / hundred * native_h,
                    self.w / hundred * native_w,
                    self.h / hundred * native_h,
                )
            }
        };

        if w == T::zero() && h == T::zero() {
            Geometry::Point(Point::new(x, y))
        } else {
            Geometry::Rect(Rect::new(x, y, w, h))
        }
    }
}
