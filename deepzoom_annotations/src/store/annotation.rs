use crate::core::traits::Real;
use crate::selector::Selector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An annotation: an opaque id plus the target it describes.
///
/// Annotations are never mutated in place; editing flows produce a
/// replacement via [Annotation::with_id] or [Annotation::with_target] and
/// re-insert it.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation<T = f64> {
    pub id: String,
    pub target: Target<T>,
}

impl<T> Annotation<T>
where
    T: Real,
{
    #[inline]
    pub fn new(id: impl Into<String>, target: Target<T>) -> Self {
        Annotation {
            id: id.into(),
            target,
        }
    }

    /// The selector this core resolves the annotation's shape from.
    #[inline]
    pub fn first_selector(&self) -> Option<&Selector<T>> {
        self.target.selectors.first()
    }

    /// Clone with a replaced id.
    pub fn with_id(&self, id: impl Into<String>) -> Self {
        Annotation {
            id: id.into(),
            target: self.target.clone(),
        }
    }

    /// Clone with a replaced target.
    pub fn with_target(&self, target: Target<T>) -> Self {
        Annotation {
            id: self.id.clone(),
            target,
        }
    }
}

/// The annotated region: one or more selectors describing the same shape in
/// different encodings. Only the first selector is used by this core.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Target<T = f64> {
    pub selectors: Vec<Selector<T>>,
}

impl<T> Target<T>
where
    T: Real,
{
    #[inline]
    pub fn new(selectors: Vec<Selector<T>>) -> Self {
        Target { selectors }
    }

    /// Target with a single selector.
    #[inline]
    pub fn from_selector(selector: Selector<T>) -> Self {
        Target {
            selectors: vec![selector],
        }
    }
}

/// Metadata of the image the annotations belong to.
///
/// Owned by the store instance: constructed on viewer-open and replaced
/// wholesale on page/image change. Passed explicitly into operations that
/// need it (percent fragment decoding) rather than living in shared mutable
/// state.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageContext {
    pub native_width: u32,
    pub native_height: u32,
    pub source_id: String,
}

impl ImageContext {
    #[inline]
    pub fn new(native_width: u32, native_height: u32, source_id: impl Into<String>) -> Self {
        ImageContext {
            native_width,
            native_height,
            source_id: source_id.into(),
        }
    }

    /// Natural size as scalars. `u32` always converts to a float, so the
    /// unwrap cannot fail.
    #[inline]
    pub(crate) fn native_size<T>(&self) -> (T, T)
    where
        T: Real,
    {
        (
            T::from(self.native_width).unwrap(),
            T::from(self.native_height).unwrap(),
        )
    }
}
