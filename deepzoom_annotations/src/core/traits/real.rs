use super::FuzzyOrd;
use rstar::RTreeNum;

/// Trait representing a real number scalar usable for annotation geometry.
///
/// Bundles the floating point operations needed by the codec and transform
/// engine ([num_traits::Float], which includes finiteness checks for bounds
/// validation), fuzzy comparison, and the numeric bound required to key the
/// spatial index ([rstar::RTreeNum]). Implemented for `f32` and `f64`; all
/// public geometry types default to `f64`.
pub trait Real:
    num_traits::Float + FuzzyOrd + RTreeNum + std::default::Default + std::fmt::Display + 'static
{
}

impl Real for f32 {}

impl Real for f64 {}
