//! Core/common math types for 2D annotation geometry.
mod base_math;
mod bounding_box;
mod vector2;

pub use base_math::*;
pub use bounding_box::BoundingBox;
pub use vector2::{vec2, Vector2};
