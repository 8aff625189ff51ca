//! Annotation shape model: the decoded, kind-specific numeric geometry used
//! by bounds computation, hit-testing, and the viewport transform engine.
mod internal;
mod model;
mod shapes;

pub use model::{Geometry, GeometryKind};
pub use shapes::*;
