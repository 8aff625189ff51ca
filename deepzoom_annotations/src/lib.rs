//! Geometry engine for interactive annotation overlays on deep-zoom image
//! viewers.
//!
//! Annotations are stored in image-space coordinates inside a mutable R-tree
//! and queried either by intersection box or by point. Point queries run a
//! coarse bounding-box pass through the index followed by exact
//! point-in-shape tests per geometry kind, returning the hit with the
//! smallest bounding-box area (small shapes drawn on top win). A validated
//! `(extent, scale)` snapshot read from the host viewer converts geometry
//! between image space and viewport space, including the windowed mode used
//! for gigapixel imagery.
//!
//! # Examples
//!
//! ```
//! use deepzoom_annotations::{Annotation, AnnotationStore, ImageContext, Selector, Target};
//!
//! let image = ImageContext::new(1000, 1000, "http://example.com/image.jpg");
//! let mut store = AnnotationStore::<f64>::new(image);
//!
//! let selector = Selector::parse_fragment("xywh=pixel:10,10,40,20")?;
//! store.insert(Annotation::new("a1", Target::from_selector(selector)))?;
//!
//! assert!(store.query_point(20.0, 20.0, 0.0)?.is_some());
//! assert!(store.query_point(500.0, 500.0, 0.0)?.is_none());
//! # Ok::<(), deepzoom_annotations::StoreError>(())
//! ```

mod macros;

pub mod core;
pub mod error;
pub mod geometry;
pub mod index;
pub mod selector;
pub mod store;
pub mod transform;

pub use crate::core::math::{vec2, BoundingBox, Vector2};
pub use crate::core::traits::{FuzzyEq, FuzzyOrd, Real};
pub use crate::error::{IndexError, SelectorError, StoreError, TransformError};
pub use crate::geometry::{
    Circle, Ellipse, Geometry, GeometryKind, Line, Path, Point, Polygon, Rect, SubPath,
};
pub use crate::index::{IndexEntry, SpatialIndex};
pub use crate::selector::{FragmentSelector, FragmentUnit, Selector, SvgSelector};
pub use crate::store::{Annotation, AnnotationStore, ImageContext, PointQueryOptions, Target};
pub use crate::transform::{ViewerState, ViewportTransform};
