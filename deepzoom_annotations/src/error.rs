//! Error types for the annotation store and its components.
//!
//! All failures are synchronous return-path failures; no operation leaves
//! the store or index partially mutated after an error.

use thiserror::Error;

/// Errors from decoding or parsing annotation selectors.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// A shape kind outside the supported set. Surfaced to the caller rather
    /// than skipped, since silently dropping a shape would desynchronize the
    /// index from the annotations it serves.
    #[error("unsupported selector kind: '{kind}'")]
    UnsupportedKind { kind: String },

    /// A path selector using a command this crate does not flatten
    /// (elliptical arcs).
    #[error("unsupported path command: '{command}'")]
    UnsupportedPathCommand { command: char },

    /// A fragment selector value that is not of the form
    /// `xywh=[pixel:|percent:]x,y,w,h` with four non-negative finite numbers.
    #[error("malformed fragment selector: '{value}'")]
    MalformedFragment { value: String },

    /// A vector selector whose markup parsed but whose shape content is
    /// invalid (missing/invalid attributes, empty wrapper, bad path data).
    #[error("malformed vector selector: {message}")]
    MalformedSvg { message: String },

    /// The vector selector markup itself failed to parse.
    #[error("failed to parse vector selector markup: {0}")]
    Xml(#[from] roxmltree::Error),
}

impl SelectorError {
    /// Create a malformed vector selector error with a message.
    pub(crate) fn malformed_svg(message: impl Into<String>) -> Self {
        Self::MalformedSvg {
            message: message.into(),
        }
    }
}

/// Errors from the spatial index boundary.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A degenerate/NaN/inverted bounding box; rejected before any index
    /// mutation.
    #[error("invalid bounds: [{min_x}, {min_y}, {max_x}, {max_y}] (expected finite values with min <= max)")]
    InvalidBounds {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },

    /// A shape with no vertices to derive an extent from.
    #[error("invalid bounds: geometry has no vertices to derive an extent from")]
    EmptyBounds,
}

/// Errors from reading the viewport transform state.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The viewer reported a zero or non-finite scale (typically it has not
    /// been laid out yet). Surfaced instead of propagating NaN coordinates.
    #[error("invalid transform state: scale must be finite and positive (got {scale})")]
    InvalidScale { scale: f64 },

    /// The viewer reported a malformed visible extent.
    #[error("invalid transform state: extent [{min_x}, {min_y}, {max_x}, {max_y}] is not a valid bounding box")]
    InvalidExtent {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },
}

/// The main error type for annotation store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The annotation's target carries no selector to resolve a shape from.
    #[error("annotation '{id}' has no selector")]
    MissingSelector { id: String },

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}
