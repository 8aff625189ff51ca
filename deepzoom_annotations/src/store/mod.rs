//! Annotation store: the façade composing codec, bounds, spatial index,
//! hit-testing, and viewport transforms into the query/mutation API consumed
//! by the rendering layer.
//!
//! One store exists per viewer instance and is the only mutator of its index;
//! readers query through `&self`. All operations run to completion
//! synchronously, and failed operations leave the store unchanged.
mod annotation;

pub use annotation::{Annotation, ImageContext, Target};

use crate::core::math::{vec2, BoundingBox, Vector2};
use crate::core::traits::Real;
use crate::error::{IndexError, StoreError};
use crate::geometry::Geometry;
use crate::index::{validate_bounds, IndexEntry, SpatialIndex};
use crate::selector::Selector;
use crate::transform::ViewportTransform;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Options for point queries.
///
/// The buffer grows the query point into a box so point and line annotations
/// (which have no interior) can be caught reliably. The right size is a
/// product decision; the default of 5 matches the common screen-pixel pick
/// tolerance, and [PointQueryOptions::scaled] converts it into image pixels
/// at the current zoom.
#[derive(Debug, Copy, Clone)]
pub struct PointQueryOptions<T = f64> {
    /// Image-space radius added around the query point.
    pub buffer: T,
}

impl<T> PointQueryOptions<T>
where
    T: Real,
{
    #[inline]
    pub fn new() -> Self {
        PointQueryOptions {
            buffer: T::from(5.0).unwrap(),
        }
    }

    /// The default buffer divided by the viewport scale, so the pick
    /// tolerance stays constant in screen pixels across zoom levels.
    #[inline]
    pub fn scaled(scale: T) -> Self {
        PointQueryOptions {
            buffer: T::from(5.0).unwrap() / scale,
        }
    }
}

impl<T> Default for PointQueryOptions<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Authoritative record of one live annotation: the annotation itself plus
/// its geometry, decoded once at insert time.
struct StoredAnnotation<T> {
    annotation: Annotation<T>,
    geometry: Geometry<T>,
}

/// Spatially indexed store of the annotations on one image.
pub struct AnnotationStore<T = f64>
where
    T: Real,
{
    image: ImageContext,
    annotations: BTreeMap<String, StoredAnnotation<T>>,
    index: SpatialIndex<T>,
}

impl<T> AnnotationStore<T>
where
    T: Real,
{
    /// Create an empty store for the image given.
    pub fn new(image: ImageContext) -> Self {
        AnnotationStore {
            image,
            annotations: BTreeMap::new(),
            index: SpatialIndex::new(),
        }
    }

    /// The image the stored annotations belong to.
    #[inline]
    pub fn image(&self) -> &ImageContext {
        &self.image
    }

    /// Replace the image context on page/image change.
    ///
    /// Annotations are tied to the image they were made on, so the store is
    /// cleared.
    pub fn replace_image(&mut self, image: ImageContext) {
        log::info!(
            "image context replaced ('{}' -> '{}'), dropping {} annotation(s)",
            self.image.source_id,
            image.source_id,
            self.annotations.len()
        );
        self.clear();
        self.image = image;
    }

    /// Number of stored annotations.
    #[inline]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Look up an annotation by id.
    pub fn get(&self, id: &str) -> Option<&Annotation<T>> {
        self.annotations.get(id).map(|stored| &stored.annotation)
    }

    /// The decoded geometry of a stored annotation.
    pub fn geometry_of(&self, id: &str) -> Option<&Geometry<T>> {
        self.annotations.get(id).map(|stored| &stored.geometry)
    }

    /// Iterate over all stored annotations in id order.
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation<T>> + '_ {
        self.annotations.values().map(|stored| &stored.annotation)
    }

    /// Decode and validate an annotation without mutating anything, so a
    /// failed insert leaves the store untouched.
    fn prepare(
        &self,
        annotation: &Annotation<T>,
    ) -> Result<(Geometry<T>, IndexEntry<T>), StoreError> {
        let selector = annotation
            .first_selector()
            .ok_or_else(|| StoreError::MissingSelector {
                id: annotation.id.clone(),
            })?;
        let geometry = selector.decode(&self.image)?;
        let bounds = geometry.bounds().ok_or(IndexError::EmptyBounds)?;
        validate_bounds(&bounds)?;
        Ok((geometry, IndexEntry::new(bounds, annotation.id.clone())))
    }

    /// Insert an annotation, replacing any existing annotation with the same
    /// id.
    ///
    /// Atomic: decoding and validation happen before any mutation, so either
    /// the annotation is fully indexed or the store is unchanged.
    pub fn insert(&mut self, annotation: Annotation<T>) -> Result<(), StoreError> {
        let (geometry, entry) = self.prepare(&annotation)?;
        self.index.insert(entry)?;
        log::debug!(
            "indexed annotation '{}' ({})",
            annotation.id,
            geometry.kind()
        );
        self.annotations.insert(
            annotation.id.clone(),
            StoredAnnotation {
                annotation,
                geometry,
            },
        );
        Ok(())
    }

    /// Insert a batch of annotations.
    ///
    /// The whole batch is decoded and validated first: on error nothing is
    /// inserted. An empty index takes the R-tree bulk-load path. When the
    /// same id appears more than once the last occurrence wins.
    pub fn insert_all(&mut self, annotations: Vec<Annotation<T>>) -> Result<(), StoreError> {
        let mut prepared = BTreeMap::new();
        for annotation in annotations {
            let (geometry, entry) = self.prepare(&annotation)?;
            prepared.insert(
                annotation.id.clone(),
                (
                    StoredAnnotation {
                        annotation,
                        geometry,
                    },
                    entry,
                ),
            );
        }

        let entries = prepared.values().map(|(_, entry)| entry.clone()).collect();
        self.index.insert_bulk(entries)?;
        log::debug!("indexed {} annotation(s)", prepared.len());
        for (id, (stored, _)) in prepared {
            self.annotations.insert(id, stored);
        }
        Ok(())
    }

    /// Remove an annotation by id, returning it.
    ///
    /// Removal is driven by id alone (no bounds re-derivation). A missing id
    /// is a no-op returning `None`.
    pub fn remove(&mut self, id: &str) -> Option<Annotation<T>> {
        self.index.remove(id);
        match self.annotations.remove(id) {
            Some(stored) => {
                log::debug!("removed annotation '{}'", id);
                Some(stored.annotation)
            }
            None => {
                log::trace!("remove of unknown annotation '{}' ignored", id);
                None
            }
        }
    }

    /// Drop all annotations. The store is reusable afterward.
    pub fn clear(&mut self) {
        log::debug!("cleared {} annotation(s)", self.annotations.len());
        self.index.clear();
        self.annotations.clear();
    }

    /// All annotations whose bounds intersect `bounds`, in no guaranteed
    /// order. Malformed boxes fail with [IndexError::InvalidBounds].
    pub fn query_intersecting(
        &self,
        bounds: &BoundingBox<T>,
    ) -> Result<Vec<&Annotation<T>>, StoreError> {
        let entries = self.index.query_intersecting(bounds)?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| self.annotations.get(&entry.annotation_id))
            .map(|stored| &stored.annotation)
            .collect())
    }

    /// The best annotation at an image-space point, or `None`.
    ///
    /// The point is expanded by `radius` into a query box for the coarse
    /// index pass; candidates are then refined with exact point-in-shape
    /// tests. Rectangles are their own bounding box and need no refinement;
    /// points and lines have no interior, so for them the buffered box is
    /// the whole hit target. Among the remaining hits the smallest
    /// bounding-box area wins, modeling visual stacking (small shapes drawn
    /// on top are the intuitive pick); equal areas resolve by first-match
    /// order.
    pub fn query_point(
        &self,
        x: T,
        y: T,
        radius: T,
    ) -> Result<Option<&Annotation<T>>, StoreError> {
        let point = vec2(x, y);
        let query = BoundingBox::from_point(point).expanded(radius);
        let mut hits: Vec<&IndexEntry<T>> = self
            .index
            .query_intersecting(&query)?
            .into_iter()
            .filter(|entry| {
                self.annotations
                    .get(&entry.annotation_id)
                    .is_some_and(|stored| exact_hit(&stored.geometry, point))
            })
            .collect();
        log::trace!("point query ({:?}, {:?}) -> {} hit(s)", x, y, hits.len());

        hits.sort_by(|a, b| {
            a.bounds
                .area()
                .partial_cmp(&b.bounds.area())
                .unwrap_or(Ordering::Equal)
        });
        Ok(hits
            .first()
            .and_then(|entry| self.annotations.get(&entry.annotation_id))
            .map(|stored| &stored.annotation))
    }

    /// [AnnotationStore::query_point] with the buffer from options.
    pub fn query_point_opt(
        &self,
        x: T,
        y: T,
        options: &PointQueryOptions<T>,
    ) -> Result<Option<&Annotation<T>>, StoreError> {
        self.query_point(x, y, options.buffer)
    }

    /// Project an annotation's shape from image space into viewport space,
    /// returning a clone carrying the reprojected target.
    pub fn to_viewport_space(
        &self,
        annotation: &Annotation<T>,
        transform: &ViewportTransform<T>,
    ) -> Result<Annotation<T>, StoreError> {
        self.project(annotation, |geometry| transform.to_viewport_space(geometry))
    }

    /// Project an annotation's shape from viewport space back into image
    /// space. Exact inverse of [AnnotationStore::to_viewport_space] within
    /// floating point tolerance.
    pub fn to_image_space(
        &self,
        annotation: &Annotation<T>,
        transform: &ViewportTransform<T>,
    ) -> Result<Annotation<T>, StoreError> {
        self.project(annotation, |geometry| transform.to_image_space(geometry))
    }

    fn project(
        &self,
        annotation: &Annotation<T>,
        map: impl Fn(&Geometry<T>) -> Geometry<T>,
    ) -> Result<Annotation<T>, StoreError> {
        let selector = annotation
            .first_selector()
            .ok_or_else(|| StoreError::MissingSelector {
                id: annotation.id.clone(),
            })?;
        let geometry = selector.decode(&self.image)?;
        let projected = map(&geometry);
        Ok(annotation.with_target(Target::from_selector(Selector::from_geometry(&projected))))
    }

    /// The annotations visible in the transform's extent, reprojected into
    /// viewport space and ordered large-to-small by bounding-box area (the
    /// render order that keeps small shapes on top).
    ///
    /// This is the per-viewport-change work of the windowed "gigapixel"
    /// mode: only the visible region is re-synchronized.
    pub fn project_visible(
        &self,
        transform: &ViewportTransform<T>,
    ) -> Result<Vec<Annotation<T>>, StoreError> {
        let extent = transform.extent();
        let mut entries = self.index.query_intersecting(&extent)?;
        entries.sort_by(|a, b| {
            b.bounds
                .area()
                .partial_cmp(&a.bounds.area())
                .unwrap_or(Ordering::Equal)
        });

        let mut visible = Vec::with_capacity(entries.len());
        for entry in entries {
            if let Some(stored) = self.annotations.get(&entry.annotation_id) {
                let projected = transform.to_viewport_space(&stored.geometry);
                visible.push(
                    stored
                        .annotation
                        .with_target(Target::from_selector(Selector::from_geometry(&projected))),
                );
            }
        }
        Ok(visible)
    }
}

/// Exact per-kind refinement of a coarse index hit.
fn exact_hit<T>(geometry: &Geometry<T>, point: Vector2<T>) -> bool
where
    T: Real,
{
    match geometry {
        // the bounding box is exact (rect) or is the entire hit target
        // (point/line, which have no interior)
        Geometry::Rect(_) | Geometry::Point(_) | Geometry::Line(_) => true,
        other => other.contains_point(point),
    }
}
