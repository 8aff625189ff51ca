//! Mutable spatial index over annotation bounding boxes.
//!
//! Wraps an R-tree keyed by bounding box together with an id-keyed side map
//! of current bounds, so removal is driven by annotation id alone and never
//! needs to re-derive geometry.

use crate::core::math::BoundingBox;
use crate::core::traits::Real;
use crate::error::IndexError;
use num_traits::ToPrimitive;
use rstar::{Envelope, RTree, RTreeObject, SelectionFunction, AABB};
use std::collections::HashMap;

/// One indexed annotation: its current bounds and its id.
///
/// The index owns its entries; the annotation store owns the authoritative
/// annotation objects and keeps exactly one entry per live annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry<T = f64> {
    pub bounds: BoundingBox<T>,
    pub annotation_id: String,
}

impl<T> IndexEntry<T>
where
    T: Real,
{
    #[inline]
    pub fn new(bounds: BoundingBox<T>, annotation_id: impl Into<String>) -> Self {
        IndexEntry {
            bounds,
            annotation_id: annotation_id.into(),
        }
    }
}

impl<T> RTreeObject for IndexEntry<T>
where
    T: Real,
{
    type Envelope = AABB<[T; 2]>;

    #[inline]
    fn envelope(&self) -> Self::Envelope {
        envelope_of(&self.bounds)
    }
}

/// Selects entries of one annotation id, descending only into tree nodes
/// that can contain its current bounds.
struct SelectById<'a, T>
where
    T: Real,
{
    envelope: AABB<[T; 2]>,
    annotation_id: &'a str,
}

impl<'a, T> SelectionFunction<IndexEntry<T>> for SelectById<'a, T>
where
    T: Real,
{
    fn should_unpack_parent(&self, envelope: &AABB<[T; 2]>) -> bool {
        envelope.intersects(&self.envelope)
    }

    fn should_unpack_leaf(&self, leaf: &IndexEntry<T>) -> bool {
        leaf.annotation_id == self.annotation_id
    }
}

/// R-tree of annotation bounds with incremental insert, removal by id, bulk
/// loading, and intersection queries.
pub struct SpatialIndex<T = f64>
where
    T: Real,
{
    tree: RTree<IndexEntry<T>>,
    bounds_by_id: HashMap<String, BoundingBox<T>>,
}

impl<T> SpatialIndex<T>
where
    T: Real,
{
    pub fn new() -> Self {
        SpatialIndex {
            tree: RTree::new(),
            bounds_by_id: HashMap::new(),
        }
    }

    /// Number of indexed entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// The currently indexed bounds of an annotation, if present.
    #[inline]
    pub fn bounds_of(&self, annotation_id: &str) -> Option<&BoundingBox<T>> {
        self.bounds_by_id.get(annotation_id)
    }

    /// Insert an entry, replacing any existing entry with the same id.
    ///
    /// Malformed bounds are rejected with [IndexError::InvalidBounds] before
    /// any mutation.
    pub fn insert(&mut self, entry: IndexEntry<T>) -> Result<(), IndexError> {
        validate_bounds(&entry.bounds)?;
        self.remove(&entry.annotation_id);
        self.bounds_by_id
            .insert(entry.annotation_id.clone(), entry.bounds);
        self.tree.insert(entry);
        Ok(())
    }

    /// Insert a batch of entries, replacing existing entries with matching
    /// ids.
    ///
    /// All bounds are validated up front: either every entry is indexed or
    /// none is. An empty index takes the R-tree bulk-load path.
    pub fn insert_bulk(&mut self, entries: Vec<IndexEntry<T>>) -> Result<(), IndexError> {
        for entry in &entries {
            validate_bounds(&entry.bounds)?;
        }
        for entry in &entries {
            self.remove(&entry.annotation_id);
        }

        if self.tree.size() == 0 {
            for entry in &entries {
                self.bounds_by_id
                    .insert(entry.annotation_id.clone(), entry.bounds);
            }
            self.tree = RTree::bulk_load(entries);
        } else {
            for entry in entries {
                self.bounds_by_id
                    .insert(entry.annotation_id.clone(), entry.bounds);
                self.tree.insert(entry);
            }
        }
        Ok(())
    }

    /// Remove every entry of the annotation id given, regardless of bounds
    /// drift since insertion.
    ///
    /// Returns `false` (a no-op, not an error) when the id is not indexed.
    pub fn remove(&mut self, annotation_id: &str) -> bool {
        let Some(bounds) = self.bounds_by_id.remove(annotation_id) else {
            return false;
        };
        while self
            .tree
            .remove_with_selection_function(SelectById {
                envelope: envelope_of(&bounds),
                annotation_id,
            })
            .is_some()
        {}
        true
    }

    /// All entries whose bounds intersect `bounds`, in no guaranteed order.
    pub fn query_intersecting(
        &self,
        bounds: &BoundingBox<T>,
    ) -> Result<Vec<&IndexEntry<T>>, IndexError> {
        validate_bounds(bounds)?;
        Ok(self
            .tree
            .locate_in_envelope_intersecting(&envelope_of(bounds))
            .collect())
    }

    /// Drop all entries. The index is reusable afterward.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.bounds_by_id.clear();
    }
}

impl<T> Default for SpatialIndex<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn envelope_of<T>(bounds: &BoundingBox<T>) -> AABB<[T; 2]>
where
    T: Real,
{
    AABB::from_corners(
        [bounds.min_x, bounds.min_y],
        [bounds.max_x, bounds.max_y],
    )
}

/// Reject degenerate/NaN/inverted boxes at the index boundary.
pub(crate) fn validate_bounds<T>(bounds: &BoundingBox<T>) -> Result<(), IndexError>
where
    T: Real,
{
    if bounds.is_valid() {
        Ok(())
    } else {
        Err(IndexError::InvalidBounds {
            min_x: bounds.min_x.to_f64().unwrap_or(f64::NAN),
            min_y: bounds.min_y.to_f64().unwrap_or(f64::NAN),
            max_x: bounds.max_x.to_f64().unwrap_or(f64::NAN),
            max_y: bounds.max_y.to_f64().unwrap_or(f64::NAN),
        })
    }
}
