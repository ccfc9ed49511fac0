// src/animation_lib/indices.rs

use crate::animation_lib::error::AnimationResult;
use crate::animation_lib::pool::VertexPool;
use glam::Vec2;

/// Ordered, duplicate-free list of indices into a `VertexPool`.
///
/// Insertion order is drawing order. Cloning copies the index values only;
/// the clone has its own storage and no pool binding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolygonIndices {
    vertices: Vec<usize>,
}

impl PolygonIndices {
    pub fn new() -> Self {
        Self { vertices: Vec::new() }
    }

    /// Appends `index` unless it is already present. Returns whether it was added.
    pub fn add_vertex(&mut self, index: usize) -> bool {
        if self.vertices.contains(&index) {
            return false;
        }
        self.vertices.push(index);
        true
    }

    pub fn all_vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// `None` when the polygon has no vertices yet.
    pub fn last_vertex(&self) -> Option<usize> {
        self.vertices.last().copied()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Looks every index up in `pool`, in drawing order.
    pub fn resolve_in<'a>(&'a self, pool: &'a VertexPool) -> impl Iterator<Item = AnimationResult<Vec2>> + 'a {
        self.vertices.iter().map(move |&index| pool.resolve(index))
    }
}

impl FromIterator<usize> for PolygonIndices {
    /// Later duplicates are dropped, same as repeated `add_vertex` calls.
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut indices = PolygonIndices::new();
        for index in iter {
            indices.add_vertex(index);
        }
        indices
    }
}
