// src/animation_lib/pool.rs

use std::sync::atomic::{AtomicU64, Ordering};
use glam::Vec2;
use crate::animation_lib::error::{AnimationError, AnimationResult};

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolId(u64);

/// Shared point storage addressed by plain integer index.
///
/// Polygons never own points; they keep indices into a pool owned by the host.
/// Anything that can shift or drop existing indices bumps `generation`, so a
/// polygon bound before the change can tell its indices may now be stale.
#[derive(Debug)]
pub struct VertexPool {
    id: PoolId,
    generation: u64,
    points: Vec<Vec2>,
}

/// What a polygon remembers about the pool it was `init`ed against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolBinding {
    pub pool_id: PoolId,
    pub generation: u64,
}

impl VertexPool {
    pub fn new() -> Self {
        Self::from_points(Vec::new())
    }

    pub fn from_points(points: Vec<Vec2>) -> Self {
        Self {
            id: PoolId(NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed)),
            generation: 0,
            points,
        }
    }

    pub fn id(&self) -> PoolId { self.id }
    pub fn generation(&self) -> u64 { self.generation }
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
    pub fn points(&self) -> &[Vec2] { &self.points }

    /// Appends a point and returns its index. Existing indices stay valid.
    pub fn push(&mut self, point: Vec2) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// Moves an existing point in place. Bound polygons see the new position
    /// on their next live read.
    pub fn set(&mut self, index: usize, point: Vec2) -> AnimationResult<()> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(AnimationError::IndexOutOfRange { index, len })?;
        *slot = point;
        Ok(())
    }

    pub fn truncate(&mut self, len: usize) {
        if len < self.points.len() {
            self.points.truncate(len);
            self.generation += 1;
        }
    }

    pub fn swap_remove(&mut self, index: usize) -> AnimationResult<Vec2> {
        let len = self.points.len();
        if index >= len {
            return Err(AnimationError::IndexOutOfRange { index, len });
        }
        self.generation += 1;
        Ok(self.points.swap_remove(index))
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Bounds-checked lookup; never reads past the end.
    pub fn resolve(&self, index: usize) -> AnimationResult<Vec2> {
        self.points
            .get(index)
            .copied()
            .ok_or(AnimationError::IndexOutOfRange { index, len: self.points.len() })
    }

    pub fn bind(&self) -> PoolBinding {
        PoolBinding { pool_id: self.id, generation: self.generation }
    }

    /// Checks that `binding` was taken from this pool and nothing was removed since.
    pub fn check_binding(&self, binding: &PoolBinding) -> AnimationResult<()> {
        if binding.pool_id != self.id {
            return Err(AnimationError::PoolMismatch { bound: binding.pool_id, given: self.id });
        }
        if binding.generation != self.generation {
            return Err(AnimationError::StalePool { bound: binding.generation, current: self.generation });
        }
        Ok(())
    }
}

impl Default for VertexPool {
    fn default() -> Self {
        Self::new()
    }
}
