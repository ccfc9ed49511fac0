// src/animation_lib/error.rs

use crate::animation_lib::pool::PoolId;

pub type AnimationResult<T> = Result<T, AnimationError>;

/// Everything that can go wrong on the init/update/draw path.
///
/// None of these are transient: each one is a programming error on the host
/// side and is surfaced immediately instead of being masked.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnimationError {
    /// `update` or `draw` was called before `init`
    #[error("polygon used before init")]
    NotInitialized,

    /// The centroid of a polygon with no vertices is undefined
    #[error("cannot init a centroid-based animation on a polygon with no vertices")]
    EmptyPolygon,

    /// A vertex index does not resolve inside the pool
    #[error("vertex index {index} is out of range for a pool of {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    /// The pool removed points after this polygon was bound to it
    #[error("pool generation changed from {bound} to {current} since init")]
    StalePool { bound: u64, current: u64 },

    /// Vertices were added after `init` to an animation that froze its vertex set
    #[error("polygon was initialized with {bound} vertices but now has {current}")]
    IndicesChanged { bound: usize, current: usize },

    /// Polygon was bound to one pool and asked to read from another
    #[error("polygon bound to pool {bound:?} but was given pool {given:?}")]
    PoolMismatch { bound: PoolId, given: PoolId },

    /// Normalized time outside of [0, 1], or not a number
    #[error("normalized time {0} is outside [0, 1]")]
    TimeOutOfRange(f32),

    /// Animation passes need a positive, finite length
    #[error("animation duration must be positive and finite, got {0}s")]
    InvalidDuration(f32),

    /// Wraps a failure with the position of the polygon in its scene
    #[error("polygon #{position}: {source}")]
    Polygon {
        position: usize,
        #[source]
        source: Box<AnimationError>,
    },
}

impl AnimationError {
    pub fn at_polygon(self, position: usize) -> Self {
        AnimationError::Polygon { position, source: Box::new(self) }
    }
}
