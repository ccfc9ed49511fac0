// src/lib.rs

pub mod animation_lib;
pub mod rendering_lib;

pub use animation_lib::{
    AnimatedPolygon, AnimationClock, AnimationError, AnimationKind, AnimationResult,
    DrawingSurface, NormalizedTime, PolygonAnimation, PolygonScene, VertexPool,
};
