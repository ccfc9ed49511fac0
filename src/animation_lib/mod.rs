// src/animation_lib/mod.rs

pub mod animation;
pub mod clock;
pub mod color_ramp;
pub mod converging;
pub mod error;
pub mod indices;
pub mod pool;
pub mod scene;
pub mod surface;

pub use animation::{AnimatedPolygon, AnimationKind, NormalizedTime, PolygonAnimation};
pub use clock::AnimationClock;
pub use color_ramp::ColorRampPolygon;
pub use converging::ConvergingPolygon;
pub use error::{AnimationError, AnimationResult};
pub use indices::PolygonIndices;
pub use pool::{PoolBinding, PoolId, VertexPool};
pub use scene::PolygonScene;
pub use surface::{Color, DrawCommand, DrawingSurface, RecordingSurface, ShapeMode, StyleScope};
