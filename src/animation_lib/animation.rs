// src/animation_lib/animation.rs

use crate::animation_lib::color_ramp::ColorRampPolygon;
use crate::animation_lib::converging::ConvergingPolygon;
use crate::animation_lib::error::{AnimationError, AnimationResult};
use crate::animation_lib::indices::PolygonIndices;
use crate::animation_lib::pool::{PoolBinding, VertexPool};
use crate::animation_lib::surface::DrawingSurface;

/// Animation progress in [0, 1]. 0 is the start of a pass, 1 the end.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct NormalizedTime(f32);

impl NormalizedTime {
    pub const START: NormalizedTime = NormalizedTime(0.0);
    pub const END: NormalizedTime = NormalizedTime(1.0);

    pub fn new(t: f32) -> AnimationResult<Self> {
        if (0.0..=1.0).contains(&t) {
            Ok(Self(t))
        } else {
            Err(AnimationError::TimeOutOfRange(t))
        }
    }

    /// Clamps into [0, 1]; NaN maps to 0.
    pub fn saturating(t: f32) -> Self {
        if t.is_nan() {
            return Self::START;
        }
        Self(t.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    ColorRamp,
    Converging,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 2] = [AnimationKind::ColorRamp, AnimationKind::Converging];

    pub fn name(self) -> &'static str {
        match self {
            AnimationKind::ColorRamp => "color ramp",
            AnimationKind::Converging => "converging",
        }
    }
}

/// The init / update / draw lifecycle every polygon animation follows.
///
/// `init` must run before `update` or `draw`; both return
/// `AnimationError::NotInitialized` otherwise. After changing the pool or the
/// index set, call `init` again. `draw` never changes the polygon.
pub trait PolygonAnimation {
    fn kind(&self) -> AnimationKind;
    fn indices(&self) -> &PolygonIndices;
    fn indices_mut(&mut self) -> &mut PolygonIndices;
    /// Pool identity and generation recorded by the last successful `init`.
    fn binding(&self) -> Option<PoolBinding>;
    fn init(&mut self, pool: &VertexPool) -> AnimationResult<()>;
    fn update(&mut self, t: NormalizedTime) -> AnimationResult<()>;
    fn draw(&self, pool: &VertexPool, surface: &mut dyn DrawingSurface) -> AnimationResult<()>;

    fn is_initialized(&self) -> bool {
        self.binding().is_some()
    }

    fn add_vertex(&mut self, index: usize) -> bool {
        self.indices_mut().add_vertex(index)
    }
}

/// The closed set of polygon animations, dispatched statically.
#[derive(Clone, Debug)]
pub enum AnimatedPolygon {
    ColorRamp(ColorRampPolygon),
    Converging(ConvergingPolygon),
}

impl AnimatedPolygon {
    pub fn new(kind: AnimationKind) -> Self {
        Self::from_indices(kind, &PolygonIndices::new())
    }

    /// Copy-constructs from another polygon's indices. The result is unbound.
    pub fn from_indices(kind: AnimationKind, indices: &PolygonIndices) -> Self {
        match kind {
            AnimationKind::ColorRamp => AnimatedPolygon::ColorRamp(ColorRampPolygon::from_indices(indices)),
            AnimationKind::Converging => AnimatedPolygon::Converging(ConvergingPolygon::from_indices(indices)),
        }
    }

    /// Same indices, fresh state, possibly a different animation.
    pub fn copy_as(&self, kind: AnimationKind) -> Self {
        Self::from_indices(kind, self.indices())
    }

    fn as_animation(&self) -> &dyn PolygonAnimation {
        match self {
            AnimatedPolygon::ColorRamp(polygon) => polygon,
            AnimatedPolygon::Converging(polygon) => polygon,
        }
    }

    fn as_animation_mut(&mut self) -> &mut dyn PolygonAnimation {
        match self {
            AnimatedPolygon::ColorRamp(polygon) => polygon,
            AnimatedPolygon::Converging(polygon) => polygon,
        }
    }
}

impl PolygonAnimation for AnimatedPolygon {
    fn kind(&self) -> AnimationKind {
        self.as_animation().kind()
    }

    fn indices(&self) -> &PolygonIndices {
        self.as_animation().indices()
    }

    fn indices_mut(&mut self) -> &mut PolygonIndices {
        self.as_animation_mut().indices_mut()
    }

    fn binding(&self) -> Option<PoolBinding> {
        self.as_animation().binding()
    }

    fn init(&mut self, pool: &VertexPool) -> AnimationResult<()> {
        self.as_animation_mut().init(pool)
    }

    fn update(&mut self, t: NormalizedTime) -> AnimationResult<()> {
        self.as_animation_mut().update(t)
    }

    fn draw(&self, pool: &VertexPool, surface: &mut dyn DrawingSurface) -> AnimationResult<()> {
        self.as_animation().draw(pool, surface)
    }
}

impl From<ColorRampPolygon> for AnimatedPolygon {
    fn from(polygon: ColorRampPolygon) -> Self {
        AnimatedPolygon::ColorRamp(polygon)
    }
}

impl From<ConvergingPolygon> for AnimatedPolygon {
    fn from(polygon: ConvergingPolygon) -> Self {
        AnimatedPolygon::Converging(polygon)
    }
}
