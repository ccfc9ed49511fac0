// src/animation_lib/color_ramp.rs

use glam::Vec2;
use crate::animation_lib::animation::{AnimationKind, NormalizedTime, PolygonAnimation};
use crate::animation_lib::error::{AnimationError, AnimationResult};
use crate::animation_lib::indices::PolygonIndices;
use crate::animation_lib::pool::{PoolBinding, VertexPool};
use crate::animation_lib::surface::{Color, DrawingSurface, ShapeMode, StyleScope};

pub const INTENSITY_START: f32 = 140.0;
pub const INTENSITY_DELTA: f32 = -100.0;
const STROKE_COLOR: Color = Color::rgb(128, 128, 255);
const STROKE_WEIGHT: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct RampState {
    binding: PoolBinding,
    intensity: u8,
}

/// The default animation: a filled polygon whose gray level ramps from
/// `INTENSITY_START` by `INTENSITY_DELTA` over a pass. Vertices are read
/// live from the pool on every draw.
#[derive(Clone, Debug, Default)]
pub struct ColorRampPolygon {
    indices: PolygonIndices,
    state: Option<RampState>,
}

impl ColorRampPolygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_indices(indices: &PolygonIndices) -> Self {
        Self { indices: indices.clone(), state: None }
    }

    /// Current fill intensity, once initialized.
    pub fn intensity(&self) -> Option<u8> {
        self.state.map(|state| state.intensity)
    }

    fn intensity_at(t: NormalizedTime) -> u8 {
        // truncate toward zero before clamping
        let value = (INTENSITY_START + t.get() * INTENSITY_DELTA) as i32;
        value.clamp(0, 255) as u8
    }
}

impl PolygonAnimation for ColorRampPolygon {
    fn kind(&self) -> AnimationKind {
        AnimationKind::ColorRamp
    }

    fn indices(&self) -> &PolygonIndices {
        &self.indices
    }

    fn indices_mut(&mut self) -> &mut PolygonIndices {
        &mut self.indices
    }

    fn binding(&self) -> Option<PoolBinding> {
        self.state.map(|state| state.binding)
    }

    fn init(&mut self, pool: &VertexPool) -> AnimationResult<()> {
        self.state = Some(RampState {
            binding: pool.bind(),
            intensity: Self::intensity_at(NormalizedTime::START),
        });
        Ok(())
    }

    fn update(&mut self, t: NormalizedTime) -> AnimationResult<()> {
        let state = self.state.as_mut().ok_or(AnimationError::NotInitialized)?;
        state.intensity = Self::intensity_at(t);
        Ok(())
    }

    fn draw(&self, pool: &VertexPool, surface: &mut dyn DrawingSurface) -> AnimationResult<()> {
        let state = self.state.as_ref().ok_or(AnimationError::NotInitialized)?;
        pool.check_binding(&state.binding)?;
        // resolve everything up front so a bad index never leaves a half-built shape
        let points = self.indices.resolve_in(pool).collect::<AnimationResult<Vec<Vec2>>>()?;

        let mut scope = StyleScope::new(surface);
        scope.stroke(STROKE_COLOR);
        scope.stroke_weight(STROKE_WEIGHT);
        scope.fill(Color::gray(state.intensity));
        if points.is_empty() {
            return Ok(());
        }
        scope.begin_shape();
        for point in points {
            scope.vertex(point);
        }
        scope.end_shape(ShapeMode::Close);
        Ok(())
    }
}
