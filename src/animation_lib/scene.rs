// src/animation_lib/scene.rs

use crate::animation_lib::animation::{AnimatedPolygon, NormalizedTime, PolygonAnimation};
use crate::animation_lib::clock::AnimationClock;
use crate::animation_lib::error::AnimationResult;
use crate::animation_lib::pool::VertexPool;
use crate::animation_lib::surface::DrawingSurface;

/// Host-side owner of the vertex pool and of every polygon that indexes it.
///
/// Frame order is `advance` (update every polygon) then `draw_all`. Errors
/// from a single polygon are reported with its position in the scene. The
/// per-frame passes still visit every other polygon and return the first
/// failure.
#[derive(Debug)]
pub struct PolygonScene {
    pool: VertexPool,
    polygons: Vec<AnimatedPolygon>,
    clock: AnimationClock,
}

impl PolygonScene {
    pub fn new(pool: VertexPool, clock: AnimationClock) -> Self {
        Self { pool, polygons: Vec::new(), clock }
    }

    pub fn pool(&self) -> &VertexPool { &self.pool }
    pub fn clock(&self) -> &AnimationClock { &self.clock }
    pub fn clock_mut(&mut self) -> &mut AnimationClock { &mut self.clock }
    pub fn polygons(&self) -> &[AnimatedPolygon] { &self.polygons }

    /// Mutable pool access. Polygons bound before an index-invalidating change
    /// must be re-initialized, see `refresh_stale`.
    pub fn pool_mut(&mut self) -> &mut VertexPool {
        &mut self.pool
    }

    pub fn polygon_mut(&mut self, position: usize) -> Option<&mut AnimatedPolygon> {
        self.polygons.get_mut(position)
    }

    /// Adds a polygon and returns its position. It is not initialized yet.
    pub fn add_polygon(&mut self, polygon: impl Into<AnimatedPolygon>) -> usize {
        self.polygons.push(polygon.into());
        self.polygons.len() - 1
    }

    pub fn vertex_reference_count(&self) -> usize {
        self.polygons.iter().map(|p| p.indices().num_vertices()).sum()
    }

    pub fn init_all(&mut self) -> AnimationResult<()> {
        for (position, polygon) in self.polygons.iter_mut().enumerate() {
            polygon.init(&self.pool).map_err(|e| e.at_polygon(position))?;
        }
        log::debug!(
            "initialized {} polygons over a pool of {} points",
            self.polygons.len(),
            self.pool.len()
        );
        Ok(())
    }

    /// Re-initializes polygons that were never bound or whose binding no
    /// longer matches the pool. Returns how many were re-initialized.
    pub fn refresh_stale(&mut self) -> AnimationResult<usize> {
        let mut refreshed = 0;
        for (position, polygon) in self.polygons.iter_mut().enumerate() {
            let fresh = polygon
                .binding()
                .map_or(false, |binding| self.pool.check_binding(&binding).is_ok());
            if !fresh {
                polygon.init(&self.pool).map_err(|e| e.at_polygon(position))?;
                refreshed += 1;
            }
        }
        if refreshed > 0 {
            log::debug!("re-initialized {} stale polygons", refreshed);
        }
        Ok(refreshed)
    }

    pub fn update_all(&mut self, t: NormalizedTime) -> AnimationResult<()> {
        let mut first_error = None;
        for (position, polygon) in self.polygons.iter_mut().enumerate() {
            if let Err(e) = polygon.update(t) {
                first_error.get_or_insert(e.at_polygon(position));
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Advances the clock by a frame delta and updates every polygon.
    pub fn advance(&mut self, dt_secs: f32) -> AnimationResult<NormalizedTime> {
        let t = self.clock.advance(dt_secs);
        self.update_all(t)?;
        Ok(t)
    }

    pub fn restart(&mut self) -> AnimationResult<()> {
        self.clock.restart();
        self.update_all(NormalizedTime::START)
    }

    pub fn draw_all(&self, surface: &mut dyn DrawingSurface) -> AnimationResult<()> {
        let mut first_error = None;
        for (position, polygon) in self.polygons.iter().enumerate() {
            if let Err(e) = polygon.draw(&self.pool, surface) {
                first_error.get_or_insert(e.at_polygon(position));
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
