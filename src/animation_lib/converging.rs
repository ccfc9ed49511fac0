// src/animation_lib/converging.rs

use glam::Vec2;
use crate::animation_lib::animation::{AnimationKind, NormalizedTime, PolygonAnimation};
use crate::animation_lib::error::{AnimationError, AnimationResult};
use crate::animation_lib::indices::PolygonIndices;
use crate::animation_lib::pool::{PoolBinding, VertexPool};
use crate::animation_lib::surface::{Color, DrawingSurface, ShapeMode, StyleScope};

const STROKE_COLOR: Color = Color::rgb(255, 255, 100);
const STROKE_WEIGHT: f32 = 5.0;

/// Everything computed at `init`. The four vectors are always the same length.
#[derive(Clone, Debug, PartialEq)]
struct ConvergeState {
    binding: PoolBinding,
    centroid: Vec2,
    origins: Vec<Vec2>,
    displacements: Vec<Vec2>,
    current: Vec<Vec2>,
}

/// Outline whose vertices slide from their start positions onto the
/// polygon's centroid over one pass.
///
/// Start positions are frozen at `init`: moving points in the pool afterwards
/// does not change this animation until the next `init`.
#[derive(Clone, Debug, Default)]
pub struct ConvergingPolygon {
    indices: PolygonIndices,
    state: Option<ConvergeState>,
}

impl ConvergeState {
    fn check_vertex_count(&self, current: usize) -> AnimationResult<()> {
        if self.origins.len() != current {
            return Err(AnimationError::IndicesChanged { bound: self.origins.len(), current });
        }
        Ok(())
    }
}

impl ConvergingPolygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_indices(indices: &PolygonIndices) -> Self {
        Self { indices: indices.clone(), state: None }
    }

    pub fn centroid(&self) -> Option<Vec2> {
        self.state.as_ref().map(|state| state.centroid)
    }

    pub fn displacements(&self) -> Option<&[Vec2]> {
        self.state.as_ref().map(|state| state.displacements.as_slice())
    }

    pub fn current_positions(&self) -> Option<&[Vec2]> {
        self.state.as_ref().map(|state| state.current.as_slice())
    }
}

/// Plain arithmetic mean, summed in order.
fn centroid_of(points: &[Vec2]) -> AnimationResult<Vec2> {
    if points.is_empty() {
        return Err(AnimationError::EmptyPolygon);
    }
    let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + *p);
    Ok(sum / points.len() as f32)
}

impl PolygonAnimation for ConvergingPolygon {
    fn kind(&self) -> AnimationKind {
        AnimationKind::Converging
    }

    fn indices(&self) -> &PolygonIndices {
        &self.indices
    }

    fn indices_mut(&mut self) -> &mut PolygonIndices {
        &mut self.indices
    }

    fn binding(&self) -> Option<PoolBinding> {
        self.state.as_ref().map(|state| state.binding)
    }

    fn init(&mut self, pool: &VertexPool) -> AnimationResult<()> {
        // a failed init leaves the polygon uninitialized, not on its old vertex set
        self.state = None;
        let origins = self.indices.resolve_in(pool).collect::<AnimationResult<Vec<Vec2>>>()?;
        let centroid = centroid_of(&origins)?;
        let displacements = origins.iter().map(|origin| centroid - *origin).collect();
        log::trace!("converging polygon bound: {} vertices, centroid {:?}", origins.len(), centroid);
        self.state = Some(ConvergeState {
            binding: pool.bind(),
            centroid,
            current: origins.clone(),
            origins,
            displacements,
        });
        Ok(())
    }

    fn update(&mut self, t: NormalizedTime) -> AnimationResult<()> {
        let num_vertices = self.indices.num_vertices();
        let state = self.state.as_mut().ok_or(AnimationError::NotInitialized)?;
        state.check_vertex_count(num_vertices)?;
        let t = t.get();
        for ((current, origin), displacement) in state
            .current
            .iter_mut()
            .zip(&state.origins)
            .zip(&state.displacements)
        {
            *current = *origin + *displacement * t;
        }
        Ok(())
    }

    /// Draws from the frozen positions; the pool is not read.
    fn draw(&self, _pool: &VertexPool, surface: &mut dyn DrawingSurface) -> AnimationResult<()> {
        let state = self.state.as_ref().ok_or(AnimationError::NotInitialized)?;
        state.check_vertex_count(self.indices.num_vertices())?;

        let mut scope = StyleScope::new(surface);
        scope.stroke(STROKE_COLOR);
        scope.stroke_weight(STROKE_WEIGHT);
        scope.no_fill();
        if state.current.is_empty() {
            return Ok(());
        }
        scope.begin_shape();
        for point in &state.current {
            scope.vertex(*point);
        }
        scope.end_shape(ShapeMode::Close);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation_lib::surface::{DrawCommand, RecordingSurface};

    fn square() -> (VertexPool, ConvergingPolygon) {
        let pool = VertexPool::from_points(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
        ]);
        let mut polygon = ConvergingPolygon::new();
        for index in 0..4 {
            polygon.add_vertex(index);
        }
        (pool, polygon)
    }

    fn at(t: f32) -> NormalizedTime {
        NormalizedTime::new(t).unwrap()
    }

    #[test]
    fn test_centroid_and_displacement() {
        let (pool, mut polygon) = square();
        polygon.init(&pool).unwrap();
        assert_eq!(polygon.centroid(), Some(Vec2::new(1.0, 1.0)));
        let displacements = polygon.displacements().unwrap();
        assert_eq!(displacements[0], Vec2::new(1.0, 1.0));
        assert_eq!(displacements[2], Vec2::new(-1.0, -1.0));
        assert_eq!(polygon.current_positions().unwrap(), pool.points());
    }

    #[test]
    fn test_interpolation() {
        let (pool, mut polygon) = square();
        polygon.init(&pool).unwrap();

        polygon.update(at(0.5)).unwrap();
        assert_eq!(polygon.current_positions().unwrap()[0], Vec2::new(0.5, 0.5));

        polygon.update(at(0.0)).unwrap();
        assert_eq!(polygon.current_positions().unwrap(), pool.points());

        polygon.update(at(1.0)).unwrap();
        for point in polygon.current_positions().unwrap() {
            assert_eq!(*point, Vec2::new(1.0, 1.0));
        }
    }

    #[test]
    fn test_restart_after_full_pass() {
        let (pool, mut polygon) = square();
        polygon.init(&pool).unwrap();
        polygon.update(at(1.0)).unwrap();
        polygon.update(at(0.0)).unwrap();
        assert_eq!(polygon.current_positions().unwrap(), pool.points());
    }

    #[test]
    fn test_start_positions_are_frozen_at_init() {
        let (mut pool, mut polygon) = square();
        polygon.init(&pool).unwrap();
        pool.set(0, Vec2::new(10.0, 10.0)).unwrap();
        pool.truncate(1);

        polygon.update(at(0.0)).unwrap();
        assert_eq!(polygon.current_positions().unwrap()[0], Vec2::ZERO);
        let mut surface = RecordingSurface::new();
        polygon.draw(&pool, &mut surface).unwrap();
        assert_eq!(surface.vertices().len(), 4);
    }

    #[test]
    fn test_init_requires_vertices() {
        let pool = VertexPool::from_points(vec![Vec2::ONE]);
        let mut polygon = ConvergingPolygon::new();
        assert_eq!(polygon.init(&pool), Err(AnimationError::EmptyPolygon));
        assert!(!polygon.is_initialized());
    }

    #[test]
    fn test_init_rejects_unresolvable_index() {
        let (pool, mut polygon) = square();
        polygon.add_vertex(4);
        assert_eq!(polygon.init(&pool), Err(AnimationError::IndexOutOfRange { index: 4, len: 4 }));
        assert!(!polygon.is_initialized());
    }

    #[test]
    fn test_single_vertex_sits_on_its_centroid() {
        let pool = VertexPool::from_points(vec![Vec2::new(3.0, -2.0)]);
        let mut polygon = ConvergingPolygon::new();
        polygon.add_vertex(0);
        polygon.init(&pool).unwrap();
        polygon.update(at(0.6)).unwrap();
        assert_eq!(polygon.current_positions().unwrap(), &[Vec2::new(3.0, -2.0)]);
    }

    #[test]
    fn test_draw_outline_style_and_idempotence() {
        let (pool, mut polygon) = square();
        polygon.init(&pool).unwrap();
        polygon.update(at(0.5)).unwrap();

        let mut first = RecordingSurface::new();
        polygon.draw(&pool, &mut first).unwrap();
        let mut second = RecordingSurface::new();
        polygon.draw(&pool, &mut second).unwrap();
        assert_eq!(first.commands, second.commands);

        assert_eq!(
            &first.commands[..4],
            &[
                DrawCommand::PushStyle,
                DrawCommand::Stroke(Color::rgb(255, 255, 100)),
                DrawCommand::StrokeWeight(5.0),
                DrawCommand::NoFill,
            ]
        );
        assert_eq!(first.vertices()[0], Vec2::new(0.5, 0.5));
        assert_eq!(first.commands[first.commands.len() - 2], DrawCommand::EndShape(ShapeMode::Close));
        assert_eq!(first.style_depth(), 0);
    }

    #[test]
    fn test_failed_reinit_drops_previous_state() {
        let pool = VertexPool::from_points(vec![Vec2::ZERO, Vec2::X, Vec2::Y]);
        let mut polygon = ConvergingPolygon::new();
        for index in 0..3 {
            polygon.add_vertex(index);
        }
        polygon.init(&pool).unwrap();
        assert!(polygon.is_initialized());

        polygon.add_vertex(99);
        assert_eq!(polygon.init(&pool), Err(AnimationError::IndexOutOfRange { index: 99, len: 3 }));
        assert!(!polygon.is_initialized());
        assert_eq!(polygon.current_positions(), None);
        assert_eq!(polygon.update(at(0.5)), Err(AnimationError::NotInitialized));
        let mut surface = RecordingSurface::new();
        assert_eq!(polygon.draw(&pool, &mut surface), Err(AnimationError::NotInitialized));
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn test_vertices_added_after_init_need_reinit() {
        let (mut pool, mut polygon) = square();
        polygon.init(&pool).unwrap();
        pool.push(Vec2::new(1.0, 3.0));
        assert!(polygon.add_vertex(4));

        let changed = AnimationError::IndicesChanged { bound: 4, current: 5 };
        assert_eq!(polygon.update(at(0.5)), Err(changed.clone()));
        let mut surface = RecordingSurface::new();
        assert_eq!(polygon.draw(&pool, &mut surface), Err(changed));
        assert!(surface.commands.is_empty());

        polygon.init(&pool).unwrap();
        polygon.draw(&pool, &mut surface).unwrap();
        assert_eq!(surface.vertices().len(), 5);
    }

    #[test]
    fn test_copy_needs_its_own_init() {
        let (pool, mut polygon) = square();
        polygon.init(&pool).unwrap();
        let copy = ConvergingPolygon::from_indices(polygon.indices());
        assert_eq!(copy.indices(), polygon.indices());
        assert!(!copy.is_initialized());
        assert_eq!(copy.centroid(), None);
    }
}
