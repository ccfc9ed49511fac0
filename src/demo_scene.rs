// src/demo_scene.rs

use glam::Vec2;
use animated_polygons::animation_lib::{
    AnimatedPolygon, AnimationClock, AnimationKind, AnimationResult, PolygonAnimation,
    PolygonIndices, PolygonScene, VertexPool,
};
use crate::config::AppConfig;

const GRID_COLUMNS: usize = 5;
const GRID_ROWS: usize = 4;
const CELL_SIZE: f32 = 160.0;
const GRID_ORIGIN: Vec2 = Vec2::new(112.0, 84.0);
// every other row is pushed sideways so the cells are not all squares
const ROW_SHEAR: f32 = 24.0;

fn grid_index(column: usize, row: usize) -> usize {
    row * GRID_COLUMNS + column
}

fn create_grid_pool() -> VertexPool {
    let mut pool = VertexPool::new();
    for row in 0..GRID_ROWS {
        let shear = if row % 2 == 1 { ROW_SHEAR } else { 0.0 };
        for column in 0..GRID_COLUMNS {
            pool.push(GRID_ORIGIN + Vec2::new(column as f32 * CELL_SIZE + shear, row as f32 * CELL_SIZE));
        }
    }
    pool
}

fn cell_indices(column: usize, row: usize) -> PolygonIndices {
    [
        grid_index(column, row),
        grid_index(column + 1, row),
        grid_index(column + 1, row + 1),
        grid_index(column, row + 1),
    ]
    .into_iter()
    .collect()
}

/// Grid of quads that share their corner points. Cells alternate between the
/// filled color ramp and the converging outline, and every color ramp cell is
/// also traced by a converging copy of itself.
pub fn create_demo_scene(config: &AppConfig) -> AnimationResult<PolygonScene> {
    let clock = AnimationClock::new(config.animation_duration_secs, config.looping)?;
    let mut scene = PolygonScene::new(create_grid_pool(), clock);

    for row in 0..GRID_ROWS - 1 {
        for column in 0..GRID_COLUMNS - 1 {
            let indices = cell_indices(column, row);
            if (row + column) % 2 == 0 {
                let ramp = AnimatedPolygon::from_indices(AnimationKind::ColorRamp, &indices);
                let outline = ramp.copy_as(AnimationKind::Converging);
                scene.add_polygon(ramp);
                scene.add_polygon(outline);
            } else {
                scene.add_polygon(AnimatedPolygon::from_indices(AnimationKind::Converging, &indices));
            }
        }
    }

    // one triangle spanning the whole grid, reusing the corner points
    let mut spanning = AnimatedPolygon::new(AnimationKind::Converging);
    spanning.add_vertex(grid_index(0, 0));
    spanning.add_vertex(grid_index(GRID_COLUMNS - 1, 0));
    spanning.add_vertex(grid_index(GRID_COLUMNS / 2, GRID_ROWS - 1));
    scene.add_polygon(spanning);

    scene.init_all()?;
    log::info!(
        "demo scene: {} polygons, {} vertex references into {} shared points",
        scene.polygons().len(),
        scene.vertex_reference_count(),
        scene.pool().len()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_builds_and_shares_points() {
        let scene = create_demo_scene(&AppConfig::default()).unwrap();
        assert_eq!(scene.pool().len(), GRID_COLUMNS * GRID_ROWS);
        // 12 cells, 6 of them doubled, plus the spanning triangle
        assert_eq!(scene.polygons().len(), 12 + 6 + 1);
        assert!(scene.vertex_reference_count() > scene.pool().len());
        assert!(scene.polygons().iter().all(|p| p.is_initialized()));
    }
}
