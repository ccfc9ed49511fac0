// benches/polygon_animation_benchmark.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use rand::Rng;

use animated_polygons::animation_lib::{
    AnimatedPolygon, AnimationKind, NormalizedTime, PolygonAnimation, RecordingSurface, VertexPool,
};
use animated_polygons::rendering_lib::FrameSurface;

const POOL_SIZE: usize = 2048;
const NUM_POLYGONS: usize = 200;

/// Random pool plus polygons that each pick a handful of shared points.
fn create_random_scene(rng: &mut impl Rng, kind: AnimationKind) -> (VertexPool, Vec<AnimatedPolygon>) {
    let pool = VertexPool::from_points(
        (0..POOL_SIZE)
            .map(|_| Vec2::new(rng.gen_range(0.0..1024.0), rng.gen_range(0.0..768.0)))
            .collect(),
    );
    let polygons = (0..NUM_POLYGONS)
        .map(|_| {
            let mut polygon = AnimatedPolygon::new(kind);
            let vertex_count = rng.gen_range(3..=12);
            while polygon.indices().num_vertices() < vertex_count {
                polygon.add_vertex(rng.gen_range(0..POOL_SIZE));
            }
            polygon.init(&pool).expect("indices are drawn from the pool");
            polygon
        })
        .collect();
    (pool, polygons)
}

fn polygon_animation_benchmark_fn(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut group = c.benchmark_group("PolygonAnimation");

    for kind in AnimationKind::ALL {
        let (pool, mut polygons) = create_random_scene(&mut rng, kind);

        group.bench_function(format!("update_{}_polygons_{}", NUM_POLYGONS, kind.name()), |b| {
            let mut step = 0u32;
            b.iter(|| {
                step = (step + 1) % 101;
                let t = NormalizedTime::saturating(step as f32 / 100.0);
                for polygon in polygons.iter_mut() {
                    polygon.update(black_box(t)).expect("initialized");
                }
            })
        });

        group.bench_function(format!("record_{}_polygons_{}", NUM_POLYGONS, kind.name()), |b| {
            let mut surface = RecordingSurface::new();
            b.iter(|| {
                surface.clear();
                for polygon in &polygons {
                    polygon.draw(black_box(&pool), &mut surface).expect("initialized");
                }
            })
        });

        group.bench_function(format!("tessellate_{}_polygons_{}", NUM_POLYGONS, kind.name()), |b| {
            let mut surface = FrameSurface::new();
            b.iter(|| {
                surface.begin_frame();
                for polygon in &polygons {
                    polygon.draw(black_box(&pool), &mut surface).expect("initialized");
                }
                black_box(surface.triangle_count())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, polygon_animation_benchmark_fn);
criterion_main!(benches);
