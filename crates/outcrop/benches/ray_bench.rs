use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use outcrop::{Aabb, CollisionLayer, CollisionWorld, Ray, WorldQuery};

fn build_level(columns: usize) -> CollisionWorld {
    let mut world = CollisionWorld::new();
    world
        .add_solid(Aabb::from_min_max(Vec2::new(-500.0, -1.0), Vec2::new(500.0, 0.0)))
        .unwrap();
    for i in 0..columns {
        let x = i as f32 * 4.0 - 200.0;
        world
            .add_solid(Aabb::from_min_max(Vec2::new(x, 0.0), Vec2::new(x + 1.0, 3.0)))
            .unwrap();
        world
            .add_one_way(Aabb::from_min_max(Vec2::new(x + 1.5, 4.0), Vec2::new(x + 3.0, 4.2)))
            .unwrap();
    }
    world
}

fn bench_downward_probe(c: &mut Criterion) {
    let world = build_level(100);
    let ray = Ray::new(Vec2::new(0.5, 10.0), Vec2::NEG_Y, 20.0);

    c.bench_function("downward_probe_200_colliders", |b| {
        b.iter(|| black_box(world.cast_ray(black_box(&ray), CollisionLayer::FLOOR)))
    });
}

fn bench_horizontal_probe_miss(c: &mut Criterion) {
    let world = build_level(100);
    // Above every column, so every collider is tested and none is hit
    let ray = Ray::new(Vec2::new(-300.0, 50.0), Vec2::X, 600.0);

    c.bench_function("horizontal_probe_miss", |b| {
        b.iter(|| black_box(world.cast_ray(black_box(&ray), CollisionLayer::BLOCKING)))
    });
}

criterion_group!(benches, bench_downward_probe, bench_horizontal_probe_miss);
criterion_main!(benches);
