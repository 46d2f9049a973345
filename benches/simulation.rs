//! Performance benchmarks for the terrarium simulation core.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use terrarium::terrain::Terrain;
use terrarium::{SimulationConfig, World};

fn benchmark_world_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_update");

    for population in [100, 500, 1000].iter() {
        let mut config = SimulationConfig::default();
        config.world.width = 500;
        config.world.height = 500;
        config.world.initial_population = *population;

        let mut world = World::new_with_seed(config, 42);

        // Warm up
        world.run(10);

        group.bench_with_input(
            BenchmarkId::new("population", population),
            population,
            |b, _| {
                b.iter(|| {
                    world.update();
                });
            },
        );
    }

    group.finish();
}

fn benchmark_terrain_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("terrain_generate");

    for size in [100u32, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("size", size), size, |b, &size| {
            b.iter(|| Terrain::generate(black_box(size), black_box(size), 42));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_world_update, benchmark_terrain_generation);
criterion_main!(benches);
