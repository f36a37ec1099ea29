use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use granular_damping::*;
use std::hint::black_box;

fn prepare_particles(count: usize) -> ParticlesSoA {
    let mut particles = ParticlesSoA::finite_size(2);
    for i in 0..count {
        let t = i as f64;
        particles
            .push(Particle {
                velocity: DVec3::new(t.sin(), t.cos(), 0.1),
                omega: DVec3::new(0.0, t.sin(), t.cos()),
                force: DVec3::new(t.cos(), -t.sin(), 1.0),
                torque: DVec3::new(1.0, t.cos(), -t.sin()),
                ..Particle::new(1 + i % 2)
            })
            .unwrap();
    }
    particles
}

fn bench_particle_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("particle_power_reduction");
    let groups = GroupTable::new();
    for &count in &[1024usize, 16384, 131072] {
        let config = DampingConfig::new("p", 0.7, 0.7).scale(2, 0.5);
        group.bench_with_input(
            BenchmarkId::new("sequential", count),
            &count,
            |b, &count| {
                let mut particles = prepare_particles(count);
                let mut damping = PowerParticles::new(&config, &groups, &particles).unwrap();
                b.iter(|| damping.apply(black_box(&mut particles)));
            },
        );
        group.bench_with_input(BenchmarkId::new("parallel", count), &count, |b, &count| {
            let mut particles = prepare_particles(count);
            let mut damping = PowerParticles::new(&config, &groups, &particles).unwrap();
            damping.set_parallel(true);
            b.iter(|| damping.apply(black_box(&mut particles)));
        });
    }
    group.finish();
}

fn bench_rigid_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("rigid_viscous");
    for &count in &[1024usize, 16384] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut particles = prepare_particles(count);
            let mut bodies = SmallBodies::new();
            // One owning particle per ten-particle clump.
            for i in (0..count).step_by(10) {
                let body = bodies.add_body(BodyState {
                    vcm: DVec3::X,
                    fcm: DVec3::Y,
                    ..BodyState::default()
                });
                bodies.attach(i, body);
            }
            let mut modifiers = ModifierList::new();
            modifiers
                .add(RigidRegistry::new("clumps", "rigid/small", bodies, true))
                .unwrap();
            let config = RigidDampingConfig::new("drag", "clumps", 0.1, 0.1);
            modifiers
                .add(ViscousRigid::new(&config, &GroupTable::new()).unwrap())
                .unwrap();
            modifiers.init(&Verlet).unwrap();
            b.iter(|| modifiers.post_force(black_box(&mut particles)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_particle_pass, bench_rigid_pass);
criterion_main!(benches);
