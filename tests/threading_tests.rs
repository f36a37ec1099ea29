use granular_damping::*;
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn test_modifier_list_is_sync_and_send() {
    fn assert_sync_send<T: Sync + Send>() {}
    assert_sync_send::<ModifierList>();
    assert_sync_send::<ParticlesSoA>();
    assert_sync_send::<SharedBodies>();
}

#[test]
fn test_independent_simulations_across_threads() {
    let mut handles = vec![];
    for i in 0..4 {
        let handle = thread::spawn(move || {
            let mut particles = ParticlesSoA::finite_size(1);
            particles
                .push(Particle {
                    velocity: DVec3::new(1.0, 0.0, 0.0),
                    force: DVec3::new(2.0, 0.0, 0.0),
                    ..Particle::new(1)
                })
                .unwrap();
            let gamma = 0.25 * i as f64;
            let config = DampingConfig::new("drag", gamma, 0.0);
            let mut modifiers = ModifierList::new();
            modifiers
                .add(ViscousParticles::new(&config, &GroupTable::new(), &particles).unwrap())
                .unwrap();
            modifiers.init(&Verlet).unwrap();
            modifiers.post_force(&mut particles);
            (gamma, particles.force(0).x)
        });
        handles.push(handle);
    }

    for handle in handles {
        let (gamma, fx) = handle.join().unwrap();
        assert_eq!(fx, 2.0 - gamma);
    }
}

#[test]
fn test_shared_registry_across_threads() {
    let mut bodies = SmallBodies::new();
    let body = bodies.add_body(BodyState {
        vcm: DVec3::X,
        fcm: DVec3::new(4.0, 0.0, 0.0),
        ..BodyState::default()
    });
    bodies.attach(0, body);
    let registry = RigidRegistry::new("clumps", "rigid/small", bodies, true);
    let handle = registry.bodies();

    let mut modifiers = ModifierList::new();
    modifiers.add(registry).unwrap();
    let config = RigidDampingConfig::new("drag", "clumps", 0.5, 0.0);
    modifiers
        .add(ViscousRigid::new(&config, &GroupTable::new()).unwrap())
        .unwrap();
    modifiers.init(&Verlet).unwrap();

    let mut particles = ParticlesSoA::point(1);
    particles.push(Particle::new(1)).unwrap();
    let shared = Arc::new(Mutex::new((modifiers, particles)));

    let mut workers = vec![];
    for _ in 0..4 {
        let shared = Arc::clone(&shared);
        workers.push(thread::spawn(move || {
            let mut guard = shared.lock().unwrap();
            let (modifiers, particles) = &mut *guard;
            modifiers.post_force(particles);
        }));
    }
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(handle.read().bodies()[0].fcm.x, 2.0);
}
