use glam::DVec3;
use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::group::GroupMask;
use crate::core::particles::{ParticleStore, ParticleView};
use crate::damping::coefficients::TypeCoefficients;
use crate::damping::law::{DampingLaw, EntityState, Gammas};
use crate::damping::Granularity;

/// Applies the law to every eligible particle, with coefficients looked up by type.
///
/// Particles whose type has no table entry are skipped.
#[derive(Debug, Clone)]
pub struct PerParticle {
    coefficients: TypeCoefficients,
    parallel: bool,
}

impl PerParticle {
    pub fn new(coefficients: TypeCoefficients) -> Self {
        Self {
            coefficients,
            parallel: false,
        }
    }

    pub fn coefficients(&self) -> &TypeCoefficients {
        &self.coefficients
    }

    /// Enables the rayon pass. Without the `parallel` feature this is recorded but ignored.
    pub fn set_parallel(&mut self, enabled: bool) {
        self.parallel = enabled;
    }

    fn apply_sequential<L: DampingLaw>(
        &self,
        law: &L,
        group: GroupMask,
        particles: Particles<'_>,
        torques: &mut [DVec3],
    ) {
        let Particles {
            types,
            masks,
            velocities,
            omegas,
            forces,
        } = particles;
        for (i, (force, torque)) in forces.iter_mut().zip(torques).enumerate() {
            if !masks[i].intersects(group) {
                continue;
            }
            let Some(gammas) = self.coefficients.get(types[i]) else {
                continue;
            };
            damp_one(law, gammas, velocities[i], omegas[i], force, torque);
        }
    }

    #[cfg(feature = "parallel")]
    fn apply_parallel<L: DampingLaw>(
        &self,
        law: &L,
        group: GroupMask,
        particles: Particles<'_>,
        torques: &mut [DVec3],
    ) {
        let coefficients = &self.coefficients;
        let Particles {
            types,
            masks,
            velocities,
            omegas,
            forces,
        } = particles;
        forces
            .par_iter_mut()
            .zip(torques.par_iter_mut())
            .enumerate()
            .filter(|(i, _)| masks[*i].intersects(group))
            .for_each(|(i, (force, torque))| {
                if let Some(gammas) = coefficients.get(types[i]) {
                    damp_one(law, gammas, velocities[i], omegas[i], force, torque);
                }
            });
    }
}

/// Read-only arrays of one pass plus the force accumulators.
struct Particles<'a> {
    types: &'a [usize],
    masks: &'a [GroupMask],
    velocities: &'a [DVec3],
    omegas: &'a [DVec3],
    forces: &'a mut [DVec3],
}

#[inline]
fn damp_one<L: DampingLaw>(
    law: &L,
    gammas: Gammas,
    velocity: DVec3,
    omega: DVec3,
    force: &mut DVec3,
    torque: &mut DVec3,
) {
    let entity = EntityState {
        velocity,
        omega,
        force: *force,
        torque: *torque,
    };
    let (damped_force, damped_torque) = law.apply(&entity, gammas);
    *force = damped_force;
    *torque = damped_torque;
}

impl Granularity for PerParticle {
    fn style<L: DampingLaw>() -> &'static str {
        L::PARTICLE_STYLE
    }

    fn apply<L: DampingLaw>(
        &mut self,
        law: &L,
        group: GroupMask,
        particles: &mut dyn ParticleStore,
    ) {
        let ParticleView {
            types,
            masks,
            velocities,
            forces,
            angular,
        } = particles.view_mut();
        let Some(angular) = angular else {
            debug!("{} pass skipped: store has no angular state", L::PARTICLE_STYLE);
            return;
        };
        let particles = Particles {
            types,
            masks,
            velocities,
            omegas: angular.omegas,
            forces,
        };

        #[cfg(feature = "parallel")]
        if self.parallel {
            self.apply_parallel(law, group, particles, angular.torques);
            return;
        }

        self.apply_sequential(law, group, particles, angular.torques);
    }
}
