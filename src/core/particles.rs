use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::group::GroupMask;
use crate::error::ConfigError;

/// Read-only state plus mutable accumulators for every local particle.
///
/// Slices are parallel arrays indexed by local particle index. `angular` is
/// present only when the store carries finite-size particles.
pub struct ParticleView<'a> {
    pub types: &'a [usize],
    pub masks: &'a [GroupMask],
    pub velocities: &'a [DVec3],
    pub forces: &'a mut [DVec3],
    pub angular: Option<AngularView<'a>>,
}

pub struct AngularView<'a> {
    pub omegas: &'a [DVec3],
    pub torques: &'a mut [DVec3],
}

/// Contract of the particle storage the damping modifiers run against.
pub trait ParticleStore: Send + Sync {
    /// Number of local particles.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of particle types; valid types are `1..=ntypes`.
    fn ntypes(&self) -> usize;

    /// Whether angular velocity and torque arrays exist.
    fn has_angular(&self) -> bool;

    fn masks(&self) -> &[GroupMask];

    fn view_mut(&mut self) -> ParticleView<'_>;
}

/// Description of a single particle used when filling a [`ParticlesSoA`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub kind: usize,
    pub mask: GroupMask,
    pub velocity: DVec3,
    pub omega: DVec3,
    pub force: DVec3,
    pub torque: DVec3,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            kind: 1,
            mask: GroupMask::ALL,
            velocity: DVec3::ZERO,
            omega: DVec3::ZERO,
            force: DVec3::ZERO,
            torque: DVec3::ZERO,
        }
    }
}

impl Particle {
    pub fn new(kind: usize) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default, Clone)]
struct AngularArrays {
    omegas: Vec<DVec3>,
    torques: Vec<DVec3>,
}

/// Structure-of-arrays particle storage.
///
/// Types are validated on entry, so every stored type lies in `1..=ntypes`.
#[derive(Debug, Clone)]
pub struct ParticlesSoA {
    ntypes: usize,
    types: Vec<usize>,
    pub masks: Vec<GroupMask>,
    pub velocities: Vec<DVec3>,
    pub forces: Vec<DVec3>,
    angular: Option<AngularArrays>,
}

impl ParticlesSoA {
    /// Point particles: no angular state.
    pub fn point(ntypes: usize) -> Self {
        Self {
            ntypes,
            types: Vec::new(),
            masks: Vec::new(),
            velocities: Vec::new(),
            forces: Vec::new(),
            angular: None,
        }
    }

    /// Finite-size particles carrying angular velocity and torque.
    pub fn finite_size(ntypes: usize) -> Self {
        Self {
            angular: Some(AngularArrays::default()),
            ..Self::point(ntypes)
        }
    }

    pub fn push(&mut self, particle: Particle) -> Result<usize, ConfigError> {
        if particle.kind == 0 || particle.kind > self.ntypes {
            return Err(ConfigError::ParticleTypeOutOfRange {
                kind: particle.kind,
                ntypes: self.ntypes,
            });
        }
        let index = self.types.len();
        self.types.push(particle.kind);
        self.masks.push(particle.mask);
        self.velocities.push(particle.velocity);
        self.forces.push(particle.force);
        if let Some(angular) = self.angular.as_mut() {
            angular.omegas.push(particle.omega);
            angular.torques.push(particle.torque);
        }
        Ok(index)
    }

    pub fn force(&self, index: usize) -> DVec3 {
        self.forces[index]
    }

    pub fn torque(&self, index: usize) -> Option<DVec3> {
        self.angular.as_ref().map(|a| a.torques[index])
    }

    pub fn set_force(&mut self, index: usize, force: DVec3) {
        self.forces[index] = force;
    }

    pub fn set_torque(&mut self, index: usize, torque: DVec3) {
        if let Some(angular) = self.angular.as_mut() {
            angular.torques[index] = torque;
        }
    }

    pub fn set_mask(&mut self, index: usize, mask: GroupMask) {
        self.masks[index] = mask;
    }

    pub fn torques(&self) -> Option<&[DVec3]> {
        self.angular.as_ref().map(|a| a.torques.as_slice())
    }
}

impl ParticleStore for ParticlesSoA {
    fn len(&self) -> usize {
        self.types.len()
    }

    fn ntypes(&self) -> usize {
        self.ntypes
    }

    fn has_angular(&self) -> bool {
        self.angular.is_some()
    }

    fn masks(&self) -> &[GroupMask] {
        &self.masks
    }

    fn view_mut(&mut self) -> ParticleView<'_> {
        ParticleView {
            types: &self.types,
            masks: &self.masks,
            velocities: &self.velocities,
            forces: &mut self.forces,
            angular: self.angular.as_mut().map(|a| AngularView {
                omegas: &a.omegas,
                torques: &mut a.torques,
            }),
        }
    }
}
