use glam::DVec3;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::particles::ParticleStore;

/// How the outer driver evaluates forces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrationStyle {
    /// One force evaluation per step.
    SingleRate,
    /// Nested levels, `0` innermost/fastest to `levels - 1` outermost/slowest.
    MultiRate { levels: usize },
    /// Energy minimization; no time integration and no levels.
    Minimizer,
}

/// Contract of the integration scheduler seen by the damping modifiers.
pub trait Integrate: Send + Sync {
    fn style(&self) -> IntegrationStyle;

    /// Loads the force/torque buffer of `level` into the particle accumulators.
    /// A level that holds no contributions for the current particles leaves the
    /// accumulators as they are.
    fn copy_level_to_total(&mut self, _level: usize, _particles: &mut dyn ParticleStore) {}

    /// Stores the particle accumulators back into the buffer of `level`.
    fn copy_total_to_level(&mut self, _level: usize, _particles: &mut dyn ParticleStore) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Verlet;

impl Integrate for Verlet {
    fn style(&self) -> IntegrationStyle {
        IntegrationStyle::SingleRate
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Minimizer;

impl Integrate for Minimizer {
    fn style(&self) -> IntegrationStyle {
        IntegrationStyle::Minimizer
    }
}

/// Force and torque contributions accumulated at one multi-rate level.
#[derive(Debug, Clone, Default)]
pub struct LevelBuffer {
    pub forces: Vec<DVec3>,
    pub torques: Vec<DVec3>,
}

impl LevelBuffer {
    fn fit(&mut self, len: usize) {
        self.forces.resize(len, DVec3::ZERO);
        self.torques.resize(len, DVec3::ZERO);
    }
}

/// Multi-rate scheduler keeping one force buffer per level.
#[derive(Debug, Clone)]
pub struct Respa {
    levels: Vec<LevelBuffer>,
}

impl Respa {
    pub fn new(levels: usize) -> Self {
        Self {
            levels: vec![LevelBuffer::default(); levels.max(1)],
        }
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self, level: usize) -> Option<&LevelBuffer> {
        self.levels.get(level)
    }

    pub fn level_mut(&mut self, level: usize) -> Option<&mut LevelBuffer> {
        self.levels.get_mut(level)
    }
}

impl Integrate for Respa {
    fn style(&self) -> IntegrationStyle {
        IntegrationStyle::MultiRate {
            levels: self.levels.len(),
        }
    }

    fn copy_level_to_total(&mut self, level: usize, particles: &mut dyn ParticleStore) {
        let Some(buffer) = self.levels.get_mut(level) else {
            return;
        };
        let view = particles.view_mut();
        if buffer.forces.len() != view.forces.len() {
            debug!("level {level} buffer not populated; accumulators kept");
            return;
        }
        view.forces.copy_from_slice(&buffer.forces);
        if let Some(angular) = view.angular {
            if angular.torques.len() == buffer.torques.len() {
                angular.torques.copy_from_slice(&buffer.torques);
            }
        }
    }

    fn copy_total_to_level(&mut self, level: usize, particles: &mut dyn ParticleStore) {
        let Some(buffer) = self.levels.get_mut(level) else {
            return;
        };
        let view = particles.view_mut();
        buffer.fit(view.forces.len());
        buffer.forces.copy_from_slice(view.forces);
        if let Some(angular) = view.angular {
            buffer.torques.copy_from_slice(angular.torques);
        }
    }
}
