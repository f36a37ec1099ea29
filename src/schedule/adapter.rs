use log::debug;

use crate::core::particles::ParticleStore;
use crate::schedule::integrator::{Integrate, IntegrationStyle};
use crate::schedule::level::Schedule;

/// Decides, per hook call, whether the damping pass runs.
///
/// The only state is the level binding, re-resolved by [`ScheduleAdapter::init`]
/// every time the integrator is (re)initialized.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleAdapter {
    requested_level: Option<usize>,
    schedule: Schedule,
}

impl ScheduleAdapter {
    pub fn new(requested_level: Option<usize>) -> Self {
        Self {
            requested_level,
            schedule: Schedule::default(),
        }
    }

    pub fn init(&mut self, style: IntegrationStyle) -> Schedule {
        self.schedule = Schedule::resolve(style, self.requested_level);
        self.schedule
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Runs the pass once before the first step. In multi-rate mode the bound level's
    /// buffer is loaded into the accumulators, damped, and written back so the
    /// correction lands in that level only.
    pub fn setup<F>(
        &self,
        particles: &mut dyn ParticleStore,
        integrator: &mut dyn Integrate,
        mut pass: F,
    ) where
        F: FnMut(&mut dyn ParticleStore),
    {
        match self.schedule {
            Schedule::MultiRate { level, .. } => {
                debug!("setup: damping folded into multi-rate level {level}");
                integrator.copy_level_to_total(level, particles);
                pass(particles);
                integrator.copy_total_to_level(level, particles);
            }
            Schedule::SingleRate | Schedule::Minimizing => pass(particles),
        }
    }

    pub fn post_force<F>(&self, particles: &mut dyn ParticleStore, mut pass: F)
    where
        F: FnMut(&mut dyn ParticleStore),
    {
        pass(particles);
    }

    pub fn post_force_level<F>(&self, particles: &mut dyn ParticleStore, level: usize, mut pass: F)
    where
        F: FnMut(&mut dyn ParticleStore),
    {
        if self.schedule.applies_at(level) {
            pass(particles);
        }
    }

    pub fn min_post_force<F>(&self, particles: &mut dyn ParticleStore, mut pass: F)
    where
        F: FnMut(&mut dyn ParticleStore),
    {
        pass(particles);
    }
}
