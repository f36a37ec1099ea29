//! Ordered list of per-step modifiers and the hooks the integration scheduler calls.

use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;

use crate::{
    core::{
        bodies::{SharedBodies, SmallBodies},
        particles::ParticleStore,
    },
    error::{ConfigError, InitWarning},
    schedule::integrator::{Integrate, IntegrationStyle},
    utils::logging::ScopedTimer,
};

/// A pluggable per-step computation that mutates force and torque state.
///
/// All hooks default to no-ops so a modifier only implements the points it needs.
pub trait Modifier: Send + Sync {
    fn id(&self) -> &str;

    fn style(&self) -> &str;

    /// Shared body registry, for modifiers that own rigid-body aggregates.
    fn body_registry(&self) -> Option<SharedBodies> {
        None
    }

    /// Whether body forces are final before later modifiers run.
    fn computes_early(&self) -> bool {
        false
    }

    fn init(&mut self, _ctx: &InitContext<'_>) -> Result<Vec<InitWarning>, ConfigError> {
        Ok(Vec::new())
    }

    fn setup(&mut self, _particles: &mut dyn ParticleStore, _integrator: &mut dyn Integrate) {}

    fn min_setup(&mut self, _particles: &mut dyn ParticleStore) {}

    fn post_force(&mut self, _particles: &mut dyn ParticleStore) {}

    fn post_force_level(&mut self, _particles: &mut dyn ParticleStore, _level: usize) {}

    fn min_post_force(&mut self, _particles: &mut dyn ParticleStore) {}
}

/// Snapshot of one list entry, taken before modifiers initialize.
#[derive(Clone)]
pub struct ModifierInfo {
    pub id: String,
    pub style: String,
    pub bodies: Option<SharedBodies>,
    pub early: bool,
}

pub struct InitContext<'a> {
    pub style: IntegrationStyle,
    pub modifiers: &'a [ModifierInfo],
}

impl<'a> InitContext<'a> {
    /// Position and snapshot of the modifier named `id`.
    pub fn find(&self, id: &str) -> Option<(usize, &'a ModifierInfo)> {
        self.modifiers
            .iter()
            .enumerate()
            .find(|(_, info)| info.id == id)
    }
}

/// The engine's ordered modifier list. Hooks run in insertion order.
#[derive(Default)]
pub struct ModifierList {
    modifiers: Vec<Box<dyn Modifier>>,
}

impl ModifierList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<M: Modifier + 'static>(&mut self, modifier: M) -> Result<usize, ConfigError> {
        if self.find(modifier.id()).is_some() {
            return Err(ConfigError::DuplicateModifierId(modifier.id().to_string()));
        }
        self.modifiers.push(Box::new(modifier));
        Ok(self.modifiers.len() - 1)
    }

    pub fn find(&self, id: &str) -> Option<usize> {
        self.modifiers.iter().position(|m| m.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&dyn Modifier> {
        self.find(id).map(|index| self.modifiers[index].as_ref())
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Initializes every modifier against the current integrator. Must be repeated
    /// whenever the integrator changes. Stops at the first configuration error.
    pub fn init(&mut self, integrator: &dyn Integrate) -> Result<Vec<InitWarning>, ConfigError> {
        let infos: Vec<ModifierInfo> = self
            .modifiers
            .iter()
            .map(|m| ModifierInfo {
                id: m.id().to_string(),
                style: m.style().to_string(),
                bodies: m.body_registry(),
                early: m.computes_early(),
            })
            .collect();
        let ctx = InitContext {
            style: integrator.style(),
            modifiers: &infos,
        };
        debug!(
            "initializing {} modifiers for {:?}",
            self.modifiers.len(),
            ctx.style
        );

        let mut warnings = Vec::new();
        for modifier in &mut self.modifiers {
            for warning in modifier.init(&ctx)? {
                warn!("{warning}");
                warnings.push(warning);
            }
        }
        Ok(warnings)
    }

    pub fn setup(&mut self, particles: &mut dyn ParticleStore, integrator: &mut dyn Integrate) {
        for modifier in &mut self.modifiers {
            modifier.setup(particles, integrator);
        }
    }

    pub fn min_setup(&mut self, particles: &mut dyn ParticleStore) {
        for modifier in &mut self.modifiers {
            modifier.min_setup(particles);
        }
    }

    pub fn post_force(&mut self, particles: &mut dyn ParticleStore) {
        let _timer = ScopedTimer::new("modifiers::post_force");
        for modifier in &mut self.modifiers {
            modifier.post_force(particles);
        }
    }

    pub fn post_force_level(&mut self, particles: &mut dyn ParticleStore, level: usize) {
        for modifier in &mut self.modifiers {
            modifier.post_force_level(particles, level);
        }
    }

    pub fn min_post_force(&mut self, particles: &mut dyn ParticleStore) {
        for modifier in &mut self.modifiers {
            modifier.min_post_force(particles);
        }
    }
}

/// Body-registry modifier: publishes rigid-body aggregates to the damping modifiers.
///
/// Integration of the bodies happens elsewhere; this entry carries the registry,
/// its style name and whether it finalizes body forces early.
pub struct RigidRegistry {
    id: String,
    style: String,
    bodies: Arc<RwLock<SmallBodies>>,
    early: bool,
}

impl RigidRegistry {
    pub fn new(
        id: impl Into<String>,
        style: impl Into<String>,
        bodies: SmallBodies,
        early: bool,
    ) -> Self {
        Self {
            id: id.into(),
            style: style.into(),
            bodies: Arc::new(RwLock::new(bodies)),
            early,
        }
    }

    /// Typed handle on the registry, for the engine side that fills and reads it.
    pub fn bodies(&self) -> Arc<RwLock<SmallBodies>> {
        Arc::clone(&self.bodies)
    }
}

impl Modifier for RigidRegistry {
    fn id(&self) -> &str {
        &self.id
    }

    fn style(&self) -> &str {
        &self.style
    }

    fn body_registry(&self) -> Option<SharedBodies> {
        let shared: SharedBodies = self.bodies.clone();
        Some(shared)
    }

    fn computes_early(&self) -> bool {
        self.early
    }
}
