//! Post-force damping modifiers: one law composed with one granularity.

pub mod coefficients;
pub mod law;
pub mod particle;
pub mod rigid;

pub use coefficients::{TypeCoefficients, TypeScale};
pub use law::{DampingLaw, EntityState, Gammas, PowerReduction, Viscous};
pub use particle::PerParticle;
pub use rigid::PerBody;

use log::debug;

use crate::{
    config::{DampingConfig, RigidDampingConfig},
    core::{
        group::{GroupMask, GroupTable},
        particles::ParticleStore,
    },
    error::{ConfigError, InitWarning},
    modify::{InitContext, Modifier},
    schedule::{adapter::ScheduleAdapter, integrator::Integrate, level::Schedule},
    utils::logging::ScopedTimer,
};

/// Which entities a damping pass visits and where their state lives.
pub trait Granularity: Send + Sync {
    fn style<L: DampingLaw>() -> &'static str;

    /// Resolves external references. Called on every integrator (re)initialization.
    fn init(
        &mut self,
        _modifier: &str,
        _style: &'static str,
        _ctx: &InitContext<'_>,
    ) -> Result<Vec<InitWarning>, ConfigError> {
        Ok(Vec::new())
    }

    fn apply<L: DampingLaw>(
        &mut self,
        law: &L,
        group: GroupMask,
        particles: &mut dyn ParticleStore,
    );
}

/// A damping modifier: law `L` applied at granularity `G` to the particles of one group.
pub struct Damping<L: DampingLaw, G: Granularity> {
    id: String,
    group: GroupMask,
    law: L,
    granularity: G,
    adapter: ScheduleAdapter,
}

pub type ViscousParticles = Damping<Viscous, PerParticle>;
pub type PowerParticles = Damping<PowerReduction, PerParticle>;
pub type ViscousRigid = Damping<Viscous, PerBody>;
pub type PowerRigid = Damping<PowerReduction, PerBody>;

fn resolve_group(id: &str, groups: &GroupTable, name: &str) -> Result<GroupMask, ConfigError> {
    groups.find(name).ok_or_else(|| ConfigError::UnknownGroup {
        modifier: id.to_string(),
        group: name.to_string(),
    })
}

impl<L: DampingLaw + Default> Damping<L, PerParticle> {
    /// Builds the per-type table from `config`. Fails if a `scale` names a type outside
    /// the store, or if the store lacks angular velocity and torque.
    pub fn new(
        config: &DampingConfig,
        groups: &GroupTable,
        particles: &dyn ParticleStore,
    ) -> Result<Self, ConfigError> {
        let gammas = config.gammas()?;
        if !particles.has_angular() {
            return Err(ConfigError::MissingAngularState {
                modifier: config.id.clone(),
                style: L::PARTICLE_STYLE,
            });
        }
        let group = resolve_group(&config.id, groups, &config.group)?;
        let coefficients =
            TypeCoefficients::with_scales(&config.id, particles.ntypes(), gammas, &config.scale)?;

        Ok(Self {
            id: config.id.clone(),
            group,
            law: L::default(),
            granularity: PerParticle::new(coefficients),
            adapter: ScheduleAdapter::new(config.level),
        })
    }

    pub fn coefficients(&self) -> &TypeCoefficients {
        self.granularity.coefficients()
    }

    pub fn set_parallel(&mut self, enabled: bool) {
        self.granularity.set_parallel(enabled);
    }
}

impl<L: DampingLaw + Default> Damping<L, PerBody> {
    pub fn new(config: &RigidDampingConfig, groups: &GroupTable) -> Result<Self, ConfigError> {
        let gammas = config.gammas()?;
        if config.body_modifier_id.is_empty() {
            return Err(ConfigError::MissingArgument {
                modifier: config.id.clone(),
                argument: "body_modifier_id",
            });
        }
        let group = resolve_group(&config.id, groups, &config.group)?;

        Ok(Self {
            id: config.id.clone(),
            group,
            law: L::default(),
            granularity: PerBody::new(config.body_modifier_id.clone(), gammas),
            adapter: ScheduleAdapter::new(config.level),
        })
    }

    pub fn gammas(&self) -> Gammas {
        self.granularity.gammas()
    }

    pub fn registry_id(&self) -> &str {
        self.granularity.registry_id()
    }
}

impl<L: DampingLaw, G: Granularity> Damping<L, G> {
    pub fn group(&self) -> GroupMask {
        self.group
    }

    pub fn schedule(&self) -> Schedule {
        self.adapter.schedule()
    }

    /// Runs the damping pass once, outside any schedule gating.
    pub fn apply(&mut self, particles: &mut dyn ParticleStore) {
        let _timer = ScopedTimer::new(G::style::<L>());
        self.granularity.apply(&self.law, self.group, particles);
    }
}

impl<L: DampingLaw, G: Granularity> Modifier for Damping<L, G> {
    fn id(&self) -> &str {
        &self.id
    }

    fn style(&self) -> &str {
        G::style::<L>()
    }

    fn init(&mut self, ctx: &InitContext<'_>) -> Result<Vec<InitWarning>, ConfigError> {
        let schedule = self.adapter.init(ctx.style);
        debug!("{} ({}) bound to {:?}", self.id, G::style::<L>(), schedule);
        self.granularity.init(&self.id, G::style::<L>(), ctx)
    }

    fn setup(&mut self, particles: &mut dyn ParticleStore, integrator: &mut dyn Integrate) {
        let Self {
            law,
            group,
            granularity,
            adapter,
            ..
        } = self;
        adapter.setup(particles, integrator, |p| granularity.apply(&*law, *group, p));
    }

    fn min_setup(&mut self, particles: &mut dyn ParticleStore) {
        self.apply(particles);
    }

    fn post_force(&mut self, particles: &mut dyn ParticleStore) {
        let Self {
            law,
            group,
            granularity,
            adapter,
            ..
        } = self;
        adapter.post_force(particles, |p| granularity.apply(&*law, *group, p));
    }

    fn post_force_level(&mut self, particles: &mut dyn ParticleStore, level: usize) {
        let Self {
            law,
            group,
            granularity,
            adapter,
            ..
        } = self;
        adapter.post_force_level(particles, level, |p| granularity.apply(&*law, *group, p));
    }

    fn min_post_force(&mut self, particles: &mut dyn ParticleStore) {
        let Self {
            law,
            group,
            granularity,
            adapter,
            ..
        } = self;
        adapter.min_post_force(particles, |p| granularity.apply(&*law, *group, p));
    }
}
