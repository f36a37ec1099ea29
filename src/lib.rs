//! Granular Damping – post-force damping modifiers for DEM simulations.
//!
//! Two damping laws (linear viscous drag and sign-based power reduction) are applied
//! either to individual finite-size particles or to rigid-body aggregates. Each
//! modifier plugs into an ordered [`ModifierList`] and is driven through single-rate,
//! multi-rate, or minimization hooks.
//!
//! ```
//! use granular_damping::*;
//!
//! let mut particles = ParticlesSoA::finite_size(1);
//! particles
//!     .push(Particle {
//!         velocity: DVec3::new(2.0, 0.0, 0.0),
//!         force: DVec3::new(5.0, 0.0, 0.0),
//!         ..Particle::new(1)
//!     })
//!     .unwrap();
//!
//! let groups = GroupTable::new();
//! let config = DampingConfig::new("drag", 0.5, 0.0);
//! let mut modifiers = ModifierList::new();
//! modifiers
//!     .add(ViscousParticles::new(&config, &groups, &particles).unwrap())
//!     .unwrap();
//! modifiers.init(&Verlet).unwrap();
//! modifiers.post_force(&mut particles);
//!
//! assert_eq!(particles.force(0), DVec3::new(4.0, 0.0, 0.0));
//! ```

pub mod config;
pub mod core;
pub mod damping;
pub mod error;
pub mod modify;
pub mod schedule;
pub mod utils;

pub use glam::DVec3;

pub use crate::config::{DampingConfig, RigidDampingConfig};
pub use crate::core::{
    bodies::{BodyLink, BodyRegistry, BodyState, SharedBodies, SmallBodies},
    group::{GroupMask, GroupTable},
    particles::{AngularView, Particle, ParticleStore, ParticleView, ParticlesSoA},
};
pub use crate::damping::{
    Damping, DampingLaw, Gammas, Granularity, PerBody, PerParticle, PowerParticles,
    PowerReduction, PowerRigid, TypeCoefficients, TypeScale, Viscous, ViscousParticles,
    ViscousRigid,
};
pub use crate::error::{ConfigError, InitWarning};
pub use crate::modify::{InitContext, Modifier, ModifierInfo, ModifierList, RigidRegistry};
pub use crate::schedule::{
    IntegrationStyle, Integrate, Minimizer, Respa, Schedule, ScheduleAdapter, Verlet,
};
