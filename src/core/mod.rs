//! Entity storage the damping modifiers read and mutate.

pub mod bodies;
pub mod group;
pub mod particles;

pub use bodies::{BodyLink, BodyRegistry, BodyState, SharedBodies, SmallBodies};
pub use group::{GroupMask, GroupTable};
pub use particles::{AngularView, Particle, ParticleStore, ParticleView, ParticlesSoA};
