use std::sync::Arc;

use glam::DVec3;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Particle → body back-reference. Holds a body index or the `NONE` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyLink(usize);

impl BodyLink {
    pub const NONE: BodyLink = BodyLink(usize::MAX);

    pub fn to(body: usize) -> Self {
        Self(body)
    }

    pub fn is_none(&self) -> bool {
        self.0 == usize::MAX
    }

    pub fn get(self) -> Option<usize> {
        if self.is_none() {
            None
        } else {
            Some(self.0)
        }
    }
}

impl Default for BodyLink {
    fn default() -> Self {
        Self::NONE
    }
}

/// Aggregate center-of-mass state of one rigid body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub vcm: DVec3,
    pub omega: DVec3,
    pub fcm: DVec3,
    pub torque: DVec3,
}

/// Contract of the rigid-body aggregation the body-level modifiers mutate.
///
/// Implementations own the particle → body mapping; damping only dereferences it.
pub trait BodyRegistry: Send + Sync {
    /// Back-reference of local particle `particle`; `NONE` for non-members
    /// and for indices past the end of the mapping.
    fn link(&self, particle: usize) -> BodyLink;

    fn body_mut(&mut self, body: usize) -> Option<&mut BodyState>;
}

/// Registry handle shared between its owning modifier and the damping modifiers.
pub type SharedBodies = Arc<RwLock<dyn BodyRegistry>>;

/// Flat registry: bodies in a vector and one link per local particle.
#[derive(Debug, Clone, Default)]
pub struct SmallBodies {
    bodies: Vec<BodyState>,
    links: Vec<BodyLink>,
}

impl SmallBodies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_body(&mut self, body: BodyState) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Makes `particle` reference `body`, growing the mapping as needed.
    pub fn attach(&mut self, particle: usize, body: usize) {
        if self.links.len() <= particle {
            self.links.resize(particle + 1, BodyLink::NONE);
        }
        self.links[particle] = BodyLink::to(body);
    }

    pub fn detach(&mut self, particle: usize) {
        if let Some(link) = self.links.get_mut(particle) {
            *link = BodyLink::NONE;
        }
    }

    pub fn bodies(&self) -> &[BodyState] {
        &self.bodies
    }
}

impl BodyRegistry for SmallBodies {
    fn link(&self, particle: usize) -> BodyLink {
        self.links.get(particle).copied().unwrap_or(BodyLink::NONE)
    }

    fn body_mut(&mut self, body: usize) -> Option<&mut BodyState> {
        self.bodies.get_mut(body)
    }
}
