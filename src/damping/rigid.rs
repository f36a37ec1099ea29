use log::debug;

use crate::config::{RIGID_STYLE_MARKER, SMALL_STYLE_MARKER};
use crate::core::bodies::SharedBodies;
use crate::core::group::GroupMask;
use crate::core::particles::ParticleStore;
use crate::damping::law::{DampingLaw, EntityState, Gammas};
use crate::damping::Granularity;
use crate::error::{ConfigError, InitWarning};
use crate::modify::InitContext;

/// Applies the law to rigid-body aggregates reached through the particle → body links.
///
/// Every eligible particle with a body link triggers one update of that body. A body
/// with several in-group linked particles is therefore damped several times per pass;
/// registries that link only one owning particle per body get exactly one update.
pub struct PerBody {
    registry_id: String,
    gammas: Gammas,
    bodies: Option<SharedBodies>,
}

impl PerBody {
    pub fn new(registry_id: impl Into<String>, gammas: Gammas) -> Self {
        Self {
            registry_id: registry_id.into(),
            gammas,
            bodies: None,
        }
    }

    pub fn registry_id(&self) -> &str {
        &self.registry_id
    }

    pub fn gammas(&self) -> Gammas {
        self.gammas
    }
}

pub(crate) fn is_small_rigid(style: &str) -> bool {
    style.contains(RIGID_STYLE_MARKER) && style.contains(SMALL_STYLE_MARKER)
}

impl Granularity for PerBody {
    fn style<L: DampingLaw>() -> &'static str {
        L::RIGID_STYLE
    }

    fn init(
        &mut self,
        modifier: &str,
        style: &'static str,
        ctx: &InitContext<'_>,
    ) -> Result<Vec<InitWarning>, ConfigError> {
        self.bodies = None;

        let (position, registry) = ctx
            .find(&self.registry_id)
            .ok_or_else(|| ConfigError::BodyModifierNotFound {
                modifier: modifier.to_string(),
                registry: self.registry_id.clone(),
            })?;

        let bodies = match (&registry.bodies, is_small_rigid(&registry.style)) {
            (Some(bodies), true) => bodies.clone(),
            _ => {
                return Err(ConfigError::NotSmallRigid {
                    modifier: modifier.to_string(),
                    registry: self.registry_id.clone(),
                    style: registry.style.clone(),
                })
            }
        };

        let mut warnings = Vec::new();
        if ctx.modifiers[..position].iter().any(|m| m.style == style) {
            warnings.push(InitWarning::DefinedBeforeRegistry {
                style: style.to_string(),
                registry: self.registry_id.clone(),
            });
        }
        if registry.early {
            warnings.push(InitWarning::AppliedAfterRegistry {
                modifier: modifier.to_string(),
                registry: self.registry_id.clone(),
            });
        } else {
            warnings.push(InitWarning::OverwrittenLate {
                modifier: modifier.to_string(),
                registry: self.registry_id.clone(),
            });
        }

        self.bodies = Some(bodies);
        Ok(warnings)
    }

    fn apply<L: DampingLaw>(
        &mut self,
        law: &L,
        group: GroupMask,
        particles: &mut dyn ParticleStore,
    ) {
        let Some(bodies) = self.bodies.as_ref() else {
            debug!("{} not bound to a body registry; pass skipped", self.registry_id);
            return;
        };
        let mut registry = bodies.write();

        for (i, mask) in particles.masks().iter().enumerate() {
            if !mask.intersects(group) {
                continue;
            }
            let Some(index) = registry.link(i).get() else {
                continue;
            };
            let Some(body) = registry.body_mut(index) else {
                continue;
            };
            let entity = EntityState {
                velocity: body.vcm,
                omega: body.omega,
                force: body.fcm,
                torque: body.torque,
            };
            let (force, torque) = law.apply(&entity, self.gammas);
            body.fcm = force;
            body.torque = torque;
        }
    }
}
