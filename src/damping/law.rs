use glam::DVec3;

/// Linear and angular damping coefficient pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gammas {
    pub linear: f64,
    pub angular: f64,
}

impl Gammas {
    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }
}

/// Velocity state and accumulated loads of one particle or one body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EntityState {
    pub velocity: DVec3,
    pub omega: DVec3,
    pub force: DVec3,
    pub torque: DVec3,
}

/// A damping law maps the accumulated load on an entity to its damped value.
///
/// Laws never reset an accumulator; they scale or offset what is already there.
pub trait DampingLaw: Copy + Send + Sync + 'static {
    /// Style name of the per-particle modifier using this law.
    const PARTICLE_STYLE: &'static str;
    /// Style name of the per-body modifier using this law.
    const RIGID_STYLE: &'static str;

    /// Damps one accumulator against its conjugate velocity.
    fn damp(&self, load: DVec3, velocity: DVec3, gamma: f64) -> DVec3;

    fn apply(&self, entity: &EntityState, gammas: Gammas) -> (DVec3, DVec3) {
        (
            self.damp(entity.force, entity.velocity, gammas.linear),
            self.damp(entity.torque, entity.omega, gammas.angular),
        )
    }
}

/// Linear drag: `load - gamma * velocity`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viscous;

impl DampingLaw for Viscous {
    const PARTICLE_STYLE: &'static str = "damp/viscous";
    const RIGID_STYLE: &'static str = "damp/viscous/rigid";

    #[inline]
    fn damp(&self, load: DVec3, velocity: DVec3, gamma: f64) -> DVec3 {
        load - gamma * velocity
    }
}

/// Sign-based reduction of unbalanced load, applied per axis.
///
/// Each component is multiplied by `1 - gamma * sign(load * velocity)`: a component
/// doing positive work is reduced, one opposing motion is increased. The result is
/// frame dependent and not physical; it only speeds up relaxation toward static
/// equilibrium. Gammas outside `[0, 1]` can invert or amplify components and are
/// deliberately left unchecked.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerReduction;

impl DampingLaw for PowerReduction {
    const PARTICLE_STYLE: &'static str = "damp/power";
    const RIGID_STYLE: &'static str = "damp/power/rigid";

    #[inline]
    fn damp(&self, load: DVec3, velocity: DVec3, gamma: f64) -> DVec3 {
        let sign = power_sign(load, velocity);
        load * (DVec3::ONE - gamma * sign)
    }
}

/// Componentwise sign of `load * velocity`: +1, -1, or 0 for an exact zero product.
#[inline]
pub fn power_sign(load: DVec3, velocity: DVec3) -> DVec3 {
    let power = load * velocity;
    DVec3::new(sign(power.x), sign(power.y), sign(power.z))
}

// f64::signum maps +0.0 to 1.0, which would damp idle components.
#[inline]
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
