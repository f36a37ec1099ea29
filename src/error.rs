//! Configuration errors and initialization diagnostics.

use std::fmt;

use thiserror::Error;

/// Fatal configuration problems. Raised once while constructing or initializing a
/// modifier, before any force pass runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Modifier {modifier}: missing required argument `{argument}`")]
    MissingArgument {
        modifier: String,
        argument: &'static str,
    },
    #[error("Modifier {modifier}: particle type {kind} is outside 1..={ntypes}")]
    TypeOutOfRange {
        modifier: String,
        kind: usize,
        ntypes: usize,
    },
    #[error("Particle type {kind} is outside 1..={ntypes}")]
    ParticleTypeOutOfRange { kind: usize, ntypes: usize },
    #[error("Modifier {modifier}: unknown group `{group}`")]
    UnknownGroup { modifier: String, group: String },
    #[error("Too many groups: at most {max} can be defined")]
    TooManyGroups { max: usize },
    #[error("Modifier {modifier} ({style}) requires particles with angular velocity and torque")]
    MissingAngularState { modifier: String, style: &'static str },
    #[error("Body registry `{registry}` referenced by {modifier} does not exist")]
    BodyModifierNotFound { modifier: String, registry: String },
    #[error("Modifier {modifier} requires a rigid/small body registry, but `{registry}` is `{style}`")]
    NotSmallRigid {
        modifier: String,
        registry: String,
        style: String,
    },
    #[error("A modifier with id `{0}` is already registered")]
    DuplicateModifierId(String),
}

/// Non-fatal diagnostics produced while initializing rigid-body damping. Every
/// warning is logged when it is produced and also handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitWarning {
    /// A modifier of the same damping style sits ahead of the body registry.
    DefinedBeforeRegistry { style: String, registry: String },
    /// The registry computes body forces late, so the damped values get overwritten.
    OverwrittenLate { modifier: String, registry: String },
    /// The registry computes body forces early; damping acts on final aggregates.
    AppliedAfterRegistry { modifier: String, registry: String },
}

impl fmt::Display for InitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitWarning::DefinedBeforeRegistry { style, registry } => write!(
                f,
                "Modifier style {style} must be defined after body registry {registry}"
            ),
            InitWarning::OverwrittenLate { modifier, registry } => write!(
                f,
                "Modifier {modifier} alters rigid body forces before {registry} defines them: no effect"
            ),
            InitWarning::AppliedAfterRegistry { modifier, registry } => write!(
                f,
                "Modifier {modifier} alters rigid body forces after {registry} computed them; \
                 disregard early-force warnings from {registry} for this modifier"
            ),
        }
    }
}
