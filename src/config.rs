//! Configuration constants and declarations for the damping modifiers.

use serde::{Deserialize, Serialize};

use crate::damping::coefficients::TypeScale;
use crate::damping::law::Gammas;
use crate::error::ConfigError;

/// Group applied when a declaration names none.
pub const DEFAULT_GROUP: &str = "all";

/// A body registry qualifies for rigid-body damping only if its style contains both
/// of these fragments.
pub const RIGID_STYLE_MARKER: &str = "rigid/";
pub const SMALL_STYLE_MARKER: &str = "/small";

fn default_group() -> String {
    DEFAULT_GROUP.to_string()
}

/// Declaration of a per-particle damping modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DampingConfig {
    pub id: String,
    #[serde(default = "default_group")]
    pub group: String,
    #[serde(default)]
    pub gamma_linear: Option<f64>,
    #[serde(default)]
    pub gamma_angular: Option<f64>,
    #[serde(default)]
    pub scale: Vec<TypeScale>,
    #[serde(default)]
    pub level: Option<usize>,
}

impl DampingConfig {
    pub fn new(id: impl Into<String>, gamma_linear: f64, gamma_angular: f64) -> Self {
        Self {
            id: id.into(),
            group: default_group(),
            gamma_linear: Some(gamma_linear),
            gamma_angular: Some(gamma_angular),
            scale: Vec::new(),
            level: None,
        }
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn scale(mut self, kind: usize, factor: f64) -> Self {
        self.scale.push(TypeScale::new(kind, factor));
        self
    }

    pub fn level(mut self, level: usize) -> Self {
        self.level = Some(level);
        self
    }

    pub(crate) fn gammas(&self) -> Result<Gammas, ConfigError> {
        required_gammas(&self.id, self.gamma_linear, self.gamma_angular)
    }
}

/// Declaration of a per-body damping modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidDampingConfig {
    pub id: String,
    #[serde(default = "default_group")]
    pub group: String,
    #[serde(default)]
    pub body_modifier_id: String,
    #[serde(default)]
    pub gamma_linear: Option<f64>,
    #[serde(default)]
    pub gamma_angular: Option<f64>,
    #[serde(default)]
    pub level: Option<usize>,
}

impl RigidDampingConfig {
    pub fn new(
        id: impl Into<String>,
        body_modifier_id: impl Into<String>,
        gamma_linear: f64,
        gamma_angular: f64,
    ) -> Self {
        Self {
            id: id.into(),
            group: default_group(),
            body_modifier_id: body_modifier_id.into(),
            gamma_linear: Some(gamma_linear),
            gamma_angular: Some(gamma_angular),
            level: None,
        }
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn level(mut self, level: usize) -> Self {
        self.level = Some(level);
        self
    }

    pub(crate) fn gammas(&self) -> Result<Gammas, ConfigError> {
        required_gammas(&self.id, self.gamma_linear, self.gamma_angular)
    }
}

fn required_gammas(
    id: &str,
    linear: Option<f64>,
    angular: Option<f64>,
) -> Result<Gammas, ConfigError> {
    let missing = |argument| ConfigError::MissingArgument {
        modifier: id.to_string(),
        argument,
    };
    if id.is_empty() {
        return Err(missing("id"));
    }
    let linear = linear.ok_or_else(|| missing("gamma_linear"))?;
    let angular = angular.ok_or_else(|| missing("gamma_angular"))?;
    Ok(Gammas::new(linear, angular))
}
