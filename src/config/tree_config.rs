use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rules::{BranchingRules, DepthMapping};
use crate::math::Vec3;

/// Seed the reference willow was grown from
const DEFAULT_SEED: u64 = 900_000_000_000;

/// Deepest recursion accepted from a config file
const MAX_SUPPORTED_DEPTH: usize = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid tree config: {0}")]
    Invalid(String),
}

/// Everything a build needs besides the code itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub seed: u64,
    pub trunk_start: Vec3,
    pub trunk_direction: Vec3,
    pub trunk_length: f32,
    pub trunk_radius: f32,
    /// Trunk is depth 0; branches at this depth have no children
    pub max_depth: usize,
    /// Radial resolution of every tube
    pub sides: usize,
    /// Cross-section radius at every branch tip
    pub tip_radius: f32,
    pub depth_mapping: DepthMapping,
    pub branching: BranchingRules,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            trunk_start: Vec3::ZERO,
            trunk_direction: Vec3::UP,
            trunk_length: 220.0,
            trunk_radius: 32.0,
            max_depth: 4,
            sides: 12,
            tip_radius: 2.0,
            depth_mapping: DepthMapping::default(),
            branching: BranchingRules::default(),
        }
    }
}

impl TreeConfig {
    /// Parse from YAML and validate. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: TreeConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.branching;
        let m = &self.depth_mapping;

        check(self.trunk_start.is_finite(), "trunk_start must be finite")?;
        check(
            self.trunk_direction.is_finite() && self.trunk_direction.length() > 0.0,
            "trunk_direction must be a non-zero vector",
        )?;
        check(self.trunk_length > 0.0, "trunk_length must be positive")?;
        check(self.trunk_radius > 0.0, "trunk_radius must be positive")?;
        check(self.tip_radius >= 0.0, "tip_radius must not be negative")?;
        check(self.sides >= 3, "sides must be at least 3")?;
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "max_depth {} exceeds supported maximum {}",
                self.max_depth, MAX_SUPPORTED_DEPTH
            )));
        }

        check(m.min_points >= 2, "depth_mapping.min_points must be at least 2")?;
        check(
            m.max_points >= m.min_points,
            "depth_mapping.max_points must not be below min_points",
        )?;
        check(
            m.base_droop >= 0.0 && m.tip_droop >= 0.0,
            "depth_mapping droop values must not be negative",
        )?;

        check(
            b.trunk_children.lo >= 0 && b.trunk_children.lo <= b.trunk_children.hi,
            "branching.trunk_children must be a non-negative, ordered range",
        )?;
        check(b.child_min >= 0, "branching.child_min must not be negative")?;
        for (name, t) in [
            ("trunk_attach_min_t", b.trunk_attach_min_t),
            ("attach_min_t", b.attach_min_t),
            ("trunk_outward_mix", b.trunk_outward_mix),
            ("outward_mix", b.outward_mix),
        ] {
            if !(0.0..=1.0).contains(&t) {
                return Err(ConfigError::Invalid(format!(
                    "branching.{} must be within [0, 1], got {}",
                    name, t
                )));
            }
        }
        check(
            b.length_scale.lo > 0.0 && b.length_scale.lo <= b.length_scale.hi,
            "branching.length_scale must be a positive, ordered range",
        )?;
        check(
            b.radius_scale > 0.0 && b.radius_scale < 1.0,
            "branching.radius_scale must be within (0, 1)",
        )?;
        check(
            b.sag.lo >= 0.0 && b.sag.lo <= b.sag.hi,
            "branching.sag must be a non-negative, ordered range",
        )?;

        Ok(())
    }
}

fn check(ok: bool, message: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message.to_string()))
    }
}
