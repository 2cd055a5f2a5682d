//! Model selection policy: denylist, priority order, popular list.
//!
//! The provider's model lineup changes faster than this code does, so
//! everything name-based is data, not control flow: compiled-in
//! defaults here, optionally overridden by a `probe-policy.toml` file.

use crate::error::PolicyError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;

use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const POLICY_FILE_NAME: &str = "probe-policy.toml";

/// Deprecated-name denylist: a model whose name contains any of these
/// substrings (case-insensitive) is never probed, even if it advertises
/// content generation. Vision-only variants, the legacy bison family,
/// and the superseded pro-vision variants all fail generation probes in
/// unhelpful ways.
const DEFAULT_DENYLIST: &[&str] = &["vision", "bison", "pro-vision"];

/// Priority substrings, most-capable / highest-free-quota first. The
/// first entry matching any eligible model's name wins.
const DEFAULT_PRIORITY: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
    "gemini-pro",
];

/// Models worth calling out to the user as popular choices.
const DEFAULT_POPULAR: &[&str] = &["gemini-2.0-flash", "gemini-1.5-flash", "gemini-1.5-pro"];

/// Suggested when a free-tier quota failure is classified: the model
/// with the highest free-tier request limit.
const DEFAULT_FREE_TIER_ALTERNATIVE: &str = "gemini-1.5-flash";

static DEFAULT_POLICY: Lazy<SelectionPolicy> = Lazy::new(SelectionPolicy::default);

/// Compiled-in default policy.
pub fn default_policy() -> &'static SelectionPolicy {
    &DEFAULT_POLICY
}

// ============================================
// POLICY STRUCT
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Case-insensitive name substrings excluded from generation probing.
    #[serde(default = "default_denylist")]
    pub denylist: Vec<String>,

    /// Case-insensitive name substrings checked in order during selection.
    #[serde(default = "default_priority")]
    pub priority: Vec<String>,

    /// Models flagged as popular in the report (display only).
    #[serde(default = "default_popular")]
    pub popular: Vec<String>,

    /// Model suggested on free-tier quota exhaustion.
    #[serde(default = "default_free_tier_alternative")]
    pub free_tier_alternative: String,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            denylist: default_denylist(),
            priority: default_priority(),
            popular: default_popular(),
            free_tier_alternative: default_free_tier_alternative(),
        }
    }
}

fn default_denylist() -> Vec<String> {
    DEFAULT_DENYLIST.iter().map(ToString::to_string).collect()
}

fn default_priority() -> Vec<String> {
    DEFAULT_PRIORITY.iter().map(ToString::to_string).collect()
}

fn default_popular() -> Vec<String> {
    DEFAULT_POPULAR.iter().map(ToString::to_string).collect()
}

fn default_free_tier_alternative() -> String {
    DEFAULT_FREE_TIER_ALTERNATIVE.to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

impl SelectionPolicy {
    /// Load probe-policy.toml from a configuration directory.
    ///
    /// Tries multiple paths:
    /// 1. {config_dir}/config/probe-policy.toml
    /// 2. {config_dir}/probe-policy.toml
    /// 3. Falls back to the compiled-in defaults
    ///
    /// # Returns
    ///
    /// Always returns `Ok(SelectionPolicy)` - either loaded or default.
    pub fn load(config_dir: &Path) -> Result<Self, PolicyError> {
        let paths = [
            config_dir.join("config").join(POLICY_FILE_NAME),
            config_dir.join(POLICY_FILE_NAME),
        ];

        for path in &paths {
            if path.exists() {
                match Self::load_from_path(path) {
                    Ok(policy) => {
                        info!("Selection policy loaded from {}", path.display());
                        return Ok(policy);
                    }
                    Err(e) => {
                        warn!("Failed to load policy from {}: {}", path.display(), e);
                        // Try next path
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load from specific path (internal helper).
    pub fn load_from_path(path: &Path) -> Result<Self, PolicyError> {
        let contents = std::fs::read_to_string(path).map_err(|e| PolicyError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        let policy: SelectionPolicy =
            toml::from_str(&contents).map_err(|e| PolicyError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        policy.validate()?;

        Ok(policy)
    }

    /// Validate the policy contents.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.priority.is_empty() {
            return Err(PolicyError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "Priority list cannot be empty".to_string(),
            });
        }

        if self.free_tier_alternative.is_empty() {
            return Err(PolicyError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "Free-tier alternative model cannot be empty".to_string(),
            });
        }

        for entry in self.denylist.iter().chain(self.priority.iter()) {
            if entry.trim().is_empty() {
                return Err(PolicyError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: "Policy lists cannot contain blank entries".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Whether a model name hits the deprecated-name denylist.
    pub fn is_denylisted(&self, model_name: &str) -> bool {
        let lower = model_name.to_lowercase();
        self.denylist
            .iter()
            .any(|entry| lower.contains(&entry.to_lowercase()))
    }

    /// Whether a model name is on the popular list.
    pub fn is_popular(&self, model_name: &str) -> bool {
        let lower = model_name.to_lowercase();
        self.popular
            .iter()
            .any(|entry| lower.contains(&entry.to_lowercase()))
    }
}
