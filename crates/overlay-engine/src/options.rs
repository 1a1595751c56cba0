//! Engine configuration

use serde::{Deserialize, Serialize};

/// Where an overlay may load files from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadRestrictions {
    /// Files must live in or below the declaring overlay's directory
    #[default]
    RootOnly,
    /// Any file in the store may be loaded
    None,
}

/// Whether executable extensions (generators, transformers, validators)
/// may run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginPolicy {
    #[default]
    Disabled,
    Enabled,
}

/// Options passed to an [`OverlayEngine`](crate::OverlayEngine) for one
/// resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EngineOptions {
    pub load_restrictions: LoadRestrictions,
    pub plugins: PluginPolicy,
}

impl EngineOptions {
    /// Root-only loading with every plugin mechanism disabled.
    pub fn locked_down() -> Self {
        Self {
            load_restrictions: LoadRestrictions::RootOnly,
            plugins: PluginPolicy::Disabled,
        }
    }
}
