//! Pool and registry configuration

use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;

use super::Config;

/// # Pool Configuration
///
/// Settings for a single prefab pool. Fixed once the pool is created;
/// asking the registry for an existing pool with different settings
/// returns the pool unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Instances created up front and parked in the free queue
    pub preload_amount: usize,
    /// Whether idle instances above `cull_above` are destroyed over time
    pub cull_despawned: bool,
    /// Idle count the culler trims down to
    pub cull_above: usize,
    /// Seconds between culling checks
    pub cull_delay: f64,
    /// Upper bound on instances destroyed per culling pass
    pub cull_max_per_pass: usize,
}

impl PoolConfig {
    /// Create a pool configuration with the default settings
    pub fn new() -> Self {
        Self {
            preload_amount: 0,
            cull_despawned: false,
            cull_above: 10,
            cull_delay: 30.0,
            cull_max_per_pass: 5,
        }
    }

    /// Set the number of preloaded instances
    pub fn with_preload(mut self, amount: usize) -> Self {
        self.preload_amount = amount;
        self
    }

    /// Enable culling of idle instances
    ///
    /// Idle instances above `above` are destroyed `max_per_pass` at a time,
    /// one pass every `delay` seconds.
    pub fn with_culling(mut self, above: usize, delay: f64, max_per_pass: usize) -> Self {
        self.cull_despawned = true;
        self.cull_above = above;
        self.cull_delay = delay;
        self.cull_max_per_pass = max_per_pass;
        self
    }

    /// Turn culling on or off without touching its parameters
    pub fn with_cull_despawned(mut self, enabled: bool) -> Self {
        self.cull_despawned = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.cull_delay.is_finite() || self.cull_delay < 0.0 {
            return Err(format!("Cull delay must be a non-negative number of seconds, got {}", self.cull_delay));
        }

        if self.cull_despawned && self.cull_max_per_pass == 0 {
            return Err("Cull max per pass must be at least 1 when culling is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for PoolConfig {}

/// # Registry Configuration
///
/// Top-level configuration for a [`PoolRegistry`](crate::pool::PoolRegistry).
/// Pools created lazily by `acquire` take their settings from `pools`
/// when the prefab name has an entry, otherwise from `default_pool`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Whether pools log culling progress
    pub log_messages: bool,
    /// Settings for pools without a named override
    pub default_pool: PoolConfig,
    /// Per-prefab overrides keyed by prefab name
    pub pools: BTreeMap<String, PoolConfig>,
}

impl RegistryConfig {
    /// Create a registry configuration with defaults
    pub fn new() -> Self {
        Self {
            log_messages: true,
            default_pool: PoolConfig::default(),
            pools: BTreeMap::new(),
        }
    }

    /// Enable or disable culling log messages
    pub fn with_log_messages(mut self, enabled: bool) -> Self {
        self.log_messages = enabled;
        self
    }

    /// Replace the settings used for pools without an override
    pub fn with_default_pool(mut self, config: PoolConfig) -> Self {
        self.default_pool = config;
        self
    }

    /// Register settings for the prefab with the given name
    pub fn with_pool(mut self, prefab_name: impl Into<String>, config: PoolConfig) -> Self {
        self.pools.insert(prefab_name.into(), config);
        self
    }

    /// Settings for a prefab, falling back to the default pool settings
    pub fn pool_config_for(&self, prefab_name: &str) -> &PoolConfig {
        self.pools.get(prefab_name).unwrap_or(&self.default_pool)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.default_pool.validate()?;
        for (name, config) in &self.pools {
            config.validate().map_err(|reason| format!("Pool '{}': {}", name, reason))?;
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for RegistryConfig {}
