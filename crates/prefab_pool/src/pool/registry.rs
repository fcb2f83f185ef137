//! Pool registry
//!
//! Owns the host, one [`PrefabPool`] per prefab and the scheduler that
//! drives delayed releases and culling. Every instance handed out by
//! [`acquire`](PoolRegistry::acquire) is tagged with its prefab until it
//! is released, so callers only ever pass the instance back.
//!
//! # Usage
//!
//! ```rust
//! use prefab_pool::prelude::*;
//!
//! let mut scene = SceneGraph::new();
//! let bullet = scene.register_prefab("Bullet");
//! let mut pools = PoolRegistry::new(scene);
//!
//! let shot = pools.acquire(bullet, None)?;
//! pools.release_after(shot, 5.0);
//!
//! // Once per frame
//! pools.update(1.0 / 60.0);
//! # Ok::<(), PoolError>(())
//! ```

use std::collections::HashMap;

use crate::config::{PoolConfig, RegistryConfig};
use crate::scene::SceneHost;
use crate::scheduler::{PoolTask, Scheduler, TaskId};
use super::{PoolError, PoolScheduler, PrefabPool, RegistryStats};

/// Registry of prefab pools and outstanding instances
pub struct PoolRegistry<H: SceneHost> {
    host: H,
    config: RegistryConfig,
    holding_area: Option<H::Parent>,
    pools: HashMap<H::Prefab, PrefabPool<H>>,
    outstanding: HashMap<H::Instance, H::Prefab>,
    scheduler: PoolScheduler<H>,
    stats: RegistryStats,
}

impl<H: SceneHost> PoolRegistry<H> {
    /// Create a registry with default settings
    pub fn new(host: H) -> Self {
        Self {
            host,
            config: RegistryConfig::default(),
            holding_area: None,
            pools: HashMap::new(),
            outstanding: HashMap::new(),
            scheduler: Scheduler::new(),
            stats: RegistryStats::default(),
        }
    }

    /// Create a registry from a validated configuration
    pub fn from_config(host: H, config: RegistryConfig) -> Result<Self, PoolError> {
        config.validate().map_err(|reason| PoolError::InvalidConfig {
            prefab: "<registry>".to_string(),
            reason,
        })?;

        let mut registry = Self::new(host);
        registry.config = config;
        Ok(registry)
    }

    /// Park idle instances under `parent`
    ///
    /// Applies to pools created after this call.
    pub fn with_holding_area(mut self, parent: H::Parent) -> Self {
        self.holding_area = Some(parent);
        self
    }

    /// Get the pool for `prefab`, creating it with `config` if needed
    ///
    /// An existing pool is returned unchanged and `config` is ignored.
    pub fn create_pool(&mut self, prefab: H::Prefab, config: PoolConfig) -> Result<&PrefabPool<H>, PoolError> {
        self.ensure_pool(prefab, Some(config))?;
        self.pools
            .get(&prefab)
            .ok_or_else(|| PoolError::PoolNotFound(self.host.prefab_name(prefab)))
    }

    /// Create the pool for `prefab` with `amount` preloaded instances
    ///
    /// Other settings come from the registry configuration. Does nothing
    /// to a pool that already exists.
    pub fn preload(&mut self, prefab: H::Prefab, amount: usize) -> Result<&PrefabPool<H>, PoolError> {
        let config = self.configured_pool(prefab).with_preload(amount);
        self.create_pool(prefab, config)
    }

    /// Look up an existing pool
    pub fn pool(&self, prefab: H::Prefab) -> Option<&PrefabPool<H>> {
        self.pools.get(&prefab)
    }

    /// Take an instance of `prefab` from its pool
    ///
    /// Creates the pool on first use. The instance is activated, attached
    /// to `parent` and stays outstanding until released.
    pub fn acquire(&mut self, prefab: H::Prefab, parent: Option<H::Parent>) -> Result<H::Instance, PoolError> {
        self.ensure_pool(prefab, None)?;
        let pool = self
            .pools
            .get_mut(&prefab)
            .ok_or_else(|| PoolError::PoolNotFound(self.host.prefab_name(prefab)))?;

        let instance = pool.acquire(&mut self.host, parent)?;
        if self.outstanding.insert(instance, prefab).is_some() {
            log::error!("Host returned {:?}, which is already outstanding", instance);
        }
        self.stats.acquired += 1;
        Ok(instance)
    }

    /// Return an outstanding instance to its pool
    ///
    /// Releasing an instance that was never acquired here, or was already
    /// released, logs a warning and changes nothing.
    pub fn release(&mut self, instance: H::Instance) -> Result<(), PoolError> {
        let Some(prefab) = self.outstanding.remove(&instance) else {
            self.stats.rejected_releases += 1;
            log::warn!("Instance {:?} does not belong to any pool or was already released", instance);
            return Err(PoolError::NotOutstanding(format!("{:?}", instance)));
        };

        match self.pools.get_mut(&prefab) {
            Some(pool) => {
                pool.release(&mut self.host, &mut self.scheduler, instance);
                self.stats.released += 1;
                Ok(())
            }
            None => {
                let name = self.host.prefab_name(prefab);
                log::error!("Pool {} is gone, destroying released instance {:?}", name, instance);
                self.host.destroy(instance);
                Err(PoolError::PoolNotFound(name))
            }
        }
    }

    /// Release an instance once `delay` seconds have passed
    ///
    /// Not deduplicated: scheduling two releases for one instance makes
    /// the second one a rejected release.
    pub fn release_after(&mut self, instance: H::Instance, delay: f64) -> TaskId {
        self.stats.deferred_releases += 1;
        log::trace!("Release of {:?} scheduled in {}s", instance, delay);
        self.scheduler.schedule(delay, PoolTask::Release(instance))
    }

    /// Destroy every idle instance of `prefab` and reclaim host resources
    ///
    /// The pool itself stays registered; outstanding instances are untouched.
    pub fn release_pool(&mut self, prefab: H::Prefab) -> Result<(), PoolError> {
        let Some(pool) = self.pools.get_mut(&prefab) else {
            let name = self.host.prefab_name(prefab);
            log::error!("No pool exists for {}, cannot release it", name);
            return Err(PoolError::PoolNotFound(name));
        };

        let destroyed = pool.destroy_all(&mut self.host);
        self.stats.destroyed_idle += destroyed as u64;
        log::info!("Released pool {} ({} idle instances destroyed)", pool.name(), destroyed);

        self.host.reclaim_unused();
        Ok(())
    }

    /// Destroy all idle instances, forget every pool and outstanding tag
    ///
    /// Outstanding instances stay alive but can no longer be released.
    /// Deferred work that is still scheduled becomes a no-op, even for a
    /// pool later recreated for the same prefab.
    pub fn teardown_all(&mut self) {
        let mut destroyed = 0;
        for pool in self.pools.values_mut() {
            destroyed += pool.destroy_all(&mut self.host);
        }
        self.stats.destroyed_idle += destroyed as u64;

        log::info!(
            "Tore down {} pools ({} idle destroyed, {} outstanding forgotten)",
            self.pools.len(), destroyed, self.outstanding.len()
        );
        self.pools.clear();
        self.outstanding.clear();

        self.host.reclaim_unused();
    }

    /// Advance the clock and run deferred work that has come due
    ///
    /// Work scheduled while this runs waits for a later update.
    pub fn update(&mut self, delta_time: f64) {
        self.scheduler.advance(delta_time);
        for (id, task) in self.scheduler.take_due() {
            self.run_task(id, task);
        }
    }

    /// Whether an instance is currently lent out
    pub fn is_outstanding(&self, instance: H::Instance) -> bool {
        self.outstanding.contains_key(&instance)
    }

    /// Number of instances currently lent out
    pub fn outstanding_count(&self) -> usize {
        self.outstanding.len()
    }

    /// Prefab an outstanding instance was taken from
    pub fn owner_of(&self, instance: H::Instance) -> Option<H::Prefab> {
        self.outstanding.get(&instance).copied()
    }

    /// Number of registered pools
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Iterate over registered pools
    pub fn pools(&self) -> impl Iterator<Item = &PrefabPool<H>> {
        self.pools.values()
    }

    /// Usage counters
    pub fn stats(&self) -> &RegistryStats {
        &self.stats
    }

    /// Registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The scene host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the scene host
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Current scheduler time in seconds
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    /// Deferred releases and culling checks still waiting
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    fn configured_pool(&self, prefab: H::Prefab) -> PoolConfig {
        self.config.pool_config_for(&self.host.prefab_name(prefab)).clone()
    }

    fn ensure_pool(&mut self, prefab: H::Prefab, config: Option<PoolConfig>) -> Result<(), PoolError> {
        if self.pools.contains_key(&prefab) {
            return Ok(());
        }

        let config = config.unwrap_or_else(|| self.configured_pool(prefab));
        let pool = PrefabPool::new(&mut self.host, &mut self.scheduler, prefab, config, self.holding_area)?
            .with_log_messages(self.config.log_messages);
        self.pools.insert(prefab, pool);
        self.stats.pools_created += 1;
        Ok(())
    }

    fn run_task(&mut self, id: TaskId, task: PoolTask<H::Prefab, H::Instance>) {
        match task {
            PoolTask::Release(instance) => {
                // Failures are already logged by `release`
                let _ = self.release(instance);
            }
            PoolTask::Cull(prefab) => match self.pools.get_mut(&prefab) {
                Some(pool) => {
                    let culled = pool.cull(&mut self.host, &mut self.scheduler, id);
                    self.stats.culled += culled as u64;
                }
                None => log::debug!("Skipping cull for removed pool {:?}", prefab),
            },
        }
    }
}

impl<H: SceneHost + std::fmt::Debug> std::fmt::Debug for PoolRegistry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("host", &self.host)
            .field("pools", &self.pools.len())
            .field("outstanding", &self.outstanding.len())
            .field("pending_tasks", &self.scheduler.pending())
            .finish()
    }
}
