//! Single-prefab instance pool
//!
//! Keeps a FIFO queue of idle instances for one prefab. Acquiring takes
//! the instance that has been idle longest; releasing parks an instance at
//! the back of the queue. When culling is enabled and the idle count rises
//! above `cull_above`, a culling cycle starts:
//!
//! ```text
//! Idle ──release, count > cull_above──► Active
//!                                         │ wait cull_delay
//!                                         ▼
//!                       count > cull_above? ── yes ──► destroy up to
//!                                         │            cull_max_per_pass,
//!                                         no           wait cull_delay again
//!                                         ▼
//!                                       Idle
//! ```
//!
//! The first wait always elapses before the idle count is inspected. The
//! pool remembers the id of the cull it is waiting on, so a cull scheduled
//! by an earlier pool for the same prefab never drives this one.

use std::collections::VecDeque;

use crate::config::PoolConfig;
use crate::scene::SceneHost;
use crate::scheduler::{PoolTask, TaskId};
use super::{PoolError, PoolScheduler, PoolStats};

/// Pool of reusable instances for a single prefab
pub struct PrefabPool<H: SceneHost> {
    prefab: H::Prefab,
    name: String,
    config: PoolConfig,
    free: VecDeque<H::Instance>,
    holding_area: Option<H::Parent>,
    pending_cull: Option<TaskId>,
    log_messages: bool,
    stats: PoolStats,
}

impl<H: SceneHost> PrefabPool<H> {
    /// Create a pool and preload `config.preload_amount` idle instances
    ///
    /// Preloaded instances are deactivated and parked under `holding_area`.
    /// If creating any of them fails, the ones already made are destroyed
    /// and the host error is returned.
    pub fn new(
        host: &mut H,
        scheduler: &mut PoolScheduler<H>,
        prefab: H::Prefab,
        config: PoolConfig,
        holding_area: Option<H::Parent>,
    ) -> Result<Self, PoolError> {
        let name = host.prefab_name(prefab);
        config.validate().map_err(|reason| PoolError::InvalidConfig {
            prefab: name.clone(),
            reason,
        })?;

        let mut pool = Self {
            prefab,
            name,
            free: VecDeque::with_capacity(config.preload_amount),
            config,
            holding_area,
            pending_cull: None,
            log_messages: true,
            stats: PoolStats::default(),
        };

        for _ in 0..pool.config.preload_amount {
            match host.instantiate(prefab, None) {
                Ok(instance) => {
                    pool.stats.created += 1;
                    pool.park(host, instance);
                }
                Err(err) => {
                    log::error!("Preloading pool {} failed after {} instances: {}", pool.name, pool.free.len(), err);
                    pool.destroy_all(host);
                    return Err(err.into());
                }
            }
        }

        // Preloading counts as a run of releases, so it can start culling too
        pool.try_start_culling(scheduler);

        log::info!("Created pool {} with {} preloaded instances", pool.name, pool.free.len());
        Ok(pool)
    }

    /// Enable or disable culling progress messages
    pub fn with_log_messages(mut self, enabled: bool) -> Self {
        self.log_messages = enabled;
        self
    }

    /// Hand out an instance, reusing the longest-idle one if available
    ///
    /// The instance is attached to `parent` and activated.
    pub fn acquire(&mut self, host: &mut H, parent: Option<H::Parent>) -> Result<H::Instance, PoolError> {
        if let Some(instance) = self.free.pop_front() {
            host.set_parent(instance, parent);
            host.set_active(instance, true);
            self.stats.reused += 1;
            log::trace!("Pool {} reused {:?}, {} idle", self.name, instance, self.free.len());
            return Ok(instance);
        }

        let instance = host.instantiate(self.prefab, parent)?;
        host.set_active(instance, true);
        self.stats.created += 1;
        log::debug!("Pool {} created {:?}", self.name, instance);
        Ok(instance)
    }

    /// Take an instance back into the free queue
    ///
    /// The instance is deactivated and parked under the holding area. May
    /// start a culling cycle.
    pub fn release(&mut self, host: &mut H, scheduler: &mut PoolScheduler<H>, instance: H::Instance) {
        self.park(host, instance);
        self.stats.released += 1;
        self.try_start_culling(scheduler);
    }

    /// Run one culling check; called when the scheduled cull `task` comes due
    ///
    /// A task other than the one this pool is waiting on is ignored.
    /// Returns the number of instances destroyed.
    pub fn cull(&mut self, host: &mut H, scheduler: &mut PoolScheduler<H>, task: TaskId) -> usize {
        if self.pending_cull != Some(task) {
            log::debug!("Pool {} ignored stale cull {:?}", self.name, task);
            return 0;
        }

        let above = self.config.cull_above;
        if self.count() <= above {
            if self.log_messages {
                log::info!("Pool {}: culling finished, stopping", self.name);
            }
            self.pending_cull = None;
            return 0;
        }

        // An empty queue is never above the threshold, so a pass always has work
        let before = self.count();
        let destroyed = (before - above).min(self.config.cull_max_per_pass);
        for instance in self.free.drain(..destroyed) {
            host.destroy(instance);
        }

        self.stats.culled += destroyed as u64;
        self.stats.cull_passes += 1;
        if self.log_messages {
            log::info!(
                "Pool {}: culling to {} instances, now from {} to {}",
                self.name, above, before, self.count()
            );
        }

        self.pending_cull = Some(scheduler.schedule(self.config.cull_delay, PoolTask::Cull(self.prefab)));
        destroyed
    }

    /// Destroy every idle instance
    ///
    /// Outstanding instances are not tracked by the pool and stay alive.
    /// Returns the number of instances destroyed.
    pub fn destroy_all(&mut self, host: &mut H) -> usize {
        let count = self.free.len();
        for instance in self.free.drain(..) {
            host.destroy(instance);
        }
        if count > 0 {
            log::debug!("Pool {} destroyed {} idle instances", self.name, count);
        }
        count
    }

    /// Number of idle instances
    pub fn count(&self) -> usize {
        self.free.len()
    }

    /// Idle instances, longest idle first
    pub fn idle(&self) -> impl Iterator<Item = &H::Instance> {
        self.free.iter()
    }

    /// Whether an instance is sitting in the free queue
    pub fn is_idle(&self, instance: H::Instance) -> bool {
        self.free.contains(&instance)
    }

    /// Prefab this pool creates
    pub fn prefab(&self) -> H::Prefab {
        self.prefab
    }

    /// Prefab name captured at creation
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pool settings
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Whether a culling cycle is in flight
    pub fn is_culling(&self) -> bool {
        self.pending_cull.is_some()
    }

    /// Usage counters
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    fn park(&mut self, host: &mut H, instance: H::Instance) {
        host.set_active(instance, false);
        host.set_parent(instance, self.holding_area);
        self.free.push_back(instance);
    }

    fn try_start_culling(&mut self, scheduler: &mut PoolScheduler<H>) {
        if self.pending_cull.is_none()
            && self.config.cull_despawned
            && self.count() > self.config.cull_above
        {
            self.stats.cull_cycles += 1;
            log::debug!(
                "Pool {} has {} idle instances (limit {}), culling in {}s",
                self.name, self.count(), self.config.cull_above, self.config.cull_delay
            );
            self.pending_cull = Some(scheduler.schedule(self.config.cull_delay, PoolTask::Cull(self.prefab)));
        }
    }
}

impl<H: SceneHost> std::fmt::Debug for PrefabPool<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefabPool")
            .field("prefab", &self.prefab)
            .field("name", &self.name)
            .field("idle", &self.free.len())
            .field("pending_cull", &self.pending_cull)
            .finish()
    }
}
