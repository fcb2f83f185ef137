//! Pool usage statistics

/// Counters kept by a single prefab pool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Fresh instances created, preloads included
    pub created: u64,
    /// Acquires served from the free queue
    pub reused: u64,
    /// Instances returned to the free queue
    pub released: u64,
    /// Instances destroyed by culling
    pub culled: u64,
    /// Culling passes that inspected the free queue
    pub cull_passes: u64,
    /// Culling cycles started
    pub cull_cycles: u64,
}

/// Counters kept by the registry across all pools
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Pools created since the registry was built
    pub pools_created: u64,
    /// Successful acquires
    pub acquired: u64,
    /// Successful releases, deferred ones included
    pub released: u64,
    /// Releases rejected because the instance was not outstanding
    pub rejected_releases: u64,
    /// Deferred releases scheduled
    pub deferred_releases: u64,
    /// Idle instances destroyed by `release_pool` and `teardown_all`
    pub destroyed_idle: u64,
    /// Instances destroyed by culling
    pub culled: u64,
}
