//! Prefab instance pooling
//!
//! ```text
//! PoolRegistry
//!   ├── pools: prefab ──► PrefabPool (free queue + culling)
//!   ├── outstanding: instance ──► prefab
//!   └── scheduler: delayed releases and culling checks
//! ```

mod error;
mod prefab_pool;
mod registry;
mod stats;

#[cfg(test)]
mod tests;

pub use error::PoolError;
pub use prefab_pool::PrefabPool;
pub use registry::PoolRegistry;
pub use stats::{PoolStats, RegistryStats};

use crate::scene::SceneHost;
use crate::scheduler::{PoolTask, Scheduler};

/// Scheduler carrying the deferred work for pools over host `H`
pub type PoolScheduler<H> = Scheduler<PoolTask<<H as SceneHost>::Prefab, <H as SceneHost>::Instance>>;
