//! # Prefab Pool
//!
//! Instance pooling for scene entities that are expensive to create.
//! Instances are recycled per prefab instead of being created and
//! destroyed over and over.
//!
//! ## Features
//!
//! - **Per-prefab pools**: FIFO reuse of idle instances, optional preloading
//! - **Delayed culling**: excess idle instances trimmed a few at a time
//! - **Deferred release**: hand an instance back after a delay
//! - **Host agnostic**: engine calls go through the [`scene::SceneHost`] trait
//! - **Config files**: pool settings from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use prefab_pool::prelude::*;
//!
//! let mut scene = SceneGraph::new();
//! let bullet = scene.register_prefab("Bullet");
//! let pool_root = scene.create_node("PoolRoot");
//!
//! let mut pools = PoolRegistry::new(scene).with_holding_area(pool_root);
//! pools.create_pool(bullet, PoolConfig::new().with_preload(8).with_culling(10, 30.0, 5))?;
//!
//! let shot = pools.acquire(bullet, None)?;
//! pools.release(shot)?;
//!
//! // Drive delayed releases and culling from the game loop
//! pools.update(1.0 / 60.0);
//!
//! pools.teardown_all();
//! # Ok::<(), PoolError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod scheduler;
pub mod scene;
pub mod pool;

/// Common imports for pool users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigFormat, PoolConfig, RegistryConfig},
        foundation::collections::{NodeId, PrefabId},
        pool::{PoolError, PoolRegistry, PrefabPool},
        scene::{HostError, SceneGraph, SceneHost},
    };
}
