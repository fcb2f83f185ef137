//! Host collaborator trait

use std::fmt::Debug;
use std::hash::Hash;

/// Errors raised by a host while creating instances
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The prefab is not known to the host
    #[error("Unknown prefab: {0}")]
    UnknownPrefab(String),

    /// The host cannot hold more instances
    #[error("Scene is full ({capacity} nodes)")]
    CapacityExceeded {
        /// Maximum number of live nodes
        capacity: usize,
    },

    /// Any other host-specific creation failure
    #[error("Instance creation failed: {0}")]
    Creation(String),
}

/// Engine services the pool relies on
///
/// Handles are small `Copy` values; the host owns the objects behind them.
pub trait SceneHost {
    /// Stable identity of a creatable template
    type Prefab: Copy + Eq + Hash + Debug;
    /// Handle to a live instance
    type Instance: Copy + Eq + Hash + Debug;
    /// Logical container an instance can be attached to
    type Parent: Copy + Debug;

    /// Create a new instance of `prefab`, optionally attached to `parent`
    fn instantiate(
        &mut self,
        prefab: Self::Prefab,
        parent: Option<Self::Parent>,
    ) -> Result<Self::Instance, HostError>;

    /// Permanently destroy an instance
    fn destroy(&mut self, instance: Self::Instance);

    /// Show or hide an instance
    fn set_active(&mut self, instance: Self::Instance, active: bool);

    /// Attach an instance to a new container; `None` detaches it
    fn set_parent(&mut self, instance: Self::Instance, parent: Option<Self::Parent>);

    /// Human-readable prefab name for log messages and config lookup
    fn prefab_name(&self, prefab: Self::Prefab) -> String;

    /// Reclaim backing resources nothing references any more
    ///
    /// Called after bulk teardown. Best effort.
    fn reclaim_unused(&mut self) {}
}
