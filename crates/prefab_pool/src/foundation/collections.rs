//! Specialized collection types

pub use slotmap::SlotMap;
use slotmap::new_key_type;

new_key_type! {
    /// Handle to a registered prefab template
    pub struct PrefabId;

    /// Handle to a live scene node
    pub struct NodeId;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<K, T> = SlotMap<K, T>;
