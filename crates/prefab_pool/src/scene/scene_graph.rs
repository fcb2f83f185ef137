//! In-memory scene host
//!
//! Prefabs and nodes live in slot maps, so handles stay valid until the
//! node is destroyed and never alias a later node afterwards.

use crate::foundation::collections::{HandleMap, NodeId, PrefabId};
use super::host::{HostError, SceneHost};

/// Template that nodes are instantiated from
#[derive(Debug, Clone)]
pub struct Prefab {
    /// Name given to every instance
    pub name: String,
}

/// A node in the scene
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Display name
    pub name: String,
    /// Whether the node is visible / updating
    pub active: bool,
    /// Container this node is attached to
    pub parent: Option<NodeId>,
    /// Prefab the node was created from; `None` for plain containers
    pub prefab: Option<PrefabId>,
}

/// Slot-map backed scene host
#[derive(Debug, Default)]
pub struct SceneGraph {
    prefabs: HandleMap<PrefabId, Prefab>,
    nodes: HandleMap<NodeId, SceneNode>,
    max_instances: Option<usize>,
    live_instances: usize,
    created: u64,
    destroyed: u64,
    reclaims: u64,
}

impl SceneGraph {
    /// Create an empty scene with no instance limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of live prefab instances
    ///
    /// Plain container nodes made with [`create_node`](Self::create_node)
    /// do not count towards the limit.
    pub fn with_instance_limit(mut self, max_instances: usize) -> Self {
        self.max_instances = Some(max_instances);
        self
    }

    /// Register a prefab template
    pub fn register_prefab(&mut self, name: impl Into<String>) -> PrefabId {
        self.prefabs.insert(Prefab { name: name.into() })
    }

    /// Look up a prefab
    pub fn prefab(&self, id: PrefabId) -> Option<&Prefab> {
        self.prefabs.get(id)
    }

    /// Create a plain container node, e.g. a holding area or a parent group
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        self.nodes.insert(SceneNode {
            name: name.into(),
            active: true,
            parent: None,
            prefab: None,
        })
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Whether the node is still alive
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether the node is alive and active
    pub fn is_active(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.active)
    }

    /// Parent of a live node
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Direct children of a node
    pub fn children_of(&self, parent: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent == Some(parent))
            .map(|(id, _)| id)
            .collect()
    }

    /// Live instances created from `prefab`
    pub fn instances_of(&self, prefab: PrefabId) -> usize {
        self.nodes.values().filter(|node| node.prefab == Some(prefab)).count()
    }

    /// Total live nodes, containers included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Live prefab instances
    pub fn instance_count(&self) -> usize {
        self.live_instances
    }

    /// Prefab instances created since the scene was built
    pub fn created_count(&self) -> u64 {
        self.created
    }

    /// Prefab instances destroyed since the scene was built
    pub fn destroyed_count(&self) -> u64 {
        self.destroyed
    }

    /// Number of times [`SceneHost::reclaim_unused`] ran
    pub fn reclaim_count(&self) -> u64 {
        self.reclaims
    }

    fn live_parent(&self, parent: Option<NodeId>) -> Option<NodeId> {
        match parent {
            Some(id) if !self.nodes.contains_key(id) => {
                log::warn!("Parent node {:?} no longer exists, attaching to scene root", id);
                None
            }
            other => other,
        }
    }
}

impl SceneHost for SceneGraph {
    type Prefab = PrefabId;
    type Instance = NodeId;
    type Parent = NodeId;

    fn instantiate(&mut self, prefab: PrefabId, parent: Option<NodeId>) -> Result<NodeId, HostError> {
        let name = self
            .prefabs
            .get(prefab)
            .map(|template| template.name.clone())
            .ok_or_else(|| HostError::UnknownPrefab(format!("{:?}", prefab)))?;

        if let Some(capacity) = self.max_instances {
            if self.live_instances >= capacity {
                return Err(HostError::CapacityExceeded { capacity });
            }
        }

        let parent = self.live_parent(parent);
        let id = self.nodes.insert(SceneNode {
            name,
            active: true,
            parent,
            prefab: Some(prefab),
        });
        self.live_instances += 1;
        self.created += 1;
        Ok(id)
    }

    fn destroy(&mut self, instance: NodeId) {
        let Some(node) = self.nodes.remove(instance) else {
            log::warn!("Destroy called on missing node {:?}", instance);
            return;
        };

        if node.prefab.is_some() {
            self.live_instances -= 1;
            self.destroyed += 1;
        }

        // Children survive their parent and move to the scene root
        for child in self.nodes.values_mut().filter(|child| child.parent == Some(instance)) {
            child.parent = None;
        }
    }

    fn set_active(&mut self, instance: NodeId, active: bool) {
        match self.nodes.get_mut(instance) {
            Some(node) => node.active = active,
            None => log::warn!("set_active called on missing node {:?}", instance),
        }
    }

    fn set_parent(&mut self, instance: NodeId, parent: Option<NodeId>) {
        let parent = self.live_parent(parent);
        match self.nodes.get_mut(instance) {
            Some(node) => node.parent = parent,
            None => log::warn!("set_parent called on missing node {:?}", instance),
        }
    }

    fn prefab_name(&self, prefab: PrefabId) -> String {
        self.prefabs
            .get(prefab)
            .map_or_else(|| format!("{:?}", prefab), |template| template.name.clone())
    }

    fn reclaim_unused(&mut self) {
        self.reclaims += 1;
        log::debug!("Reclaiming unused scene resources ({} live nodes)", self.nodes.len());
    }
}
