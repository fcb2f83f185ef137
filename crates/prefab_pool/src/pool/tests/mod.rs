//! Cross-component scenarios for the registry, pools and scheduler

mod lifecycle;

use crate::config::{PoolConfig, RegistryConfig};
use crate::foundation::collections::PrefabId;
use crate::pool::PoolRegistry;
use crate::scene::SceneGraph;

/// Registry over a fresh scene with two registered prefabs
fn registry_with_prefabs() -> (PoolRegistry<SceneGraph>, PrefabId, PrefabId) {
    crate::foundation::logging::init_for_tests();

    let mut scene = SceneGraph::new();
    let bullet = scene.register_prefab("Bullet");
    let rock = scene.register_prefab("Rock");
    let holder = scene.create_node("PoolRoot");

    let registry = PoolRegistry::new(scene).with_holding_area(holder);
    (registry, bullet, rock)
}

/// Registry whose pools log nothing and cull with the given settings
fn culling_registry(above: usize, delay: f64, max_per_pass: usize) -> (PoolRegistry<SceneGraph>, PrefabId) {
    crate::foundation::logging::init_for_tests();

    let mut scene = SceneGraph::new();
    let prefab = scene.register_prefab("Spark");
    let config = RegistryConfig::new()
        .with_log_messages(false)
        .with_default_pool(PoolConfig::new().with_culling(above, delay, max_per_pass));

    let registry = PoolRegistry::from_config(scene, config).expect("valid config");
    (registry, prefab)
}
