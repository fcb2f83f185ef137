//! Acquire / release / teardown scenarios

use super::*;
use crate::pool::PoolError;
use crate::scene::{HostError, SceneHost};

#[test]
fn test_outstanding_tracks_acquires_minus_releases() {
    let (mut registry, bullet, rock) = registry_with_prefabs();

    let mut live = Vec::new();
    for round in 0..6 {
        live.push(registry.acquire(bullet, None).unwrap());
        live.push(registry.acquire(rock, None).unwrap());
        if round % 2 == 1 {
            let instance = live.remove(0);
            registry.release(instance).unwrap();
        }

        assert_eq!(registry.outstanding_count(), live.len());
        for pool in registry.pools() {
            for &idle in pool.idle() {
                assert!(!registry.is_outstanding(idle));
            }
        }
    }

    assert_eq!(registry.stats().acquired, 12);
    assert_eq!(registry.stats().released, 3);
}

#[test]
fn test_prefabs_never_share_instances() {
    let (mut registry, bullet, rock) = registry_with_prefabs();

    let shot = registry.acquire(bullet, None).unwrap();
    registry.release(shot).unwrap();

    let boulder = registry.acquire(rock, None).unwrap();
    assert_ne!(boulder, shot);
    assert_eq!(registry.host().node(boulder).unwrap().prefab, Some(rock));
    assert_eq!(registry.owner_of(boulder), Some(rock));
    assert_eq!(registry.pool_count(), 2);

    // The idle bullet is still waiting in its own pool
    assert!(registry.pool(bullet).unwrap().is_idle(shot));
    assert_eq!(registry.pool(rock).unwrap().count(), 0);
}

#[test]
fn test_reuse_is_fifo_without_creating() {
    let (mut registry, bullet, _) = registry_with_prefabs();

    let first = registry.acquire(bullet, None).unwrap();
    let second = registry.acquire(bullet, None).unwrap();
    let third = registry.acquire(bullet, None).unwrap();
    registry.release(second).unwrap();
    registry.release(first).unwrap();
    registry.release(third).unwrap();

    let created = registry.host().created_count();
    assert_eq!(registry.acquire(bullet, None).unwrap(), second);
    assert_eq!(registry.acquire(bullet, None).unwrap(), first);
    assert_eq!(registry.acquire(bullet, None).unwrap(), third);
    assert_eq!(registry.host().created_count(), created);
}

#[test]
fn test_acquired_instance_is_active_under_parent() {
    let (mut registry, bullet, _) = registry_with_prefabs();
    let turret = registry.host_mut().create_node("Turret");

    let shot = registry.acquire(bullet, Some(turret)).unwrap();
    assert!(registry.host().is_active(shot));
    assert_eq!(registry.host().parent_of(shot), Some(turret));

    registry.release(shot).unwrap();
    assert!(!registry.host().is_active(shot));
    assert_ne!(registry.host().parent_of(shot), Some(turret));
}

#[test]
fn test_double_release_warns_once() {
    let (mut registry, bullet, _) = registry_with_prefabs();

    let shot = registry.acquire(bullet, None).unwrap();
    registry.release(shot).unwrap();
    let second = registry.release(shot);

    assert!(matches!(second, Err(PoolError::NotOutstanding(_))));
    assert_eq!(registry.stats().rejected_releases, 1);
    let pool = registry.pool(bullet).unwrap();
    assert_eq!(pool.count(), 1);
    assert_eq!(pool.idle().filter(|&&idle| idle == shot).count(), 1);
}

#[test]
fn test_release_of_foreign_instance_is_rejected() {
    let (mut registry, bullet, _) = registry_with_prefabs();
    let stray = registry.host_mut().instantiate(bullet, None).unwrap();

    assert!(registry.release(stray).is_err());
    assert_eq!(registry.pool_count(), 0);
    assert!(registry.host().is_active(stray));
}

#[test]
fn test_teardown_destroys_idle_and_keeps_outstanding() {
    let (mut registry, bullet, rock) = registry_with_prefabs();

    let kept = registry.acquire(bullet, None).unwrap();
    let idle_bullet = registry.acquire(bullet, None).unwrap();
    let idle_rock = registry.acquire(rock, None).unwrap();
    registry.release(idle_bullet).unwrap();
    registry.release(idle_rock).unwrap();

    registry.teardown_all();

    assert_eq!(registry.pool_count(), 0);
    assert_eq!(registry.outstanding_count(), 0);
    assert!(!registry.host().contains(idle_bullet));
    assert!(!registry.host().contains(idle_rock));
    assert!(registry.host().contains(kept));
    assert!(registry.host().is_active(kept));
    assert_eq!(registry.host().reclaim_count(), 1);
    assert_eq!(registry.stats().destroyed_idle, 2);
}

#[test]
fn test_release_after_teardown_is_noop() {
    let (mut registry, bullet, _) = registry_with_prefabs();

    let shot = registry.acquire(bullet, None).unwrap();
    registry.release_after(shot, 1.0);
    registry.teardown_all();

    registry.update(2.0);
    assert_eq!(registry.stats().rejected_releases, 1);
    assert_eq!(registry.pool_count(), 0);
    assert!(registry.host().contains(shot));
}

#[test]
fn test_deferred_release_waits_for_delay() {
    let (mut registry, bullet, _) = registry_with_prefabs();

    let shot = registry.acquire(bullet, None).unwrap();
    registry.release_after(shot, 5.0);

    registry.update(2.5);
    registry.update(2.25);
    assert!(registry.is_outstanding(shot));
    assert_eq!(registry.pool(bullet).unwrap().count(), 0);

    registry.update(0.25);
    assert!(!registry.is_outstanding(shot));
    assert_eq!(registry.pool(bullet).unwrap().count(), 1);

    registry.update(10.0);
    assert_eq!(registry.pool(bullet).unwrap().count(), 1);
    assert_eq!(registry.stats().released, 1);
    assert_eq!(registry.stats().rejected_releases, 0);
}

#[test]
fn test_overlapping_deferred_releases_reject_the_second() {
    let (mut registry, bullet, _) = registry_with_prefabs();

    let shot = registry.acquire(bullet, None).unwrap();
    registry.release_after(shot, 1.0);
    registry.release_after(shot, 2.0);

    registry.update(3.0);
    assert_eq!(registry.stats().released, 1);
    assert_eq!(registry.stats().rejected_releases, 1);
    assert_eq!(registry.pool(bullet).unwrap().count(), 1);
}

#[test]
fn test_create_pool_is_idempotent() {
    let (mut registry, bullet, _) = registry_with_prefabs();

    registry.create_pool(bullet, PoolConfig::new().with_preload(2)).unwrap();
    let pool = registry.create_pool(bullet, PoolConfig::new().with_preload(7)).unwrap();

    assert_eq!(pool.count(), 2);
    assert_eq!(pool.config().preload_amount, 2);
    assert_eq!(registry.stats().pools_created, 1);
}

#[test]
fn test_preload_parks_under_holding_area() {
    let (mut registry, bullet, _) = registry_with_prefabs();

    let idle: Vec<_> = registry.preload(bullet, 3).unwrap().idle().copied().collect();
    assert_eq!(idle.len(), 3);

    let parent = registry.host().parent_of(idle[0]);
    assert!(parent.is_some());
    for instance in idle {
        assert_eq!(registry.host().parent_of(instance), parent);
        assert!(!registry.host().is_active(instance));
    }
}

#[test]
fn test_lazy_pool_uses_named_override() {
    let mut scene = SceneGraph::new();
    let bullet = scene.register_prefab("Bullet");
    let rock = scene.register_prefab("Rock");
    let config = RegistryConfig::new().with_pool("Bullet", PoolConfig::new().with_preload(4));
    let mut registry = PoolRegistry::from_config(scene, config).unwrap();

    registry.acquire(bullet, None).unwrap();
    registry.acquire(rock, None).unwrap();

    assert_eq!(registry.pool(bullet).unwrap().count(), 3);
    assert_eq!(registry.pool(rock).unwrap().count(), 0);
}

#[test]
fn test_release_pool_destroys_idle_only() {
    let (mut registry, bullet, _) = registry_with_prefabs();

    let kept = registry.acquire(bullet, None).unwrap();
    let idle = registry.acquire(bullet, None).unwrap();
    registry.release(idle).unwrap();

    registry.release_pool(bullet).unwrap();
    assert_eq!(registry.pool(bullet).unwrap().count(), 0);
    assert!(!registry.host().contains(idle));
    assert!(registry.is_outstanding(kept));
    assert_eq!(registry.host().reclaim_count(), 1);

    // The pool is still registered and takes the survivor back
    registry.release(kept).unwrap();
    assert_eq!(registry.pool(bullet).unwrap().count(), 1);
}

#[test]
fn test_release_pool_unknown_prefab() {
    let (mut registry, _, rock) = registry_with_prefabs();

    assert!(matches!(registry.release_pool(rock), Err(PoolError::PoolNotFound(name)) if name == "Rock"));
    assert_eq!(registry.host().reclaim_count(), 0);
}

#[test]
fn test_creation_failure_leaves_no_tag() {
    let mut scene = SceneGraph::new().with_instance_limit(1);
    let rock = scene.register_prefab("Rock");
    let mut registry = PoolRegistry::new(scene);

    registry.acquire(rock, None).unwrap();
    let err = registry.acquire(rock, None).unwrap_err();

    assert_eq!(err, PoolError::Host(HostError::CapacityExceeded { capacity: 1 }));
    assert_eq!(registry.outstanding_count(), 1);
    assert_eq!(registry.stats().acquired, 1);
}

#[test]
fn test_invalid_registry_config_rejected() {
    let config = RegistryConfig::new().with_default_pool(PoolConfig::new().with_culling(1, -2.0, 1));
    assert!(matches!(
        PoolRegistry::from_config(SceneGraph::new(), config),
        Err(PoolError::InvalidConfig { .. })
    ));
}
