//! Scene host abstraction
//!
//! The pool never touches engine objects directly. Everything it needs
//! from the host (creating, destroying, showing/hiding and reparenting
//! instances) goes through [`SceneHost`]. [`SceneGraph`] is a small
//! in-memory host backed by slot maps, used for headless runs and tests.

mod host;
mod scene_graph;

pub use host::{SceneHost, HostError};
pub use scene_graph::{SceneGraph, SceneNode, Prefab};
