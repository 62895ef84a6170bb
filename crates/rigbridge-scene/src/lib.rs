//! In-memory implementation of the rigbridge Skeleton Access Layer.
//!
//! `MemoryScene` is the reference `SceneGraph` backend: a headless scene
//! holding mesh and armature objects in insertion order. It serves as the
//! test double for the rigging core and as the scene the server binary
//! drives when no live host is attached. Scene descriptions round-trip
//! through serde, so a scene can be loaded from a JSON file at startup.

#![deny(unsafe_code)]

mod object;
mod scene;

pub use object::{ArmatureData, BoneRecord, MeshData, ObjectData, SceneObject, VertexGroup};
pub use scene::MemoryScene;
