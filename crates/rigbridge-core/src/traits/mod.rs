//! Core traits for the rigbridge workspace.
//!
//! The only seam here is the Skeleton Access Layer: the `SceneGraph` trait
//! through which the rigging core reads and mutates the host application's
//! scene. The host's live object graph is never mirrored in owned memory;
//! every inspection rebuilds its view from these operations.

mod scene;

pub use scene::{Aabb, BoneAxis, BoneInfo, ExportSettings, NewBone, ObjectRef, ScaleMode, SceneGraph};
