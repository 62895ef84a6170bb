//! The Skeleton Access Layer: the scene contract the rigging core consumes.
//!
//! The host scene is treated as an external service. Reads return owned
//! snapshots (bone lists, bounding boxes); mutations are individual
//! operations that the host adapter is free to bracket in whatever
//! edit-mode discipline it needs. All access is synchronous: scene mutation
//! is main-thread-affine and the server serializes commands before they
//! reach this trait.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::ObjectKind;

/// A scene object reference: name plus type tag, in scene iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Unique object name within the scene.
    pub name: String,
    /// Object type tag.
    pub kind: ObjectKind,
}

/// Snapshot of one bone in an armature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneInfo {
    /// Bone name, unique within the armature.
    pub name: String,
    /// Parent bone name, `None` for a root bone.
    pub parent: Option<String>,
    /// Direct child bone names, in armature order.
    pub children: Vec<String>,
    /// Head position in the armature's local space.
    pub head: Vec3,
    /// Tail position in the armature's local space.
    pub tail: Vec3,
}

/// A bone to create in an armature.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBone {
    /// Name for the new bone. Must not collide with an existing bone.
    pub name: String,
    /// Head position.
    pub head: Vec3,
    /// Tail position.
    pub tail: Vec3,
    /// Parent bone name, `None` for a root bone.
    pub parent: Option<String>,
}

/// Local-space axis-aligned bounding box of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Midpoint of the X extent.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        (self.min.x + self.max.x) / 2.0
    }

    /// Height of the box (Z extent).
    #[must_use]
    pub fn z_extent(&self) -> f32 {
        self.max.z - self.min.z
    }

    /// Z coordinate at a fractional height above the minimum.
    #[must_use]
    pub fn z_at(&self, fraction: f32) -> f32 {
        self.min.z + self.z_extent() * fraction
    }
}

/// Scale-bake mode for the export operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMode {
    /// Bake a uniform scale into the exported data.
    #[serde(rename = "FBX_SCALE_ALL")]
    ScaleAll,
    /// Leave scale unbaked.
    #[serde(rename = "FBX_SCALE_NONE")]
    None,
}

/// Bone axis convention for the export operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoneAxis {
    /// +X
    #[serde(rename = "X")]
    X,
    /// +Y
    #[serde(rename = "Y")]
    Y,
    /// +Z
    #[serde(rename = "Z")]
    Z,
    /// -X
    #[serde(rename = "-X")]
    NegX,
    /// -Y
    #[serde(rename = "-Y")]
    NegY,
    /// -Z
    #[serde(rename = "-Z")]
    NegZ,
}

/// The fixed parameter set handed to the host's scene exporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ExportSettings {
    /// Output file path.
    pub filepath: PathBuf,
    /// Names of the objects to export (selection set).
    pub selected_objects: Vec<String>,
    /// Object-type filter.
    pub object_types: Vec<ObjectKind>,
    /// Scale-bake mode.
    pub apply_scale: ScaleMode,
    /// Uniform scale factor to bake.
    pub scale: f32,
    /// Whether to bake animations at all.
    pub bake_animations: bool,
    /// Bake animation from all actions (never from nonlinear strips).
    pub bake_from_actions: bool,
    /// Bake from nonlinear strips. Always `false` here.
    pub use_nla_strips: bool,
    /// Add synthetic leaf bones. Always `false` here.
    pub add_leaf_bones: bool,
    /// Primary bone axis convention.
    pub primary_bone_axis: BoneAxis,
    /// Secondary bone axis convention.
    pub secondary_bone_axis: BoneAxis,
    /// Export tangent space.
    pub tangent_space: bool,
}

/// Read/write capability over the host application's scene.
///
/// This is the entire surface the rigging core sees. Implementations: a
/// live host adapter in production, the in-memory scene crate's
/// `MemoryScene` for tests and headless operation.
pub trait SceneGraph {
    /// The scene's name.
    fn scene_name(&self) -> &str;

    /// Enumerates all scene objects in scene iteration order.
    fn objects(&self) -> Vec<ObjectRef>;

    /// Looks up a single object by name.
    fn object(&self, name: &str) -> Option<ObjectRef>;

    /// Ordered bone snapshots for an armature object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ObjectNotFound`] if `armature` does not name
    /// an armature object.
    fn bones(&self, armature: &str) -> Result<Vec<BoneInfo>>;

    /// Vertex count of a mesh object.
    fn vertex_count(&self, mesh: &str) -> Result<usize>;

    /// Target armature of the mesh's first armature modifier, if any.
    fn armature_modifier_target(&self, mesh: &str) -> Result<Option<String>>;

    /// Names of the mesh's vertex groups, in creation order.
    fn vertex_group_names(&self, mesh: &str) -> Result<Vec<String>>;

    /// Local-space bounding box of a mesh.
    fn bounding_box(&self, mesh: &str) -> Result<Aabb>;

    /// Whether an external professional auto-rigging tool is installed in
    /// the host environment.
    fn external_autorig_available(&self) -> bool {
        false
    }

    /// Creates a new, empty armature object.
    ///
    /// The host uniquifies the name if it collides; the actual name is
    /// returned.
    fn create_armature(&mut self, desired_name: &str) -> Result<String>;

    /// Adds a bone to an armature.
    fn add_bone(&mut self, armature: &str, bone: NewBone) -> Result<()>;

    /// Renames a bone.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::BoneNotFound`] if `old` is absent and
    /// [`crate::Error::InvalidArgument`] if `new` collides with an existing
    /// bone.
    fn rename_bone(&mut self, armature: &str, old: &str, new: &str) -> Result<()>;

    /// Removes every armature-type modifier from a mesh. Returns how many
    /// were removed.
    fn remove_armature_modifiers(&mut self, mesh: &str) -> Result<usize>;

    /// Clears the mesh's parent relation, preserving its world transform.
    fn clear_parent_keep_transform(&mut self, mesh: &str) -> Result<()>;

    /// Parents the mesh to an armature with automatic (geometry-distance)
    /// skin weights, creating one vertex group per bone and replacing any
    /// prior parent relationship.
    fn parent_with_automatic_weights(&mut self, mesh: &str, armature: &str) -> Result<()>;

    /// Deletes one vertex group from a mesh.
    fn remove_vertex_group(&mut self, mesh: &str, group: &str) -> Result<()>;

    /// Renormalizes all of the mesh's vertex-group weights so each vertex's
    /// influences sum to 1.
    fn normalize_vertex_groups(&mut self, mesh: &str) -> Result<()>;

    /// Zeroes all pose-bone rotations on an armature (reference pose).
    /// Mutates pose state in place; not reverted afterward.
    fn reset_pose_rotations(&mut self, armature: &str) -> Result<()>;

    /// Runs the host's scene export with the given fixed parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::HostOperationFailed`] wrapping the host's
    /// failure text if the export fails for any reason.
    fn export(&mut self, settings: &ExportSettings) -> Result<PathBuf>;
}

impl ExportSettings {
    /// The fixed parameter set used for character export, varying only in
    /// path, selection, scale, and animation baking.
    #[must_use]
    pub fn character_defaults(
        filepath: &Path,
        selected_objects: Vec<String>,
        scale: f32,
        export_animations: bool,
    ) -> Self {
        Self {
            filepath: filepath.to_path_buf(),
            selected_objects,
            object_types: vec![ObjectKind::Armature, ObjectKind::Mesh],
            apply_scale: ScaleMode::ScaleAll,
            scale,
            bake_animations: export_animations,
            bake_from_actions: export_animations,
            use_nla_strips: false,
            add_leaf_bones: false,
            primary_bone_axis: BoneAxis::X,
            secondary_bone_axis: BoneAxis::NegY,
            tangent_space: true,
        }
    }
}
