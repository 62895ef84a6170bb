//! Object records held by [`crate::MemoryScene`].

use glam::Vec3;
use rigbridge_core::{Aabb, ObjectKind};
use serde::{Deserialize, Serialize};

/// One scene object: a mesh or an armature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    /// Unique object name within the scene.
    pub name: String,
    /// Type-specific payload.
    #[serde(flatten)]
    pub data: ObjectData,
}

impl SceneObject {
    /// The object's type tag.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        match self.data {
            ObjectData::Mesh(_) => ObjectKind::Mesh,
            ObjectData::Armature(_) => ObjectKind::Armature,
        }
    }
}

/// Mesh-or-armature payload of a [`SceneObject`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum ObjectData {
    /// A mesh object.
    Mesh(MeshData),
    /// An armature object.
    Armature(ArmatureData),
}

/// Mesh state: geometry summary, modifiers, vertex groups, parent link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshData {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Local-space bounding box.
    pub bounding_box: Aabb,
    /// Targets of armature-type modifiers, in stack order.
    #[serde(default)]
    pub armature_modifiers: Vec<String>,
    /// Named vertex groups, in creation order.
    #[serde(default)]
    pub vertex_groups: Vec<VertexGroup>,
    /// Parent object name, if parented.
    #[serde(default)]
    pub parent: Option<String>,
}

impl MeshData {
    /// A mesh with no modifiers, groups, or parent.
    #[must_use]
    pub fn new(vertex_count: usize, bounding_box: Aabb) -> Self {
        Self {
            vertex_count,
            bounding_box,
            armature_modifiers: Vec::new(),
            vertex_groups: Vec::new(),
            parent: None,
        }
    }
}

/// A named vertex group with a uniform influence weight.
///
/// The headless scene does not track per-vertex membership; a single
/// uniform weight is enough to make automatic binding and weight
/// renormalization observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexGroup {
    /// Group name, conventionally the bone it binds to.
    pub name: String,
    /// Uniform influence weight.
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

impl VertexGroup {
    /// A group with full influence.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: 1.0,
        }
    }
}

/// Armature state: an ordered list of bones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArmatureData {
    /// Bones in armature order (parents before children for created rigs).
    #[serde(default)]
    pub bones: Vec<BoneRecord>,
    /// Whether pose rotations are currently zeroed.
    #[serde(default)]
    pub pose_reset: bool,
}

/// One stored bone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneRecord {
    /// Bone name, unique within the armature.
    pub name: String,
    /// Parent bone name, `None` for a root.
    #[serde(default)]
    pub parent: Option<String>,
    /// Head position.
    pub head: Vec3,
    /// Tail position.
    pub tail: Vec3,
}
