//! The in-memory scene graph.

use std::path::{Path, PathBuf};

use rigbridge_core::{
    Aabb, BoneInfo, Error, ExportSettings, NewBone, ObjectRef, Result, SceneGraph,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::object::{ArmatureData, BoneRecord, MeshData, ObjectData, SceneObject, VertexGroup};

/// An in-memory scene implementing [`SceneGraph`].
///
/// Objects are kept in insertion order, which doubles as the scene
/// iteration order the candidate selector depends on. The whole scene
/// serializes to JSON, so test fixtures and startup scenes are plain data
/// files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryScene {
    #[serde(default = "default_scene_name")]
    name: String,
    #[serde(default)]
    objects: Vec<SceneObject>,
    /// Simulates the presence of an external auto-rigging tool.
    #[serde(default)]
    external_autorig: bool,
}

fn default_scene_name() -> String {
    "Scene".to_string()
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new("Scene")
    }
}

impl MemoryScene {
    /// Creates an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
            external_autorig: false,
        }
    }

    /// Marks the external auto-rigging tool as installed.
    #[must_use]
    pub fn with_external_autorig(mut self) -> Self {
        self.external_autorig = true;
        self
    }

    /// Loads a scene description from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::HostOperationFailed {
            operation: "scene file read".to_string(),
            message: format!("{}: {e}", path.display()),
        })?;
        let scene: Self = serde_json::from_str(&text)?;
        debug!(
            scene = %scene.name,
            objects = scene.objects.len(),
            path = %path.display(),
            "loaded scene description"
        );
        Ok(scene)
    }

    /// Adds a mesh object.
    pub fn add_mesh(&mut self, name: impl Into<String>, vertex_count: usize, bounding_box: Aabb) {
        self.objects.push(SceneObject {
            name: name.into(),
            data: ObjectData::Mesh(MeshData::new(vertex_count, bounding_box)),
        });
    }

    /// Adds an empty armature object.
    pub fn add_armature(&mut self, name: impl Into<String>) {
        self.objects.push(SceneObject {
            name: name.into(),
            data: ObjectData::Armature(ArmatureData::default()),
        });
    }

    /// Adds an armature modifier to a mesh, targeting `armature`.
    pub fn add_armature_modifier(&mut self, mesh: &str, armature: &str) -> Result<()> {
        let target = armature.to_string();
        self.mesh_mut(mesh)?.armature_modifiers.push(target);
        Ok(())
    }

    /// Adds a vertex group to a mesh with full influence.
    pub fn add_vertex_group(&mut self, mesh: &str, group: impl Into<String>) -> Result<()> {
        let group = VertexGroup::new(group);
        self.mesh_mut(mesh)?.vertex_groups.push(group);
        Ok(())
    }

    /// Uniform weight of a vertex group, for inspection in tests.
    pub fn vertex_group_weight(&self, mesh: &str, group: &str) -> Result<Option<f32>> {
        Ok(self
            .mesh(mesh)?
            .vertex_groups
            .iter()
            .find(|g| g.name == group)
            .map(|g| g.weight))
    }

    /// Whether an armature's pose rotations are currently zeroed.
    pub fn pose_is_reset(&self, armature: &str) -> Result<bool> {
        Ok(self.armature(armature)?.pose_reset)
    }

    /// Parent object of a mesh, if any.
    pub fn mesh_parent(&self, mesh: &str) -> Result<Option<String>> {
        Ok(self.mesh(mesh)?.parent.clone())
    }

    fn find(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    fn mesh(&self, name: &str) -> Result<&MeshData> {
        match self.find(name).map(|o| &o.data) {
            Some(ObjectData::Mesh(mesh)) => Ok(mesh),
            _ => Err(Error::ObjectNotFound {
                name: name.to_string(),
            }),
        }
    }

    fn mesh_mut(&mut self, name: &str) -> Result<&mut MeshData> {
        match self
            .objects
            .iter_mut()
            .find(|o| o.name == name)
            .map(|o| &mut o.data)
        {
            Some(ObjectData::Mesh(mesh)) => Ok(mesh),
            _ => Err(Error::ObjectNotFound {
                name: name.to_string(),
            }),
        }
    }

    fn armature(&self, name: &str) -> Result<&ArmatureData> {
        match self.find(name).map(|o| &o.data) {
            Some(ObjectData::Armature(arm)) => Ok(arm),
            _ => Err(Error::ObjectNotFound {
                name: name.to_string(),
            }),
        }
    }

    fn armature_mut(&mut self, name: &str) -> Result<&mut ArmatureData> {
        match self
            .objects
            .iter_mut()
            .find(|o| o.name == name)
            .map(|o| &mut o.data)
        {
            Some(ObjectData::Armature(arm)) => Ok(arm),
            _ => Err(Error::ObjectNotFound {
                name: name.to_string(),
            }),
        }
    }

    fn unique_name(&self, desired: &str) -> String {
        if self.find(desired).is_none() {
            return desired.to_string();
        }
        // Host-style numeric suffixes: Rig.001, Rig.002, ...
        (1..)
            .map(|i| format!("{desired}.{i:03}"))
            .find(|candidate| self.find(candidate).is_none())
            .unwrap_or_else(|| desired.to_string())
    }
}

impl SceneGraph for MemoryScene {
    fn scene_name(&self) -> &str {
        &self.name
    }

    fn objects(&self) -> Vec<ObjectRef> {
        self.objects
            .iter()
            .map(|o| ObjectRef {
                name: o.name.clone(),
                kind: o.kind(),
            })
            .collect()
    }

    fn object(&self, name: &str) -> Option<ObjectRef> {
        self.find(name).map(|o| ObjectRef {
            name: o.name.clone(),
            kind: o.kind(),
        })
    }

    fn bones(&self, armature: &str) -> Result<Vec<BoneInfo>> {
        let arm = self.armature(armature)?;
        Ok(arm
            .bones
            .iter()
            .map(|bone| BoneInfo {
                name: bone.name.clone(),
                parent: bone.parent.clone(),
                children: arm
                    .bones
                    .iter()
                    .filter(|b| b.parent.as_deref() == Some(bone.name.as_str()))
                    .map(|b| b.name.clone())
                    .collect(),
                head: bone.head,
                tail: bone.tail,
            })
            .collect())
    }

    fn vertex_count(&self, mesh: &str) -> Result<usize> {
        Ok(self.mesh(mesh)?.vertex_count)
    }

    fn armature_modifier_target(&self, mesh: &str) -> Result<Option<String>> {
        Ok(self.mesh(mesh)?.armature_modifiers.first().cloned())
    }

    fn vertex_group_names(&self, mesh: &str) -> Result<Vec<String>> {
        Ok(self
            .mesh(mesh)?
            .vertex_groups
            .iter()
            .map(|g| g.name.clone())
            .collect())
    }

    fn bounding_box(&self, mesh: &str) -> Result<Aabb> {
        Ok(self.mesh(mesh)?.bounding_box)
    }

    fn external_autorig_available(&self) -> bool {
        self.external_autorig
    }

    fn create_armature(&mut self, desired_name: &str) -> Result<String> {
        let name = self.unique_name(desired_name);
        if name != desired_name {
            debug!(desired = desired_name, actual = %name, "armature name uniquified");
        }
        self.objects.push(SceneObject {
            name: name.clone(),
            data: ObjectData::Armature(ArmatureData::default()),
        });
        Ok(name)
    }

    fn add_bone(&mut self, armature: &str, bone: NewBone) -> Result<()> {
        let armature_name = armature.to_string();
        let arm = self.armature_mut(armature)?;
        if arm.bones.iter().any(|b| b.name == bone.name) {
            return Err(Error::InvalidArgument(format!(
                "bone '{}' already exists in armature '{armature_name}'",
                bone.name
            )));
        }
        if let Some(parent) = &bone.parent {
            if !arm.bones.iter().any(|b| &b.name == parent) {
                return Err(Error::BoneNotFound {
                    armature: armature_name,
                    bone: parent.clone(),
                });
            }
        }
        arm.bones.push(BoneRecord {
            name: bone.name,
            parent: bone.parent,
            head: bone.head,
            tail: bone.tail,
        });
        Ok(())
    }

    fn rename_bone(&mut self, armature: &str, old: &str, new: &str) -> Result<()> {
        let armature_name = armature.to_string();
        let arm = self.armature_mut(armature)?;
        if arm.bones.iter().any(|b| b.name == new) {
            return Err(Error::InvalidArgument(format!(
                "bone name '{new}' already exists in armature '{armature_name}'"
            )));
        }
        if !arm.bones.iter().any(|b| b.name == old) {
            return Err(Error::BoneNotFound {
                armature: armature_name,
                bone: old.to_string(),
            });
        }
        for bone in &mut arm.bones {
            if bone.name == old {
                bone.name = new.to_string();
            }
            if bone.parent.as_deref() == Some(old) {
                bone.parent = Some(new.to_string());
            }
        }
        Ok(())
    }

    fn remove_armature_modifiers(&mut self, mesh: &str) -> Result<usize> {
        let data = self.mesh_mut(mesh)?;
        let removed = data.armature_modifiers.len();
        data.armature_modifiers.clear();
        Ok(removed)
    }

    fn clear_parent_keep_transform(&mut self, mesh: &str) -> Result<()> {
        self.mesh_mut(mesh)?.parent = None;
        Ok(())
    }

    fn parent_with_automatic_weights(&mut self, mesh: &str, armature: &str) -> Result<()> {
        let bone_names: Vec<String> = self
            .armature(armature)?
            .bones
            .iter()
            .map(|b| b.name.clone())
            .collect();
        let data = self.mesh_mut(mesh)?;
        data.parent = Some(armature.to_string());
        data.armature_modifiers = vec![armature.to_string()];
        data.vertex_groups = bone_names.into_iter().map(VertexGroup::new).collect();
        debug!(
            mesh,
            armature,
            groups = data.vertex_groups.len(),
            "parented with automatic weights"
        );
        Ok(())
    }

    fn remove_vertex_group(&mut self, mesh: &str, group: &str) -> Result<()> {
        let data = self.mesh_mut(mesh)?;
        data.vertex_groups.retain(|g| g.name != group);
        Ok(())
    }

    fn normalize_vertex_groups(&mut self, mesh: &str) -> Result<()> {
        let data = self.mesh_mut(mesh)?;
        let total: f32 = data.vertex_groups.iter().map(|g| g.weight).sum();
        if total > 0.0 {
            for group in &mut data.vertex_groups {
                group.weight /= total;
            }
        }
        Ok(())
    }

    fn reset_pose_rotations(&mut self, armature: &str) -> Result<()> {
        self.armature_mut(armature)?.pose_reset = true;
        Ok(())
    }

    fn export(&mut self, settings: &ExportSettings) -> Result<PathBuf> {
        // Every selected object must exist and pass the type filter.
        let mut exported = Vec::new();
        for name in &settings.selected_objects {
            let object = self.find(name).ok_or_else(|| Error::HostOperationFailed {
                operation: "scene export".to_string(),
                message: format!("selected object '{name}' not found"),
            })?;
            if settings.object_types.contains(&object.kind()) {
                exported.push(object.clone());
            }
        }

        let manifest = serde_json::json!({
            "scene": self.name,
            "settings": settings,
            "objects": exported,
        });
        let text = serde_json::to_string_pretty(&manifest)?;
        std::fs::write(&settings.filepath, text).map_err(|e| Error::HostOperationFailed {
            operation: "scene export".to_string(),
            message: format!("{}: {e}", settings.filepath.display()),
        })?;
        debug!(
            objects = exported.len(),
            path = %settings.filepath.display(),
            "wrote export manifest"
        );
        Ok(settings.filepath.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rigbridge_core::ObjectKind;

    fn unit_box() -> Aabb {
        Aabb {
            min: Vec3::new(-0.5, -0.5, 0.0),
            max: Vec3::new(0.5, 0.5, 2.0),
        }
    }

    fn bone(name: &str, parent: Option<&str>) -> NewBone {
        NewBone {
            name: name.to_string(),
            head: Vec3::ZERO,
            tail: Vec3::new(0.0, 0.0, 0.1),
            parent: parent.map(str::to_string),
        }
    }

    #[test]
    fn objects_keep_insertion_order() {
        let mut scene = MemoryScene::new("Scene");
        scene.add_mesh("Body", 100, unit_box());
        scene.add_armature("Rig");
        scene.add_mesh("Prop", 10, unit_box());

        let names: Vec<_> = scene.objects().into_iter().map(|o| o.name).collect();
        assert_eq!(names, ["Body", "Rig", "Prop"]);
        assert_eq!(scene.object("Rig").unwrap().kind, ObjectKind::Armature);
    }

    #[test]
    fn bones_report_children() {
        let mut scene = MemoryScene::new("Scene");
        scene.add_armature("Rig");
        scene.add_bone("Rig", bone("hips", None)).unwrap();
        scene.add_bone("Rig", bone("spine", Some("hips"))).unwrap();
        scene.add_bone("Rig", bone("thigh.l", Some("hips"))).unwrap();

        let bones = scene.bones("Rig").unwrap();
        let hips = bones.iter().find(|b| b.name == "hips").unwrap();
        assert_eq!(hips.children, ["spine", "thigh.l"]);
        assert_eq!(hips.parent, None);
    }

    #[test]
    fn add_bone_rejects_duplicate_and_missing_parent() {
        let mut scene = MemoryScene::new("Scene");
        scene.add_armature("Rig");
        scene.add_bone("Rig", bone("hips", None)).unwrap();

        assert!(scene.add_bone("Rig", bone("hips", None)).is_err());
        let err = scene.add_bone("Rig", bone("hand.l", Some("arm"))).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn rename_bone_updates_child_parent_links() {
        let mut scene = MemoryScene::new("Scene");
        scene.add_armature("Rig");
        scene.add_bone("Rig", bone("hand", None)).unwrap();
        scene.add_bone("Rig", bone("thumb_1", Some("hand"))).unwrap();

        scene.rename_bone("Rig", "hand", "hand.l").unwrap();
        let bones = scene.bones("Rig").unwrap();
        let thumb = bones.iter().find(|b| b.name == "thumb_1").unwrap();
        assert_eq!(thumb.parent.as_deref(), Some("hand.l"));
    }

    #[test]
    fn rename_bone_rejects_collision() {
        let mut scene = MemoryScene::new("Scene");
        scene.add_armature("Rig");
        scene.add_bone("Rig", bone("a", None)).unwrap();
        scene.add_bone("Rig", bone("b", None)).unwrap();

        let err = scene.rename_bone("Rig", "a", "b").unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn create_armature_uniquifies_names() {
        let mut scene = MemoryScene::new("Scene");
        scene.add_armature("Rig");
        let name = scene.create_armature("Rig").unwrap();
        assert_eq!(name, "Rig.001");
        let name = scene.create_armature("Rig").unwrap();
        assert_eq!(name, "Rig.002");
    }

    #[test]
    fn automatic_weights_create_group_per_bone() {
        let mut scene = MemoryScene::new("Scene");
        scene.add_mesh("Body", 100, unit_box());
        scene.add_armature("Rig");
        scene.add_bone("Rig", bone("hips", None)).unwrap();
        scene.add_bone("Rig", bone("spine", Some("hips"))).unwrap();

        scene.parent_with_automatic_weights("Body", "Rig").unwrap();
        assert_eq!(scene.vertex_group_names("Body").unwrap(), ["hips", "spine"]);
        assert_eq!(scene.mesh_parent("Body").unwrap().as_deref(), Some("Rig"));
        assert_eq!(
            scene.armature_modifier_target("Body").unwrap().as_deref(),
            Some("Rig")
        );
    }

    #[test]
    fn normalize_scales_uniform_weights_to_unit_sum() {
        let mut scene = MemoryScene::new("Scene");
        scene.add_mesh("Body", 100, unit_box());
        scene.add_vertex_group("Body", "a").unwrap();
        scene.add_vertex_group("Body", "b").unwrap();

        scene.normalize_vertex_groups("Body").unwrap();
        let w = scene.vertex_group_weight("Body", "a").unwrap().unwrap();
        assert!((w - 0.5).abs() < 1e-6);
    }

    #[test]
    fn export_rejects_missing_selected_object() {
        let mut scene = MemoryScene::new("Scene");
        let dir = tempfile::tempdir().unwrap();
        let settings = ExportSettings::character_defaults(
            &dir.path().join("out.fbx"),
            vec!["Ghost".to_string()],
            1.0,
            false,
        );
        let err = scene.export(&settings).unwrap_err();
        assert!(err.is_host_failure());
    }

    #[test]
    fn export_writes_manifest() {
        let mut scene = MemoryScene::new("Scene");
        scene.add_mesh("Body", 100, unit_box());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.fbx");
        let settings =
            ExportSettings::character_defaults(&path, vec!["Body".to_string()], 1.0, false);

        let written = scene.export(&settings).unwrap();
        assert_eq!(written, path);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Body\""));
        assert!(text.contains("FBX_SCALE_ALL"));
    }

    #[test]
    fn scene_json_round_trip_preserves_order() {
        let mut scene = MemoryScene::new("Scene");
        scene.add_mesh("Body", 42, unit_box());
        scene.add_armature("Rig");
        scene.add_bone("Rig", bone("hips", None)).unwrap();
        scene.add_armature_modifier("Body", "Rig").unwrap();

        let json = serde_json::to_string(&scene).unwrap();
        let back: MemoryScene = serde_json::from_str(&json).unwrap();
        let names: Vec<_> = back.objects().into_iter().map(|o| o.name).collect();
        assert_eq!(names, ["Body", "Rig"]);
        assert_eq!(back.vertex_count("Body").unwrap(), 42);
        assert_eq!(
            back.armature_modifier_target("Body").unwrap().as_deref(),
            Some("Rig")
        );
    }
}
