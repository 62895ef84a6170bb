//! Read-only scene introspection commands.

use rigbridge_core::{ObjectKind, Result, SceneGraph};
use serde_json::{json, Value};

/// Objects included in the scene summary; the full count is still reported.
const SCENE_INFO_OBJECT_LIMIT: usize = 10;

/// Summary of the scene: name, object count, and the first few objects.
pub fn scene_info<S: SceneGraph>(scene: &S) -> Value {
    let objects = scene.objects();
    let listed: Vec<Value> = objects
        .iter()
        .take(SCENE_INFO_OBJECT_LIMIT)
        .map(|o| json!({ "name": o.name, "type": o.kind }))
        .collect();
    json!({
        "name": scene.scene_name(),
        "object_count": objects.len(),
        "objects": listed,
    })
}

/// Detailed description of one object.
///
/// Meshes report vertex count, armature-modifier target, vertex groups,
/// and bounding box; armatures report their bone list.
pub fn object_info<S: SceneGraph>(scene: &S, name: &str) -> Result<Value> {
    let object = scene
        .object(name)
        .ok_or_else(|| rigbridge_core::Error::ObjectNotFound {
            name: name.to_string(),
        })?;

    let mut map = serde_json::Map::new();
    map.insert("name".to_string(), json!(object.name));
    map.insert("type".to_string(), json!(object.kind));

    match object.kind {
        ObjectKind::Mesh => {
            let bb = scene.bounding_box(name)?;
            map.insert(
                "mesh".to_string(),
                json!({
                    "vertices": scene.vertex_count(name)?,
                    "armature_modifier_target": scene.armature_modifier_target(name)?,
                    "vertex_groups": scene.vertex_group_names(name)?,
                    "bounding_box": [bb.min.to_array(), bb.max.to_array()],
                }),
            );
        }
        ObjectKind::Armature => {
            let bones = scene.bones(name)?;
            map.insert(
                "armature".to_string(),
                json!({
                    "bone_count": bones.len(),
                    "bones": bones.iter().map(|b| b.name.clone()).collect::<Vec<_>>(),
                }),
            );
        }
    }

    Ok(Value::Object(map))
}
