//! Candidate selection for commands that omit explicit object names.

use rigbridge_core::{ObjectKind, SceneGraph};

/// Picks the most plausible humanoid mesh and armature from the scene.
///
/// Armature pick: the armature with the strictly greatest bone count (ties
/// keep the first found, zero-bone armatures are never picked). Mesh pick:
/// the first mesh in scene iteration order whose armature modifier targets
/// the selected armature; failing that, the mesh with the greatest vertex
/// count over the whole scene. Returns `(None, None)` when the scene has
/// neither.
///
/// Returned as `(mesh_name, armature_name)`.
#[must_use]
pub fn find_best_candidate<S: SceneGraph>(scene: &S) -> (Option<String>, Option<String>) {
    let objects = scene.objects();

    let mut armature: Option<String> = None;
    let mut max_bones = 0;
    for object in &objects {
        if object.kind == ObjectKind::Armature {
            let bone_count = scene.bones(&object.name).map(|b| b.len()).unwrap_or(0);
            if bone_count > max_bones {
                max_bones = bone_count;
                armature = Some(object.name.clone());
            }
        }
    }

    // Prefer a mesh already bound to the chosen armature.
    if let Some(armature_name) = &armature {
        for object in &objects {
            if object.kind != ObjectKind::Mesh {
                continue;
            }
            let target = scene
                .armature_modifier_target(&object.name)
                .ok()
                .flatten();
            if target.as_deref() == Some(armature_name.as_str()) {
                return (Some(object.name.clone()), armature);
            }
        }
    }

    // Fallback: the biggest mesh in the scene.
    let mut mesh: Option<String> = None;
    let mut max_verts = 0;
    for object in &objects {
        if object.kind == ObjectKind::Mesh {
            let verts = scene.vertex_count(&object.name).unwrap_or(0);
            if verts > max_verts {
                max_verts = verts;
                mesh = Some(object.name.clone());
            }
        }
    }

    (mesh, armature)
}
