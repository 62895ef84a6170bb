//! Rig normalization: building the [`NormalizedHumanoid`] view.
//!
//! One inspection call, one consistent snapshot. The view is assembled
//! from current scene state and is stale the moment the scene mutates;
//! every operation in this crate re-inspects instead of caching.

use std::collections::HashMap;

use rigbridge_core::{BoneInfo, Error, Finger, ObjectKind, Result, RigType, SceneGraph, Side};

use crate::candidate::find_best_candidate;
use crate::classify::{classify_bone_names, BoneNameStats};
use crate::humanoid::NormalizedHumanoid;

/// Reduces a bone name to its convention-independent lookup key:
/// lowercase, strip `_`/`-`/space, then take the part after the last `:`
/// (dropping rig-tool prefixes like `mixamorig:`).
///
/// # Examples
///
/// ```
/// use rigbridge_rig::normalization_key;
///
/// assert_eq!(normalization_key("mixamorig:LeftHand"), "lefthand");
/// assert_eq!(normalization_key("Left_Hand"), "lefthand");
/// assert_eq!(normalization_key("hand.l"), "hand.l");
/// ```
#[must_use]
pub fn normalization_key(name: &str) -> String {
    let stripped: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .collect();
    stripped
        .rsplit(':')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Inspects the scene for a humanoid character and builds its normalized
/// description.
///
/// Explicit names that do not resolve behave exactly like absent ones;
/// when neither a mesh nor an armature resolves, the candidate selector
/// picks the most plausible pair. Failure to resolve any mesh at all is
/// the only error.
pub fn inspect<S: SceneGraph>(
    scene: &S,
    mesh_name: Option<&str>,
    armature_name: Option<&str>,
) -> Result<NormalizedHumanoid> {
    let mut mesh = resolve(scene, mesh_name, ObjectKind::Mesh);
    let mut armature = resolve(scene, armature_name, ObjectKind::Armature);

    if mesh.is_none() && armature.is_none() {
        let (candidate_mesh, candidate_armature) = find_best_candidate(scene);
        mesh = candidate_mesh;
        armature = candidate_armature;
    }

    let Some(mesh) = mesh else {
        return Err(Error::NoCandidate {
            what: "mesh object".to_string(),
        });
    };

    build_normalized(scene, &mesh, armature)
}

fn resolve<S: SceneGraph>(scene: &S, name: Option<&str>, kind: ObjectKind) -> Option<String> {
    let object = scene.object(name?)?;
    (object.kind == kind).then_some(object.name)
}

fn build_normalized<S: SceneGraph>(
    scene: &S,
    mesh: &str,
    armature: Option<String>,
) -> Result<NormalizedHumanoid> {
    let mut view = NormalizedHumanoid {
        mesh_name: Some(mesh.to_string()),
        ..NormalizedHumanoid::default()
    };
    view.mesh_info.vertex_count = scene.vertex_count(mesh)?;

    let mut armature = armature;
    if let Some(target) = scene.armature_modifier_target(mesh)? {
        view.mesh_info.has_armature_modifier = true;
        // Adopt the modifier's target when no explicit armature was given.
        if armature.is_none() {
            armature = Some(target);
        }
    }

    let Some(armature) = armature else {
        view.rig_type = RigType::MeshOnly;
        return Ok(view);
    };

    let bones = scene.bones(&armature)?;
    view.armature_name = Some(armature);

    let stats = BoneNameStats::from_names(bones.iter().map(|b| b.name.as_str()));
    view.rig_type = classify_bone_names(stats);

    // Normalized key -> original name; later bones win on key collisions.
    let mut key_map: HashMap<String, &str> = HashMap::new();
    for bone in &bones {
        key_map.insert(normalization_key(&bone.name), bone.name.as_str());
    }

    view.bones.hips = key_map.get("hips").map(|n| (*n).to_string());
    view.bones.head = key_map.get("head").map(|n| (*n).to_string());
    view.bones.hand_l = key_map.get("lefthand").map(|n| (*n).to_string());
    view.bones.hand_r = key_map.get("righthand").map(|n| (*n).to_string());

    let by_name: HashMap<&str, &BoneInfo> =
        bones.iter().map(|b| (b.name.as_str(), b)).collect();

    for side in [Side::Left, Side::Right] {
        let Some(hand) = view.bones.hand(side) else {
            continue;
        };
        let Some(hand_bone) = by_name.get(hand) else {
            continue;
        };
        let mut fingers = std::collections::BTreeMap::new();
        for child in &hand_bone.children {
            let Some(finger) = Finger::match_bone_name(child) else {
                continue;
            };
            let mut chain = vec![child.clone()];
            collect_descendants(&by_name, child, &mut chain);
            fingers.insert(finger, chain);
        }
        match side {
            Side::Left => view.fingers_l = fingers,
            Side::Right => view.fingers_r = fingers,
        }
    }

    // Spine chain is only deducible for mixamo naming; everything else
    // stays sparse.
    if view.rig_type == RigType::Mixamo {
        if let Some(hips) = &view.bones.hips {
            let mut descendants = Vec::new();
            collect_descendants(&by_name, hips, &mut descendants);
            view.bone_chains.spine = descendants
                .into_iter()
                .filter(|name| name.to_lowercase().contains("spine"))
                .collect();
        }
    }

    Ok(view)
}

/// Appends all descendants of `bone` in depth-first preorder.
fn collect_descendants(
    by_name: &HashMap<&str, &BoneInfo>,
    bone: &str,
    out: &mut Vec<String>,
) {
    let Some(info) = by_name.get(bone) else {
        return;
    };
    for child in &info.children {
        out.push(child.clone());
        collect_descendants(by_name, child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rigbridge_core::{Aabb, NewBone};
    use rigbridge_scene::MemoryScene;

    fn bbox() -> Aabb {
        Aabb {
            min: Vec3::new(-1.0, -1.0, 0.0),
            max: Vec3::new(1.0, 1.0, 2.0),
        }
    }

    fn add_bone(scene: &mut MemoryScene, armature: &str, name: &str, parent: Option<&str>) {
        scene
            .add_bone(
                armature,
                NewBone {
                    name: name.to_string(),
                    head: Vec3::ZERO,
                    tail: Vec3::Z,
                    parent: parent.map(str::to_string),
                },
            )
            .unwrap();
    }

    /// A mixamo-style rig with enough marked bones to classify, both
    /// hands, and a two-finger left hand.
    fn mixamo_scene() -> MemoryScene {
        let mut scene = MemoryScene::new("Scene");
        scene.add_mesh("Body", 5000, bbox());
        scene.add_armature("Rig");
        let bones: [(&str, Option<&str>); 10] = [
            ("mixamorig:Hips", None),
            ("mixamorig:Spine", Some("mixamorig:Hips")),
            ("mixamorig:Spine1", Some("mixamorig:Spine")),
            ("mixamorig:Neck", Some("mixamorig:Spine1")),
            ("mixamorig:Head", Some("mixamorig:Neck")),
            ("mixamorig:LeftHand", Some("mixamorig:Spine1")),
            ("mixamorig:RightHand", Some("mixamorig:Spine1")),
            ("mixamorig:LeftHandThumb1", Some("mixamorig:LeftHand")),
            ("mixamorig:LeftHandThumb2", Some("mixamorig:LeftHandThumb1")),
            ("mixamorig:LeftHandIndex1", Some("mixamorig:LeftHand")),
        ];
        for (name, parent) in bones {
            add_bone(&mut scene, "Rig", name, parent);
        }
        scene.add_armature_modifier("Body", "Rig").unwrap();
        scene
    }

    #[test]
    fn key_strips_separators_and_prefixes() {
        assert_eq!(normalization_key("mixamorig:Hips"), "hips");
        assert_eq!(normalization_key("Left Hand"), "lefthand");
        assert_eq!(normalization_key("LEFT-HAND"), "lefthand");
        assert_eq!(normalization_key("spine_01"), "spine01");
    }

    #[test]
    fn mesh_without_armature_is_mesh_only() {
        let mut scene = MemoryScene::new("Scene");
        scene.add_mesh("Body", 123, bbox());

        let view = inspect(&scene, Some("Body"), None).unwrap();
        assert_eq!(view.rig_type, RigType::MeshOnly);
        assert_eq!(view.mesh_name.as_deref(), Some("Body"));
        assert_eq!(view.armature_name, None);
        assert_eq!(view.mesh_info.vertex_count, 123);
        assert!(!view.mesh_info.has_armature_modifier);
    }

    #[test]
    fn empty_scene_is_an_error() {
        let scene = MemoryScene::new("Scene");
        let err = inspect(&scene, None, None).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn adopts_armature_from_modifier() {
        let scene = mixamo_scene();
        let view = inspect(&scene, Some("Body"), None).unwrap();
        assert_eq!(view.armature_name.as_deref(), Some("Rig"));
        assert!(view.mesh_info.has_armature_modifier);
        assert_eq!(view.rig_type, RigType::Mixamo);
    }

    #[test]
    fn canonical_roles_resolve_through_prefixes() {
        let view = inspect(&mixamo_scene(), None, None).unwrap();
        assert_eq!(view.bones.hips.as_deref(), Some("mixamorig:Hips"));
        assert_eq!(view.bones.head.as_deref(), Some("mixamorig:Head"));
        assert_eq!(view.bones.hand_l.as_deref(), Some("mixamorig:LeftHand"));
        assert_eq!(view.bones.hand_r.as_deref(), Some("mixamorig:RightHand"));
    }

    #[test]
    fn finger_chains_are_root_to_tip() {
        let view = inspect(&mixamo_scene(), None, None).unwrap();
        assert_eq!(
            view.fingers_l[&Finger::Thumb],
            ["mixamorig:LeftHandThumb1", "mixamorig:LeftHandThumb2"]
        );
        assert_eq!(view.fingers_l[&Finger::Index], ["mixamorig:LeftHandIndex1"]);
        // No placeholder entries for unmatched fingers.
        assert!(!view.fingers_l.contains_key(&Finger::Pinky));
        assert!(view.fingers_r.is_empty());
    }

    #[test]
    fn mixamo_spine_chain_is_populated() {
        let view = inspect(&mixamo_scene(), None, None).unwrap();
        assert_eq!(
            view.bone_chains.spine,
            ["mixamorig:Spine", "mixamorig:Spine1"]
        );
        assert!(view.bone_chains.arm_l.is_empty());
    }

    #[test]
    fn inspection_is_pure_without_mutation() {
        let scene = mixamo_scene();
        let first = inspect(&scene, None, None).unwrap();
        let second = inspect(&scene, None, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unresolvable_explicit_names_fall_back_to_candidates() {
        let scene = mixamo_scene();
        let view = inspect(&scene, Some("NoSuchMesh"), None).unwrap();
        assert_eq!(view.mesh_name.as_deref(), Some("Body"));
    }

    #[test]
    fn unknown_rig_keeps_sparse_chains() {
        let mut scene = MemoryScene::new("Scene");
        scene.add_mesh("Body", 10, bbox());
        scene.add_armature("Rig");
        add_bone(&mut scene, "Rig", "hips", None);
        add_bone(&mut scene, "Rig", "spine", Some("hips"));
        scene.add_armature_modifier("Body", "Rig").unwrap();

        let view = inspect(&scene, None, None).unwrap();
        assert_eq!(view.rig_type, RigType::Unknown);
        assert_eq!(view.bones.hips.as_deref(), Some("hips"));
        assert!(view.bone_chains.spine.is_empty());
    }
}
