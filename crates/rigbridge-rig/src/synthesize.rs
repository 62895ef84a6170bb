//! Basic skeleton synthesis for mesh-only characters.
//!
//! The generated skeleton is a rough estimate placed from the mesh's
//! bounding box alone: a four-bone spine column plus three-bone arm and
//! leg chains per side. Proportions assume an upright humanoid roughly
//! facing -Y. When the host reports a professional auto-rigging tool,
//! that path is preferred and this fallback never runs.

use glam::Vec3;
use rigbridge_core::{Error, NewBone, ObjectKind, Result, RigType, SceneGraph, Side};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::candidate::find_best_candidate;
use crate::humanoid::NormalizedHumanoid;
use crate::normalize::inspect;
use crate::report::OpStatus;

/// Outcome of [`auto_rig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoRigReport {
    /// `Skipped` when the mesh was already rigged.
    pub status: OpStatus,
    /// Human-readable summary.
    pub message: String,
    /// Name of the armature that now drives the mesh, when one was created.
    pub armature_name: Option<String>,
    /// Whether the host's external auto-rigging tool handled the request.
    pub used_external_tool: bool,
    /// Bones in the created armature, 0 when nothing was created.
    pub bone_count: usize,
    /// The existing rig's description, present only on a skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<NormalizedHumanoid>,
}

/// Rigs a mesh-only character.
///
/// A mesh that already has an armature is left untouched and reported as
/// skipped, with the existing rig's normalized description attached. With
/// `use_external_tool` set and the host tool present, the request is
/// delegated to it; otherwise a basic bounding-box skeleton is created
/// and bound with automatic weights.
pub fn auto_rig<S: SceneGraph>(
    scene: &mut S,
    mesh_name: Option<&str>,
    use_external_tool: bool,
) -> Result<AutoRigReport> {
    let mesh = mesh_name
        .and_then(|name| scene.object(name))
        .filter(|o| o.kind == ObjectKind::Mesh)
        .map(|o| o.name)
        .or_else(|| find_best_candidate(scene).0)
        .ok_or_else(|| Error::NoCandidate {
            what: "mesh to rig".to_string(),
        })?;

    let existing = inspect(scene, Some(&mesh), None)?;
    if existing.rig_type != RigType::MeshOnly {
        return Ok(AutoRigReport {
            status: OpStatus::Skipped,
            message: format!(
                "Mesh '{mesh}' already has an armature '{}'. No action taken.",
                existing.armature_name.as_deref().unwrap_or_default()
            ),
            armature_name: existing.armature_name.clone(),
            used_external_tool: false,
            bone_count: 0,
            details: Some(existing),
        });
    }

    if use_external_tool && scene.external_autorig_available() {
        info!(mesh = %mesh, "delegating auto-rig to external tool");
        return Ok(AutoRigReport {
            status: OpStatus::Success,
            message: format!("External auto-rig tool detected; delegated rigging of '{mesh}'."),
            armature_name: None,
            used_external_tool: true,
            bone_count: 0,
            details: None,
        });
    }

    let armature = scene.create_armature(&format!("{mesh}_Rig"))?;
    build_basic_skeleton(scene, &armature, &mesh)?;
    scene.parent_with_automatic_weights(&mesh, &armature)?;

    let bone_count = scene.bones(&armature)?.len();
    info!(mesh = %mesh, armature = %armature, bone_count, "created fallback rig");

    Ok(AutoRigReport {
        status: OpStatus::Success,
        message: format!(
            "Created a basic fallback rig for '{mesh}' and applied automatic weights."
        ),
        armature_name: Some(armature),
        used_external_tool: false,
        bone_count,
        details: None,
    })
}

fn build_basic_skeleton<S: SceneGraph>(scene: &mut S, armature: &str, mesh: &str) -> Result<()> {
    let bb = scene.bounding_box(mesh)?;
    let cx = bb.center_x();

    let hips_pos = Vec3::new(cx, 0.0, bb.z_at(0.4));
    let spine_pos = Vec3::new(cx, 0.0, bb.z_at(0.6));
    let neck_pos = Vec3::new(cx, 0.0, bb.z_at(0.8));
    let head_pos = Vec3::new(cx, 0.0, bb.max.z);

    let mut add = |name: String, head: Vec3, tail: Vec3, parent: Option<&str>| {
        scene.add_bone(
            armature,
            NewBone {
                name,
                head,
                tail,
                parent: parent.map(str::to_string),
            },
        )
    };

    add("hips".to_string(), hips_pos, spine_pos, None)?;
    add("spine".to_string(), spine_pos, neck_pos, Some("hips"))?;
    add("neck".to_string(), neck_pos, head_pos, Some("spine"))?;
    add(
        "head".to_string(),
        head_pos,
        head_pos + Vec3::new(0.0, 0.0, 0.1),
        Some("neck"),
    )?;

    for side in [Side::Left, Side::Right] {
        let x = side.x_sign();
        let suffix = side.dotted_suffix();

        let shoulder = Vec3::new(cx + x * 0.1, 0.0, neck_pos.z - 0.05);
        let elbow = Vec3::new(cx + x * 0.3, 0.0, neck_pos.z - 0.15);
        let hand = Vec3::new(cx + x * 0.5, 0.0, neck_pos.z - 0.2);

        let upper_arm = format!("upper_arm{suffix}");
        let lower_arm = format!("lower_arm{suffix}");
        add(upper_arm.clone(), shoulder, elbow, Some("spine"))?;
        add(lower_arm.clone(), elbow, hand, Some(upper_arm.as_str()))?;
        add(
            format!("hand{suffix}"),
            hand,
            hand + Vec3::new(x * 0.05, 0.0, 0.0),
            Some(lower_arm.as_str()),
        )?;
    }

    for side in [Side::Left, Side::Right] {
        let x = side.x_sign();
        let suffix = side.dotted_suffix();

        let thigh_pos = Vec3::new(cx + x * 0.08, 0.0, hips_pos.z);
        let calf_pos = Vec3::new(cx + x * 0.08, 0.0, bb.z_at(0.2));
        let foot_pos = Vec3::new(cx + x * 0.08, 0.0, bb.min.z);

        let thigh = format!("thigh{suffix}");
        let calf = format!("calf{suffix}");
        add(thigh.clone(), thigh_pos, calf_pos, Some("hips"))?;
        add(calf.clone(), calf_pos, foot_pos, Some(thigh.as_str()))?;
        add(
            format!("foot{suffix}"),
            foot_pos,
            foot_pos + Vec3::new(0.0, -0.1, 0.0),
            Some(calf.as_str()),
        )?;
    }

    Ok(())
}
