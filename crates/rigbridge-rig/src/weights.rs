//! Finger-only automatic weighting.
//!
//! This is the destructive half of finger completion: the mesh is
//! unbound, re-bound to the armature with automatic weights (which
//! recreates a vertex group per bone), and then every non-finger group
//! is deleted. Weights outside the fingers do not survive.

use rigbridge_core::{Error, Result, SceneGraph, SideSelector};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::normalize::inspect;
use crate::report::OpStatus;

/// Outcome of [`rebind_fingers_only`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerWeightReport {
    /// `Skipped` when the rig has no finger bones to weight.
    pub status: OpStatus,
    /// Human-readable summary, including the destructive-operation warning.
    pub message: String,
    /// The finger bones that received weights, in detection order.
    pub weighted_finger_bones: Vec<String>,
}

/// Re-binds the mesh with automatic weights and keeps only finger vertex
/// groups.
///
/// All existing armature modifiers, the mesh's parent relation, and every
/// non-finger vertex group are destroyed in the process. When the rig has
/// no finger bones at all, nothing is touched and the report is skipped.
pub fn rebind_fingers_only<S: SceneGraph>(
    scene: &mut S,
    armature_name: Option<&str>,
    mesh_name: Option<&str>,
    side: SideSelector,
    normalize: bool,
) -> Result<FingerWeightReport> {
    let view = inspect(scene, mesh_name, armature_name)?;
    let (Some(armature), Some(mesh)) = (view.armature_name.clone(), view.mesh_name.clone())
    else {
        return Err(Error::NoCandidate {
            what: "rigged mesh and armature pair".to_string(),
        });
    };

    let finger_bones = view.finger_bone_names(side.sides());
    if finger_bones.is_empty() {
        return Ok(FingerWeightReport {
            status: OpStatus::Skipped,
            message: "No finger bones found to weight.".to_string(),
            weighted_finger_bones: Vec::new(),
        });
    }

    warn!(
        mesh = %mesh,
        armature = %armature,
        finger_bones = finger_bones.len(),
        "re-binding mesh; non-finger weights will be discarded"
    );

    scene.remove_armature_modifiers(&mesh)?;
    scene.clear_parent_keep_transform(&mesh)?;
    scene.parent_with_automatic_weights(&mesh, &armature)?;

    for group in scene.vertex_group_names(&mesh)? {
        if !finger_bones.contains(&group) {
            scene.remove_vertex_group(&mesh, &group)?;
        }
    }

    if normalize {
        scene.normalize_vertex_groups(&mesh)?;
    }

    Ok(FingerWeightReport {
        status: OpStatus::Success,
        message: format!(
            "Applied automatic weights for {} finger bones. WARNING: This was a destructive \
             operation that may have altered existing weights.",
            finger_bones.len()
        ),
        weighted_finger_bones: finger_bones,
    })
}
