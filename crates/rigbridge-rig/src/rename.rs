//! Bone renaming toward the target engine's skeleton convention.

use std::collections::{BTreeMap, HashSet};

use rigbridge_core::{Error, Result, SceneGraph, SideSelector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::inspect;
use crate::report::OpStatus;

/// Body-bone remap from normalization keys to the target engine names.
///
/// TODO: wire this up once normalization resolves arm and leg roles; today
/// only hips/head/hands are resolved, so applying the table would rename a
/// fraction of the body and leave the rest inconsistent.
pub const BODY_BONE_MAP: &[(&str, &str)] = &[
    ("hips", "pelvis"),
    ("spine", "spine_01"),
    ("spine1", "spine_02"),
    ("spine2", "spine_03"),
    ("neck", "neck_01"),
    ("head", "head"),
    ("leftarm", "upperarm_l"),
    ("leftforearm", "lowerarm_l"),
    ("lefthand", "hand_l"),
    ("rightarm", "upperarm_r"),
    ("rightforearm", "lowerarm_r"),
    ("righthand", "hand_r"),
    ("leftupleg", "thigh_l"),
    ("leftleg", "calf_l"),
    ("leftfoot", "foot_l"),
    ("rightupleg", "thigh_r"),
    ("rightleg", "calf_r"),
    ("rightfoot", "foot_r"),
];

/// Outcome of [`rename_fingers`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameReport {
    /// Always `Success`; collisions are per-rename skips, not failures.
    pub status: OpStatus,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Human-readable summary.
    pub message: String,
    /// Every rename the operation would perform.
    pub proposed_mappings: BTreeMap<String, String>,
    /// The renames actually applied (empty on a dry run).
    pub applied_mappings: BTreeMap<String, String>,
}

/// Renames finger bones to the `<finger>_<NN>_<side>` convention.
///
/// Dry-run by default: the proposed mapping is returned without touching
/// the armature. When applying, each rename is independent; a proposal
/// whose target name collides with an existing bone is skipped without
/// blocking the others. `include_body` is accepted but currently inert
/// (see [`BODY_BONE_MAP`]).
pub fn rename_fingers<S: SceneGraph>(
    scene: &mut S,
    armature_name: Option<&str>,
    side: SideSelector,
    include_body: bool,
    dry_run: bool,
) -> Result<RenameReport> {
    let view = inspect(scene, None, armature_name)?;
    let armature = view.armature_name.clone().ok_or_else(|| Error::NoCandidate {
        what: "armature".to_string(),
    })?;

    let mut proposed: Vec<(String, String)> = Vec::new();
    for &s in side.sides() {
        for (finger, chain) in view.fingers(s) {
            for (i, old) in chain.iter().enumerate() {
                let new = format!("{}_{:02}_{}", finger.label(), i + 1, s.letter());
                if *old != new {
                    proposed.push((old.clone(), new));
                }
            }
        }
    }

    if include_body {
        debug!(armature = %armature, "body renaming requested but not yet supported");
    }

    let proposed_map: BTreeMap<String, String> = proposed.iter().cloned().collect();

    if dry_run {
        return Ok(RenameReport {
            status: OpStatus::Success,
            dry_run: true,
            message: "Dry run complete. No bones were renamed.".to_string(),
            proposed_mappings: proposed_map,
            applied_mappings: BTreeMap::new(),
        });
    }

    let mut current: HashSet<String> = scene
        .bones(&armature)?
        .into_iter()
        .map(|b| b.name)
        .collect();
    let mut applied = BTreeMap::new();

    for (old, new) in proposed {
        // Skip collisions against the live name set, which shifts as
        // earlier renames land.
        if current.contains(&old) && !current.contains(&new) {
            scene.rename_bone(&armature, &old, &new)?;
            current.remove(&old);
            current.insert(new.clone());
            applied.insert(old, new);
        }
    }

    Ok(RenameReport {
        status: OpStatus::Success,
        dry_run: false,
        message: format!("Renamed {} bones to the target convention.", applied.len()),
        proposed_mappings: proposed_map,
        applied_mappings: applied,
    })
}
