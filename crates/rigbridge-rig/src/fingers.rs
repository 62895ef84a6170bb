//! Finger chain completion.
//!
//! Fingers that already exist under a hand are left alone; missing ones
//! are synthesized as short chains hanging off the hand bone's tail,
//! fanned out in Y and pointing down -Y segment by segment. Placement is
//! approximate on purpose: these bones exist so downstream weighting and
//! renaming have something to work with, not to match anatomy.

use std::collections::BTreeMap;

use glam::Vec3;
use rigbridge_core::{Error, Finger, NewBone, Result, SceneGraph, Side};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::inspect;
use crate::report::OpStatus;

/// Per-finger outcome in a [`FingerChainReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerStatus {
    /// A chain for this finger was already attached to the hand.
    Existed,
    /// A new chain was created.
    Created,
}

/// Outcome of [`ensure_finger_chains`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerChainReport {
    /// Always `Success`; missing preconditions are errors here.
    pub status: OpStatus,
    /// Human-readable summary.
    pub message: String,
    /// Armature the chains live on.
    pub armature_name: String,
    /// The hand side that was processed.
    pub side: Side,
    /// Outcome per requested finger.
    pub finger_status: BTreeMap<Finger, FingerStatus>,
}

/// Head offset from the hand bone's tail for each finger's first segment.
const FINGER_OFFSETS: [(Finger, Vec3); 5] = [
    (Finger::Thumb, Vec3::new(0.0, -0.03, 0.02)),
    (Finger::Index, Vec3::new(0.0, -0.01, 0.05)),
    (Finger::Middle, Vec3::new(0.0, 0.0, 0.05)),
    (Finger::Ring, Vec3::new(0.0, 0.01, 0.05)),
    (Finger::Pinky, Vec3::new(0.0, 0.02, 0.04)),
];

fn finger_offset(finger: Finger) -> Vec3 {
    FINGER_OFFSETS
        .iter()
        .find(|(f, _)| *f == finger)
        .map_or(Vec3::ZERO, |(_, offset)| *offset)
}

/// Ensures one hand has a chain for each requested finger, creating
/// `finger_segments`-bone chains for any that are missing.
///
/// The hand bone is resolved by the literal name `hand.<side>` first,
/// falling back to the normalized view's hand for prefixed conventions.
/// `fingers` of `None` means all five.
pub fn ensure_finger_chains<S: SceneGraph>(
    scene: &mut S,
    armature_name: Option<&str>,
    mesh_name: Option<&str>,
    side: Side,
    finger_segments: usize,
    fingers: Option<&[Finger]>,
) -> Result<FingerChainReport> {
    let view = inspect(scene, mesh_name, armature_name)?;
    let armature = view.armature_name.clone().ok_or_else(|| Error::NoCandidate {
        what: "armature".to_string(),
    })?;

    let bones = scene.bones(&armature)?;
    let literal = format!("hand{}", side.dotted_suffix());
    let hand_name = if bones.iter().any(|b| b.name == literal) {
        literal
    } else {
        view.bones
            .hand(side)
            .map(str::to_string)
            .ok_or_else(|| Error::BoneNotFound {
                armature: armature.clone(),
                bone: literal,
            })?
    };
    // The fallback name comes from the same bone list, so this lookup
    // cannot miss.
    let hand = bones
        .iter()
        .find(|b| b.name == hand_name)
        .ok_or_else(|| Error::BoneNotFound {
            armature: armature.clone(),
            bone: hand_name.clone(),
        })?
        .clone();

    let requested = fingers.unwrap_or(&Finger::ALL);
    let mut finger_status = BTreeMap::new();

    for &finger in requested {
        let label = finger.label();
        let exists = hand
            .children
            .iter()
            .any(|child| child.to_lowercase().starts_with(label));
        if exists {
            finger_status.insert(finger, FingerStatus::Existed);
            continue;
        }

        let mut parent = hand.name.clone();
        let mut parent_tail = hand.tail;
        for i in 0..finger_segments {
            let head = if i == 0 {
                hand.tail + finger_offset(finger)
            } else {
                parent_tail
            };
            let tail = head + Vec3::new(0.0, -0.02, 0.0);
            let name = format!("{label}_{}{}", i + 1, side.dotted_suffix());
            scene.add_bone(
                &armature,
                NewBone {
                    name: name.clone(),
                    head,
                    tail,
                    parent: Some(parent),
                },
            )?;
            parent = name;
            parent_tail = tail;
        }
        debug!(armature = %armature, finger = label, side = %side, "created finger chain");
        finger_status.insert(finger, FingerStatus::Created);
    }

    Ok(FingerChainReport {
        status: OpStatus::Success,
        message: format!(
            "Verified finger chains for side '{}'.",
            side.letter().to_uppercase()
        ),
        armature_name: armature,
        side,
        finger_status,
    })
}
