//! The normalized, convention-independent humanoid view.
//!
//! A [`NormalizedHumanoid`] is a derived, transient snapshot: built fresh
//! from current scene state on every inspection call, never cached, never
//! kept consistent across scene edits. Rebuild after any mutation.

use rigbridge_core::{Finger, RigType, Side};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mesh summary carried by the normalized view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshInfo {
    /// Vertex count of the resolved mesh, 0 when no mesh resolved.
    pub vertex_count: usize,
    /// Whether the mesh owns an armature modifier.
    pub has_armature_modifier: bool,
}

/// Canonical role bones: the four anchors every other heuristic hangs off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBones {
    /// Pelvis/root bone.
    pub hips: Option<String>,
    /// Head bone.
    pub head: Option<String>,
    /// Left hand bone.
    pub hand_l: Option<String>,
    /// Right hand bone.
    pub hand_r: Option<String>,
}

impl RoleBones {
    /// The hand bone for a side.
    #[must_use]
    pub fn hand(&self, side: Side) -> Option<&str> {
        match side {
            Side::Left => self.hand_l.as_deref(),
            Side::Right => self.hand_r.as_deref(),
        }
    }
}

/// Root-to-tip bone chains per body part.
///
/// Populated only for classified rigs with deducible chains; sparse by
/// design for unrecognized naming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoneChains {
    /// Spine column, hips-to-neck direction.
    pub spine: Vec<String>,
    /// Left arm.
    pub arm_l: Vec<String>,
    /// Right arm.
    pub arm_r: Vec<String>,
    /// Left leg.
    pub leg_l: Vec<String>,
    /// Right leg.
    pub leg_r: Vec<String>,
}

/// A standardized description of a humanoid rig.
///
/// Serializes with exactly these field names; `fingers_l`/`fingers_r` hold
/// only labels that were actually matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedHumanoid {
    /// Classification tag.
    pub rig_type: RigType,
    /// Resolved armature object name, if any.
    pub armature_name: Option<String>,
    /// Resolved mesh object name, if any.
    pub mesh_name: Option<String>,
    /// Mesh summary.
    pub mesh_info: MeshInfo,
    /// Canonical role bones.
    pub bones: RoleBones,
    /// Body-part chains.
    pub bone_chains: BoneChains,
    /// Left-hand finger chains, root-to-tip, keyed by finger label.
    pub fingers_l: BTreeMap<Finger, Vec<String>>,
    /// Right-hand finger chains, root-to-tip, keyed by finger label.
    pub fingers_r: BTreeMap<Finger, Vec<String>>,
}

impl NormalizedHumanoid {
    /// Finger chains for a side.
    #[must_use]
    pub const fn fingers(&self, side: Side) -> &BTreeMap<Finger, Vec<String>> {
        match side {
            Side::Left => &self.fingers_l,
            Side::Right => &self.fingers_r,
        }
    }

    /// All finger bone names for the given sides, left before right,
    /// fingers in detection order, each chain root-to-tip.
    #[must_use]
    pub fn finger_bone_names(&self, sides: &[Side]) -> Vec<String> {
        let mut names = Vec::new();
        for side in sides {
            for chain in self.fingers(*side).values() {
                names.extend(chain.iter().cloned());
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_field_names() {
        let view = NormalizedHumanoid {
            rig_type: RigType::Mixamo,
            armature_name: Some("Rig".to_string()),
            mesh_name: Some("Body".to_string()),
            mesh_info: MeshInfo {
                vertex_count: 12,
                has_armature_modifier: true,
            },
            ..NormalizedHumanoid::default()
        };
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["rig_type"], "mixamo");
        assert_eq!(value["mesh_info"]["vertex_count"], 12);
        assert_eq!(value["mesh_info"]["has_armature_modifier"], true);
        assert!(value["bones"].get("hips").is_some());
        assert!(value["bone_chains"].get("spine").is_some());
        assert_eq!(value["fingers_l"], serde_json::json!({}));
    }

    #[test]
    fn finger_bone_names_orders_left_then_right() {
        let mut view = NormalizedHumanoid::default();
        view.fingers_l
            .insert(Finger::Index, vec!["index_1.l".to_string()]);
        view.fingers_l
            .insert(Finger::Thumb, vec!["thumb_1.l".to_string(), "thumb_2.l".to_string()]);
        view.fingers_r
            .insert(Finger::Thumb, vec!["thumb_1.r".to_string()]);

        let names = view.finger_bone_names(&[Side::Left, Side::Right]);
        assert_eq!(names, ["thumb_1.l", "thumb_2.l", "index_1.l", "thumb_1.r"]);
    }

    #[test]
    fn default_is_unknown_and_empty() {
        let view = NormalizedHumanoid::default();
        assert_eq!(view.rig_type, RigType::Unknown);
        assert!(view.bones.hand(Side::Left).is_none());
        assert!(view.fingers(Side::Right).is_empty());
    }
}
