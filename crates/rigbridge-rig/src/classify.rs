//! Rig-type classification from the bone-name set.
//!
//! Pure string heuristics, expressed as an explicit rule table evaluated
//! top-to-bottom so the priority between overlapping predicates is visible
//! rather than buried in control flow. First match wins.

use rigbridge_core::{Result, RigType, SceneGraph};

/// Substring that marks a Mixamo-exported bone name (lowercase).
pub const MIXAMO_MARKER: &str = "mixamorig:";

/// More than this many marker hits classifies the rig as Mixamo.
pub const MIXAMO_HIT_THRESHOLD: usize = 5;

/// More than this many bones classifies an unrecognized rig as a generic
/// humanoid.
pub const HUMANOID_BONE_THRESHOLD: usize = 10;

/// Summary of a skeleton's bone-name set, the only input classification
/// looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoneNameStats {
    /// Total number of bones.
    pub bone_count: usize,
    /// Number of names containing [`MIXAMO_MARKER`] (case-insensitive).
    pub mixamo_hits: usize,
}

impl BoneNameStats {
    /// Computes stats over an iterator of bone names.
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut bone_count = 0;
        let mut mixamo_hits = 0;
        for name in names {
            bone_count += 1;
            if name.to_lowercase().contains(MIXAMO_MARKER) {
                mixamo_hits += 1;
            }
        }
        Self {
            bone_count,
            mixamo_hits,
        }
    }
}

/// One classification rule: predicate plus the tag it assigns.
struct Rule {
    applies: fn(BoneNameStats) -> bool,
    tag: RigType,
}

/// Ordered rule table; evaluation stops at the first match.
const RULES: &[Rule] = &[
    Rule {
        applies: |s| s.mixamo_hits > MIXAMO_HIT_THRESHOLD,
        tag: RigType::Mixamo,
    },
    Rule {
        applies: |s| s.bone_count > HUMANOID_BONE_THRESHOLD,
        tag: RigType::GenericHumanoid,
    },
];

/// Classifies a bone-name summary. Falls through to `Unknown` when no rule
/// matches.
#[must_use]
pub fn classify_bone_names(stats: BoneNameStats) -> RigType {
    RULES
        .iter()
        .find(|rule| (rule.applies)(stats))
        .map_or(RigType::Unknown, |rule| rule.tag)
}

/// Detects the rig type of an optional armature in the scene.
///
/// No armature at all is `MeshOnly`; otherwise the classification is a
/// pure function of the armature's current bone names.
pub fn detect_rig_type<S: SceneGraph>(scene: &S, armature: Option<&str>) -> Result<RigType> {
    let Some(armature) = armature else {
        return Ok(RigType::MeshOnly);
    };
    let bones = scene.bones(armature)?;
    let stats = BoneNameStats::from_names(bones.iter().map(|b| b.name.as_str()));
    Ok(classify_bone_names(stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(bone_count: usize, mixamo_hits: usize) -> BoneNameStats {
        BoneNameStats {
            bone_count,
            mixamo_hits,
        }
    }

    #[test]
    fn small_unmarked_rig_is_unknown() {
        assert_eq!(classify_bone_names(stats(0, 0)), RigType::Unknown);
        assert_eq!(classify_bone_names(stats(10, 0)), RigType::Unknown);
        assert_eq!(classify_bone_names(stats(10, 5)), RigType::Unknown);
    }

    #[test]
    fn large_rig_is_generic_humanoid() {
        assert_eq!(classify_bone_names(stats(11, 0)), RigType::GenericHumanoid);
        assert_eq!(classify_bone_names(stats(200, 5)), RigType::GenericHumanoid);
    }

    #[test]
    fn mixamo_hits_win_regardless_of_bone_count() {
        assert_eq!(classify_bone_names(stats(6, 6)), RigType::Mixamo);
        assert_eq!(classify_bone_names(stats(500, 6)), RigType::Mixamo);
    }

    #[test]
    fn marker_matching_is_case_insensitive() {
        let names = [
            "MixamoRig:Hips",
            "mixamorig:Spine",
            "MIXAMORIG:Neck",
            "mixamorig:Head",
            "mixamorig:LeftHand",
            "mixamorig:RightHand",
        ];
        let stats = BoneNameStats::from_names(names.iter().copied());
        assert_eq!(stats.mixamo_hits, 6);
        assert_eq!(classify_bone_names(stats), RigType::Mixamo);
    }

    #[test]
    fn seven_bones_three_hits_is_unknown() {
        // Three mixamo-named bones plus four others: hits <= 5 and
        // bones <= 10, so neither rule fires.
        let names = [
            "mixamorig:Hips",
            "mixamorig:Head",
            "mixamorig:LeftHand",
            "bone_a",
            "bone_b",
            "bone_c",
            "bone_d",
        ];
        let stats = BoneNameStats::from_names(names.iter().copied());
        assert_eq!(stats.bone_count, 7);
        assert_eq!(stats.mixamo_hits, 3);
        assert_eq!(classify_bone_names(stats), RigType::Unknown);
    }
}
