//! Domain types shared across the rigbridge workspace.
//!
//! These enums carry the vocabulary of the rigging core: rig classification
//! tags, body sides, finger labels, and scene object kinds. All of them
//! serialize to the exact wire strings used by command parameters and
//! results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Classification tag for a skeleton's naming convention.
///
/// Assigned by the rig classifier from the bone-name set alone; it never
/// inspects geometry.
///
/// # Examples
///
/// ```
/// use rigbridge_core::RigType;
///
/// let tag = RigType::Mixamo;
/// assert_eq!(tag.as_str(), "mixamo");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RigType {
    /// A mesh with no associated armature at all.
    MeshOnly,
    /// A Mixamo-style rig, recognized by `mixamorig:`-prefixed bone names.
    Mixamo,
    /// A rig with enough bones to plausibly be a humanoid, but no
    /// recognized naming convention.
    GenericHumanoid,
    /// An armature exists but matches no known convention and is too small
    /// to assume humanoid structure.
    #[default]
    Unknown,
}

impl RigType {
    /// Returns the `snake_case` wire string for this tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MeshOnly => "mesh_only",
            Self::Mixamo => "mixamo",
            Self::GenericHumanoid => "generic_humanoid",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a bilateral humanoid body.
///
/// Accepts `"L"`, `"l"`, `"left"` (and the right-hand equivalents) on the
/// wire; serializes to the lowercase letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The character's left.
    #[serde(rename = "l", alias = "L", alias = "left", alias = "Left")]
    Left,
    /// The character's right.
    #[serde(rename = "r", alias = "R", alias = "right", alias = "Right")]
    Right,
}

impl Side {
    /// Lowercase single-letter suffix (`"l"` / `"r"`).
    #[must_use]
    pub const fn letter(self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Right => "r",
        }
    }

    /// Dotted bone-name suffix (`".l"` / `".r"`), the convention used by
    /// synthesized bones.
    #[must_use]
    pub const fn dotted_suffix(self) -> &'static str {
        match self {
            Self::Left => ".l",
            Self::Right => ".r",
        }
    }

    /// Sign multiplier on the X axis for mirrored bone placement.
    ///
    /// Right is +X, left is -X, matching the synthesizer's mirroring rule.
    #[must_use]
    pub const fn x_sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Self::Left),
            "r" | "right" => Ok(Self::Right),
            other => Err(Error::InvalidArgument(format!(
                "invalid side '{other}', expected L or R"
            ))),
        }
    }
}

/// Side parameter form for commands that also accept `"both"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideSelector {
    /// Left side only.
    #[serde(rename = "l", alias = "L", alias = "left", alias = "Left")]
    Left,
    /// Right side only.
    #[serde(rename = "r", alias = "R", alias = "right", alias = "Right")]
    Right,
    /// Both sides, processed left then right.
    #[default]
    #[serde(rename = "both", alias = "Both", alias = "BOTH")]
    Both,
}

impl SideSelector {
    /// Expands the selector into the concrete sides to process, in order.
    #[must_use]
    pub const fn sides(self) -> &'static [Side] {
        match self {
            Self::Left => &[Side::Left],
            Self::Right => &[Side::Right],
            Self::Both => &[Side::Left, Side::Right],
        }
    }
}

impl From<Side> for SideSelector {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Self::Left,
            Side::Right => Self::Right,
        }
    }
}

/// One of the five finger labels used for chain detection and creation.
///
/// `Finger::ALL` is the fixed detection order; when classifying a hand
/// child the first matching label wins. The `Ord` impl follows the same
/// order, so finger-keyed maps iterate thumb-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finger {
    /// Thumb.
    Thumb,
    /// Index finger.
    Index,
    /// Middle finger.
    Middle,
    /// Ring finger.
    Ring,
    /// Pinky finger.
    Pinky,
}

impl Finger {
    /// All finger labels in the fixed detection order.
    pub const ALL: [Self; 5] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Pinky,
    ];

    /// Lowercase wire label for this finger.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Pinky => "pinky",
        }
    }

    /// Returns the first finger whose label occurs as a substring of the
    /// lowercased bone name, checked in `ALL` order.
    #[must_use]
    pub fn match_bone_name(bone_name: &str) -> Option<Self> {
        let lower = bone_name.to_lowercase();
        Self::ALL.into_iter().find(|f| lower.contains(f.label()))
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Finger {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "thumb" => Ok(Self::Thumb),
            "index" => Ok(Self::Index),
            "middle" => Ok(Self::Middle),
            "ring" => Ok(Self::Ring),
            "pinky" => Ok(Self::Pinky),
            other => Err(Error::InvalidArgument(format!(
                "unknown finger label '{other}'"
            ))),
        }
    }
}

/// Scene object type tag, matching the host application's object types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ObjectKind {
    /// A geometric mesh object.
    Mesh,
    /// An armature (skeleton) object.
    Armature,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mesh => f.write_str("MESH"),
            Self::Armature => f.write_str("ARMATURE"),
        }
    }
}
