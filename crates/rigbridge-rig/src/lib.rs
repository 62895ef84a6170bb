//! Humanoid rig normalization and auto-rigging.
//!
//! Given an arbitrary scene containing a mesh and (optionally) a skeleton,
//! this crate classifies the rig's naming convention, builds a normalized
//! convention-independent description of the skeletal hierarchy, synthesizes
//! a minimal skeleton when none exists, completes and re-weights finger
//! chains, renames bones to a target convention, and drives character
//! export.
//!
//! Every operation is generic over [`rigbridge_core::SceneGraph`], rebuilds
//! its [`NormalizedHumanoid`] view fresh from current scene state, and
//! reports through a typed, serializable report struct. Faults never
//! escape as panics; everything is a [`rigbridge_core::Result`].

#![deny(unsafe_code)]

pub mod candidate;
pub mod classify;
pub mod export;
pub mod fingers;
pub mod fix;
pub mod humanoid;
pub mod normalize;
pub mod rename;
pub mod report;
pub mod synthesize;
pub mod weights;

pub use candidate::find_best_candidate;
pub use classify::{classify_bone_names, detect_rig_type, BoneNameStats};
pub use export::{export_ready_character, ExportOptions, ExportReport};
pub use fingers::{ensure_finger_chains, FingerChainReport, FingerStatus};
pub use fix::{add_or_fix_finger_rig, FingerFixReport, FixMethod};
pub use humanoid::{BoneChains, MeshInfo, NormalizedHumanoid, RoleBones};
pub use normalize::{inspect, normalization_key};
pub use rename::{rename_fingers, RenameReport, BODY_BONE_MAP};
pub use report::OpStatus;
pub use synthesize::{auto_rig, AutoRigReport};
pub use weights::{rebind_fingers_only, FingerWeightReport};
