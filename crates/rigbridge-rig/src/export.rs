//! Character export with the fixed engine-friendly parameter set.

use std::path::{Path, PathBuf};

use rigbridge_core::{Error, ExportSettings, ObjectKind, Result, SceneGraph};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::candidate::find_best_candidate;
use crate::report::OpStatus;

/// Outcome of [`export_ready_character`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    /// Always `Success`; export failures are errors, not reports.
    pub status: OpStatus,
    /// Human-readable summary.
    pub message: String,
    /// Where the host wrote the exported file.
    pub filepath: PathBuf,
}

/// Options for [`export_ready_character`] beyond object resolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Uniform scale factor to bake into the export.
    pub apply_scale: f32,
    /// Zero all pose rotations first to force a reference pose. The pose
    /// mutation is not reverted after the export.
    pub use_reference_pose: bool,
    /// Bake animations from actions.
    pub export_animations: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            apply_scale: 1.0,
            use_reference_pose: true,
            export_animations: false,
        }
    }
}

/// Exports a rigged character (armature plus mesh) to `filepath`.
///
/// When either object name is missing or does not resolve, the candidate
/// selector replaces the whole pair; export needs both. The parameter set
/// handed to the host is fixed apart from path, selection, scale, and
/// animation baking ([`ExportSettings::character_defaults`]).
pub fn export_ready_character<S: SceneGraph>(
    scene: &mut S,
    filepath: &Path,
    armature_name: Option<&str>,
    mesh_name: Option<&str>,
    options: ExportOptions,
) -> Result<ExportReport> {
    if filepath.as_os_str().is_empty() {
        return Err(Error::InvalidArgument(
            "A filepath must be provided for the export.".to_string(),
        ));
    }

    let mut armature = armature_name
        .and_then(|name| scene.object(name))
        .filter(|o| o.kind == ObjectKind::Armature)
        .map(|o| o.name);
    let mut mesh = mesh_name
        .and_then(|name| scene.object(name))
        .filter(|o| o.kind == ObjectKind::Mesh)
        .map(|o| o.name);

    // A half-resolved pair is replaced wholesale: the candidate pair is
    // known to belong together, a leftover explicit name may not.
    if armature.is_none() || mesh.is_none() {
        let (candidate_mesh, candidate_armature) = find_best_candidate(scene);
        mesh = candidate_mesh;
        armature = candidate_armature;
    }
    let (Some(armature), Some(mesh)) = (armature, mesh) else {
        return Err(Error::NoCandidate {
            what: "mesh and armature to export".to_string(),
        });
    };

    if options.use_reference_pose {
        scene.reset_pose_rotations(&armature)?;
    }

    let settings = ExportSettings::character_defaults(
        filepath,
        vec![armature.clone(), mesh.clone()],
        options.apply_scale,
        options.export_animations,
    );
    let written = scene.export(&settings)?;
    info!(armature = %armature, mesh = %mesh, path = %written.display(), "exported character");

    Ok(ExportReport {
        status: OpStatus::Success,
        message: format!(
            "Successfully exported '{armature}' and '{mesh}' to '{}'.",
            written.display()
        ),
        filepath: written,
    })
}
