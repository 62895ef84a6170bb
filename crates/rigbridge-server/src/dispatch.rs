//! Command dispatch: envelope in, envelope out.
//!
//! Every handler parses its typed parameter struct, runs the operation,
//! and serializes the report. All faults are converted to error responses
//! here; nothing panics or propagates past the dispatcher.

use std::path::PathBuf;

use rigbridge_core::{
    Capability, CapabilitySet, Error, Finger, Request, Response, Result, SceneGraph, Side,
    SideSelector,
};
use rigbridge_rig::{
    add_or_fix_finger_rig, auto_rig, ensure_finger_chains, export_ready_character, inspect,
    rebind_fingers_only, rename_fingers, ExportOptions,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::scene_info::{object_info, scene_info};

/// Routes requests to command handlers, gated by the capability set fixed
/// at construction.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    capabilities: CapabilitySet,
}

/// The full command table: name to capability group.
const COMMANDS: &[(&str, Capability)] = &[
    ("get_scene_info", Capability::SceneInspection),
    ("get_object_info", Capability::SceneInspection),
    ("inspect_humanoid_rig", Capability::Rigging),
    ("auto_rig_character", Capability::Rigging),
    ("ensure_finger_chains", Capability::Rigging),
    ("auto_weight_fingers_only", Capability::Rigging),
    ("add_or_fix_finger_rig", Capability::Rigging),
    ("rename_fingers_to_target_convention", Capability::Rigging),
    ("export_ready_character", Capability::Export),
];

impl Dispatcher {
    /// Creates a dispatcher exposing the given capability groups.
    #[must_use]
    pub fn new(capabilities: CapabilitySet) -> Self {
        Self { capabilities }
    }

    /// Executes one request against the scene and returns the response.
    ///
    /// Never fails: every fault becomes an error response.
    pub fn dispatch<S: SceneGraph>(&self, scene: &mut S, request: &Request) -> Response {
        debug!(command = %request.command, "dispatching");
        match self.try_dispatch(scene, request) {
            Ok(result) => Response::success(result),
            Err(err) => {
                info!(command = %request.command, error = %err, "command failed");
                Response::error(err.to_string())
            }
        }
    }

    fn try_dispatch<S: SceneGraph>(&self, scene: &mut S, request: &Request) -> Result<Value> {
        let capability = COMMANDS
            .iter()
            .find(|(name, _)| *name == request.command)
            .map(|(_, cap)| *cap)
            .ok_or_else(|| Error::UnknownCommand {
                name: request.command.clone(),
            })?;
        if !self.capabilities.enabled(capability) {
            return Err(Error::CapabilityDisabled {
                name: request.command.clone(),
                capability: capability.as_str().to_string(),
            });
        }

        let params = request.params_or_empty();
        match request.command.as_str() {
            "get_scene_info" => Ok(scene_info(scene)),
            "get_object_info" => {
                let p: ObjectInfoParams = parse(params)?;
                object_info(scene, &p.name)
            }
            "inspect_humanoid_rig" => {
                let p: InspectParams = parse(params)?;
                let view = inspect(scene, p.mesh_name.as_deref(), p.armature_name.as_deref())?;
                to_value(&view)
            }
            "auto_rig_character" => {
                let p: AutoRigParams = parse(params)?;
                // The basic synthesizer builds fixed-length fingers later;
                // the segment count only matters on the external-tool path,
                // which is a placeholder.
                debug!(finger_segments = p.finger_segments, "auto_rig_character");
                let report = auto_rig(scene, p.mesh_name.as_deref(), p.use_external_tool)?;
                to_value(&report)
            }
            "ensure_finger_chains" => {
                let p: EnsureFingersParams = parse(params)?;
                let report = ensure_finger_chains(
                    scene,
                    p.armature_name.as_deref(),
                    p.mesh_name.as_deref(),
                    p.side,
                    p.finger_segments,
                    p.fingers.as_deref(),
                )?;
                to_value(&report)
            }
            "auto_weight_fingers_only" => {
                let p: WeightFingersParams = parse(params)?;
                let report = rebind_fingers_only(
                    scene,
                    p.armature_name.as_deref(),
                    p.mesh_name.as_deref(),
                    p.side,
                    p.normalize,
                )?;
                to_value(&report)
            }
            "add_or_fix_finger_rig" => {
                let p: FixFingersParams = parse(params)?;
                let report = add_or_fix_finger_rig(
                    scene,
                    p.armature_name.as_deref(),
                    p.mesh_name.as_deref(),
                    p.side,
                )?;
                to_value(&report)
            }
            "rename_fingers_to_target_convention" => {
                let p: RenameParams = parse(params)?;
                let report = rename_fingers(
                    scene,
                    p.armature_name.as_deref(),
                    p.side,
                    p.include_body,
                    p.dry_run,
                )?;
                to_value(&report)
            }
            "export_ready_character" => {
                let p: ExportParams = parse(params)?;
                let report = export_ready_character(
                    scene,
                    &p.filepath,
                    p.armature_name.as_deref(),
                    p.mesh_name.as_deref(),
                    ExportOptions {
                        apply_scale: p.apply_scale,
                        use_reference_pose: p.use_reference_pose,
                        export_animations: p.export_animations,
                    },
                )?;
                to_value(&report)
            }
            // The table above is the single source of command names.
            other => Err(Error::UnknownCommand {
                name: other.to_string(),
            }),
        }
    }
}

fn parse<T: for<'de> Deserialize<'de>>(params: Value) -> Result<T> {
    serde_json::from_value(params)
        .map_err(|err| Error::InvalidArgument(format!("bad parameters: {err}")))
}

fn to_value<T: serde::Serialize>(report: &T) -> Result<Value> {
    serde_json::to_value(report).map_err(Error::from)
}

fn default_true() -> bool {
    true
}

fn default_finger_segments() -> usize {
    3
}

fn default_side() -> Side {
    Side::Left
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Debug, Deserialize)]
struct ObjectInfoParams {
    name: String,
}

#[derive(Debug, Deserialize)]
struct InspectParams {
    mesh_name: Option<String>,
    armature_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AutoRigParams {
    mesh_name: Option<String>,
    #[serde(default = "default_true")]
    use_external_tool: bool,
    #[serde(default = "default_finger_segments")]
    finger_segments: usize,
}

#[derive(Debug, Deserialize)]
struct EnsureFingersParams {
    armature_name: Option<String>,
    mesh_name: Option<String>,
    #[serde(default = "default_side")]
    side: Side,
    #[serde(default = "default_finger_segments")]
    finger_segments: usize,
    fingers: Option<Vec<Finger>>,
}

#[derive(Debug, Deserialize)]
struct WeightFingersParams {
    armature_name: Option<String>,
    mesh_name: Option<String>,
    #[serde(default)]
    side: SideSelector,
    #[serde(default = "default_true")]
    normalize: bool,
}

#[derive(Debug, Deserialize)]
struct FixFingersParams {
    armature_name: Option<String>,
    mesh_name: Option<String>,
    #[serde(default)]
    side: SideSelector,
}

#[derive(Debug, Deserialize)]
struct RenameParams {
    armature_name: Option<String>,
    #[serde(default)]
    side: SideSelector,
    #[serde(default)]
    include_body: bool,
    #[serde(default = "default_true")]
    dry_run: bool,
}

#[derive(Debug, Deserialize)]
struct ExportParams {
    filepath: PathBuf,
    armature_name: Option<String>,
    mesh_name: Option<String>,
    #[serde(default = "default_scale")]
    apply_scale: f32,
    #[serde(default = "default_true")]
    use_reference_pose: bool,
    #[serde(default)]
    export_animations: bool,
}
