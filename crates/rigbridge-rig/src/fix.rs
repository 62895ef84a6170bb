//! One-shot finger repair: complete the chains, then re-weight them.
//!
//! Composes [`crate::fingers::ensure_finger_chains`] and
//! [`crate::weights::rebind_fingers_only`] per side. Step faults are
//! collected into the report instead of aborting, so one bad side never
//! hides the other side's results.

use rigbridge_core::{Result, SceneGraph, SideSelector};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::fingers::ensure_finger_chains;
use crate::report::OpStatus;
use crate::weights::rebind_fingers_only;

/// How [`add_or_fix_finger_rig`] did its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixMethod {
    /// Delegated to the host's external auto-rigging tool.
    External,
    /// Built-in chain completion plus destructive re-weighting.
    Fallback,
}

/// Outcome of [`add_or_fix_finger_rig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerFixReport {
    /// Overall status; individual step faults live in `fallback_results`.
    pub status: OpStatus,
    /// Human-readable summary.
    pub message: String,
    /// Which path handled the request.
    pub method: FixMethod,
    /// Per-step results in execution order, empty on the external path.
    pub fallback_results: Vec<Value>,
}

/// Adds or repairs finger rigging on a character.
///
/// Prefers the host's external auto-rigging tool when present. The
/// fallback runs the finger chain completer per side and, when that side
/// succeeds, the finger weight re-binder (destructive, see
/// [`crate::weights`]).
pub fn add_or_fix_finger_rig<S: SceneGraph>(
    scene: &mut S,
    armature_name: Option<&str>,
    mesh_name: Option<&str>,
    side: SideSelector,
) -> Result<FingerFixReport> {
    if scene.external_autorig_available() {
        info!("delegating finger rigging to external tool");
        return Ok(FingerFixReport {
            status: OpStatus::Success,
            message: "External auto-rig tool detected; delegated finger rigging.".to_string(),
            method: FixMethod::External,
            fallback_results: Vec::new(),
        });
    }

    let mut results = Vec::new();
    for &s in side.sides() {
        match ensure_finger_chains(scene, armature_name, mesh_name, s, 3, None) {
            Ok(report) => {
                let ensured = report.status.is_success();
                results.push(serde_json::to_value(report)?);
                if ensured {
                    match rebind_fingers_only(scene, armature_name, mesh_name, s.into(), true) {
                        Ok(report) => results.push(serde_json::to_value(report)?),
                        Err(err) => results.push(json!({ "error": err.to_string() })),
                    }
                }
            }
            Err(err) => results.push(json!({ "error": err.to_string() })),
        }
    }

    Ok(FingerFixReport {
        status: OpStatus::Success,
        message: "External auto-rig tool not found. Used fallback to create and weight finger \
                  bones."
            .to_string(),
        method: FixMethod::Fallback,
        fallback_results: results,
    })
}
