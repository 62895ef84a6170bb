//! Integration tests for the full rigging workflow through the dispatcher.
//!
//! These tests drive the same command surface a connected client would
//! use: inspect, auto-rig, finger completion, renaming, and export, all
//! against one shared scene.

use glam::Vec3;
use rigbridge_core::{Aabb, CapabilitySet, NewBone, Request, Response, SceneGraph as _};
use rigbridge_scene::MemoryScene;
use rigbridge_server::Dispatcher;
use serde_json::{json, Value};

fn mesh_only_scene() -> MemoryScene {
    let mut scene = MemoryScene::new("Scene");
    scene.add_mesh(
        "Hero",
        8000,
        Aabb {
            min: Vec3::new(-0.6, -0.4, 0.0),
            max: Vec3::new(0.6, 0.4, 1.8),
        },
    );
    scene
}

fn send(dispatcher: &Dispatcher, scene: &mut MemoryScene, command: &str, params: Value) -> Response {
    dispatcher.dispatch(scene, &Request::new(command, params))
}

/// Tests the end-to-end path from an unrigged mesh to an exported file.
#[test]
fn test_mesh_to_export_workflow() {
    let dispatcher = Dispatcher::new(CapabilitySet::all());
    let mut scene = mesh_only_scene();

    // Starts as a bare mesh.
    let resp = send(&dispatcher, &mut scene, "inspect_humanoid_rig", json!({}));
    assert_eq!(resp.result.unwrap()["rig_type"], "mesh_only");

    // Auto-rig creates the fallback skeleton and binds it.
    let resp = send(
        &dispatcher,
        &mut scene,
        "auto_rig_character",
        json!({"use_external_tool": false}),
    );
    let result = resp.result.unwrap();
    assert_eq!(result["status"], "success");
    assert_eq!(result["bone_count"], 16);

    // Running it again is a no-op skip.
    let resp = send(
        &dispatcher,
        &mut scene,
        "auto_rig_character",
        json!({"use_external_tool": false}),
    );
    assert_eq!(resp.result.unwrap()["status"], "skipped");

    // Fingers for both hands via the literal hand.<side> names.
    for side in ["L", "R"] {
        let resp = send(
            &dispatcher,
            &mut scene,
            "ensure_finger_chains",
            json!({"side": side}),
        );
        assert!(resp.is_success(), "side {side}");
    }
    let resp = send(
        &dispatcher,
        &mut scene,
        "get_object_info",
        json!({"name": "Hero_Rig"}),
    );
    assert_eq!(resp.result.unwrap()["armature"]["bone_count"], 46);

    // Export the finished character.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hero.fbx");
    let resp = send(
        &dispatcher,
        &mut scene,
        "export_ready_character",
        json!({"filepath": path}),
    );
    assert!(resp.is_success());
    assert!(path.exists());
}

/// Tests that finger repair and renaming cooperate on a prefixed rig.
#[test]
fn test_finger_fix_and_rename() {
    let dispatcher = Dispatcher::new(CapabilitySet::all());
    let mut scene = mesh_only_scene();

    // Hand bones resolvable through the normalized mapping.
    scene.add_armature("Rig");
    for (name, parent) in [
        ("Hips", None),
        ("LeftHand", Some("Hips")),
        ("RightHand", Some("Hips")),
    ] {
        scene
            .add_bone(
                "Rig",
                NewBone {
                    name: name.to_string(),
                    head: Vec3::ZERO,
                    tail: Vec3::Z,
                    parent: parent.map(str::to_string),
                },
            )
            .unwrap();
    }
    scene.add_armature_modifier("Hero", "Rig").unwrap();

    let resp = send(
        &dispatcher,
        &mut scene,
        "add_or_fix_finger_rig",
        json!({"side": "both"}),
    );
    let result = resp.result.unwrap();
    assert_eq!(result["method"], "fallback");
    assert_eq!(result["fallback_results"].as_array().unwrap().len(), 4);

    // Dry run proposes the convention renames without applying them.
    let resp = send(
        &dispatcher,
        &mut scene,
        "rename_fingers_to_target_convention",
        json!({}),
    );
    let result = resp.result.unwrap();
    assert_eq!(result["dry_run"], true);
    assert_eq!(
        result["proposed_mappings"]["thumb_1.l"],
        "thumb_01_l"
    );

    // Applying renames the full set: 5 fingers, 3 segments, 2 sides.
    let resp = send(
        &dispatcher,
        &mut scene,
        "rename_fingers_to_target_convention",
        json!({"dry_run": false}),
    );
    let result = resp.result.unwrap();
    assert_eq!(result["applied_mappings"].as_object().unwrap().len(), 30);
}

/// Tests capability gating and error envelopes over the same scene.
#[test]
fn test_capability_and_error_envelopes() {
    let mut caps = CapabilitySet::all();
    caps.disable(rigbridge_core::Capability::Rigging);
    let dispatcher = Dispatcher::new(caps);
    let mut scene = mesh_only_scene();

    let resp = send(&dispatcher, &mut scene, "inspect_humanoid_rig", json!({}));
    assert!(!resp.is_success());
    assert!(resp.message.unwrap().contains("rigging"));

    let resp = send(&dispatcher, &mut scene, "get_scene_info", json!({}));
    assert!(resp.is_success());

    let resp = send(&dispatcher, &mut scene, "bake_ocean_sim", json!({}));
    assert_eq!(
        resp.message.as_deref(),
        Some("Unknown command type: bake_ocean_sim")
    );
}
