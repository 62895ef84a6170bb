//! Core types, traits, and errors for the rigbridge workspace.
//!
//! This crate provides the foundational types and abstractions used across
//! all other crates in the rigbridge workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Domain enums for rig classification (`RigType`, `Side`, `Finger`)
//! - The JSON command envelope (`Request`, `Response`)
//! - Error hierarchy with contextual information
//! - The `SceneGraph` trait: the contract the rigging core needs from the
//!   host application's scene
//! - Server configuration and the explicit capability set

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod command;
mod config;
mod error;
mod types;

pub mod traits;

pub use command::{Request, Response, ResponseStatus};
pub use config::{Capability, CapabilitySet, ServerConfig};
pub use error::{Error, Result};
pub use traits::{
    Aabb, BoneAxis, BoneInfo, ExportSettings, NewBone, ObjectRef, ScaleMode, SceneGraph,
};
pub use types::{Finger, ObjectKind, RigType, Side, SideSelector};
