//! Server configuration and the explicit capability set.
//!
//! The original bridge gated optional command groups on ambient scene-state
//! toggles; here the set of enabled capabilities is fixed at dispatcher
//! construction time and nothing reads ambient state.
//!
//! # Examples
//!
//! ```
//! use rigbridge_core::{Capability, CapabilitySet, ServerConfig};
//!
//! let config = ServerConfig::default();
//! assert_eq!(config.bind_port, 9876);
//! assert!(config.capabilities.enabled(Capability::Rigging));
//!
//! let mut caps = CapabilitySet::all();
//! caps.disable(Capability::Export);
//! assert!(!caps.enabled(Capability::Export));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::Error;

/// A command group the dispatcher can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Read-only scene introspection (`get_scene_info`, `get_object_info`).
    SceneInspection,
    /// The humanoid rigging command family.
    Rigging,
    /// Scene export (`export_ready_character`).
    Export,
}

impl Capability {
    /// All capabilities, in a stable order.
    pub const ALL: [Self; 3] = [Self::SceneInspection, Self::Rigging, Self::Export];

    /// The `snake_case` name, as used on the CLI and in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SceneInspection => "scene_inspection",
            Self::Rigging => "rigging",
            Self::Export => "export",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scene_inspection" => Ok(Self::SceneInspection),
            "rigging" => Ok(Self::Rigging),
            "export" => Ok(Self::Export),
            other => Err(Error::InvalidArgument(format!(
                "unknown capability '{other}'"
            ))),
        }
    }
}

/// The set of capabilities a dispatcher is constructed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet(HashSet<Capability>);

impl CapabilitySet {
    /// A set with every capability enabled.
    #[must_use]
    pub fn all() -> Self {
        Self(Capability::ALL.into_iter().collect())
    }

    /// An empty set.
    #[must_use]
    pub fn none() -> Self {
        Self(HashSet::new())
    }

    /// Returns `true` if the capability is enabled.
    #[must_use]
    pub fn enabled(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// Enables a capability.
    pub fn enable(&mut self, capability: Capability) {
        self.0.insert(capability);
    }

    /// Disables a capability.
    pub fn disable(&mut self, capability: Capability) {
        self.0.remove(&capability);
    }
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Configuration for the bridge server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind. Default: loopback only.
    pub bind_host: String,

    /// TCP port. Default: 9876, the port the original bridge listened on.
    pub bind_port: u16,

    /// Capability groups the dispatcher exposes. Default: all.
    pub capabilities: CapabilitySet,

    /// Optional JSON scene description to load at startup.
    pub scene_path: Option<PathBuf>,
}

impl ServerConfig {
    /// The `host:port` string to bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.bind_port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: "127.0.0.1".to_string(),
            bind_port: 9876,
            capabilities: CapabilitySet::all(),
            scene_path: None,
        }
    }
}
