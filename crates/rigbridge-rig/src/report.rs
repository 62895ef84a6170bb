//! Shared report vocabulary.

use serde::{Deserialize, Serialize};

/// Outcome discriminator carried by operation reports.
///
/// Precondition misses (e.g. auto-rigging a mesh that already has an
/// armature) are `Skipped`, not errors; hard failures surface as
/// `rigbridge_core::Error` instead of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpStatus {
    /// The operation ran and mutated/inspected the scene as requested.
    Success,
    /// A precondition was not met; the scene was left untouched.
    Skipped,
}

impl OpStatus {
    /// Returns `true` for `Success`.
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}
