//! engine::scan
//!
//! Project scanning and capability detection.
//!
//! # Invariants
//!
//! - Scan is read-only
//! - Scan is deterministic given the same project state
//! - Each capability implies the ones before it: no integration without a
//!   project, no integration root without an enabled integration

use std::path::PathBuf;

use super::capabilities::{Capability, CapabilitySet};
use crate::core::project::{Project, CORDOVA, CORDOVA_MANIFEST};

/// What the scanner learned about the project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectSnapshot {
    /// Root of the Cordova integration, if configured
    pub integration_root: Option<PathBuf>,
    /// Established capabilities
    pub capabilities: CapabilitySet,
}

/// Scan the (optional) project for the capabilities commands gate on.
pub fn scan(project: Option<&Project>) -> ProjectSnapshot {
    let mut snapshot = ProjectSnapshot::default();

    let Some(project) = project else {
        tracing::debug!("scan: no project");
        return snapshot;
    };
    snapshot.capabilities.insert(Capability::ProjectFound);

    let enabled = project
        .integration(CORDOVA)
        .map(|i| i.is_enabled())
        .unwrap_or(false);
    if !enabled {
        tracing::debug!(project = project.name(), "scan: cordova integration not enabled");
        return snapshot;
    }
    snapshot.capabilities.insert(Capability::IntegrationEnabled);

    let root = project.integration_root(CORDOVA);
    if let Some(root) = &root {
        if root.join(CORDOVA_MANIFEST).is_file() {
            snapshot.capabilities.insert(Capability::IntegrationRootPresent);
        } else {
            tracing::debug!(root = %root.display(), "scan: no {} in integration root", CORDOVA_MANIFEST);
        }
    }
    snapshot.integration_root = root;

    snapshot
}
