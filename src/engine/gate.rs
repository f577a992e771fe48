//! engine::gate
//!
//! Capability gating for command execution.
//!
//! # Architecture
//!
//! Each command declares a requirement set. Gating compares it with the
//! capabilities from the scan: if all are present the command proceeds
//! with the snapshot, otherwise gating produces a [`GateFailure`] that
//! becomes a fatal error before any collaborator is touched.
//!
//! # Invariants
//!
//! - Gating never passes when requirements are not met
//! - Gating is deterministic given the same snapshot
//! - A failure always names at least one missing capability
//!
//! # Example
//!
//! ```
//! use caravel::engine::gate::{gate, requirements, GateResult};
//! use caravel::engine::scan::scan;
//!
//! match gate(scan(None), &requirements::PREPARE) {
//!     GateResult::Ready(_) => unreachable!(),
//!     GateResult::Blocked(failure) => {
//!         assert!(failure.to_fatal().message.contains("outside a project directory"));
//!     }
//! }
//! ```

use super::capabilities::Capability;
use super::scan::ProjectSnapshot;
use super::FatalError;
use crate::ui::output::format_command;

/// Requirements for a command to execute.
#[derive(Debug, Clone)]
pub struct RequirementSet {
    /// Command these requirements belong to.
    pub name: &'static str,
    /// Required capabilities, in the order they are checked.
    pub capabilities: &'static [Capability],
}

impl RequirementSet {
    /// Create a new requirement set.
    pub const fn new(name: &'static str, capabilities: &'static [Capability]) -> Self {
        Self { name, capabilities }
    }
}

/// Requirement sets of the built-in commands.
pub mod requirements {
    use super::*;

    /// `prepare` needs a project with a usable Cordova integration.
    pub const PREPARE: RequirementSet = RequirementSet::new(
        "prepare",
        &[
            Capability::ProjectFound,
            Capability::IntegrationEnabled,
            Capability::IntegrationRootPresent,
        ],
    );

    /// Commands that run anywhere.
    pub const NONE: RequirementSet = RequirementSet::new("none", &[]);
}

/// Result of gating check.
#[derive(Debug)]
pub enum GateResult {
    /// Requirements satisfied.
    Ready(ProjectSnapshot),
    /// Requirements not satisfied.
    Blocked(GateFailure),
}

/// Why a command may not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateFailure {
    /// The command that failed gating.
    pub command: String,
    /// Missing capabilities, in requirement order.
    pub missing: Vec<Capability>,
}

impl GateFailure {
    /// Convert into the fatal error shown to the user.
    ///
    /// Reports the first missing capability; later ones depend on it.
    pub fn to_fatal(&self) -> FatalError {
        let command = format_command(&format!("caravel {}", self.command));
        let Some(first) = self.missing.first() else {
            return FatalError::new(format!("Cannot run {}.", command));
        };

        let message = match first {
            Capability::ProjectFound => {
                format!("Cannot run {} outside a project directory.", command)
            }
            Capability::IntegrationEnabled => {
                format!("Cannot run {} without the Cordova integration.", command)
            }
            Capability::IntegrationRootPresent => format!(
                "Cannot run {}: the Cordova integration root has no config.xml.",
                command
            ),
        };
        FatalError::new(message).with_hint(first.hint())
    }
}

impl std::fmt::Display for GateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let missing: Vec<&str> = self.missing.iter().map(|c| c.description()).collect();
        write!(f, "{} blocked: missing {}", self.command, missing.join(", "))
    }
}

/// Check the snapshot's capabilities against `requirements`.
pub fn gate(snapshot: ProjectSnapshot, requirements: &RequirementSet) -> GateResult {
    let missing = snapshot.capabilities.missing(requirements.capabilities);
    if missing.is_empty() {
        GateResult::Ready(snapshot)
    } else {
        let failure = GateFailure {
            command: requirements.name.to_string(),
            missing,
        };
        tracing::debug!(%failure, "gating failed");
        GateResult::Blocked(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::capabilities::CapabilitySet;

    fn snapshot(caps: &[Capability]) -> ProjectSnapshot {
        ProjectSnapshot {
            integration_root: None,
            capabilities: CapabilitySet::with(caps.iter().copied()),
        }
    }

    #[test]
    fn all_capabilities_pass() {
        let result = gate(snapshot(requirements::PREPARE.capabilities), &requirements::PREPARE);
        assert!(matches!(result, GateResult::Ready(_)));
    }

    #[test]
    fn empty_requirements_always_pass() {
        assert!(matches!(
            gate(snapshot(&[]), &requirements::NONE),
            GateResult::Ready(_)
        ));
    }

    #[test]
    fn missing_capabilities_listed_in_order() {
        let result = gate(snapshot(&[Capability::ProjectFound]), &requirements::PREPARE);
        let GateResult::Blocked(failure) = result else {
            panic!("expected gating failure");
        };
        assert_eq!(failure.command, "prepare");
        assert_eq!(
            failure.missing,
            vec![
                Capability::IntegrationEnabled,
                Capability::IntegrationRootPresent
            ]
        );
    }

    #[test]
    fn fatal_names_first_missing_capability() {
        let failure = GateFailure {
            command: "prepare".into(),
            missing: vec![Capability::ProjectFound, Capability::IntegrationEnabled],
        };
        let fatal = failure.to_fatal();
        assert_eq!(
            fatal.message,
            "Cannot run caravel prepare outside a project directory."
        );
        assert_eq!(fatal.hint.as_deref(), Some(Capability::ProjectFound.hint()));
    }

    #[test]
    fn fatal_for_missing_manifest() {
        let failure = GateFailure {
            command: "prepare".into(),
            missing: vec![Capability::IntegrationRootPresent],
        };
        assert!(failure.to_fatal().message.contains("config.xml"));
    }
}
