//! engine::capabilities
//!
//! Capability system for command gating.
//!
//! # Architecture
//!
//! Capabilities are facts about the project established by the scanner. A
//! capability either exists or does not. Commands declare the capabilities
//! they require and gating checks them before anything else runs.
//!
//! # Example
//!
//! ```
//! use caravel::engine::capabilities::{Capability, CapabilitySet};
//!
//! let mut caps = CapabilitySet::new();
//! caps.insert(Capability::ProjectFound);
//!
//! assert!(caps.has(&Capability::ProjectFound));
//! assert!(!caps.has(&Capability::IntegrationEnabled));
//!
//! let missing = caps.missing(&[
//!     Capability::ProjectFound,
//!     Capability::IntegrationEnabled,
//! ]);
//! assert_eq!(missing, vec![Capability::IntegrationEnabled]);
//! ```

use std::collections::HashSet;

/// A proven fact about the project.
///
/// # Invariants
///
/// - A capability is binary: present or absent
/// - Capabilities are established by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// A project config was discovered.
    ProjectFound,

    /// The Cordova integration is configured and not disabled.
    IntegrationEnabled,

    /// The integration root exists and holds `config.xml`.
    IntegrationRootPresent,
}

impl Capability {
    /// Human-readable description of the capability.
    ///
    /// ```
    /// use caravel::engine::capabilities::Capability;
    ///
    /// assert_eq!(Capability::ProjectFound.description(), "project config found");
    /// ```
    pub fn description(&self) -> &'static str {
        match self {
            Capability::ProjectFound => "project config found",
            Capability::IntegrationEnabled => "cordova integration enabled",
            Capability::IntegrationRootPresent => "cordova integration root present",
        }
    }

    /// What the user can do to establish the capability.
    pub fn hint(&self) -> &'static str {
        match self {
            Capability::ProjectFound => {
                "Run it from a directory containing caravel.toml, or pass --cwd."
            }
            Capability::IntegrationEnabled => {
                "Add an [integrations.cordova] table to caravel.toml (and do not set enabled = false)."
            }
            Capability::IntegrationRootPresent => {
                "Check that [integrations.cordova].root points at the directory holding config.xml."
            }
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A set of capabilities established by the scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    capabilities: HashSet<Capability>,
}

impl CapabilitySet {
    /// Create an empty capability set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a capability set with the given capabilities.
    pub fn with<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            capabilities: iter.into_iter().collect(),
        }
    }

    /// Insert a capability into the set.
    pub fn insert(&mut self, cap: Capability) {
        self.capabilities.insert(cap);
    }

    /// Check if a capability is present.
    pub fn has(&self, cap: &Capability) -> bool {
        self.capabilities.contains(cap)
    }

    /// Capabilities from `required` that are absent, in `required` order.
    pub fn missing(&self, required: &[Capability]) -> Vec<Capability> {
        required
            .iter()
            .filter(|c| !self.has(c))
            .copied()
            .collect()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        Self::with(iter)
    }
}
