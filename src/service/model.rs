// src/service/model.rs

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{ProvisionerAction, ServiceStage};

/// Requirements and conflicts for one lifecycle stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageDependencies {
    /// Service or capability names that must be present.
    pub requires: BTreeSet<String>,
    pub conflicts: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDependencies {
    /// Capabilities this service satisfies in addition to its own name.
    pub provides: BTreeSet<String>,
    /// Checked by layout validation before planning; carried for completeness.
    pub conflicts: BTreeSet<String>,
    pub install: StageDependencies,
    pub runtime: StageDependencies,
}

impl ServiceDependencies {
    pub fn stage(&self, stage: ServiceStage) -> &StageDependencies {
        match stage {
            ServiceStage::Install => &self.install,
            ServiceStage::Runtime => &self.runtime,
        }
    }
}

/// How a provisioner carries out one action for a service.
///
/// The planner only cares whether an action is defined; the contents are
/// passed through to whoever executes the task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceAction {
    /// Automator type, e.g. `"chef-solo"` or `"shell"`.
    pub kind: String,
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub dependencies: ServiceDependencies,
    pub actions: BTreeMap<ProvisionerAction, ServiceAction>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: ServiceDependencies::default(),
            actions: BTreeMap::new(),
        }
    }

    pub fn defines(&self, action: ProvisionerAction) -> bool {
        self.actions.contains_key(&action)
    }

    /// Every capability name this service satisfies, its own name first.
    pub fn provided_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(
            self.dependencies
                .provides
                .iter()
                .map(|s| s.as_str())
                .filter(move |p| *p != self.name),
        )
    }
}
