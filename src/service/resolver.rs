// src/service/resolver.rs

//! Resolves declared service requirements against the services present on
//! a cluster.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use tracing::debug;

use crate::errors::{PlanError, Result};
use crate::service::model::Service;
use crate::types::{DependencyDirection, ProvisionerAction, ServiceStage};

/// An action on a named service that another task has to wait for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionOnService {
    pub service: String,
    pub action: ProvisionerAction,
}

impl ActionOnService {
    pub fn new(service: impl Into<String>, action: ProvisionerAction) -> Self {
        Self {
            service: service.into(),
            action,
        }
    }
}

impl fmt::Display for ActionOnService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.action, self.service)
    }
}

/// Read-only dependency view over the services of one cluster.
///
/// Conflicts are not checked here; layout validation upstream guarantees
/// that the service set is feasible.
#[derive(Debug)]
pub struct ServiceDependencyResolver<'a> {
    services: &'a BTreeMap<String, Service>,
    /// Capability name -> name of the single service providing it.
    providers: HashMap<&'a str, &'a str>,
}

impl<'a> ServiceDependencyResolver<'a> {
    /// Index every capability on the cluster.
    ///
    /// Fails with [`PlanError::AmbiguousProvider`] when two services claim
    /// the same capability, since requirements on it could not be resolved
    /// to a single provider.
    pub fn new(services: &'a BTreeMap<String, Service>) -> Result<Self> {
        let mut claims: BTreeMap<&'a str, BTreeSet<&'a str>> = BTreeMap::new();
        for svc in services.values() {
            for capability in svc.provided_names() {
                claims
                    .entry(capability)
                    .or_default()
                    .insert(svc.name.as_str());
            }
        }

        let mut providers = HashMap::with_capacity(claims.len());
        for (capability, owners) in claims {
            let owners: Vec<&'a str> = owners.into_iter().collect();
            match owners.as_slice() {
                [only] => {
                    providers.insert(capability, *only);
                }
                _ => {
                    return Err(PlanError::AmbiguousProvider {
                        capability: capability.to_string(),
                        providers: owners.iter().map(|s| s.to_string()).collect(),
                    });
                }
            }
        }

        Ok(Self {
            services,
            providers,
        })
    }

    /// Service that satisfies the given service or capability name.
    pub fn provider_of(&self, capability: &str) -> Option<&'a str> {
        self.providers.get(capability).copied()
    }

    /// (service, action) pairs that must finish before `action` may run on
    /// `service`.
    ///
    /// Forward rules look at the providers of the service's own
    /// requirements in the action's stage; reverse (teardown) rules look at
    /// the services whose requirements this service satisfies. Only
    /// services that actually define the dependency action are returned.
    pub fn direct_dependent_actions(
        &self,
        service: &str,
        action: ProvisionerAction,
    ) -> Vec<ActionOnService> {
        let Some(rule) = action.dependency() else {
            return Vec::new();
        };
        if !self.services.contains_key(service) {
            return Vec::new();
        }

        let related = match rule.direction {
            DependencyDirection::Forward => self.requirements_of(service, rule.stage),
            DependencyDirection::Reverse => self.dependents_of(service, rule.stage),
        };

        related
            .into_iter()
            .filter_map(|name| self.services.get(name))
            .filter(|svc| svc.defines(rule.action))
            .map(|svc| ActionOnService::new(svc.name.clone(), rule.action))
            .collect()
    }

    /// Whether `service_a` needs `service_b` while running.
    pub fn runtime_depends_on(&self, service_a: &str, service_b: &str) -> bool {
        self.requirements_of(service_a, ServiceStage::Runtime)
            .contains(service_b)
    }

    /// Providers of everything `service` requires at runtime.
    pub fn runtime_requirements(&self, service: &str) -> BTreeSet<&'a str> {
        self.requirements_of(service, ServiceStage::Runtime)
    }

    /// Services that require `service` at runtime.
    pub fn runtime_dependents(&self, service: &str) -> BTreeSet<&'a str> {
        self.dependents_of(service, ServiceStage::Runtime)
    }

    fn requirements_of(&self, service: &str, stage: ServiceStage) -> BTreeSet<&'a str> {
        let Some(svc) = self.services.get(service) else {
            return BTreeSet::new();
        };

        let mut resolved = BTreeSet::new();
        for required in &svc.dependencies.stage(stage).requires {
            match self.provider_of(required) {
                Some(provider) if provider == svc.name => {}
                Some(provider) => {
                    resolved.insert(provider);
                }
                None => {
                    debug!(
                        service = %svc.name,
                        requirement = %required,
                        ?stage,
                        "requirement has no provider on this cluster; skipping"
                    );
                }
            }
        }
        resolved
    }

    fn dependents_of(&self, service: &str, stage: ServiceStage) -> BTreeSet<&'a str> {
        self.services
            .values()
            .filter(|other| other.name != service)
            .filter(|other| self.requirements_of(&other.name, stage).contains(service))
            .map(|other| other.name.as_str())
            .collect()
    }
}
