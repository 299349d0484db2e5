#![allow(dead_code)]

use clusterplan::cluster::Node;
use clusterplan::service::{Service, ServiceAction};
use clusterplan::types::ProvisionerAction;

/// Service-scoped actions a typical packaged service defines.
pub const FULL_LIFECYCLE: &[ProvisionerAction] = &[
    ProvisionerAction::Install,
    ProvisionerAction::Configure,
    ProvisionerAction::Initialize,
    ProvisionerAction::Start,
    ProvisionerAction::Stop,
    ProvisionerAction::Remove,
];

/// Builder for `Service` to simplify test setup.
pub struct ServiceBuilder {
    service: Service,
}

impl ServiceBuilder {
    /// Service defining every action in [`FULL_LIFECYCLE`].
    pub fn new(name: &str) -> Self {
        Self::bare(name).actions(FULL_LIFECYCLE)
    }

    /// Service with no actions at all.
    pub fn bare(name: &str) -> Self {
        Self {
            service: Service::new(name),
        }
    }

    pub fn action(mut self, action: ProvisionerAction) -> Self {
        self.service.actions.insert(
            action,
            ServiceAction {
                kind: "shell".to_string(),
                fields: Default::default(),
            },
        );
        self
    }

    pub fn actions(mut self, actions: &[ProvisionerAction]) -> Self {
        for a in actions {
            self = self.action(*a);
        }
        self
    }

    pub fn without_action(mut self, action: ProvisionerAction) -> Self {
        self.service.actions.remove(&action);
        self
    }

    pub fn provides(mut self, capability: &str) -> Self {
        self.service
            .dependencies
            .provides
            .insert(capability.to_string());
        self
    }

    pub fn install_requires(mut self, name: &str) -> Self {
        self.service
            .dependencies
            .install
            .requires
            .insert(name.to_string());
        self
    }

    pub fn runtime_requires(mut self, name: &str) -> Self {
        self.service
            .dependencies
            .runtime
            .requires
            .insert(name.to_string());
        self
    }

    pub fn build(self) -> Service {
        self.service
    }
}

/// Builder for `Node`.
pub struct NodeBuilder {
    node: Node,
}

impl NodeBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            node: Node::new(id),
        }
    }

    pub fn service(mut self, service: &Service) -> Self {
        self.node.services.push(service.clone());
        self
    }

    pub fn hostname(mut self, hostname: &str) -> Self {
        self.node.properties.hostname = Some(hostname.to_string());
        self
    }

    pub fn build(self) -> Node {
        self.node
    }
}
