// src/types.rs

//! Closed action vocabularies used throughout planning.
//!
//! Both enums carry their classification as associated data (`const fn`
//! matches) so that adding a variant forces every classification to be
//! revisited at compile time.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Atomic step a provisioner worker executes on one node.
///
/// The declaration order is also the sort order of [`ProvisionerAction`]
/// values (and therefore of task items inside a stage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionerAction {
    Create,
    Confirm,
    Bootstrap,
    Install,
    Configure,
    Initialize,
    Start,
    Stop,
    Remove,
    Delete,
}

/// Which lifecycle stage a dependency declaration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceStage {
    Install,
    Runtime,
}

/// Direction in which a dependency rule is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyDirection {
    /// Wait for the providers of this service's own requirements.
    Forward,
    /// Wait for the services that require this one (teardown order).
    Reverse,
}

/// How an action on one service is ordered against other services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionDependency {
    pub stage: ServiceStage,
    /// Action on the other service that must complete first.
    pub action: ProvisionerAction,
    pub direction: DependencyDirection,
}

impl ProvisionerAction {
    pub const ALL: [ProvisionerAction; 10] = [
        ProvisionerAction::Create,
        ProvisionerAction::Confirm,
        ProvisionerAction::Bootstrap,
        ProvisionerAction::Install,
        ProvisionerAction::Configure,
        ProvisionerAction::Initialize,
        ProvisionerAction::Start,
        ProvisionerAction::Stop,
        ProvisionerAction::Remove,
        ProvisionerAction::Delete,
    ];

    /// Node-scoped actions run once per node, independent of its services.
    pub const fn is_hardware_action(self) -> bool {
        matches!(
            self,
            ProvisionerAction::Create
                | ProvisionerAction::Confirm
                | ProvisionerAction::Bootstrap
                | ProvisionerAction::Delete
        )
    }

    /// Actions that only matter when a service is first placed (or removed).
    pub const fn is_install_time_action(self) -> bool {
        matches!(
            self,
            ProvisionerAction::Install
                | ProvisionerAction::Configure
                | ProvisionerAction::Initialize
                | ProvisionerAction::Remove
        )
    }

    /// Cross-service ordering rule for this action, if any.
    pub const fn dependency(self) -> Option<ActionDependency> {
        use DependencyDirection::{Forward, Reverse};
        use ProvisionerAction as A;

        let (stage, action, direction) = match self {
            A::Create | A::Confirm | A::Bootstrap | A::Delete => return None,
            A::Install => (ServiceStage::Install, A::Install, Forward),
            A::Configure => (ServiceStage::Install, A::Configure, Forward),
            A::Initialize => (ServiceStage::Runtime, A::Start, Forward),
            A::Start => (ServiceStage::Runtime, A::Start, Forward),
            A::Stop => (ServiceStage::Runtime, A::Stop, Reverse),
            A::Remove => (ServiceStage::Install, A::Remove, Reverse),
        };

        Some(ActionDependency {
            stage,
            action,
            direction,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ProvisionerAction::Create => "create",
            ProvisionerAction::Confirm => "confirm",
            ProvisionerAction::Bootstrap => "bootstrap",
            ProvisionerAction::Install => "install",
            ProvisionerAction::Configure => "configure",
            ProvisionerAction::Initialize => "initialize",
            ProvisionerAction::Start => "start",
            ProvisionerAction::Stop => "stop",
            ProvisionerAction::Remove => "remove",
            ProvisionerAction::Delete => "delete",
        }
    }
}

impl fmt::Display for ProvisionerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProvisionerAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ProvisionerAction::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| format!("invalid provisioner action: {wanted}"))
    }
}

/// How the requested service set grows before planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceExpansion {
    /// Use the requested set as given.
    None,
    /// Add everything the included services need at runtime, transitively.
    RuntimeRequirements,
    /// Add everything that needs the included services at runtime, transitively.
    RuntimeDependents,
}

/// User-facing cluster operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterAction {
    ClusterCreate,
    ClusterDelete,
    ClusterConfigure,
    ClusterConfigureWithRestart,
    StopServices,
    StartServices,
    RestartServices,
    AddServices,
    SolveLayout,
}

impl ClusterAction {
    pub const ALL: [ClusterAction; 9] = [
        ClusterAction::ClusterCreate,
        ClusterAction::ClusterDelete,
        ClusterAction::ClusterConfigure,
        ClusterAction::ClusterConfigureWithRestart,
        ClusterAction::StopServices,
        ClusterAction::StartServices,
        ClusterAction::RestartServices,
        ClusterAction::AddServices,
        ClusterAction::SolveLayout,
    ];

    pub const fn expansion(self) -> ServiceExpansion {
        match self {
            ClusterAction::StartServices => ServiceExpansion::RuntimeRequirements,
            ClusterAction::StopServices | ClusterAction::RestartServices => {
                ServiceExpansion::RuntimeDependents
            }
            ClusterAction::ClusterCreate
            | ClusterAction::ClusterDelete
            | ClusterAction::ClusterConfigure
            | ClusterAction::ClusterConfigureWithRestart
            | ClusterAction::AddServices
            | ClusterAction::SolveLayout => ServiceExpansion::None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ClusterAction::ClusterCreate => "cluster_create",
            ClusterAction::ClusterDelete => "cluster_delete",
            ClusterAction::ClusterConfigure => "cluster_configure",
            ClusterAction::ClusterConfigureWithRestart => "cluster_configure_with_restart",
            ClusterAction::StopServices => "stop_services",
            ClusterAction::StartServices => "start_services",
            ClusterAction::RestartServices => "restart_services",
            ClusterAction::AddServices => "add_services",
            ClusterAction::SolveLayout => "solve_layout",
        }
    }
}

impl fmt::Display for ClusterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClusterAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        ClusterAction::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| format!("invalid cluster action: {wanted}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hardware_actions_have_no_service_dependency() {
        for action in ProvisionerAction::ALL {
            if action.is_hardware_action() {
                assert!(action.dependency().is_none(), "{action}");
                assert!(!action.is_install_time_action(), "{action}");
            }
        }
    }

    #[test]
    fn teardown_actions_apply_in_reverse() {
        let stop = ProvisionerAction::Stop.dependency().unwrap();
        assert_eq!(stop.direction, DependencyDirection::Reverse);
        assert_eq!(stop.stage, ServiceStage::Runtime);

        let remove = ProvisionerAction::Remove.dependency().unwrap();
        assert_eq!(remove.direction, DependencyDirection::Reverse);
        assert_eq!(remove.stage, ServiceStage::Install);
    }

    #[test]
    fn initialize_waits_for_runtime_start() {
        let dep = ProvisionerAction::Initialize.dependency().unwrap();
        assert_eq!(dep.action, ProvisionerAction::Start);
        assert_eq!(dep.stage, ServiceStage::Runtime);
        assert!(ProvisionerAction::Initialize.is_install_time_action());
    }

    #[test]
    fn parse_round_trips_through_display() {
        for action in ProvisionerAction::ALL {
            assert_eq!(action.to_string().parse::<ProvisionerAction>(), Ok(action));
        }
        assert_eq!(
            "Restart-Services".parse::<ClusterAction>(),
            Ok(ClusterAction::RestartServices)
        );
        assert!("reboot".parse::<ClusterAction>().is_err());
    }
}
