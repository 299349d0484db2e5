// src/actions.rs

//! Ordered provisioner-action sequences per cluster operation.
//!
//! The table is an ordinary value: build it once (usually with
//! [`ActionOrderTable::standard`]) and hand it to the planner.

use std::collections::{BTreeMap, HashSet};

use crate::errors::{PlanError, Result};
use crate::types::{ClusterAction, ProvisionerAction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOrderTable {
    orders: BTreeMap<ClusterAction, Vec<ProvisionerAction>>,
}

impl ActionOrderTable {
    /// Canonical lifecycle for every cluster operation.
    pub fn standard() -> Self {
        use ClusterAction as C;
        use ProvisionerAction as P;

        let mut orders = BTreeMap::new();
        orders.insert(
            C::ClusterCreate,
            vec![
                P::Create,
                P::Confirm,
                P::Bootstrap,
                P::Install,
                P::Configure,
                P::Initialize,
                P::Start,
            ],
        );
        orders.insert(C::ClusterDelete, vec![P::Delete]);
        orders.insert(C::ClusterConfigure, vec![P::Configure]);
        orders.insert(
            C::ClusterConfigureWithRestart,
            vec![P::Stop, P::Configure, P::Start],
        );
        orders.insert(C::StopServices, vec![P::Stop]);
        orders.insert(C::StartServices, vec![P::Start]);
        orders.insert(C::RestartServices, vec![P::Stop, P::Start]);
        orders.insert(
            C::AddServices,
            vec![
                P::Bootstrap,
                P::Install,
                P::Configure,
                P::Initialize,
                P::Start,
            ],
        );
        orders.insert(C::SolveLayout, Vec::new());

        Self { orders }
    }

    /// Replace the sequence for one cluster action.
    ///
    /// A sequence may not name the same action twice: the planner chains
    /// consecutive actions, so a repeat would close a loop on itself.
    pub fn with_order(
        mut self,
        cluster_action: ClusterAction,
        actions: Vec<ProvisionerAction>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for action in &actions {
            if !seen.insert(*action) {
                return Err(PlanError::ConfigError(format!(
                    "action order for '{cluster_action}' lists '{action}' more than once"
                )));
            }
        }

        self.orders.insert(cluster_action, actions);
        Ok(self)
    }

    /// Ordered actions for `cluster_action`; empty when none are defined.
    pub fn actions_for(&self, cluster_action: ClusterAction) -> &[ProvisionerAction] {
        self.orders
            .get(&cluster_action)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for ActionOrderTable {
    fn default() -> Self {
        Self::standard()
    }
}
