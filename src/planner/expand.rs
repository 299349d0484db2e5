// src/planner/expand.rs

//! Transitive growth of the requested service set.

use std::collections::BTreeSet;

use tracing::debug;

use crate::planner::layout::ClusterLayout;
use crate::service::ServiceDependencyResolver;
use crate::types::ServiceExpansion;

/// Expand the requested services according to `mode`.
///
/// `None` for `requested` means every service on the cluster, which is
/// already closed under both expansions. The result is a fixpoint: expanding
/// it again with the same mode returns it unchanged.
pub fn expand_services(
    mode: ServiceExpansion,
    requested: Option<&BTreeSet<String>>,
    layout: &ClusterLayout,
    resolver: &ServiceDependencyResolver<'_>,
) -> BTreeSet<String> {
    let Some(requested) = requested else {
        return layout.services().keys().cloned().collect();
    };

    let mut expanded = requested.clone();
    if mode == ServiceExpansion::None {
        return expanded;
    }

    let mut frontier: Vec<String> = expanded.iter().cloned().collect();
    while let Some(name) = frontier.pop() {
        let related = match mode {
            ServiceExpansion::RuntimeRequirements => resolver.runtime_requirements(&name),
            ServiceExpansion::RuntimeDependents => resolver.runtime_dependents(&name),
            ServiceExpansion::None => BTreeSet::new(),
        };

        for other in related {
            if expanded.insert(other.to_string()) {
                debug!(service = %other, via = %name, ?mode, "expanded target services");
                frontier.push(other.to_string());
            }
        }
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Node;
    use crate::service::Service;

    fn requiring(name: &str, runtime: &[&str]) -> Service {
        let mut s = Service::new(name);
        for r in runtime {
            s.dependencies.runtime.requires.insert(r.to_string());
        }
        s
    }

    fn layout() -> ClusterLayout {
        // x -> y -> z, w independent
        ClusterLayout::from_nodes(&[
            Node::new("n1")
                .with_service(requiring("x", &["y"]))
                .with_service(requiring("y", &["z"])),
            Node::new("n2")
                .with_service(requiring("z", &[]))
                .with_service(requiring("w", &[])),
        ])
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn requirements_are_added_transitively() {
        let layout = layout();
        let resolver = ServiceDependencyResolver::new(layout.services()).unwrap();
        let out = expand_services(
            ServiceExpansion::RuntimeRequirements,
            Some(&set(&["x"])),
            &layout,
            &resolver,
        );
        assert_eq!(out, set(&["x", "y", "z"]));
    }

    #[test]
    fn dependents_are_added_transitively() {
        let layout = layout();
        let resolver = ServiceDependencyResolver::new(layout.services()).unwrap();
        let out = expand_services(
            ServiceExpansion::RuntimeDependents,
            Some(&set(&["z"])),
            &layout,
            &resolver,
        );
        assert_eq!(out, set(&["x", "y", "z"]));

        let out = expand_services(
            ServiceExpansion::RuntimeDependents,
            Some(&set(&["x"])),
            &layout,
            &resolver,
        );
        assert_eq!(out, set(&["x"]));
    }

    #[test]
    fn no_expansion_keeps_request_and_none_means_all() {
        let layout = layout();
        let resolver = ServiceDependencyResolver::new(layout.services()).unwrap();

        let out = expand_services(ServiceExpansion::None, Some(&set(&["x"])), &layout, &resolver);
        assert_eq!(out, set(&["x"]));

        let out = expand_services(ServiceExpansion::RuntimeRequirements, None, &layout, &resolver);
        assert_eq!(out, set(&["w", "x", "y", "z"]));
    }
}
