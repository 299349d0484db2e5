mod common;

use clusterplan::dag::TaskGraph;
use clusterplan::errors::PlanError;
use clusterplan::planner::deduplicate_per_node;
use clusterplan::types::ProvisionerAction as A;

use common::{assert_edges_respected, assert_one_task_per_node, hw, item, stage};

/// Per-service chain on one host: bootstrap -> install -> configure ->
/// initialize -> start.
fn add_chain(graph: &mut TaskGraph, host: &str, service: &str) {
    graph.add_dependency(hw(host, A::Bootstrap), item(host, A::Install, service));
    graph.add_dependency(item(host, A::Install, service), item(host, A::Configure, service));
    graph.add_dependency(item(host, A::Configure, service), item(host, A::Initialize, service));
    graph.add_dependency(item(host, A::Initialize, service), item(host, A::Start, service));
}

fn single_host_graph() -> TaskGraph {
    let mut graph = TaskGraph::new();
    graph.add_dependency(hw("host1", A::Create), hw("host1", A::Bootstrap));
    add_chain(&mut graph, "host1", "datanode");
    add_chain(&mut graph, "host1", "region_server");
    graph.add_dependency(
        item("host1", A::Start, "datanode"),
        item("host1", A::Initialize, "region_server"),
    );
    graph
}

#[test]
fn single_host_cross_dependency_linearizes_in_order() {
    let graph = single_host_graph();
    let stages = graph.linearize().unwrap();

    let expected = vec![
        stage(&[hw("host1", A::Create)]),
        stage(&[hw("host1", A::Bootstrap)]),
        stage(&[
            item("host1", A::Install, "datanode"),
            item("host1", A::Install, "region_server"),
        ]),
        stage(&[
            item("host1", A::Configure, "datanode"),
            item("host1", A::Configure, "region_server"),
        ]),
        stage(&[item("host1", A::Initialize, "datanode")]),
        stage(&[item("host1", A::Start, "datanode")]),
        stage(&[item("host1", A::Initialize, "region_server")]),
        stage(&[item("host1", A::Start, "region_server")]),
    ];
    assert_eq!(stages, expected);
    assert_edges_respected(&graph, &stages);
}

#[test]
fn added_loop_is_reported_as_cycle() {
    let mut graph = single_host_graph();
    graph.add_dependency(hw("host1", A::Bootstrap), hw("host1", A::Bootstrap));
    graph.add_dependency(
        item("host1", A::Start, "region_server"),
        item("host1", A::Configure, "datanode"),
    );

    match graph.linearize() {
        Err(PlanError::GraphCycle(msg)) => assert!(msg.contains("can never become ready")),
        other => panic!("expected GraphCycle, got {other:?}"),
    }
}

#[test]
fn cross_host_dependency_delays_dependent_configure() {
    let mut graph = TaskGraph::new();
    for host in ["hostA", "hostB"] {
        graph.add_dependency(hw(host, A::Create), hw(host, A::Bootstrap));
    }
    add_chain(&mut graph, "hostA", "datanode");
    add_chain(&mut graph, "hostA", "region_server");
    add_chain(&mut graph, "hostB", "namenode");
    add_chain(&mut graph, "hostB", "hbase_master");

    graph.add_dependency(
        item("hostA", A::Start, "datanode"),
        item("hostA", A::Initialize, "region_server"),
    );
    graph.add_dependency(
        item("hostB", A::Start, "namenode"),
        item("hostB", A::Configure, "hbase_master"),
    );
    graph.add_dependency(
        item("hostA", A::Start, "datanode"),
        item("hostB", A::Configure, "hbase_master"),
    );

    let stages = graph.linearize().unwrap();
    let expected = vec![
        stage(&[hw("hostA", A::Create), hw("hostB", A::Create)]),
        stage(&[hw("hostA", A::Bootstrap), hw("hostB", A::Bootstrap)]),
        stage(&[
            item("hostA", A::Install, "datanode"),
            item("hostA", A::Install, "region_server"),
            item("hostB", A::Install, "namenode"),
            item("hostB", A::Install, "hbase_master"),
        ]),
        stage(&[
            item("hostA", A::Configure, "datanode"),
            item("hostA", A::Configure, "region_server"),
            item("hostB", A::Configure, "namenode"),
        ]),
        stage(&[
            item("hostA", A::Initialize, "datanode"),
            item("hostB", A::Initialize, "namenode"),
        ]),
        stage(&[
            item("hostA", A::Start, "datanode"),
            item("hostB", A::Start, "namenode"),
        ]),
        stage(&[
            item("hostA", A::Initialize, "region_server"),
            item("hostB", A::Configure, "hbase_master"),
        ]),
        stage(&[
            item("hostA", A::Start, "region_server"),
            item("hostB", A::Initialize, "hbase_master"),
        ]),
        stage(&[item("hostB", A::Start, "hbase_master")]),
    ];
    assert_eq!(stages, expected);
    assert_edges_respected(&graph, &stages);

    let deduped = deduplicate_per_node(stages.clone());
    assert_one_task_per_node(&deduped);
    // installs: 2 per host -> 2 sub-stages; configures: 2 on hostA -> 2.
    assert_eq!(deduped.len(), stages.len() + 2);
}

#[test]
fn dedup_adds_exactly_one_stage_for_two_tasks_on_one_node() {
    let mut graph = TaskGraph::new();
    graph.add_dependency(hw("node1", A::Bootstrap), item("node1", A::Install, "svcA"));
    graph.add_dependency(hw("node1", A::Bootstrap), item("node1", A::Install, "svcB"));

    let stages = graph.linearize().unwrap();
    assert_eq!(stages.len(), 2);

    let deduped = deduplicate_per_node(stages);
    assert_eq!(deduped.len(), 3);
    assert_eq!(deduped[1].len(), 1);
    assert_eq!(deduped[2].len(), 1);
    let mut split: Vec<_> = deduped[1].iter().chain(deduped[2].iter()).cloned().collect();
    split.sort();
    assert_eq!(
        split,
        vec![item("node1", A::Install, "svcA"), item("node1", A::Install, "svcB")]
    );
}
