use std::collections::BTreeMap;

use netgames::{
    Error,
    export::write_beliefs_csv,
    graph::{Graph, NodeId},
    learning::{
        Arm, BanditTrainer, MeanBeliefObserver, NodeParams, default_node_params, draw_named_reward,
    },
};
use rand::{SeedableRng, rngs::StdRng};
use tempfile::tempdir;

fn uniform_params(graph: &Graph, params: NodeParams) -> BTreeMap<NodeId, NodeParams> {
    graph.nodes().map(|node| (node, params)).collect()
}

#[test]
fn optimistic_greedy_nodes_lock_onto_paying_arm() {
    let graph = Graph::from_edges([(0, 1), (1, 2)]).unwrap();
    let params = uniform_params(&graph, NodeParams::new(0.75, 0.0));
    let run = BanditTrainer::new(1.0, 50)
        .unwrap()
        .with_seed(1)
        .train(&graph, &params)
        .unwrap();

    for state in run.states().values() {
        assert!(state.actions.iter().all(|&arm| arm == Arm::Risky));
        assert_eq!(state.belief(), 1.0);
        assert_eq!(state.beliefs.len(), 50);
    }
}

#[test]
fn pessimistic_nodes_discover_paying_arm_by_exploring() {
    let graph = Graph::from_edges([(0, 1), (1, 2), (2, 3)]).unwrap();
    let params = default_node_params(&graph);
    let run = BanditTrainer::new(1.0, 1000)
        .unwrap()
        .with_seed(21)
        .train(&graph, &params)
        .unwrap();

    for state in run.states().values() {
        assert!(state.tries.risky > 0);
        assert_eq!(state.belief(), 1.0);
    }
}

#[test]
fn failing_risky_arm_is_abandoned() {
    let graph = Graph::from_edges([(0, 1)]).unwrap();
    let params = uniform_params(&graph, NodeParams::new(0.75, 0.0));
    let run = BanditTrainer::new(0.0, 20)
        .unwrap()
        .with_seed(2)
        .train(&graph, &params)
        .unwrap();

    for state in run.states().values() {
        assert_eq!(state.actions[0], Arm::Risky);
        assert!(state.actions[1..].iter().all(|&arm| arm == Arm::Safe));
        assert_eq!(state.belief(), 0.0);
    }
}

#[test]
fn observer_sees_every_episode() {
    let graph = Graph::from_edges([(0, 1)]).unwrap();
    let params = default_node_params(&graph);
    let mut observer = MeanBeliefObserver::new();
    let run = BanditTrainer::new(0.5, 25)
        .unwrap()
        .with_seed(4)
        .train_observed(&graph, &params, &mut observer)
        .unwrap();

    assert_eq!(observer.means().len(), 25);
    let final_mean = run.final_beliefs().values().sum::<f64>() / 2.0;
    assert_eq!(observer.means()[24], final_mean);
}

#[test]
fn isolated_nodes_learn_only_from_themselves() {
    let graph = Graph::empty(3);
    let params = uniform_params(&graph, NodeParams::new(0.75, 0.0));
    let run = BanditTrainer::new(1.0, 10)
        .unwrap()
        .with_seed(8)
        .train(&graph, &params)
        .unwrap();
    for state in run.states().values() {
        assert_eq!(state.tries.risky, 10);
        assert_eq!(state.tries.safe, 0);
    }
}

#[test]
fn belief_series_exports_to_csv() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("beliefs.csv");
    let graph = Graph::from_edges([(0, 1), (1, 2)]).unwrap();
    let params = default_node_params(&graph);
    let run = BanditTrainer::new(0.5, 10)
        .unwrap()
        .with_seed(5)
        .train(&graph, &params)
        .unwrap();

    let rows = write_beliefs_csv(&run, &path).unwrap();
    assert_eq!(rows, 30);

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("episode,node,belief"));
    let last = lines.last().unwrap();
    let belief: f64 = last.rsplit(',').next().unwrap().parse().unwrap();
    assert!(last.starts_with("9,2,"));
    assert_eq!(
        belief,
        run.belief_series(NodeId::new(2)).unwrap()[9]
    );
}

#[test]
fn rewards_by_arm_name() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(draw_named_reward("A", 0.3, &mut rng).unwrap(), 1.0);
    assert_eq!(draw_named_reward("B", 1.0, &mut rng).unwrap(), 2.0);
    assert_eq!(draw_named_reward("B", 0.0, &mut rng).unwrap(), 0.0);
    assert!(matches!(
        draw_named_reward("C", 0.5, &mut rng),
        Err(Error::UnknownArm { .. })
    ));
    assert!(matches!(
        draw_named_reward("A", 1.5, &mut rng),
        Err(Error::InvalidProbability { .. })
    ));
}
