mod common;

use common::star_graph;
use netgames::{
    Error,
    games::{
        Action, FavorParams, GameBoard, GameEvent, GameVariant, VariantKind, favor_utility,
        is_optimal,
    },
    graph::NodeId,
    networks::Preset,
};

fn complements() -> GameVariant {
    VariantKind::Complements.with_threshold(2.0)
}

fn start(preset: Preset, variant: &GameVariant) -> GameBoard {
    GameBoard::new(
        preset.graph().unwrap(),
        variant.kind().initial_action(),
        variant,
    )
}

#[test]
fn passive_eleven_is_a_complements_equilibrium() {
    let board = start(Preset::Eleven, &complements());

    assert_eq!(board.optimal_count(), 11);
    assert!(board.is_equilibrium());
    let hub = board.state(NodeId::new(2)).unwrap();
    assert_eq!(hub.util_0, 0.0);
    assert_eq!(hub.util_1, -1.5);
}

#[test]
fn activating_hub_breaks_only_the_hub() {
    let variant = complements();
    let board = start(Preset::Eleven, &variant);
    let toggled = board
        .step(&variant, GameEvent::Toggle(NodeId::new(2)))
        .unwrap();

    assert_eq!(toggled.action(NodeId::new(2)), Some(Action::Active));
    assert!(!toggled.state(NodeId::new(2)).unwrap().optimal);
    assert_eq!(toggled.state(NodeId::new(0)).unwrap().util_1, -0.5);
    assert_eq!(toggled.optimal_count(), 10);
    assert!(!toggled.is_equilibrium());

    // step leaves the input board untouched
    assert!(board.is_equilibrium());
}

#[test]
fn substitutes_star_with_active_center() {
    let variant = GameVariant::Substitutes;
    let board = GameBoard::new(star_graph(4), Action::Passive, &variant)
        .step(&variant, GameEvent::Toggle(NodeId::new(0)))
        .unwrap();

    assert!(board.is_equilibrium());
    let leaf = board.state(NodeId::new(3)).unwrap();
    assert_eq!((leaf.util_0, leaf.util_1), (1.0, 0.5));
}

#[test]
fn cohesion_starts_in_coordination_equilibrium() {
    let variant = VariantKind::Coordination.with_threshold(0.5);
    let board = start(Preset::Cohesion, &variant);

    assert!(
        board
            .states()
            .values()
            .all(|state| state.action == Action::Active)
    );
    assert!(board.is_equilibrium());
    assert!(board.states().values().all(|state| state.util_1 == 1.0));
}

#[test]
fn cohesion_starts_passive_under_complements() {
    let board = start(Preset::Cohesion, &complements());

    assert!(
        board
            .states()
            .values()
            .all(|state| state.action == Action::Passive)
    );
    assert_eq!(board.optimal_count(), 12);
    assert!(board.is_equilibrium());
}

#[test]
fn eleven_starts_active_under_coordination() {
    let board = start(Preset::Eleven, &VariantKind::Coordination.with_threshold(0.5));
    assert!(
        board
            .states()
            .values()
            .all(|state| state.action == Action::Active)
    );
}

#[test]
fn ties_are_never_optimal() {
    let variant = VariantKind::Complements.with_threshold(0.5);
    let board = GameBoard::new(Preset::Six.graph().unwrap(), Action::Passive, &variant);

    assert!(!is_optimal(Action::Passive, 0.0, 0.0));
    assert!(!is_optimal(Action::Active, 0.0, 0.0));
    assert_eq!(board.optimal_count(), 0);
    assert!(!board.is_equilibrium());
}

#[test]
fn recompute_is_idempotent() {
    let variant = complements();
    let board = GameBoard::new(Preset::Six.graph().unwrap(), Action::Passive, &variant);
    let recomputed = board.step(&variant, GameEvent::Recompute).unwrap();
    assert_eq!(board, recomputed);
}

#[test]
fn toggling_missing_node_fails() {
    let variant = complements();
    let board = GameBoard::new(Preset::Six.graph().unwrap(), Action::Passive, &variant);
    let result = board.step(&variant, GameEvent::Toggle(NodeId::new(42)));
    assert!(matches!(result, Err(Error::UnknownNode { .. })));
}

#[test]
fn favor_cycle_utilities() {
    let params = FavorParams {
        delta: 0.9,
        prob: 0.1,
        value: 0.9,
        cost: 0.5,
    };
    let utility = favor_utility(&Preset::FavorA.graph().unwrap(), &params).unwrap();
    // every node of the cycle has two relationships worth 0.36 each
    for (_, value) in utility.iter() {
        assert!((value - (2.0 * 0.36 - 0.5)).abs() < 1e-9);
    }
}
