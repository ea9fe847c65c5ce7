mod common;

use common::{cycle, path, star};
use hamtough_core::{
    EvolvingGraph, Graph, HamtoughError, HillClimbBuilder, HillClimbOutcome, MutationKind,
    has_converged, is_viable_seed,
};
use rand::{SeedableRng, rngs::SmallRng};
use hamtough_test_support::tracing::RecordingLayer;
use rstest::rstest;
use tracing_subscriber::layer::SubscriberExt;

fn climb(order: usize, iterations: usize, seed: u64) -> HillClimbOutcome {
    HillClimbBuilder::new()
        .with_order(order)
        .with_iteration_budget(iterations)
        .with_seed(seed)
        .build()
        .expect("configuration is valid")
        .run()
}

#[rstest]
#[case(0, 10, HamtoughError::InvalidOrder { got: 0, min: 3 })]
#[case(2, 10, HamtoughError::InvalidOrder { got: 2, min: 3 })]
#[case(25, 10, HamtoughError::OrderOutOfRange { order: 25, max: 24 })]
#[case(6, 0, HamtoughError::InvalidIterationBudget { got: 0 })]
fn builder_rejects_invalid_configuration(
    #[case] order: usize,
    #[case] iterations: usize,
    #[case] expected: HamtoughError,
) {
    let builder = HillClimbBuilder::new()
        .with_order(order)
        .with_iteration_budget(iterations);
    let err = builder.clone().build().expect_err("configuration is invalid");
    assert_eq!(err, expected);
    assert!(err.is_configuration());
    assert_eq!(builder.run_batch(2).expect_err("same validation"), expected);
}

#[rstest]
fn defaults_are_exposed() {
    let builder = HillClimbBuilder::default();
    assert_eq!(builder.order(), 8);
    assert_eq!(builder.iteration_budget(), 10_000);
    assert_eq!(builder.seed(), None);
}

#[rstest]
#[case(5, 7)]
#[case(6, 1234)]
fn seeded_climbs_are_reproducible(#[case] order: usize, #[case] seed: u64) {
    assert_eq!(climb(order, 40, seed), climb(order, 40, seed));
}

#[rstest]
fn single_run_batch_matches_build_and_run() {
    let builder = HillClimbBuilder::new()
        .with_order(6)
        .with_iteration_budget(30)
        .with_seed(99);
    let batch = builder.clone().run_batch(1).expect("configuration is valid");
    let single = builder.build().expect("configuration is valid").run();
    assert_eq!(batch, vec![single]);
}

#[rstest]
fn run_batch_returns_one_outcome_per_run() {
    let outcomes = HillClimbBuilder::new()
        .with_order(5)
        .with_iteration_budget(10)
        .with_seed(3)
        .run_batch(4)
        .expect("configuration is valid");
    assert_eq!(outcomes.len(), 4);
    for outcome in &outcomes {
        assert_eq!(outcome.graph.order(), 5);
    }
}

#[rstest]
#[case(5, 11)]
#[case(7, 5)]
fn climbs_never_lose_toughness(#[case] order: usize, #[case] seed: u64) {
    let outcome = climb(order, 60, seed);
    let seed_graph = Graph::from_graph6(&outcome.seed_graph6).expect("seed encoding decodes");
    assert!(is_viable_seed(&seed_graph));
    assert!(outcome.toughness >= outcome.seed_toughness);
    assert!(outcome.iterations >= 1 && outcome.iterations <= 60);
    assert!(outcome.last_improvement < outcome.iterations);
    if outcome.iterations < 60 {
        assert!(has_converged(order, outcome.toughness));
    }
}

#[rstest]
fn outcome_displays_as_five_csv_fields() {
    let outcome = climb(6, 20, 42);
    let line = outcome.to_string();
    let fields: Vec<&str> = line.split(',').collect();
    assert_eq!(fields.len(), 5);
    assert_eq!(fields[0], outcome.seed_graph6);
    assert_eq!(fields[1], format!("{:.5}", outcome.seed_toughness));
    assert_eq!(fields[2], outcome.final_graph6());
    assert_eq!(fields[3], format!("{:.5}", outcome.toughness));
    assert_eq!(fields[4], outcome.last_improvement.to_string());
    assert_eq!(
        Graph::from_graph6(fields[2]).expect("final encoding decodes"),
        outcome.graph
    );
}

#[rstest]
#[case(8, 2.25, true)]
#[case(11, 3.0, true)]
#[case(8, 2.2, false)]
#[case(12, 2.25, false)]
fn convergence_needs_a_small_order_and_enough_toughness(
    #[case] order: usize,
    #[case] toughness: f64,
    #[case] expected: bool,
) {
    assert_eq!(has_converged(order, toughness), expected);
}

#[rstest]
fn viable_seeds_are_connected_without_an_end_to_end_path() {
    let disconnected = Graph::from_edges(4, [(0, 1), (2, 3)]).expect("edges are valid");
    assert!(!is_viable_seed(&disconnected));
    assert!(!is_viable_seed(&path(7)));
    assert!(!is_viable_seed(&cycle(5)));
    assert!(is_viable_seed(&star(4)));
}

#[rstest]
fn run_records_a_climb_span() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, || climb(5, 5, 8));

    let spans = layer.spans();
    let span = spans
        .iter()
        .find(|span| span.name == "climb.run")
        .expect("climb.run span must exist");
    assert_eq!(span.fields.get("order"), Some(&"5".to_owned()));
    assert_eq!(span.fields.get("iterations"), Some(&"5".to_owned()));
    assert!(spans.iter().any(|span| span.name == "climb.build"));
}

#[rstest]
#[case(3)]
#[case(17)]
fn drawn_mutations_name_an_edge_of_their_graph(#[case] seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut evolving = EvolvingGraph::new(cycle(6));
    let mutation = evolving.mutate(&mut rng).expect("order 6 has toggles");
    let pair = mutation.pair();
    assert!(pair.low() < pair.high() && pair.high() < 6);
    assert_eq!(
        evolving.graph().has_edge(pair.low(), pair.high()),
        mutation.kind() == MutationKind::Addition
    );

    let inverse = mutation.inverse();
    assert_eq!(inverse.pair(), pair);
    assert_ne!(inverse.kind(), mutation.kind());
    evolving.undo(&mutation);
    assert_eq!(evolving.graph(), &cycle(6));
}
