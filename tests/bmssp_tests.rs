use bmssp::algorithm::params::BmsspParams;
use bmssp::algorithm::pivots::find_pivots;
use bmssp::algorithm::state::RunState;
use bmssp::graph::generators::{generate_density, generate_grid, generate_path, generate_random, Density};
use bmssp::graph::{DirectedGraph, Graph};
use bmssp::{
    BmsspSolver, Dijkstra, Error, Instrument, Metrics, NoopInstrument, ShortestPathAlgorithm, BMSSP,
};
use ordered_float::OrderedFloat;
use rand::prelude::*;
use std::collections::HashSet;

type W = OrderedFloat<f64>;
type G = DirectedGraph<W>;

const INF: f64 = f64::INFINITY;

fn w(x: f64) -> W {
    OrderedFloat(x)
}

fn assert_matches_dijkstra(graph: &G, source: usize, params: Option<BmsspParams>) {
    let expected = Dijkstra::new().compute_shortest_paths(graph, source).unwrap();
    let engine: BMSSP<W, G> = match params {
        Some(p) => BMSSP::new_with_params(p),
        None => BMSSP::new(),
    };
    let actual = engine.compute_shortest_paths(graph, source).unwrap();
    assert_eq!(
        expected.distances, actual.distances,
        "distance mismatch from source {} on {} vertices / {} edges",
        source,
        graph.vertex_count(),
        graph.edge_count()
    );

    // Every reachable non-source vertex has a tight predecessor edge
    for v in 0..graph.vertex_count() {
        match (actual.distances[v], actual.predecessors[v]) {
            (Some(d), Some(p)) => {
                let dp = actual.distances[p].expect("predecessor is reachable");
                let weight = graph.get_edge_weight(p, v).expect("predecessor edge exists");
                assert_eq!(dp + weight, d, "predecessor of {} is not tight", v);
            }
            (Some(_), None) => assert_eq!(v, source, "reachable vertex {} has no predecessor", v),
            (None, p) => assert_eq!(p, None),
        }
    }
}

#[test]
fn test_five_vertex_scenario() {
    let mut solver = BmsspSolver::new(5);
    solver.add_edge(0, 1, w(2.0)).unwrap();
    solver.add_edge(1, 2, w(1.0)).unwrap();
    solver.add_edge(1, 3, w(7.0)).unwrap();
    solver.add_edge(2, 3, w(3.0)).unwrap();
    solver.add_edge(3, 4, w(1.0)).unwrap();

    let out = solver.execute(0).unwrap();
    assert_eq!(out.distances, vec![w(0.0), w(2.0), w(3.0), w(6.0), w(7.0)]);
    assert_eq!(out.predecessors, vec![None, Some(0), Some(1), Some(2), Some(3)]);
}

#[test]
fn test_disconnected_vertex_stays_infinite() {
    let solver: BmsspSolver<W> = BmsspSolver::new(2);
    let out = solver.execute(0).unwrap();
    assert_eq!(out.distances, vec![w(0.0), w(INF)]);
    assert_eq!(out.predecessors, vec![None, None]);

    let result = out.into_result();
    assert_eq!(result.distances, vec![Some(w(0.0)), None]);
}

#[test]
fn test_self_loop_does_not_change_source() {
    let mut solver = BmsspSolver::new(3);
    solver.add_edge(0, 0, w(5.0)).unwrap();
    solver.add_edge(0, 1, w(1.0)).unwrap();
    solver.add_edge(1, 1, w(2.0)).unwrap();

    let out = solver.execute(0).unwrap();
    assert_eq!(out.distances, vec![w(0.0), w(1.0), w(INF)]);
    assert_eq!(out.predecessors, vec![None, Some(0), None]);
}

#[test]
fn test_single_vertex_graph() {
    let solver: BmsspSolver<W> = BmsspSolver::new(1);
    let out = solver.execute(0).unwrap();
    assert_eq!(out.distances, vec![w(0.0)]);
    assert_eq!(out.predecessors, vec![None]);
}

#[test]
fn test_source_out_of_range() {
    let solver: BmsspSolver<W> = BmsspSolver::new(4);
    match solver.execute(4) {
        Err(Error::SourceOutOfRange { vertex, vertex_count }) => {
            assert_eq!(vertex, 4);
            assert_eq!(vertex_count, 4);
        }
        other => panic!("expected SourceOutOfRange, got {:?}", other),
    }

    let message = solver.execute(9).unwrap_err().to_string();
    assert_eq!(message, "Source vertex 9 out of range for graph with 4 vertices");

    let empty: BmsspSolver<W> = BmsspSolver::new(0);
    assert!(matches!(empty.execute(0), Err(Error::SourceOutOfRange { .. })));
}

#[test]
fn test_add_edge_rejects_bad_input() {
    let mut solver: BmsspSolver<W> = BmsspSolver::new(3);
    assert!(matches!(solver.add_edge(0, 3, w(1.0)), Err(Error::InvalidEdge(0, 3))));
    assert!(matches!(solver.add_edge(0, 1, w(-1.0)), Err(Error::NegativeWeight(_))));
    assert!(matches!(solver.add_edge(0, 1, w(f64::NAN)), Err(Error::NegativeWeight(_))));
    assert_eq!(solver.edge_count(), 0);

    // Parallel edges are fine; the cheaper one wins
    solver.add_edge(0, 1, w(4.0)).unwrap();
    solver.add_edge(0, 1, w(2.0)).unwrap();
    let out = solver.execute(0).unwrap();
    assert_eq!(out.distances[1], w(2.0));
}

#[test]
fn test_graph_builder_rejects_negative_weights() {
    let err = G::from_edges(3, vec![(0, 1, w(1.0)), (1, 2, w(-0.5))]).unwrap_err();
    assert!(matches!(err, Error::NegativeWeight(x) if x == -0.5));

    let mut g = G::with_capacity(2);
    assert!(g.try_add_edge(0, 1, w(-1.0)).is_err());
    assert!(g.try_add_edge(0, 2, w(1.0)).is_err());
    g.try_add_edge(0, 1, w(0.0)).unwrap();
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn test_matches_dijkstra_on_random_graphs() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..40 {
        let n = rng.gen_range(1..200);
        let m = rng.gen_range(0..n * 4);
        let graph = generate_random(n, m, 20, rng.gen());
        let source = rng.gen_range(0..n);
        assert_matches_dijkstra(&graph, source, None);
    }
}

#[test]
fn test_matches_dijkstra_with_zero_weights() {
    // Weights in [0, 1]: lots of zero edges and ties
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let n = rng.gen_range(2..150);
        let graph = generate_random(n, n * 3, 1, rng.gen());
        assert_matches_dijkstra(&graph, 0, None);
    }
}

#[test]
fn test_matches_dijkstra_on_density_classes() {
    for density in Density::ALL {
        for &n in &[10usize, 64, 300] {
            let graph = generate_density(density, n, 42).into_graph().unwrap();
            assert_matches_dijkstra(&graph, 0, None);
        }
    }
}

#[test]
fn test_matches_dijkstra_on_grid_and_path() {
    let grid = generate_grid(30, 20);
    assert_matches_dijkstra(&grid, 0, None);
    assert_matches_dijkstra(&grid, 317, None);

    let path = generate_path(500, 3.0);
    assert_matches_dijkstra(&path, 0, None);
    assert_matches_dijkstra(&path, 250, None);
}

#[test]
fn test_parameters_never_change_distances() {
    let graph = generate_random(400, 2000, 50, 3);
    let base = BmsspParams::for_vertex_count(graph.vertex_count());
    let variants = [
        base,
        base.with_k(1),
        base.with_k(5),
        base.with_t(1).with_levels(4),
        base.with_levels(1),
        base.with_base_case_limit(1),
        base.with_pivot_rounds(1).with_pivot_reach(100).with_pivot_bfs_cap(1),
    ];
    for params in variants {
        assert_matches_dijkstra(&graph, 0, Some(params));
    }
}

#[test]
fn test_repeated_execution_is_identical() {
    let mut solver = BmsspSolver::new(300);
    let graph = generate_random(300, 1200, 30, 99);
    for (u, v, weight) in graph.edges() {
        solver.add_edge(u, v, weight).unwrap();
    }

    let first = solver.execute(5).unwrap();
    let second = solver.execute(5).unwrap();
    assert_eq!(first, second);
}

/// Records every write to a distance entry
#[derive(Default)]
struct WriteLog {
    touched: HashSet<usize>,
    writes: usize,
    violations: usize,
}

impl Instrument for WriteLog {
    fn distance_lowered<V: PartialOrd + Copy>(&mut self, vertex: usize, previous: V, current: V) {
        self.writes += 1;
        self.touched.insert(vertex);
        if !(current < previous) {
            self.violations += 1;
        }
    }
}

#[test]
fn test_distances_only_decrease() {
    let graph = generate_random(250, 1500, 40, 5);
    let mut log = WriteLog::default();
    BMSSP::<W, G>::new().run_instrumented(&graph, 0, &mut log).unwrap();

    assert!(log.writes >= log.touched.len());
    assert_eq!(log.violations, 0);
    // The source starts at zero and is never written
    assert!(!log.touched.contains(&0));
}

#[test]
fn test_metrics_are_observational() {
    let graph = generate_density(Density::Medium, 200, 1).into_graph().unwrap();
    let engine: BMSSP<W, G> = BMSSP::new();

    let mut metrics = Metrics::new();
    let counted = engine.run_instrumented(&graph, 0, &mut metrics).unwrap();
    let plain = engine.run_instrumented(&graph, 0, &mut NoopInstrument).unwrap();

    assert_eq!(counted, plain);
    assert!(metrics.total() > 0);
    assert!(metrics.relaxations >= graph.vertex_count() as u64 - 1);
}

#[test]
fn test_pivots_never_empty() {
    let mut rng = StdRng::seed_from_u64(21);
    let graph = generate_random(120, 600, 10, 8);
    let params = BmsspParams::for_vertex_count(graph.vertex_count());

    for _ in 0..30 {
        let mut state = RunState::new(graph.vertex_count(), 0, params.levels);
        for v in 0..graph.vertex_count() {
            if rng.gen_bool(0.3) {
                state.dist[v] = w(rng.gen_range(0..50) as f64);
            }
        }
        let size = rng.gen_range(1..20);
        let frontier: Vec<usize> = (0..size).map(|_| rng.gen_range(0..graph.vertex_count())).collect();
        let bound = w(rng.gen_range(1..100) as f64);

        let dist_before = state.dist.clone();
        let selection = find_pivots(&graph, &state, &params, &frontier, bound, &mut NoopInstrument);

        assert!(!selection.pivots.is_empty());
        assert!(selection.pivots.iter().all(|p| frontier.contains(p)));
        // Selection works on a private copy of the distances
        assert_eq!(state.dist, dist_before);
    }
}
