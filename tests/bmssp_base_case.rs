use bmssp::algorithm::base_case::base_case;
use bmssp::algorithm::params::BmsspParams;
use bmssp::algorithm::state::RunState;
use bmssp::graph::{DirectedGraph, Graph, MutableGraph};
use bmssp::{NoopInstrument, BMSSP};
use ordered_float::OrderedFloat;

fn sample_graph() -> DirectedGraph<OrderedFloat<f64>> {
    let mut g: DirectedGraph<OrderedFloat<f64>> = DirectedGraph::new();
    for _ in 0..5 {
        g.add_vertex();
    }
    g.add_edge(0, 1, OrderedFloat(1.0));
    g.add_edge(1, 2, OrderedFloat(1.0));
    g.add_edge(0, 2, OrderedFloat(3.0));
    g.add_edge(2, 3, OrderedFloat(1.0));
    g.add_edge(1, 3, OrderedFloat(4.0));
    g.add_edge(3, 4, OrderedFloat(1.0));
    g.add_edge(0, 4, OrderedFloat(10.0));
    g
}

#[test]
fn test_bmssp_base_case() {
    let g = sample_graph();
    let params = BmsspParams::for_vertex_count(g.vertex_count()).with_base_case_limit(2);
    let mut state = RunState::new(g.vertex_count(), 0, 0);

    let result = base_case(
        &g,
        &mut state,
        &params,
        0,
        OrderedFloat(f64::INFINITY),
        &mut NoopInstrument,
    );

    assert_eq!(result.bound, OrderedFloat(2.0));
    assert_eq!(result.completed, vec![0, 1]);
    assert!(state.complete[0] && state.complete[1]);
    assert!(!state.complete[2]);
    // Tentative values written on the way
    assert_eq!(state.dist[2], OrderedFloat(2.0));
    assert_eq!(state.dist[3], OrderedFloat(5.0));
}

#[test]
fn test_base_case_respects_bound() {
    let g = sample_graph();
    let params = BmsspParams::for_vertex_count(g.vertex_count()).with_base_case_limit(10);
    let mut state = RunState::new(g.vertex_count(), 0, 0);

    let result = base_case(&g, &mut state, &params, 0, OrderedFloat(3.0), &mut NoopInstrument);

    // Only 0 (0), 1 (1) and 2 (2) lie below the bound
    assert_eq!(result.completed, vec![0, 1, 2]);
    assert_eq!(result.bound, OrderedFloat(3.0));
    assert!(state.dist[3].is_infinite());
    assert!(state.dist[4].is_infinite());
}

#[test]
fn test_base_case_settles_source_even_at_cap_one() {
    let g = sample_graph();
    let params = BmsspParams::for_vertex_count(g.vertex_count()).with_base_case_limit(1);
    let mut state = RunState::new(g.vertex_count(), 0, 0);

    let result = base_case(
        &g,
        &mut state,
        &params,
        0,
        OrderedFloat(f64::INFINITY),
        &mut NoopInstrument,
    );

    assert_eq!(result.completed, vec![0]);
    assert_eq!(result.bound, OrderedFloat(1.0));
}

#[test]
fn test_execute_at_level_zero_is_base_case() {
    let g = sample_graph();
    let params = BmsspParams::for_vertex_count(g.vertex_count()).with_base_case_limit(2);
    let mut state = RunState::new(g.vertex_count(), 0, 0);

    let bmssp = BMSSP::<OrderedFloat<f64>, DirectedGraph<OrderedFloat<f64>>>::new_with_params(params);
    let result = bmssp.execute(
        &g,
        &params,
        0,
        OrderedFloat(f64::INFINITY),
        &[0],
        &mut state,
        &mut NoopInstrument,
    );

    assert_eq!(result.bound, OrderedFloat(2.0));
    assert_eq!(result.completed.len(), 2);
    assert!(result.completed.contains(&0));
    assert!(result.completed.contains(&1));
}

#[test]
fn test_execute_skips_complete_frontier() {
    let g = sample_graph();
    let params = BmsspParams::for_vertex_count(g.vertex_count());
    let mut state = RunState::new(g.vertex_count(), 0, 0);
    state.mark_complete(0);

    let bmssp = BMSSP::<OrderedFloat<f64>, DirectedGraph<OrderedFloat<f64>>>::new();
    let result = bmssp.execute(
        &g,
        &params,
        1,
        OrderedFloat(7.0),
        &[0],
        &mut state,
        &mut NoopInstrument,
    );

    assert!(result.completed.is_empty());
    assert_eq!(result.bound, OrderedFloat(7.0));
}

#[test]
fn test_leaf_bound_is_smallest_base_case_bound() {
    let mut g: DirectedGraph<OrderedFloat<f64>> = DirectedGraph::with_capacity(6);
    g.add_edge(0, 2, OrderedFloat(1.0));
    g.add_edge(1, 3, OrderedFloat(5.0));
    g.add_edge(2, 4, OrderedFloat(1.0));
    g.add_edge(3, 5, OrderedFloat(1.0));

    let params = BmsspParams::for_vertex_count(g.vertex_count()).with_base_case_limit(1);
    let mut state = RunState::new(g.vertex_count(), 0, 0);
    state.dist[1] = OrderedFloat(2.0);

    let bmssp = BMSSP::<OrderedFloat<f64>, DirectedGraph<OrderedFloat<f64>>>::new_with_params(params);
    let result = bmssp.execute(
        &g,
        &params,
        0,
        OrderedFloat(100.0),
        &[1, 0],
        &mut state,
        &mut NoopInstrument,
    );

    // Base case from 0 stops at 2 (distance 1), from 1 at 3 (distance 7)
    assert_eq!(result.bound, OrderedFloat(1.0));
    assert_eq!(result.completed, vec![0, 1]);
}

#[test]
fn test_level_bound_never_exceeds_input_bound() {
    let g = sample_graph();
    let params = BmsspParams::for_vertex_count(g.vertex_count())
        .with_levels(1)
        .with_k(1);

    for bound in [1.0, 2.5, 4.0, 100.0] {
        let mut state = RunState::new(g.vertex_count(), 0, params.levels);
        let bmssp = BMSSP::<OrderedFloat<f64>, DirectedGraph<OrderedFloat<f64>>>::new_with_params(params);
        let result = bmssp.execute(
            &g,
            &params,
            1,
            OrderedFloat(bound),
            &[0],
            &mut state,
            &mut NoopInstrument,
        );

        assert!(result.bound <= OrderedFloat(bound), "bound {} gave {:?}", bound, result.bound);
        assert!(result.completed.contains(&0));
        for &v in &result.completed {
            assert!(state.dist[v] < OrderedFloat(bound));
        }
    }
}
