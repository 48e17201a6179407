//! Benchmark harness: Dijkstra vs BMSSP vs Bellman-Ford
//!
//! Loads every `.gr` file in a data directory, times each algorithm over a
//! number of repetitions, counts elementary operations once per algorithm
//! and writes one CSV row per (graph, algorithm).

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use log::{error, info, warn};
use ordered_float::OrderedFloat;
use serde::Serialize;

use bmssp::graph::loader::{load_dimacs, GraphStats};
use bmssp::graph::Graph as _;
use bmssp::{
    BellmanFord, BmsspParams, Dijkstra, DirectedGraph, Metrics, ShortestPathAlgorithm, BMSSP,
};

type Weight = OrderedFloat<f64>;
type Graph = DirectedGraph<Weight>;

#[derive(Parser)]
#[command(name = "benchmark")]
#[command(about = "Compare Dijkstra, BMSSP and Bellman-Ford on DIMACS graphs")]
struct Cli {
    /// Directory containing `.gr` files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Timed repetitions per algorithm and graph
    #[arg(long, default_value = "5")]
    reps: usize,

    /// Source vertex
    #[arg(long, default_value = "0")]
    source: usize,

    /// CSV output path
    #[arg(long, default_value = "results/benchmark_results.csv")]
    output: PathBuf,

    /// Optional JSON summary (graph statistics, timings, operation counts)
    #[arg(long)]
    json: Option<PathBuf>,

    /// JSON file with BMSSP parameter overrides
    #[arg(long)]
    params: Option<PathBuf>,

    /// Skip Bellman-Ford (it dominates the runtime on dense graphs)
    #[arg(long)]
    skip_bellman_ford: bool,
}

#[derive(Debug, Serialize)]
struct AlgorithmReport {
    algorithm: &'static str,
    mean_ms: f64,
    stddev_ms: f64,
    instructions: u64,
    metrics: Metrics,
}

#[derive(Debug, Serialize)]
struct GraphReport {
    graph: String,
    stats: GraphStats,
    params: BmsspParams,
    bmssp_matches_dijkstra: bool,
    algorithms: Vec<AlgorithmReport>,
}

fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation
fn stddev(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let m = mean(samples);
    let acc: f64 = samples.iter().map(|x| (x - m) * (x - m)).sum();
    (acc / samples.len() as f64).sqrt()
}

fn measure<A>(algorithm: &A, graph: &Graph, source: usize, reps: usize) -> bmssp::Result<AlgorithmReport>
where
    A: ShortestPathAlgorithm<Weight, Graph>,
{
    let mut times = Vec::with_capacity(reps);
    for _ in 0..reps {
        let start = Instant::now();
        algorithm.compute_shortest_paths(graph, source)?;
        times.push(start.elapsed().as_secs_f64() * 1000.0);
    }

    // Instruction count, once
    let mut metrics = Metrics::new();
    algorithm.compute_shortest_paths_instrumented(graph, source, &mut metrics)?;

    let report = AlgorithmReport {
        algorithm: algorithm.name(),
        mean_ms: mean(&times),
        stddev_ms: stddev(&times),
        instructions: metrics.total(),
        metrics,
    };
    info!(
        "  {:<12} {:>10.3} ms (sd {:.3}) {:>12} ops",
        report.algorithm, report.mean_ms, report.stddev_ms, report.instructions
    );
    Ok(report)
}

fn benchmark_graph(cli: &Cli, path: &Path, overrides: Option<&str>) -> bmssp::Result<GraphReport> {
    let edges = load_dimacs::<Weight, _>(path)?;
    edges.validate()?;
    let stats = edges.stats();
    let graph = edges.into_graph()?;

    let params = match overrides {
        Some(json) => BmsspParams::from_json(graph.vertex_count(), json)?,
        None => BmsspParams::for_vertex_count(graph.vertex_count()),
    };

    info!(
        "{}: V={}, E={}, k={}, t={}, L={}",
        path.display(),
        stats.vertices,
        stats.edges,
        params.k,
        params.t,
        params.levels
    );

    let dijkstra = Dijkstra::new();
    let engine: BMSSP<Weight, Graph> = BMSSP::new_with_params(params);

    let expected = dijkstra.compute_shortest_paths(&graph, cli.source)?;
    let actual = engine.compute_shortest_paths(&graph, cli.source)?;
    let matches = expected.distances == actual.distances;
    if !matches {
        error!("BMSSP distances differ from Dijkstra on {}", path.display());
    }

    let mut algorithms = vec![
        measure(&dijkstra, &graph, cli.source, cli.reps)?,
        measure(&engine, &graph, cli.source, cli.reps)?,
    ];
    if !cli.skip_bellman_ford {
        algorithms.push(measure(&BellmanFord::new(), &graph, cli.source, cli.reps)?);
    }

    Ok(GraphReport {
        graph: path.display().to_string(),
        stats,
        params,
        bmssp_matches_dijkstra: matches,
        algorithms,
    })
}

fn run(cli: &Cli) -> bmssp::Result<()> {
    let overrides = cli.params.as_ref().map(fs::read_to_string).transpose()?;

    let mut files: Vec<PathBuf> = fs::read_dir(&cli.data_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().map_or(false, |ext| ext == "gr"))
        .collect();
    files.sort();

    if files.is_empty() {
        warn!("no .gr files found in {}", cli.data_dir.display());
    }

    if let Some(parent) = cli.output.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut csv = BufWriter::new(File::create(&cli.output)?);
    writeln!(csv, "graph,algorithm,mean_ms,stddev_ms,instructions")?;

    let mut reports = Vec::new();
    for path in &files {
        let report = match benchmark_graph(cli, path, overrides.as_deref()) {
            Ok(report) => report,
            Err(e) => {
                error!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        for a in &report.algorithms {
            writeln!(
                csv,
                "{},{},{},{},{}",
                report.graph, a.algorithm, a.mean_ms, a.stddev_ms, a.instructions
            )?;
        }
        reports.push(report);
    }
    csv.flush()?;
    info!("results written to {}", cli.output.display());

    if let Some(json_path) = &cli.json {
        let json = serde_json::to_string_pretty(&reports)
            .map_err(|e| bmssp::Error::Config(e.to_string()))?;
        fs::write(json_path, json)?;
        info!("summary written to {}", json_path.display());
    }

    if reports.iter().any(|r| !r.bmssp_matches_dijkstra) {
        return Err(bmssp::Error::AlgorithmError(
            "BMSSP disagreed with Dijkstra on at least one graph".to_string(),
        ));
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}
