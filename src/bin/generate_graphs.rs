//! Writes seeded synthetic benchmark graphs as DIMACS files
//!
//! One `graph_<V>_<density>.gr` file per size and density class.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use bmssp::graph::generators::{generate_density, Density};
use bmssp::graph::loader::write_dimacs;

#[derive(Parser)]
#[command(name = "generate_graphs")]
#[command(about = "Generate low/medium/high density benchmark graphs")]
struct Cli {
    /// Output directory
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,

    /// Vertex counts to generate
    #[arg(long, value_delimiter = ',', default_value = "100,500,1000,5000")]
    sizes: Vec<usize>,

    /// Density classes to generate (low, medium, high)
    #[arg(long, value_delimiter = ',', default_value = "low,medium,high")]
    densities: Vec<Density>,

    /// Random seed for reproducibility
    #[arg(long, default_value = "42")]
    seed: u64,
}

fn run(cli: &Cli) -> bmssp::Result<()> {
    fs::create_dir_all(&cli.out_dir)?;

    for &size in &cli.sizes {
        for &density in &cli.densities {
            let graph = generate_density(density, size, cli.seed);
            let path = cli.out_dir.join(format!("graph_{}_{}.gr", size, density));
            let comments = vec![
                format!("density: {}", density),
                format!("seed: {}", cli.seed),
                format!("vertices: {}, edges: {}", graph.vertex_count, graph.edges.len()),
            ];
            write_dimacs(&path, &graph, &comments)?;
            info!("wrote {} ({} edges)", path.display(), graph.edges.len());
        }
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
