//! Graph ingestion from text files.
//!
//! Two formats are understood:
//!
//! - DIMACS shortest-path (`.gr`): `c` comment lines, one `p sp <n> <m>`
//!   header, then `a <u> <v> <w>` arcs. Vertex ids are taken as written
//!   (0-based, which is what [`write_dimacs`] emits).
//! - A plain edge list: one `u v w` triple per line, `#` comments, with the
//!   vertex count supplied by the caller.
//!
//! This is where non-negative weights are enforced; the algorithms assume it.

use std::fmt::Debug;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info, warn};
use num_traits::{Float, NumCast, Zero};
use serde::Serialize;

use crate::graph::DirectedGraph;
use crate::{Error, Result};

/// Vertex count plus a flat list of `(from, to, weight)` edges
#[derive(Debug, Clone)]
pub struct EdgeList<W> {
    pub vertex_count: usize,
    pub edges: Vec<(usize, usize, W)>,
}

/// Summary statistics of an edge list
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub vertices: usize,
    pub edges: usize,
    /// `m / (n (n - 1))`, zero for graphs with fewer than two vertices
    pub density: f64,
    pub average_degree: f64,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    pub mean_weight: Option<f64>,
}

impl<W> EdgeList<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Checks endpoints and weights
    pub fn validate(&self) -> Result<()> {
        if self.vertex_count == 0 {
            return Err(Error::Config("graph has no vertices".to_string()));
        }
        for &(u, v, w) in &self.edges {
            if u >= self.vertex_count || v >= self.vertex_count {
                return Err(Error::InvalidEdge(u, v));
            }
            if w < W::zero() {
                return Err(Error::NegativeWeight(w.to_f64().unwrap_or(f64::NAN)));
            }
        }
        Ok(())
    }

    pub fn stats(&self) -> GraphStats {
        let n = self.vertex_count;
        let m = self.edges.len();
        let density = if n > 1 {
            m as f64 / (n as f64 * (n as f64 - 1.0))
        } else {
            0.0
        };
        let average_degree = if n > 0 { 2.0 * m as f64 / n as f64 } else { 0.0 };

        let weights: Vec<f64> = self
            .edges
            .iter()
            .filter_map(|&(_, _, w)| w.to_f64())
            .collect();
        let min_weight = weights.iter().copied().reduce(f64::min);
        let max_weight = weights.iter().copied().reduce(f64::max);
        let mean_weight = if weights.is_empty() {
            None
        } else {
            Some(weights.iter().sum::<f64>() / weights.len() as f64)
        };

        GraphStats {
            vertices: n,
            edges: m,
            density,
            average_degree,
            min_weight,
            max_weight,
            mean_weight,
        }
    }

    /// Builds the adjacency representation used by the algorithms
    pub fn into_graph(self) -> Result<DirectedGraph<W>> {
        DirectedGraph::from_edges(self.vertex_count, self.edges)
    }
}

/// Loads a DIMACS `.gr` file
pub fn load_dimacs<W, P>(path: P) -> Result<EdgeList<W>>
where
    W: Float + Zero + Debug + Copy,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)?;
    let edges = parse_dimacs(BufReader::new(file))?;
    info!(
        "Loaded {}: {} vertices, {} edges",
        path.display(),
        edges.vertex_count,
        edges.edges.len()
    );
    Ok(edges)
}

/// Parses DIMACS shortest-path text from any buffered reader
pub fn parse_dimacs<W, R>(reader: R) -> Result<EdgeList<W>>
where
    W: Float + Zero + Debug + Copy,
    R: BufRead,
{
    let mut header: Option<(usize, usize)> = None;
    let mut edges = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        match fields.next() {
            Some("c") => continue,
            Some("p") => {
                if header.is_some() {
                    return Err(parse_error(line_no, "duplicate 'p' header"));
                }
                let format = fields.next().unwrap_or_default();
                if format != "sp" {
                    warn!("line {}: expected format 'sp', found '{}'", line_no, format);
                }
                let n = parse_field::<usize>(fields.next(), line_no, "vertex count")?;
                let m = parse_field::<usize>(fields.next(), line_no, "edge count")?;
                edges.reserve(m);
                debug!("DIMACS header: {} vertices, {} edges", n, m);
                header = Some((n, m));
            }
            Some("a") => {
                let (n, _) = header
                    .ok_or_else(|| parse_error(line_no, "arc before 'p' header"))?;
                let u = parse_field::<usize>(fields.next(), line_no, "arc tail")?;
                let v = parse_field::<usize>(fields.next(), line_no, "arc head")?;
                let w = parse_weight::<W>(fields.next(), line_no)?;

                if u >= n || v >= n {
                    warn!("line {}: arc ({}, {}) out of range, skipped", line_no, u, v);
                    continue;
                }
                edges.push((u, v, w));
            }
            Some(other) => {
                warn!("line {}: unknown line kind '{}', skipped", line_no, other);
            }
            None => continue,
        }
    }

    let (vertex_count, expected) =
        header.ok_or_else(|| parse_error(0, "missing 'p sp <n> <m>' header"))?;
    if edges.len() != expected {
        warn!("expected {} edges, loaded {}", expected, edges.len());
    }

    Ok(EdgeList {
        vertex_count,
        edges,
    })
}

/// Loads a plain `u v w` edge list with a caller-supplied vertex count
pub fn load_simple<W, P>(path: P, vertex_count: usize) -> Result<EdgeList<W>>
where
    W: Float + Zero + Debug + Copy,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    parse_simple(BufReader::new(file), vertex_count)
}

/// Parses a plain edge list. Lines that do not hold three fields are skipped,
/// as are edges with an endpoint outside `[0, vertex_count)`.
pub fn parse_simple<W, R>(reader: R, vertex_count: usize) -> Result<EdgeList<W>>
where
    W: Float + Zero + Debug + Copy,
    R: BufRead,
{
    let mut edges = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() < 3 {
            debug!("line {}: fewer than three fields, skipped", line_no);
            continue;
        }
        let u = parse_field::<usize>(Some(fields[0]), line_no, "edge tail")?;
        let v = parse_field::<usize>(Some(fields[1]), line_no, "edge head")?;
        let w = parse_weight::<W>(Some(fields[2]), line_no)?;
        if u < vertex_count && v < vertex_count {
            edges.push((u, v, w));
        } else {
            warn!("line {}: edge ({}, {}) out of range, skipped", line_no, u, v);
        }
    }

    Ok(EdgeList {
        vertex_count,
        edges,
    })
}

/// Writes an edge list as DIMACS, with `c` lines for every metadata entry
pub fn write_dimacs<W, P>(path: P, graph: &EdgeList<W>, comments: &[String]) -> Result<()>
where
    W: Float + Zero + Debug + Copy,
    P: AsRef<Path>,
{
    let mut out = BufWriter::new(File::create(path.as_ref())?);
    for comment in comments {
        writeln!(out, "c {}", comment)?;
    }
    writeln!(out, "p sp {} {}", graph.vertex_count, graph.edges.len())?;
    for &(u, v, w) in &graph.edges {
        writeln!(out, "a {} {} {}", u, v, w.to_f64().unwrap_or(f64::NAN))?;
    }
    out.flush()?;
    Ok(())
}

fn parse_error(line: usize, message: &str) -> Error {
    Error::Parse {
        line,
        message: message.to_string(),
    }
}

fn parse_field<T: std::str::FromStr>(field: Option<&str>, line: usize, what: &str) -> Result<T> {
    let raw = field.ok_or_else(|| parse_error(line, &format!("missing {}", what)))?;
    raw.parse::<T>()
        .map_err(|_| parse_error(line, &format!("invalid {} '{}'", what, raw)))
}

fn parse_weight<W>(field: Option<&str>, line: usize) -> Result<W>
where
    W: Float + Zero + Debug + Copy,
{
    let raw = parse_field::<f64>(field, line, "weight")?;
    if raw < 0.0 || raw.is_nan() {
        return Err(Error::NegativeWeight(raw));
    }
    <W as NumCast>::from(raw).ok_or_else(|| parse_error(line, &format!("weight {} not representable", raw)))
}
