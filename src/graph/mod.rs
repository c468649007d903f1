use itertools::iproduct;

use crate::geo;
use crate::sim::Node;

/// Dense proximity graph over one instant's node set.
///
/// Stored as a square matrix of dimension `node_count + 1`; the extra
/// row/column is a reserved slot that never carries edges. A cell holds the
/// great-circle distance in meters when the pair is within comms range,
/// otherwise `f64::INFINITY`. The diagonal is always infinite (no
/// self-loops).
#[derive(Debug, Clone)]
pub struct Graph {
    dim: usize,
    cells: Vec<f64>,
}

impl Graph {
    /// Edgeless graph for `node_count` nodes.
    pub fn with_nodes(node_count: usize) -> Self {
        let dim = node_count + 1;
        Self {
            dim,
            cells: vec![f64::INFINITY; dim * dim],
        }
    }

    /// Connects every pair of nodes whose separation at cruise altitude is
    /// within `comms_radius_m`. Both directions are computed independently;
    /// the result is symmetric because distance is.
    pub fn build(nodes: &[Node], comms_radius_m: f64) -> Self {
        let mut graph = Self::with_nodes(nodes.len());
        for ((i, a), (j, b)) in iproduct!(nodes.iter().enumerate(), nodes.iter().enumerate()) {
            if i == j {
                continue;
            }
            let dist = geo::air_distance(a.position, b.position);
            if dist <= comms_radius_m {
                graph.cells[i * graph.dim + j] = dist;
            }
        }
        graph
    }

    /// Matrix dimension: node count plus the reserved slot.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn node_count(&self) -> usize {
        self.dim - 1
    }

    /// Edge cost in meters, `f64::INFINITY` when `i` and `j` are not
    /// connected.
    pub fn cost(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.dim + j]
    }

    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.cost(i, j).is_finite()
    }

    /// Count of finite cells. Each undirected link is stored both ways, so
    /// this is twice the number of physical links.
    pub fn connections(&self) -> usize {
        self.cells.iter().filter(|c| c.is_finite()).count()
    }

    /// Inserts an undirected edge of length `dist_m`. Fixture helper for
    /// tests and benchmarks; `build` is the production path.
    pub fn set_edge(&mut self, i: usize, j: usize, dist_m: f64) {
        self.cells[i * self.dim + j] = dist_m;
        self.cells[j * self.dim + i] = dist_m;
    }
}
