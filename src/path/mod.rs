use serde::Serialize;

use crate::graph::Graph;

/// Cost model for the single-source search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostMode {
    /// Cost is cumulative great-circle distance in meters.
    Weighted,
    /// Cost is hop count. The geographic length of the chosen fewest-hop
    /// path is accumulated alongside and reported separately; it is the
    /// length of that specific path, not the minimum possible length.
    FewestHops,
}

/// Externally visible summary for one destination: path length in
/// kilometers and the number of transmissions (edges) along it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathSummary {
    pub distance_km: f64,
    pub transmissions: usize,
}

/// Result of one single-source run: best-known cost and full path to every
/// node of the graph. Nodes without a path are unreachable.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    pub root: usize,
    pub mode: CostMode,
    dist: Vec<f64>,
    dist_m: Vec<f64>,
    paths: Vec<Vec<usize>>,
}

/// Dense Dijkstra, O(V²) with a linear minimum scan instead of a priority
/// queue. Deliberate: at comms range the graph is near-complete for a few
/// hundred nodes and the dense scan is the simplest correct baseline.
pub fn shortest_paths(graph: &Graph, root: usize, mode: CostMode) -> ShortestPaths {
    let dim = graph.dim();
    let mut dist = vec![f64::INFINITY; dim];
    let mut dist_m = vec![f64::INFINITY; dim];
    let mut visited = vec![false; dim];
    let mut paths: Vec<Vec<usize>> = vec![Vec::new(); dim];

    dist[root] = 0.0;
    dist_m[root] = 0.0;
    paths[root] = vec![root];

    // The reserved slot (index dim - 1) is excluded from relaxation, so it
    // stays infinite and is never selected.
    while let Some(current) = lowest_unvisited(&dist, &visited) {
        for y in 0..dim - 1 {
            let relaxed = match mode {
                CostMode::Weighted => {
                    let next = dist[current] + graph.cost(current, y);
                    if next < dist[y] {
                        dist[y] = next;
                        dist_m[y] = next;
                        true
                    } else {
                        false
                    }
                }
                CostMode::FewestHops => {
                    if dist[current] + 1.0 < dist[y] && graph.has_edge(current, y) {
                        dist_m[y] = dist_m[current] + graph.cost(current, y);
                        dist[y] = dist[current] + 1.0;
                        true
                    } else {
                        false
                    }
                }
            };
            if relaxed {
                let mut path = paths[current].clone();
                path.push(y);
                paths[y] = path;
            }
        }
        visited[current] = true;
    }

    ShortestPaths {
        root,
        mode,
        dist,
        dist_m,
        paths,
    }
}

/// Unvisited node with the lowest known cost; ties break to the lowest
/// index. `None` once every remaining node is visited or unreachable.
fn lowest_unvisited(dist: &[f64], visited: &[bool]) -> Option<usize> {
    let mut min = f64::INFINITY;
    let mut mindex = None;
    for (i, &d) in dist.iter().enumerate() {
        if d < min && !visited[i] {
            min = d;
            mindex = Some(i);
        }
    }
    mindex
}

impl ShortestPaths {
    /// Node sequence from the root to `dest`; empty when unreachable.
    pub fn path(&self, dest: usize) -> &[usize] {
        &self.paths[dest]
    }

    pub fn is_reachable(&self, dest: usize) -> bool {
        !self.paths[dest].is_empty()
    }

    /// Selection cost: meters in weighted mode, hops in fewest-hops mode.
    pub fn cost(&self, dest: usize) -> f64 {
        self.dist[dest]
    }

    /// Geographic length of the chosen path to `dest`, in meters.
    pub fn distance_m(&self, dest: usize) -> f64 {
        self.dist_m[dest]
    }

    /// Count of nodes with a path from the root, the root included.
    pub fn reachable_count(&self) -> usize {
        self.paths.iter().filter(|p| !p.is_empty()).count()
    }

    pub fn paths(&self) -> &[Vec<usize>] {
        &self.paths
    }

    /// Report numbers for `dest`: path length in kilometers and edge count.
    /// `None` when `dest` is unreachable, never a stale value.
    pub fn summary(&self, dest: usize) -> Option<PathSummary> {
        let path = self.paths.get(dest)?;
        if path.is_empty() {
            return None;
        }
        Some(PathSummary {
            distance_km: self.dist_m[dest] / 1000.0,
            transmissions: path.len() - 1,
        })
    }
}
