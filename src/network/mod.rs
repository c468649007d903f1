use serde::Serialize;
use tracing::debug;

use crate::graph::Graph;
use crate::path::{self, CostMode, PathSummary};
use crate::sim::Snapshot;

/// Largest connected component of a proximity graph under one cost mode.
#[derive(Debug, Clone)]
pub struct Component {
    /// Representative root the winning traversal ran from.
    pub root: usize,
    /// Number of nodes reachable from the root, the root included.
    pub size: usize,
    /// Paths spanning the component, subset-deduplicated: a path whose node
    /// set is contained in an already-kept path's is dropped.
    pub paths: Vec<Vec<usize>>,
}

/// Finds the largest component by running the single-source engine from
/// candidate roots in index order. Every node reached from a root is marked
/// visited so later roots in the same component are skipped, and the scan
/// stops early once no remaining candidate could beat the best size.
pub fn largest_component(graph: &Graph, mode: CostMode) -> Option<Component> {
    let node_count = graph.node_count();
    let mut visited = vec![false; node_count];
    let mut best_size = 0usize;
    let mut best_root = None;

    for root in 0..node_count {
        if best_size > node_count - root {
            break;
        }
        if visited[root] {
            continue;
        }
        visited[root] = true;
        let result = path::shortest_paths(graph, root, mode);
        let mut count = 0;
        for x in 0..node_count {
            if result.is_reachable(x) {
                visited[x] = true;
                count += 1;
            }
        }
        if count > best_size {
            best_size = count;
            best_root = Some(root);
        }
    }

    let root = best_root?;
    debug!(root, size = best_size, "largest component found");

    // Re-run the winner to get the spanning path set, then dedup.
    let result = path::shortest_paths(graph, root, mode);
    let mut kept: Vec<Vec<usize>> = Vec::new();
    for candidate in result.paths() {
        if candidate.is_empty() {
            continue;
        }
        let contained = kept
            .iter()
            .any(|k| candidate.iter().all(|n| k.contains(n)));
        if !contained {
            kept.push(candidate.clone());
        }
    }

    Some(Component {
        root,
        size: best_size,
        paths: kept,
    })
}

/// Metrics for one instant, as consumed by the external report/UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkReport {
    pub time: f64,
    pub nodes: usize,
    /// Finite graph cells; twice the number of physical links.
    pub connections: usize,
    pub weighted: Option<PathSummary>,
    pub fewest_hops: Option<PathSummary>,
    pub largest_component: usize,
    pub largest_component_weighted: usize,
    /// Largest (fewest-hops) component size over total nodes, as a
    /// percentage. `None` when the node set is empty.
    pub component_percentage: Option<f64>,
}

/// Analyzes one snapshot end to end. `source`/`dest` are active-node
/// indices from a nearest-node query; when either is absent the path
/// summaries are reported as not applicable.
pub fn analyze_snapshot(
    snapshot: &Snapshot,
    source: Option<usize>,
    dest: Option<usize>,
) -> NetworkReport {
    let (weighted, fewest_hops) = match (source, dest) {
        (Some(s), Some(d)) => {
            let weighted = path::shortest_paths(&snapshot.graph, s, CostMode::Weighted);
            let fewest = path::shortest_paths(&snapshot.graph, s, CostMode::FewestHops);
            (weighted.summary(d), fewest.summary(d))
        }
        _ => (None, None),
    };

    let unweighted_size = largest_component(&snapshot.graph, CostMode::FewestHops)
        .map_or(0, |c| c.size);
    let weighted_size = largest_component(&snapshot.graph, CostMode::Weighted)
        .map_or(0, |c| c.size);

    let component_percentage = if snapshot.node_count() > 0 {
        Some(unweighted_size as f64 / snapshot.node_count() as f64 * 100.0)
    } else {
        None
    };

    NetworkReport {
        time: snapshot.time,
        nodes: snapshot.node_count(),
        connections: snapshot.graph.connections(),
        weighted,
        fewest_hops,
        largest_component: unweighted_size,
        largest_component_weighted: weighted_size,
        component_percentage,
    }
}
