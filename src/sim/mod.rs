use crate::geo::{self, LatLon};
use crate::graph::Graph;
use crate::io::Flight;

/// A flight projected onto one time instant. The node's position in the
/// active-node vector (not `flight_index`) is the identity the graph and
/// path algorithms use, and is only meaningful for that instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub flight_index: usize,
    pub position: LatLon,
}

/// Active node set at `time`: every flight airborne at that instant, in
/// catalog order, at its interpolated great-circle position.
pub fn project_nodes(flights: &[Flight], time: f64) -> Vec<Node> {
    flights
        .iter()
        .enumerate()
        .filter(|(_, f)| f.airborne_at(time))
        .map(|(i, f)| Node {
            flight_index: i,
            position: geo::interpolate_great_circle(f.start(), f.end(), f.time_fraction(time)),
        })
        .collect()
}

/// Everything the analysis needs for one instant. Built from scratch each
/// time-step and fully superseded by the next; nothing here survives a
/// change of `time`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub time: f64,
    pub nodes: Vec<Node>,
    pub graph: Graph,
}

impl Snapshot {
    pub fn at(flights: &[Flight], time: f64, comms_radius_m: f64) -> Self {
        let nodes = project_nodes(flights, time);
        let graph = Graph::build(&nodes, comms_radius_m);
        Self { time, nodes, graph }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Index of the node closest to `query`, if any lies strictly within
    /// `max_radius_m`.
    pub fn nearest_node(&self, query: LatLon, max_radius_m: f64) -> Option<usize> {
        let mut min = max_radius_m;
        let mut nearest = None;
        for (i, node) in self.nodes.iter().enumerate() {
            let dist = geo::air_distance(node.position, query);
            if dist < min {
                min = dist;
                nearest = Some(i);
            }
        }
        nearest
    }
}
