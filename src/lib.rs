pub mod geo;
pub mod io;
pub mod sim;
pub mod graph;
pub mod path;
pub mod network;
pub mod coverage;
pub mod trials;
