use serde::{Serialize, Deserialize};

/// Weighted connection between two nodes of adjacent layers.
///
/// The endpoints are indices into the node arenas of the producing layer
/// (`source`) and of the layer it feeds (`target`); the edge owns neither.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

impl Edge {
    pub fn new(source: usize, target: usize, weight: f64) -> Edge {
        Edge { source, target, weight }
    }
}
