use std::fmt;

use log::debug;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::{ActivationFunction, LEAKY_SLOPE};
use crate::error::{NnError, Result};
use crate::graph::{Edge, Node};

/// Half-width of the uniform range every trainable scalar is drawn from.
pub const INIT_RANGE: f64 = 0.5;

/// Role of a layer in the input → hidden* → output chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Input,
    Hidden,
    Output,
}

impl LayerKind {
    pub fn activation(&self) -> ActivationFunction {
        match self {
            LayerKind::Input => ActivationFunction::Identity,
            LayerKind::Hidden => ActivationFunction::LeakyReLU { alpha: LEAKY_SLOPE },
            LayerKind::Output => ActivationFunction::Sigmoid,
        }
    }

    /// Input nodes are pass-through and carry no bias.
    pub fn has_bias(&self) -> bool {
        !matches!(self, LayerKind::Input)
    }

    /// Output layers are terminal and never own edges.
    pub fn has_edges(&self) -> bool {
        !matches!(self, LayerKind::Output)
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerKind::Input => "input",
            LayerKind::Hidden => "hidden",
            LayerKind::Output => "output",
        };
        write!(f, "{name}")
    }
}

/// A fixed-size group of nodes plus the edges leaving it.
///
/// Edges index into this layer's node arena (`source`) and into the arena of
/// the layer attached with [`Layer::attach_layer`] (`target`). `outgoing[i]`
/// lists the indices in `edges` whose source is node `i`, so the backward pass
/// never has to scan the whole edge list. `target_count` is the size of the
/// attached layer and is 0 until [`Layer::attach_layer`] succeeds.
#[derive(Debug, Clone)]
pub struct Layer {
    kind: LayerKind,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<usize>>,
    target_count: usize,
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(kind: LayerKind, node_count: usize, rng: &mut R) -> Result<Layer> {
        if node_count == 0 {
            return Err(NnError::InvalidLayerSize { kind, size: node_count });
        }

        let nodes = if kind.has_bias() {
            let dist = Uniform::new_inclusive(-INIT_RANGE, INIT_RANGE);
            (0..node_count).map(|_| Node::new(dist.sample(rng))).collect()
        } else {
            vec![Node::default(); node_count]
        };

        Ok(Layer {
            kind,
            nodes,
            edges: Vec::new(),
            outgoing: vec![Vec::new(); node_count],
            target_count: 0,
        })
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Indices into [`Layer::edges`] of the edges leaving node `node`.
    pub fn outgoing(&self, node: usize) -> &[usize] {
        &self.outgoing[node]
    }

    /// Node count of the layer the edges were built against.
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn values(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.value).collect()
    }

    pub fn deltas(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.delta).collect()
    }

    /// Fully connects this layer to `next`, discarding any previous edges.
    ///
    /// Every weight is re-drawn, so calling this twice re-initializes the
    /// connection instead of adding to it.
    pub fn attach_layer<R: Rng + ?Sized>(&mut self, next: &Layer, rng: &mut R) -> Result<()> {
        if !self.kind.has_edges() {
            return Err(NnError::InvalidArgument(
                "an output layer cannot feed another layer".into(),
            ));
        }
        if next.nodes.is_empty() {
            return Err(NnError::InvalidArgument(
                "cannot attach to an empty layer".into(),
            ));
        }

        let targets = next.nodes.len();
        let dist = Uniform::new_inclusive(-INIT_RANGE, INIT_RANGE);

        self.edges.clear();
        self.edges.reserve(self.nodes.len() * targets);
        for (source, out) in self.outgoing.iter_mut().enumerate() {
            out.clear();
            for target in 0..targets {
                out.push(self.edges.len());
                self.edges.push(Edge::new(source, target, dist.sample(rng)));
            }
        }
        self.target_count = targets;

        debug!(
            "attached {} layer ({} nodes) to {} layer ({} nodes): {} edges",
            self.kind, self.nodes.len(), next.kind, targets, self.edges.len()
        );
        Ok(())
    }

    /// Loads raw feature values into an input layer. Nothing is written on error.
    pub fn set_input_values(&mut self, values: &[f64]) -> Result<()> {
        if self.kind != LayerKind::Input {
            return Err(NnError::InvalidArgument(format!(
                "input values can only be set on the input layer, not the {} layer",
                self.kind
            )));
        }
        if values.len() != self.nodes.len() {
            return Err(NnError::SizeMismatch {
                what: "input vector",
                got: values.len(),
                expected: self.nodes.len(),
            });
        }

        for (node, &value) in self.nodes.iter_mut().zip(values) {
            node.value = value;
        }
        Ok(())
    }

    pub fn reset_values(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
    }

    /// Applies bias and the role's activation to every node in place.
    pub fn process_nodes(&mut self) {
        let activation = self.kind.activation();
        let has_bias = self.kind.has_bias();
        for node in &mut self.nodes {
            if has_bias {
                node.add_bias();
            }
            node.activate(activation);
        }
    }

    /// Pushes this layer's values into `next` through every outgoing edge.
    ///
    /// Hidden layers activate their own nodes first. `next` accumulates, so its
    /// values must have been reset before the pass.
    pub fn forward(&mut self, next: &mut Layer) -> Result<()> {
        self.check_attached(next)?;
        if self.kind == LayerKind::Hidden {
            self.process_nodes();
        }
        for edge in &self.edges {
            next.nodes[edge.target].value += self.nodes[edge.source].value * edge.weight;
        }
        Ok(())
    }

    /// Activates a terminal layer and returns its values.
    pub fn get_output(&mut self) -> Vec<f64> {
        self.process_nodes();
        self.values()
    }

    /// Sets each node's delta from the already-final deltas of `next`.
    ///
    /// δ = (Σ w · δ_target) · f'(value); for input nodes f' is the identity's 1.
    pub fn compute_deltas(&mut self, next: &Layer) -> Result<()> {
        self.check_attached(next)?;
        let activation = self.kind.activation();
        let edges = &self.edges;
        for (node, out) in self.nodes.iter_mut().zip(&self.outgoing) {
            let sum: f64 = out
                .iter()
                .map(|&e| edges[e].weight * next.nodes[edges[e].target].delta)
                .sum();
            node.delta = sum * node.derivative(activation);
        }
        Ok(())
    }

    /// Gradient-descent step on this layer's weights and biases.
    ///
    /// `next` supplies target deltas for the edge update and is `None` only for
    /// the output layer, which owns no edges.
    pub fn apply_gradients(&mut self, next: Option<&Layer>, learning_rate: f64) -> Result<()> {
        if let Some(next) = next {
            self.check_attached(next)?;
            for edge in &mut self.edges {
                let source = self.nodes[edge.source].value;
                let target = next.nodes[edge.target].delta;
                edge.weight -= learning_rate * source * target;
            }
        }
        if self.kind.has_bias() {
            for node in &mut self.nodes {
                node.bias -= learning_rate * node.delta;
            }
        }
        Ok(())
    }

    /// Rejects a `next` layer whose size differs from the one the edges
    /// were built against, including a layer that was never attached.
    fn check_attached(&self, next: &Layer) -> Result<()> {
        if next.nodes.len() != self.target_count {
            return Err(NnError::InvalidArgument(format!(
                "{} layer is attached to {} nodes but was given a {} layer with {} nodes",
                self.kind,
                self.target_count,
                next.kind,
                next.nodes.len()
            )));
        }
        Ok(())
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }
}
