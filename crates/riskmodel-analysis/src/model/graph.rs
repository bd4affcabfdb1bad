//! Model graph and its builder.
//!
//! Nodes are appended in registration order and may only reference nodes
//! registered before them, so the node list is already a topological order.

use tracing::debug;

use riskmodel_core::errors::ModelError;
use riskmodel_core::types::collections::FxHashMap;

/// Handle to a registered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node computes.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Random variable `Beta(alpha, beta)` on [0, 1].
    Beta { alpha: f64, beta: f64 },
    /// `scale * source + offset`.
    Affine {
        source: NodeId,
        scale: f64,
        offset: f64,
    },
    /// `Σ weight * term`.
    WeightedSum { terms: Vec<(f64, NodeId)> },
}

impl NodeKind {
    /// True for nodes an engine must draw; the rest are computed.
    pub fn is_random(&self) -> bool {
        matches!(self, Self::Beta { .. })
    }

    fn dependencies(&self) -> Vec<NodeId> {
        match self {
            Self::Beta { .. } => Vec::new(),
            Self::Affine { source, .. } => vec![*source],
            Self::WeightedSum { terms } => terms.iter().map(|(_, id)| *id).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
}

/// Explicit registration context. Passed by `&mut` to everything that adds
/// nodes, then frozen into a `ModelGraph` by `build()`.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    nodes: Vec<Node>,
    index: FxHashMap<String, NodeId>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a `Beta(alpha, beta)` random node.
    pub fn beta(
        &mut self,
        name: impl Into<String>,
        alpha: f64,
        beta: f64,
    ) -> Result<NodeId, ModelError> {
        self.register(name.into(), NodeKind::Beta { alpha, beta })
    }

    /// Register `scale * source + offset`.
    pub fn affine(
        &mut self,
        name: impl Into<String>,
        source: NodeId,
        scale: f64,
        offset: f64,
    ) -> Result<NodeId, ModelError> {
        self.register(
            name.into(),
            NodeKind::Affine {
                source,
                scale,
                offset,
            },
        )
    }

    /// Register `Σ weight * term`. An empty sum is the constant 0.
    pub fn weighted_sum(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(f64, NodeId)>,
    ) -> Result<NodeId, ModelError> {
        self.register(name.into(), NodeKind::WeightedSum { terms })
    }

    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn build(self) -> ModelGraph {
        ModelGraph {
            nodes: self.nodes,
            index: self.index,
        }
    }

    fn register(&mut self, name: String, kind: NodeKind) -> Result<NodeId, ModelError> {
        if self.index.contains_key(&name) {
            return Err(ModelError::DuplicateNode { name });
        }
        if let Some(unknown) = kind
            .dependencies()
            .into_iter()
            .find(|dep| dep.0 >= self.nodes.len())
        {
            return Err(ModelError::UnknownNode { id: unknown.0 });
        }
        let id = NodeId(self.nodes.len());
        debug!(node = %name, id = id.0, random = kind.is_random(), "model node registered");
        self.index.insert(name.clone(), id);
        self.nodes.push(Node { name, kind });
        Ok(id)
    }
}

/// Frozen model handed to an inference engine.
#[derive(Debug, Clone)]
pub struct ModelGraph {
    nodes: Vec<Node>,
    index: FxHashMap<String, NodeId>,
}

impl ModelGraph {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }

    /// Random nodes in registration order.
    pub fn random_nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind.is_random())
            .map(|(i, n)| (NodeId(i), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Value of every node, in node order, for one joint draw.
    ///
    /// `draw` is called once per random node, in registration order, and
    /// returns its value; deterministic nodes are computed from earlier
    /// values.
    pub fn evaluate<F>(&self, mut draw: F) -> Vec<f64>
    where
        F: FnMut(NodeId, &Node) -> f64,
    {
        let mut values = Vec::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            let value = match &node.kind {
                NodeKind::Beta { .. } => draw(NodeId(i), node),
                NodeKind::Affine {
                    source,
                    scale,
                    offset,
                } => scale * values[source.0] + offset,
                NodeKind::WeightedSum { terms } => {
                    terms.iter().map(|(w, id)| w * values[id.0]).sum()
                }
            };
            values.push(value);
        }
        values
    }
}
