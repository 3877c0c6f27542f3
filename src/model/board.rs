// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use super::ids::{EdgeId, NodeId};

/// Label shown for nodes created without one (or renamed to blank).
pub const PLACEHOLDER_LABEL: &str = "New node";

/// Label of the root node seeded into every fresh board.
pub const ROOT_LABEL: &str = "Central topic";

/// A point in board space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `false` for NaN or infinite coordinates, which JSON cannot carry.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Measured node dimensions as reported by the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    label: String,
    completed: bool,
    group: String,
    position: Position,
    selected: bool,
    size: Option<Size>,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            label: normalize_label(label.into()),
            completed: false,
            group: String::new(),
            position,
            selected: false,
            size: None,
        }
    }

    pub fn root() -> Self {
        Self::new(NodeId::root(), ROOT_LABEL, Position::ORIGIN)
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.set_group(group);
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// Sets the label; a blank label falls back to [`PLACEHOLDER_LABEL`].
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = normalize_label(label.into());
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub fn set_group(&mut self, group: impl Into<String>) {
        let group = group.into();
        self.group = group.trim().to_owned();
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn set_size(&mut self, size: Option<Size>) {
        self.size = size;
    }
}

fn normalize_label(label: String) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return PLACEHOLDER_LABEL.to_owned();
    }
    if trimmed.len() == label.len() {
        return label;
    }
    trimmed.to_owned()
}

/// A directed parent→child link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    selected: bool,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self { id, source, target, selected: false }
    }

    /// A layout edge with the deterministic `source-target` id.
    pub fn between(source: NodeId, target: NodeId) -> Self {
        Self::new(EdgeId::between(&source, &target), source, target)
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }
}

/// The node/edge graph of one timeline date.
///
/// Insertion order of nodes and edges is preserved and is the only ordering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Board {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    selected_node_id: Option<NodeId>,
}

impl Board {
    /// Assembles a board from loaded parts. Use [`Board::fresh`] for a newly referenced date.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>, selected_node_id: Option<NodeId>) -> Self {
        Self { nodes, edges, selected_node_id }
    }

    /// The floor state of a date: the root node alone, selected.
    pub fn fresh() -> Self {
        let mut board = Self { nodes: vec![Node::root()], ..Self::default() };
        board.select_only(Some(&NodeId::root()));
        board
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn selected_node_id(&self) -> Option<&NodeId> {
        self.selected_node_id.as_ref()
    }

    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
    }

    pub fn set_edges(&mut self, edges: Vec<Edge>) {
        self.edges = edges;
    }

    pub fn push_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == node_id)
    }

    pub fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id() == node_id)
    }

    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.node(node_id).is_some()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected_node_id.as_ref().and_then(|id| self.node(id))
    }

    /// Inserts an edge, replacing an existing edge with the same id in place.
    pub fn upsert_edge(&mut self, edge: Edge) {
        match self.edges.iter_mut().find(|existing| existing.id() == edge.id()) {
            Some(existing) => *existing = edge,
            None => self.edges.push(edge),
        }
    }

    /// Makes `node_id` the sole selection (or clears it), keeping the per-node flags in sync.
    ///
    /// An id that is not on the board clears the selection.
    pub fn select_only(&mut self, node_id: Option<&NodeId>) {
        let node_id = node_id.filter(|id| self.contains_node(id)).cloned();
        for node in &mut self.nodes {
            node.set_selected(node_id.as_ref() == Some(node.id()));
        }
        self.selected_node_id = node_id;
    }

    /// Moves the selection to the first node in sequence order, or clears it.
    pub fn select_first(&mut self) {
        let first = self.nodes.first().map(|node| node.id().clone());
        self.select_only(first.as_ref());
    }

    /// Drops every edge whose source or target is not a node of this board.
    pub fn prune_dangling_edges(&mut self) -> usize {
        let node_ids = self.node_ids();
        let before = self.edges.len();
        self.edges
            .retain(|edge| node_ids.contains(edge.source()) && node_ids.contains(edge.target()));
        before - self.edges.len()
    }

    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        let node_ids = self.node_ids();
        self.edges.iter().filter(move |edge| {
            !node_ids.contains(edge.source()) || !node_ids.contains(edge.target())
        })
    }

    /// Number of outgoing edges of `parent_id`.
    pub fn child_count(&self, parent_id: &NodeId) -> usize {
        self.edges.iter().filter(|edge| edge.source() == parent_id).count()
    }

    /// Number of nodes that are not the target of any edge.
    pub fn root_level_count(&self) -> usize {
        let targets = self.edges.iter().map(Edge::target).collect::<HashSet<_>>();
        self.nodes.iter().filter(|node| !targets.contains(node.id())).count()
    }

    pub fn completed_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.completed()).count()
    }

    fn node_ids(&self) -> HashSet<NodeId> {
        self.nodes.iter().map(|node| node.id().clone()).collect()
    }
}
