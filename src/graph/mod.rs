// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pure transformations of a single board's nodes and edges.
//!
//! Nothing here knows about dates or the timeline. Every function takes the current sequence
//! by reference and returns the next one; invalid references are skipped, never reported.

pub mod layout;
pub mod walk;

use std::collections::HashSet;

use crate::model::{Edge, EdgeId, Node, NodeId, Position, Size};

pub use layout::{compute_child_position, ANGLE_STEP, CHILD_RADIUS, ROOT_LEVEL_STEP};
pub use walk::collect_descendants;

/// A single node edit reported by the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    /// Drag update. `None` (or a non-finite coordinate) leaves the node where it is.
    Position { id: NodeId, position: Option<Position> },
    Select { id: NodeId, selected: bool },
    Remove { id: NodeId },
    Dimensions { id: NodeId, size: Option<Size> },
}

impl NodeChange {
    pub fn id(&self) -> &NodeId {
        match self {
            Self::Position { id, .. }
            | Self::Select { id, .. }
            | Self::Remove { id }
            | Self::Dimensions { id, .. } => id,
        }
    }
}

/// A single edge edit reported by the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeChange {
    Add { edge: Edge },
    Select { id: EdgeId, selected: bool },
    Remove { id: EdgeId },
}

/// A user-drawn link between two node handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub source: NodeId,
    pub target: NodeId,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

impl Connection {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target, source_handle: None, target_handle: None }
    }
}

pub fn apply_node_changes(changes: &[NodeChange], nodes: &[Node]) -> Vec<Node> {
    let mut next = nodes.to_vec();

    for change in changes {
        if let NodeChange::Remove { id } = change {
            next.retain(|node| node.id() != id);
            continue;
        }

        let Some(node) = next.iter_mut().find(|node| node.id() == change.id()) else {
            continue;
        };

        match change {
            NodeChange::Position { position, .. } => {
                if let Some(position) = position.filter(|position| position.is_finite()) {
                    node.set_position(position);
                }
            }
            NodeChange::Select { selected, .. } => node.set_selected(*selected),
            NodeChange::Dimensions { size, .. } => {
                if size.map_or(true, Size::is_finite) {
                    node.set_size(*size);
                }
            }
            NodeChange::Remove { .. } => {}
        }
    }

    next
}

pub fn apply_edge_changes(changes: &[EdgeChange], edges: &[Edge]) -> Vec<Edge> {
    let mut next = edges.to_vec();

    for change in changes {
        match change {
            EdgeChange::Add { edge } => {
                match next.iter_mut().find(|existing| existing.id() == edge.id()) {
                    Some(existing) => *existing = edge.clone(),
                    None => next.push(edge.clone()),
                }
            }
            EdgeChange::Select { id, selected } => {
                if let Some(edge) = next.iter_mut().find(|edge| edge.id() == id) {
                    edge.set_selected(*selected);
                }
            }
            EdgeChange::Remove { id } => next.retain(|edge| edge.id() != id),
        }
    }

    next
}

/// Appends an edge for `connection` with a fresh id.
///
/// Returns the edges unchanged when either endpoint is not in `nodes` or when the same
/// source→target link already exists.
pub fn connect(connection: &Connection, nodes: &[Node], edges: &[Edge]) -> Vec<Edge> {
    let node_ids = nodes.iter().map(Node::id).collect::<HashSet<_>>();
    if !node_ids.contains(&connection.source) || !node_ids.contains(&connection.target) {
        return edges.to_vec();
    }

    let exists = edges
        .iter()
        .any(|edge| edge.source() == &connection.source && edge.target() == &connection.target);
    if exists {
        return edges.to_vec();
    }

    let mut next = edges.to_vec();
    next.push(Edge::new(
        EdgeId::generate(),
        connection.source.clone(),
        connection.target.clone(),
    ));
    next
}
