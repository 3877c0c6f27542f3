// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The surface shared with the canvas and the sidebar.
//!
//! Inbound, every user gesture arrives as a [`UiEvent`]. Outbound, a [`BoardView`] carries
//! what the active board should look like.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::graph::{Connection, EdgeChange, NodeChange};
use crate::model::{group_color, DateKey, Edge, Node, NodeId, Position};
use crate::timeline::TimelineState;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    NodesChanged(Vec<NodeChange>),
    EdgesChanged(Vec<EdgeChange>),
    Connected(Connection),
    PaneDoubleClicked { position: Position },
    /// The canvas selection; the first id wins, an empty list clears.
    SelectionChanged { node_ids: Vec<NodeId> },
    /// Adds a placeholder child under the selected node.
    CreateChildKey,
    AddNode { label: String, parent_id: Option<NodeId>, position: Option<Position> },
    AddChildNode { parent_id: NodeId },
    RenameNode { node_id: NodeId, label: String },
    SetNodeGroup { node_id: NodeId, group: String },
    SetNodeCompleted { node_id: NodeId, completed: bool },
    RemoveNode { node_id: NodeId },
    MoveNodeToDate { node_id: NodeId, date: DateKey },
    SetActiveDate { date: DateKey },
    AddTimelineDate { date: Option<DateKey> },
    Reset,
}

impl UiEvent {
    /// Applies the event to `state`; `false` when the state rejected it.
    pub(crate) fn apply(self, state: &mut TimelineState) -> bool {
        match self {
            Self::NodesChanged(changes) => state.on_nodes_change(&changes),
            Self::EdgesChanged(changes) => state.on_edges_change(&changes),
            Self::Connected(connection) => state.on_connect(&connection),
            Self::PaneDoubleClicked { position } => {
                state.add_node_at(position);
                true
            }
            Self::SelectionChanged { node_ids } => state.select_node(node_ids.first()),
            Self::CreateChildKey => {
                let parent_id = state
                    .active_board()
                    .and_then(|board| board.selected_node_id())
                    .cloned();
                let Some(parent_id) = parent_id else {
                    return false;
                };
                state.add_child_node(&parent_id).is_some()
            }
            Self::AddNode { label, parent_id, position } => {
                state.add_node(&label, parent_id.as_ref(), position);
                true
            }
            Self::AddChildNode { parent_id } => state.add_child_node(&parent_id).is_some(),
            Self::RenameNode { node_id, label } => state.update_node_label(&node_id, &label),
            Self::SetNodeGroup { node_id, group } => state.update_node_group(&node_id, &group),
            Self::SetNodeCompleted { node_id, completed } => {
                state.toggle_node_completed(&node_id, completed)
            }
            Self::RemoveNode { node_id } => state.remove_node(&node_id),
            Self::MoveNodeToDate { node_id, date } => state.move_node_to_date(&node_id, &date),
            Self::SetActiveDate { date } => state.set_active_date(date),
            Self::AddTimelineDate { date } => {
                state.add_timeline_date(date);
                true
            }
            Self::Reset => state.reset(),
        }
    }
}

/// A node as the canvas draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub node: Node,
    pub color: String,
}

/// What the active board should look like.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub active_date: DateKey,
    pub timeline: Vec<DateKey>,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<Edge>,
    pub selected_node_id: Option<NodeId>,
    pub completed_count: usize,
}

impl BoardView {
    pub fn from_state(state: &TimelineState) -> Self {
        let board = state.active_board();
        Self {
            active_date: state.active_date().clone(),
            timeline: state.timeline().iter().cloned().collect(),
            nodes: board
                .map(|board| {
                    board
                        .nodes()
                        .iter()
                        .map(|node| NodeView {
                            node: node.clone(),
                            color: group_color(node.group()),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            edges: board.map(|board| board.edges().to_vec()).unwrap_or_default(),
            selected_node_id: board.and_then(|board| board.selected_node_id()).cloned(),
            completed_count: state.completed_count(),
        }
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&NodeView> {
        self.nodes.iter().find(|view| view.node.id() == node_id)
    }

    /// Plain-text outline of the board: one line per node, children indented under their
    /// parent, `*` marking the selection. Nodes reachable only through a cycle are listed
    /// after the trees.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}  ({} nodes, {} completed)",
            self.active_date,
            self.nodes.len(),
            self.completed_count
        );

        let targets = self.edges.iter().map(Edge::target).collect::<HashSet<_>>();
        let mut visited = HashSet::new();
        let tops = self
            .nodes
            .iter()
            .map(|view| view.node.id())
            .filter(|id| !targets.contains(id));
        for id in tops.chain(self.nodes.iter().map(|view| view.node.id())) {
            self.write_subtree(id, &mut visited, &mut out);
        }
        out
    }

    fn write_subtree<'a>(
        &'a self,
        start: &'a NodeId,
        visited: &mut HashSet<&'a NodeId>,
        out: &mut String,
    ) {
        let mut stack = vec![(start, 0_usize)];
        while let Some((node_id, depth)) = stack.pop() {
            if !visited.insert(node_id) {
                continue;
            }
            let Some(view) = self.node(node_id) else {
                continue;
            };

            let marker = if self.selected_node_id.as_ref() == Some(node_id) { '*' } else { '-' };
            let done = if view.node.completed() { "[x] " } else { "" };
            let _ = write!(
                out,
                "{}{marker} {done}{}  ({node_id})",
                "  ".repeat(depth),
                view.node.label()
            );
            if !view.node.group().is_empty() {
                let _ = write!(out, "  #{}", view.node.group());
            }
            out.push('\n');

            let children = self
                .edges
                .iter()
                .filter(|edge| edge.source() == node_id)
                .map(Edge::target)
                .collect::<Vec<_>>();
            for child in children.into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BoardView;
    use crate::model::fixtures::{chain_board, date, nid};
    use crate::model::{Edge, NodeId};
    use crate::timeline::TimelineState;

    fn chained() -> TimelineState {
        let mut boards = std::collections::BTreeMap::new();
        boards.insert(date("2024-01-01"), chain_board());
        TimelineState::from_boards(boards, date("2024-01-01"))
    }

    #[test]
    fn outline_indents_children_and_marks_state() {
        let mut state = chained();
        state.toggle_node_completed(&nid("b"), true);
        state.update_node_group(&nid("d"), "later");

        let outline = BoardView::from_state(&state).outline();

        assert_eq!(
            outline,
            "2024-01-01  (5 nodes, 1 completed)\n\
             * Central topic  (root)\n\
             \x20 - A  (a)\n\
             \x20   - [x] B  (b)\n\
             \x20     - C  (c)\n\
             \x20 - D  (d)  #later\n"
        );
    }

    #[test]
    fn outline_lists_cycle_only_nodes_once() {
        let mut state = chained();
        state.on_edges_change(&[crate::graph::EdgeChange::Add {
            edge: Edge::between(nid("c"), nid("a")),
        }]);
        state.on_edges_change(&[crate::graph::EdgeChange::Remove {
            id: crate::model::EdgeId::between(&NodeId::root(), &nid("a")),
        }]);

        let outline = BoardView::from_state(&state).outline();

        for label in ["A  (a)", "B  (b)", "C  (c)"] {
            assert_eq!(outline.matches(label).count(), 1, "{outline}");
        }
    }
}
