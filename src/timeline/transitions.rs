// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// User-facing transitions of a `TimelineState`.
/// Keeps `timeline::mod` focused on the state type and its invariants.
impl TimelineState {
    /// Switches the active date, creating an empty board for a date seen for the first time.
    pub fn set_active_date(&mut self, date: DateKey) -> bool {
        self.ensure_board(&date);
        if self.active_date != date {
            debug!(date = %date, "active date changed");
            self.active_date = date;
        }
        true
    }

    /// Adds `date` (or the day after the latest timeline date) and makes it active.
    pub fn add_timeline_date(&mut self, date: Option<DateKey>) -> DateKey {
        let date = date.unwrap_or_else(|| {
            self.timeline
                .last()
                .map_or_else(DateKey::today, DateKey::next_day)
        });
        self.set_active_date(date.clone());
        date
    }

    /// Adds a node to the active board and selects it.
    ///
    /// The parent is `parent_id` when that node exists, nothing when `parent_id` names an
    /// unknown node, and the current selection when `parent_id` is `None`. A new child
    /// inherits its parent's group.
    pub fn add_node(
        &mut self,
        label: &str,
        parent_id: Option<&NodeId>,
        position: Option<Position>,
    ) -> NodeId {
        let board = self.active_board_mut();
        let parent_id = match parent_id {
            Some(parent_id) => board.node(parent_id),
            None => board.selected_node(),
        }
        .map(|node| node.id().clone());
        self.insert_node(label, parent_id, position)
    }

    /// Adds an unconnected placeholder node at `position` and selects it.
    pub fn add_node_at(&mut self, position: Position) -> NodeId {
        self.insert_node(PLACEHOLDER_LABEL, None, Some(position))
    }

    /// Adds a placeholder child under `parent_id`; `None` when the parent is not on the board.
    pub fn add_child_node(&mut self, parent_id: &NodeId) -> Option<NodeId> {
        if !self.active_board()?.contains_node(parent_id) {
            return None;
        }
        Some(self.add_node(PLACEHOLDER_LABEL, Some(parent_id), None))
    }

    pub fn select_node(&mut self, node_id: Option<&NodeId>) -> bool {
        let board = self.active_board_mut();
        if let Some(node_id) = node_id {
            if !board.contains_node(node_id) {
                return false;
            }
        }
        board.select_only(node_id);
        true
    }

    pub fn update_node_label(&mut self, node_id: &NodeId, label: &str) -> bool {
        self.update_node(node_id, |node| node.set_label(label))
    }

    pub fn update_node_group(&mut self, node_id: &NodeId, group: &str) -> bool {
        self.update_node(node_id, |node| node.set_group(group))
    }

    pub fn toggle_node_completed(&mut self, node_id: &NodeId, completed: bool) -> bool {
        self.update_node(node_id, |node| node.set_completed(completed))
    }

    /// Removes a node together with its descendants and every edge touching them.
    ///
    /// The selection moves to the first remaining node. The root cannot be removed.
    pub fn remove_node(&mut self, node_id: &NodeId) -> bool {
        if node_id.is_root() {
            return false;
        }
        let board = self.active_board_mut();
        if !board.contains_node(node_id) {
            return false;
        }

        let mut doomed = collect_descendants(node_id, board.edges());
        doomed.insert(node_id.clone());

        let nodes = board
            .nodes()
            .iter()
            .filter(|node| !doomed.contains(node.id()))
            .cloned()
            .collect();
        let edges = board
            .edges()
            .iter()
            .filter(|edge| !doomed.contains(edge.source()) && !doomed.contains(edge.target()))
            .cloned()
            .collect();
        board.set_nodes(nodes);
        board.set_edges(edges);
        board.select_first();

        debug!(
            date = %self.active_date,
            node_id = %node_id,
            removed = doomed.len(),
            "node removed"
        );
        true
    }

    /// Moves a node and its descendants from the active board to `target`.
    ///
    /// Edges inside the moved subtree travel with it; edges crossing the cut are dropped.
    /// Every moved node without a moved parent is attached to the target's root. The move is
    /// rejected when `target` is the active date, when `node_id` is the root or unknown, and
    /// when any moved id already exists on the target board. The active date stays put.
    pub fn move_node_to_date(&mut self, node_id: &NodeId, target: &DateKey) -> bool {
        if target == &self.active_date || node_id.is_root() {
            return false;
        }
        let Some(source) = self.boards.get(&self.active_date) else {
            return false;
        };
        if !source.contains_node(node_id) {
            return false;
        }

        let mut moving = collect_descendants(node_id, source.edges());
        moving.insert(node_id.clone());

        if let Some(existing) = self.boards.get(target) {
            if existing.nodes().iter().any(|node| moving.contains(node.id())) {
                return false;
            }
        }

        let (moved_nodes, kept_nodes): (Vec<Node>, Vec<Node>) = source
            .nodes()
            .iter()
            .cloned()
            .partition(|node| moving.contains(node.id()));
        let moved_edges = source
            .edges()
            .iter()
            .filter(|edge| moving.contains(edge.source()) && moving.contains(edge.target()))
            .cloned()
            .collect::<Vec<_>>();
        let kept_edges = source
            .edges()
            .iter()
            .filter(|edge| !moving.contains(edge.source()) && !moving.contains(edge.target()))
            .cloned()
            .collect::<Vec<_>>();

        let source = self.active_board_mut();
        source.set_nodes(kept_nodes);
        source.set_edges(kept_edges);
        source.select_first();

        let moved_targets = moved_edges.iter().map(Edge::target).cloned().collect::<HashSet<_>>();
        let top_level = moved_nodes
            .iter()
            .map(|node| node.id().clone())
            .filter(|id| !moved_targets.contains(id))
            .collect::<Vec<_>>();
        let first_moved = moved_nodes.first().map(|node| node.id().clone());

        let board = self.ensure_board(target);
        for node in moved_nodes {
            board.push_node(node);
        }
        for edge in moved_edges {
            board.upsert_edge(edge);
        }
        let root = NodeId::root();
        if board.contains_node(&root) {
            for id in top_level {
                board.upsert_edge(Edge::between(root.clone(), id));
            }
        }
        let selection = board.selected_node().map(|node| node.id().clone()).or(first_moved);
        board.select_only(selection.as_ref());

        debug!(
            from = %self.active_date,
            to = %target,
            node_id = %node_id,
            moved = moving.len(),
            "subtree moved"
        );
        true
    }

    /// Replaces the active board with a fresh one.
    pub fn reset(&mut self) -> bool {
        *self.active_board_mut() = Board::fresh();
        debug!(date = %self.active_date, "board reset");
        true
    }

    /// Applies a canvas node batch. Removal of the root is filtered out, edges left dangling
    /// are pruned, and the selection is normalized to a single node.
    ///
    /// Only nodes the batch itself marks selected can become the selection; without such a
    /// mark the current selection stays unless the batch deselects or removes it. A batch
    /// that leaves the board as it was is rejected.
    pub fn on_nodes_change(&mut self, changes: &[NodeChange]) -> bool {
        let changes = changes
            .iter()
            .filter(|change| !matches!(change, NodeChange::Remove { id } if id.is_root()))
            .cloned()
            .collect::<Vec<_>>();
        if changes.is_empty() {
            return false;
        }

        let mut marks = HashMap::new();
        for change in &changes {
            if let NodeChange::Select { id, selected } = change {
                marks.insert(id, *selected);
            }
        }

        let board = self.active_board_mut();
        let before = board.clone();
        let nodes = apply_node_changes(&changes, board.nodes());
        board.set_nodes(nodes);
        let pruned = board.prune_dangling_edges();

        let marked = board
            .nodes()
            .iter()
            .map(Node::id)
            .find(|id| marks.get(id) == Some(&true))
            .cloned();
        let selection = marked.or_else(|| match before.selected_node_id() {
            Some(current) if marks.get(current) == Some(&false) => None,
            Some(current) if board.contains_node(current) => Some(current.clone()),
            Some(_) => board.nodes().first().map(|node| node.id().clone()),
            None => None,
        });
        board.select_only(selection.as_ref());

        if *board == before {
            return false;
        }
        if pruned > 0 {
            debug!(date = %self.active_date, pruned, "dangling edges pruned");
        }
        true
    }

    pub fn on_edges_change(&mut self, changes: &[EdgeChange]) -> bool {
        if changes.is_empty() {
            return false;
        }
        let board = self.active_board_mut();
        let edges = apply_edge_changes(changes, board.edges());
        board.set_edges(edges);
        board.prune_dangling_edges();
        true
    }

    pub fn on_connect(&mut self, connection: &Connection) -> bool {
        let board = self.active_board_mut();
        let edges = connect(connection, board.nodes(), board.edges());
        if edges.len() == board.edges().len() {
            return false;
        }
        board.set_edges(edges);
        debug!(
            date = %self.active_date,
            source = %connection.source,
            target = %connection.target,
            "nodes connected"
        );
        true
    }

    fn insert_node(
        &mut self,
        label: &str,
        parent_id: Option<NodeId>,
        position: Option<Position>,
    ) -> NodeId {
        let board = self.active_board_mut();
        let parent = parent_id
            .as_ref()
            .and_then(|parent_id| board.node(parent_id))
            .map(|node| (node.id().clone(), node.position(), node.group().to_owned()));

        let position = position.filter(|position| position.is_finite());
        let position = position.unwrap_or_else(|| match &parent {
            Some((parent_id, parent_position, _)) => {
                compute_child_position(Some(*parent_position), board.child_count(parent_id))
            }
            None => compute_child_position(None, board.root_level_count()),
        });

        let node_id = NodeId::generate();
        let mut node = Node::new(node_id.clone(), label, position);
        if let Some((_, _, group)) = &parent {
            node.set_group(group.as_str());
        }
        board.push_node(node);

        if let Some((parent_id, _, _)) = parent {
            board.upsert_edge(Edge::between(parent_id, node_id.clone()));
        }
        board.select_only(Some(&node_id));

        debug!(date = %self.active_date, node_id = %node_id, "node added");
        node_id
    }

    fn update_node(&mut self, node_id: &NodeId, update: impl FnOnce(&mut Node)) -> bool {
        let Some(node) = self.active_board_mut().node_mut(node_id) else {
            return false;
        };
        update(node);
        debug!(date = %self.active_date, node_id = %node_id, "node updated");
        true
    }
}
