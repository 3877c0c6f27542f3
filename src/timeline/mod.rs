// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dated boards along a timeline.
//!
//! [`TimelineState`] owns one [`Board`] per date and applies every user-facing transition to
//! the active one. Transitions never fail: they report `false` (or `None`) for rejected input
//! and leave the state untouched.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::graph::{
    apply_edge_changes, apply_node_changes, collect_descendants, compute_child_position, connect,
    Connection, EdgeChange, NodeChange,
};
use crate::model::{Board, DateKey, Edge, EdgeId, Node, NodeId, Position, PLACEHOLDER_LABEL};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("board {date} is not on the timeline")]
    BoardOffTimeline { date: DateKey },
    #[error("timeline date {date} has no board")]
    TimelineDateWithoutBoard { date: DateKey },
    #[error("active date {date} has no board")]
    ActiveDateMissing { date: DateKey },
    #[error("board {date} holds node {node_id} more than once")]
    DuplicateNode { date: DateKey, node_id: NodeId },
    #[error("edge {edge_id} on board {date} references a missing node")]
    DanglingEdge { date: DateKey, edge_id: EdgeId },
    #[error("board {date} selects missing node {node_id}")]
    DanglingSelection { date: DateKey, node_id: NodeId },
    #[error("node {node_id} on board {date} has a selection flag out of sync")]
    SelectionFlagMismatch { date: DateKey, node_id: NodeId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineState {
    boards: BTreeMap<DateKey, Board>,
    timeline: BTreeSet<DateKey>,
    active_date: DateKey,
}

impl TimelineState {
    /// A timeline with a single fresh board at `active_date`.
    pub fn new(active_date: DateKey) -> Self {
        Self::from_boards(BTreeMap::new(), active_date)
    }

    /// A timeline with a single fresh board keyed by the local calendar date.
    pub fn today() -> Self {
        Self::new(DateKey::today())
    }

    /// Assembles a state from loaded boards. The timeline is the board key set; a missing
    /// board for `active_date` is created fresh.
    pub fn from_boards(mut boards: BTreeMap<DateKey, Board>, active_date: DateKey) -> Self {
        boards.entry(active_date.clone()).or_insert_with(Board::fresh);
        let timeline = boards.keys().cloned().collect();
        Self { boards, timeline, active_date }
    }

    pub fn active_date(&self) -> &DateKey {
        &self.active_date
    }

    pub fn timeline(&self) -> &BTreeSet<DateKey> {
        &self.timeline
    }

    pub fn boards(&self) -> &BTreeMap<DateKey, Board> {
        &self.boards
    }

    pub fn board(&self, date: &DateKey) -> Option<&Board> {
        self.boards.get(date)
    }

    pub fn active_board(&self) -> Option<&Board> {
        self.boards.get(&self.active_date)
    }

    /// Number of completed nodes on the active board.
    pub fn completed_count(&self) -> usize {
        self.active_board().map_or(0, Board::completed_count)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for date in self.boards.keys() {
            if !self.timeline.contains(date) {
                return Err(InvariantViolation::BoardOffTimeline { date: date.clone() });
            }
        }
        for date in &self.timeline {
            if !self.boards.contains_key(date) {
                return Err(InvariantViolation::TimelineDateWithoutBoard { date: date.clone() });
            }
        }
        if !self.boards.contains_key(&self.active_date) {
            return Err(InvariantViolation::ActiveDateMissing { date: self.active_date.clone() });
        }

        for (date, board) in &self.boards {
            check_board(date, board)?;
        }
        Ok(())
    }

    fn active_board_mut(&mut self) -> &mut Board {
        self.boards.entry(self.active_date.clone()).or_insert_with(Board::fresh)
    }

    fn ensure_board(&mut self, date: &DateKey) -> &mut Board {
        self.timeline.insert(date.clone());
        self.boards.entry(date.clone()).or_insert_with(Board::fresh)
    }
}

fn check_board(date: &DateKey, board: &Board) -> Result<(), InvariantViolation> {
    let mut node_ids = HashSet::new();
    for node in board.nodes() {
        if !node_ids.insert(node.id()) {
            return Err(InvariantViolation::DuplicateNode {
                date: date.clone(),
                node_id: node.id().clone(),
            });
        }
    }

    if let Some(edge) = board.dangling_edges().next() {
        return Err(InvariantViolation::DanglingEdge {
            date: date.clone(),
            edge_id: edge.id().clone(),
        });
    }

    let selected = board.selected_node_id();
    if let Some(node_id) = selected {
        if !node_ids.contains(node_id) {
            return Err(InvariantViolation::DanglingSelection {
                date: date.clone(),
                node_id: node_id.clone(),
            });
        }
    }
    for node in board.nodes() {
        if node.selected() != (selected == Some(node.id())) {
            return Err(InvariantViolation::SelectionFlagMismatch {
                date: date.clone(),
                node_id: node.id().clone(),
            });
        }
    }
    Ok(())
}

include!("transitions.rs");
