// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::collections::BTreeMap;

use mindline::model::{Board, DateKey, Edge, Node, NodeId, Position};
use mindline::timeline::TimelineState;

pub const FIRST_DAY: &str = "2024-01-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeParams {
    pub nodes: usize,
    pub fanout: usize,
    pub label_len: usize,
}

impl TreeParams {
    pub const fn new(nodes: usize, fanout: usize, label_len: usize) -> Self {
        Self { nodes, fanout, label_len }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    LargeWide,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::LargeWide => "large_wide",
        }
    }

    pub const fn params(self) -> TreeParams {
        match self {
            Self::Small => TreeParams::new(50, 3, 12),
            Self::Medium => TreeParams::new(1_000, 4, 24),
            Self::LargeWide => TreeParams::new(10_000, 12, 48),
        }
    }
}

pub fn node_id(index: usize) -> NodeId {
    if index == 0 {
        return NodeId::root();
    }
    NodeId::new(format!("n{index:06}")).expect("valid node id")
}

fn label(index: usize, len: usize) -> String {
    let mut out = format!("Topic {index}");
    while out.len() < len {
        out.push('x');
    }
    out.truncate(len.max(1));
    out
}

/// Complete `fanout`-ary tree rooted at `root`; node `i` hangs under node `(i - 1) / fanout`.
pub fn tree(params: TreeParams) -> Board {
    assert!(params.nodes >= 1, "nodes must be >= 1");
    assert!(params.fanout >= 1, "fanout must be >= 1");

    let mut board = Board::fresh();
    let mut edges = Vec::with_capacity(params.nodes.saturating_sub(1));
    for index in 1..params.nodes {
        let position = Position::new((index % 97) as f64 * 40.0, (index / 97) as f64 * 40.0);
        board.push_node(Node::new(node_id(index), label(index, params.label_len), position));
        edges.push(Edge::between(node_id((index - 1) / params.fanout), node_id(index)));
    }
    board.set_edges(edges);
    board
}

pub fn date(offset: u64) -> DateKey {
    let mut key = DateKey::new(FIRST_DAY).expect("valid date");
    for _ in 0..offset {
        key = key.next_day();
    }
    key
}

/// `days` consecutive boards of the same tree; the first day is active.
pub fn timeline(case: Case, days: u64) -> TimelineState {
    let board = tree(case.params());
    let boards = (0..days.max(1))
        .map(|offset| (date(offset), board.clone()))
        .collect::<BTreeMap<_, _>>();
    TimelineState::from_boards(boards, date(0))
}

pub fn checksum_board(board: &Board) -> u64 {
    let mut acc = 0u64;
    for node in board.nodes() {
        acc = acc.wrapping_mul(131).wrapping_add(node.id().as_str().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(u64::from(node.selected()));
    }
    for edge in board.edges() {
        acc = acc.wrapping_mul(131).wrapping_add(edge.id().as_str().len() as u64);
    }
    acc
}

pub fn checksum_state(state: &TimelineState) -> u64 {
    state
        .boards()
        .values()
        .fold(state.timeline().len() as u64, |acc, board| {
            acc.wrapping_mul(131).wrapping_add(checksum_board(board))
        })
}
