// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::board::{Board, Edge, Node, Position};
use super::date::DateKey;
use super::ids::NodeId;

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn date(value: &str) -> DateKey {
    DateKey::new(value).expect("date key")
}

/// root → a → b → c, plus root → d.
pub(crate) fn chain_board() -> Board {
    let mut board = Board::fresh();
    for (id, x) in [("a", 220.0), ("b", 440.0), ("c", 660.0), ("d", -220.0)] {
        board.push_node(Node::new(nid(id), id.to_uppercase(), Position::new(x, 0.0)));
    }
    board.upsert_edge(Edge::between(NodeId::root(), nid("a")));
    board.upsert_edge(Edge::between(nid("a"), nid("b")));
    board.upsert_edge(Edge::between(nid("b"), nid("c")));
    board.upsert_edge(Edge::between(NodeId::root(), nid("d")));
    board
}

pub(crate) fn edge_pairs(board: &Board) -> Vec<(String, String)> {
    board
        .edges()
        .iter()
        .map(|edge| (edge.source().to_string(), edge.target().to_string()))
        .collect()
}

pub(crate) fn node_ids(board: &Board) -> Vec<String> {
    board.nodes().iter().map(|node| node.id().to_string()).collect()
}
