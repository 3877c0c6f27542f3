// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeSet, HashMap};

use crate::model::{Edge, NodeId};

/// Returns every node reachable from `node_id` by following edges source→target.
///
/// The walk uses an explicit stack and a visited set, so deep chains do not grow the call
/// stack and cycles terminate. `node_id` itself is never part of the result, even when a
/// cycle leads back to it.
pub fn collect_descendants(node_id: &NodeId, edges: &[Edge]) -> BTreeSet<NodeId> {
    let mut children = HashMap::<&NodeId, Vec<&NodeId>>::new();
    for edge in edges {
        children.entry(edge.source()).or_default().push(edge.target());
    }

    let mut descendants = BTreeSet::new();
    let mut stack = vec![node_id];
    while let Some(current) = stack.pop() {
        let Some(targets) = children.get(current) else {
            continue;
        };
        for &target in targets {
            if target == node_id || descendants.contains(target) {
                continue;
            }
            descendants.insert(target.clone());
            stack.push(target);
        }
    }

    descendants
}
