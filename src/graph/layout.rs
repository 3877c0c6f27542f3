// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic placement for newly created nodes.

use std::f64::consts::FRAC_PI_4;

use crate::model::Position;

/// Distance between a parent and each of its children.
pub const CHILD_RADIUS: f64 = 220.0;

/// Angular step between consecutive children (45°).
pub const ANGLE_STEP: f64 = FRAC_PI_4;

/// Offset between consecutive root-level nodes on the diagonal grid.
pub const ROOT_LEVEL_STEP: Position = Position { x: 160.0, y: 80.0 };

/// Computes where a new node goes.
///
/// With a parent, `sibling_index` is the parent's current number of outgoing edges and the
/// child lands on the circle of [`CHILD_RADIUS`] at `(sibling_index + 1) * 45°`: the first
/// child at 45°, the second at 90°, and so on. Without a parent, `sibling_index` is the
/// number of existing root-level nodes and the node lands on the diagonal grid, so
/// parentless nodes spread out instead of stacking on one point.
///
/// The index is not stored anywhere. It is re-derived from the live edge count on every add,
/// so deleting children and then adding more reuses angles that are already taken.
pub fn compute_child_position(parent: Option<Position>, sibling_index: usize) -> Position {
    let step = sibling_index as f64;
    match parent {
        Some(parent) => {
            let angle = (step + 1.0) * ANGLE_STEP;
            Position::new(
                parent.x + angle.cos() * CHILD_RADIUS,
                parent.y + angle.sin() * CHILD_RADIUS,
            )
        }
        None => Position::new(step * ROOT_LEVEL_STEP.x, step * ROOT_LEVEL_STEP.y),
    }
}
