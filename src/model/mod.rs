// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A timeline holds one board per date; a board holds nodes and the parent→child edges
//! between them.

pub mod board;
pub mod date;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod group;
pub mod ids;

pub use board::{Board, Edge, Node, Position, Size, PLACEHOLDER_LABEL, ROOT_LABEL};
pub use date::{DateKey, DateKeyError};
pub use group::{group_color, UNGROUPED_COLOR};
pub use ids::{EdgeId, Id, IdError, NodeId, ROOT_NODE_ID};
