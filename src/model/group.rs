// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Colour used for nodes whose group is empty.
pub const UNGROUPED_COLOR: &str = "#93c5fd";

/// Derives a stable pastel CSS colour for a group tag.
///
/// The hash walks UTF-16 code units with int32 shift semantics so a given tag maps to the
/// same hue the web front-end shows.
pub fn group_color(group: &str) -> String {
    if group.is_empty() {
        return UNGROUPED_COLOR.to_owned();
    }

    let mut hash: i64 = 0;
    for unit in group.encode_utf16() {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        hash = i64::from(unit) + (shifted - hash);
    }

    let hue = hash.abs() % 360;
    format!("hsl({hue}, 70%, 80%)")
}
