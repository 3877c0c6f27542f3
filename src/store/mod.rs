// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for the timeline on disk.
//!
//! The whole timeline lives in one JSON document. [`StateFile`] reads and writes it
//! atomically; [`SnapshotWriter`] does the writing off the editing path.

pub mod state_file;
pub mod writer;

pub use state_file::{state_schema, StateFile, StoreError, WriteDurability};
pub use writer::SnapshotWriter;
