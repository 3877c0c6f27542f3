// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mindline: a timeline of dated mind-map boards.
//!
//! [`model`] holds the data, [`graph`] the pure canvas operations, [`timeline`] the state
//! transitions, and [`store`] the JSON document on disk. A host drives everything through
//! [`workspace::Workspace`] with [`ui::UiEvent`]s.

pub mod graph;
pub mod model;
pub mod store;
pub mod timeline;
pub mod ui;
pub mod workspace;
