// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The state container a host application owns.

use std::sync::Arc;

use tracing::trace;

use crate::store::{SnapshotWriter, StateFile, StoreError};
use crate::timeline::TimelineState;
use crate::ui::{BoardView, UiEvent};

#[derive(Debug)]
struct Persistence {
    file: StateFile,
    writer: SnapshotWriter,
}

/// Applies [`UiEvent`]s as atomic transitions and publishes each result as an immutable
/// snapshot.
///
/// Readers hold an `Arc<TimelineState>` from [`Workspace::snapshot`]; a transition never
/// mutates a published snapshot, it swaps in a new one.
#[derive(Debug)]
pub struct Workspace {
    state: Arc<TimelineState>,
    rev: u64,
    persistence: Option<Persistence>,
}

impl Workspace {
    /// An in-memory workspace; nothing is saved.
    pub fn new(state: TimelineState) -> Self {
        Self { state: Arc::new(state), rev: 0, persistence: None }
    }

    /// Loads `file` (or starts fresh) and saves every accepted transition back to it.
    pub fn open(file: StateFile) -> Result<Self, StoreError> {
        let state = file.load_or_default();
        let writer = SnapshotWriter::spawn()
            .map_err(|source| StoreError::Io { path: file.path().to_path_buf(), source })?;

        Ok(Self {
            state: Arc::new(state),
            rev: 0,
            persistence: Some(Persistence { file, writer }),
        })
    }

    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    pub fn snapshot(&self) -> Arc<TimelineState> {
        Arc::clone(&self.state)
    }

    /// Number of accepted transitions since the workspace was created.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn view(&self) -> BoardView {
        BoardView::from_state(&self.state)
    }

    /// Applies `event`. Returns `false` and publishes nothing when the event was rejected.
    pub fn dispatch(&mut self, event: UiEvent) -> bool {
        let mut next = TimelineState::clone(&self.state);
        if !event.apply(&mut next) {
            trace!(rev = self.rev, "event rejected");
            return false;
        }

        debug_assert_eq!(next.check_invariants(), Ok(()));

        self.state = Arc::new(next);
        self.rev += 1;
        if let Some(persistence) = &self.persistence {
            persistence.writer.schedule(&persistence.file, Arc::clone(&self.state));
        }
        true
    }

    /// Blocks until every scheduled save has reached the disk.
    pub fn flush(&self) {
        if let Some(persistence) = &self.persistence {
            persistence.writer.flush();
        }
    }
}
