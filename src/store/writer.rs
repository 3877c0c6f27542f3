// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fire-and-forget persistence of published snapshots.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use tracing::{debug, warn};

use super::StateFile;
use crate::timeline::TimelineState;

#[derive(Debug)]
struct SaveTask {
    file: StateFile,
    state: Arc<TimelineState>,
}

#[derive(Debug, Default)]
struct WriterState {
    pending: HashMap<PathBuf, SaveTask>,
    queue: VecDeque<PathBuf>,
    in_flight: Option<PathBuf>,
    completed_writes: u64,
    shutdown: bool,
}

#[derive(Debug, Default)]
struct WriterInner {
    state: Mutex<WriterState>,
    cv: Condvar,
}

impl WriterInner {
    fn lock(&self) -> MutexGuard<'_, WriterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, WriterState>) -> MutexGuard<'a, WriterState> {
        self.cv.wait(guard).unwrap_or_else(PoisonError::into_inner)
    }
}

/// Saves snapshots on a background thread.
///
/// Only the newest pending snapshot per file is kept, so a burst of edits collapses into a
/// single write. Failed writes are logged and dropped.
#[derive(Debug)]
pub struct SnapshotWriter {
    inner: Arc<WriterInner>,
    worker: Option<JoinHandle<()>>,
}

impl SnapshotWriter {
    pub fn spawn() -> io::Result<Self> {
        let inner = Arc::new(WriterInner::default());
        let worker = std::thread::Builder::new()
            .name("mindline-snapshot-writer".to_owned())
            .spawn({
                let inner = inner.clone();
                move || run_worker(&inner)
            })?;

        Ok(Self { inner, worker: Some(worker) })
    }

    /// Queues `state` for `file`, replacing any snapshot still waiting for the same path.
    pub fn schedule(&self, file: &StateFile, state: Arc<TimelineState>) {
        let path = file.path().to_path_buf();
        let task = SaveTask { file: file.clone(), state };

        let mut state = self.inner.lock();
        if state.pending.insert(path.clone(), task).is_none() {
            state.queue.push_back(path);
        }
        self.inner.cv.notify_all();
    }

    /// Blocks until every scheduled snapshot has been written (or has failed).
    pub fn flush(&self) {
        let mut state = self.inner.lock();
        while state.in_flight.is_some() || !state.pending.is_empty() {
            state = self.inner.wait(state);
        }
    }

    /// Number of writes the worker has finished, successful or not.
    pub fn completed_writes(&self) -> u64 {
        self.inner.lock().completed_writes
    }
}

impl Drop for SnapshotWriter {
    fn drop(&mut self) {
        {
            let mut state = self.inner.lock();
            state.shutdown = true;
            self.inner.cv.notify_all();
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker(inner: &WriterInner) {
    loop {
        let task = {
            let mut state = inner.lock();
            loop {
                if let Some(path) = state.queue.pop_front() {
                    if let Some(task) = state.pending.remove(&path) {
                        state.in_flight = Some(path);
                        break task;
                    }
                    continue;
                }
                if state.shutdown {
                    return;
                }
                state = inner.wait(state);
            }
        };

        match task.file.save(&task.state) {
            Ok(()) => debug!(path = %task.file.path().display(), "snapshot written"),
            Err(err) => {
                warn!(path = %task.file.path().display(), error = %err, "snapshot write failed")
            }
        }

        let mut state = inner.lock();
        state.in_flight = None;
        state.completed_writes += 1;
        inner.cv.notify_all();
    }
}
