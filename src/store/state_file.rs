// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::model::{
    Board, DateKey, DateKeyError, Edge, EdgeId, IdError, Node, NodeId, Position, Size,
};
use crate::timeline::TimelineState;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("json error at {path:?}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
    #[error("invalid id in {field}: {value:?}: {source}")]
    InvalidId { field: &'static str, value: String, source: IdError },
    #[error("invalid date in {field}: {value:?}: {source}")]
    InvalidDate { field: &'static str, value: String, source: DateKeyError },
    #[error("state file {path:?} holds no boards")]
    EmptyDocument { path: PathBuf },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Temp file plus atomic rename, no fsync.
    #[default]
    BestEffort,

    /// Additionally syncs the written file and its directory where the platform allows.
    Durable,
}

/// The JSON document a [`TimelineState`] is persisted as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateFile {
    path: PathBuf,
    durability: WriteDurability,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<TimelineState, StoreError> {
        let text = fs::read_to_string(&self.path)
            .map_err(|source| StoreError::Io { path: self.path.clone(), source })?;
        let json: StateJson = serde_json::from_str(&text)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })?;

        let state = state_from_json(&self.path, json)?;
        info!(
            path = %self.path.display(),
            boards = state.boards().len(),
            active_date = %state.active_date(),
            "state loaded"
        );
        Ok(state)
    }

    /// Loads the state, falling back to a fresh timeline keyed by today on any failure.
    pub fn load_or_default(&self) -> TimelineState {
        match self.load() {
            Ok(state) => state,
            Err(err) if err.is_not_found() => {
                info!(path = %self.path.display(), "no state file yet; starting fresh");
                TimelineState::today()
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "state file unusable; starting fresh"
                );
                TimelineState::today()
            }
        }
    }

    pub fn save(&self, state: &TimelineState) -> Result<(), StoreError> {
        let json = state_to_json(state);
        let text = serde_json::to_string_pretty(&json)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })?;

        write_atomic(&self.path, format!("{text}\n").as_bytes(), self.durability)?;
        info!(path = %self.path.display(), boards = state.boards().len(), "state saved");
        Ok(())
    }
}

/// JSON Schema of the persisted document.
pub fn state_schema() -> schemars::Schema {
    schemars::schema_for!(StateJson)
}

// Document DTOs, conversions and the atomic writer.
include!("state_file/helpers.rs");
