// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use uuid::Uuid;

/// A board-scoped identifier for nodes and edges.
///
/// Ids are opaque strings. Fresh ids are UUIDv4 strings; ids read back from a state file
/// keep whatever non-blank value they were saved with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self { value, _marker: PhantomData })
    }

    /// Issues a fresh, globally unique id.
    pub fn generate() -> Self {
        Self { value: Uuid::new_v4().to_string(), _marker: PhantomData }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("id must not be empty")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;

/// Id of the protected node every fresh board is seeded with.
pub const ROOT_NODE_ID: &str = "root";

impl NodeId {
    pub fn root() -> Self {
        Self { value: ROOT_NODE_ID.to_owned(), _marker: PhantomData }
    }

    pub fn is_root(&self) -> bool {
        self.value == ROOT_NODE_ID
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeIdTag {}
pub type EdgeId = Id<EdgeIdTag>;

impl EdgeId {
    /// The deterministic id used for layout-created parent→child edges.
    pub fn between(source: &NodeId, target: &NodeId) -> Self {
        Self { value: format!("{source}-{target}"), _marker: PhantomData }
    }
}
