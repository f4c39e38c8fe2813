// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Tags and Tag Operations

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why a tag operation request was rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagOperationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown tag operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid tag: {0}")]
    InvalidTag(String),
}

/// Set of opaque tag tokens attached to a host
///
/// Serialized as a JSON array in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(BTreeSet<String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag; returns false if it was already present
    pub fn add(&mut self, tag: &str) -> bool {
        self.0.insert(tag.to_string())
    }

    /// Remove a tag; returns false if it was absent
    pub fn remove(&mut self, tag: &str) -> bool {
        self.0.remove(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// AND semantics: true only if every tag in `tags` is present
    pub fn contains_all<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().all(|tag| self.0.contains(tag.as_ref()))
    }

    pub fn extend(&mut self, other: &Tags) {
        self.0.extend(other.0.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Tag validation hook; every tag is currently accepted
pub fn is_valid_tag(_tag: &str) -> bool {
    true
}

/// Supported tag operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagOperation {
    Apply,
    Remove,
}

impl fmt::Display for TagOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagOperation::Apply => write!(f, "apply"),
            TagOperation::Remove => write!(f, "remove"),
        }
    }
}

impl FromStr for TagOperation {
    type Err = TagOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apply" => Ok(TagOperation::Apply),
            "remove" => Ok(TagOperation::Remove),
            other => Err(TagOperationError::UnknownOperation(other.to_string())),
        }
    }
}

/// Raw `{operation, tag}` document as received from the caller
///
/// Fields are kept untyped so that every malformed shape is reported through
/// [`TagOperationError`] instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagOperationRequest {
    #[serde(default)]
    pub operation: Option<Value>,
    #[serde(default)]
    pub tag: Option<Value>,
}

impl TagOperationRequest {
    pub fn new(operation: &str, tag: &str) -> Self {
        Self {
            operation: Some(Value::String(operation.to_string())),
            tag: Some(Value::String(tag.to_string())),
        }
    }

    /// Validate into a typed operation and tag
    pub fn validate(&self) -> Result<(TagOperation, String), TagOperationError> {
        let operation = match &self.operation {
            None | Some(Value::Null) => return Err(TagOperationError::MissingField("operation")),
            Some(Value::String(op)) => op.parse::<TagOperation>()?,
            Some(other) => return Err(TagOperationError::UnknownOperation(other.to_string())),
        };

        let tag = match &self.tag {
            None | Some(Value::Null) => return Err(TagOperationError::MissingField("tag")),
            Some(Value::String(tag)) => tag.clone(),
            Some(other) => return Err(TagOperationError::InvalidTag(other.to_string())),
        };

        if !is_valid_tag(&tag) {
            return Err(TagOperationError::InvalidTag(tag));
        }

        Ok((operation, tag))
    }
}
