// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::marker::PhantomData;

use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Backend record id, tagged by what it identifies.
///
/// The value is opaque but must be a single path segment (non-empty, no `/`) so it can be
/// spliced into routes like `/organizations/<id>/edit`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_id_segment(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Reads an id out of backend JSON, where ids are usually numbers but may be strings.
    pub fn from_json(value: &Value) -> Result<Self, IdError> {
        match value {
            Value::String(raw) => Self::new(raw.trim()),
            Value::Number(number) => Self::new(number.to_string()),
            _ => Err(IdError::NotScalar),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<T> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self {
            value: value.to_string(),
            _marker: PhantomData,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("id must not be empty")]
    Empty,
    #[error("id must not contain '/'")]
    ContainsSlash,
    #[error("id must be a JSON string or number")]
    NotScalar,
}

fn validate_id_segment(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains('/') {
        return Err(IdError::ContainsSlash);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityIdTag {}
pub type EntityId = Id<EntityIdTag>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{EntityId, Id, IdError};

    #[test]
    fn id_rejects_empty() {
        let result: Result<Id<()>, _> = Id::new("");
        assert_eq!(result, Err(IdError::Empty));
    }

    #[test]
    fn id_rejects_slash() {
        let result: Result<Id<()>, _> = Id::new("a/b");
        assert_eq!(result, Err(IdError::ContainsSlash));
    }

    #[test]
    fn numeric_ids_render_as_digits() {
        assert_eq!(EntityId::from(12).to_string(), "12");
    }

    #[test]
    fn id_reads_numbers_and_strings_from_json() {
        assert_eq!(EntityId::from_json(&json!(7)).unwrap().as_str(), "7");
        assert_eq!(EntityId::from_json(&json!(" 42 ")).unwrap().as_str(), "42");
        assert_eq!(EntityId::from_json(&json!(null)), Err(IdError::NotScalar));
    }
}
