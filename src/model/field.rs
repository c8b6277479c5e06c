// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! By-name field access shared by every draft type.
//!
//! The presentation layer edits drafts through field names and loosely typed values; drafts
//! coerce them into their typed fields and reject only what cannot be coerced.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::entity::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn into_text(self, field: &'static str) -> Result<String, FieldError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Flag(_) => Err(FieldError::TypeMismatch {
                field,
                expected: "text",
            }),
        }
    }

    pub fn into_flag(self, field: &'static str) -> Result<bool, FieldError> {
        match self {
            Self::Flag(flag) => Ok(flag),
            Self::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(true),
                "false" | "no" | "off" | "0" => Ok(false),
                _ => Err(FieldError::InvalidValue { field, value: text }),
            },
        }
    }

    pub fn into_choice<C: Choice>(self, field: &'static str) -> Result<C, FieldError> {
        let text = self.into_text(field)?;
        C::parse(&text).ok_or(FieldError::InvalidValue { field, value: text })
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown field '{field}' for {kind}")]
    UnknownField { kind: EntityKind, field: String },
    #[error("field '{field}' expects {expected}")]
    TypeMismatch { field: &'static str, expected: &'static str },
    #[error("invalid value '{value}' for field '{field}'")]
    InvalidValue { field: &'static str, value: String },
}

/// A closed set of options with a backend wire code and a human label.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn code(self) -> &'static str;

    fn label(self) -> &'static str;

    /// Accepts either the wire code or the label, case-insensitively.
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|choice| {
                choice.code().eq_ignore_ascii_case(raw) || choice.label().eq_ignore_ascii_case(raw)
            })
    }
}

pub(crate) fn snapshot_text(snapshot: &Value, key: &str) -> Option<String> {
    snapshot.get(key).and_then(Value::as_str).map(str::to_owned)
}

pub(crate) fn snapshot_flag(snapshot: &Value, key: &str) -> Option<bool> {
    match snapshot.get(key)? {
        Value::Bool(flag) => Some(*flag),
        Value::String(raw) => FieldValue::Text(raw.clone()).into_flag("snapshot").ok(),
        _ => None,
    }
}

pub(crate) fn snapshot_choice<C: Choice>(snapshot: &Value, key: &str) -> Option<C> {
    snapshot.get(key).and_then(Value::as_str).and_then(C::parse)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{FieldError, FieldValue};

    #[rstest]
    #[case("yes", true)]
    #[case("TRUE", true)]
    #[case("1", true)]
    #[case("off", false)]
    #[case(" no ", false)]
    fn text_coerces_to_flag(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(FieldValue::from(raw).into_flag("hide_in_lists"), Ok(expected));
    }

    #[test]
    fn flag_does_not_coerce_to_text() {
        assert_eq!(
            FieldValue::Flag(true).into_text("name"),
            Err(FieldError::TypeMismatch {
                field: "name",
                expected: "text",
            })
        );
    }

    #[test]
    fn garbage_flag_is_invalid() {
        assert_eq!(
            FieldValue::from("maybe").into_flag("show_inn_tip"),
            Err(FieldError::InvalidValue {
                field: "show_inn_tip",
                value: "maybe".to_owned(),
            })
        );
    }
}
