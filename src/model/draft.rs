// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde_json::Value;

use super::entity::EntityKind;
use super::field::{FieldError, FieldValue};

/// Unsaved form state for one entity.
///
/// Derived values such as [`Draft::display_name`] are recomputed from the current fields on
/// every call and never stored.
pub trait Draft: Clone + Default + fmt::Debug + PartialEq {
    const KIND: EntityKind;

    /// Seeds a draft from a persisted record. Missing keys keep their defaults.
    fn from_snapshot(snapshot: &Value) -> Self;

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError>;

    fn fields(&self) -> Vec<(&'static str, FieldValue)>;

    /// Backend write body for create/update.
    fn to_payload(&self) -> Value;

    fn display_name(&self) -> String;

    /// Tab title for an edit tab of this record, if the record carries enough to name it.
    fn tab_label(&self) -> Option<String> {
        let name = self.display_name();
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_owned())
    }
}

pub(crate) fn unknown_field(kind: EntityKind, field: &str) -> FieldError {
    FieldError::UnknownField {
        kind,
        field: field.to_owned(),
    }
}
