// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{Map, Value};

use super::draft::{unknown_field, Draft};
use super::entity::EntityKind;
use super::field::{snapshot_text, FieldError, FieldValue};

const FIELD_COUNT: usize = 13;

// (field name, backend key)
const FIELDS: [(&str, &str); FIELD_COUNT] = [
    ("type", "type"),
    ("doc_name", "docName"),
    ("program_name", "programName"),
    ("tags", "tags"),
    ("group", "group"),
    ("country", "country"),
    ("inn", "inn"),
    ("kpp", "kpp"),
    ("ogrn", "ogrn"),
    ("registration_date", "registrationDate"),
    ("document", "document"),
    ("responsible", "responsible"),
    ("comment", "comment"),
];

/// Supplier/customer form state. Every field is free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterpartyDraft {
    values: [String; FIELD_COUNT],
}

impl Default for CounterpartyDraft {
    fn default() -> Self {
        let mut draft = Self {
            values: Default::default(),
        };
        draft.values[field_index("type").unwrap_or_default()] = "Legal entity".to_owned();
        draft.values[field_index("country").unwrap_or_default()] = "RUSSIA".to_owned();
        draft
    }
}

fn field_index(field: &str) -> Option<usize> {
    FIELDS.iter().position(|(name, _)| *name == field)
}

impl CounterpartyDraft {
    pub fn get(&self, field: &str) -> Option<&str> {
        field_index(field).map(|index| self.values[index].as_str())
    }
}

impl Draft for CounterpartyDraft {
    const KIND: EntityKind = EntityKind::Counterparty;

    fn from_snapshot(snapshot: &Value) -> Self {
        let mut draft = Self::default();
        for (index, (_, key)) in FIELDS.iter().enumerate() {
            if let Some(text) = snapshot_text(snapshot, key) {
                draft.values[index] = text;
            }
        }
        draft
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        let Some(index) = field_index(field) else {
            return Err(unknown_field(Self::KIND, field));
        };
        self.values[index] = value.into_text(FIELDS[index].0)?;
        Ok(())
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        FIELDS
            .iter()
            .zip(self.values.iter())
            .map(|((name, _), value)| (*name, FieldValue::Text(value.clone())))
            .collect()
    }

    fn to_payload(&self) -> Value {
        let body = FIELDS
            .iter()
            .zip(self.values.iter())
            .map(|((_, key), value)| ((*key).to_owned(), Value::from(value.as_str())))
            .collect::<Map<_, _>>();
        Value::Object(body)
    }

    fn display_name(&self) -> String {
        ["program_name", "doc_name"]
            .into_iter()
            .filter_map(|field| self.get(field))
            .map(str::trim)
            .find(|name| !name.is_empty())
            .unwrap_or_default()
            .to_owned()
    }
}
