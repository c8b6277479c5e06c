// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::ids::EntityId;

/// The kinds of business records the desk can open, edit and create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Organization,
    Nomenclature,
    Counterparty,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] =
        [EntityKind::Organization, EntityKind::Nomenclature, EntityKind::Counterparty];

    /// Backend collection segment (`/api/<collection>/<id>`).
    pub fn collection(self) -> &'static str {
        match self {
            Self::Organization => "organizations",
            Self::Nomenclature => "nomenclature",
            Self::Counterparty => "contragents",
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::Nomenclature => "Nomenclature",
            Self::Counterparty => "Counterparty",
        }
    }

    /// Label used when a dynamic tab title cannot be resolved from the backend.
    pub fn fallback_label(self, id: &EntityId) -> String {
        format!("{} #{id}", self.noun())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Organization => "organization",
            Self::Nomenclature => "nomenclature",
            Self::Counterparty => "counterparty",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entity kind '{0}'")]
pub struct ParseEntityKindError(String);

impl FromStr for EntityKind {
    type Err = ParseEntityKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "organization" | "organizations" | "org" | "orgs" => Ok(Self::Organization),
            "nomenclature" | "item" | "items" => Ok(Self::Nomenclature),
            "counterparty" | "counterparties" | "contragent" | "contragents" => {
                Ok(Self::Counterparty)
            }
            other => Err(ParseEntityKindError(other.to_owned())),
        }
    }
}

/// One row of an entity list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub id: EntityId,
    pub name: String,
    pub inn: Option<String>,
    pub status: Option<String>,
}

impl EntitySummary {
    /// Builds a list row from a backend record. Records without a usable id are skipped.
    pub fn from_json(record: &Value) -> Option<Self> {
        let id = EntityId::from_json(record.get("id")?).ok()?;
        let text = |key: &str| {
            record
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };
        let name = text("name")
            .or_else(|| text("programName"))
            .or_else(|| text("fullName"))
            .unwrap_or_default();
        Some(Self {
            id,
            name,
            inn: text("inn"),
            status: text("status"),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{EntityKind, EntitySummary};
    use crate::model::EntityId;

    #[test]
    fn parses_kind_aliases() {
        assert_eq!("orgs".parse::<EntityKind>().unwrap(), EntityKind::Organization);
        assert_eq!("Contragents".parse::<EntityKind>().unwrap(), EntityKind::Counterparty);
        assert!("invoices".parse::<EntityKind>().is_err());
    }

    #[test]
    fn fallback_label_embeds_id() {
        let id = EntityId::new("7").unwrap();
        assert_eq!(EntityKind::Organization.fallback_label(&id), "Organization #7");
    }

    #[test]
    fn summary_skips_records_without_id() {
        assert!(EntitySummary::from_json(&json!({ "name": "x" })).is_none());

        let row = EntitySummary::from_json(
            &json!({ "id": 3, "name": "Ivanov Ivan", "inn": "", "status": "Self-employed" }),
        )
        .unwrap();
        assert_eq!(row.id.as_str(), "3");
        assert_eq!(row.inn, None);
        assert_eq!(row.status.as_deref(), Some("Self-employed"));
    }
}
