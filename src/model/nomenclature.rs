// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{json, Value};

use super::draft::{unknown_field, Draft};
use super::entity::EntityKind;
use super::field::{snapshot_flag, snapshot_text, FieldError, FieldValue};

/// Goods/services catalogue item form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NomenclatureDraft {
    item_type: String,
    name: String,
    full_name: String,
    marking: String,
    article: String,
    group: String,
    unit: String,
    vat: String,
    country: String,
    manufacturer: String,
    comment: String,
    hide_in_lists: bool,
}

impl Default for NomenclatureDraft {
    fn default() -> Self {
        Self {
            item_type: String::new(),
            name: String::new(),
            full_name: String::new(),
            marking: "No".to_owned(),
            article: String::new(),
            group: String::new(),
            unit: "pcs".to_owned(),
            vat: "20".to_owned(),
            country: "RUSSIA".to_owned(),
            manufacturer: String::new(),
            comment: String::new(),
            hide_in_lists: false,
        }
    }
}

impl NomenclatureDraft {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn vat(&self) -> &str {
        &self.vat
    }

    pub fn hide_in_lists(&self) -> bool {
        self.hide_in_lists
    }

    fn text_slot(&mut self, field: &str) -> Option<(&'static str, &mut String)> {
        let slot = match field {
            "type" | "item_type" => ("type", &mut self.item_type),
            "name" => ("name", &mut self.name),
            "full_name" => ("full_name", &mut self.full_name),
            "marking" => ("marking", &mut self.marking),
            "article" => ("article", &mut self.article),
            "group" => ("group", &mut self.group),
            "unit" => ("unit", &mut self.unit),
            "vat" => ("vat", &mut self.vat),
            "country" => ("country", &mut self.country),
            "manufacturer" => ("manufacturer", &mut self.manufacturer),
            "comment" => ("comment", &mut self.comment),
            _ => return None,
        };
        Some(slot)
    }
}

impl Draft for NomenclatureDraft {
    const KIND: EntityKind = EntityKind::Nomenclature;

    fn from_snapshot(snapshot: &Value) -> Self {
        let mut draft = Self::default();
        for (key, field) in [
            ("type", "type"),
            ("name", "name"),
            ("fullName", "full_name"),
            ("marking", "marking"),
            ("article", "article"),
            ("group", "group"),
            ("unit", "unit"),
            ("vat", "vat"),
            ("country", "country"),
            ("manufacturer", "manufacturer"),
            ("comment", "comment"),
        ] {
            if let (Some(text), Some((_, slot))) =
                (snapshot_text(snapshot, key), draft.text_slot(field))
            {
                *slot = text;
            }
        }
        draft.hide_in_lists = snapshot_flag(snapshot, "hideInLists").unwrap_or(false);
        draft
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        if field == "hide_in_lists" {
            self.hide_in_lists = value.into_flag("hide_in_lists")?;
            return Ok(());
        }
        let Some((name, slot)) = self.text_slot(field) else {
            return Err(unknown_field(Self::KIND, field));
        };
        *slot = value.into_text(name)?;
        Ok(())
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("type", self.item_type.clone().into()),
            ("name", self.name.clone().into()),
            ("full_name", self.full_name.clone().into()),
            ("marking", self.marking.clone().into()),
            ("article", self.article.clone().into()),
            ("group", self.group.clone().into()),
            ("unit", self.unit.clone().into()),
            ("vat", self.vat.clone().into()),
            ("country", self.country.clone().into()),
            ("manufacturer", self.manufacturer.clone().into()),
            ("comment", self.comment.clone().into()),
            ("hide_in_lists", self.hide_in_lists.into()),
        ]
    }

    fn to_payload(&self) -> Value {
        json!({
            "type": self.item_type,
            "name": self.name,
            "fullName": self.full_name,
            "marking": self.marking,
            "article": self.article,
            "group": self.group,
            "unit": self.unit,
            "vat": self.vat,
            "country": self.country,
            "manufacturer": self.manufacturer,
            "comment": self.comment,
            "hideInLists": self.hide_in_lists,
        })
    }

    fn display_name(&self) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            self.full_name.trim().to_owned()
        } else {
            name.to_owned()
        }
    }
}
