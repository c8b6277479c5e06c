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
use super::field::{
    snapshot_choice, snapshot_flag, snapshot_text, Choice, FieldError, FieldValue,
};

pub const NAME_PLACEHOLDER: &str = "<not filled>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrgType {
    #[default]
    Physical,
    Legal,
}

impl Choice for OrgType {
    const ALL: &'static [Self] = &[Self::Physical, Self::Legal];

    fn code(self) -> &'static str {
        match self {
            Self::Physical => "PHYSICAL",
            Self::Legal => "LEGAL",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Physical => "Physical person",
            Self::Legal => "Legal entity",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PhysicalStatus {
    #[default]
    SelfEmployed,
    IndividualEntrepreneur,
}

impl Choice for PhysicalStatus {
    const ALL: &'static [Self] = &[Self::SelfEmployed, Self::IndividualEntrepreneur];

    fn code(self) -> &'static str {
        match self {
            Self::SelfEmployed => "SELF_EMPLOYED",
            Self::IndividualEntrepreneur => "IP",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::SelfEmployed => "Self-employed",
            Self::IndividualEntrepreneur => "Individual entrepreneur",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Taxation {
    #[default]
    ProfessionalIncome,
    SimplifiedIncome,
    SimplifiedIncomeMinusExpenses,
    AutomatedSimplifiedIncome,
    AutomatedSimplifiedIncomeMinusExpenses,
    PatentOnly,
    General,
}

impl Choice for Taxation {
    const ALL: &'static [Self] = &[
        Self::ProfessionalIncome,
        Self::SimplifiedIncome,
        Self::SimplifiedIncomeMinusExpenses,
        Self::AutomatedSimplifiedIncome,
        Self::AutomatedSimplifiedIncomeMinusExpenses,
        Self::PatentOnly,
        Self::General,
    ];

    fn code(self) -> &'static str {
        match self {
            Self::ProfessionalIncome => "PROFESSIONAL_INCOME",
            Self::SimplifiedIncome => "USN_INCOME",
            Self::SimplifiedIncomeMinusExpenses => "USN_INCOME_MINUS_EXPENSES",
            Self::AutomatedSimplifiedIncome => "AUSN_INCOME",
            Self::AutomatedSimplifiedIncomeMinusExpenses => "AUSN_INCOME_MINUS_EXPENSES",
            Self::PatentOnly => "PATENT_ONLY",
            Self::General => "GENERAL",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::ProfessionalIncome => "Professional income tax (self-employed)",
            Self::SimplifiedIncome => "Simplified (income)",
            Self::SimplifiedIncomeMinusExpenses => "Simplified (income minus expenses)",
            Self::AutomatedSimplifiedIncome => "Automated simplified (income)",
            Self::AutomatedSimplifiedIncomeMinusExpenses => {
                "Automated simplified (income minus expenses)"
            }
            Self::PatentOnly => "Patent only",
            Self::General => "General",
        }
    }
}

/// Organization form state, shared by the create and edit flows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationDraft {
    org_type: OrgType,
    status: PhysicalStatus,
    last_name: String,
    first_name: String,
    middle_name: String,
    name: String,
    prefix: String,
    inn: String,
    taxation: Taxation,
    show_prefix_tip: bool,
    show_inn_tip: bool,
}

impl OrganizationDraft {
    pub fn org_type(&self) -> OrgType {
        self.org_type
    }

    /// Switching the type also resets the status to the type's default.
    pub fn set_org_type(&mut self, org_type: OrgType) {
        self.org_type = org_type;
        self.status = match org_type {
            OrgType::Physical => PhysicalStatus::SelfEmployed,
            OrgType::Legal => PhysicalStatus::IndividualEntrepreneur,
        };
    }

    pub fn status(&self) -> PhysicalStatus {
        self.status
    }

    pub fn set_status(&mut self, status: PhysicalStatus) {
        self.status = status;
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.last_name = value.into();
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.first_name = value.into();
    }

    pub fn middle_name(&self) -> &str {
        &self.middle_name
    }

    pub fn set_middle_name(&mut self, value: impl Into<String>) {
        self.middle_name = value.into();
    }

    /// Registered name of a legal entity. Physical persons are named by [`Self::full_name`].
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, value: impl Into<String>) {
        self.prefix = value.into();
    }

    pub fn inn(&self) -> &str {
        &self.inn
    }

    pub fn set_inn(&mut self, value: impl Into<String>) {
        self.inn = value.into();
    }

    pub fn taxation(&self) -> Taxation {
        self.taxation
    }

    pub fn set_taxation(&mut self, taxation: Taxation) {
        self.taxation = taxation;
    }

    pub fn show_prefix_tip(&self) -> bool {
        self.show_prefix_tip
    }

    pub fn set_show_prefix_tip(&mut self, show: bool) {
        self.show_prefix_tip = show;
    }

    pub fn show_inn_tip(&self) -> bool {
        self.show_inn_tip
    }

    pub fn set_show_inn_tip(&mut self, show: bool) {
        self.show_inn_tip = show;
    }

    /// Non-blank name parts joined by a single space.
    pub fn full_name(&self) -> String {
        [&self.last_name, &self.first_name, &self.middle_name]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `Ivanov I. I.` style name, or `None` without a last name.
    pub fn short_name(&self) -> Option<String> {
        let last_name = self.last_name.trim();
        if last_name.is_empty() {
            return None;
        }

        let mut short = last_name.to_owned();
        for part in [&self.first_name, &self.middle_name] {
            if let Some(initial) = part.trim().chars().next() {
                short.push(' ');
                short.extend(initial.to_uppercase());
                short.push('.');
            }
        }
        Some(short)
    }

    fn legal_or_full_name(&self) -> String {
        match self.org_type {
            OrgType::Physical => self.full_name(),
            OrgType::Legal => self.name.trim().to_owned(),
        }
    }
}

impl Draft for OrganizationDraft {
    const KIND: EntityKind = EntityKind::Organization;

    fn from_snapshot(snapshot: &Value) -> Self {
        let mut draft = Self::default();
        if let Some(org_type) = snapshot_choice(snapshot, "type") {
            draft.set_org_type(org_type);
        }
        if let Some(status) = snapshot_choice(snapshot, "physicalType") {
            draft.status = status;
        }
        if let Some(taxation) = snapshot_choice(snapshot, "taxation") {
            draft.taxation = taxation;
        }
        for (key, slot) in [
            ("lastName", &mut draft.last_name),
            ("firstName", &mut draft.first_name),
            ("middleName", &mut draft.middle_name),
            ("name", &mut draft.name),
            ("prefix", &mut draft.prefix),
            ("inn", &mut draft.inn),
        ] {
            if let Some(text) = snapshot_text(snapshot, key) {
                *slot = text;
            }
        }
        draft.show_prefix_tip = snapshot_flag(snapshot, "showPrefixTip").unwrap_or(false);
        draft.show_inn_tip = snapshot_flag(snapshot, "showInnTip").unwrap_or(false);
        draft
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        match field {
            "type" | "org_type" => self.set_org_type(value.into_choice("type")?),
            "status" => self.status = value.into_choice("status")?,
            "last_name" => self.last_name = value.into_text("last_name")?,
            "first_name" => self.first_name = value.into_text("first_name")?,
            "middle_name" => self.middle_name = value.into_text("middle_name")?,
            "name" => self.name = value.into_text("name")?,
            "prefix" => self.prefix = value.into_text("prefix")?,
            "inn" => self.inn = value.into_text("inn")?,
            "taxation" => self.taxation = value.into_choice("taxation")?,
            "show_prefix_tip" => self.show_prefix_tip = value.into_flag("show_prefix_tip")?,
            "show_inn_tip" => self.show_inn_tip = value.into_flag("show_inn_tip")?,
            other => return Err(unknown_field(Self::KIND, other)),
        }
        Ok(())
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("type", self.org_type.label().into()),
            ("status", self.status.label().into()),
            ("last_name", self.last_name.clone().into()),
            ("first_name", self.first_name.clone().into()),
            ("middle_name", self.middle_name.clone().into()),
            ("name", self.name.clone().into()),
            ("prefix", self.prefix.clone().into()),
            ("inn", self.inn.clone().into()),
            ("taxation", self.taxation.label().into()),
            ("show_prefix_tip", self.show_prefix_tip.into()),
            ("show_inn_tip", self.show_inn_tip.into()),
        ]
    }

    fn to_payload(&self) -> Value {
        let physical_type = match self.org_type {
            OrgType::Physical => Value::from(self.status.code()),
            OrgType::Legal => Value::Null,
        };
        json!({
            "type": self.org_type.code(),
            "physicalType": physical_type,
            "lastName": self.last_name,
            "firstName": self.first_name,
            "middleName": self.middle_name,
            "name": self.legal_or_full_name(),
            "prefix": self.prefix,
            "inn": self.inn,
            "taxation": self.taxation.code(),
        })
    }

    fn display_name(&self) -> String {
        let name = self.legal_or_full_name();
        if name.is_empty() {
            NAME_PLACEHOLDER.to_owned()
        } else {
            name
        }
    }

    fn tab_label(&self) -> Option<String> {
        match self.org_type {
            OrgType::Physical => self.short_name().or_else(|| {
                let name = self.name.trim();
                (!name.is_empty()).then(|| name.to_owned())
            }),
            OrgType::Legal => {
                let name = self.legal_or_full_name();
                (!name.is_empty()).then_some(name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{OrgType, OrganizationDraft, PhysicalStatus, Taxation, NAME_PLACEHOLDER};
    use crate::model::{Draft, FieldError, FieldValue};

    fn ivanov() -> OrganizationDraft {
        OrganizationDraft::from_snapshot(&json!({
            "id": 7,
            "type": "PHYSICAL",
            "physicalType": "IP",
            "lastName": "Ivanov",
            "firstName": "ivan",
            "middleName": "Ivanovich",
            "inn": "500100732259",
            "taxation": "USN_INCOME",
        }))
    }

    #[test]
    fn snapshot_seeds_fields_over_defaults() {
        let draft = ivanov();
        assert_eq!(draft.org_type(), OrgType::Physical);
        assert_eq!(draft.status(), PhysicalStatus::IndividualEntrepreneur);
        assert_eq!(draft.taxation(), Taxation::SimplifiedIncome);
        assert_eq!(draft.prefix(), "");
        assert!(!draft.show_inn_tip());
    }

    #[test]
    fn tab_label_uses_initials() {
        assert_eq!(ivanov().tab_label().as_deref(), Some("Ivanov I. I."));
    }

    #[test]
    fn legal_entity_is_named_by_name() {
        let draft =
            OrganizationDraft::from_snapshot(&json!({ "type": "LEGAL", "name": " Horns LLC " }));
        assert_eq!(draft.display_name(), "Horns LLC");
        assert_eq!(draft.tab_label().as_deref(), Some("Horns LLC"));
        assert_eq!(draft.to_payload()["physicalType"], json!(null));
    }

    #[test]
    fn empty_draft_shows_placeholder_and_no_label() {
        let draft = OrganizationDraft::default();
        assert_eq!(draft.display_name(), NAME_PLACEHOLDER);
        assert_eq!(draft.tab_label(), None);
    }

    #[test]
    fn switching_type_resets_status() {
        let mut draft = OrganizationDraft::default();
        draft.set_status(PhysicalStatus::IndividualEntrepreneur);
        draft.set_field("type", "Physical person".into()).unwrap();
        assert_eq!(draft.status(), PhysicalStatus::SelfEmployed);
        draft.set_field("type", "LEGAL".into()).unwrap();
        assert_eq!(draft.status(), PhysicalStatus::IndividualEntrepreneur);
    }

    #[rstest]
    #[case("Ivanov", "Ivan", "Ivanovich")]
    #[case("  Petrova ", "", "Sergeevna")]
    #[case("", "Anna", "")]
    #[case("", "", "")]
    #[case("Smith", " ", "John ")]
    fn full_name_tracks_every_field_update(
        #[case] last: &str,
        #[case] first: &str,
        #[case] middle: &str,
    ) {
        let mut draft = OrganizationDraft::default();
        draft.set_field("last_name", last.into()).unwrap();
        draft.set_field("first_name", first.into()).unwrap();
        draft.set_field("middle_name", middle.into()).unwrap();

        let manual = [last, first, middle]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(draft.full_name(), manual);

        draft.set_field("first_name", "Zed".into()).unwrap();
        assert!(draft.full_name().contains("Zed"));
    }

    #[test]
    fn payload_carries_wire_codes_and_derived_name() {
        let mut draft = ivanov();
        draft.set_field("prefix", "AB".into()).unwrap();
        let payload = draft.to_payload();
        assert_eq!(payload["type"], json!("PHYSICAL"));
        assert_eq!(payload["physicalType"], json!("IP"));
        assert_eq!(payload["taxation"], json!("USN_INCOME"));
        assert_eq!(payload["name"], json!("Ivanov ivan Ivanovich"));
        assert_eq!(payload["prefix"], json!("AB"));
    }

    #[test]
    fn rejects_unknown_fields_and_bad_choices() {
        let mut draft = OrganizationDraft::default();
        assert!(matches!(
            draft.set_field("kpp", "1".into()),
            Err(FieldError::UnknownField { .. })
        ));
        assert_eq!(
            draft.set_field("taxation", "flat".into()),
            Err(FieldError::InvalidValue {
                field: "taxation",
                value: "flat".to_owned(),
            })
        );
        assert!(draft.set_field("show_inn_tip", FieldValue::Flag(true)).is_ok());
        assert!(draft.show_inn_tip());
    }
}
