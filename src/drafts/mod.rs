// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Draft stores.
//!
//! Edit drafts are keyed by entity id, create drafts are a single optional slot per kind. All
//! entries carry a `rev` that increments on every field update so that a save can tell whether
//! the draft changed while the backend write was in flight.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::model::{
    CounterpartyDraft, Draft, EntityId, EntityKind, FieldError, FieldValue, NomenclatureDraft,
    OrganizationDraft,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DraftEntry<D> {
    draft: D,
    rev: u64,
}

impl<D: Draft> DraftEntry<D> {
    fn new(draft: D) -> Self {
        Self { draft, rev: 0 }
    }

    fn seeded(snapshot: Option<&Value>) -> Self {
        Self::new(snapshot.map(D::from_snapshot).unwrap_or_default())
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    fn update(&mut self, field: &str, value: FieldValue) -> Result<u64, FieldError> {
        self.draft.set_field(field, value)?;
        self.rev = self.rev.wrapping_add(1);
        Ok(self.rev)
    }
}

/// Edit drafts of one entity kind.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDrafts<D> {
    entries: BTreeMap<EntityId, DraftEntry<D>>,
}

impl<D> Default for EditDrafts<D> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<D: Draft> EditDrafts<D> {
    pub fn get(&self, id: &EntityId) -> Option<&DraftEntry<D>> {
        self.entries.get(id)
    }

    pub fn get_or_init(&mut self, id: &EntityId, snapshot: Option<&Value>) -> &DraftEntry<D> {
        self.entries.entry(id.clone()).or_insert_with(|| DraftEntry::seeded(snapshot))
    }

    pub fn update(
        &mut self,
        id: &EntityId,
        field: &str,
        value: FieldValue,
    ) -> Result<u64, FieldError> {
        self.entries
            .entry(id.clone())
            .or_insert_with(|| DraftEntry::new(D::default()))
            .update(field, value)
    }

    pub fn dispose(&mut self, id: &EntityId) -> Option<DraftEntry<D>> {
        self.entries.remove(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &EntityId> + '_ {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The single new-record draft of one entity kind.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDraft<D> {
    entry: Option<DraftEntry<D>>,
}

impl<D> Default for CreateDraft<D> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<D: Draft> CreateDraft<D> {
    pub fn get(&self) -> Option<&DraftEntry<D>> {
        self.entry.as_ref()
    }

    pub fn get_or_init(&mut self) -> &DraftEntry<D> {
        self.entry.get_or_insert_with(|| DraftEntry::new(D::default()))
    }

    pub fn update(&mut self, field: &str, value: FieldValue) -> Result<u64, FieldError> {
        self.entry.get_or_insert_with(|| DraftEntry::new(D::default())).update(field, value)
    }

    pub fn dispose(&mut self) -> Option<DraftEntry<D>> {
        self.entry.take()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DraftKey {
    Edit(EntityId),
    Create,
}

/// Addresses one draft in a [`DraftBook`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DraftTarget {
    pub kind: EntityKind,
    pub key: DraftKey,
}

impl DraftTarget {
    pub fn edit(kind: EntityKind, id: EntityId) -> Self {
        Self {
            kind,
            key: DraftKey::Edit(id),
        }
    }

    pub fn create(kind: EntityKind) -> Self {
        Self {
            kind,
            key: DraftKey::Create,
        }
    }

    pub fn id(&self) -> Option<&EntityId> {
        match &self.key {
            DraftKey::Edit(id) => Some(id),
            DraftKey::Create => None,
        }
    }
}

impl fmt::Display for DraftTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            DraftKey::Edit(id) => write!(f, "{} {id}", self.kind),
            DraftKey::Create => write!(f, "new {}", self.kind),
        }
    }
}

/// Edit and create stores of one entity kind.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftSlots<D> {
    pub edit: EditDrafts<D>,
    pub create: CreateDraft<D>,
}

impl<D> Default for DraftSlots<D> {
    fn default() -> Self {
        Self {
            edit: EditDrafts::default(),
            create: CreateDraft::default(),
        }
    }
}

impl<D: Draft> DraftSlots<D> {
    pub fn get(&self, key: &DraftKey) -> Option<&DraftEntry<D>> {
        match key {
            DraftKey::Edit(id) => self.edit.get(id),
            DraftKey::Create => self.create.get(),
        }
    }

    fn get_or_init(&mut self, key: &DraftKey, snapshot: Option<&Value>) -> &DraftEntry<D> {
        match key {
            DraftKey::Edit(id) => self.edit.get_or_init(id, snapshot),
            DraftKey::Create => self.create.get_or_init(),
        }
    }

    fn seed(&mut self, key: &DraftKey, snapshot: &Value) -> bool {
        if self.get(key).is_some() {
            return false;
        }
        self.get_or_init(key, Some(snapshot));
        true
    }

    fn update(
        &mut self,
        key: &DraftKey,
        field: &str,
        value: FieldValue,
    ) -> Result<u64, FieldError> {
        match key {
            DraftKey::Edit(id) => self.edit.update(id, field, value),
            DraftKey::Create => self.create.update(field, value),
        }
    }

    fn dispose(&mut self, key: &DraftKey) -> bool {
        match key {
            DraftKey::Edit(id) => self.edit.dispose(id).is_some(),
            DraftKey::Create => self.create.dispose().is_some(),
        }
    }

    fn keys(&self) -> Vec<DraftKey> {
        let mut keys = self.edit.ids().cloned().map(DraftKey::Edit).collect::<Vec<_>>();
        if self.create.get().is_some() {
            keys.push(DraftKey::Create);
        }
        keys
    }
}

/// A draft of any kind, for the kind-agnostic presentation surface.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyDraft {
    Organization(OrganizationDraft),
    Nomenclature(NomenclatureDraft),
    Counterparty(CounterpartyDraft),
}

impl AnyDraft {
    pub fn from_snapshot(kind: EntityKind, snapshot: &Value) -> Self {
        match kind {
            EntityKind::Organization => OrganizationDraft::from_snapshot(snapshot).into(),
            EntityKind::Nomenclature => NomenclatureDraft::from_snapshot(snapshot).into(),
            EntityKind::Counterparty => CounterpartyDraft::from_snapshot(snapshot).into(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Organization(_) => EntityKind::Organization,
            Self::Nomenclature(_) => EntityKind::Nomenclature,
            Self::Counterparty(_) => EntityKind::Counterparty,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Self::Organization(draft) => draft.display_name(),
            Self::Nomenclature(draft) => draft.display_name(),
            Self::Counterparty(draft) => draft.display_name(),
        }
    }

    pub fn tab_label(&self) -> Option<String> {
        match self {
            Self::Organization(draft) => draft.tab_label(),
            Self::Nomenclature(draft) => draft.tab_label(),
            Self::Counterparty(draft) => draft.tab_label(),
        }
    }

    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        match self {
            Self::Organization(draft) => draft.fields(),
            Self::Nomenclature(draft) => draft.fields(),
            Self::Counterparty(draft) => draft.fields(),
        }
    }

    pub fn field(&self, name: &str) -> Option<FieldValue> {
        self.fields().into_iter().find(|(field, _)| *field == name).map(|(_, value)| value)
    }

    pub fn to_payload(&self) -> Value {
        match self {
            Self::Organization(draft) => draft.to_payload(),
            Self::Nomenclature(draft) => draft.to_payload(),
            Self::Counterparty(draft) => draft.to_payload(),
        }
    }
}

impl From<OrganizationDraft> for AnyDraft {
    fn from(draft: OrganizationDraft) -> Self {
        Self::Organization(draft)
    }
}

impl From<NomenclatureDraft> for AnyDraft {
    fn from(draft: NomenclatureDraft) -> Self {
        Self::Nomenclature(draft)
    }
}

impl From<CounterpartyDraft> for AnyDraft {
    fn from(draft: CounterpartyDraft) -> Self {
        Self::Counterparty(draft)
    }
}

/// Read-only copy of a stored draft.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftView {
    pub draft: AnyDraft,
    pub rev: u64,
}

impl DraftView {
    fn of<D: Draft + Into<AnyDraft>>(entry: &DraftEntry<D>) -> Self {
        Self {
            draft: entry.draft.clone().into(),
            rev: entry.rev,
        }
    }
}

/// Every draft store of the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftBook {
    organizations: DraftSlots<OrganizationDraft>,
    nomenclature: DraftSlots<NomenclatureDraft>,
    counterparties: DraftSlots<CounterpartyDraft>,
}

macro_rules! with_slots {
    ($book:expr, $kind:expr, |mut $slots:ident| $body:expr) => {
        match $kind {
            EntityKind::Organization => {
                let $slots = &mut $book.organizations;
                $body
            }
            EntityKind::Nomenclature => {
                let $slots = &mut $book.nomenclature;
                $body
            }
            EntityKind::Counterparty => {
                let $slots = &mut $book.counterparties;
                $body
            }
        }
    };
    ($book:expr, $kind:expr, |$slots:ident| $body:expr) => {
        match $kind {
            EntityKind::Organization => {
                let $slots = &$book.organizations;
                $body
            }
            EntityKind::Nomenclature => {
                let $slots = &$book.nomenclature;
                $body
            }
            EntityKind::Counterparty => {
                let $slots = &$book.counterparties;
                $body
            }
        }
    };
}

impl DraftBook {
    pub fn organizations(&self) -> &DraftSlots<OrganizationDraft> {
        &self.organizations
    }

    pub fn nomenclature(&self) -> &DraftSlots<NomenclatureDraft> {
        &self.nomenclature
    }

    pub fn counterparties(&self) -> &DraftSlots<CounterpartyDraft> {
        &self.counterparties
    }

    pub fn get(&self, target: &DraftTarget) -> Option<DraftView> {
        with_slots!(self, target.kind, |slots| slots.get(&target.key).map(DraftView::of))
    }

    pub fn contains(&self, target: &DraftTarget) -> bool {
        self.rev(target).is_some()
    }

    pub fn rev(&self, target: &DraftTarget) -> Option<u64> {
        with_slots!(self, target.kind, |slots| slots.get(&target.key).map(DraftEntry::rev))
    }

    /// Returns the stored draft, creating it from `snapshot` (or defaults) when absent.
    pub fn get_or_init(&mut self, target: &DraftTarget, snapshot: Option<&Value>) -> DraftView {
        with_slots!(self, target.kind, |mut slots| DraftView::of(
            slots.get_or_init(&target.key, snapshot)
        ))
    }

    /// Inserts a draft built from `snapshot` unless one already exists.
    pub fn seed_from_snapshot(&mut self, target: &DraftTarget, snapshot: &Value) -> bool {
        let seeded = with_slots!(self, target.kind, |mut slots| slots.seed(&target.key, snapshot));
        if seeded {
            tracing::debug!(draft = %target, "draft seeded from snapshot");
        }
        seeded
    }

    /// Assigns one field, creating a default draft first when needed. Returns the new rev.
    pub fn update(
        &mut self,
        target: &DraftTarget,
        field: &str,
        value: FieldValue,
    ) -> Result<u64, FieldError> {
        with_slots!(self, target.kind, |mut slots| slots.update(&target.key, field, value))
    }

    pub fn dispose(&mut self, target: &DraftTarget) -> bool {
        let disposed = with_slots!(self, target.kind, |mut slots| slots.dispose(&target.key));
        if disposed {
            tracing::debug!(draft = %target, "draft disposed");
        }
        disposed
    }

    pub fn payload(&self, target: &DraftTarget) -> Option<Value> {
        self.get(target).map(|view| view.draft.to_payload())
    }

    pub fn targets(&self) -> Vec<DraftTarget> {
        EntityKind::ALL
            .into_iter()
            .flat_map(|kind| {
                let keys = with_slots!(self, kind, |slots| slots.keys());
                keys.into_iter().map(move |key| DraftTarget { kind, key })
            })
            .collect()
    }

    /// Disposes every draft for which `keep` is false and returns what was removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&DraftTarget) -> bool) -> Vec<DraftTarget> {
        let doomed = self.targets().into_iter().filter(|target| !keep(target)).collect::<Vec<_>>();
        for target in &doomed {
            self.dispose(target);
        }
        doomed
    }

    pub fn len(&self) -> usize {
        self.targets().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
