// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Application state shared with the presentation layer.
//!
//! [`Desk`] wraps a [`DeskSession`] behind an async mutex and performs the backend I/O the
//! session itself stays free of. The lock is never held across a backend call: each operation
//! reads what it needs, releases the lock, awaits the backend, then re-checks the session before
//! applying the result.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::backend::{Backend, BackendError};
use crate::drafts::{AnyDraft, DraftKey, DraftTarget, DraftView};
use crate::model::{EntityId, EntityKind, EntitySummary, FieldError, FieldValue, Tab};
use crate::nav::{CloseOutcome, LookupApplied, LookupOutcome, LookupTicket, Navigation};
use crate::routes::RouteTable;
use crate::session::DeskSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-visible message produced by a background outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Info => write!(f, "{}", self.message),
            NoticeLevel::Error => write!(f, "error: {}", self.message),
        }
    }
}

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("'{0}' is neither the current page nor an open tab")]
    NotOpen(String),
    #[error("nothing is edited at '{0}'")]
    NoDraft(String),
    #[error("no route edits {0} records")]
    NoRoute(EntityKind),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// What a successful save did.
#[derive(Debug, Clone, PartialEq)]
pub struct Saved {
    pub record: Value,
    /// False when the draft changed while the save was in flight and was kept.
    pub closed: bool,
}

#[derive(Debug)]
struct DeskState {
    session: DeskSession,
    listings: BTreeMap<EntityKind, Vec<EntitySummary>>,
    notices: Vec<Notice>,
}

#[derive(Clone)]
pub struct Desk {
    state: Arc<Mutex<DeskState>>,
    backend: Arc<dyn Backend>,
    lookups: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl fmt::Debug for Desk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Desk").finish_non_exhaustive()
    }
}

impl Desk {
    pub fn new(routes: RouteTable, backend: Arc<dyn Backend>) -> Self {
        let state = DeskState {
            session: DeskSession::new(routes),
            listings: BTreeMap::new(),
            notices: Vec::new(),
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            backend,
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Runs `f` against the current session state.
    pub async fn with_session<R>(&self, f: impl FnOnce(&DeskSession) -> R) -> R {
        let state = self.state.lock().await;
        f(&state.session)
    }

    pub async fn tabs(&self) -> Vec<Tab> {
        self.with_session(|session| session.tabs().list().to_vec()).await
    }

    pub async fn location(&self) -> String {
        self.with_session(|session| session.location().to_owned()).await
    }

    pub async fn active_tab(&self) -> Option<Tab> {
        self.with_session(|session| session.active_tab().cloned()).await
    }

    pub async fn navigate(&self, path: &str) -> Navigation {
        let nav = self.state.lock().await.session.navigate(path);
        self.follow(nav).await
    }

    pub async fn select(&self, path: &str) -> Navigation {
        let nav = self.state.lock().await.session.select(path);
        self.follow(nav).await
    }

    pub async fn back(&self) -> Option<Navigation> {
        let nav = self.state.lock().await.session.back()?;
        Some(self.follow(nav).await)
    }

    pub async fn forward(&self) -> Option<Navigation> {
        let nav = self.state.lock().await.session.forward()?;
        Some(self.follow(nav).await)
    }

    pub async fn close(&self, path: &str) -> CloseOutcome {
        self.state.lock().await.session.close(path)
    }

    /// Waits until every label lookup started so far has been applied or discarded.
    pub async fn settle(&self) {
        loop {
            let handles = std::mem::take(&mut *self.lookups.lock().await);
            if handles.is_empty() {
                return;
            }
            for handle in handles {
                if let Err(error) = handle.await {
                    tracing::error!(error = %error, "label lookup task failed");
                }
            }
        }
    }

    /// The edit draft of `kind`/`id`, seeded from the backend on first access.
    ///
    /// A failed fetch seeds an empty draft. The record's edit page must be the current location
    /// or an open tab, both before and after the fetch.
    pub async fn get_or_init_edit(
        &self,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<DraftView, DeskError> {
        let target = DraftTarget::edit(kind, id.clone());
        let path = {
            let state = self.state.lock().await;
            let path = reachable_owner(&state.session, &target)?;
            if let Some(view) = state.session.drafts().get(&target) {
                return Ok(view);
            }
            path
        };

        let snapshot = match self.backend.fetch(kind, id).await {
            Ok(snapshot) => Some(snapshot),
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    path = %path,
                    "snapshot fetch failed; starting empty"
                );
                None
            }
        };

        let mut state = self.state.lock().await;
        if !state.session.is_reachable(&path) {
            return Err(DeskError::NotOpen(path));
        }
        Ok(state.session.drafts_mut().get_or_init(&target, snapshot.as_ref()))
    }

    pub async fn get_or_init_create(&self, kind: EntityKind) -> Result<DraftView, DeskError> {
        let target = DraftTarget::create(kind);
        let mut state = self.state.lock().await;
        reachable_owner(&state.session, &target)?;
        Ok(state.session.drafts_mut().get_or_init(&target, None))
    }

    /// The draft edited by the page at `path`, if one exists.
    pub async fn draft(&self, path: &str) -> Option<DraftView> {
        self.with_session(|session| {
            let target = session.draft_target(path)?;
            session.drafts().get(&target)
        })
        .await
    }

    /// Assigns one field. Returns the draft's new rev.
    pub async fn update_field(
        &self,
        target: &DraftTarget,
        field: &str,
        value: FieldValue,
    ) -> Result<u64, DeskError> {
        if let DraftKey::Edit(id) = &target.key {
            self.get_or_init_edit(target.kind, id).await?;
        }
        let mut state = self.state.lock().await;
        reachable_owner(&state.session, target)?;
        Ok(state.session.drafts_mut().update(target, field, value)?)
    }

    pub async fn update_active(&self, field: &str, value: FieldValue) -> Result<u64, DeskError> {
        let target = self.active_target().await?;
        self.update_field(&target, field, value).await
    }

    /// Saves a draft.
    ///
    /// On success the draft is disposed and its tab closed, unless the draft was edited while
    /// the write was in flight; then both stay. On failure both stay and an error notice is queued.
    pub async fn commit(&self, target: &DraftTarget) -> Result<Saved, DeskError> {
        let (owner, payload, rev, name) = {
            let state = self.state.lock().await;
            let owner = reachable_owner(&state.session, target)?;
            let view = state
                .session
                .drafts()
                .get(target)
                .ok_or_else(|| DeskError::NoDraft(owner.clone()))?;
            (owner, view.draft.to_payload(), view.rev, view.draft.display_name())
        };

        let written = match &target.key {
            DraftKey::Edit(id) => self.backend.update(target.kind, id, &payload).await,
            DraftKey::Create => self.backend.create(target.kind, &payload).await,
        };

        let mut state = self.state.lock().await;
        let record = match written {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(error = %error, draft = %target, "save failed");
                state.notices.push(Notice::error(format!("Could not save {name}: {error}")));
                return Err(error.into());
            }
        };

        if let Some(row) = EntitySummary::from_json(&record) {
            let rows = state.listings.entry(target.kind).or_default();
            match rows.iter_mut().find(|existing| existing.id == row.id) {
                Some(existing) => *existing = row,
                None => rows.push(row),
            }
        }

        let unchanged = state.session.drafts().rev(target).map_or(true, |current| current == rev);
        if unchanged {
            state.session.drafts_mut().dispose(target);
            state.session.close(&owner);
            state.notices.push(Notice::info(format!("Saved {name}")));
            tracing::info!(draft = %target, "saved");
        } else {
            state
                .notices
                .push(Notice::info(format!("Saved {name}; newer edits are still open")));
            tracing::info!(draft = %target, saved_rev = rev, "saved; draft changed during save");
        }
        Ok(Saved {
            record,
            closed: unchanged,
        })
    }

    pub async fn commit_active(&self) -> Result<Saved, DeskError> {
        let target = self.active_target().await?;
        self.commit(&target).await
    }

    /// Reloads the list view of `kind`. Failures leave the previous rows in place.
    pub async fn refresh_list(&self, kind: EntityKind) -> Result<Vec<EntitySummary>, DeskError> {
        let records = self.backend.list(kind).await;
        let mut state = self.state.lock().await;
        match records {
            Ok(records) => {
                let rows = records.iter().filter_map(EntitySummary::from_json).collect::<Vec<_>>();
                state.listings.insert(kind, rows.clone());
                Ok(rows)
            }
            Err(error) => {
                tracing::warn!(error = %error, kind = %kind, "list refresh failed");
                state.notices.push(Notice::error(format!("Could not load {kind} list: {error}")));
                Err(error.into())
            }
        }
    }

    pub async fn listing(&self, kind: EntityKind) -> Vec<EntitySummary> {
        self.state.lock().await.listings.get(&kind).cloned().unwrap_or_default()
    }

    /// Opens the edit page of a record, as a double-click on a list row does.
    pub async fn open_row(&self, kind: EntityKind, id: &EntityId) -> Result<Navigation, DeskError> {
        let path = self
            .with_session(|session| session.routes().edit_path(kind, id))
            .await
            .ok_or(DeskError::NoRoute(kind))?;
        Ok(self.navigate(&path).await)
    }

    /// Deletes a record. The row, its edit tab and its draft go only once the backend agrees.
    pub async fn delete_entity(&self, kind: EntityKind, id: &EntityId) -> Result<(), DeskError> {
        let deleted = self.backend.delete(kind, id).await;
        let mut state = self.state.lock().await;
        if let Err(error) = deleted {
            tracing::warn!(error = %error, kind = %kind, id = %id, "delete failed");
            state.notices.push(Notice::error(format!("Could not delete {kind} {id}: {error}")));
            return Err(error.into());
        }

        if let Some(rows) = state.listings.get_mut(&kind) {
            rows.retain(|row| row.id != *id);
        }
        let target = DraftTarget::edit(kind, id.clone());
        state.session.drafts_mut().dispose(&target);
        if let Some(path) = state.session.owner_path(&target) {
            state.session.close(&path);
        }
        state.notices.push(Notice::info(format!("Deleted {kind} {id}")));
        tracing::info!(kind = %kind, id = %id, "deleted");
        Ok(())
    }

    pub async fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.lock().await.notices)
    }

    async fn active_target(&self) -> Result<DraftTarget, DeskError> {
        self.with_session(|session| {
            let location = session.location();
            session
                .draft_target(location)
                .ok_or_else(|| DeskError::NoDraft(location.to_owned()))
        })
        .await
    }

    async fn follow(&self, nav: Navigation) -> Navigation {
        if let Some(ticket) = nav.lookup.clone() {
            self.spawn_lookup(ticket).await;
        }
        nav
    }

    async fn spawn_lookup(&self, ticket: LookupTicket) {
        let state = Arc::clone(&self.state);
        let backend = Arc::clone(&self.backend);
        let handle = tokio::spawn(async move {
            let fetched = backend.fetch(ticket.kind, &ticket.id).await;
            let outcome = match &fetched {
                Ok(snapshot) => LookupOutcome::Resolved(
                    AnyDraft::from_snapshot(ticket.kind, snapshot).tab_label().unwrap_or_default(),
                ),
                Err(error) => {
                    tracing::warn!(error = %error, path = %ticket.path, "label lookup failed");
                    LookupOutcome::Failed
                }
            };

            let mut state = state.lock().await;
            let applied = state.session.complete_lookup(&ticket, outcome);
            if let (Ok(snapshot), false) = (&fetched, applied == LookupApplied::Stale) {
                let target = DraftTarget::edit(ticket.kind, ticket.id.clone());
                state.session.drafts_mut().seed_from_snapshot(&target, snapshot);
            }
        });
        let mut lookups = self.lookups.lock().await;
        lookups.retain(|lookup| !lookup.is_finished());
        lookups.push(handle);
    }

    #[cfg(test)]
    async fn pending_lookups(&self) -> usize {
        self.lookups.lock().await.len()
    }
}

fn reachable_owner(session: &DeskSession, target: &DraftTarget) -> Result<String, DeskError> {
    let path = session.owner_path(target).ok_or(DeskError::NoRoute(target.kind))?;
    if session.is_reachable(&path) {
        Ok(path)
    } else {
        Err(DeskError::NotOpen(path))
    }
}

#[cfg(test)]
mod tests;
