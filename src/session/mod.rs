// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sans-IO navigation state machine.
//!
//! [`DeskSession`] keeps the tab strip, the draft stores and the location history consistent
//! with each other. Every location change bumps the navigation epoch; label lookups for dynamic
//! routes are handed out as [`LookupTicket`]s tagged with that epoch and are discarded on
//! completion if the user has moved on in the meantime.
//!
//! The session never talks to the backend. [`crate::desk::Desk`] runs the lookups and feeds the
//! results back through [`DeskSession::complete_lookup`].

use crate::drafts::{DraftBook, DraftKey, DraftTarget};
use crate::model::Tab;
use crate::nav::{
    CloseOutcome, History, LookupApplied, LookupOutcome, LookupTicket, NavPhase, Navigation,
};
use crate::routes::{normalize_path, RouteMatch, RouteTable};
use crate::tabs::TabRegistry;

#[derive(Debug, Clone)]
pub struct DeskSession {
    routes: RouteTable,
    tabs: TabRegistry,
    drafts: DraftBook,
    history: History,
    epoch: u64,
    // Epoch for which a lookup ticket has already been handed out.
    issued: Option<u64>,
    phase: NavPhase,
}

impl DeskSession {
    /// Starts at the home route with only the home tab open.
    pub fn new(routes: RouteTable) -> Self {
        let tabs = TabRegistry::new(Tab::new(routes.home_label(), routes.home_path()));
        let history = History::new(routes.home_path());
        Self {
            routes,
            tabs,
            drafts: DraftBook::default(),
            history,
            epoch: 0,
            issued: None,
            phase: NavPhase::Idle,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn tabs(&self) -> &TabRegistry {
        &self.tabs
    }

    pub fn drafts(&self) -> &DraftBook {
        &self.drafts
    }

    pub fn drafts_mut(&mut self) -> &mut DraftBook {
        &mut self.drafts
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn location(&self) -> &str {
        self.history.current()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn phase(&self) -> &NavPhase {
        &self.phase
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.active(self.location())
    }

    /// Moves to `path` as a new history entry. Navigating to the current location is a no-op.
    pub fn navigate(&mut self, path: &str) -> Navigation {
        let path = normalize_path(path);
        if path == self.location() {
            return self.stay();
        }
        self.keep_edited_page();
        self.history.push(path);
        self.arrive()
    }

    /// Activates an open tab. Unknown paths and the active tab are no-ops.
    pub fn select(&mut self, path: &str) -> Navigation {
        let path = normalize_path(path);
        if !self.tabs.contains(&path) {
            tracing::debug!(path = %path, "select ignored for unknown tab");
            return self.stay();
        }
        self.navigate(&path)
    }

    pub fn back(&mut self) -> Option<Navigation> {
        if !self.history.can_go_back() {
            return None;
        }
        self.keep_edited_page();
        self.history.back()?;
        Some(self.arrive())
    }

    pub fn forward(&mut self) -> Option<Navigation> {
        if !self.history.can_go_forward() {
            return None;
        }
        self.keep_edited_page();
        self.history.forward()?;
        Some(self.arrive())
    }

    /// Closes the tab at `path` in one transition.
    ///
    /// Drafts owned by the path are disposed before the tab goes away. If the tab was active the
    /// current history entry is replaced by the last remaining tab.
    pub fn close(&mut self, path: &str) -> CloseOutcome {
        let path = normalize_path(path);
        if self.tabs.is_home(&path) || !self.tabs.contains(&path) {
            return CloseOutcome::default();
        }

        self.phase = NavPhase::Closing { path: path.clone() };
        if let Some(target) = self.draft_target(&path) {
            self.drafts.dispose(&target);
        }
        self.tabs.close(&path);

        let mut navigate_to = None;
        if self.location() == path {
            let target = self.tabs.last().path().to_owned();
            self.phase = NavPhase::Navigating {
                target: target.clone(),
            };
            self.history.replace(target.clone());
            self.bump_epoch();
            self.reconcile();
            navigate_to = Some(target);
        }

        self.phase = NavPhase::Idle;
        self.sweep_drafts();
        tracing::info!(path = %path, navigate_to = ?navigate_to, "tab closed");
        CloseOutcome {
            closed: true,
            navigate_to,
        }
    }

    /// Applies a finished label lookup.
    ///
    /// Tickets from an earlier epoch, or for a path that is no longer the location, are dropped.
    /// A failed or empty lookup falls back to the id label. An open tab keeps its label.
    pub fn complete_lookup(
        &mut self,
        ticket: &LookupTicket,
        outcome: LookupOutcome,
    ) -> LookupApplied {
        if !self.is_current(ticket) {
            tracing::debug!(
                path = %ticket.path,
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                "stale label lookup discarded"
            );
            return LookupApplied::Stale;
        }
        if self.tabs.contains(&ticket.path) {
            return LookupApplied::AlreadyOpen;
        }

        let label = match outcome {
            LookupOutcome::Resolved(label) if !label.trim().is_empty() => label.trim().to_owned(),
            LookupOutcome::Resolved(_) | LookupOutcome::Failed => {
                let label = ticket.kind.fallback_label(&ticket.id);
                tracing::warn!(path = %ticket.path, label = %label, "label lookup fell back to id");
                label
            }
        };
        self.tabs.open(label.clone(), ticket.path.clone());
        LookupApplied::Opened { label }
    }

    /// Whether `ticket` still belongs to the current navigation.
    pub fn is_current(&self, ticket: &LookupTicket) -> bool {
        ticket.epoch == self.epoch
            && ticket.path == self.location()
            && self.phase == NavPhase::Idle
    }

    /// A path is reachable while it is the location or has an open tab.
    pub fn is_reachable(&self, path: &str) -> bool {
        path == self.location() || self.tabs.contains(path)
    }

    /// The draft a page at `path` edits, if any.
    pub fn draft_target(&self, path: &str) -> Option<DraftTarget> {
        match self.routes.resolve(path) {
            RouteMatch::Entity { kind, id } => Some(DraftTarget::edit(kind, id)),
            RouteMatch::Static { create_form: Some(kind), .. } => Some(DraftTarget::create(kind)),
            RouteMatch::Static { create_form: None, .. } | RouteMatch::Untracked => None,
        }
    }

    /// The page that owns `target`.
    pub fn owner_path(&self, target: &DraftTarget) -> Option<String> {
        match &target.key {
            DraftKey::Edit(id) => self.routes.edit_path(target.kind, id),
            DraftKey::Create => self.routes.create_path(target.kind).map(str::to_owned),
        }
    }

    /// Disposes every draft whose owning page is neither the location nor an open tab.
    pub fn sweep_drafts(&mut self) -> Vec<DraftTarget> {
        let routes = &self.routes;
        let tabs = &self.tabs;
        let location = self.history.current();
        let removed = self.drafts.retain(|target| {
            let owner = match &target.key {
                DraftKey::Edit(id) => routes.edit_path(target.kind, id),
                DraftKey::Create => routes.create_path(target.kind).map(str::to_owned),
            };
            owner.is_some_and(|owner| owner == location || tabs.contains(&owner))
        });
        if !removed.is_empty() {
            tracing::debug!(count = removed.len(), "unreachable drafts swept");
        }
        removed
    }

    // Leaving an edit page whose title lookup is still pending would sweep its draft. Once the
    // draft holds edits the page gets its tab now, labelled from the draft or the id.
    fn keep_edited_page(&mut self) {
        let location = self.location().to_owned();
        if self.tabs.contains(&location) {
            return;
        }
        let RouteMatch::Entity { kind, id } = self.routes.resolve(&location) else {
            return;
        };
        let label = match self.drafts.get(&DraftTarget::edit(kind, id.clone())) {
            Some(view) if view.rev > 0 => {
                view.draft.tab_label().unwrap_or_else(|| kind.fallback_label(&id))
            }
            _ => return,
        };
        tracing::info!(
            path = %location,
            label = %label,
            "edited page kept before its title resolved"
        );
        self.tabs.open(label, location);
    }

    fn stay(&self) -> Navigation {
        Navigation {
            location: self.location().to_owned(),
            opened: false,
            lookup: None,
        }
    }

    fn bump_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.issued = None;
    }

    fn arrive(&mut self) -> Navigation {
        self.bump_epoch();
        let (opened, lookup) = self.reconcile();
        self.sweep_drafts();
        Navigation {
            location: self.location().to_owned(),
            opened,
            lookup,
        }
    }

    // Brings the tab strip in line with the current location.
    fn reconcile(&mut self) -> (bool, Option<LookupTicket>) {
        let location = self.location().to_owned();
        if matches!(&self.phase, NavPhase::Closing { path } if *path == location) {
            return (false, None);
        }

        match self.routes.resolve(&location) {
            RouteMatch::Static { label, .. } => (self.tabs.open(label, location), None),
            RouteMatch::Entity { kind, id } => {
                if self.tabs.contains(&location) || self.issued == Some(self.epoch) {
                    return (false, None);
                }
                self.issued = Some(self.epoch);
                tracing::debug!(path = %location, epoch = self.epoch, "label lookup issued");
                let ticket = LookupTicket {
                    path: location,
                    epoch: self.epoch,
                    kind,
                    id,
                };
                (false, Some(ticket))
            }
            RouteMatch::Untracked => (false, None),
        }
    }
}
