// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ordered set of open tabs, unique by path.
//!
//! The first tab is the pinned home tab. It is always present and `close` ignores it.

use crate::model::Tab;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
    rev: u64,
}

impl TabRegistry {
    pub fn new(home: Tab) -> Self {
        Self {
            tabs: vec![home],
            rev: 0,
        }
    }

    /// Bumped on every mutation.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn home(&self) -> &Tab {
        &self.tabs[0]
    }

    pub fn is_home(&self, path: &str) -> bool {
        self.home().path() == path
    }

    /// Appends a tab unless one with `path` is already open. Returns whether the list changed.
    ///
    /// An already-open tab keeps the label it was opened with.
    pub fn open(&mut self, label: impl Into<String>, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        let tab = Tab::new(label, path);
        tracing::debug!(path = tab.path(), label = tab.label(), "tab opened");
        self.tabs.push(tab);
        self.rev = self.rev.wrapping_add(1);
        true
    }

    /// Removes the tab with `path`. Unknown paths and the home tab are no-ops.
    pub fn close(&mut self, path: &str) -> Option<Tab> {
        if self.is_home(path) {
            tracing::debug!(path, "home tab cannot be closed");
            return None;
        }
        let index = self.tabs.iter().position(|tab| tab.path() == path)?;
        let tab = self.tabs.remove(index);
        tracing::debug!(path, "tab closed");
        self.rev = self.rev.wrapping_add(1);
        Some(tab)
    }

    pub fn list(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn get(&self, path: &str) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.path() == path)
    }

    /// Fallback target after closing the active tab.
    pub fn last(&self) -> &Tab {
        self.tabs.last().unwrap_or_else(|| self.home())
    }

    /// The tab whose path equals the current location, if any.
    pub fn active(&self, location: &str) -> Option<&Tab> {
        self.get(location)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
