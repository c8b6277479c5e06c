// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Navigation primitives shared by the session state machine.

mod history;

use crate::model::{EntityId, EntityKind};

pub use history::History;

/// Where the close transition currently is. Outside of `close` the phase is always `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavPhase {
    #[default]
    Idle,
    Closing {
        path: String,
    },
    Navigating {
        target: String,
    },
}

/// A pending label lookup for a dynamic route.
///
/// The ticket is only honored while `epoch` still equals the session's navigation epoch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupTicket {
    pub path: String,
    pub epoch: u64,
    pub kind: EntityKind,
    pub id: EntityId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The backend produced a label (possibly empty, which falls back to the id label).
    Resolved(String),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupApplied {
    Opened { label: String },
    AlreadyOpen,
    Stale,
}

/// Result of a location change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub location: String,
    pub opened: bool,
    pub lookup: Option<LookupTicket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CloseOutcome {
    pub closed: bool,
    pub navigate_to: Option<String>,
}
