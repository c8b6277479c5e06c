// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ledgerdesk: tabbed editing sessions for an accounting desk.
//!
//! [`session::DeskSession`] owns the synchronous core (tabs, history, drafts and the
//! close/navigate state machine). [`desk::Desk`] shares it with a [`backend::Backend`] and the
//! line [`shell`].

pub mod backend;
pub mod config;
pub mod desk;
pub mod drafts;
pub mod model;
pub mod nav;
pub mod routes;
pub mod session;
pub mod shell;
pub mod tabs;
