// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! CRUD backend contract.
//!
//! Records travel as raw JSON objects; drafts interpret them. The desk treats every error here as
//! recoverable: lookups fall back, saves and deletes surface a notice.

mod http;
mod memory;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::model::{EntityId, EntityKind};

pub use http::HttpBackend;
pub use memory::{BackendOp, CallGate, MemoryBackend};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("{resource} was not found")]
    NotFound { resource: String },
    #[error("backend answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("backend unreachable: {0}")]
    Transport(String),
    #[error("backend response was malformed: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn not_found(kind: EntityKind, id: &EntityId) -> Self {
        Self::NotFound { resource: format!("{kind} {id}") }
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /<collection>/<id>`
    async fn fetch(&self, kind: EntityKind, id: &EntityId) -> Result<Value, BackendError>;

    /// `GET /<collection>`
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, BackendError>;

    /// `POST /<collection>`; returns the stored record.
    async fn create(&self, kind: EntityKind, body: &Value) -> Result<Value, BackendError>;

    /// `PUT /<collection>/<id>`; returns the stored record.
    async fn update(
        &self,
        kind: EntityKind,
        id: &EntityId,
        body: &Value,
    ) -> Result<Value, BackendError>;

    /// `DELETE /<collection>/<id>`
    async fn delete(&self, kind: EntityKind, id: &EntityId) -> Result<(), BackendError>;
}
