// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

use super::{Backend, BackendError};
use crate::model::{EntityId, EntityKind};

/// JSON-over-HTTP backend rooted at `base_url` (e.g. `http://localhost:4000/api`).
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build().map_err(|error| {
            BackendError::Transport(format!("failed to build HTTP client: {error}"))
        })?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, kind: EntityKind, id: Option<&EntityId>) -> String {
        let base = self.base_url.trim_end_matches('/');
        match id {
            Some(id) => format!("{base}/{}/{id}", kind.collection()),
            None => format!("{base}/{}", kind.collection()),
        }
    }

    async fn send(
        &self,
        request: RequestBuilder,
        resource: String,
    ) -> Result<String, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|error| BackendError::Transport(error.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| BackendError::Transport(format!("response read failed: {error}")))?;

        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound { resource });
        }
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn request_json(
        &self,
        request: RequestBuilder,
        resource: String,
    ) -> Result<Value, BackendError> {
        let body = self.send(request, resource).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|error| BackendError::Decode(error.to_string()))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch(&self, kind: EntityKind, id: &EntityId) -> Result<Value, BackendError> {
        let request = self.client.get(self.endpoint(kind, Some(id)));
        self.request_json(request, format!("{kind} {id}")).await
    }

    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, BackendError> {
        let request = self.client.get(self.endpoint(kind, None));
        match self.request_json(request, kind.collection().to_owned()).await? {
            Value::Array(records) => Ok(records),
            other => Err(BackendError::Decode(format!(
                "expected a list of {kind} records, got {other}"
            ))),
        }
    }

    async fn create(&self, kind: EntityKind, body: &Value) -> Result<Value, BackendError> {
        let request = self.client.post(self.endpoint(kind, None)).json(body);
        self.request_json(request, kind.collection().to_owned()).await
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &EntityId,
        body: &Value,
    ) -> Result<Value, BackendError> {
        let request = self.client.put(self.endpoint(kind, Some(id))).json(body);
        self.request_json(request, format!("{kind} {id}")).await
    }

    async fn delete(&self, kind: EntityKind, id: &EntityId) -> Result<(), BackendError> {
        let request = self.client.delete(self.endpoint(kind, Some(id)));
        self.send(request, format!("{kind} {id}")).await.map(|_| ())
    }
}
