// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-process backend for `--demo` and tests.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tokio::sync::{watch, Mutex};

use super::{Backend, BackendError};
use crate::model::{EntityId, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOp {
    Fetch,
    List,
    Create,
    Update,
    Delete,
}

/// Holds back one kind of call on one record until released (or dropped).
#[derive(Debug)]
pub struct CallGate {
    open: watch::Sender<bool>,
}

impl CallGate {
    pub fn release(self) {
        let _ = self.open.send(true);
    }
}

#[derive(Debug, Default)]
struct Store {
    records: BTreeMap<EntityKind, BTreeMap<u64, Map<String, Value>>>,
    next_id: u64,
    failures: HashMap<BackendOp, BackendError>,
    gates: HashMap<(BackendOp, EntityKind, EntityId), watch::Receiver<bool>>,
    calls: HashMap<BackendOp, usize>,
}

impl Store {
    fn enter(&mut self, op: BackendOp) -> Result<(), BackendError> {
        *self.calls.entry(op).or_default() += 1;
        match self.failures.get(&op) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Counts the call and hands out the gate it has to wait for, if any.
    fn enter_record(
        &mut self,
        op: BackendOp,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<Option<watch::Receiver<bool>>, BackendError> {
        self.enter(op)?;
        Ok(self.gates.get(&(op, kind, id.clone())).cloned())
    }

    fn insert(&mut self, kind: EntityKind, body: &Value) -> (u64, Value) {
        self.next_id += 1;
        let id = self.next_id;
        let mut record = body.as_object().cloned().unwrap_or_default();
        record.insert("id".to_owned(), Value::from(id));
        self.records.entry(kind).or_default().insert(id, record.clone());
        (id, Value::Object(record))
    }

    fn record_mut(
        &mut self,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<&mut Map<String, Value>, BackendError> {
        let not_found = || BackendError::not_found(kind, id);
        let key = id.as_str().parse::<u64>().map_err(|_| not_found())?;
        self.records
            .get_mut(&kind)
            .and_then(|records| records.get_mut(&key))
            .ok_or_else(not_found)
    }
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: Mutex<Store>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small data set for trying the desk without a server.
    pub fn demo() -> Self {
        let mut store = Store {
            next_id: 6,
            ..Store::default()
        };
        for (kind, record) in [
            (
                EntityKind::Organization,
                json!({
                    "type": "PHYSICAL",
                    "physicalType": "SELF_EMPLOYED",
                    "lastName": "Ivanov",
                    "firstName": "Ivan",
                    "middleName": "Ivanovich",
                    "name": "Ivanov Ivan Ivanovich",
                    "inn": "770100000001",
                    "taxation": "PROFESSIONAL_INCOME",
                }),
            ),
            (
                EntityKind::Organization,
                json!({
                    "type": "LEGAL",
                    "name": "Horns and Hooves",
                    "prefix": "LLC",
                    "inn": "7701000002",
                    "taxation": "GENERAL",
                }),
            ),
            (
                EntityKind::Nomenclature,
                json!({
                    "type": "Goods",
                    "name": "Hex bolt M8",
                    "fullName": "Hex bolt M8x40, zinc",
                }),
            ),
            (
                EntityKind::Counterparty,
                json!({
                    "docName": "Sunrise Trading LLC",
                    "programName": "Sunrise",
                    "inn": "7701000003",
                }),
            ),
        ] {
            store.insert(kind, &record);
        }
        Self {
            store: Mutex::new(store),
        }
    }

    /// Stores `record` under a fresh id.
    pub async fn insert(&self, kind: EntityKind, record: Value) -> EntityId {
        let (id, _) = self.store.lock().await.insert(kind, &record);
        EntityId::from(id)
    }

    /// Makes every call of `op` fail with `error` until [`MemoryBackend::recover`].
    pub async fn fail(&self, op: BackendOp, error: BackendError) {
        self.store.lock().await.failures.insert(op, error);
    }

    pub async fn recover(&self, op: BackendOp) {
        self.store.lock().await.failures.remove(&op);
    }

    pub async fn calls(&self, op: BackendOp) -> usize {
        self.store.lock().await.calls.get(&op).copied().unwrap_or_default()
    }

    pub async fn record(&self, kind: EntityKind, id: &EntityId) -> Option<Value> {
        let mut store = self.store.lock().await;
        store.record_mut(kind, id).ok().map(|record| Value::Object(record.clone()))
    }

    /// Holds `op` calls on `kind`/`id` until the returned gate is released. Only fetch, update
    /// and delete address a single record and can be gated.
    pub async fn gate(&self, op: BackendOp, kind: EntityKind, id: &EntityId) -> CallGate {
        let (open, gate) = watch::channel(false);
        self.store.lock().await.gates.insert((op, kind, id.clone()), gate);
        CallGate { open }
    }

    async fn pass(
        &self,
        op: BackendOp,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<(), BackendError> {
        let gate = self.store.lock().await.enter_record(op, kind, id)?;
        if let Some(mut gate) = gate {
            // A dropped gate opens too.
            let _ = gate.wait_for(|open| *open).await;
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn fetch(&self, kind: EntityKind, id: &EntityId) -> Result<Value, BackendError> {
        self.pass(BackendOp::Fetch, kind, id).await?;
        let mut store = self.store.lock().await;
        store.record_mut(kind, id).map(|record| Value::Object(record.clone()))
    }

    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, BackendError> {
        let mut store = self.store.lock().await;
        store.enter(BackendOp::List)?;
        Ok(store
            .records
            .get(&kind)
            .map(|records| records.values().cloned().map(Value::Object).collect())
            .unwrap_or_default())
    }

    async fn create(&self, kind: EntityKind, body: &Value) -> Result<Value, BackendError> {
        let mut store = self.store.lock().await;
        store.enter(BackendOp::Create)?;
        Ok(store.insert(kind, body).1)
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &EntityId,
        body: &Value,
    ) -> Result<Value, BackendError> {
        self.pass(BackendOp::Update, kind, id).await?;
        let mut store = self.store.lock().await;
        let record = store.record_mut(kind, id)?;
        if let Some(fields) = body.as_object() {
            for (key, value) in fields {
                if key != "id" {
                    record.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(Value::Object(record.clone()))
    }

    async fn delete(&self, kind: EntityKind, id: &EntityId) -> Result<(), BackendError> {
        self.pass(BackendOp::Delete, kind, id).await?;
        let mut store = self.store.lock().await;
        store.record_mut(kind, id)?;
        let key = id.as_str().parse::<u64>().ok();
        if let (Some(key), Some(records)) = (key, store.records.get_mut(&kind)) {
            records.remove(&key);
        }
        Ok(())
    }
}
