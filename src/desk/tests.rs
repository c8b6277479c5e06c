// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use serde_json::json;

use crate::backend::{BackendError, BackendOp, MemoryBackend};
use crate::drafts::DraftTarget;
use crate::model::{EntityId, EntityKind, FieldValue, Tab};
use crate::routes::RouteTable;

use super::{Desk, DeskError, NoticeLevel};

const IVANOV: &str = "/organizations/7/edit";
const HORNS: &str = "/organizations/8/edit";

fn demo_desk() -> (Desk, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::demo());
    let routes = RouteTable::builtin("/", "Start").expect("routes");
    (Desk::new(routes, backend.clone()), backend)
}

fn id(raw: &str) -> EntityId {
    EntityId::new(raw).expect("entity id")
}

fn labels(tabs: &[Tab]) -> Vec<(&str, &str)> {
    tabs.iter().map(|tab| (tab.path(), tab.label())).collect()
}

fn server_error() -> BackendError {
    BackendError::Status {
        status: 500,
        body: "boom".to_owned(),
    }
}

#[tokio::test]
async fn lookup_labels_tab_and_seeds_draft() {
    let (desk, _) = demo_desk();
    let nav = desk.navigate(IVANOV).await;
    assert!(nav.lookup.is_some());
    desk.settle().await;

    assert_eq!(labels(&desk.tabs().await), [("/", "Start"), (IVANOV, "Ivanov I. I.")]);
    let view = desk.draft(IVANOV).await.expect("seeded draft");
    assert_eq!(view.rev, 0);
    assert_eq!(view.draft.field("last_name"), Some(FieldValue::from("Ivanov")));
}

#[tokio::test]
async fn late_lookup_for_abandoned_page_is_dropped() {
    let (desk, backend) = demo_desk();
    let gate = backend.gate(BackendOp::Fetch, EntityKind::Organization, &id("7")).await;

    desk.navigate(IVANOV).await;
    desk.navigate(HORNS).await;
    gate.release();
    desk.settle().await;

    assert_eq!(labels(&desk.tabs().await), [("/", "Start"), (HORNS, "Horns and Hooves")]);
    assert!(desk.draft(IVANOV).await.is_none());
    assert!(desk.draft(HORNS).await.is_some());
}

#[tokio::test]
async fn failed_lookup_falls_back_to_id_label() {
    let (desk, backend) = demo_desk();
    backend.fail(BackendOp::Fetch, server_error()).await;

    desk.navigate(IVANOV).await;
    desk.settle().await;

    assert_eq!(labels(&desk.tabs().await), [("/", "Start"), (IVANOV, "Organization #7")]);
    assert!(desk.draft(IVANOV).await.is_none());
}

#[tokio::test]
async fn missing_record_falls_back_to_id_label() {
    let (desk, _) = demo_desk();
    desk.navigate("/contragents/404/edit").await;
    desk.settle().await;

    let active = desk.active_tab().await.expect("active tab");
    assert_eq!(active.label(), "Counterparty #404");
}

#[tokio::test]
async fn edit_draft_needs_a_reachable_page() {
    let (desk, _) = demo_desk();
    let err = desk.get_or_init_edit(EntityKind::Organization, &id("7")).await.unwrap_err();
    assert!(matches!(err, DeskError::NotOpen(path) if path == IVANOV));
}

#[tokio::test]
async fn failed_snapshot_fetch_starts_empty() {
    let (desk, backend) = demo_desk();
    backend.fail(BackendOp::Fetch, server_error()).await;
    desk.navigate(IVANOV).await;
    desk.settle().await;

    let view = desk.get_or_init_edit(EntityKind::Organization, &id("7")).await.unwrap();
    assert_eq!(view.draft.display_name(), "<not filled>");
}

#[tokio::test]
async fn save_writes_and_closes() {
    let (desk, backend) = demo_desk();
    desk.navigate(IVANOV).await;
    desk.settle().await;

    assert_eq!(desk.update_active("prefix", "AB".into()).await.unwrap(), 1);
    let saved = desk.commit_active().await.unwrap();
    assert!(saved.closed);
    assert_eq!(saved.record["prefix"], json!("AB"));

    assert_eq!(labels(&desk.tabs().await), [("/", "Start")]);
    assert_eq!(desk.location().await, "/");
    assert!(desk.draft(IVANOV).await.is_none());
    let stored = backend.record(EntityKind::Organization, &id("7")).await.unwrap();
    assert_eq!(stored["prefix"], json!("AB"));
    assert_eq!(stored["name"], json!("Ivanov Ivan Ivanovich"));

    let notices = desk.take_notices().await;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Info);
    assert!(desk.take_notices().await.is_empty());
}

#[tokio::test]
async fn failed_save_keeps_draft_and_tab() {
    let (desk, backend) = demo_desk();
    backend.fail(BackendOp::Update, server_error()).await;
    desk.navigate(IVANOV).await;
    desk.settle().await;
    desk.update_active("inn", "7701".into()).await.unwrap();

    let err = desk.commit_active().await.unwrap_err();
    assert!(matches!(err, DeskError::Backend(BackendError::Status { status: 500, .. })));
    assert_eq!(desk.tabs().await.len(), 2);
    let view = desk.draft(IVANOV).await.expect("draft kept");
    assert_eq!(view.draft.field("inn"), Some(FieldValue::from("7701")));

    let notices = desk.take_notices().await;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
}

#[tokio::test]
async fn create_flow_adds_the_record() {
    let (desk, backend) = demo_desk();
    desk.navigate("/organizations").await;
    desk.navigate("/organizations/create").await;

    let target = DraftTarget::create(EntityKind::Organization);
    let view = desk.get_or_init_create(EntityKind::Organization).await.unwrap();
    assert_eq!(view.rev, 0);
    desk.update_field(&target, "type", "Legal entity".into()).await.unwrap();
    desk.update_field(&target, "name", "Acme".into()).await.unwrap();

    let saved = desk.commit(&target).await.unwrap();
    let created = EntityId::from_json(&saved.record["id"]).unwrap();
    let stored = backend.record(EntityKind::Organization, &created).await.unwrap();
    assert_eq!(stored["name"], json!("Acme"));
    assert_eq!(stored["type"], json!("LEGAL"));
    assert_eq!(desk.location().await, "/organizations");
    assert!(desk.draft("/organizations/create").await.is_none());
    assert!(desk.listing(EntityKind::Organization).await.iter().any(|row| row.id == created));
}

#[tokio::test]
async fn update_outside_a_form_is_rejected() {
    let (desk, _) = demo_desk();
    desk.navigate("/references").await;
    let err = desk.update_active("name", "x".into()).await.unwrap_err();
    assert!(matches!(err, DeskError::NoDraft(path) if path == "/references"));

    desk.navigate("/organizations/create").await;
    let err = desk.update_active("colour", "red".into()).await.unwrap_err();
    assert!(matches!(err, DeskError::Field(_)));
}

#[tokio::test]
async fn delete_removes_row_tab_and_draft() {
    let (desk, _) = demo_desk();
    assert_eq!(desk.refresh_list(EntityKind::Organization).await.unwrap().len(), 2);
    desk.open_row(EntityKind::Organization, &id("7")).await.unwrap();
    desk.settle().await;
    assert_eq!(desk.tabs().await.len(), 2);

    desk.delete_entity(EntityKind::Organization, &id("7")).await.unwrap();
    let rows = desk.listing(EntityKind::Organization).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Horns and Hooves");
    assert_eq!(labels(&desk.tabs().await), [("/", "Start")]);
    assert!(desk.with_session(|session| session.drafts().is_empty()).await);
}

#[tokio::test]
async fn failed_delete_leaves_listing_alone() {
    let (desk, backend) = demo_desk();
    desk.refresh_list(EntityKind::Organization).await.unwrap();
    backend.fail(BackendOp::Delete, server_error()).await;

    assert!(desk.delete_entity(EntityKind::Organization, &id("7")).await.is_err());
    assert_eq!(desk.listing(EntityKind::Organization).await.len(), 2);
    assert_eq!(desk.take_notices().await[0].level, NoticeLevel::Error);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_rows() {
    let (desk, backend) = demo_desk();
    desk.refresh_list(EntityKind::Nomenclature).await.unwrap();
    backend.fail(BackendOp::List, server_error()).await;

    assert!(desk.refresh_list(EntityKind::Nomenclature).await.is_err());
    let rows = desk.listing(EntityKind::Nomenclature).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Hex bolt M8");
}

#[tokio::test]
async fn edits_before_the_title_resolves_survive_leaving() {
    let (desk, _) = demo_desk();
    desk.navigate(IVANOV).await;
    assert_eq!(desk.update_active("prefix", "AB".into()).await.unwrap(), 1);

    desk.navigate("/organizations").await;
    desk.settle().await;

    assert_eq!(
        labels(&desk.tabs().await),
        [("/", "Start"), (IVANOV, "Ivanov I. I."), ("/organizations", "Organizations")]
    );
    let view = desk.draft(IVANOV).await.expect("edits kept");
    assert_eq!(view.rev, 1);
    assert_eq!(view.draft.field("prefix"), Some(FieldValue::from("AB")));
}

#[tokio::test]
async fn edits_during_a_save_keep_draft_and_tab() {
    let (desk, backend) = demo_desk();
    desk.navigate(IVANOV).await;
    desk.settle().await;
    desk.update_active("prefix", "AB".into()).await.unwrap();

    let gate = backend.gate(BackendOp::Update, EntityKind::Organization, &id("7")).await;
    let saving = tokio::spawn({
        let desk = desk.clone();
        async move { desk.commit_active().await }
    });
    while backend.calls(BackendOp::Update).await == 0 {
        tokio::task::yield_now().await;
    }

    assert_eq!(desk.update_active("inn", "7702".into()).await.unwrap(), 2);
    gate.release();
    let saved = saving.await.expect("save task").expect("save");

    assert!(!saved.closed);
    assert_eq!(saved.record["prefix"], json!("AB"));
    assert_eq!(labels(&desk.tabs().await), [("/", "Start"), (IVANOV, "Ivanov I. I.")]);
    let view = desk.draft(IVANOV).await.expect("draft kept");
    assert_eq!(view.rev, 2);
    assert_eq!(view.draft.field("inn"), Some(FieldValue::from("7702")));

    let notices = desk.take_notices().await;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Info);
    assert!(notices[0].message.contains("newer edits are still open"), "{}", notices[0]);
}

#[tokio::test]
async fn finished_lookups_are_not_retained() {
    let (desk, _) = demo_desk();
    desk.navigate(IVANOV).await;
    while desk.active_tab().await.is_none() {
        tokio::task::yield_now().await;
    }

    desk.navigate(HORNS).await;
    assert_eq!(desk.pending_lookups().await, 1);
    desk.settle().await;
    assert_eq!(desk.pending_lookups().await, 0);
}
