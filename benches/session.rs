// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use ledgerdesk::drafts::DraftTarget;
use ledgerdesk::model::{EntityId, EntityKind, FieldValue, Tab};
use ledgerdesk::nav::LookupOutcome;
use ledgerdesk::routes::RouteTable;
use ledgerdesk::session::DeskSession;
use ledgerdesk::tabs::TabRegistry;

const TAB_COUNT: usize = 64;

fn edit_paths(count: usize) -> Vec<String> {
    (1..=count).map(|id| format!("/organizations/{id}/edit")).collect()
}

/// Opens `count` edit tabs, resolving every label lookup, and edits one field of each draft.
fn populated_session(routes: &RouteTable, count: usize) -> DeskSession {
    let mut session = DeskSession::new(routes.clone());
    for (index, path) in edit_paths(count).iter().enumerate() {
        let nav = session.navigate(path);
        if let Some(ticket) = nav.lookup {
            session.complete_lookup(&ticket, LookupOutcome::Resolved(format!("Org {index}")));
        }
        let id = EntityId::new((index + 1).to_string()).expect("id");
        let target = DraftTarget::edit(EntityKind::Organization, id);
        session.drafts_mut().get_or_init(&target, None);
        session.drafts_mut().update(&target, "inn", FieldValue::from("7701")).expect("update");
    }
    session
}

// Benchmark identity (keep stable):
// - Group names: `tabs.registry`, `session.navigation`
// - Case IDs after the `/` stay stable so results remain comparable across refactors.
fn benches_tabs(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabs.registry");
    let paths = edit_paths(TAB_COUNT);

    group.bench_function("open_close_64", |b| {
        b.iter(|| {
            let mut tabs = TabRegistry::new(Tab::new("Start", "/"));
            for path in &paths {
                tabs.open("Org", path.as_str());
            }
            for path in paths.iter().rev() {
                black_box(tabs.close(path));
            }
            black_box(tabs.rev())
        })
    });
    group.finish();
}

fn benches_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session.navigation");
    let routes = RouteTable::builtin("/", "Start").expect("routes");

    group.bench_function("navigate_resolve_64", |b| {
        b.iter(|| black_box(populated_session(black_box(&routes), TAB_COUNT).epoch()))
    });

    let paths = edit_paths(TAB_COUNT);
    group.bench_function("close_active_64", |b| {
        b.iter_batched_ref(
            || populated_session(&routes, TAB_COUNT),
            |session| {
                for path in paths.iter().rev() {
                    black_box(session.close(path));
                }
                black_box(session.drafts().len())
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, benches_tabs, benches_session);
criterion_main!(benches);
