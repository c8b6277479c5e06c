// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use crate::model::{EntityId, EntityKind};

use super::{normalize_path, RouteError, RouteMatch, RouteTable};

#[fixture]
fn table() -> RouteTable {
    RouteTable::builtin("/", "Start").expect("builtin routes")
}

fn id(raw: &str) -> EntityId {
    EntityId::new(raw).expect("entity id")
}

#[rstest]
#[case("/", "Start", None)]
#[case("/organizations", "Organizations", None)]
#[case("/organizations/create", "Organization (create)", Some(EntityKind::Organization))]
#[case("/nomenclature/create/", "Nomenclature (create)", Some(EntityKind::Nomenclature))]
#[case("  /references ", "References", None)]
#[case("/goods-balance-entry", "Goods opening balances", None)]
fn static_routes_resolve_to_their_label(
    table: RouteTable,
    #[case] path: &str,
    #[case] label: &str,
    #[case] create_form: Option<EntityKind>,
) {
    assert_eq!(
        table.resolve(path),
        RouteMatch::Static {
            label: label.to_owned(),
            create_form,
        }
    );
}

#[rstest]
#[case("/organizations/7/edit", EntityKind::Organization, "7")]
#[case("/nomenclature/abc-1/edit", EntityKind::Nomenclature, "abc-1")]
#[case("/contragents/42/edit/", EntityKind::Counterparty, "42")]
fn entity_routes_capture_the_id(
    table: RouteTable,
    #[case] path: &str,
    #[case] kind: EntityKind,
    #[case] raw_id: &str,
) {
    assert_eq!(
        table.resolve(path),
        RouteMatch::Entity {
            kind,
            id: id(raw_id),
        }
    );
}

#[rstest]
#[case("/main")]
#[case("/organizations/7")]
#[case("/organizations/7/edit/extra")]
#[case("/organizations//edit")]
#[case("/unknown")]
fn other_paths_are_untracked(table: RouteTable, #[case] path: &str) {
    assert_eq!(table.resolve(path), RouteMatch::Untracked);
}

#[rstest]
fn owner_paths_are_built_from_the_table(table: RouteTable) {
    assert_eq!(
        table.edit_path(EntityKind::Organization, &id("7")).as_deref(),
        Some("/organizations/7/edit")
    );
    assert_eq!(table.create_path(EntityKind::Counterparty), Some("/contragents/create"));

    let bare = RouteTable::new("/", "Start").expect("table");
    assert_eq!(bare.edit_path(EntityKind::Organization, &id("7")), None);
    assert_eq!(bare.create_path(EntityKind::Organization), None);
}

#[test]
fn pattern_literals_are_escaped() {
    let table = RouteTable::new("/", "Start")
        .and_then(|table| table.with_entity("/org.v2/:id/edit", EntityKind::Organization))
        .expect("table");

    assert!(matches!(table.resolve("/org.v2/1/edit"), RouteMatch::Entity { .. }));
    assert_eq!(table.resolve("/orgXv2/1/edit"), RouteMatch::Untracked);
}

#[rstest]
#[case(
    "/organizations/edit",
    RouteError::IdSegmentCount {
        pattern: "/organizations/edit".to_owned(),
    }
)]
#[case("/a/:id/:id", RouteError::IdSegmentCount { pattern: "/a/:id/:id".to_owned() })]
#[case(
    "/a/:slug/edit",
    RouteError::UnsupportedParam {
        pattern: "/a/:slug/edit".to_owned(),
        param: "slug".to_owned(),
    }
)]
fn bad_entity_patterns_are_rejected(#[case] pattern: &str, #[case] expected: RouteError) {
    let err = RouteTable::new("/", "Start")
        .and_then(|table| table.with_entity(pattern, EntityKind::Nomenclature))
        .unwrap_err();
    assert_eq!(err, expected);
}

#[test]
fn duplicate_and_empty_routes_are_rejected() {
    assert_eq!(RouteTable::new("  ", "Start").unwrap_err(), RouteError::EmptyPath);
    assert_eq!(
        RouteTable::new("/", " ").unwrap_err(),
        RouteError::EmptyLabel {
            path: "/".to_owned(),
        }
    );

    let err = RouteTable::new("/", "Start")
        .and_then(|table| table.with_static("/", "Again", None))
        .unwrap_err();
    assert_eq!(
        err,
        RouteError::DuplicatePath {
            path: "/".to_owned(),
        }
    );

    let err = RouteTable::new("/", "Start")
        .and_then(|table| table.with_static("/a", "A", Some(EntityKind::Organization)))
        .and_then(|table| table.with_static("/b", "B", Some(EntityKind::Organization)))
        .unwrap_err();
    assert!(matches!(err, RouteError::DuplicateCreateForm { existing, .. } if existing == "/a"));
}

#[rstest]
#[case("", "/")]
#[case("/", "/")]
#[case("///", "/")]
#[case("organizations", "/organizations")]
#[case(" /organizations/ ", "/organizations")]
fn normalize_path_cases(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_path(input), expected);
}
