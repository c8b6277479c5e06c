// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Path → tab label resolution.
//!
//! Static routes carry a fixed label (and optionally own a create-form draft). Entity routes are
//! patterns with a single `:id` segment whose label has to be looked up from the backend.
//! Every other path is untracked and never gets a tab.

use regex::Regex;
use thiserror::Error;

use crate::model::{EntityId, EntityKind};

const ID_SEGMENT: &str = ":id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRoute {
    path: String,
    label: String,
    create_form: Option<EntityKind>,
}

impl StaticRoute {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn create_form(&self) -> Option<EntityKind> {
        self.create_form
    }
}

#[derive(Debug, Clone)]
pub struct EntityRoute {
    pattern: String,
    kind: EntityKind,
    matcher: Regex,
}

impl EntityRoute {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    fn fill(&self, id: &EntityId) -> String {
        self.pattern
            .split('/')
            .map(|segment| if segment == ID_SEGMENT { id.as_str() } else { segment })
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Static { label: String, create_form: Option<EntityKind> },
    Entity { kind: EntityKind, id: EntityId },
    Untracked,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route path must not be empty")]
    EmptyPath,
    #[error("route label for '{path}' must not be empty")]
    EmptyLabel { path: String },
    #[error("route '{path}' is declared twice")]
    DuplicatePath { path: String },
    #[error("entity route '{pattern}' must contain exactly one ':id' segment")]
    IdSegmentCount { pattern: String },
    #[error("entity route '{pattern}' uses unsupported parameter '{param}'")]
    UnsupportedParam { pattern: String, param: String },
    #[error("{kind} already has entity route '{existing}'")]
    DuplicateEntity { kind: EntityKind, existing: String },
    #[error("{kind} already has create route '{existing}'")]
    DuplicateCreateForm { kind: EntityKind, existing: String },
    #[error("entity route '{pattern}' does not compile: {message}")]
    Pattern { pattern: String, message: String },
}

/// The fixed set of trackable routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    home: StaticRoute,
    statics: Vec<StaticRoute>,
    entities: Vec<EntityRoute>,
}

impl RouteTable {
    pub fn new(home_path: &str, home_label: &str) -> Result<Self, RouteError> {
        let home = static_route(home_path, home_label, None)?;
        Ok(Self {
            home,
            statics: Vec::new(),
            entities: Vec::new(),
        })
    }

    /// The desk's built-in navigation map.
    pub fn builtin(home_path: &str, home_label: &str) -> Result<Self, RouteError> {
        let table = Self::new(home_path, home_label)?
            .with_static("/organizations", "Organizations", None)?
            .with_static(
                "/organizations/create",
                "Organization (create)",
                Some(EntityKind::Organization),
            )?
            .with_static("/nomenclature", "Nomenclature", None)?
            .with_static(
                "/nomenclature/create",
                "Nomenclature (create)",
                Some(EntityKind::Nomenclature),
            )?
            .with_static("/contragents", "Counterparties", None)?
            .with_static(
                "/contragents/create",
                "Counterparty (create)",
                Some(EntityKind::Counterparty),
            )?
            .with_static("/references", "References", None)?
            .with_static("/balance-entry-assistant", "Opening balance assistant", None)?
            .with_static("/goods-balance-entry", "Goods opening balances", None)?
            .with_entity("/organizations/:id/edit", EntityKind::Organization)?
            .with_entity("/nomenclature/:id/edit", EntityKind::Nomenclature)?
            .with_entity("/contragents/:id/edit", EntityKind::Counterparty)?;
        Ok(table)
    }

    pub fn with_static(
        mut self,
        path: &str,
        label: &str,
        create_form: Option<EntityKind>,
    ) -> Result<Self, RouteError> {
        let route = static_route(path, label, create_form)?;
        if route.path == self.home.path || self.statics.iter().any(|r| r.path == route.path) {
            return Err(RouteError::DuplicatePath { path: route.path });
        }
        if let Some(kind) = create_form {
            if let Some(existing) = self.create_path(kind) {
                return Err(RouteError::DuplicateCreateForm {
                    kind,
                    existing: existing.to_owned(),
                });
            }
        }
        self.statics.push(route);
        Ok(self)
    }

    pub fn with_entity(mut self, pattern: &str, kind: EntityKind) -> Result<Self, RouteError> {
        if let Some(existing) = self.entities.iter().find(|route| route.kind == kind) {
            return Err(RouteError::DuplicateEntity {
                kind,
                existing: existing.pattern.clone(),
            });
        }
        let pattern = normalize_path(pattern);
        let matcher = compile_pattern(&pattern)?;
        self.entities.push(EntityRoute {
            pattern,
            kind,
            matcher,
        });
        Ok(self)
    }

    pub fn home_path(&self) -> &str {
        &self.home.path
    }

    pub fn home_label(&self) -> &str {
        &self.home.label
    }

    pub fn statics(&self) -> &[StaticRoute] {
        &self.statics
    }

    pub fn entities(&self) -> &[EntityRoute] {
        &self.entities
    }

    pub fn resolve(&self, path: &str) -> RouteMatch {
        let path = normalize_path(path);

        if let Some(route) =
            std::iter::once(&self.home).chain(self.statics.iter()).find(|route| route.path == path)
        {
            return RouteMatch::Static {
                label: route.label.clone(),
                create_form: route.create_form,
            };
        }

        for route in &self.entities {
            let Some(captures) = route.matcher.captures(&path) else {
                continue;
            };
            let Some(raw) = captures.name("id") else {
                continue;
            };
            if let Ok(id) = EntityId::new(raw.as_str()) {
                return RouteMatch::Entity {
                    kind: route.kind,
                    id,
                };
            }
        }

        RouteMatch::Untracked
    }

    pub fn edit_path(&self, kind: EntityKind, id: &EntityId) -> Option<String> {
        self.entities.iter().find(|route| route.kind == kind).map(|route| route.fill(id))
    }

    pub fn create_path(&self, kind: EntityKind) -> Option<&str> {
        self.statics
            .iter()
            .find(|route| route.create_form == Some(kind))
            .map(|route| route.path.as_str())
    }
}

/// Trims whitespace, guarantees a leading `/` and drops trailing `/` (except for the root).
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_owned();
    }
    if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

fn static_route(
    path: &str,
    label: &str,
    create_form: Option<EntityKind>,
) -> Result<StaticRoute, RouteError> {
    if path.trim().is_empty() {
        return Err(RouteError::EmptyPath);
    }
    let path = normalize_path(path);
    let label = label.trim();
    if label.is_empty() {
        return Err(RouteError::EmptyLabel { path });
    }
    Ok(StaticRoute {
        path,
        label: label.to_owned(),
        create_form,
    })
}

fn compile_pattern(pattern: &str) -> Result<Regex, RouteError> {
    let mut source = String::from("^");
    let mut id_segments = 0usize;

    for segment in pattern.split('/').skip(1) {
        source.push('/');
        if segment == ID_SEGMENT {
            id_segments += 1;
            source.push_str("(?P<id>[^/]+)");
        } else if let Some(param) = segment.strip_prefix(':') {
            return Err(RouteError::UnsupportedParam {
                pattern: pattern.to_owned(),
                param: param.to_owned(),
            });
        } else {
            source.push_str(&regex::escape(segment));
        }
    }
    source.push('$');

    if id_segments != 1 {
        return Err(RouteError::IdSegmentCount {
            pattern: pattern.to_owned(),
        });
    }

    Regex::new(&source).map_err(|err| RouteError::Pattern {
        pattern: pattern.to_owned(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests;
