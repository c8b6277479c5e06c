// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! TOML configuration.
//!
//! Every key is optional. Without `[[routes]]` and `[[entity_routes]]` the built-in route table
//! is used; declaring either replaces it completely.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::EntityKind;
use crate::routes::{RouteError, RouteTable};

pub const ENV_LEDGERDESK_CONFIG: &str = "LEDGERDESK_CONFIG";
pub const ENV_LEDGERDESK_BACKEND_URL: &str = "LEDGERDESK_BACKEND_URL";

const DEFAULT_BACKEND_URL: &str = "http://localhost:4000/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;
const DEFAULT_HOME_PATH: &str = "/";
const DEFAULT_HOME_LABEL: &str = "Start";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config {origin}: {message}")]
    Parse { origin: String, message: String },
    #[error("{0} contained invalid UTF-8")]
    InvalidEnv(&'static str),
    #[error("backend.request_timeout_secs must be greater than zero")]
    ZeroTimeout,
    #[error("backend.base_url must not be empty")]
    EmptyBackendUrl,
    #[error(transparent)]
    Routes(#[from] RouteError),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeskConfig {
    #[serde(default)]
    pub backend: BackendConfigToml,
    #[serde(default)]
    pub tabs: TabsConfigToml,
    #[serde(default)]
    pub routes: Vec<StaticRouteToml>,
    #[serde(default)]
    pub entity_routes: Vec<EntityRouteToml>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfigToml {
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfigToml {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabsConfigToml {
    #[serde(default = "default_home_path")]
    pub home_path: String,
    #[serde(default = "default_home_label")]
    pub home_label: String,
}

impl Default for TabsConfigToml {
    fn default() -> Self {
        Self {
            home_path: default_home_path(),
            home_label: default_home_label(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaticRouteToml {
    pub path: String,
    pub label: String,
    /// Marks the page as the create form of this entity kind.
    #[serde(default)]
    pub create_form: Option<EntityKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityRouteToml {
    pub pattern: String,
    pub kind: EntityKind,
}

impl DeskConfig {
    pub fn from_toml_str(raw: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|err| ConfigError::Parse {
            origin: origin.to_owned(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read {
                path: path.to_owned(),
                source,
            })?;
        Self::from_toml_str(&raw, &path.display().to_string())
    }

    /// Loads `path`, else the file named by `LEDGERDESK_CONFIG`, else the defaults; then applies
    /// `LEDGERDESK_BACKEND_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => config_path_from_env()?,
        };
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::default(),
        };
        if let Some(url) = read_env(ENV_LEDGERDESK_BACKEND_URL)? {
            config.backend.base_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.request_timeout_secs)
    }

    pub fn route_table(&self) -> Result<RouteTable, ConfigError> {
        let tabs = &self.tabs;
        if self.routes.is_empty() && self.entity_routes.is_empty() {
            return Ok(RouteTable::builtin(&tabs.home_path, &tabs.home_label)?);
        }

        let mut table = RouteTable::new(&tabs.home_path, &tabs.home_label)?;
        for route in &self.routes {
            table = table.with_static(&route.path, &route.label, route.create_form)?;
        }
        for route in &self.entity_routes {
            table = table.with_entity(&route.pattern, route.kind)?;
        }
        Ok(table)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBackendUrl);
        }
        self.route_table()?;
        Ok(())
    }
}

fn config_path_from_env() -> Result<Option<PathBuf>, ConfigError> {
    Ok(read_env(ENV_LEDGERDESK_CONFIG)?.map(PathBuf::from))
}

fn read_env(name: &'static str) -> Result<Option<String>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => Ok(Some(raw.trim().to_owned())),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnv(name)),
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_owned()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_home_path() -> String {
    DEFAULT_HOME_PATH.to_owned()
}

fn default_home_label() -> String {
    DEFAULT_HOME_LABEL.to_owned()
}
