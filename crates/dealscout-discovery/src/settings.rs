// Discovery settings
// Layered from built-in defaults, an optional config file and DEALSCOUT__*
// environment variables, with explicit overrides applied last.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use config::{Config, Environment};
use dealscout_client::ClientConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::criteria::{DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_PAGE_SIZE, SearchCriteria};
use crate::error::{Result, ValidationError};
use crate::flag::{FileFlagStore, FreeAnalysisFlag};
use crate::pagination::{
    DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_NARROW_MAX_VISIBLE_PAGES, PaginationOptions,
};

pub const ENV_PREFIX: &str = "DEALSCOUT";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub access_token: Option<String>,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            base_url: client.base_url,
            access_token: client.access_token,
            connect_timeout_ms: client.connect_timeout_ms,
            read_timeout_ms: client.read_timeout_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSettings {
    pub page_size: u32,
    pub search_page_size: u32,
    pub max_visible_pages: u32,
    pub narrow_max_visible_pages: u32,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_page_size: DEFAULT_SEARCH_PAGE_SIZE,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            narrow_max_visible_pages: DEFAULT_NARROW_MAX_VISIBLE_PAGES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub poll_interval_secs: u64,
    /// Where the free-analysis flag is kept; in memory when unset
    pub flag_path: Option<PathBuf>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: crate::analysis::DEFAULT_POLL_INTERVAL.as_secs(),
            flag_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    pub api: ApiSettings,
    pub discovery: ListSettings,
    pub analysis: AnalysisSettings,
}

impl DiscoverySettings {
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_with_overrides(file, &[])
    }

    /// Load settings; `overrides` are `(key, value)` pairs such as
    /// `("api.base_url", "http://localhost:8080")`
    pub fn load_with_overrides(file: Option<&Path>, overrides: &[(String, String)]) -> Result<Self> {
        let env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true);
        Self::load_from(file, env, overrides)
    }

    fn load_from(
        file: Option<&Path>,
        env: Environment,
        overrides: &[(String, String)],
    ) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            debug!(path = %path.display(), "Loading settings file");
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(env);
        for (key, value) in overrides {
            builder = builder.set_override(key.as_str(), value.as_str())?;
        }

        let settings: DiscoverySettings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.discovery.page_size == 0 || self.discovery.search_page_size == 0 {
            return Err(ValidationError::ZeroPageSize.into());
        }
        if self.analysis.poll_interval_secs == 0 {
            return Err(config::ConfigError::Message(
                "analysis.poll_interval_secs must be greater than zero".to_string(),
            )
            .into());
        }
        self.client_config().validate()?;
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.api.base_url)
            .with_timeouts(self.api.connect_timeout_ms, self.api.read_timeout_ms);
        if let Some(token) = self.api.access_token.as_deref().filter(|t| !t.is_empty()) {
            config = config.with_token(token);
        }
        config
    }

    /// Criteria a list view mounts with
    pub fn initial_criteria(&self) -> SearchCriteria {
        SearchCriteria::new(self.discovery.page_size, self.discovery.search_page_size)
    }

    pub fn pagination_options(&self) -> PaginationOptions {
        PaginationOptions {
            max_visible_pages: self.discovery.max_visible_pages,
            narrow_max_visible_pages: self.discovery.narrow_max_visible_pages,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.analysis.poll_interval_secs)
    }

    pub fn free_analysis_flag(&self) -> Result<FreeAnalysisFlag> {
        match &self.analysis.flag_path {
            Some(path) => FreeAnalysisFlag::load(Arc::new(FileFlagStore::new(path))),
            None => Ok(FreeAnalysisFlag::in_memory()),
        }
    }
}
