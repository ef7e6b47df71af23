// Command line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dealscout_discovery::criteria::{DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE};
use dealscout_discovery::{FilterKey, FilterValue, PriceRange, SearchCriteria, SortOption};

#[derive(Parser, Debug)]
#[command(name = "dealscout", version, about = "Browse deals and goals from a DealScout backend")]
pub struct Cli {
    /// Settings file (YAML or TOML)
    #[arg(short = 'c', long = "config", env = "DEALSCOUT_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    #[arg(long = "token", env = "DEALSCOUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Log level when RUST_LOG is not set
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Settings overrides taken from explicit flags
    pub fn overrides(&self) -> Vec<(String, String)> {
        let mut overrides = Vec::new();
        if let Some(url) = &self.base_url {
            overrides.push(("api.base_url".to_string(), url.clone()));
        }
        if let Some(token) = &self.token {
            overrides.push(("api.access_token".to_string(), token.clone()));
        }
        overrides
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List deals
    Deals(ListArgs),
    /// List goals
    Goals(ListArgs),
    /// Run or resume the AI analysis of a deal
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Free-text search; shows all matches on one page
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,

    #[arg(long = "category")]
    pub category: Option<String>,

    #[arg(long = "status")]
    pub status: Option<String>,

    #[arg(long = "priority")]
    pub priority: Option<String>,

    #[arg(long = "min-price")]
    pub min_price: Option<f64>,

    #[arg(long = "max-price")]
    pub max_price: Option<f64>,

    /// newest, oldest, price-asc, price-desc, title-asc or title-desc
    #[arg(long = "sort", default_value = "newest")]
    pub sort: SortOption,

    #[arg(short = 'p', long = "page", default_value_t = 1)]
    pub page: u32,

    /// Render the page strip for a narrow viewport
    #[arg(long = "narrow")]
    pub narrow: bool,
}

impl ListArgs {
    /// Price range from the flags; enabled when either bound is given
    pub fn price_range(&self) -> PriceRange {
        if self.min_price.is_none() && self.max_price.is_none() {
            return PriceRange::default();
        }
        PriceRange::enabled(
            self.min_price.unwrap_or(DEFAULT_MIN_PRICE),
            self.max_price.unwrap_or(DEFAULT_MAX_PRICE),
        )
    }

    /// Write the filter flags into a draft
    pub fn stage(&self, draft: &mut SearchCriteria) {
        let filters = [
            (FilterKey::Category, &self.category),
            (FilterKey::Status, &self.status),
            (FilterKey::Priority, &self.priority),
        ];
        for (key, value) in filters {
            let value = value
                .as_deref()
                .map(FilterValue::parse)
                .unwrap_or_default();
            draft.set_filter(key, value);
        }
        draft.price_range = self.price_range();
    }

    /// Criteria for the first and only request of a run
    pub fn criteria(&self, base: SearchCriteria) -> SearchCriteria {
        let mut criteria = base;
        self.stage(&mut criteria);
        criteria.sort = self.sort.sort();
        match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                criteria.free_text = query.to_string();
                criteria.page = 1;
            }
            _ => criteria.page = self.page,
        }
        criteria
    }
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    pub deal_id: String,

    /// Give up waiting after this many seconds
    #[arg(long = "timeout-secs", default_value_t = 300)]
    pub timeout_secs: u64,
}
