// Goal records returned by the goal search endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Saved search criteria the backend keeps matching deals against
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub deal_count: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
