// Deal records returned by the deal search endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A matched offer found for one of the user's goals
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Deal {
    /// Percentage saved against the original price, when both prices are known
    pub fn discount_percent(&self) -> Option<f64> {
        match (self.price, self.original_price) {
            (Some(price), Some(original)) if original > 0.0 && price <= original => {
                Some(((original - price) / original * 100.0).round())
            }
            _ => None,
        }
    }
}
