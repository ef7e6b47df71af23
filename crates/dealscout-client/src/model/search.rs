// Search request sent to the list endpoints

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Field a list can be ordered by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    Price,
    Title,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::Price => "price",
            SortField::Title => "title",
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortField::CreatedAt),
            "price" => Ok(SortField::Price),
            "title" => Ok(SortField::Title),
            _ => Err(format!("Invalid sort field: {}", s)),
        }
    }
}

/// Sort direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

/// Enumerated filters understood by the search endpoints.
/// An absent field leaves that dimension unconstrained.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.status.is_none() && self.priority.is_none()
    }
}

/// Body of `POST /api/{deals,goals}/search`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "SearchFilters::is_empty")]
    pub filters: SearchFilters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortDirection>,
    pub page: u32,
    pub page_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_round_trip() {
        for field in [SortField::CreatedAt, SortField::Price, SortField::Title] {
            assert_eq!(field.as_str().parse::<SortField>().unwrap(), field);
        }
        assert!("updatedAt".parse::<SortField>().is_err());
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("up".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_minimal_request_serialization() {
        let request = ServerSearchRequest {
            page: 1,
            page_size: 12,
            ..Default::default()
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"page": 1, "pageSize": 12}));
    }

    #[test]
    fn test_full_request_serialization() {
        let request = ServerSearchRequest {
            query: Some("headphones".to_string()),
            filters: SearchFilters {
                category: Some("electronics".to_string()),
                ..Default::default()
            },
            min_price: Some(10.0),
            max_price: Some(99.5),
            sort_by: Some(SortField::Price),
            sort_order: Some(SortDirection::Asc),
            page: 3,
            page_size: 100,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"query\":\"headphones\""));
        assert!(json.contains("\"filters\":{\"category\":\"electronics\"}"));
        assert!(json.contains("\"minPrice\":10.0"));
        assert!(json.contains("\"maxPrice\":99.5"));
        assert!(json.contains("\"sortBy\":\"price\""));
        assert!(json.contains("\"sortOrder\":\"asc\""));
        assert!(json.contains("\"pageSize\":100"));
    }
}
