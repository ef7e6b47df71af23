// Common model types

use serde::{Deserialize, Serialize};

/// One page of a filtered list, as returned by the search endpoints.
///
/// `total` counts the whole filtered set, not just `items`. `page` and
/// `page_size` are echoed by backends that normalise the request; when the
/// requested page was out of range such a backend answers with the page it
/// actually served.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            items,
            total,
            page,
            page_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
