// API path constants for the DealScout backend

pub mod api_path {
    use url::form_urlencoded::byte_serialize;

    // Deals
    pub const DEAL_SEARCH: &str = "/api/deals/search";

    // Goals
    pub const GOAL_SEARCH: &str = "/api/goals/search";

    /// Analysis resource of a single deal
    pub fn deal_analysis(deal_id: &str) -> String {
        format!("/api/deals/{}/analysis", path_segment(deal_id))
    }

    /// Percent-encode one path segment; spaces become `%20`, not `+`
    fn path_segment(value: &str) -> String {
        byte_serialize(value.as_bytes())
            .collect::<String>()
            .replace('+', "%20")
    }
}
