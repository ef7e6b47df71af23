//! Property tests for query building, filter transitions and pagination

use std::collections::HashSet;

use dealscout_discovery::pagination::{page_numbers, total_pages};
use dealscout_discovery::{
    FilterKey, FilterState, FilterValue, PageItem, PriceRange, SearchCriteria, SortOption,
    build_query,
};
use proptest::prelude::*;

fn filter_value() -> impl Strategy<Value = FilterValue> {
    prop_oneof![
        Just(FilterValue::All),
        "[a-z]{1,8}".prop_map(|s| FilterValue::parse(&s)),
    ]
}

fn price_range() -> impl Strategy<Value = PriceRange> {
    (0.0f64..2000.0, 0.0f64..2000.0, any::<bool>()).prop_map(|(min, max, enabled)| PriceRange {
        min,
        max,
        enabled,
    })
}

fn sort_option() -> impl Strategy<Value = SortOption> {
    (0..SortOption::ALL.len()).prop_map(|i| SortOption::ALL[i])
}

prop_compose! {
    fn criteria()(
        free_text in "( |[a-z]){0,12}",
        category in filter_value(),
        status in filter_value(),
        priority in filter_value(),
        price_range in price_range(),
        sort in sort_option(),
        page in 1u32..60,
    ) -> SearchCriteria {
        let mut criteria = SearchCriteria::default()
            .with_filter(FilterKey::Category, category)
            .with_filter(FilterKey::Status, status)
            .with_filter(FilterKey::Priority, priority);
        criteria.free_text = free_text;
        criteria.price_range = price_range;
        criteria.sort = sort.sort();
        criteria.page = page;
        criteria
    }
}

proptest! {
    #[test]
    fn build_query_is_deterministic(c in criteria()) {
        prop_assert_eq!(build_query(&c), build_query(&c.clone()));
    }

    #[test]
    fn disabled_range_is_never_sent(c in criteria()) {
        let mut c = c;
        c.price_range.enabled = false;
        let request = build_query(&c).request;
        prop_assert_eq!(request.min_price, None);
        prop_assert_eq!(request.max_price, None);

        let json = serde_json::to_value(&request).unwrap();
        prop_assert!(json.get("minPrice").is_none());
        prop_assert!(json.get("maxPrice").is_none());
    }

    #[test]
    fn apply_resets_page_and_converges(active in criteria(), draft in criteria()) {
        let mut state = FilterState::new(active);
        state.edit_draft(|d| *d = draft);

        if let Ok(true) = state.apply() {
            prop_assert_eq!(build_query(state.active()).page(), 1);
            prop_assert_eq!(state.draft(), state.active());
            prop_assert!(!state.is_dirty());
        }
    }

    #[test]
    fn search_submit_resets_page(active in criteria(), text in "[a-z ]{0,10}") {
        let mut state = FilterState::new(active);
        state.submit_search(&text);
        prop_assert_eq!(build_query(state.active()).page(), 1);
        prop_assert_eq!(state.active().page, 1);
    }

    #[test]
    fn page_change_keeps_everything_else(active in criteria(), page in 1u32..100) {
        let mut state = FilterState::new(active.clone());
        state.set_page(page).unwrap();

        let after = state.active();
        prop_assert_eq!(after.page, page);
        prop_assert_eq!(&after.free_text, &active.free_text);
        prop_assert_eq!(after.sort, active.sort);
        prop_assert_eq!(after.price_range, active.price_range);
        for key in FilterKey::ALL {
            prop_assert_eq!(after.filter(key), active.filter(key));
        }
    }

    #[test]
    fn total_pages_formula(total in 0u64..100_000, page_size in 1u32..500) {
        let expected = (total.div_ceil(u64::from(page_size))).max(1);
        prop_assert_eq!(u64::from(total_pages(total, page_size)), expected);
    }

    #[test]
    fn page_strip_is_bounded(
        total in 0u64..10_000,
        page_size in 1u32..200,
        current in 0u32..400,
        max_visible in 0u32..12,
    ) {
        let pages = total_pages(total, page_size);
        let items = page_numbers(current, pages, max_visible);
        let numbers: Vec<u32> = items.iter().filter_map(PageItem::page).collect();

        prop_assert!(numbers.iter().all(|p| (1..=pages).contains(p)));
        let unique: HashSet<u32> = numbers.iter().copied().collect();
        prop_assert_eq!(unique.len(), numbers.len());
        prop_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(numbers.first().copied(), Some(1));
        prop_assert_eq!(numbers.last().copied(), Some(pages));

        // an ellipsis always stands for at least two hidden pages
        for (i, item) in items.iter().enumerate() {
            if *item == PageItem::Ellipsis {
                let before = items[i - 1].page().unwrap();
                let after = items[i + 1].page().unwrap();
                prop_assert!(after - before >= 3);
            }
        }
    }
}
