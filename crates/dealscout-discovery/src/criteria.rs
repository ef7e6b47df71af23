//! Search criteria shared by the draft and active sides of a list view

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use dealscout_client::{SortDirection, SortField};

use crate::error::ValidationError;

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MIN_PRICE: f64 = 0.0;
pub const DEFAULT_MAX_PRICE: f64 = 1000.0;

/// Sentinel accepted from user input for "no constraint"
pub const ALL_SENTINEL: &str = "all";

/// Enumerated filter dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    Category,
    Status,
    Priority,
}

impl FilterKey {
    pub const ALL: [FilterKey; 3] = [FilterKey::Category, FilterKey::Status, FilterKey::Priority];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Category => "category",
            FilterKey::Status => "status",
            FilterKey::Priority => "priority",
        }
    }
}

impl Display for FilterKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" => Ok(FilterKey::Category),
            "status" => Ok(FilterKey::Status),
            "priority" => Ok(FilterKey::Priority),
            _ => Err(format!("Invalid filter key: {}", s)),
        }
    }
}

/// Value selected for one filter dimension
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FilterValue {
    #[default]
    All,
    Is(String),
}

impl FilterValue {
    /// Parse user input; blank or "all" (any case) means unconstrained
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            FilterValue::All
        } else {
            FilterValue::Is(trimmed.to_string())
        }
    }

    /// Apply the same sentinel rule as [`FilterValue::parse`] to a built value
    pub fn normalized(self) -> Self {
        match self {
            FilterValue::All => FilterValue::All,
            FilterValue::Is(value) => FilterValue::parse(&value),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FilterValue::All)
    }

    /// The constraint to send, if any
    pub fn as_constraint(&self) -> Option<&str> {
        match self {
            FilterValue::All => None,
            FilterValue::Is(value) => Some(value),
        }
    }
}

impl Display for FilterValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterValue::All => write!(f, "{}", ALL_SENTINEL),
            FilterValue::Is(value) => write!(f, "{}", value),
        }
    }
}

/// Price bounds; only sent when `enabled`
#[derive(Debug, Clone, Copy)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub enabled: bool,
}

// Bounds compare by total order so a range holding NaN still equals itself.
impl PartialEq for PriceRange {
    fn eq(&self, other: &Self) -> bool {
        self.enabled == other.enabled
            && self.min.total_cmp(&other.min).is_eq()
            && self.max.total_cmp(&other.max).is_eq()
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_PRICE,
            max: DEFAULT_MAX_PRICE,
            enabled: false,
        }
    }
}

impl PriceRange {
    pub fn enabled(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            enabled: true,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        for value in [self.min, self.max] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ValidationError::NegativePrice(value));
            }
        }
        if self.min > self.max {
            return Err(ValidationError::InvertedPriceRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Ordering of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Entries of the sort menu. Each maps to exactly one [`Sort`] and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOption {
    #[default]
    Newest,
    Oldest,
    PriceLowToHigh,
    PriceHighToLow,
    TitleAToZ,
    TitleZToA,
}

impl SortOption {
    pub const ALL: [SortOption; 6] = [
        SortOption::Newest,
        SortOption::Oldest,
        SortOption::PriceLowToHigh,
        SortOption::PriceHighToLow,
        SortOption::TitleAToZ,
        SortOption::TitleZToA,
    ];

    pub fn sort(self) -> Sort {
        use SortDirection::{Asc, Desc};
        use SortField::{CreatedAt, Price, Title};

        match self {
            SortOption::Newest => Sort::new(CreatedAt, Desc),
            SortOption::Oldest => Sort::new(CreatedAt, Asc),
            SortOption::PriceLowToHigh => Sort::new(Price, Asc),
            SortOption::PriceHighToLow => Sort::new(Price, Desc),
            SortOption::TitleAToZ => Sort::new(Title, Asc),
            SortOption::TitleZToA => Sort::new(Title, Desc),
        }
    }

    pub fn from_sort(sort: Sort) -> Self {
        use SortDirection::{Asc, Desc};
        use SortField::{CreatedAt, Price, Title};

        match (sort.field, sort.direction) {
            (CreatedAt, Desc) => SortOption::Newest,
            (CreatedAt, Asc) => SortOption::Oldest,
            (Price, Asc) => SortOption::PriceLowToHigh,
            (Price, Desc) => SortOption::PriceHighToLow,
            (Title, Asc) => SortOption::TitleAToZ,
            (Title, Desc) => SortOption::TitleZToA,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::PriceLowToHigh => "price-asc",
            SortOption::PriceHighToLow => "price-desc",
            SortOption::TitleAToZ => "title-asc",
            SortOption::TitleZToA => "title-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest first",
            SortOption::Oldest => "Oldest first",
            SortOption::PriceLowToHigh => "Price: low to high",
            SortOption::PriceHighToLow => "Price: high to low",
            SortOption::TitleAToZ => "Title: A to Z",
            SortOption::TitleZToA => "Title: Z to A",
        }
    }
}

impl Display for SortOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| format!("Invalid sort option: {}", s))
    }
}

/// Everything that determines one list request.
///
/// `filters` only ever holds constrained values; setting a key to
/// [`FilterValue::All`] removes it, so two criteria that constrain the same
/// dimensions compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub free_text: String,
    filters: BTreeMap<FilterKey, FilterValue>,
    pub price_range: PriceRange,
    pub sort: Sort,
    pub page: u32,
    pub page_size: u32,
    pub search_page_size: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_PAGE_SIZE)
    }
}

impl SearchCriteria {
    pub fn new(page_size: u32, search_page_size: u32) -> Self {
        Self {
            free_text: String::new(),
            filters: BTreeMap::new(),
            price_range: PriceRange::default(),
            sort: SortOption::default().sort(),
            page: 1,
            page_size,
            search_page_size,
        }
    }

    /// Fresh criteria with the same page sizes
    pub fn defaults_like(&self) -> Self {
        Self::new(self.page_size, self.search_page_size)
    }

    pub fn filter(&self, key: FilterKey) -> &FilterValue {
        static ALL: FilterValue = FilterValue::All;
        self.filters.get(&key).unwrap_or(&ALL)
    }

    pub fn filters(&self) -> impl Iterator<Item = (FilterKey, &FilterValue)> {
        self.filters.iter().map(|(key, value)| (*key, value))
    }

    pub fn set_filter(&mut self, key: FilterKey, value: FilterValue) {
        match value.normalized() {
            FilterValue::All => {
                self.filters.remove(&key);
            }
            value => {
                self.filters.insert(key, value);
            }
        }
    }

    pub fn with_filter(mut self, key: FilterKey, value: FilterValue) -> Self {
        self.set_filter(key, value);
        self
    }

    pub fn sort_option(&self) -> SortOption {
        SortOption::from_sort(self.sort)
    }

    /// Free text is active; the list switches to one enlarged page
    pub fn is_search(&self) -> bool {
        !self.free_text.trim().is_empty()
    }

    /// Whether anything narrows the result set
    pub fn is_constrained(&self) -> bool {
        self.is_search() || !self.filters.is_empty() || self.price_range.enabled
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page_size == 0 || self.search_page_size == 0 {
            return Err(ValidationError::ZeroPageSize);
        }
        if self.page == 0 {
            return Err(ValidationError::PageOutOfRange(self.page));
        }
        self.price_range.validate()
    }
}
