//! Pagination reconciliation and page-number strips

use dealscout_client::ListResponse;
use serde::{Deserialize, Serialize};

use crate::query::BuiltQuery;

pub const DEFAULT_MAX_VISIBLE_PAGES: u32 = 7;
pub const DEFAULT_NARROW_MAX_VISIBLE_PAGES: u32 = 5;

/// Smallest strip that still fits first, current and last page
const MIN_VISIBLE_PAGES: u32 = 3;

/// `max(1, ceil(total / page_size))`
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

/// What to do with the active page after a response arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDecision {
    /// The requested page is valid as is
    Keep,
    /// The server served a different page than requested; make it active
    AdoptServerPage(u32),
    /// The requested page no longer exists; go to page 1 and fetch again
    ClampAndRefetch,
}

/// Check the requested page against what the server reported.
///
/// A page echoed by the server wins over local clamping. Search mode is
/// never reconciled.
pub fn reconcile<R>(query: &BuiltQuery, response: &ListResponse<R>) -> PageDecision {
    if query.is_search() {
        return PageDecision::Keep;
    }

    let page_size = response
        .page_size
        .filter(|size| *size > 0)
        .unwrap_or(query.page_size());
    let pages = total_pages(response.total, page_size);
    let requested = query.page();

    match response.page.filter(|page| *page > 0) {
        Some(served) if served > pages => PageDecision::ClampAndRefetch,
        Some(served) if served != requested => PageDecision::AdoptServerPage(served),
        Some(_) => PageDecision::Keep,
        None if requested > pages => PageDecision::ClampAndRefetch,
        None => PageDecision::Keep,
    }
}

/// One entry in a rendered page strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "page", rename_all = "lowercase")]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl PageItem {
    pub fn page(&self) -> Option<u32> {
        match self {
            PageItem::Page(page) => Some(*page),
            PageItem::Ellipsis => None,
        }
    }
}

/// Build the page strip for `current` out of `total_pages`.
///
/// The first and last page are always present. The pages around `current`
/// form a window of `max_visible - 2` entries that is shifted to stay in
/// range near either edge. A gap of one page is shown as that page; a
/// longer gap collapses into a single ellipsis.
pub fn page_numbers(current: u32, total_pages: u32, max_visible: u32) -> Vec<PageItem> {
    let total = total_pages.max(1);
    let max_visible = max_visible.max(MIN_VISIBLE_PAGES);
    let current = current.clamp(1, total);

    if total <= max_visible {
        return (1..=total).map(PageItem::Page).collect();
    }

    let width = max_visible - 2;
    let start = current
        .saturating_sub(width / 2)
        .clamp(2, total - width);
    let end = start + width - 1;

    let mut items = Vec::with_capacity(max_visible as usize + 2);
    items.push(PageItem::Page(1));
    match start - 1 {
        1 => {}
        2 => items.push(PageItem::Page(2)),
        _ => items.push(PageItem::Ellipsis),
    }
    items.extend((start..=end).map(PageItem::Page));
    match total - end {
        1 => {}
        2 => items.push(PageItem::Page(total - 1)),
        _ => items.push(PageItem::Ellipsis),
    }
    items.push(PageItem::Page(total));
    items
}

/// Rendering width of the page strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewport {
    #[default]
    Wide,
    Narrow,
}

/// How many page numbers a strip may show per viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationOptions {
    pub max_visible_pages: u32,
    pub narrow_max_visible_pages: u32,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            narrow_max_visible_pages: DEFAULT_NARROW_MAX_VISIBLE_PAGES,
        }
    }
}

impl PaginationOptions {
    pub fn max_visible(&self, viewport: Viewport) -> u32 {
        match viewport {
            Viewport::Wide => self.max_visible_pages,
            Viewport::Narrow => self.narrow_max_visible_pages,
        }
    }
}

/// Pagination controls as they should be displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current: u32,
    pub total_pages: u32,
    pub total: u64,
    pub items: Vec<PageItem>,
    /// Search mode shows a single enlarged page without controls
    pub hidden: bool,
}

impl PaginationView {
    pub fn new(current: u32, total: u64, page_size: u32, max_visible: u32) -> Self {
        let pages = total_pages(total, page_size);
        let current = current.clamp(1, pages);
        Self {
            current,
            total_pages: pages,
            total,
            items: page_numbers(current, pages, max_visible),
            hidden: false,
        }
    }

    pub fn hidden(total: u64) -> Self {
        Self {
            current: 1,
            total_pages: 1,
            total,
            items: Vec::new(),
            hidden: true,
        }
    }

    pub fn has_previous(&self) -> bool {
        !self.hidden && self.current > 1
    }

    pub fn has_next(&self) -> bool {
        !self.hidden && self.current < self.total_pages
    }
}

impl Default for PaginationView {
    fn default() -> Self {
        Self::new(1, 0, 1, DEFAULT_MAX_VISIBLE_PAGES)
    }
}
