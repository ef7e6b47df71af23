//! Draft/active criteria pair behind a list view's filter panel
//!
//! The draft collects filter edits until the user applies them. The sort
//! menu, the search box and the pager write to the active side directly and
//! mirror the same field into the draft, so an untouched draft never looks
//! dirty.

use crate::criteria::{FilterKey, FilterValue, PriceRange, SearchCriteria, Sort};
use crate::error::ValidationError;

/// Where the filter panel stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStatus {
    /// Draft equals active; Apply is disabled
    Idle,
    /// Draft differs from active in at least one field
    Dirty,
    /// Active criteria changed and the resulting fetch has not settled yet
    Applying,
}

/// Draft differs from active
pub fn is_dirty(draft: &SearchCriteria, active: &SearchCriteria) -> bool {
    draft != active
}

#[derive(Debug, Clone)]
pub struct FilterState {
    draft: SearchCriteria,
    active: SearchCriteria,
    applying: bool,
}

impl FilterState {
    pub fn new(initial: SearchCriteria) -> Self {
        Self {
            draft: initial.clone(),
            active: initial,
            applying: false,
        }
    }

    pub fn draft(&self) -> &SearchCriteria {
        &self.draft
    }

    pub fn active(&self) -> &SearchCriteria {
        &self.active
    }

    pub fn is_dirty(&self) -> bool {
        is_dirty(&self.draft, &self.active)
    }

    pub fn status(&self) -> FilterStatus {
        if self.applying {
            FilterStatus::Applying
        } else if self.is_dirty() {
            FilterStatus::Dirty
        } else {
            FilterStatus::Idle
        }
    }

    // ============== Draft edits (never trigger a fetch) ==============

    pub fn edit_draft(&mut self, edit: impl FnOnce(&mut SearchCriteria)) {
        edit(&mut self.draft);
    }

    pub fn set_draft_filter(&mut self, key: FilterKey, value: FilterValue) {
        self.draft.set_filter(key, value);
    }

    pub fn set_draft_price_range(&mut self, range: PriceRange) {
        self.draft.price_range = range;
    }

    pub fn set_draft_sort(&mut self, sort: Sort) {
        self.draft.sort = sort;
    }

    /// Put filters, price range and sort back to defaults in the draft only.
    /// Free text and page follow the active side; nothing is applied.
    pub fn reset_draft(&mut self) {
        let mut draft = self.active.defaults_like();
        draft.free_text = self.active.free_text.clone();
        draft.page = self.active.page;
        self.draft = draft;
    }

    // ============== Transitions on the active side ==============

    /// Copy the draft to active and go back to page 1.
    ///
    /// Returns `Ok(false)` when there is nothing to apply. An invalid draft
    /// is rejected and stays dirty.
    pub fn apply(&mut self) -> Result<bool, ValidationError> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.draft.validate()?;

        self.draft.page = 1;
        self.active = self.draft.clone();
        self.applying = true;
        Ok(true)
    }

    /// Sort menu selection. Returns `false` if the sort is already active.
    pub fn select_sort(&mut self, sort: Sort) -> bool {
        if self.active.sort == sort {
            return false;
        }
        self.active.sort = sort;
        self.draft.sort = sort;
        self.reset_page();
        self.applying = true;
        true
    }

    /// Search box submit; always a fresh request on page 1
    pub fn submit_search(&mut self, text: &str) {
        let text = text.trim().to_string();
        self.active.free_text = text.clone();
        self.draft.free_text = text;
        self.reset_page();
        self.applying = true;
    }

    /// Leave search mode. Returns `false` if no search was active.
    pub fn clear_search(&mut self) -> bool {
        if self.active.free_text.is_empty() {
            return false;
        }
        self.submit_search("");
        true
    }

    /// Pager navigation. Touches nothing but the page.
    /// Returns `false` if `page` is already active.
    pub fn set_page(&mut self, page: u32) -> Result<bool, ValidationError> {
        if page == 0 {
            return Err(ValidationError::PageOutOfRange(page));
        }
        if self.active.page == page {
            return Ok(false);
        }
        self.adopt_server_page(page);
        Ok(true)
    }

    /// Take over the page the server actually served
    pub fn adopt_server_page(&mut self, page: u32) {
        self.active.page = page;
        self.draft.page = page;
    }

    /// The fetch triggered by the last transition has resolved
    pub fn settle(&mut self) {
        self.applying = false;
    }

    fn reset_page(&mut self) {
        self.adopt_server_page(1);
    }
}
