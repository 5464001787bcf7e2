//! Pagination controller shared by remote and pool modes.

use std::fmt;

/// Which data source drives pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Server-side offset/limit over the unfiltered listing
    Remote,
    /// Client-side slices of the filtered id pool
    Pool,
}

impl fmt::Display for PageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMode::Remote => write!(f, "remote"),
            PageMode::Pool => write!(f, "pool"),
        }
    }
}

/// Single page transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Prev,
    Next,
}

/// Snapshot handed to the renderer for the page indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageIndicator {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub mode: PageMode,
}

impl PageIndicator {
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Current page plus the data source it pages over
///
/// `pool` is `Some` exactly when the controller is in pool mode.
#[derive(Debug, Clone)]
pub struct PaginationState {
    current_page: usize,
    page_size: usize,
    remote_total: usize,
    pool: Option<Vec<u32>>,
}

impl PaginationState {
    /// `page_size` is clamped to at least 1
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            remote_total: 0,
            pool: None,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn mode(&self) -> PageMode {
        if self.pool.is_some() {
            PageMode::Pool
        } else {
            PageMode::Remote
        }
    }

    pub fn pool_ids(&self) -> Option<&[u32]> {
        self.pool.as_deref()
    }

    /// Remote count in remote mode, pool length in pool mode
    pub fn total_items(&self) -> usize {
        match &self.pool {
            Some(ids) => ids.len(),
            None => self.remote_total,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_items().div_ceil(self.page_size).max(1)
    }

    /// Move one page. Returns false, changing nothing, when the target page
    /// is outside `1..=total_pages`.
    pub fn step(&mut self, step: PageStep) -> bool {
        let target = match step {
            PageStep::Prev => self.current_page.checked_sub(1),
            PageStep::Next => Some(self.current_page + 1),
        };
        match target {
            Some(page) => self.set_page(page),
            None => false,
        }
    }

    /// Jump to `page` if it is within `1..=total_pages`
    pub fn set_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Move to `page` without checking it against the total, for a remote
    /// page whose total is only known once it has been fetched
    pub fn seek(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    /// Switch to remote mode on page 1, dropping the pool
    pub fn enter_remote(&mut self) {
        self.pool = None;
        self.current_page = 1;
    }

    /// Record the total the server reported for the unfiltered listing
    pub fn set_remote_total(&mut self, total: usize) {
        self.remote_total = total;
    }

    /// Switch to pool mode over `ids`, then clamp the page
    pub fn enter_pool(&mut self, ids: Vec<u32>) {
        self.pool = Some(ids);
        self.clamp();
    }

    /// Reset to page 1 when the current page no longer exists
    pub fn clamp(&mut self) {
        if self.current_page > self.total_pages() {
            self.current_page = 1;
        }
    }

    /// `(limit, offset)` of the current page in the remote listing
    pub fn remote_window(&self) -> (usize, usize) {
        (self.page_size, (self.current_page - 1) * self.page_size)
    }

    /// Ids on the current page in pool mode; empty in remote mode
    pub fn pool_page(&self) -> &[u32] {
        let Some(ids) = &self.pool else {
            return &[];
        };
        let start = ((self.current_page - 1) * self.page_size).min(ids.len());
        let end = (start + self.page_size).min(ids.len());
        &ids[start..end]
    }

    pub fn indicator(&self) -> PageIndicator {
        PageIndicator {
            current_page: self.current_page,
            total_pages: self.total_pages(),
            total_items: self.total_items(),
            mode: self.mode(),
        }
    }
}
