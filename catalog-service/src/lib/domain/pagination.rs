/// Page number and size requested by a listing.
///
/// Always holds a usable window: `page >= 1` and `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    /// Build a page request, clamping out-of-range values.
    ///
    /// A `limit` below 1 becomes 1 so `total_pages` never divides by zero.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of rows to skip before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_LIMIT)
    }
}

/// Filters accepted by the category and product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub active: Option<bool>,
}

impl ListFilter {
    /// Query-string suffix that reproduces this filter, e.g. `&active=1`.
    ///
    /// Appended to every navigation link so paging keeps the filter.
    pub fn to_query_suffix(&self) -> String {
        match self.active {
            Some(active) => format!("&active={}", u8::from(active)),
            None => String::new(),
        }
    }
}

/// One page of a listing plus the size of the whole result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: i64) -> Self {
        Self { items, total_count }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
        }
    }
}

/// Position of a page inside a listing and which navigation links apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNavigation {
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub has_prev: bool,
    pub has_next: bool,
    pub has_last: bool,
}

/// Compute the navigation window for `request` over `total_count` rows.
///
/// `self` always applies; `last` when `page < total_pages`; `next` when
/// `page + 1 <= total_pages`; `prev` when `page - 1 > 0`.
pub fn paginate(total_count: i64, request: PageRequest) -> PageNavigation {
    let page = request.page();
    let limit = request.limit();
    let total_count = total_count.max(0);
    let total_pages = (total_count + limit - 1) / limit;

    PageNavigation {
        page,
        limit,
        total_pages,
        has_prev: page - 1 > 0,
        has_next: page.saturating_add(1) <= total_pages,
        has_last: page < total_pages,
    }
}
