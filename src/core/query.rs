//! Feed query construction: substring filter and skip/take pagination

use crate::core::entity::Link;

/// Filter applied to the feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LinkFilter {
    /// No filtering
    #[default]
    All,

    /// Links whose `url` or `description` contains the substring
    Contains(String),
}

impl LinkFilter {
    /// Build a filter from the optional `filter` argument
    ///
    /// An absent or empty argument means no filtering.
    pub fn from_arg(filter: Option<String>) -> Self {
        match filter {
            Some(needle) if !needle.is_empty() => LinkFilter::Contains(needle),
            _ => LinkFilter::All,
        }
    }

    /// The substring to look for, if any
    pub fn needle(&self) -> Option<&str> {
        match self {
            LinkFilter::All => None,
            LinkFilter::Contains(needle) => Some(needle),
        }
    }

    /// Case-sensitive match against url OR description
    pub fn matches(&self, link: &Link) -> bool {
        match self {
            LinkFilter::All => true,
            LinkFilter::Contains(needle) => {
                link.url.contains(needle.as_str()) || link.description.contains(needle.as_str())
            }
        }
    }
}

/// Skip/take window over an ordered result set
///
/// A negative `take` counts from the end: `skip` records are dropped from
/// the end, then the last `|take|` of the remainder are returned, still in
/// store order. Out-of-range values yield an empty window, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Records to skip (from the start, or from the end when `take < 0`)
    pub skip: usize,

    /// Maximum number of records; `None` means unbounded
    pub take: Option<i32>,
}

impl Pagination {
    /// Build pagination from raw arguments
    ///
    /// Negative `skip` values are treated as 0.
    pub fn new(skip: Option<i32>, take: Option<i32>) -> Self {
        Self {
            skip: skip.map_or(0, |s| s.max(0) as usize),
            take,
        }
    }

    /// Whether records are counted from the end of the result set
    pub fn is_backwards(&self) -> bool {
        self.take.is_some_and(|t| t < 0)
    }

    /// Absolute record limit, `None` when unbounded
    pub fn limit(&self) -> Option<usize> {
        self.take.map(|t| t.unsigned_abs() as usize)
    }

    /// Index range selected out of `len` records
    pub fn window(&self, len: usize) -> std::ops::Range<usize> {
        if self.is_backwards() {
            let end = len.saturating_sub(self.skip);
            let start = end.saturating_sub(self.limit().unwrap_or(usize::MAX));
            start..end
        } else {
            let start = self.skip.min(len);
            let end = match self.limit() {
                Some(limit) => start.saturating_add(limit).min(len),
                None => len,
            };
            start..end
        }
    }

    /// Select the window out of an ordered collection
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let range = self.window(items.len());
        items
            .into_iter()
            .skip(range.start)
            .take(range.end - range.start)
            .collect()
    }
}

/// Complete feed request handed to a store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub filter: LinkFilter,
    pub page: Pagination,
}

impl FeedQuery {
    /// Build a query from the `feed(filter, skip, take)` arguments
    pub fn new(filter: Option<String>, skip: Option<i32>, take: Option<i32>) -> Self {
        Self {
            filter: LinkFilter::from_arg(filter),
            page: Pagination::new(skip, take),
        }
    }

    /// Every link, in store order
    pub fn all() -> Self {
        Self::default()
    }

    /// Run the query over links already in store order
    pub fn run<'a, I>(&self, links: I) -> Vec<Link>
    where
        I: IntoIterator<Item = &'a Link>,
    {
        let matching: Vec<Link> = links
            .into_iter()
            .filter(|link| self.filter.matches(link))
            .cloned()
            .collect();
        self.page.apply(matching)
    }
}
