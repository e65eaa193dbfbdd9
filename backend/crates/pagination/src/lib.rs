//! Offset pagination primitives for list endpoints.
//!
//! A [`PageRequest`] carries a one-based page number and a page size. HTTP
//! adapters build it leniently from raw query-string text with
//! [`PageRequest::from_query`]; domain code that already holds numbers uses
//! the validating [`PageRequest::new`]. A [`Page`] pairs the fetched items
//! with the unfiltered total so adapters can shape their own envelope.
//!
//! Normalisation policy applied to raw query values:
//!
//! - missing, blank, non-numeric, or zero values fall back to the default;
//! - negative values clamp to 1;
//! - values beyond `u32::MAX` clamp to `u32::MAX`.

use serde::Serialize;
use thiserror::Error;

/// Page number used when the client does not supply a usable value.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the client does not supply a usable value.
pub const DEFAULT_LIMIT: u32 = 10;

/// Validation failures raised by [`PageRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page numbers are one-based.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("limit must be at least 1")]
    ZeroLimit,
}

/// One-based page selection.
///
/// ## Invariants
/// - `page >= 1`
/// - `limit >= 1`
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 20).expect("valid request");
/// assert_eq!(request.skip(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request from already-parsed numbers.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when either value is zero.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        Ok(Self { page, limit })
    }

    /// Build a request from raw query-string values.
    ///
    /// Never fails: unusable input is normalised as described in the crate
    /// documentation.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::from_query(Some("2"), Some("abc"));
    /// assert_eq!((request.page(), request.limit()), (2, 10));
    ///
    /// let clamped = PageRequest::from_query(Some("-4"), None);
    /// assert_eq!(clamped.page(), 1);
    /// ```
    #[must_use]
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_lenient(page, DEFAULT_PAGE),
            limit: parse_lenient(limit, DEFAULT_LIMIT),
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items preceding this page: `(page - 1) * limit`.
    ///
    /// Computed in `u64`, which holds the largest possible product of two
    /// `u32` values, so the result never overflows.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

fn parse_lenient(raw: Option<&str>, default: u32) -> u32 {
    let Some(text) = raw.map(str::trim) else {
        return default;
    };
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return default;
    }
    if digits.bytes().all(|byte| byte == b'0') {
        return default;
    }
    if negative {
        return 1;
    }
    // Only overflow can fail here: the text is a non-zero run of digits.
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// A fetched page together with the size of the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    total: u64,
    request: PageRequest,
    items: Vec<T>,
}

impl<T> Page<T> {
    /// Pair fetched items with the request that produced them.
    #[must_use]
    pub const fn new(total: u64, request: PageRequest, items: Vec<T>) -> Self {
        Self {
            total,
            request,
            items,
        }
    }

    /// Count of every item in the collection, independent of the page.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// The request echoed back to clients.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Transform every item, keeping the totals.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total: self.total,
            request: self.request,
            items: self.items.into_iter().map(f).collect(),
        }
    }

    /// Split into `(total, request, items)`.
    #[must_use]
    pub fn into_parts(self) -> (u64, PageRequest, Vec<T>) {
        (self.total, self.request, self.items)
    }
}
