//! Page-number pagination primitives shared by board backend listings.
//!
//! Listing endpoints accept `page` and `limit` as raw query strings. Clients
//! historically sent anything from well-formed integers to empty strings, so
//! parsing is lenient: values that are absent or not numeric fall back to the
//! defaults instead of failing the request. Out-of-range values are clamped.
//!
//! The [`Pagination`] block reports where a page sits within the full result
//! set and serialises with camelCase keys:
//!
//! ```
//! use pagination::{PageRequest, Pagination};
//!
//! let request = PageRequest::from_raw(Some("2"), Some("10"));
//! let block = Pagination::compute(request, 15);
//! assert_eq!(block.total_pages, 2);
//! assert!(!block.has_next_page);
//! assert!(block.has_previous_page);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page number used when the client omits `page` or sends garbage.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the client omits `limit` or sends garbage.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Errors raised by the strict [`PageRequest::new`] constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page numbers are 1-based.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("limit must be between 1 and {max}")]
    LimitOutOfRange {
        /// Upper bound accepted for `limit`.
        max: u32,
    },
}

/// Raw `page`/`limit` query parameters as received from the client.
///
/// Both values stay strings so that non-numeric input can be mapped to the
/// defaults rather than rejected by the deserialiser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaginationQuery {
    /// Requested 1-based page number.
    pub page: Option<String>,
    /// Requested page size.
    pub limit: Option<String>,
}

impl PaginationQuery {
    /// Resolve the raw parameters into a normalised [`PageRequest`].
    #[must_use]
    pub fn to_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Normalised page position: a 1-based page number and a bounded page size.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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
    /// Build a request from already-validated numbers.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `page` is zero or `limit` falls
    /// outside `1..=MAX_LIMIT`.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PageRequestError::LimitOutOfRange { max: MAX_LIMIT });
        }
        Ok(Self { page, limit })
    }

    /// Lenient parse of client-supplied strings.
    ///
    /// Missing or non-numeric values take the defaults. A page below 1 becomes
    /// 1, a limit below 1 becomes the default and a limit above
    /// [`MAX_LIMIT`] is clamped.
    #[must_use]
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = parse_leading_int(page).map_or(DEFAULT_PAGE, |value| {
            u32::try_from(value.max(1)).unwrap_or(u32::MAX)
        });
        let limit = match parse_leading_int(limit) {
            Some(value) if value >= 1 => u32::try_from(value.min(i64::from(MAX_LIMIT)))
                .unwrap_or(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        };
        Self { page, limit }
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip before this page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

/// Parse the leading integer of a string the way form-encoded clients expect:
/// surrounding whitespace is ignored and trailing junk after the digits is
/// dropped (`"3abc"` reads as 3). Anything without leading digits is `None`.
fn parse_leading_int(raw: Option<&str>) -> Option<i64> {
    let trimmed = raw?.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(digits.len(), |(index, _)| index);
    let number = digits.get(..end).filter(|slice| !slice.is_empty())?;
    let magnitude = number.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Metadata describing where a page sits within a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Page that was requested.
    pub current_page: u32,
    /// Pages needed to show every item; 0 when the listing is empty.
    pub total_pages: u64,
    /// Total number of items across all pages.
    pub total_posts: u64,
    /// Page size used for this listing.
    pub posts_per_page: u32,
    /// Whether a later page holds items.
    pub has_next_page: bool,
    /// Whether the requested page is past the first one.
    pub has_previous_page: bool,
}

impl Pagination {
    /// Compute the block for `request` given the total item count.
    ///
    /// Requests past the last page are not an error; they report truthful
    /// totals with `has_next_page` false.
    #[must_use]
    pub const fn compute(request: PageRequest, total: u64) -> Self {
        let total_pages = total.div_ceil(request.limit as u64);
        Self {
            current_page: request.page,
            total_pages,
            total_posts: total,
            posts_per_page: request.limit,
            has_next_page: (request.page as u64) < total_pages,
            has_previous_page: request.page > 1,
        }
    }
}
