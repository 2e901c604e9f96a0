// ABOUTME: Cursor-based pagination engine for already-ordered listings
// ABOUTME: Forward/backward windowing by item key, page-size parsing, and page envelopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Cursor pagination
//!
//! Listings are ordered by the caller; this module never sorts. A window is
//! addressed by the key of a neighbouring item: `after=K` returns the items
//! following `K`, `before=K` the items preceding it. Without a cursor the
//! window is anchored at the top or the bottom of the listing, chosen
//! explicitly by the caller through [`PageAnchor`].

use std::fmt::{self, Display, Formatter};
use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::pagination::DEFAULT_PAGE_SIZE;
use crate::errors::PaginationError;

/// Accepted shape of untrusted page-size text
static PAGE_SIZE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").ok());

/// Accepted shape of range text: `<size>` or `<size>,<index>`
static RANGE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?P<size>[0-9]+)(?:,(?P<index>[0-9]+))?$").ok());

/// Opaque pagination cursor: the key of an item in the listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Create a cursor pointing at the item with the given key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the raw cursor string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Cursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which end of the listing an uncursored request starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageAnchor {
    /// First page is the head of the listing (newest-first feeds)
    Top,
    /// First page is the tail of the listing (most recent span of a thread)
    Bottom,
}

/// Window `items` by cursor
///
/// Returns a contiguous sub-slice of `items`, in the original order:
///
/// - both `after` and `before` set: empty
/// - `after = K`: up to `page_size` items following the first item keyed `K`,
///   or empty if no item has that key
/// - `before = K`: up to `page_size` items preceding the first item keyed `K`;
///   an unknown key places the boundary at index 0, giving an empty window
/// - neither: the first (`Top`) or last (`Bottom`) `page_size` items
///
/// A `page_size` of zero yields an empty window.
pub fn paginate<'a, T, F>(
    items: &'a [T],
    page_size: usize,
    after: Option<&str>,
    before: Option<&str>,
    anchor: PageAnchor,
    key_fn: F,
) -> &'a [T]
where
    F: Fn(&T) -> &str,
{
    &items[window_range(items, page_size, after, before, anchor, &key_fn)]
}

fn window_range<T, F>(
    items: &[T],
    page_size: usize,
    after: Option<&str>,
    before: Option<&str>,
    anchor: PageAnchor,
    key_fn: &F,
) -> Range<usize>
where
    F: Fn(&T) -> &str,
{
    if page_size == 0 {
        return 0..0;
    }

    match (after, before) {
        (Some(_), Some(_)) => 0..0,
        (Some(key), None) => {
            let Some(found) = position_of(items, key, key_fn) else {
                return 0..0;
            };
            let start = found + 1;
            start..start.saturating_add(page_size).min(items.len())
        }
        (None, Some(key)) => {
            let boundary = position_of(items, key, key_fn).unwrap_or(0);
            boundary.saturating_sub(page_size)..boundary
        }
        (None, None) => match anchor {
            PageAnchor::Top => 0..page_size.min(items.len()),
            PageAnchor::Bottom => items.len().saturating_sub(page_size)..items.len(),
        },
    }
}

fn position_of<T, F>(items: &[T], key: &str, key_fn: &F) -> Option<usize>
where
    F: Fn(&T) -> &str,
{
    items.iter().position(|item| key_fn(item) == key)
}

/// Validated, positive page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Page size applied when the request does not specify one
    pub const DEFAULT: Self = Self(NonZeroUsize::MIN.saturating_add(DEFAULT_PAGE_SIZE - 1));

    /// Parse untrusted page-size text
    ///
    /// Surrounding whitespace is ignored. Absent or empty text yields
    /// [`PageSize::DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a run of ASCII digits, or if the
    /// number is zero or overflows `usize`
    pub fn parse(text: Option<&str>) -> Result<Self, PaginationError> {
        let trimmed = text.map_or("", str::trim);
        if trimmed.is_empty() {
            return Ok(Self::DEFAULT);
        }

        let well_formed = PAGE_SIZE_PATTERN
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(trimmed));
        if !well_formed {
            return Err(PaginationError::InvalidPageSize {
                input: trimmed.to_owned(),
            });
        }

        trimmed
            .parse::<usize>()
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or_else(|| PaginationError::InvalidPageSize {
                input: trimmed.to_owned(),
            })
    }

    /// Create a page size from a positive count
    #[must_use]
    pub const fn new(size: NonZeroUsize) -> Self {
        Self(size)
    }

    /// Number of items per page
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Position a request starts from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CursorPosition {
    /// No cursor: start at the listing's anchor
    #[default]
    Anchor,
    /// Items following the cursor
    After(Cursor),
    /// Items preceding the cursor
    Before(Cursor),
}

/// Validated pagination request parsed from untrusted query parameters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageRequest {
    /// Page size
    pub size: PageSize,
    /// Starting position
    pub position: CursorPosition,
}

impl PageRequest {
    /// Parse raw `span`, `after`, and `before` parameters
    ///
    /// Empty or whitespace-only cursor strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the span is malformed or both cursors are present
    pub fn parse(
        span: Option<&str>,
        after: Option<&str>,
        before: Option<&str>,
    ) -> Result<Self, PaginationError> {
        let size = PageSize::parse(span)?;
        let after = non_blank(after);
        let before = non_blank(before);

        let position = match (after, before) {
            (Some(_), Some(_)) => return Err(PaginationError::ConflictingCursors),
            (Some(key), None) => CursorPosition::After(Cursor::new(key)),
            (None, Some(key)) => CursorPosition::Before(Cursor::new(key)),
            (None, None) => CursorPosition::Anchor,
        };

        Ok(Self { size, position })
    }

    /// First page of the given size
    #[must_use]
    pub const fn first(size: PageSize) -> Self {
        Self {
            size,
            position: CursorPosition::Anchor,
        }
    }

    /// Page following the item keyed `cursor`
    #[must_use]
    pub const fn after(size: PageSize, cursor: Cursor) -> Self {
        Self {
            size,
            position: CursorPosition::After(cursor),
        }
    }

    /// Page preceding the item keyed `cursor`
    #[must_use]
    pub const fn before(size: PageSize, cursor: Cursor) -> Self {
        Self {
            size,
            position: CursorPosition::Before(cursor),
        }
    }

    /// Window an ordered listing and wrap the result with cursor metadata
    pub fn apply<T, F>(&self, items: &[T], anchor: PageAnchor, key_fn: F) -> CursorPage<T>
    where
        T: Clone,
        F: Fn(&T) -> &str,
    {
        let (after, before) = match &self.position {
            CursorPosition::Anchor => (None, None),
            CursorPosition::After(cursor) => (Some(cursor.as_str()), None),
            CursorPosition::Before(cursor) => (None, Some(cursor.as_str())),
        };

        let range = window_range(items, self.size.get(), after, before, anchor, &key_fn);
        if range.is_empty() {
            return CursorPage::empty();
        }

        let window = &items[range.clone()];
        let prev_cursor = window
            .first()
            .filter(|_| range.start > 0)
            .map(|first| Cursor::new(key_fn(first)));
        let has_more = range.end < items.len();
        let next_cursor = window
            .last()
            .filter(|_| has_more)
            .map(|last| Cursor::new(key_fn(last)));

        CursorPage::new(window.to_vec(), next_cursor, prev_cursor, has_more)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Paginated response containing items and pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorPage<T> {
    /// The items in this page
    pub items: Vec<T>,

    /// Cursor for the page after this one (key of the last item)
    pub next_cursor: Option<Cursor>,

    /// Cursor for the page before this one (key of the first item)
    pub prev_cursor: Option<Cursor>,

    /// Whether there are more items after this page
    pub has_more: bool,

    /// Total number of items in this page
    pub count: usize,
}

impl<T> CursorPage<T> {
    /// Create a new cursor page
    #[must_use]
    pub fn new(
        items: Vec<T>,
        next_cursor: Option<Cursor>,
        prev_cursor: Option<Cursor>,
        has_more: bool,
    ) -> Self {
        let count = items.len();
        Self {
            items,
            next_cursor,
            prev_cursor,
            has_more,
            count,
        }
    }

    /// Create an empty page
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
            prev_cursor: None,
            has_more: false,
            count: 0,
        }
    }
}

/// Slice a listing by a `<size>[,<index>]` range string
///
/// Selects the `index`-th block of `size` items (index defaults to 0). Blocks
/// past the end are empty. `None` returns the whole listing.
///
/// # Errors
///
/// Returns an error if the range text does not have the accepted shape
pub fn slice_range<'a, T>(range: Option<&str>, items: &'a [T]) -> Result<&'a [T], PaginationError> {
    let Some(range) = range else {
        return Ok(items);
    };

    let invalid = || PaginationError::InvalidRange {
        input: range.to_owned(),
    };
    let captures = RANGE_PATTERN
        .as_ref()
        .and_then(|pattern| pattern.captures(range))
        .ok_or_else(invalid)?;

    let size = captures
        .name("size")
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .ok_or_else(invalid)?;
    let index = match captures.name("index") {
        Some(m) => m.as_str().parse::<usize>().map_err(|_| invalid())?,
        None => 0,
    };

    let start = size.saturating_mul(index).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    Ok(&items[start..end])
}
