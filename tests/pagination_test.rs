// ABOUTME: Integration tests for cursor pagination through the listing rules
// ABOUTME: Forward and backward windows, stale cursors, anchors, and client-input errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::ops::RangeInclusive;

use anyhow::Result;
use verbum_server::errors::{AppError, ErrorCode, PaginationError};
use verbum_server::pagination::{paginate, slice_range, Cursor, PageAnchor, PageRequest, PageSize};

fn keys(range: RangeInclusive<usize>) -> Vec<String> {
    range.map(|i| format!("id{i}")).collect()
}

#[test]
fn test_first_page_from_top() {
    let items = keys(1..=10);
    let page = paginate(&items, 3, None, None, PageAnchor::Top, String::as_str);
    assert_eq!(page, &items[0..3]);
}

#[test]
fn test_first_page_from_bottom() {
    let items = keys(1..=10);
    let page = paginate(&items, 3, None, None, PageAnchor::Bottom, String::as_str);
    assert_eq!(page, &items[7..10]);
}

#[test]
fn test_after_cursor_skips_the_cursor_item() {
    let items = keys(1..=10);
    assert_eq!(items[4], "id5");

    let page = paginate(&items, 3, Some("id5"), None, PageAnchor::Top, String::as_str);
    assert_eq!(page, &items[5..8]);
}

#[test]
fn test_before_cursor_keeps_original_order() {
    // id5 sits at index 5
    let items = keys(0..=9);
    assert_eq!(items[5], "id5");

    let page = paginate(&items, 3, None, Some("id5"), PageAnchor::Top, String::as_str);
    assert_eq!(page, &items[2..5]);
    assert_eq!(page, ["id2", "id3", "id4"]);
}

#[test]
fn test_before_cursor_near_the_head_is_short() {
    let items = keys(1..=10);
    let page = paginate(&items, 5, None, Some("id3"), PageAnchor::Top, String::as_str);
    assert_eq!(page, ["id1", "id2"]);
}

#[test]
fn test_stale_cursors_yield_nothing() {
    let items = keys(1..=10);
    assert!(paginate(&items, 3, Some("missing"), None, PageAnchor::Top, String::as_str).is_empty());
    assert!(paginate(&items, 3, None, Some("missing"), PageAnchor::Top, String::as_str).is_empty());
}

#[test]
fn test_both_cursors_yield_nothing() {
    let items = keys(1..=10);
    let page = paginate(
        &items,
        3,
        Some("id5"),
        Some("id2"),
        PageAnchor::Top,
        String::as_str,
    );
    assert!(page.is_empty());
}

#[test]
fn test_after_last_item_is_empty() {
    let items = keys(1..=4);
    assert!(paginate(&items, 3, Some("id4"), None, PageAnchor::Top, String::as_str).is_empty());
}

#[test]
fn test_walking_forward_covers_every_item_once() -> Result<()> {
    let items = keys(1..=10);
    let size = PageSize::parse(Some("4"))?;

    let mut seen = Vec::new();
    let mut request = PageRequest::first(size);
    loop {
        let page = request.apply(&items, PageAnchor::Top, String::as_str);
        seen.extend(page.items);
        match page.next_cursor {
            Some(cursor) => request = PageRequest::after(size, cursor),
            None => break,
        }
    }

    assert_eq!(seen, items);
    Ok(())
}

#[test]
fn test_walking_backward_from_bottom() -> Result<()> {
    let items = keys(1..=7);
    let size = PageSize::parse(Some("3"))?;

    let last = PageRequest::first(size).apply(&items, PageAnchor::Bottom, String::as_str);
    assert_eq!(last.items, ["id5", "id6", "id7"]);
    let prev = last.prev_cursor.ok_or_else(|| anyhow::anyhow!("expected prev cursor"))?;
    assert_eq!(prev, Cursor::new("id5"));

    let earlier = PageRequest::before(size, prev).apply(&items, PageAnchor::Bottom, String::as_str);
    assert_eq!(earlier.items, ["id2", "id3", "id4"]);
    assert!(earlier.has_more);
    Ok(())
}

#[test]
fn test_request_parsing_defaults() -> Result<()> {
    let request = PageRequest::parse(None, None, None)?;
    assert_eq!(request.size.get(), 12);
    assert_eq!(request, PageRequest::default());

    let blank_cursors = PageRequest::parse(Some("5"), Some("  "), Some(""))?;
    assert_eq!(blank_cursors, PageRequest::first(PageSize::parse(Some("5"))?));
    Ok(())
}

#[test]
fn test_request_parsing_errors_are_client_errors() {
    let conflicting = PageRequest::parse(Some("3"), Some("id5"), Some("id2"));
    assert_eq!(conflicting, Err(PaginationError::ConflictingCursors));

    let malformed = PageRequest::parse(Some("three"), None, None);
    assert!(matches!(
        malformed,
        Err(PaginationError::InvalidPageSize { .. })
    ));

    let error: AppError = PaginationError::ConflictingCursors.into();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(error.http_status(), 400);
    assert_eq!(error.details["parameter"], "after,before");
}

#[test]
fn test_zero_and_oversized_spans_are_invalid_page_sizes() {
    for span in ["0", "000", "99999999999999999999999999"] {
        let parsed = PageRequest::parse(Some(span), None, None);
        assert_eq!(
            parsed,
            Err(PaginationError::InvalidPageSize {
                input: span.to_owned()
            })
        );

        let error: AppError = parsed.unwrap_err().into();
        assert_eq!(error.code, ErrorCode::InvalidInput);
        assert_eq!(error.details["parameter"], "span");
    }

    let error: AppError = slice_range(Some("x"), &keys(1..=3)).unwrap_err().into();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(error.details["parameter"], "range");
}

#[test]
fn test_range_slicing() -> Result<()> {
    let items = keys(1..=10);
    assert_eq!(slice_range(Some("4,1"), &items)?, &items[4..8]);
    assert_eq!(slice_range(Some("4,2"), &items)?, &items[8..10]);
    assert!(slice_range(Some("a,b"), &items).is_err());
    Ok(())
}
