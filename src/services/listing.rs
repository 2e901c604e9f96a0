// ABOUTME: Ordering and anchoring rules for every list endpoint
// ABOUTME: Sorts a fetched candidate list stably, then windows it with the cursor engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::cmp::Reverse;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use verbum_core::pagination::{CursorPage, PageAnchor, PageRequest};

/// An entry that can appear in a paged listing
pub trait ListItem {
    /// Stable unique key used as the cursor
    fn listing_key(&self) -> &str;

    /// Creation time of the underlying record
    fn created_at(&self) -> DateTime<Utc>;

    /// Number of likes, for popularity orderings
    fn like_count(&self) -> u64 {
        0
    }
}

/// How a listing is ordered before windowing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
    /// Keep the order the collaborator returned
    AsFetched,
    /// Ascending creation time
    OldestFirst,
    /// Descending creation time
    NewestFirst,
    /// Descending like count, ties keep fetch order
    MostLikedFirst,
}

impl ListOrder {
    /// Sort in place; stable, so equal keys keep fetch order
    pub fn arrange<T: ListItem>(self, items: &mut [T]) {
        match self {
            Self::AsFetched => {}
            Self::OldestFirst => items.sort_by_key(ListItem::created_at),
            Self::NewestFirst => items.sort_by_key(|item| Reverse(item.created_at())),
            Self::MostLikedFirst => items.sort_by_key(|item| Reverse(item.like_count())),
        }
    }
}

/// Every paged list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Listing {
    /// Comments on a post
    PostComments,
    /// Replies to a comment
    CommentReplies,
    /// Comments written by a user
    UserComments,
    /// Accounts following a user
    Followers,
    /// Accounts a user follows
    Followings,
    /// Posts written by a user
    UserPosts,
    /// Posts from followed accounts
    Feed,
    /// Posts a user liked
    LikedPosts,
    /// Popular posts across the site
    Explore,
    /// Post search results
    SearchPosts,
    /// Account search results
    SearchPeople,
}

impl Listing {
    /// Ordering applied before windowing
    #[must_use]
    pub const fn order(self) -> ListOrder {
        match self {
            Self::PostComments | Self::CommentReplies | Self::UserComments | Self::LikedPosts => {
                ListOrder::OldestFirst
            }
            Self::UserPosts | Self::Feed => ListOrder::NewestFirst,
            Self::Explore => ListOrder::MostLikedFirst,
            Self::Followers | Self::Followings | Self::SearchPosts | Self::SearchPeople => {
                ListOrder::AsFetched
            }
        }
    }

    /// Which end a cursorless request starts from
    #[must_use]
    pub const fn anchor(self) -> PageAnchor {
        match self {
            Self::Followings => PageAnchor::Bottom,
            _ => PageAnchor::Top,
        }
    }

    /// Endpoint name used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostComments => "post_comments",
            Self::CommentReplies => "comment_replies",
            Self::UserComments => "user_comments",
            Self::Followers => "followers",
            Self::Followings => "followings",
            Self::UserPosts => "user_posts",
            Self::Feed => "feed",
            Self::LikedPosts => "liked_posts",
            Self::Explore => "explore",
            Self::SearchPosts => "search_posts",
            Self::SearchPeople => "search_people",
        }
    }

    /// Order a fetched candidate list, then return the requested page
    pub fn page<T>(self, mut items: Vec<T>, request: &PageRequest) -> CursorPage<T>
    where
        T: ListItem + Clone,
    {
        self.order().arrange(&mut items);
        request.apply(&items, self.anchor(), ListItem::listing_key)
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
