//! Cursor pagination for the team listing endpoints.
//!
//! Every listing is a two-state machine: a start call carrying filters and
//! page size, then continue calls carrying only the opaque cursor. A page
//! with `has_more = false` ends the pass and its cursor is discarded.

use crate::endpoints::{ListKind, ListPhase};
use crate::errors::{DropboxResult, PaginationError, RateLimitInfo};
use async_trait::async_trait;
use std::fmt;

/// Opaque continuation token exchanged with the host.
///
/// Empty means "start from the beginning"; anything else is an upstream
/// cursor passed verbatim to the continue call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageToken(String);

impl PageToken {
    /// Token for the first page
    pub fn start() -> Self {
        Self(String::new())
    }

    /// Wrap a token received from the host
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Listing phase this token selects
    pub fn phase(&self) -> ListPhase {
        if self.0.is_empty() {
            ListPhase::Start
        } else {
            ListPhase::Continue
        }
    }

    /// Whether this is the start token
    pub fn is_start(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for PageToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PageToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of a cursor listing
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    /// Items in upstream order
    pub items: Vec<T>,
    /// Cursor for the continue call
    pub cursor: String,
    /// Whether more pages follow
    pub has_more: bool,
    /// Rate-limit descriptor of the call that produced the page
    pub rate_limit: RateLimitInfo,
}

impl<T> ListPage<T> {
    /// Check the cursor protocol: a page announcing more must carry a cursor
    pub fn validated(self, kind: ListKind) -> DropboxResult<Self> {
        if self.has_more && self.cursor.is_empty() {
            return Err(PaginationError::MissingCursor {
                listing: kind.as_str(),
            }
            .into());
        }
        Ok(self)
    }

    /// Token for the next page; the start token once the listing is done
    pub fn next_token(&self) -> PageToken {
        if self.has_more {
            PageToken::new(self.cursor.clone())
        } else {
            PageToken::start()
        }
    }
}

/// A listing exposing the start / continue call pair
#[async_trait]
pub trait CursorListing: Send + Sync {
    /// Listed item type
    type Item: Send;

    /// Which listing this is
    fn kind(&self) -> ListKind;

    /// Issue the initial call
    async fn start(&self) -> DropboxResult<ListPage<Self::Item>>;

    /// Issue a continue call with a previously returned cursor
    async fn resume(&self, cursor: &str) -> DropboxResult<ListPage<Self::Item>>;
}

/// Fail before any network call when a continue call has no cursor
pub fn require_cursor(kind: ListKind, cursor: &str) -> DropboxResult<()> {
    if cursor.is_empty() {
        return Err(PaginationError::EmptyCursor {
            listing: kind.as_str(),
        }
        .into());
    }
    Ok(())
}

/// Fetch the page selected by a host page token
pub async fn fetch<L>(listing: &L, token: &PageToken) -> DropboxResult<ListPage<L::Item>>
where
    L: CursorListing + ?Sized,
{
    let page = match token.phase() {
        ListPhase::Start => listing.start().await?,
        ListPhase::Continue => listing.resume(token.as_str()).await?,
    };
    page.validated(listing.kind())
}

/// All items of a fully drained listing
#[derive(Debug, Clone)]
pub struct Drained<T> {
    /// Items from every page, in order
    pub items: Vec<T>,
    /// Number of pages fetched
    pub pages: usize,
    /// Rate-limit descriptor of the last call
    pub rate_limit: RateLimitInfo,
}

/// Follow the cursor chain until the upstream reports no more pages
pub async fn drain<L>(listing: &L) -> DropboxResult<Drained<L::Item>>
where
    L: CursorListing + ?Sized,
{
    let mut token = PageToken::start();
    let mut items = Vec::new();
    let mut pages = 0;

    loop {
        let page = fetch(listing, &token).await?;
        pages += 1;
        token = page.next_token();
        items.extend(page.items);

        if token.is_start() {
            return Ok(Drained {
                items,
                pages,
                rate_limit: page.rate_limit,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DropboxError;
    use parking_lot::Mutex;

    struct Scripted {
        pages: Mutex<Vec<ListPage<u32>>>,
        calls: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(pages: Vec<ListPage<u32>>) -> Self {
            let mut pages = pages;
            pages.reverse();
            Self {
                pages: Mutex::new(pages),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn pop(&self) -> ListPage<u32> {
            self.pages.lock().pop().expect("script exhausted")
        }
    }

    #[async_trait]
    impl CursorListing for Scripted {
        type Item = u32;

        fn kind(&self) -> ListKind {
            ListKind::Members
        }

        async fn start(&self) -> DropboxResult<ListPage<u32>> {
            self.calls.lock().push("start".to_string());
            Ok(self.pop())
        }

        async fn resume(&self, cursor: &str) -> DropboxResult<ListPage<u32>> {
            require_cursor(self.kind(), cursor)?;
            self.calls.lock().push(format!("resume:{cursor}"));
            Ok(self.pop())
        }
    }

    fn page(items: Vec<u32>, cursor: &str, has_more: bool) -> ListPage<u32> {
        ListPage {
            items,
            cursor: cursor.to_string(),
            has_more,
            rate_limit: RateLimitInfo::default(),
        }
    }

    #[test]
    fn test_page_token_phase() {
        assert_eq!(PageToken::start().phase(), ListPhase::Start);
        assert_eq!(PageToken::from("c1").phase(), ListPhase::Continue);
    }

    #[test]
    fn test_last_page_discards_cursor() {
        let last = page(vec![1], "stale-cursor", false);
        assert!(last.next_token().is_start());

        let more = page(vec![1], "c1", true);
        assert_eq!(more.next_token().as_str(), "c1");
    }

    #[tokio::test]
    async fn test_drain_follows_cursors_in_order() {
        let listing = Scripted::new(vec![
            page(vec![1, 2], "c1", true),
            page(vec![3], "c2", true),
            page(vec![4], "ignored", false),
        ]);

        let drained = drain(&listing).await.unwrap();
        assert_eq!(drained.items, vec![1, 2, 3, 4]);
        assert_eq!(drained.pages, 3);
        assert_eq!(
            *listing.calls.lock(),
            vec!["start", "resume:c1", "resume:c2"]
        );
    }

    #[tokio::test]
    async fn test_has_more_without_cursor_is_rejected() {
        let listing = Scripted::new(vec![page(vec![1], "", true)]);
        let err = fetch(&listing, &PageToken::start()).await.unwrap_err();
        assert!(matches!(
            err,
            DropboxError::Pagination(PaginationError::MissingCursor { .. })
        ));
    }

    #[test]
    fn test_require_cursor() {
        assert!(require_cursor(ListKind::Groups, "c").is_ok());
        assert!(matches!(
            require_cursor(ListKind::Groups, ""),
            Err(DropboxError::Pagination(PaginationError::EmptyCursor { .. }))
        ));
    }
}
