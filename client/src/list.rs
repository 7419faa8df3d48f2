//! [`MemberList`] view model definitions.

use common::Handler;

use crate::member::{Cursor, Member, Page, PageRequest};

/// Loading state of a [`MemberList`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// No fetch is in flight.
    Idle,

    /// A page fetch is in flight.
    Fetching,
}

/// Accumulator of member listing [`Page`]s for an infinite-scroll view.
///
/// Rows are appended in listing order, exactly as the server returns them.
/// At most one fetch is in flight at a time; requests made while one is
/// pending are suppressed, not queued.
#[derive(Debug)]
pub struct MemberList {
    /// Accumulated [`Member`] rows, flattened across [`Page`]s.
    rows: Vec<Member>,

    /// [`Cursor`] to resume the listing with.
    next_cursor: Option<Cursor>,

    /// Total count of rows reported by the last applied [`Page`].
    total_row_count: Option<usize>,

    /// Current loading [`State`].
    state: State,

    /// Epoch guarding against applying [`Page`]s of a discarded listing.
    epoch: u64,

    /// Number of rows requested per [`Page`].
    page_size: usize,
}

/// Handle of a [`Page`] fetch begun on a [`MemberList`].
///
/// Must be fed back via [`MemberList::apply_page()`] or
/// [`MemberList::abort()`].
#[derive(Clone, Debug)]
pub struct PageToken {
    /// [`MemberList`] epoch this fetch belongs to.
    epoch: u64,

    /// [`PageRequest`] to send to the server.
    pub request: PageRequest,
}

impl MemberList {
    /// Default number of rows requested per [`Page`].
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    /// Creates a new empty [`MemberList`] requesting
    /// [`MemberList::DEFAULT_PAGE_SIZE`] rows per [`Page`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_page_size(Self::DEFAULT_PAGE_SIZE)
    }

    /// Creates a new empty [`MemberList`] requesting the provided number of
    /// rows per [`Page`].
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            rows: Vec::new(),
            next_cursor: None,
            total_row_count: None,
            state: State::Idle,
            epoch: 0,
            page_size,
        }
    }

    /// Returns the accumulated [`Member`] rows, in listing order.
    #[must_use]
    pub fn rows(&self) -> &[Member] {
        &self.rows
    }

    /// Returns the total count of rows reported by the server, if any
    /// [`Page`] has been applied yet.
    #[must_use]
    pub fn total_row_count(&self) -> Option<usize> {
        self.total_row_count
    }

    /// Indicates whether a [`Page`] fetch is in flight.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.state == State::Fetching
    }

    /// Indicates whether every row the server reported has been fetched.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.total_row_count
            .is_some_and(|total| self.rows.len() >= total)
    }

    /// Begins fetching the next [`Page`], returning the [`PageToken`] to
    /// perform it with.
    ///
    /// [`None`] is returned when a fetch is in flight already, or when the
    /// listing is exhausted.
    pub fn begin_next_page(&mut self) -> Option<PageToken> {
        if self.is_fetching() || self.is_exhausted() {
            return None;
        }

        self.state = State::Fetching;
        Some(PageToken {
            epoch: self.epoch,
            request: PageRequest {
                limit: self.page_size,
                cursor: self.next_cursor.clone(),
            },
        })
    }

    /// Applies the fetched [`Page`], appending its rows to the accumulated
    /// ones.
    ///
    /// A [`Page`] of a discarded listing (begun before the last
    /// [`MemberList::invalidate()`] call) is dropped without touching the
    /// accumulated state.
    pub fn apply_page(&mut self, token: &PageToken, page: Page) {
        if token.epoch != self.epoch {
            tracing::debug!("dropping page of a discarded listing");
            return;
        }

        let Page {
            rows,
            next_cursor,
            total_row_count,
        } = page;

        self.rows.extend(rows);
        self.next_cursor = next_cursor;
        self.total_row_count = Some(total_row_count);
        self.state = State::Idle;
    }

    /// Aborts the fetch begun with the provided [`PageToken`], keeping the
    /// accumulated rows intact.
    pub fn abort(&mut self, token: &PageToken) {
        if token.epoch == self.epoch {
            self.state = State::Idle;
        }
    }

    /// Discards the accumulated listing, so it restarts from the first
    /// [`Page`].
    ///
    /// Any in-flight fetch becomes stale: its [`Page`] will be dropped on
    /// arrival.
    pub fn invalidate(&mut self) {
        self.rows.clear();
        self.next_cursor = None;
        self.total_row_count = None;
        self.state = State::Idle;
        self.epoch += 1;
    }

    /// Indicates whether the next [`Page`] should be fetched for the
    /// provided [`ScrollMetrics`].
    ///
    /// Meant to be evaluated both on scroll events and after renders, so a
    /// listing shorter than the viewport keeps fetching until it fills.
    #[must_use]
    pub fn should_fetch_on_scroll(&self, metrics: ScrollMetrics) -> bool {
        !self.is_fetching()
            && !self.is_exhausted()
            && metrics.is_near_bottom(ScrollMetrics::DEFAULT_THRESHOLD)
    }
}

impl Default for MemberList {
    fn default() -> Self {
        Self::new()
    }
}

/// Scroll position of the viewport rendering a [`MemberList`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    /// Total height of the scrollable content.
    pub scroll_height: f64,

    /// Current scroll offset from the top.
    pub scroll_top: f64,

    /// Height of the visible viewport.
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Default distance to the bottom triggering the next [`Page`] fetch.
    pub const DEFAULT_THRESHOLD: f64 = 300.0;

    /// Indicates whether the viewport is within the provided `threshold` of
    /// the bottom of the scrollable content.
    #[must_use]
    pub fn is_near_bottom(self, threshold: f64) -> bool {
        self.scroll_height - self.scroll_top - self.viewport_height < threshold
    }
}

/// Fetches the next [`Page`] of the provided [`MemberList`] via the provided
/// `transport`.
///
/// Returns `false` when no fetch was begun (one is in flight already, or the
/// listing is exhausted). On transport errors the accumulated rows are kept
/// and the [`MemberList`] returns to idle.
///
/// # Errors
///
/// Propagates the `transport` error, if any.
pub async fn fetch_next_page<T>(
    list: &mut MemberList,
    transport: &T,
) -> Result<bool, T::Err>
where
    T: Handler<PageRequest, Ok = Page>,
{
    let Some(token) = list.begin_next_page() else {
        return Ok(false);
    };

    match transport.execute(token.request.clone()).await {
        Ok(page) => {
            list.apply_page(&token, page);
            Ok(true)
        }
        Err(e) => {
            list.abort(&token);
            Err(e)
        }
    }
}

#[cfg(test)]
mod spec {
    use std::convert::Infallible;

    use common::Handler;

    use crate::member::{Cursor, Member, Page, PageRequest, Role};

    use super::{fetch_next_page, MemberList, ScrollMetrics};

    fn member(email: &str) -> Member {
        Member {
            id: crate::member::Id::new(),
            username: None,
            email: email.to_owned(),
            role: Role::Member,
            accepted: true,
            disable_impersonation: false,
            teams: Vec::new(),
        }
    }

    fn page(emails: &[&str], next: Option<&str>, total: usize) -> Page {
        Page {
            rows: emails.iter().map(|e| member(e)).collect(),
            next_cursor: next.map(Cursor::from),
            total_row_count: total,
        }
    }

    /// Transport returning canned [`Page`]s in order.
    struct Canned(std::cell::RefCell<Vec<Page>>);

    impl Handler<PageRequest> for Canned {
        type Ok = Page;
        type Err = Infallible;

        async fn execute(
            &self,
            _: PageRequest,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(self.0.borrow_mut().remove(0))
        }
    }

    #[test]
    fn accumulates_rows_in_order_without_dedup() {
        let mut list = MemberList::new();

        let first = list.begin_next_page().unwrap();
        assert_eq!(first.request.cursor, None);
        list.apply_page(&first, page(&["a@x.io", "b@x.io"], Some("b"), 3));
        assert_eq!(list.rows().len(), 2);
        assert!(!list.is_exhausted());

        let second = list.begin_next_page().unwrap();
        assert_eq!(second.request.cursor, Some(Cursor::from("b")));
        list.apply_page(&second, page(&["b@x.io"], None, 3));

        let emails =
            list.rows().iter().map(|m| m.email.as_str()).collect::<Vec<_>>();
        assert_eq!(emails, ["a@x.io", "b@x.io", "b@x.io"]);
        assert!(list.is_exhausted());
        assert_eq!(list.begin_next_page().map(|t| t.request), None);
    }

    #[test]
    fn suppresses_concurrent_fetches() {
        let mut list = MemberList::new();

        let token = list.begin_next_page().unwrap();
        assert!(list.is_fetching());
        assert!(list.begin_next_page().is_none());

        list.abort(&token);
        assert!(!list.is_fetching());
        assert!(list.begin_next_page().is_some());
    }

    #[test]
    fn stale_page_is_dropped_after_invalidation() {
        let mut list = MemberList::new();

        let token = list.begin_next_page().unwrap();
        list.invalidate();
        list.apply_page(&token, page(&["a@x.io"], None, 1));

        assert_eq!(list.rows().len(), 0);
        assert_eq!(list.total_row_count(), None);
        assert!(!list.is_fetching());
    }

    #[test]
    fn error_keeps_accumulated_rows() {
        let mut list = MemberList::new();

        let first = list.begin_next_page().unwrap();
        list.apply_page(&first, page(&["a@x.io"], Some("a"), 2));

        let failing = list.begin_next_page().unwrap();
        list.abort(&failing);

        assert_eq!(list.rows().len(), 1);
        assert!(!list.is_fetching());
        let retry = list.begin_next_page().unwrap();
        assert_eq!(retry.request.cursor, Some(Cursor::from("a")));
    }

    #[test]
    fn scroll_threshold_triggers_near_bottom_only() {
        let list = MemberList::new();

        assert!(list.should_fetch_on_scroll(ScrollMetrics {
            scroll_height: 1000.0,
            scroll_top: 500.0,
            viewport_height: 300.0,
        }));
        assert!(!list.should_fetch_on_scroll(ScrollMetrics {
            scroll_height: 2000.0,
            scroll_top: 0.0,
            viewport_height: 300.0,
        }));

        // Short lists keep fetching until the viewport fills.
        assert!(list.should_fetch_on_scroll(ScrollMetrics {
            scroll_height: 200.0,
            scroll_top: 0.0,
            viewport_height: 300.0,
        }));
    }

    #[tokio::test]
    async fn drives_pages_until_exhausted() {
        let emails = (0..25).map(|i| format!("m{i}@x.io")).collect::<Vec<_>>();
        let refs = emails.iter().map(String::as_str).collect::<Vec<_>>();
        let transport = Canned(std::cell::RefCell::new(vec![
            page(&refs[..10], Some("9"), 25),
            page(&refs[10..20], Some("19"), 25),
            page(&refs[20..], None, 25),
        ]));
        let mut list = MemberList::new();

        assert!(fetch_next_page(&mut list, &transport).await.unwrap());
        assert_eq!(list.rows().len(), 10);
        assert!(fetch_next_page(&mut list, &transport).await.unwrap());
        assert_eq!(list.rows().len(), 20);
        assert!(fetch_next_page(&mut list, &transport).await.unwrap());
        assert_eq!(list.rows().len(), 25);

        assert!(list.is_exhausted());
        assert!(!fetch_next_page(&mut list, &transport).await.unwrap());
        assert_eq!(list.total_row_count(), Some(25));
    }
}
