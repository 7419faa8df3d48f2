//! Abstractions for forward cursor pagination.

/// Generic pagination connection.
#[derive(Clone, Debug)]
pub struct Connection<C, I> {
    /// [`Edge`]s in this [`Connection`].
    pub edges: Vec<Edge<C, I>>,

    /// Indicator whether this [`Connection`] has more nodes after the last
    /// [`Edge`].
    pub has_more: bool,
}

/// A page in a [`Connection`].
pub type Page<C, I> = Connection<C, I>;

impl<C, I> Connection<C, I> {
    /// Creates a new [`Connection`] from the provided [`Edge`]s.
    #[must_use]
    pub fn new(
        edges: impl IntoIterator<Item = impl Into<Edge<C, I>>>,
        has_more: bool,
    ) -> Self {
        Self {
            edges: edges.into_iter().map(Into::into).collect::<Vec<_>>(),
            has_more,
        }
    }

    /// Returns the cursor resuming this [`Connection`] after its last
    /// [`Edge`].
    ///
    /// [`None`] means the listing is exhausted.
    #[must_use]
    pub fn next_cursor(&self) -> Option<C>
    where
        C: Clone,
    {
        self.has_more
            .then(|| self.edges.last().map(|e| e.cursor.clone()))
            .flatten()
    }

    /// Returns [`PageInfo`] of this [`Connection`].
    #[must_use]
    pub fn page_info(&self) -> PageInfo<C>
    where
        C: Clone,
    {
        PageInfo {
            end_cursor: self.edges.last().map(|e| e.cursor.clone()),
            has_next_page: self.has_more,
        }
    }
}

/// Information about a page in a [`Connection`].
#[derive(Clone, Copy, Debug)]
pub struct PageInfo<C> {
    /// Last cursor on this page.
    pub end_cursor: Option<C>,

    /// Indicator whether [`Connection`] has a next page.
    pub has_next_page: bool,
}

/// An edge in a [`Connection`].
#[derive(Clone, Copy, Debug)]
pub struct Edge<C, I> {
    /// Cursor of this [`Edge`].
    pub cursor: C,

    /// Node of this [`Edge`].
    pub node: I,
}

impl<C, I> From<(C, I)> for Edge<C, I> {
    fn from((cursor, node): (C, I)) -> Self {
        Self { cursor, node }
    }
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug)]
pub struct Arguments<C> {
    /// Number of items to return.
    pub first: usize,

    /// Cursor after which to return items.
    pub after: Option<C>,
}

impl<C> Arguments<C> {
    /// Creates a new [`Arguments`], falling back to the `default` limit when
    /// `first` is not provided.
    ///
    /// [`None`] is returned if the provided limit cannot be represented.
    pub fn new<Num>(
        first: Option<Num>,
        after: Option<C>,
        default: Num,
    ) -> Option<Self>
    where
        Num: TryInto<usize>,
    {
        Some(Self {
            first: first.unwrap_or(default).try_into().ok()?,
            after,
        })
    }

    /// Returns cursor requested by this [`Arguments`].
    #[must_use]
    pub fn cursor(&self) -> Option<&C> {
        self.after.as_ref()
    }

    /// Returns limit requested by this [`Arguments`].
    #[must_use]
    pub fn limit(&self) -> usize {
        self.first
    }
}

/// Pagination selector.
#[derive(Clone, Copy, Debug)]
pub struct Selector<C, F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments<C>,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($cursor:ty, $node:ty, $filter:ty) => {
        #[doc = "Edge of a [`Connection`]."]
        pub type Edge = $crate::pagination::Edge<$cursor, $node>;

        #[doc = "A [`Connection`] of [`$node`]s."]
        pub type Connection = $crate::pagination::Connection<$cursor, $node>;

        #[doc = "A [`Page`] of [`$node`]s."]
        pub type Page = $crate::pagination::Page<$cursor, $node>;

        #[doc = "An information about a [`Page`]."]
        pub type PageInfo = $crate::pagination::PageInfo<$cursor>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments<$cursor>;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$cursor, $filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Connection};

    #[test]
    fn next_cursor_present_only_when_more() {
        let full = Connection::new([(3_i32, "c"), (7, "g")], true);
        assert_eq!(full.next_cursor(), Some(7));
        assert!(full.page_info().has_next_page);

        let last = Connection::new([(9_i32, "i")], false);
        assert_eq!(last.next_cursor(), None);
        assert!(!last.page_info().has_next_page);
        assert_eq!(last.page_info().end_cursor, Some(9));
    }

    #[test]
    fn arguments_fall_back_to_default_limit() {
        let args = Arguments::<i32>::new(None, None, 10_i32).unwrap();
        assert_eq!(args.limit(), 10);
        assert_eq!(args.cursor(), None);

        let args = Arguments::new(Some(25_i32), Some(4_i32), 10).unwrap();
        assert_eq!(args.limit(), 25);
        assert_eq!(args.cursor(), Some(&4));

        assert!(Arguments::<i32>::new(Some(-1_i32), None, 10).is_none());
    }
}
