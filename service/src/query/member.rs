//! [`Query`] collection related to organization members.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::read;

use super::DatabaseQuery;

/// Queries a list of members of an organization.
pub type List =
    DatabaseQuery<By<read::member::list::Page, read::member::list::Selector>>;

/// Queries total count of members of an organization.
pub type TotalCount = DatabaseQuery<
    By<read::member::list::TotalCount, read::member::list::Filter>,
>;
