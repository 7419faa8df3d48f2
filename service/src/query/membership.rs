//! [`Query`] collection related to a single [`Membership`].

use common::operations::By;

use crate::domain::{team, user, Membership};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Membership`] of a [`User`] within a team.
///
/// [`User`]: crate::domain::User
pub type OfUser = DatabaseQuery<By<Option<Membership>, (user::Id, team::Id)>>;
