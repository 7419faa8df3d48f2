//! [`Member`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, read};
use uuid::Uuid;

use crate::{api::scalar, Context};

/// A member of an organization.
#[derive(Clone, Debug, From)]
pub struct Member(read::member::list::Member);

/// A `Member` of an organization.
#[graphql_object(context = Context)]
impl Member {
    /// Unique identifier of this `Member`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Username of this `Member`.
    #[must_use]
    pub fn username(&self) -> Option<Username> {
        self.0.username.clone().map(Into::into)
    }

    /// Email of this `Member`.
    #[must_use]
    pub fn email(&self) -> Email {
        self.0.email.clone().into()
    }

    /// Role of this `Member` within the organization.
    #[must_use]
    pub fn role(&self) -> Role {
        self.0.role.into()
    }

    /// Indicator whether this `Member` has accepted the invitation.
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.0.accepted
    }

    /// Indicator whether this `Member` has opted out of being impersonated.
    #[must_use]
    pub fn disable_impersonation(&self) -> bool {
        self.0.disable_impersonation
    }

    /// Teams this `Member` belongs to.
    #[must_use]
    pub fn teams(&self) -> Vec<TeamTag> {
        self.0.teams.iter().cloned().map(Into::into).collect()
    }
}

/// Unique identifier of a `Member`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::user::Id)]
#[into(domain::user::Id)]
#[graphql(name = "MemberId", transparent)]
pub struct Id(Uuid);

/// Username of a `Member`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "MemberUsername",
    with = scalar::Via::<domain::user::Username>,
)]
pub struct Username(domain::user::Username);

/// Email of a `Member`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "MemberEmail",
    with = scalar::Via::<domain::user::Email>,
)]
pub struct Email(domain::user::Email);

/// Role of a `Member` within an organization.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "MemberRole")]
pub enum Role {
    /// Regular member.
    Member,

    /// Administrator of the organization.
    Admin,

    /// Owner of the organization.
    Owner,
}

impl From<domain::membership::Role> for Role {
    fn from(role: domain::membership::Role) -> Self {
        match role {
            domain::membership::Role::Member => Self::Member,
            domain::membership::Role::Admin => Self::Admin,
            domain::membership::Role::Owner => Self::Owner,
        }
    }
}

impl From<Role> for domain::membership::Role {
    fn from(role: Role) -> Self {
        match role {
            Role::Member => Self::Member,
            Role::Admin => Self::Admin,
            Role::Owner => Self::Owner,
        }
    }
}

/// Tag of a team a [`Member`] belongs to.
#[derive(Clone, Debug, From)]
pub struct TeamTag(read::member::list::TeamTag);

/// Tag of a team a `Member` belongs to.
#[graphql_object(name = "MemberTeamTag", context = Context)]
impl TeamTag {
    /// Unique identifier of the team.
    #[must_use]
    pub fn id(&self) -> TeamId {
        self.0.id.into()
    }

    /// Name of the team.
    #[must_use]
    pub fn name(&self) -> String {
        self.0.name.to_string()
    }

    /// URL slug of the team.
    #[must_use]
    pub fn slug(&self) -> Option<String> {
        self.0.slug.as_ref().map(ToString::to_string)
    }
}

/// Unique identifier of a team.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::team::Id)]
#[into(domain::team::Id)]
#[graphql(name = "TeamId", transparent)]
pub struct TeamId(Uuid);

pub mod list {
    //! Definitions related to [`Member`] list.

    use derive_more::{AsRef, From, Into};
    use juniper::{graphql_object, GraphQLScalar};
    use service::{query, read, Query as _};

    use crate::{api::scalar, AsError, Context, Error};

    use super::Member;

    /// Cursor for the `Member` list.
    #[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
    #[graphql(
        name = "MemberListCursor",
        with = scalar::Via::<read::member::list::Cursor>,
    )]
    pub struct Cursor(pub read::member::list::Cursor);

    /// Edge in the [`Member`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Edge(read::member::list::Edge);

    /// Edge in the `Member` list.
    #[graphql_object(name = "MemberListEdge", context = Context)]
    impl Edge {
        /// Cursor of this `MemberListEdge`.
        #[must_use]
        pub fn cursor(&self) -> Cursor {
            self.0.cursor.into()
        }

        /// Node of this `MemberListEdge`.
        #[must_use]
        pub fn node(&self) -> Member {
            self.0.node.clone().into()
        }
    }

    /// Connection of the [`Member`] list.
    #[derive(Clone, Debug, From)]
    pub struct Connection {
        /// Underlying [`read::member::list::Connection`].
        conn: read::member::list::Connection,

        /// [`read::member::list::Filter`] the list was selected with.
        filter: read::member::list::Filter,
    }

    /// Connection of the `Member` list.
    #[graphql_object(name = "MemberListConnection", context = Context)]
    impl Connection {
        /// Edges in this `MemberListConnection`.
        #[must_use]
        pub fn edges(&self) -> Vec<Edge> {
            self.conn.edges.iter().cloned().map(Into::into).collect()
        }

        /// Information about the page.
        #[must_use]
        pub fn page_info(&self) -> PageInfo {
            PageInfo {
                info: self.conn.page_info(),
                filter: self.filter,
            }
        }
    }

    /// Information about a [`Connection`] page.
    #[derive(Clone, Copy, Debug)]
    pub struct PageInfo {
        /// Underlying [`read::member::list::PageInfo`].
        info: read::member::list::PageInfo,

        /// [`read::member::list::Filter`] the list was selected with.
        filter: read::member::list::Filter,
    }

    /// Information about a `MemberListConnection` page.
    #[graphql_object(name = "MemberListPageInfo", context = Context)]
    impl PageInfo {
        /// Indicator whether there is a next page.
        #[must_use]
        pub fn has_next_page(&self) -> bool {
            self.info.has_next_page
        }

        /// End cursor of the page.
        ///
        /// Feed it to the `after` argument to resume the listing.
        #[must_use]
        pub fn end_cursor(&self) -> Option<Cursor> {
            self.info.end_cursor.map(Into::into)
        }

        /// Total count of `Member` rows in the organization listing.
        pub async fn total_row_count(
            &self,
            ctx: &Context,
        ) -> Result<i32, Error> {
            ctx.service()
                .execute(query::member::TotalCount::by(self.filter))
                .await
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .map(Into::into)
        }
    }
}
