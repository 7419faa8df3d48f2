//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{domain, query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";

    /// Returns the organization of the authenticated `User`, checking that
    /// they are its member.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `USER_NOT_EXISTS` - the authenticated `User` does not exist anymore;
    /// - `NO_ORGANIZATION` - the authenticated `User` belongs to no
    ///                       organization;
    /// - `NOT_ORGANIZATION_MEMBER` - the authenticated `User` has no
    ///                               membership in their organization.
    pub(crate) async fn my_organization(
        my_id: api::member::Id,
        ctx: &Context,
    ) -> Result<domain::team::Id, Error> {
        let user = ctx
            .service()
            .execute(query::user::ById::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())?;

        let organization = user
            .organization_id
            .ok_or_else(|| OrganizationError::NotJoined.into())
            .map_err(ctx.error())?;

        _ = ctx
            .service()
            .execute(query::membership::OfUser::by((user.id, organization)))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::PrivilegeError::Member.into())
            .map_err(ctx.error())?;

        Ok(organization)
    }
}

#[graphql_object(context = Context)]
impl Query {
    /// Fetches the page of `Member`s of the authenticated `User`'s
    /// organization.
    ///
    /// `Member`s are ordered by their IDs, and the `after` cursor resumes the
    /// listing after the last returned edge.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                    invalid;
    /// - `NO_ORGANIZATION` - the authenticated `User` belongs to no
    ///                       organization;
    /// - `NOT_ORGANIZATION_MEMBER` - the authenticated `User` has no
    ///                               membership in their organization.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            first = ?first,
            gql.name = "members",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn members(
        first: Option<i32>,
        after: Option<api::member::list::Cursor>,
        ctx: &Context,
    ) -> Result<api::member::list::Connection, Error> {
        const DEFAULT_PAGE_SIZE: i32 = 10;

        let my_id = ctx.current_session().await?.user_id;
        let organization = Self::my_organization(my_id, ctx).await?;

        let arguments = read::member::list::Arguments::new(
            first,
            after.map(Into::into),
            DEFAULT_PAGE_SIZE,
        )
        .ok_or_else(|| api::PaginationError::Invalid.into())
        .map_err(ctx.error())?;

        let filter = read::member::list::Filter { organization };
        ctx.service()
            .execute(query::member::List::by(read::member::list::Selector {
                arguments,
                filter,
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|conn| (conn, filter).into())
    }

    /// Returns the identities the authenticated `User` may act as: their
    /// personal profile followed by their teams.
    ///
    /// Organizations are not listed: an organization is not an actable
    /// identity.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "teamsAndUserProfiles",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn teams_and_user_profiles(
        ctx: &Context,
    ) -> Result<Vec<api::ActableIdentity>, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(query::identity::ListActable {
                user_id: my_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ids| ids.into_iter().map(Into::into).collect())
    }
}

impl AsError for query::identity::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => Some(UserError::NotExists.into()),
        }
    }
}

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`User` with the provided ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum OrganizationError {
        #[code = "NO_ORGANIZATION"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `User` belongs to no organization"]
        NotJoined,
    }
}
