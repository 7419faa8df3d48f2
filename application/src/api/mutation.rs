//! GraphQL [`Mutation`]s definitions.

use common::DateTime;
use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Invites the `User` with the provided email into the authenticated
    /// `User`'s organization.
    ///
    /// The invited `User` receives a pending membership, listed among the
    /// organization `Member`s until accepted or revoked.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_PERMITTED` - the authenticated `User` may not grant the
    ///                     provided role;
    /// - `EMAIL_NOT_REGISTERED` - no `User` is registered under the provided
    ///                            email;
    /// - `ALREADY_MEMBER` - the invited `User` is a member of the
    ///                      organization already.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "inviteMember",
            otel.name = Self::SPAN_NAME,
            role = ?role,
        ),
    )]
    pub async fn invite_member(
        email: api::member::Email,
        role: api::member::Role,
        ctx: &Context,
    ) -> Result<InviteResult, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let organization = api::Query::my_organization(my_id, ctx).await?;

        ctx.service()
            .execute(command::InviteMember {
                actor: my_id.into(),
                organization,
                email: email.into(),
                role: role.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Removes the `Member` with the provided ID from the authenticated
    /// `User`'s organization.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_PERMITTED` - the authenticated `User` may not remove the
    ///                     `Member`;
    /// - `NOT_MEMBER` - the `User` with the provided ID is not a member of
    ///                  the organization;
    /// - `SELF_REMOVAL` - `Member`s cannot remove themselves.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "removeMember",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn remove_member(
        id: api::member::Id,
        ctx: &Context,
    ) -> Result<api::member::Id, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let organization = api::Query::my_organization(my_id, ctx).await?;

        ctx.service()
            .execute(command::RemoveMember {
                actor: my_id.into(),
                organization,
                member: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| id)
    }
}

/// Result of a `Member` invitation.
#[derive(Clone, Copy, Debug)]
pub struct InviteResult(service::domain::Membership);

impl From<service::domain::Membership> for InviteResult {
    fn from(membership: service::domain::Membership) -> Self {
        Self(membership)
    }
}

/// Result of a `Member` invitation.
#[graphql_object(name = "InviteMemberResult", context = Context)]
impl InviteResult {
    /// ID of the invited `User`.
    #[must_use]
    pub fn user_id(&self) -> api::member::Id {
        self.0.user_id.into()
    }

    /// Role granted to the invited `User`.
    #[must_use]
    pub fn role(&self) -> api::member::Role {
        self.0.role.into()
    }

    /// Indicator whether the invitation has been accepted.
    ///
    /// Always `false` right after the invitation.
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.0.accepted
    }

    /// `DateTime` when the invitation was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

impl AsError for command::invite_member::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ALREADY_MEMBER"]
                #[status = CONFLICT]
                #[message = "`User` with the provided email is a member of \
                             the organization already"]
                AlreadyMember,

                #[code = "EMAIL_NOT_REGISTERED"]
                #[status = NOT_FOUND]
                #[message = "No `User` is registered under the provided email"]
                EmailNotRegistered,

                #[code = "NOT_PERMITTED"]
                #[status = FORBIDDEN]
                #[message = "Authenticated `User` may not invite members with \
                             the provided role"]
                NotPermitted,
            }
        }

        match self {
            Self::AlreadyMember(_) => Some(Error::AlreadyMember.into()),
            Self::Db(e) => e.try_as_error(),
            Self::EmailNotRegistered(_) => {
                Some(Error::EmailNotRegistered.into())
            }
            Self::NotPermitted => Some(Error::NotPermitted.into()),
        }
    }
}

impl AsError for command::remove_member::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NOT_MEMBER"]
                #[status = NOT_FOUND]
                #[message = "`User` with the provided ID is not a member of \
                             the organization"]
                NotMember,

                #[code = "NOT_PERMITTED"]
                #[status = FORBIDDEN]
                #[message = "Authenticated `User` may not remove the `Member`"]
                NotPermitted,

                #[code = "SELF_REMOVAL"]
                #[status = BAD_REQUEST]
                #[message = "`Member`s cannot remove themselves"]
                SelfRemoval,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotMember(_) => Some(Error::NotMember.into()),
            Self::NotPermitted => Some(Error::NotPermitted.into()),
            Self::SelfRemoval => Some(Error::SelfRemoval.into()),
        }
    }
}
