//! GraphQL API definitions.

pub mod identity;
pub mod member;
mod mutation;
mod query;
pub mod scalar;

use juniper::EmptySubscription;

use crate::{define_error, Context};

pub use self::{
    identity::ActableIdentity, member::Member, mutation::Mutation, query::Query,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

define_error! {
    enum PrivilegeError {
        #[code = "NOT_ORGANIZATION_MEMBER"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `User` must be a member of the \
                     organization"]
        Member,
    }
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "Invalid pagination arguments"]
        Invalid,
    }
}
