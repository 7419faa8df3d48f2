//! [`Command`] definition.

pub mod authorize_user_session;
pub mod invite_member;
pub mod remove_member;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession, invite_member::InviteMember,
    remove_member::RemoveMember,
};
