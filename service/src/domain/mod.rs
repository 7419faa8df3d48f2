//! Domain definitions.

pub mod membership;
pub mod team;
pub mod user;

pub use self::{membership::Membership, user::User};
