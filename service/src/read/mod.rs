//! Read entities definitions.

pub mod identity;
pub mod member;

pub use self::identity::Identity;
