//! Client-side view model of the organization member directory.
//!
//! Mirrors the wire types of the member listing API and drives the
//! infinite-scroll accumulation of its pages, without any UI concerns.

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod list;
pub mod member;
pub mod permissions;

#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tokio as _;

pub use self::{
    list::{MemberList, ScrollMetrics},
    member::{Cursor, Member, Page, PageRequest, Role, TeamTag},
    permissions::{GlobalPolicy, Permissions},
};
