//! Member read model definition.

pub mod list {
    //! Organization member listing definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    #[cfg(doc)]
    use crate::domain::User;
    use crate::domain::{membership, team, user};

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = Member;

    /// Cursor pointing to a specific member in a list.
    ///
    /// The ordering key of the listing is the member's [`user::Id`], so the
    /// cursor is the id of the last row seen.
    pub type Cursor = user::Id;

    /// One row of the organization member listing.
    #[derive(Clone, Debug)]
    pub struct Member {
        /// ID of the [`User`] behind this [`Member`].
        pub id: user::Id,

        /// [`user::Username`] of this [`Member`].
        pub username: Option<user::Username>,

        /// [`user::Email`] of this [`Member`].
        pub email: user::Email,

        /// [`membership::Role`] of this [`Member`] within the organization.
        pub role: membership::Role,

        /// Indicator whether this [`Member`] has accepted the invitation.
        ///
        /// `false` means the invitation is still pending.
        pub accepted: bool,

        /// Indicator whether this [`Member`] has opted out of being
        /// impersonated.
        pub disable_impersonation: bool,

        /// Teams this [`Member`] belongs to, in [`team::Name`] order.
        pub teams: Vec<TeamTag>,
    }

    /// Tag of a team a [`Member`] belongs to.
    #[derive(Clone, Debug)]
    pub struct TeamTag {
        /// [`team::Id`] of the team.
        pub id: team::Id,

        /// [`team::Name`] of the team.
        pub name: team::Name,

        /// [`team::Slug`] of the team.
        pub slug: Option<team::Slug>,
    }

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug)]
    pub struct Filter {
        /// Organization whose members are listed.
        pub organization: team::Id,
    }

    /// Total count of members in the listing.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
