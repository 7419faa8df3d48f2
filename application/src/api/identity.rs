//! [`ActableIdentity`]-related definitions.

use juniper::GraphQLObject;
use service::read;

use crate::{api::member, Context};

/// An identity the authenticated user may act as: their personal profile or
/// one of their teams.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct ActableIdentity {
    /// ID of the team this identity represents.
    ///
    /// `null` means the personal profile of the authenticated user.
    pub team_id: Option<member::TeamId>,

    /// Display name of this identity.
    pub name: Option<String>,

    /// URL slug of this identity.
    ///
    /// Team identities are prefixed with `team/`.
    pub slug: Option<String>,

    /// Avatar image URL of this identity.
    pub image: Option<String>,

    /// Role of the authenticated user within the team.
    ///
    /// `null` for the personal profile.
    pub role: Option<member::Role>,

    /// Indicator whether the authenticated user may not create entities under
    /// this identity.
    pub read_only: bool,
}

impl From<read::Identity> for ActableIdentity {
    fn from(identity: read::Identity) -> Self {
        let read::Identity {
            team_id,
            name,
            slug,
            image,
            role,
            read_only,
        } = identity;
        Self {
            team_id: team_id.map(Into::into),
            name,
            slug,
            image,
            role: role.map(Into::into),
            read_only,
        }
    }
}
