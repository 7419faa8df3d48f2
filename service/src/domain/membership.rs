//! [`Membership`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::From;
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::User;
use crate::domain::{team, user};

/// Relation between a [`User`] and a team, carrying a [`Role`] and an
/// acceptance state.
#[derive(Clone, Copy, Debug, From)]
pub struct Membership {
    /// ID of the [`User`] side of this [`Membership`].
    pub user_id: user::Id,

    /// ID of the team side of this [`Membership`].
    pub team_id: team::Id,

    /// [`Role`] of the [`User`] within the team.
    pub role: Role,

    /// Indicator whether the invitation behind this [`Membership`] has been
    /// accepted.
    pub accepted: bool,

    /// [`DateTime`] when this [`Membership`] was created.
    pub created_at: CreationDateTime,
}

/// Role of a [`User`] within a team.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[repr(u8)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular member.
    Member = 0,

    /// Administrator of the team.
    Admin = 1,

    /// Owner of the team.
    Owner = 2,
}

impl Role {
    /// Converts this [`Role`] into its [`u8`] representation.
    #[must_use]
    pub const fn u8(self) -> u8 {
        self as u8
    }

    /// Indicates whether this [`Role`] is [`Role::Admin`] or [`Role::Owner`].
    #[must_use]
    pub const fn is_admin_or_owner(self) -> bool {
        matches!(self, Self::Admin | Self::Owner)
    }

    /// Indicates whether this [`Role`] may create entities within the
    /// team.
    ///
    /// A team identity with a [`Role`] lacking this capability is
    /// read-only.
    #[must_use]
    pub const fn can_create_entity(self) -> bool {
        self.is_admin_or_owner()
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for Role {
    accepts!(INT2);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        match u8::try_from(i16::from_sql(ty, raw)?)? {
            v if Self::Member.u8() == v => Ok(Self::Member),
            v if Self::Admin.u8() == v => Ok(Self::Admin),
            v if Self::Owner.u8() == v => Ok(Self::Owner),
            v => Err(format!("invalid `membership::Role` value: {v}").into()),
        }
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Role {
    accepts!(INT2);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        i16::from(self.u8()).to_sql(ty, w)
    }
}

/// [`DateTime`] when a [`Membership`] was created.
pub type CreationDateTime = DateTimeOf<(Membership, unit::Creation)>;
