//! Wire-mirror types of the member listing API.

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the member listing.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// ID of the user behind this [`Member`].
    pub id: Id,

    /// Username of this [`Member`].
    pub username: Option<String>,

    /// Email of this [`Member`].
    pub email: String,

    /// [`Role`] of this [`Member`] within the organization.
    pub role: Role,

    /// Indicator whether this [`Member`] has accepted the invitation.
    ///
    /// `false` means the invitation is still pending.
    pub accepted: bool,

    /// Indicator whether this [`Member`] has opted out of being impersonated.
    pub disable_impersonation: bool,

    /// Tags of teams this [`Member`] belongs to.
    pub teams: Vec<TeamTag>,
}

/// ID of a [`Member`]'s user.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

/// Tag of a team a [`Member`] belongs to.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamTag {
    /// ID of the team.
    pub id: Uuid,

    /// Name of the team.
    pub name: String,

    /// URL slug of the team.
    pub slug: Option<String>,
}

/// Role of a [`Member`] within an organization.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular member.
    Member,

    /// Administrator of the organization.
    Admin,

    /// Owner of the organization.
    Owner,
}

impl Role {
    /// Indicates whether this [`Role`] is [`Role::Admin`] or [`Role::Owner`].
    #[must_use]
    pub const fn is_admin_or_owner(self) -> bool {
        matches!(self, Self::Admin | Self::Owner)
    }
}

/// Opaque cursor resuming the member listing after the last seen row.
///
/// Issued by the server and passed back verbatim.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[from(String, &str)]
#[serde(transparent)]
pub struct Cursor(String);

/// One page of the member listing, as returned by the server.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// [`Member`] rows of this [`Page`], in listing order.
    pub rows: Vec<Member>,

    /// [`Cursor`] resuming the listing after this [`Page`].
    ///
    /// Absent when the listing is exhausted.
    pub next_cursor: Option<Cursor>,

    /// Total count of rows the listing would produce.
    pub total_row_count: usize,
}

/// Request of a single member listing [`Page`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Maximum number of rows to return.
    pub limit: usize,

    /// [`Cursor`] to resume the listing after, if any.
    pub cursor: Option<Cursor>,
}

#[cfg(test)]
mod spec {
    use super::{Page, Role};

    #[test]
    fn deserializes_wire_page() {
        let page: Page = serde_json::from_str(
            r#"{
                "rows": [{
                    "id": "8c7412a2-4231-4b8a-b5b1-e4c6a1a0e2f5",
                    "username": "alice",
                    "email": "alice@example.com",
                    "role": "ADMIN",
                    "accepted": true,
                    "disableImpersonation": false,
                    "teams": [{
                        "id": "6fa459ea-ee8a-3ca4-894e-db77e160355e",
                        "name": "Support",
                        "slug": "support"
                    }]
                }],
                "nextCursor": "8c7412a2-4231-4b8a-b5b1-e4c6a1a0e2f5",
                "totalRowCount": 42
            }"#,
        )
        .unwrap();

        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].role, Role::Admin);
        assert_eq!(page.rows[0].teams[0].slug.as_deref(), Some("support"));
        assert!(page.next_cursor.is_some());
        assert_eq!(page.total_row_count, 42);
    }
}
