//! Actable identity read model definition.
//!
//! An actable identity is an identity a signed-in [`User`] may act as: their
//! personal profile, or any non-organization team they have an accepted
//! [`Membership`] in.
//!
//! [`Membership`]: crate::domain::Membership

use std::iter;

#[cfg(doc)]
use crate::domain::User;
use crate::domain::{membership, team, user};

/// One entry of the "act as" list.
#[derive(Clone, Debug)]
pub struct Identity {
    /// ID of the team this [`Identity`] represents.
    ///
    /// [`None`] means the [`User`]'s personal profile.
    pub team_id: Option<team::Id>,

    /// Display name of this [`Identity`].
    pub name: Option<String>,

    /// URL slug of this [`Identity`].
    ///
    /// Team identities are prefixed with `team/`.
    pub slug: Option<String>,

    /// Avatar image URL of this [`Identity`].
    pub image: Option<String>,

    /// [`membership::Role`] within the team, present only for team entries.
    pub role: Option<membership::Role>,

    /// Indicator whether the viewer may not create entities under this
    /// [`Identity`].
    pub read_only: bool,
}

/// Brand of an organization, resolved for building image URLs.
#[derive(Clone, Debug)]
pub struct Brand {
    /// Full domain of the organization brand, if configured.
    pub full_domain: Option<String>,
}

/// Source data the [`Identity`] list is assembled from: the viewer and their
/// accepted team [`Membership`]s.
///
/// [`Membership`]: crate::domain::Membership
#[derive(Clone, Debug)]
pub struct Source {
    /// ID of the viewer.
    pub id: user::Id,

    /// [`user::Username`] of the viewer.
    pub username: Option<user::Username>,

    /// Display [`user::Name`] of the viewer.
    pub name: Option<user::Name>,

    /// Organization the viewer is bound to.
    pub organization_id: Option<team::Id>,

    /// Accepted team [`Membership`]s of the viewer.
    ///
    /// [`Membership`]: crate::domain::Membership
    pub teams: Vec<SourceTeam>,
}

/// One accepted team [`Membership`] of a [`Source`] viewer.
///
/// [`Membership`]: crate::domain::Membership
#[derive(Clone, Debug)]
pub struct SourceTeam {
    /// [`team::Id`] of the team.
    pub id: team::Id,

    /// [`team::Name`] of the team.
    pub name: team::Name,

    /// [`team::Slug`] of the team.
    pub slug: Option<team::Slug>,

    /// [`team::Kind`] of the team.
    pub kind: team::Kind,

    /// [`membership::Role`] of the viewer within the team.
    pub role: membership::Role,
}

impl Source {
    /// Assembles the ordered [`Identity`] list out of this [`Source`].
    ///
    /// The personal identity goes first and is never read-only.
    /// Organization-kind teams are filtered out: an organization is not an
    /// actable team. Image URLs are built against the `brand` domain, falling
    /// back to the `base_url` of the application.
    #[must_use]
    pub fn into_identities(
        self,
        brand: Option<&Brand>,
        base_url: &str,
    ) -> Vec<Identity> {
        let domain = brand
            .and_then(|b| b.full_domain.as_deref())
            .unwrap_or(base_url);

        let personal = Identity {
            team_id: None,
            name: self.name.map(|n| n.to_string()),
            slug: self.username.as_ref().map(ToString::to_string),
            image: self
                .username
                .map(|u| format!("{domain}/{u}/avatar.png")),
            role: None,
            read_only: false,
        };

        iter::once(personal)
            .chain(
                self.teams
                    .into_iter()
                    .filter(|t| !t.kind.is_organization())
                    .map(|t| Identity {
                        team_id: Some(t.id),
                        name: Some(t.name.to_string()),
                        slug: t.slug.as_ref().map(|s| format!("team/{s}")),
                        image: t
                            .slug
                            .map(|s| format!("{domain}/team/{s}/avatar.png")),
                        role: Some(t.role),
                        read_only: !t.role.can_create_entity(),
                    }),
            )
            .collect()
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::{membership::Role, team, user};

    use super::{Brand, Source, SourceTeam};

    fn source() -> Source {
        Source {
            id: user::Id::new(),
            username: "alice".parse().ok(),
            name: "Alice".parse().ok(),
            organization_id: Some(team::Id::new()),
            teams: vec![
                SourceTeam {
                    id: team::Id::new(),
                    name: "Support".parse().unwrap(),
                    slug: "support".parse().ok(),
                    kind: team::Kind::Team,
                    role: Role::Member,
                },
                SourceTeam {
                    id: team::Id::new(),
                    name: "Acme".parse().unwrap(),
                    slug: "acme".parse().ok(),
                    kind: team::Kind::Organization,
                    role: Role::Owner,
                },
                SourceTeam {
                    id: team::Id::new(),
                    name: "Sales".parse().unwrap(),
                    slug: None,
                    kind: team::Kind::Team,
                    role: Role::Admin,
                },
            ],
        }
    }

    #[test]
    fn personal_identity_goes_first() {
        let ids = source().into_identities(None, "https://app.example.com");

        let personal = &ids[0];
        assert_eq!(personal.team_id, None);
        assert!(!personal.read_only);
        assert_eq!(personal.slug.as_deref(), Some("alice"));
        assert_eq!(
            personal.image.as_deref(),
            Some("https://app.example.com/alice/avatar.png"),
        );
        assert_eq!(
            ids.iter().filter(|i| i.team_id.is_none()).count(),
            1,
            "exactly one personal identity",
        );
    }

    #[test]
    fn organizations_are_not_actable_teams() {
        let ids = source().into_identities(None, "https://app.example.com");

        assert_eq!(ids.len(), 3);
        assert!(ids
            .iter()
            .all(|i| i.name.as_deref() != Some("Acme")));
    }

    #[test]
    fn read_only_follows_entity_creation_capability() {
        let ids = source().into_identities(None, "https://app.example.com");

        let support = ids
            .iter()
            .find(|i| i.name.as_deref() == Some("Support"))
            .unwrap();
        assert!(support.read_only);
        assert_eq!(support.slug.as_deref(), Some("team/support"));

        let sales = ids
            .iter()
            .find(|i| i.name.as_deref() == Some("Sales"))
            .unwrap();
        assert!(!sales.read_only);
        assert_eq!(sales.slug, None);
        assert_eq!(sales.image, None);
    }

    #[test]
    fn brand_domain_overrides_base_url() {
        let brand = Brand {
            full_domain: Some("https://acme.example.com".into()),
        };
        let ids = source()
            .into_identities(Some(&brand), "https://app.example.com");

        assert_eq!(
            ids[0].image.as_deref(),
            Some("https://acme.example.com/alice/avatar.png"),
        );
    }
}
