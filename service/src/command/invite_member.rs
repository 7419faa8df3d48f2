//! [`Command`] for inviting a [`User`] into an organization.

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{membership, team, user, Membership, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for inviting a [`User`] into an organization.
///
/// The invited [`User`] receives a pending [`Membership`], listed among the
/// organization members until accepted or revoked.
#[derive(Clone, Debug)]
pub struct InviteMember {
    /// ID of the [`User`] performing the invitation.
    pub actor: user::Id,

    /// ID of the organization to invite into.
    pub organization: team::Id,

    /// [`user::Email`] of the [`User`] to invite.
    pub email: user::Email,

    /// [`membership::Role`] to grant to the invited [`User`].
    pub role: membership::Role,
}

impl<Db> Command<InviteMember> for Service<Db>
where
    Db: Database<
            Select<By<Option<Membership>, (user::Id, team::Id)>>,
            Ok = Option<Membership>,
            Err = Traced<database::Error>,
        > + for<'e> Database<
            Select<By<Option<User>, &'e user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Insert<Membership>, Err = Traced<database::Error>>,
{
    type Ok = Membership;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: InviteMember) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let InviteMember {
            actor,
            organization,
            email,
            role,
        } = cmd;

        let acting = self
            .database()
            .execute(Select(By::new((actor, organization))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|m| m.accepted && m.role.is_admin_or_owner())
            .ok_or(E::NotPermitted)
            .map_err(tracerr::wrap!())?;
        if role == membership::Role::Owner
            && acting.role != membership::Role::Owner
        {
            return Err(tracerr::new!(E::NotPermitted));
        }

        let invited = self
            .database()
            .execute(Select(By::new(&email)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::EmailNotRegistered(email))
            .map_err(tracerr::wrap!())?;

        let existing = self
            .database()
            .execute(Select(By::new((invited.id, organization))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::AlreadyMember(invited.id)));
        }

        let membership = Membership {
            user_id: invited.id,
            team_id: organization,
            role,
            accepted: false,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(membership))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(membership)
    }
}

/// Error of [`InviteMember`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Invited [`User`] is a member of the organization already.
    #[display("`User(id: {_0})` is a member already")]
    #[from(ignore)]
    AlreadyMember(#[error(not(source))] user::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// No [`User`] is registered under the provided [`user::Email`].
    #[display("No `User` is registered under `{_0}` email")]
    #[from(ignore)]
    EmailNotRegistered(#[error(not(source))] user::Email),

    /// Acting [`User`] is not permitted to invite members.
    #[display("Acting `User` is not permitted to invite members")]
    NotPermitted,
}

#[cfg(test)]
mod spec {
    use std::collections::HashMap;

    use common::{
        operations::{By, Insert, Select},
        DateTime,
    };
    use tracerr::Traced;

    use crate::{
        domain::{membership::Role, team, user, Membership, User},
        infra::{database, Database},
        Command as _, Config, Service,
    };

    use super::{ExecutionError, InviteMember};

    /// [`Database`] stub serving canned [`Membership`] and [`User`] rows.
    #[derive(Debug, Default)]
    struct Canned {
        memberships: HashMap<(user::Id, team::Id), Membership>,
        users: Vec<User>,
    }

    impl Database<Select<By<Option<Membership>, (user::Id, team::Id)>>>
        for Canned
    {
        type Ok = Option<Membership>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Option<Membership>, (user::Id, team::Id)>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(self.memberships.get(&by.into_inner()).copied())
        }
    }

    impl<'e> Database<Select<By<Option<User>, &'e user::Email>>> for Canned {
        type Ok = Option<User>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Option<User>, &'e user::Email>>,
        ) -> Result<Self::Ok, Self::Err> {
            let email = by.into_inner();
            Ok(self.users.iter().find(|u| u.email == *email).cloned())
        }
    }

    impl Database<Insert<Membership>> for Canned {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Insert(_): Insert<Membership>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(())
        }
    }

    fn service(db: Canned) -> Service<Canned> {
        Service::new(
            Config {
                jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                    b"secret",
                ),
                base_url: "http://localhost:8080".into(),
            },
            db,
        )
    }

    fn membership(
        user_id: user::Id,
        team_id: team::Id,
        role: Role,
        accepted: bool,
    ) -> Membership {
        Membership {
            user_id,
            team_id,
            role,
            accepted,
            created_at: DateTime::now().coerce(),
        }
    }

    fn user(email: &str) -> User {
        User {
            id: user::Id::new(),
            name: None,
            username: None,
            email: email.parse().unwrap(),
            organization_id: None,
            disable_impersonation: false,
            created_at: DateTime::now().coerce(),
        }
    }

    #[tokio::test]
    async fn plain_member_cannot_invite() {
        let actor = user::Id::new();
        let organization = team::Id::new();
        let mut db = Canned::default();
        _ = db.memberships.insert(
            (actor, organization),
            membership(actor, organization, Role::Member, true),
        );

        let res = service(db)
            .execute(InviteMember {
                actor,
                organization,
                email: "new@example.com".parse().unwrap(),
                role: Role::Member,
            })
            .await;

        assert!(matches!(
            res.unwrap_err().as_ref(),
            ExecutionError::NotPermitted,
        ));
    }

    #[tokio::test]
    async fn pending_admin_cannot_invite() {
        let actor = user::Id::new();
        let organization = team::Id::new();
        let mut db = Canned::default();
        _ = db.memberships.insert(
            (actor, organization),
            membership(actor, organization, Role::Admin, false),
        );

        let res = service(db)
            .execute(InviteMember {
                actor,
                organization,
                email: "new@example.com".parse().unwrap(),
                role: Role::Member,
            })
            .await;

        assert!(matches!(
            res.unwrap_err().as_ref(),
            ExecutionError::NotPermitted,
        ));
    }

    #[tokio::test]
    async fn only_owner_grants_owner_role() {
        let actor = user::Id::new();
        let organization = team::Id::new();
        let invited = user("new@example.com");
        let mut db = Canned::default();
        _ = db.memberships.insert(
            (actor, organization),
            membership(actor, organization, Role::Admin, true),
        );
        db.users.push(invited);

        let res = service(db)
            .execute(InviteMember {
                actor,
                organization,
                email: "new@example.com".parse().unwrap(),
                role: Role::Owner,
            })
            .await;

        assert!(matches!(
            res.unwrap_err().as_ref(),
            ExecutionError::NotPermitted,
        ));
    }

    #[tokio::test]
    async fn unregistered_email_is_reported() {
        let actor = user::Id::new();
        let organization = team::Id::new();
        let mut db = Canned::default();
        _ = db.memberships.insert(
            (actor, organization),
            membership(actor, organization, Role::Owner, true),
        );

        let res = service(db)
            .execute(InviteMember {
                actor,
                organization,
                email: "unknown@example.com".parse().unwrap(),
                role: Role::Member,
            })
            .await;

        assert!(matches!(
            res.unwrap_err().as_ref(),
            ExecutionError::EmailNotRegistered(_),
        ));
    }

    #[tokio::test]
    async fn existing_member_is_not_reinvited() {
        let actor = user::Id::new();
        let organization = team::Id::new();
        let invited = user("member@example.com");
        let invited_id = invited.id;
        let mut db = Canned::default();
        _ = db.memberships.insert(
            (actor, organization),
            membership(actor, organization, Role::Owner, true),
        );
        _ = db.memberships.insert(
            (invited_id, organization),
            membership(invited_id, organization, Role::Member, true),
        );
        db.users.push(invited);

        let res = service(db)
            .execute(InviteMember {
                actor,
                organization,
                email: "member@example.com".parse().unwrap(),
                role: Role::Member,
            })
            .await;

        assert!(matches!(
            res.unwrap_err().as_ref(),
            ExecutionError::AlreadyMember(id) if *id == invited_id,
        ));
    }

    #[tokio::test]
    async fn invitation_creates_pending_membership() {
        let actor = user::Id::new();
        let organization = team::Id::new();
        let invited = user("new@example.com");
        let invited_id = invited.id;
        let mut db = Canned::default();
        _ = db.memberships.insert(
            (actor, organization),
            membership(actor, organization, Role::Admin, true),
        );
        db.users.push(invited);

        let created = service(db)
            .execute(InviteMember {
                actor,
                organization,
                email: "new@example.com".parse().unwrap(),
                role: Role::Admin,
            })
            .await
            .unwrap();

        assert_eq!(created.user_id, invited_id);
        assert_eq!(created.team_id, organization);
        assert_eq!(created.role, Role::Admin);
        assert!(!created.accepted);
    }
}
