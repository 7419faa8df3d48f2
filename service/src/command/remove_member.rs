//! [`Command`] for removing a member from an organization.

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{membership, team, user, Membership},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for removing a member from an organization.
#[derive(Clone, Copy, Debug)]
pub struct RemoveMember {
    /// ID of the [`User`] performing the removal.
    ///
    /// [`User`]: crate::domain::User
    pub actor: user::Id,

    /// ID of the organization to remove the member from.
    pub organization: team::Id,

    /// ID of the [`User`] to remove.
    ///
    /// [`User`]: crate::domain::User
    pub member: user::Id,
}

impl<Db> Command<RemoveMember> for Service<Db>
where
    Db: Database<
            Select<By<Option<Membership>, (user::Id, team::Id)>>,
            Ok = Option<Membership>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Membership, (user::Id, team::Id)>>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: RemoveMember) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RemoveMember {
            actor,
            organization,
            member,
        } = cmd;

        if actor == member {
            return Err(tracerr::new!(E::SelfRemoval));
        }

        let acting = self
            .database()
            .execute(Select(By::new((actor, organization))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|m| m.accepted && m.role.is_admin_or_owner())
            .ok_or(E::NotPermitted)
            .map_err(tracerr::wrap!())?;

        let removed = self
            .database()
            .execute(Select(By::new((member, organization))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotMember(member))
            .map_err(tracerr::wrap!())?;
        if removed.role == membership::Role::Owner
            && acting.role != membership::Role::Owner
        {
            return Err(tracerr::new!(E::NotPermitted));
        }

        self.database()
            .execute(Delete(By::new((member, organization))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(())
    }
}

/// Error of [`RemoveMember`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Removed [`User`] is not a member of the organization.
    ///
    /// [`User`]: crate::domain::User
    #[display("`User(id: {_0})` is not a member")]
    #[from(ignore)]
    NotMember(#[error(not(source))] user::Id),

    /// Acting [`User`] is not permitted to remove the member.
    ///
    /// [`User`]: crate::domain::User
    #[display("Acting `User` is not permitted to remove the member")]
    NotPermitted,

    /// Members cannot remove themselves.
    #[display("Members cannot remove themselves")]
    SelfRemoval,
}

#[cfg(test)]
mod spec {
    use std::collections::HashMap;

    use common::{
        operations::{By, Delete, Select},
        DateTime,
    };
    use tracerr::Traced;

    use crate::{
        domain::{membership::Role, team, user, Membership},
        infra::{database, Database},
        Command as _, Config, Service,
    };

    use super::{ExecutionError, RemoveMember};

    /// [`Database`] stub serving canned [`Membership`] rows.
    #[derive(Debug, Default)]
    struct Canned {
        memberships: HashMap<(user::Id, team::Id), Membership>,
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

    impl Database<Delete<By<Membership, (user::Id, team::Id)>>> for Canned {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Delete(_): Delete<By<Membership, (user::Id, team::Id)>>,
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

    #[tokio::test]
    async fn self_removal_is_rejected() {
        let actor = user::Id::new();
        let organization = team::Id::new();
        let mut db = Canned::default();
        _ = db.memberships.insert(
            (actor, organization),
            membership(actor, organization, Role::Owner, true),
        );

        let res = service(db)
            .execute(RemoveMember {
                actor,
                organization,
                member: actor,
            })
            .await;

        assert!(matches!(
            res.unwrap_err().as_ref(),
            ExecutionError::SelfRemoval,
        ));
    }

    #[tokio::test]
    async fn plain_member_cannot_remove() {
        let actor = user::Id::new();
        let target = user::Id::new();
        let organization = team::Id::new();
        let mut db = Canned::default();
        _ = db.memberships.insert(
            (actor, organization),
            membership(actor, organization, Role::Member, true),
        );
        _ = db.memberships.insert(
            (target, organization),
            membership(target, organization, Role::Member, true),
        );

        let res = service(db)
            .execute(RemoveMember {
                actor,
                organization,
                member: target,
            })
            .await;

        assert!(matches!(
            res.unwrap_err().as_ref(),
            ExecutionError::NotPermitted,
        ));
    }

    #[tokio::test]
    async fn admin_cannot_remove_owner() {
        let actor = user::Id::new();
        let target = user::Id::new();
        let organization = team::Id::new();
        let mut db = Canned::default();
        _ = db.memberships.insert(
            (actor, organization),
            membership(actor, organization, Role::Admin, true),
        );
        _ = db.memberships.insert(
            (target, organization),
            membership(target, organization, Role::Owner, true),
        );

        let res = service(db)
            .execute(RemoveMember {
                actor,
                organization,
                member: target,
            })
            .await;

        assert!(matches!(
            res.unwrap_err().as_ref(),
            ExecutionError::NotPermitted,
        ));
    }

    #[tokio::test]
    async fn absent_member_is_reported() {
        let actor = user::Id::new();
        let target = user::Id::new();
        let organization = team::Id::new();
        let mut db = Canned::default();
        _ = db.memberships.insert(
            (actor, organization),
            membership(actor, organization, Role::Owner, true),
        );

        let res = service(db)
            .execute(RemoveMember {
                actor,
                organization,
                member: target,
            })
            .await;

        assert!(matches!(
            res.unwrap_err().as_ref(),
            ExecutionError::NotMember(id) if *id == target,
        ));
    }

    #[tokio::test]
    async fn owner_removes_admin() {
        let actor = user::Id::new();
        let target = user::Id::new();
        let organization = team::Id::new();
        let mut db = Canned::default();
        _ = db.memberships.insert(
            (actor, organization),
            membership(actor, organization, Role::Owner, true),
        );
        _ = db.memberships.insert(
            (target, organization),
            membership(target, organization, Role::Admin, true),
        );

        service(db)
            .execute(RemoveMember {
                actor,
                organization,
                member: target,
            })
            .await
            .unwrap();
    }
}
