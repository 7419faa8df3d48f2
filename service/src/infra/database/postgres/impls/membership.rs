//! [`Membership`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{team, user, Membership},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Membership>, (user::Id, team::Id)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Membership>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Membership>, (user::Id, team::Id)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (user_id, team_id) = by.into_inner();

        const SQL: &str = "\
            SELECT user_id, team_id, role, accepted, created_at \
            FROM memberships \
            WHERE user_id = $1::UUID \
              AND team_id = $2::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&user_id, &team_id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Membership {
                user_id: row.get("user_id"),
                team_id: row.get("team_id"),
                role: row.get("role"),
                accepted: row.get("accepted"),
                created_at: row.get("created_at"),
            }))
    }
}

impl<C> Database<Insert<Membership>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(membership): Insert<Membership>,
    ) -> Result<Self::Ok, Self::Err> {
        let Membership {
            user_id,
            team_id,
            role,
            accepted,
            created_at,
        } = membership;

        const SQL: &str = "\
            INSERT INTO memberships (\
                user_id, team_id, role, accepted, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, \
                $3::INT2, $4::BOOLEAN, \
                $5::TIMESTAMPTZ\
            ) \
            ON CONFLICT (user_id, team_id) DO UPDATE \
            SET role = EXCLUDED.role, \
                accepted = EXCLUDED.accepted, \
                created_at = EXCLUDED.created_at";
        self.exec(SQL, &[&user_id, &team_id, &role, &accepted, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Membership, (user::Id, team::Id)>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Membership, (user::Id, team::Id)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (user_id, team_id) = by.into_inner();

        const SQL: &str = "\
            DELETE FROM memberships \
            WHERE user_id = $1::UUID \
              AND team_id = $2::UUID";
        self.exec(SQL, &[&user_id, &team_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
