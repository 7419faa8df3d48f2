//! Identity listing [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{team, user},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Option<read::identity::Source>, user::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<read::identity::Source>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<read::identity::Source>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, username, name, organization_id \
            FROM users \
            WHERE id = $1::UUID \
            LIMIT 1";
        let Some(row) = self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        const TEAMS_SQL: &str = "\
            SELECT t.id, t.name, t.slug, t.kind, m.role \
            FROM memberships AS m \
                 JOIN teams AS t ON t.id = m.team_id \
            WHERE m.user_id = $1::UUID \
              AND m.accepted \
            ORDER BY t.name ASC";
        let teams = self
            .query(TEAMS_SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::identity::SourceTeam {
                id: row.get("id"),
                name: row.get("name"),
                slug: row.get("slug"),
                kind: row.get("kind"),
                role: row.get("role"),
            })
            .collect();

        Ok(Some(read::identity::Source {
            id: row.get("id"),
            username: row.get("username"),
            name: row.get("name"),
            organization_id: row.get("organization_id"),
            teams,
        }))
    }
}

impl<C> Database<Select<By<Option<read::identity::Brand>, team::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<read::identity::Brand>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<read::identity::Brand>, team::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT brand_domain \
            FROM teams \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| read::identity::Brand {
                full_domain: row.get("brand_domain"),
            }))
    }
}
