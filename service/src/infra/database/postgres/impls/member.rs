//! Member listing [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Select};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{team, user},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C>
    Database<Select<By<read::member::list::Page, read::member::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::member::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::member::list::Page, read::member::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::member::list::Selector {
            arguments,
            filter: read::member::list::Filter { organization },
        } = by.into_inner();

        let limit = i32::try_from(arguments.limit()).unwrap() + 1;

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit, &organization];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });

        let sql = format!(
            "SELECT u.id, u.username, u.email, \
                    u.disable_impersonation, \
                    m.role, m.accepted \
             FROM memberships AS m \
                  JOIN users AS u ON u.id = m.user_id \
             WHERE m.team_id = $2::UUID \
                   {cursor} \
             ORDER BY u.id ASC \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND u.id > ${idx}::UUID"))
            }),
        );
        let rows = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;

        let has_more = rows.len() > arguments.limit();
        let rows = rows.into_iter().take(arguments.limit()).collect::<Vec<_>>();

        let ids = rows
            .iter()
            .map(|row| row.get::<_, user::Id>("id"))
            .collect::<Vec<_>>();
        let mut teams = self
            .team_tags(&ids)
            .await
            .map_err(tracerr::wrap!())?;

        let edges = rows
            .into_iter()
            .map(|row| {
                let id = row.get("id");
                let member = read::member::list::Member {
                    id,
                    username: row.get("username"),
                    email: row.get("email"),
                    role: row.get("role"),
                    accepted: row.get("accepted"),
                    disable_impersonation: row.get("disable_impersonation"),
                    teams: teams.remove(&id).unwrap_or_default(),
                };
                (id, member)
            })
            .collect::<Vec<_>>();

        Ok(read::member::list::Page::new(edges, has_more))
    }
}

impl<C> Postgres<C>
where
    C: Connection,
{
    /// Loads [`read::member::list::TeamTag`]s of the provided [`user::Id`]s,
    /// grouped by the [`user::Id`] they belong to.
    ///
    /// Only accepted memberships in non-organization [`team::Kind`]s are
    /// considered.
    async fn team_tags(
        &self,
        ids: &[user::Id],
    ) -> Result<
        HashMap<user::Id, Vec<read::member::list::TeamTag>>,
        Traced<database::Error>,
    > {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT m.user_id, t.id, t.name, t.slug \
            FROM memberships AS m \
                 JOIN teams AS t ON t.id = m.team_id \
            WHERE m.user_id = ANY($1::UUID[]) \
              AND m.accepted \
              AND t.kind = $2::INT2 \
            ORDER BY t.name ASC";
        Ok(self
            .query(SQL, &[&ids, &team::Kind::Team])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let user_id = row.get::<_, user::Id>("user_id");
                let tag = read::member::list::TeamTag {
                    id: row.get("id"),
                    name: row.get("name"),
                    slug: row.get("slug"),
                };
                (user_id, tag)
            })
            .into_group_map())
    }
}

impl<C>
    Database<
        Select<By<read::member::list::TotalCount, read::member::list::Filter>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::member::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::member::list::TotalCount, read::member::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::member::list::Filter { organization } = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM memberships \
            WHERE team_id = $1::UUID";
        self.query_opt(SQL, &[&organization])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i32>(0).into())
    }
}
