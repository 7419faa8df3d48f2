//! [`Query`] listing identities a [`User`] may act as.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{team, user},
    infra::{database, Database},
    read::{self, Identity},
    Service,
};

use super::Query;

/// [`Query`] listing [`Identity`]s a [`User`] may act as: their personal
/// profile followed by their accepted non-organization teams.
#[derive(Clone, Copy, Debug, From)]
pub struct ListActable {
    /// ID of the [`User`] to list [`Identity`]s of.
    pub user_id: user::Id,
}

impl<Db> Query<ListActable> for Service<Db>
where
    Db: Database<
            Select<By<Option<read::identity::Source>, user::Id>>,
            Ok = Option<read::identity::Source>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<read::identity::Brand>, team::Id>>,
            Ok = Option<read::identity::Brand>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<Identity>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: ListActable) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ListActable { user_id } = query;

        let source = self
            .database()
            .execute(Select(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        let brand = match source.organization_id {
            Some(org_id) => self
                .database()
                .execute(Select(By::new(org_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?,
            None => None,
        };

        Ok(source.into_identities(brand.as_ref(), &self.config.base_url))
    }
}

/// Error of [`ListActable`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] to list [`Identity`]s of does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
