use chrono::Utc;
use diesel::prelude::*;

use crate::domain::portfolio_item::{NewPortfolioItem, PortfolioItem, PortfolioItemUpdate};
use crate::domain::types::PortfolioItemId;
use crate::models::portfolio_item::{
    NewPortfolioItem as DbNewPortfolioItem, PortfolioItem as DbPortfolioItem,
    PortfolioItemChangeset,
};
use crate::repository::errors::{RepositoryResult, map_write_error};
use crate::repository::{
    DieselRepository, PortfolioItemListQuery, PortfolioItemReader, PortfolioItemWriter,
};

impl PortfolioItemReader for DieselRepository {
    fn list_items(&self, query: PortfolioItemListQuery) -> RepositoryResult<Vec<PortfolioItem>> {
        use crate::schema::portfolio_items;

        let mut conn = self.conn()?;

        let mut items = portfolio_items::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(category_id) = query.category_id {
            items = items.filter(portfolio_items::category_id.eq(category_id.get()));
        }
        if let Some(limit) = query.limit {
            items = items.limit(limit as i64);
        }

        let items = items
            .order((
                portfolio_items::created_at.desc(),
                portfolio_items::id.desc(),
            ))
            .load::<DbPortfolioItem>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<PortfolioItem>, _>>()?;

        Ok(items)
    }

    fn get_item_by_id(&self, id: PortfolioItemId) -> RepositoryResult<Option<PortfolioItem>> {
        use crate::schema::portfolio_items;

        let mut conn = self.conn()?;

        let item = portfolio_items::table
            .filter(portfolio_items::id.eq(id.get()))
            .first::<DbPortfolioItem>(&mut conn)
            .optional()?;

        Ok(item.map(TryInto::try_into).transpose()?)
    }
}

impl PortfolioItemWriter for DieselRepository {
    fn create_item(&self, item: &NewPortfolioItem) -> RepositoryResult<PortfolioItem> {
        use crate::schema::portfolio_items;

        let mut conn = self.conn()?;
        let db_item: DbNewPortfolioItem = item.clone().into();

        let created = diesel::insert_into(portfolio_items::table)
            .values(db_item)
            .returning(DbPortfolioItem::as_returning())
            .get_result(&mut conn)
            .map_err(map_write_error)?;

        Ok(created.try_into()?)
    }

    fn update_item(
        &self,
        id: PortfolioItemId,
        update: &PortfolioItemUpdate,
    ) -> RepositoryResult<usize> {
        use crate::schema::portfolio_items;

        let mut conn = self.conn()?;
        let changeset = PortfolioItemChangeset::new(update.clone(), Utc::now().naive_utc());

        let affected =
            diesel::update(portfolio_items::table.filter(portfolio_items::id.eq(id.get())))
                .set(changeset)
                .execute(&mut conn)
                .map_err(map_write_error)?;

        Ok(affected)
    }

    fn delete_item(&self, id: PortfolioItemId) -> RepositoryResult<usize> {
        use crate::schema::portfolio_items;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(portfolio_items::table.filter(portfolio_items::id.eq(id.get())))
                .execute(&mut conn)?;

        Ok(affected)
    }
}
