use diesel::prelude::*;

use crate::domain::sub_category::{NewSubCategory, SubCategory};
use crate::domain::types::SubCategoryId;
use crate::models::sub_category::{
    NewSubCategory as DbNewSubCategory, SubCategory as DbSubCategory,
};
use crate::repository::errors::{RepositoryResult, map_write_error};
use crate::repository::{
    DieselRepository, SubCategoryListQuery, SubCategoryReader, SubCategoryWriter,
};

impl SubCategoryReader for DieselRepository {
    fn list_sub_categories(
        &self,
        query: SubCategoryListQuery,
    ) -> RepositoryResult<Vec<SubCategory>> {
        use crate::schema::sub_categories;

        let mut conn = self.conn()?;

        let mut items = sub_categories::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(category_id) = query.category_id {
            items = items.filter(sub_categories::category_id.eq(category_id.get()));
        }

        let items = items
            .order((sub_categories::name.asc(), sub_categories::id.asc()))
            .load::<DbSubCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<SubCategory>, _>>()?;

        Ok(items)
    }

    fn get_sub_category_by_id(&self, id: SubCategoryId) -> RepositoryResult<Option<SubCategory>> {
        use crate::schema::sub_categories;

        let mut conn = self.conn()?;

        let sub_category = sub_categories::table
            .filter(sub_categories::id.eq(id.get()))
            .first::<DbSubCategory>(&mut conn)
            .optional()?;

        Ok(sub_category.map(TryInto::try_into).transpose()?)
    }
}

impl SubCategoryWriter for DieselRepository {
    fn create_sub_category(&self, sub_category: &NewSubCategory) -> RepositoryResult<SubCategory> {
        use crate::schema::sub_categories;

        let mut conn = self.conn()?;
        let db_sub_category: DbNewSubCategory = sub_category.clone().into();

        let created = diesel::insert_into(sub_categories::table)
            .values(db_sub_category)
            .returning(DbSubCategory::as_returning())
            .get_result(&mut conn)
            .map_err(map_write_error)?;

        Ok(created.try_into()?)
    }

    fn delete_sub_category(&self, id: SubCategoryId) -> RepositoryResult<usize> {
        use crate::schema::{portfolio_items, sub_categories};

        let mut conn = self.conn()?;

        let affected = conn.transaction(|conn| {
            diesel::update(
                portfolio_items::table.filter(portfolio_items::sub_category_id.eq(Some(id.get()))),
            )
            .set(portfolio_items::sub_category_id.eq(None::<i32>))
            .execute(conn)?;

            diesel::delete(sub_categories::table.filter(sub_categories::id.eq(id.get())))
                .execute(conn)
        })?;

        Ok(affected)
    }
}
