use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, CategoryUpdate, NewCategory};
use crate::domain::portfolio_item::{NewPortfolioItem, PortfolioItem, PortfolioItemUpdate};
use crate::domain::sub_category::{NewSubCategory, SubCategory};
use crate::domain::types::{CategoryId, PortfolioItemId, SubCategoryId};

pub mod category;
pub mod errors;
pub mod portfolio_item;
pub mod sub_category;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing portfolio items.
#[derive(Debug, Clone, Default)]
pub struct PortfolioItemListQuery {
    /// Restrict to a single category.
    pub category_id: Option<CategoryId>,
    /// Return at most this many items.
    pub limit: Option<usize>,
}

impl PortfolioItemListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Query parameters used when listing sub-categories.
#[derive(Debug, Clone, Default)]
pub struct SubCategoryListQuery {
    /// Restrict to children of one category.
    pub category_id: Option<CategoryId>,
}

impl SubCategoryListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Retrieve a category by its routing slug.
    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return the stored record.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Overwrite every editable field of a category.
    fn update_category(&self, id: CategoryId, update: &CategoryUpdate) -> RepositoryResult<usize>;
    /// Delete a category together with its sub-categories and items.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for sub-category entities.
pub trait SubCategoryReader {
    /// List sub-categories ordered by name.
    fn list_sub_categories(&self, query: SubCategoryListQuery)
    -> RepositoryResult<Vec<SubCategory>>;
    /// Retrieve a sub-category by its identifier.
    fn get_sub_category_by_id(&self, id: SubCategoryId) -> RepositoryResult<Option<SubCategory>>;
}

/// Write operations for sub-category entities.
pub trait SubCategoryWriter {
    /// Persist a new sub-category and return the stored record.
    fn create_sub_category(&self, sub_category: &NewSubCategory) -> RepositoryResult<SubCategory>;
    /// Delete a sub-category, detaching the items that referenced it.
    fn delete_sub_category(&self, id: SubCategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for portfolio items.
pub trait PortfolioItemReader {
    /// List items newest first.
    fn list_items(&self, query: PortfolioItemListQuery) -> RepositoryResult<Vec<PortfolioItem>>;
    /// Retrieve an item by its identifier.
    fn get_item_by_id(&self, id: PortfolioItemId) -> RepositoryResult<Option<PortfolioItem>>;
}

/// Write operations for portfolio items.
pub trait PortfolioItemWriter {
    /// Persist a new item and return the stored record.
    fn create_item(&self, item: &NewPortfolioItem) -> RepositoryResult<PortfolioItem>;
    /// Overwrite the editable fields of an item.
    fn update_item(
        &self,
        id: PortfolioItemId,
        update: &PortfolioItemUpdate,
    ) -> RepositoryResult<usize>;
    /// Delete an item by id.
    fn delete_item(&self, id: PortfolioItemId) -> RepositoryResult<usize>;
}
