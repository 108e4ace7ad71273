//! Read-only JSON views of the public site.

use serde::Deserialize;

use crate::dto::categories::CategoryDto;
use crate::dto::gallery::GalleryCardDto;
use crate::grouping::CategoryIndex;
use crate::repository::{
    CategoryReader, PortfolioItemListQuery, PortfolioItemReader, SubCategoryReader,
};
use crate::services::main::{CategoryPage, category_page, home_page, load_snapshot};

use super::{ServiceError, ServiceResult};

/// Query parameters accepted by `/v1/preview`.
#[derive(Deserialize, Debug, Default)]
pub struct ApiV1PreviewQueryParams {
    /// Overrides the configured quota, capped by it.
    pub limit: Option<usize>,
}

pub fn api_v1_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader + PortfolioItemReader,
{
    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;
    let items = repo.list_items(PortfolioItemListQuery::default()).map_err(|e| {
        log::error!("Failed to list portfolio items: {e}");
        ServiceError::Internal
    })?;

    Ok(categories
        .iter()
        .map(|c| CategoryDto::with_items(c, &items))
        .collect())
}

/// Category with its grouped works. `slug` may arrive percent-encoded.
pub fn api_v1_category<R>(slug: &str, repo: &R) -> ServiceResult<CategoryPage>
where
    R: CategoryReader + SubCategoryReader + PortfolioItemReader,
{
    let snapshot = load_snapshot(repo);
    let decoded = urlencoding::decode(slug)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| slug.to_string());

    let index = CategoryIndex::new(&snapshot.categories);
    match index.lookup(&decoded, slug) {
        Some(category) => Ok(category_page(&snapshot, category)),
        None => Err(ServiceError::NotFound),
    }
}

pub fn api_v1_preview<R>(
    params: ApiV1PreviewQueryParams,
    quota: usize,
    repo: &R,
) -> ServiceResult<Vec<GalleryCardDto>>
where
    R: CategoryReader + SubCategoryReader + PortfolioItemReader,
{
    let quota = params.limit.map_or(quota, |limit| limit.min(quota));
    Ok(home_page(&load_snapshot(repo), quota).preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::{TestRepository, sample_category, sample_item};

    fn repo() -> TestRepository {
        TestRepository::new(
            vec![
                sample_category(1, "تصميم", "تصميم"),
                sample_category(2, "Photo", "photo"),
            ],
            vec![
                sample_item(1, 1, "A", 10),
                sample_item(2, 1, "B", 20),
                sample_item(3, 2, "C", 30),
            ],
        )
    }

    #[test]
    fn categories_carry_item_counts() {
        let categories = api_v1_categories(&repo()).unwrap();
        let counts: Vec<(&str, usize)> = categories
            .iter()
            .map(|c| (c.slug.as_str(), c.item_count))
            .collect();
        assert_eq!(counts, vec![("photo", 1), ("تصميم", 2)]);
    }

    #[test]
    fn category_accepts_encoded_slug() {
        let page = api_v1_category("%D8%AA%D8%B5%D9%85%D9%8A%D9%85", &repo()).unwrap();
        assert_eq!(page.category.id, 1);
        assert_eq!(page.groups.len(), 1);
        assert_eq!(page.groups[0].items.len(), 2);
    }

    #[test]
    fn unknown_category_is_not_found() {
        assert!(matches!(
            api_v1_category("missing", &repo()),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn preview_limit_is_capped_by_quota() {
        let params = ApiV1PreviewQueryParams { limit: Some(10) };
        assert_eq!(api_v1_preview(params, 2, &repo()).unwrap().len(), 2);
    }
}
