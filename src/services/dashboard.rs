use serde::Serialize;

use crate::domain::auth::OwnerSession;
use crate::dto::categories::{CategoryDto, SubCategoryDto};
use crate::dto::gallery::GalleryCardDto;
use crate::grouping::normalize_items;
use crate::repository::{CategoryReader, PortfolioItemReader, SubCategoryReader};
use crate::services::cv::cv_link;
use crate::services::main::{Snapshot, load_snapshot};
use crate::services::{ServiceError, ServiceResult};
use crate::storage::MediaStorage;

/// Row of the dashboard item list.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardItem {
    #[serde(flatten)]
    pub card: GalleryCardDto,
    pub category_name: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub categories: Vec<CategoryDto>,
    pub sub_categories: Vec<SubCategoryDto>,
    pub items: Vec<DashboardItem>,
    /// Current CV link, `None` until one is uploaded.
    pub cv_url: Option<String>,
}

pub fn dashboard_page<S: MediaStorage>(snapshot: &Snapshot, storage: &S) -> DashboardPage {
    let all: Vec<_> = snapshot.items.iter().collect();
    let items = normalize_items(&all, &snapshot.sub_categories)
        .into_iter()
        .map(|gallery| {
            let category_name = snapshot
                .categories
                .iter()
                .find(|c| c.id == gallery.item.category_id)
                .map(|c| c.name.as_str().to_string())
                .unwrap_or_default();
            DashboardItem {
                card: GalleryCardDto::from(gallery),
                category_name,
            }
        })
        .collect();

    DashboardPage {
        categories: snapshot
            .categories
            .iter()
            .map(|c| CategoryDto::with_items(c, &snapshot.items))
            .collect(),
        sub_categories: snapshot
            .sub_categories
            .iter()
            .map(SubCategoryDto::from)
            .collect(),
        items,
        cv_url: cv_link(storage, chrono::Utc::now().timestamp_millis()),
    }
}

/// Dashboard for the signed-in owner.
pub fn show_dashboard<R, S>(
    session: Option<&OwnerSession>,
    repo: &R,
    storage: &S,
) -> ServiceResult<DashboardPage>
where
    R: CategoryReader + SubCategoryReader + PortfolioItemReader,
    S: MediaStorage,
{
    if session.is_none() {
        return Err(ServiceError::Unauthorized);
    }
    Ok(dashboard_page(&load_snapshot(repo), storage))
}
