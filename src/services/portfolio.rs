use crate::domain::auth::OwnerSession;
use crate::domain::portfolio_item::{NewPortfolioItem, PortfolioItem};
use crate::domain::types::{CategoryId, MediaType, MediaUrl, PortfolioItemId, SubCategoryRef};
use crate::forms::categories::DEFAULT_COVER_URL;
use crate::forms::portfolio::{AddPortfolioItemFormPayload, UpdatePortfolioItemFormPayload};
use crate::repository::{
    CategoryReader, PortfolioItemReader, PortfolioItemWriter, SubCategoryReader,
};
use crate::storage::{MediaStorage, StoragePath};

use super::{ServiceError, ServiceResult, require_owner, store_media};

/// The target category must exist and a referenced sub-category must belong
/// to it.
fn check_placement<R>(
    repo: &R,
    category_id: CategoryId,
    sub_category: &SubCategoryRef,
) -> ServiceResult<()>
where
    R: CategoryReader + SubCategoryReader,
{
    match repo.get_category_by_id(category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(e.into());
        }
    }

    let SubCategoryRef::EntityRef { id } = sub_category else {
        return Ok(());
    };
    match repo.get_sub_category_by_id(*id) {
        Ok(Some(sub)) if sub.category_id == category_id => Ok(()),
        Ok(_) => Err(ServiceError::Form(format!(
            "sub-category {id} does not belong to category {category_id}"
        ))),
        Err(e) => {
            log::error!("Failed to get sub-category: {e}");
            Err(e.into())
        }
    }
}

fn find_item<R: PortfolioItemReader>(repo: &R, item_id: i32) -> ServiceResult<PortfolioItem> {
    let id = PortfolioItemId::new(item_id).map_err(|_| ServiceError::NotFound)?;
    match repo.get_item_by_id(id) {
        Ok(Some(item)) => Ok(item),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get portfolio item: {e}");
            Err(e.into())
        }
    }
}

/// Publishes a work: the media is uploaded first, then the record is
/// inserted. A failed upload leaves nothing behind in the database.
pub fn add_item<R, S>(
    payload: AddPortfolioItemFormPayload,
    session: Option<&OwnerSession>,
    repo: &R,
    storage: &S,
) -> ServiceResult<PortfolioItem>
where
    R: CategoryReader + SubCategoryReader + PortfolioItemWriter,
    S: MediaStorage,
{
    require_owner(session)?;
    check_placement(repo, payload.category_id, &payload.sub_category)?;

    // The default cover is a still image whatever type was picked.
    let (image_url, media_type) = match payload.media {
        Some(source) => (
            store_media(source, StoragePath::project_media, storage)?,
            payload.media_type,
        ),
        None => (MediaUrl::new(DEFAULT_COVER_URL)?, MediaType::Image),
    };

    let now = chrono::Utc::now().naive_utc();
    let item = NewPortfolioItem {
        category_id: payload.category_id,
        sub_category: payload.sub_category,
        title: payload.title,
        image_url,
        media_type,
        description: payload.description,
        created_at: now,
        updated_at: now,
    };

    match repo.create_item(&item) {
        Ok(created) => {
            log::info!("Published portfolio item {} ({})", created.id, created.title);
            Ok(created)
        }
        Err(e) => {
            log::error!("Failed to create portfolio item: {e}");
            Err(e.into())
        }
    }
}

pub fn update_item<R>(
    item_id: i32,
    payload: UpdatePortfolioItemFormPayload,
    session: Option<&OwnerSession>,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + SubCategoryReader + PortfolioItemReader + PortfolioItemWriter,
{
    require_owner(session)?;
    let existing = find_item(repo, item_id)?;
    check_placement(repo, payload.category_id, &payload.sub_category)?;

    match repo.update_item(existing.id, &payload.into_update()) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to update portfolio item: {e}");
            Err(e.into())
        }
    }
}

pub fn delete_item<R>(item_id: i32, session: Option<&OwnerSession>, repo: &R) -> ServiceResult<()>
where
    R: PortfolioItemReader + PortfolioItemWriter,
{
    require_owner(session)?;
    let existing = find_item(repo, item_id)?;

    match repo.delete_item(existing.id) {
        Ok(_) => {
            log::info!("Deleted portfolio item {}", existing.id);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete portfolio item: {e}");
            Err(e.into())
        }
    }
}
