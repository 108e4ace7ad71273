use crate::domain::auth::OwnerSession;
use crate::domain::sub_category::{NewSubCategory, SubCategory};
use crate::domain::types::SubCategoryId;
use crate::forms::sub_categories::AddSubCategoryFormPayload;
use crate::repository::{CategoryReader, SubCategoryReader, SubCategoryWriter};

use super::{ServiceError, ServiceResult, require_owner};

pub fn add_sub_category<R>(
    payload: AddSubCategoryFormPayload,
    session: Option<&OwnerSession>,
    repo: &R,
) -> ServiceResult<SubCategory>
where
    R: CategoryReader + SubCategoryWriter,
{
    require_owner(session)?;

    match repo.get_category_by_id(payload.category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(e.into());
        }
    }

    let sub_category = NewSubCategory {
        category_id: payload.category_id,
        name: payload.name,
        created_at: chrono::Utc::now().naive_utc(),
    };

    match repo.create_sub_category(&sub_category) {
        Ok(created) => Ok(created),
        Err(e) => {
            log::error!("Failed to create sub-category: {e}");
            Err(e.into())
        }
    }
}

/// Deletes the sub-category. Works that referenced it stay in the parent
/// category without a sub-category.
pub fn delete_sub_category<R>(
    sub_category_id: i32,
    session: Option<&OwnerSession>,
    repo: &R,
) -> ServiceResult<()>
where
    R: SubCategoryReader + SubCategoryWriter,
{
    require_owner(session)?;

    let id = SubCategoryId::new(sub_category_id).map_err(|_| ServiceError::NotFound)?;
    match repo.get_sub_category_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get sub-category: {e}");
            return Err(e.into());
        }
    }

    match repo.delete_sub_category(id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete sub-category: {e}");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CategoryId, PortfolioItemId, SubCategoryName, SubCategoryRef};
    use crate::repository::test::{
        TestRepository, sample_category, sample_item, sample_sub_category,
    };
    use crate::repository::{PortfolioItemReader, SubCategoryListQuery};

    fn owner() -> OwnerSession {
        OwnerSession {
            email: "owner@example.com".into(),
        }
    }

    fn payload(category_id: i32) -> AddSubCategoryFormPayload {
        AddSubCategoryFormPayload {
            category_id: CategoryId::new(category_id).unwrap(),
            name: SubCategoryName::new("Logos").unwrap(),
        }
    }

    #[test]
    fn adds_under_existing_category() {
        let repo = TestRepository::new(vec![sample_category(1, "Design", "design")], vec![]);
        let created = add_sub_category(payload(1), Some(&owner()), &repo).unwrap();
        assert_eq!(created.category_id.get(), 1);
        assert_eq!(
            repo.list_sub_categories(SubCategoryListQuery::default().category(created.category_id))
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn unknown_parent_is_not_found() {
        let result = add_sub_category(payload(4), Some(&owner()), &TestRepository::default());
        assert_eq!(result, Err(ServiceError::NotFound));
    }

    #[test]
    fn write_failure_is_gateway_error() {
        let repo = TestRepository::new(vec![sample_category(1, "Design", "design")], vec![])
            .failing_writes();
        let result = add_sub_category(payload(1), Some(&owner()), &repo);
        assert!(matches!(result, Err(ServiceError::Gateway(_))));
    }

    #[test]
    fn delete_detaches_items() {
        let mut item = sample_item(1, 1, "Logo", 10);
        item.sub_category = SubCategoryRef::EntityRef {
            id: SubCategoryId::new(5).unwrap(),
        };
        let repo = TestRepository::new(vec![sample_category(1, "Design", "design")], vec![item])
            .with_sub_categories(vec![sample_sub_category(5, 1, "Logos")]);

        delete_sub_category(5, Some(&owner()), &repo).unwrap();

        let item = repo.get_item_by_id(PortfolioItemId::new(1).unwrap()).unwrap().unwrap();
        assert_eq!(item.sub_category, SubCategoryRef::None);
        assert_eq!(delete_sub_category(5, Some(&owner()), &repo), Err(ServiceError::NotFound));
    }
}
