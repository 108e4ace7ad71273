use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{CategoryId, SubCategoryName, TypeConstraintError};

#[derive(Deserialize, Validate)]
pub struct AddSubCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddSubCategoryFormPayload {
    pub category_id: CategoryId,
    pub name: SubCategoryName,
}

#[derive(Debug, Error)]
pub enum AddSubCategoryFormError {
    #[error("Add sub-category form validation failed: {0}")]
    Validation(String),
    #[error("Add sub-category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddSubCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddSubCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddSubCategoryForm> for AddSubCategoryFormPayload {
    type Error = AddSubCategoryFormError;

    fn try_from(value: AddSubCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            name: SubCategoryName::new(value.name)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_whitespace_name() {
        let result = AddSubCategoryFormPayload::try_from(AddSubCategoryForm {
            category_id: 1,
            name: "  ".into(),
        });
        assert!(matches!(
            result,
            Err(AddSubCategoryFormError::TypeConstraint(_))
        ));
    }

    #[test]
    fn rejects_missing_category() {
        let result = AddSubCategoryFormPayload::try_from(AddSubCategoryForm {
            category_id: 0,
            name: "Logos".into(),
        });
        assert!(matches!(result, Err(AddSubCategoryFormError::Validation(_))));
    }
}
