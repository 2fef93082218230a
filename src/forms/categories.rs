use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryName, CategorySlug};
use crate::forms::{FieldErrors, FormError};

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Please enter a category name of at most 128 characters."
    ))]
    pub name: String,
}

/// Validated category name together with the slug it maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub name: CategoryName,
    pub slug: CategorySlug,
}

impl AddCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory {
            name: self.name,
            slug: self.slug,
            views: Default::default(),
            likes: Default::default(),
        }
    }
}

fn named_slug(name: String) -> Result<(CategoryName, CategorySlug), FormError> {
    let mut errors = FieldErrors::new();
    let name = errors.check(CategoryName::new(name));
    let slug = name
        .as_ref()
        .and_then(|name| errors.check(CategorySlug::from_name(name)));

    match (name, slug) {
        (Some(name), Some(slug)) => Ok((name, slug)),
        _ => Err(FormError(errors)),
    }
}

impl TryFrom<AddCategoryForm> for AddCategoryFormPayload {
    type Error = FormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let (name, slug) = named_slug(value.name)?;
        Ok(Self { name, slug })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Please enter a category name of at most 128 characters."
    ))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryFormPayload {
    pub name: CategoryName,
    pub slug: CategorySlug,
}

impl TryFrom<UpdateCategoryForm> for UpdateCategoryFormPayload {
    type Error = FormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let (name, slug) = named_slug(value.name)?;
        Ok(Self { name, slug })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_category_derives_slug() {
        let form = AddCategoryForm {
            name: " Other Frameworks ".to_string(),
        };

        let payload: AddCategoryFormPayload = form.try_into().unwrap();
        assert_eq!(payload.name.as_str(), "Other Frameworks");
        assert_eq!(payload.slug.as_str(), "other-frameworks");

        let category = payload.into_new_category();
        assert_eq!(category.views, 0);
        assert_eq!(category.likes, 0);
    }

    #[test]
    fn add_category_rejects_empty_name() {
        let form = AddCategoryForm {
            name: String::new(),
        };

        let err = AddCategoryFormPayload::try_from(form).unwrap_err();
        assert_eq!(err.0.get("name").len(), 1);
    }

    #[test]
    fn add_category_rejects_whitespace_name() {
        let form = AddCategoryForm {
            name: "   ".to_string(),
        };

        let err = AddCategoryFormPayload::try_from(form).unwrap_err();
        assert_eq!(err.0.get("name"), ["name cannot be empty".to_string()]);
    }

    #[test]
    fn update_category_reports_unsluggable_name() {
        let form = UpdateCategoryForm {
            name: "???".to_string(),
        };

        let err = UpdateCategoryFormPayload::try_from(form).unwrap_err();
        assert_eq!(
            err.0.get("name"),
            ["name must contain at least one letter or digit".to_string()]
        );
    }
}
