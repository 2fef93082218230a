use crate::domain::auth::AuthenticatedUser;
use crate::domain::category::{Category, DeletePolicy};
use crate::domain::types::{CategoryName, CategorySlug};
use crate::dto::categories::{CategoryDetailDto, CategoryDto};
use crate::dto::pages::PageDto;
use crate::forms::FieldErrors;
use crate::forms::categories::{
    AddCategoryForm, AddCategoryFormPayload, UpdateCategoryForm, UpdateCategoryFormPayload,
};
use crate::repository::{CategoryReader, CategoryWriter, PageReader, RepositoryError};

use super::{ServiceError, ServiceResult, ensure_active};

const DUPLICATE_CATEGORY: &str = "Category with this name already exists.";

fn duplicate_category() -> ServiceError {
    ServiceError::Form(FieldErrors::single("name", DUPLICATE_CATEGORY))
}

/// Resolve a slug taken from the URL. Slugs that could never have been
/// generated simply match nothing.
pub(crate) fn find_category<R>(slug: &str, repo: &R) -> ServiceResult<Option<Category>>
where
    R: CategoryReader,
{
    let Ok(slug) = CategorySlug::new(slug) else {
        return Ok(None);
    };

    repo.get_category_by_slug(&slug).map_err(|e| {
        log::error!("Failed to get category by slug: {e}");
        ServiceError::Internal
    })
}

fn require_category<R>(slug: &str, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    find_category(slug, repo)?.ok_or(ServiceError::NotFound)
}

/// Whether `name` or `slug` is already used by a category other than
/// `except`.
fn is_taken<R>(
    name: &CategoryName,
    slug: &CategorySlug,
    except: Option<&Category>,
    repo: &R,
) -> ServiceResult<bool>
where
    R: CategoryReader,
{
    let by_name = repo.get_category_by_name(name).map_err(|e| {
        log::error!("Failed to get category by name: {e}");
        ServiceError::Internal
    })?;
    let by_slug = repo.get_category_by_slug(slug).map_err(|e| {
        log::error!("Failed to get category by slug: {e}");
        ServiceError::Internal
    })?;

    Ok([by_name, by_slug]
        .into_iter()
        .flatten()
        .any(|found| except.is_none_or(|current| current.id != found.id)))
}

/// Category detail page. Each successful lookup counts as a view.
///
/// A slug that matches nothing is not an error: the returned detail carries
/// no category and no pages.
pub fn show_category<R>(slug: &str, repo: &R) -> ServiceResult<CategoryDetailDto>
where
    R: CategoryReader + CategoryWriter + PageReader,
{
    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;
    let categories = categories.into_iter().map(CategoryDto::from).collect();

    let Some(mut category) = find_category(slug, repo)? else {
        return Ok(CategoryDetailDto {
            categories,
            ..Default::default()
        });
    };

    category.views = repo.increment_category_views(category.id).map_err(|e| {
        log::error!("Failed to count category view: {e}");
        ServiceError::Internal
    })?;

    let pages = repo.list_pages_for_category(category.id).map_err(|e| {
        log::error!("Failed to list pages: {e}");
        ServiceError::Internal
    })?;

    Ok(CategoryDetailDto {
        category: Some(category.into()),
        pages: pages.into_iter().map(PageDto::from).collect(),
        categories,
    })
}

pub fn add_category<R>(
    form: AddCategoryForm,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + CategoryWriter,
{
    ensure_active(user)?;

    let payload = AddCategoryFormPayload::try_from(form)?;

    if is_taken(&payload.name, &payload.slug, None, repo)? {
        return Err(duplicate_category());
    }

    match repo.create_category(&payload.into_new_category()) {
        Ok(category) => {
            log::info!("{} added category {}", user.username, category.slug);
            Ok(category.into())
        }
        Err(RepositoryError::Conflict(e)) => {
            log::warn!("Category insert raced with another writer: {e}");
            Err(duplicate_category())
        }
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Rename the category at `slug`. The slug is regenerated from the new name.
pub fn update_category<R>(
    slug: &str,
    form: UpdateCategoryForm,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + CategoryWriter,
{
    ensure_active(user)?;

    let category = require_category(slug, repo)?;
    let payload = UpdateCategoryFormPayload::try_from(form)?;

    if is_taken(&payload.name, &payload.slug, Some(&category), repo)? {
        return Err(duplicate_category());
    }

    match repo.update_category(category.id, &payload.name, &payload.slug) {
        Ok(updated) => Ok(updated.into()),
        Err(RepositoryError::Conflict(_)) => Err(duplicate_category()),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Add one like and return the new total.
pub fn like_category<R>(slug: &str, user: &AuthenticatedUser, repo: &R) -> ServiceResult<i32>
where
    R: CategoryReader + CategoryWriter,
{
    ensure_active(user)?;

    let category = require_category(slug, repo)?;
    match repo.like_category(category.id) {
        Ok(likes) => Ok(likes.get()),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to like category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_category<R>(
    slug: &str,
    user: &AuthenticatedUser,
    repo: &R,
    policy: DeletePolicy,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    ensure_active(user)?;

    let category = require_category(slug, repo)?;
    match repo.delete_category(category.id, policy) {
        Ok(_) => {
            log::info!("{} deleted category {}", user.username, category.slug);
            Ok(())
        }
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(RepositoryError::Conflict(msg)) => Err(ServiceError::Conflict(msg)),
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Err(ServiceError::Internal)
        }
    }
}
