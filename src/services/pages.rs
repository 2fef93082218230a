use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::PageId;
use crate::dto::categories::CategoryDto;
use crate::dto::pages::PageDto;
use crate::forms::pages::{AddPageForm, AddPageFormPayload};
use crate::repository::{CategoryReader, PageReader, PageWriter, RepositoryError};

use super::categories::find_category;
use super::{ServiceError, ServiceResult, ensure_active};

/// Category the add-page form is shown for.
pub fn show_add_page<R>(slug: &str, user: &AuthenticatedUser, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryReader,
{
    ensure_active(user)?;

    find_category(slug, repo)?
        .map(CategoryDto::from)
        .ok_or(ServiceError::NotFound)
}

/// Add a page to the category at `slug`.
///
/// The category is resolved before the form is looked at; an unknown slug
/// yields [`ServiceError::NotFound`] and nothing is written.
pub fn add_page<R>(
    slug: &str,
    form: AddPageForm,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<PageDto>
where
    R: CategoryReader + PageWriter,
{
    ensure_active(user)?;

    let category = find_category(slug, repo)?.ok_or(ServiceError::NotFound)?;
    let payload = AddPageFormPayload::try_from(form)?;

    match repo.create_page(&payload.into_new_page(category.id)) {
        Ok(page) => Ok(page.into()),
        Err(RepositoryError::Conflict(e)) => {
            // The category vanished between lookup and insert.
            log::warn!("Failed to add page to {}: {e}", category.slug);
            Err(ServiceError::NotFound)
        }
        Err(e) => {
            log::error!("Failed to create page: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Count a click-through and return the URL to redirect to.
pub fn goto_page<R>(page_id: i32, repo: &R) -> ServiceResult<String>
where
    R: PageReader + PageWriter,
{
    let Ok(page_id) = PageId::new(page_id) else {
        return Err(ServiceError::NotFound);
    };

    let page = match repo.get_page_by_id(page_id) {
        Ok(Some(page)) => page,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get page: {e}");
            return Err(ServiceError::Internal);
        }
    };

    match repo.increment_page_views(page.id) {
        Ok(_) => Ok(page.url.into_inner()),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to count page view: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::TestRepository;
    use crate::services::fixtures::{category, page, sample_user};

    fn repo() -> TestRepository {
        TestRepository::new(
            vec![category(1, "Django", 32)],
            vec![page(1, 1, "Django Rocks", 20)],
        )
    }

    fn form() -> AddPageForm {
        AddPageForm {
            title: "How to Tango with Django".to_string(),
            url: "www.tangowithdjango.com".to_string(),
        }
    }

    #[test]
    fn add_page_starts_with_zero_views() {
        let repo = repo();

        let created = add_page("django", form(), &sample_user(), &repo).unwrap();
        assert_eq!(created.category_id, 1);
        assert_eq!(created.views, 0);
        assert_eq!(created.url, "http://www.tangowithdjango.com");
        assert_eq!(repo.page_count(), 2);
    }

    #[test]
    fn add_page_to_missing_category_writes_nothing() {
        let repo = repo();

        assert_eq!(
            add_page("nonexistent-slug", form(), &sample_user(), &repo),
            Err(ServiceError::NotFound)
        );
        assert_eq!(repo.page_count(), 1);
    }

    #[test]
    fn missing_category_wins_over_bad_form() {
        let repo = repo();

        let result = add_page("nonexistent-slug", AddPageForm::default(), &sample_user(), &repo);
        assert_eq!(result, Err(ServiceError::NotFound));
    }

    #[test]
    fn add_page_reports_form_errors() {
        let repo = repo();
        let bad = AddPageForm {
            title: "Broken".to_string(),
            url: String::new(),
        };

        let Err(ServiceError::Form(errors)) = add_page("django", bad, &sample_user(), &repo) else {
            panic!("expected form error");
        };
        assert!(!errors.get("url").is_empty());
        assert_eq!(repo.page_count(), 1);
    }

    #[test]
    fn show_add_page_requires_category() {
        let repo = repo();

        assert_eq!(
            show_add_page("django", &sample_user(), &repo).unwrap().name,
            "Django"
        );
        assert_eq!(
            show_add_page("flask", &sample_user(), &repo),
            Err(ServiceError::NotFound)
        );
    }

    #[test]
    fn goto_page_counts_view() {
        let repo = repo();

        let url = goto_page(1, &repo).unwrap();
        assert_eq!(url, "http://example.com/1");

        let page = repo.get_page_by_id(PageId::new(1).unwrap()).unwrap().unwrap();
        assert_eq!(page.views, 21);
    }

    #[test]
    fn goto_unknown_page_is_not_found() {
        let repo = repo();

        assert_eq!(goto_page(42, &repo), Err(ServiceError::NotFound));
        assert_eq!(goto_page(0, &repo), Err(ServiceError::NotFound));
    }
}
