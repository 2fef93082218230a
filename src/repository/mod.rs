use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, DeletePolicy, NewCategory};
use crate::domain::page::{NewPage, Page};
use crate::domain::types::{
    CategoryId, CategoryName, CategorySlug, LikeCount, PageId, PageTitle, PageUrl, UserId,
    Username, ViewCount,
};
use crate::domain::user::{NewUser, User};

pub mod category;
pub mod errors;
pub mod page;
pub mod user;

pub use errors::{RepositoryError, RepositoryResult};

/// Number of entries shown in the "top" lists on the index page.
pub const TOP_LIST_LIMIT: i64 = 5;

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

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// Categories ordered by likes, most liked first; ties keep insertion order.
    fn list_top_categories(&self, limit: i64) -> RepositoryResult<Vec<Category>>;
    /// Every category, ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Exact slug lookup.
    fn get_category_by_slug(&self, slug: &CategorySlug) -> RepositoryResult<Option<Category>>;
    /// Exact name lookup.
    fn get_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Return the category called `name`, creating it with zeroed counters if
    /// it does not exist. An existing row is returned untouched.
    fn get_or_create_category(&self, name: &CategoryName) -> RepositoryResult<Category>;
    /// Insert a category. Duplicate names or slugs yield
    /// [`RepositoryError::Conflict`].
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Rename a category, storing the slug derived from the new name.
    fn update_category(
        &self,
        id: CategoryId,
        name: &CategoryName,
        slug: &CategorySlug,
    ) -> RepositoryResult<Category>;
    fn increment_category_views(&self, id: CategoryId) -> RepositoryResult<ViewCount>;
    fn like_category(&self, id: CategoryId) -> RepositoryResult<LikeCount>;
    /// Delete a category, treating its pages according to `policy`.
    fn delete_category(&self, id: CategoryId, policy: DeletePolicy) -> RepositoryResult<usize>;
}

/// Read-only operations for page entities.
pub trait PageReader {
    /// Pages ordered by views, most viewed first; ties keep insertion order.
    fn list_top_pages(&self, limit: i64) -> RepositoryResult<Vec<Page>>;
    /// Pages owned by a category, most viewed first. May be empty.
    fn list_pages_for_category(&self, category_id: CategoryId) -> RepositoryResult<Vec<Page>>;
    fn get_page_by_id(&self, id: PageId) -> RepositoryResult<Option<Page>>;
}

/// Write operations for page entities.
pub trait PageWriter {
    /// Return the page titled `title` within the category, creating it when
    /// missing. `url` and `views` are overwritten on the returned row in both
    /// cases.
    fn get_or_create_page(
        &self,
        category_id: CategoryId,
        title: &PageTitle,
        url: &PageUrl,
        views: ViewCount,
    ) -> RepositoryResult<Page>;
    fn create_page(&self, page: &NewPage) -> RepositoryResult<Page>;
    fn increment_page_views(&self, id: PageId) -> RepositoryResult<ViewCount>;
}

/// Read-only operations for user accounts.
pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_username(&self, username: &Username) -> RepositoryResult<Option<User>>;
}

/// Write operations for user accounts.
pub trait UserWriter {
    /// Insert a user. A taken username yields [`RepositoryError::Conflict`].
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
}
