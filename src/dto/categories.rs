use serde::Serialize;

use crate::domain::category::Category;
use crate::dto::pages::PageDto;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub views: i32,
    pub likes: i32,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            slug: value.slug.into_inner(),
            views: value.views.get(),
            likes: value.likes.get(),
        }
    }
}

/// Category page contents. `category` is `None` when the slug matched nothing,
/// which templates render as a "no such category" notice.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct CategoryDetailDto {
    pub category: Option<CategoryDto>,
    pub pages: Vec<PageDto>,
    /// Every category by name, for the navigation sidebar.
    pub categories: Vec<CategoryDto>,
}
