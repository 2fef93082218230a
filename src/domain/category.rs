use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, CategoryName, CategorySlug, LikeCount, TypeConstraintError, ViewCount,
};

/// A named bucket of pages, addressed by its slug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub views: ViewCount,
    pub likes: LikeCount,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub views: ViewCount,
    pub likes: LikeCount,
}

impl NewCategory {
    /// Fresh category with zeroed counters and a slug derived from `name`.
    pub fn new(name: CategoryName) -> Result<Self, TypeConstraintError> {
        let slug = CategorySlug::from_name(&name)?;
        Ok(Self {
            name,
            slug,
            views: ViewCount::default(),
            likes: LikeCount::default(),
        })
    }

    pub fn with_counters(mut self, views: ViewCount, likes: LikeCount) -> Self {
        self.views = views;
        self.likes = likes;
        self
    }
}

/// What happens to a category's pages when the category is deleted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Refuse to delete a category that still owns pages.
    #[default]
    Block,
    /// Delete the owned pages together with the category.
    Cascade,
}
